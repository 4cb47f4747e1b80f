// Service exports
pub mod frame_loop;
pub mod loader;

pub use frame_loop::{card_lines, FrameLoop, FrameStats, Renderer, TracingRenderer};
pub use loader::{load_deck, load_script, parse_deck, parse_script, FileFormat, LoaderError};
