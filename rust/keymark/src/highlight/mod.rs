pub mod matcher;
pub mod document;
pub mod decoration;
pub mod config;
pub mod overlay;
pub mod channel;
pub mod wasm;

pub use matcher::*;
pub use document::*;
pub use decoration::*;
pub use config::*;
pub use overlay::*;
pub use channel::*;
pub use wasm::*;
