pub mod types;
pub mod response;
pub mod prompt;
pub mod client;
pub mod service;

pub use types::*;
pub use response::*;
pub use client::*;
pub use service::*;
