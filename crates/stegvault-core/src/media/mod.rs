pub mod codec_options;
pub mod image;
mod interop;
pub mod payload;
mod types;

pub use codec_options::{LsbOptions, Traversal, VaultOptions};
pub use types::*;
