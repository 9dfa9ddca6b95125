pub mod decoder;
pub mod encoder;
mod layout;
pub mod lsb_codec;

pub use decoder::LsbReader;
pub use encoder::LsbWriter;
pub use layout::{BitPosition, EmbeddingLayout, SlotPosition};
pub use lsb_codec::{read_bits, write_bits, write_bits_parallel, LsbCodec};
