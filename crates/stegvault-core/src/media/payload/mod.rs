mod frame;

pub use frame::*;
