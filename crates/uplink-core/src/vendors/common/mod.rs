pub mod bits;
pub mod hex;
pub mod reader;
