mod decode;
mod error;
mod image;

pub use error::DecodeError;
pub use image::{
    encode, DirectoryEntry, Firmware, Sequence, DATASIZE, DIR_ENTRY_SIZE, HEADER_SIZE, MAGIC,
};
