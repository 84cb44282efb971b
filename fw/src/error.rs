use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Image truncated: {need} bytes required, {have} available")]
    Truncated { need: usize, have: usize },

    #[error("Bad magic: 0x{0:08X}")]
    BadMagic(u32),

    #[error("File size mismatch: header says {header} bytes, image has {actual}")]
    SizeMismatch { header: u32, actual: usize },

    #[error("Checksum mismatch: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("Sequence 0x{id:08X} at 0x{offset:X}+{length} lies outside the patch data")]
    EntryOutOfBounds { id: u32, offset: u32, length: u32 },

    #[error("Sequence 0x{id:08X} has odd length {length}")]
    OddLength { id: u32, length: u32 },
}
