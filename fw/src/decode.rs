use crate::error::DecodeError;
use crate::image::{DirectoryEntry, Firmware, DIR_ENTRY_SIZE, HEADER_SIZE, MAGIC};

fn word(bin: &[u8], at: usize) -> Result<u32, DecodeError> {
    match bin.get(at..at + 4) {
        Some(w) => Ok(u32::from_be_bytes([w[0], w[1], w[2], w[3]])),
        None => Err(DecodeError::Truncated {
            need: at + 4,
            have: bin.len(),
        }),
    }
}

impl Firmware {
    /// Parse and verify an image: magic, file size, checksum and directory bounds.
    pub fn decode(bin: &[u8]) -> Result<Firmware, DecodeError> {
        if bin.len() < HEADER_SIZE {
            return Err(DecodeError::Truncated {
                need: HEADER_SIZE,
                have: bin.len(),
            });
        }

        let magic = word(bin, 0)?;
        if magic != MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }

        let checksum = word(bin, 4)?;
        let file_size = word(bin, 8)?;
        if file_size as usize != bin.len() {
            return Err(DecodeError::SizeMismatch {
                header: file_size,
                actual: bin.len(),
            });
        }

        let computed = crc32fast::hash(&bin[8..]);
        if computed != checksum {
            return Err(DecodeError::ChecksumMismatch {
                stored: checksum,
                computed,
            });
        }

        let count = word(bin, 12)? as usize;
        let data_offset = count
            .checked_mul(DIR_ENTRY_SIZE)
            .and_then(|dir| dir.checked_add(HEADER_SIZE))
            .filter(|end| *end <= bin.len())
            .ok_or(DecodeError::Truncated {
                need: HEADER_SIZE.saturating_add(count.saturating_mul(DIR_ENTRY_SIZE)),
                have: bin.len(),
            })?;

        let mut directory = Vec::with_capacity(count);
        for idx in 0..count {
            let base = HEADER_SIZE + idx * DIR_ENTRY_SIZE;
            let entry = DirectoryEntry {
                id: word(bin, base)?,
                offset: word(bin, base + 4)?,
                length: word(bin, base + 8)?,
                reserved: word(bin, base + 12)?,
            };
            let start = entry.offset as usize;
            let end = start.checked_add(entry.length as usize);
            if start < data_offset || end.map_or(true, |end| end > bin.len()) {
                return Err(DecodeError::EntryOutOfBounds {
                    id: entry.id,
                    offset: entry.offset,
                    length: entry.length,
                });
            }
            if entry.length % 2 != 0 {
                return Err(DecodeError::OddLength {
                    id: entry.id,
                    length: entry.length,
                });
            }
            directory.push(entry);
        }

        Ok(Firmware {
            magic,
            checksum,
            file_size,
            directory,
            patch_data: bin[data_offset..].to_vec(),
        })
    }
}
