use tracing::trace;

/// Identifies a SerDes patch image, see `RTSDS_FW_MAGIC` in the driver.
pub const MAGIC: u32 = 0x8300_9300;

/// Bytes per patch operand.
pub const DATASIZE: usize = 2;

/// magic + checksum + filesize + directory count
pub const HEADER_SIZE: usize = 16;

/// id + offset + length + reserved
pub const DIR_ENTRY_SIZE: usize = 16;

/// One hardware initialization routine: an event id and its raw 16-bit patch words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub id: u32,
    pub operands: Vec<u16>,
}

impl Sequence {
    pub fn new(id: u32, operands: Vec<u16>) -> Self {
        Sequence { id, operands }
    }

    /// Size of the patch data block in bytes.
    pub fn byte_len(&self) -> usize {
        self.operands.len() * DATASIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: u32,
    /// Offset in bytes from the start of the image
    pub offset: u32,
    /// Length in bytes of the patch data block
    pub length: u32,
    pub reserved: u32,
}

/// A laid-out firmware image.
///
/// ```text
/// 0       magic
/// 4       crc32 of [8..]
/// 8       file size
/// 12      directory count N
/// 16      N * (id, offset, length, reserved)
/// 16+16N  patch data, big endian u16 words
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firmware {
    pub magic: u32,
    pub checksum: u32,
    pub file_size: u32,
    pub directory: Vec<DirectoryEntry>,
    pub patch_data: Vec<u8>,
}

impl Firmware {
    /// Lay out sequences in the given order. Patch blocks are contiguous, without padding.
    pub fn build(sequences: &[Sequence]) -> Self {
        let mut offset = HEADER_SIZE + DIR_ENTRY_SIZE * sequences.len();
        let mut directory = Vec::with_capacity(sequences.len());
        let mut patch_data = Vec::new();

        for seq in sequences {
            let length = seq.byte_len();
            directory.push(DirectoryEntry {
                id: seq.id,
                offset: offset as u32,
                length: length as u32,
                reserved: 0,
            });
            for word in &seq.operands {
                patch_data.extend_from_slice(&word.to_be_bytes());
            }
            offset += length;
        }

        let mut firmware = Firmware {
            magic: MAGIC,
            checksum: 0,
            file_size: offset as u32,
            directory,
            patch_data,
        };
        firmware.checksum = crc32fast::hash(&firmware.body());
        trace!(
            count = firmware.directory.len(),
            size = firmware.file_size,
            checksum = firmware.checksum,
            "laid out firmware"
        );
        firmware
    }

    /// Start of the patch data region.
    pub fn data_offset(&self) -> usize {
        HEADER_SIZE + DIR_ENTRY_SIZE * self.directory.len()
    }

    /// Everything covered by the checksum: file size, directory and patch data.
    fn body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.file_size as usize);
        body.extend_from_slice(&self.file_size.to_be_bytes());
        body.extend_from_slice(&(self.directory.len() as u32).to_be_bytes());
        for entry in &self.directory {
            body.extend_from_slice(&entry.id.to_be_bytes());
            body.extend_from_slice(&entry.offset.to_be_bytes());
            body.extend_from_slice(&entry.length.to_be_bytes());
            body.extend_from_slice(&entry.reserved.to_be_bytes());
        }
        body.extend_from_slice(&self.patch_data);
        body
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bin = Vec::with_capacity(self.file_size as usize);
        bin.extend_from_slice(&self.magic.to_be_bytes());
        bin.extend_from_slice(&self.checksum.to_be_bytes());
        bin.extend(self.body());
        bin
    }

    /// Patch data of a directory entry, empty if the entry points outside the image.
    pub fn block(&self, entry: &DirectoryEntry) -> &[u8] {
        let range = (entry.offset as usize)
            .checked_sub(self.data_offset())
            .and_then(|start| Some(start..start.checked_add(entry.length as usize)?));
        range
            .and_then(|range| self.patch_data.get(range))
            .unwrap_or_default()
    }

    /// Recover the sequences in directory order.
    pub fn sequences(&self) -> Vec<Sequence> {
        self.directory
            .iter()
            .map(|entry| {
                let operands = self
                    .block(entry)
                    .chunks_exact(DATASIZE)
                    .map(|w| u16::from_be_bytes([w[0], w[1]]))
                    .collect();
                Sequence::new(entry.id, operands)
            })
            .collect()
    }
}

/// Encode sequences into a complete big endian firmware image.
pub fn encode(sequences: &[Sequence]) -> Vec<u8> {
    Firmware::build(sequences).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_sequence_layout() {
        let bin = encode(&[Sequence::new(0x10, vec![0x0010, 0x0001, 0x0001])]);
        #[rustfmt::skip]
        let expect = vec![
            0x83, 0x00, 0x93, 0x00, // magic
            0xFE, 0xD0, 0xDD, 0xF8, // crc32
            0x00, 0x00, 0x00, 0x26, // file size
            0x00, 0x00, 0x00, 0x01, // count
            0x00, 0x00, 0x00, 0x10, // id
            0x00, 0x00, 0x00, 0x20, // offset
            0x00, 0x00, 0x00, 0x06, // length
            0x00, 0x00, 0x00, 0x00, // reserved
            0x00, 0x10, 0x00, 0x01, 0x00, 0x01,
        ];
        assert_eq!(bin, expect);
    }

    #[test]
    fn test_no_sequences() {
        let bin = encode(&[]);
        #[rustfmt::skip]
        let expect = vec![
            0x83, 0x00, 0x93, 0x00,
            0x05, 0xC2, 0x48, 0xEB,
            0x00, 0x00, 0x00, 0x10,
            0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(bin, expect);
    }

    #[test]
    fn test_empty_operands_take_no_space() {
        let fw = Firmware::build(&[
            Sequence::new(1, vec![]),
            Sequence::new(2, vec![7, 8]),
            Sequence::new(3, vec![]),
        ]);
        let offsets: Vec<_> = fw.directory.iter().map(|e| (e.offset, e.length)).collect();
        assert_eq!(offsets, vec![(64, 0), (64, 4), (68, 0)]);
        assert_eq!(fw.file_size, 68);
        assert_eq!(fw.to_bytes().len(), 68);
    }

    #[test]
    fn test_directory_keeps_input_order() {
        let fw = Firmware::build(&[Sequence::new(9, vec![1]), Sequence::new(3, vec![2])]);
        let ids: Vec<_> = fw.directory.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![9, 3]);
        assert_eq!(fw.patch_data, vec![0x00, 0x01, 0x00, 0x02]);
    }

    #[test]
    fn test_block_outside_patch_data() {
        let fw = Firmware::build(&[Sequence::new(1, vec![0xAAAA, 0xBBBB])]);
        let entry = |offset, length| DirectoryEntry {
            id: 9,
            offset,
            length,
            reserved: 0,
        };
        // patch data spans 32..36
        assert_eq!(fw.block(&fw.directory[0]).to_vec(), vec![0xAA, 0xAA, 0xBB, 0xBB]);
        assert_eq!(fw.block(&entry(34, 2)).to_vec(), vec![0xBB, 0xBB]);

        // header and directory
        assert!(fw.block(&entry(4, 2)).is_empty());
        assert!(fw.block(&entry(30, 2)).is_empty());
        // past the end
        assert!(fw.block(&entry(34, 4)).is_empty());
        assert!(fw.block(&entry(36, 2)).is_empty());
        assert!(fw.block(&entry(32, u32::MAX)).is_empty());
    }

    #[test]
    fn test_sequences_from_layout() {
        let seqs = vec![Sequence::new(0xCAFE, vec![0xFFFF, 0]), Sequence::new(1, vec![])];
        assert_eq!(Firmware::build(&seqs).sequences(), seqs);
    }
}
