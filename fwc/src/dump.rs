use color_print::{cformat, cprintln};
use fw::{Firmware, DATASIZE};

/// Patch data words printed per row, one driver step is 8 words.
const WORDS_PER_ROW: usize = 8;

pub fn print_dump(firmware: &Firmware) {
    println!("+-[Header]-----------------------------------------------------------");
    cprintln!("| magic    <y>0x{:08X}</>", firmware.magic);
    cprintln!("| checksum <y>0x{:08X}</>", firmware.checksum);
    cprintln!("| size     {} bytes", firmware.file_size);
    cprintln!("| count    {}", firmware.directory.len());

    for (idx, entry) in firmware.directory.iter().enumerate() {
        println!("+-[{:>3}]-------------------------------------------------------------", idx);
        cprintln!(
            "| id <g>0x{:08X}</> @ <c>0x{:04X}</> {} bytes",
            entry.id,
            entry.offset,
            entry.length
        );
        let block = firmware.block(entry);
        for (row, words) in block.chunks(DATASIZE * WORDS_PER_ROW).enumerate() {
            let line = words
                .chunks_exact(DATASIZE)
                .map(|w| cformat!("<y>{:04X}</>", u16::from_be_bytes([w[0], w[1]])))
                .collect::<Vec<_>>()
                .join(" ");
            println!(
                "| 0x{:04X} : {}",
                entry.offset as usize + row * DATASIZE * WORDS_PER_ROW,
                line
            );
        }
    }
    println!("+--------------------------------------------------------------------");
}
