mod config;
mod dump;
mod error;
mod literal;
mod macros;
mod msg;
mod normalize;
mod parser;
mod splitter;

use fw::Sequence;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{Read, Write};
use tracing::debug;

pub use config::{Config, DuplicatePolicy, Dts};
pub use dump::print_dump;
pub use error::Error;
pub use literal::Literal;
pub use macros::{extract_macros, MacroDefinition, MacroTable};
pub use msg::Msg;
pub use normalize::{normalize, tokenize};
pub use parser::{build_sequences, parse_sequence};
pub use splitter::extract_sequences;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub sequences: Vec<Sequence>,
    pub image: Vec<u8>,
    pub msgs: Vec<Msg>,
}

/// Compile source text into a firmware image.
pub fn compile(source: &str, config: &Config) -> Result<Compiled, Error> {
    config.validate()?;
    let mut msgs = vec![];

    let normalized = normalize(source);
    debug!(bytes = normalized.len(), "normalized source");

    let defs = extract_macros(&normalized, &config.keyword)?;
    let macros = MacroTable::build(defs, config.duplicates, &mut msgs)?;
    debug!(count = macros.len(), "collected macros");

    let chunks = extract_sequences(&normalized, &macros, &config.prefix, &config.keyword);
    debug!(count = chunks.len(), "split sequences");

    let sequences = build_sequences(&chunks)?;
    let sequences = dedup(sequences, config.duplicates, &mut msgs)?;

    let image = fw::encode(&sequences);
    debug!(count = sequences.len(), bytes = image.len(), "encoded firmware");

    Ok(Compiled {
        sequences,
        image,
        msgs,
    })
}

/// A repeated id either fails or replaces the earlier sequence in its directory slot.
fn dedup(
    sequences: Vec<Sequence>,
    policy: DuplicatePolicy,
    msgs: &mut Vec<Msg>,
) -> Result<Vec<Sequence>, Error> {
    let mut seen: IndexMap<u32, Vec<u16>> = IndexMap::new();
    for Sequence { id, operands } in sequences {
        let len = operands.len();
        if let Some(prev) = seen.insert(id, operands) {
            match policy {
                DuplicatePolicy::Reject => return Err(Error::DuplicateSequence(id)),
                DuplicatePolicy::Override => {
                    msgs.push(Msg::Warn(format!("Re-defined sequence: 0x{:08X}", id)));
                    msgs.push(Msg::Note(format!(
                        "Previous definition with {} operands has been overridden by {} operands",
                        prev.len(),
                        len
                    )));
                }
            }
        }
    }
    Ok(seen
        .into_iter()
        .map(|(id, operands)| Sequence::new(id, operands))
        .collect())
}

pub fn read_source(path: &str) -> Result<String, Error> {
    let mut file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
    let mut source = String::new();
    file.read_to_string(&mut source)
        .map_err(|e| Error::FileRead(path.to_string(), e))?;
    Ok(source)
}

pub fn write_image(path: &str, image: &[u8]) -> Result<(), Error> {
    let mut file = File::create(path).map_err(|e| Error::FileCreate(path.to_string(), e))?;
    file.write_all(image)
        .map_err(|e| Error::FileWrite(path.to_string(), e))
}

/// Read `input`, compile it and write the image to `output`.
pub fn compile_file(input: &str, output: &str, config: &Config) -> Result<Compiled, Error> {
    let source = read_source(input)?;
    let compiled = compile(&source, config)?;
    write_image(output, &compiled.image)?;
    Ok(compiled)
}
