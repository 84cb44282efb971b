use fw::Sequence;

use crate::error::Error;
use crate::literal::Literal;

/// Parse `NAME = v0 v1 ...` chunks into sequences, keeping their order.
pub fn build_sequences(chunks: &[String]) -> Result<Vec<Sequence>, Error> {
    chunks.iter().map(|chunk| parse_sequence(chunk)).collect()
}

/// The name must be an integer fitting u32. Operands are truncated to 16 bits.
pub fn parse_sequence(chunk: &str) -> Result<Sequence, Error> {
    let (name, vals) = chunk
        .split_once('=')
        .ok_or_else(|| Error::MalformedSequenceName(chunk.to_string()))?;

    let name = name.trim().to_uppercase();
    let id = Literal::parse(&name)
        .and_then(|lit| lit.to_u32())
        .ok_or_else(|| Error::MalformedSequenceName(chunk.to_string()))?;

    let operands = vals
        .split_whitespace()
        .map(|val| match Literal::parse(val) {
            Some(lit) => Ok(lit.wrapping_u16()),
            None => Err(Error::InvalidNumericLiteral(
                val.to_string(),
                chunk.to_string(),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Sequence::new(id, operands))
}
