use tracing::trace;

use crate::macros::MacroTable;
use crate::normalize::{find_word, tokenize};

/// Cut normalized text into one `NAME = v0 v1 ...` chunk per sequence, in source order.
///
/// Every fragment starting at `prefix` is a candidate. A chunk ends at the next
/// prefix or at the macro keyword as a whole word, and is kept only if it holds
/// an assignment. Macros are applied to whole tokens.
pub fn extract_sequences(
    normalized: &str,
    macros: &MacroTable,
    prefix: &str,
    keyword: &str,
) -> Vec<String> {
    normalized
        .split(prefix)
        .map(|fragment| {
            let mut chunk = format!("{}{}", prefix, fragment);
            if let Some(end) = find_word(&chunk, keyword) {
                chunk.truncate(end);
            }
            chunk
        })
        .filter(|chunk| chunk.contains('='))
        .map(|chunk| {
            let chunk = tokenize(&chunk)
                .into_iter()
                .map(|token| macros.substitute(token))
                .collect::<Vec<_>>()
                .join(" ");
            trace!(%chunk, "sequence");
            chunk
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use crate::macros::{extract_macros, MacroTable};
    use pretty_assertions::assert_eq;

    fn split(text: &str) -> Vec<String> {
        let defs = extract_macros(text, "#define").unwrap();
        let table = MacroTable::build(defs, DuplicatePolicy::Reject, &mut vec![]).unwrap();
        extract_sequences(text, &table, "EVT_", "#define")
    }

    #[test]
    fn test_first_seen_order() {
        assert_eq!(
            split("EVT_B = 2 EVT_A = 1 EVT_C = 3"),
            vec!["EVT_B = 2", "EVT_A = 1", "EVT_C = 3"]
        );
    }

    #[test]
    fn test_declarations_are_not_sequences() {
        assert_eq!(
            split("#define EVT_A 7 #define X 1 EVT_A = X 2"),
            vec!["7 = 1 2"]
        );
    }

    #[test]
    fn test_declaration_between_sequences() {
        assert_eq!(
            split("#define X 1 EVT_A = X #define Y 2 EVT_B = Y"),
            vec!["EVT_A = 1", "EVT_B = 2"]
        );
    }

    #[test]
    fn test_keyword_inside_operand() {
        let text = "DEF SEQ_A 1 DEF UNDEFINED_X 5 SEQ_A = UNDEFINED_X 2";
        let defs = extract_macros(text, "DEF").unwrap();
        let table = MacroTable::build(defs, DuplicatePolicy::Reject, &mut vec![]).unwrap();
        assert_eq!(
            extract_sequences(text, &table, "SEQ_", "DEF"),
            vec!["1 = 5 2"]
        );
    }

    #[test]
    fn test_substring_is_not_substituted() {
        assert_eq!(
            split("#define P 9 #define PORT 4 EVT_A = PORT P0 P"),
            vec!["EVT_A = 4 P0 9"]
        );
    }

    #[test]
    fn test_single_pass() {
        assert_eq!(
            split("#define A B #define B 1 EVT_X = A B"),
            vec!["EVT_X = B 1"]
        );
    }

    #[test]
    fn test_prefix_inside_word() {
        assert_eq!(split("u16 RTSDS_EVT_A = 1"), vec!["EVT_A = 1"]);
    }

    #[test]
    fn test_leading_text_with_assignment() {
        assert_eq!(split("x = 5 EVT_A = 1"), vec!["EVT_x = 5", "EVT_A = 1"]);
    }

    #[test]
    fn test_nothing() {
        assert_eq!(split(""), Vec::<String>::new());
        assert_eq!(split("#define A 1"), Vec::<String>::new());
    }
}
