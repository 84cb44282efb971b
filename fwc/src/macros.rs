use indexmap::IndexMap;
use tracing::trace;

use crate::config::DuplicatePolicy;
use crate::error::Error;
use crate::msg::Msg;
use crate::normalize::{split_word, tokenize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    pub name: String,
    pub value: String,
}

/// Collect `<keyword> NAME VALUE` declarations in source order.
///
/// The keyword only counts as a whole word. Text in front of the first keyword
/// is not a declaration. When a sequence follows a declaration in the same
/// fragment, the declaration ends where the sequence name starts.
pub fn extract_macros(normalized: &str, keyword: &str) -> Result<Vec<MacroDefinition>, Error> {
    let mut defs = vec![];
    for fragment in split_word(normalized, keyword).into_iter().skip(1) {
        let tokens = tokenize(fragment);
        let head = match tokens.iter().position(|t| *t == "=") {
            Some(eq) => &tokens[..eq.saturating_sub(1)],
            None => &tokens[..],
        };
        match head {
            [] => continue,
            [_] => {
                return Err(Error::MalformedMacroDeclaration(format!(
                    "{} {}",
                    keyword,
                    fragment.trim()
                )))
            }
            [name, value, ..] => {
                trace!(%name, %value, "macro");
                defs.push(MacroDefinition {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(defs)
}

/// Flat name to value table. Values are never expanded again.
#[derive(Debug, Default)]
pub struct MacroTable(IndexMap<String, String>);

impl MacroTable {
    pub fn new() -> Self {
        MacroTable(IndexMap::new())
    }

    pub fn build(
        defs: Vec<MacroDefinition>,
        policy: DuplicatePolicy,
        msgs: &mut Vec<Msg>,
    ) -> Result<Self, Error> {
        let mut table = MacroTable::new();
        for def in defs {
            let MacroDefinition { name, value } = def;
            if let Some(prev) = table.0.insert(name.clone(), value.clone()) {
                match policy {
                    DuplicatePolicy::Reject => return Err(Error::DuplicateMacro(name)),
                    DuplicatePolicy::Override => {
                        msgs.push(Msg::Warn(format!("Re-defined macro: `{}`", name)));
                        msgs.push(Msg::Note(format!(
                            "Previous value `{}` has been overridden by `{}`",
                            prev, value
                        )));
                    }
                }
            }
        }
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.as_str())
    }

    /// Replace a whole token by its macro value, once.
    pub fn substitute<'a>(&'a self, token: &'a str) -> &'a str {
        self.get(token).unwrap_or(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
