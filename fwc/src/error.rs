use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed macro declaration: `{0}`")]
    MalformedMacroDeclaration(String),

    #[error("Cannot parse sequence name in `{0}` as integer")]
    MalformedSequenceName(String),

    #[error("Cannot parse `{0}` as integer literal")]
    InvalidNumericLiteral(String, String),

    #[error("Re-defined macro: `{0}`")]
    DuplicateMacro(String),

    #[error("Re-defined sequence: 0x{0:08X}")]
    DuplicateSequence(u32),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to load config: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Written firmware does not verify: {0}")]
    Verify(#[from] fw::DecodeError),
}

impl Error {
    /// Source text the error was raised on
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Error::MalformedMacroDeclaration(frag)
            | Error::MalformedSequenceName(frag)
            | Error::InvalidNumericLiteral(_, frag) => Some(frag),
            _ => None,
        }
    }

    /// File the error was raised on, when it carries one
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::FileOpen(path, _)
            | Error::FileRead(path, _)
            | Error::FileCreate(path, _)
            | Error::FileWrite(path, _)
            | Error::Config(path, _) => Some(path),
            _ => None,
        }
    }

    /// Print error with the file it belongs to and the offending fragment
    pub fn print_diag(&self, file: &str) {
        cprintln!("<red,bold>error</>: {}", self);
        if let Some(source) = std::error::Error::source(self) {
            cprintln!("     <blue>=</> {}", source);
        }
        cprintln!("     <blue>--></> <underline>{}</>", file);
        if let Some(frag) = self.fragment() {
            cprintln!("      <blue>|</>");
            cprintln!("      <blue>|</> {}", frag);
            cprintln!("      <blue>|</>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_sequence_name_message_shows_chunk() {
        let err = Error::MalformedSequenceName("EVT_X = 1".to_string());
        assert_eq!(
            err.to_string(),
            "Cannot parse sequence name in `EVT_X = 1` as integer"
        );
        assert_eq!(err.fragment(), Some("EVT_X = 1"));
    }

    #[test]
    fn test_path() {
        let io = || io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(Error::FileOpen("a.yaml".into(), io()).path(), Some("a.yaml"));
        assert_eq!(Error::FileCreate("out.bin".into(), io()).path(), Some("out.bin"));
        assert_eq!(Error::FileWrite("out.bin".into(), io()).path(), Some("out.bin"));
        assert_eq!(Error::DuplicateMacro("A".into()).path(), None);
        assert_eq!(Error::InvalidSetting("prefix".into()).path(), None);
    }
}
