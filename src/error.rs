use std::path::PathBuf;

/// A line that does not fit the declaration grammar.
///
/// `line` is the 1-based line number in the original source text and
/// `text` the raw line content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected a field of the form `name: Type`, found {text:?}")]
    MalformedField { line: usize, text: String },

    #[error("line {line}: expected an enum member of the form `NAME = \"value\"`, found {text:?}")]
    MalformedMember { line: usize, text: String },

    #[error("line {line}: expected a string constant of the form `NAME = \"value\"`, found {text:?}")]
    MalformedConstant { line: usize, text: String },

    #[error("line {line}: not a class, enum or string constant declaration: {text:?}")]
    UnrecognizedHeader { line: usize, text: String },

    #[error("line {line}: unexpected line after string constant `{name}`: {text:?}")]
    TrailingConstantLine {
        line: usize,
        name: String,
        text: String,
    },
}

/// Conversion error
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{}: {source}", .file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input folder {}: {reason}", .path.display())]
    InvalidInput { path: PathBuf, reason: String },
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
