//! Error handling for the compiler
//!
//! Every stage reports failure through `CompilerError`. The first error
//! aborts the whole compile; there is no error collection or recovery.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError {
        location: SourceLocation,
        message: String,
    },

    #[error("Parse error at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        message: String,
    },

    #[error("Validation error at {location}: {message}")]
    ValidationError {
        location: SourceLocation,
        message: String,
    },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

impl CompilerError {
    /// Create a lexer error
    pub fn lexer_error(message: String, location: SourceLocation) -> Self {
        CompilerError::LexError { location, message }
    }

    /// Create a parse error
    pub fn parse_error(message: String, location: SourceLocation) -> Self {
        CompilerError::ParseError { location, message }
    }

    /// Create a validation error
    pub fn validation_error(message: String, location: SourceLocation) -> Self {
        CompilerError::ValidationError { location, message }
    }

    /// Create an internal error
    pub fn internal_error(message: String) -> Self {
        CompilerError::InternalError { message }
    }

    /// Source position of a user-facing error
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            CompilerError::LexError { location, .. }
            | CompilerError::ParseError { location, .. }
            | CompilerError::ValidationError { location, .. } => Some(*location),
            CompilerError::InternalError { .. } | CompilerError::IoError { .. } => None,
        }
    }

    /// Render the error with the offending source line and a caret under
    /// the reported column.
    pub fn render(&self, source: &str, filename: &str) -> String {
        let Some(location) = self.location() else {
            return format!("{filename}: {self}");
        };

        let mut out = format!("{filename}:{location}: {self}");
        let line_text = source
            .lines()
            .nth(location.line.saturating_sub(1) as usize);
        if let Some(text) = line_text {
            let gutter = location.line.to_string();
            let padding = " ".repeat(gutter.len());
            let caret_offset = " ".repeat(location.column.saturating_sub(1) as usize);
            out.push_str(&format!("\n{gutter} | {text}"));
            out.push_str(&format!("\n{padding} | {caret_offset}^"));
        }
        out
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}
