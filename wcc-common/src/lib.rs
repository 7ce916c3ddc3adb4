//! WCC - Common Types and Utilities
//!
//! This crate contains shared types, error definitions, and utilities
//! used across all stages of the compiler: source positions, the
//! `CompilerError` type, the language's type model and the scope chain
//! shared by the validator and the generator.

pub mod error;
pub mod types;
pub mod source_loc;
pub mod environment;

pub use error::CompilerError;
pub use types::{BasicType, Type};
pub use source_loc::{SourceLocation, SourceSpan};
pub use environment::Environment;
