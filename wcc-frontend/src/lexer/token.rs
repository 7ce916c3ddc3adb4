//! Token definitions for the lexer
//!
//! Tokens are grouped into categories: special punctuation, keywords,
//! operators, basic type names, numeric literals and identifiers.

use wcc_common::{BasicType, SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Special punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Special {
    Semicolon,    // ;
    Comma,        // ,
    LeftBrace,    // {
    RightBrace,   // }
    LeftParen,    // (
    RightParen,   // )
    DoubleColon,  // ::
    Colon,        // :
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Special::Semicolon => ";",
            Special::Comma => ",",
            Special::LeftBrace => "{",
            Special::RightBrace => "}",
            Special::LeftParen => "(",
            Special::RightParen => ")",
            Special::DoubleColon => "::",
            Special::Colon => ":",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Func, Var, Const, If, Elif, Else, While, Return, As, Import, Export, Memory,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "func" => Some(Keyword::Func),
            "var" => Some(Keyword::Var),
            "const" => Some(Keyword::Const),
            "if" => Some(Keyword::If),
            "elif" => Some(Keyword::Elif),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "return" => Some(Keyword::Return),
            "as" => Some(Keyword::As),
            "import" => Some(Keyword::Import),
            "export" => Some(Keyword::Export),
            "memory" => Some(Keyword::Memory),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Keyword::Func => "func",
            Keyword::Var => "var",
            Keyword::Const => "const",
            Keyword::If => "if",
            Keyword::Elif => "elif",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
            Keyword::As => "as",
            Keyword::Import => "import",
            Keyword::Export => "export",
            Keyword::Memory => "memory",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,          // =
    EqualEqual,     // ==
    BangEqual,      // !=
    Less,           // <
    LessEqual,      // <=
    Greater,        // >
    GreaterEqual,   // >=
    Plus,           // +
    Minus,          // -
    Star,           // *  (also the pointer sigil)
    Slash,          // /
    Percent,        // %
    Ampersand,      // &
    Pipe,           // |
    Caret,          // ^
    LeftShift,      // <<
    RightShift,     // >>
    Bang,           // !
    At,             // @
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operator::Equal => "=",
            Operator::EqualEqual => "==",
            Operator::BangEqual => "!=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Ampersand => "&",
            Operator::Pipe => "|",
            Operator::Caret => "^",
            Operator::LeftShift => "<<",
            Operator::RightShift => ">>",
            Operator::Bang => "!",
            Operator::At => "@",
        };
        write!(f, "{text}")
    }
}

/// Token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    Special(Special),
    Keyword(Keyword),
    Operator(Operator),
    BasicType(BasicType),

    /// Numeric literal; the type is fixed by its suffixes at lex time
    Number {
        value: String,
        ty: BasicType,
    },

    Identifier(String),

    EndOfFile,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Special(special) => write!(f, "'{special}'"),
            TokenType::Keyword(keyword) => write!(f, "'{keyword}'"),
            TokenType::Operator(op) => write!(f, "'{op}'"),
            TokenType::BasicType(basic) => write!(f, "'{basic}'"),
            TokenType::Number { value, ty } => write!(f, "{value} ({ty})"),
            TokenType::Identifier(name) => write!(f, "identifier '{name}'"),
            TokenType::EndOfFile => write!(f, "end of file"),
        }
    }
}

/// A token with location information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self { token_type, span }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self {
            token_type: TokenType::EndOfFile,
            span: SourceSpan::from_location(location),
        }
    }

    pub fn is_special(&self, special: Special) -> bool {
        self.token_type == TokenType::Special(special)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.token_type == TokenType::Keyword(keyword)
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.token_type == TokenType::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token_type, self.span.start)
    }
}
