//! Token families for the default rule set
//!
//! Each family has a default color (dark editor theme) and a default
//! priority. Configuration files may name a family instead of spelling out a
//! color.

use super::style::Argb;

/// Semantic token families recognized by the default C rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// String literals
    String,
    /// Character literals
    Char,
    /// Line and block comments
    Comment,
    /// Preprocessor directives (#include, #define)
    Preprocessor,
    /// Language keywords
    Keyword,
    /// Builtin and library type names
    Type,
    /// ALL_CAPS constants and macros
    Constant,
    /// Identifiers in call position
    Function,
    /// Numeric literals
    Number,
    /// Operators and punctuation
    Operator,
}

impl TokenType {
    /// Get the default color for this token type
    pub fn default_color(&self) -> Argb {
        match self {
            TokenType::String | TokenType::Char => Argb(0xFFCD_DC39),
            TokenType::Comment => Argb(0xFF9E_9E9E),
            TokenType::Preprocessor => Argb(0xFFEC_407A),
            TokenType::Keyword => Argb(0xFFFF_9800),
            TokenType::Type => Argb(0xFF66_BB6A),
            TokenType::Constant => Argb(0xFFFD_D835),
            TokenType::Function => Argb(0xFF26_C6DA),
            TokenType::Number => Argb(0xFF42_A5F5),
            TokenType::Operator => Argb::WHITE,
        }
    }

    /// Get the default priority (higher wins conflicts)
    pub fn default_priority(&self) -> i32 {
        match self {
            TokenType::String | TokenType::Char => 35,
            TokenType::Comment => 30,
            TokenType::Preprocessor => 25,
            TokenType::Keyword | TokenType::Type => 20,
            TokenType::Constant => 18,
            TokenType::Function => 16,
            TokenType::Number => 10,
            TokenType::Operator => 8,
        }
    }

    /// Get a human-readable name for this token type
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::String => "String",
            TokenType::Char => "Char",
            TokenType::Comment => "Comment",
            TokenType::Preprocessor => "Preprocessor",
            TokenType::Keyword => "Keyword",
            TokenType::Type => "Type",
            TokenType::Constant => "Constant",
            TokenType::Function => "Function",
            TokenType::Number => "Number",
            TokenType::Operator => "Operator",
        }
    }

    /// Parse a token type from its name (case-insensitive, for config loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(TokenType::String),
            "char" => Some(TokenType::Char),
            "comment" => Some(TokenType::Comment),
            "preprocessor" => Some(TokenType::Preprocessor),
            "keyword" => Some(TokenType::Keyword),
            "type" => Some(TokenType::Type),
            "constant" => Some(TokenType::Constant),
            "function" => Some(TokenType::Function),
            "number" => Some(TokenType::Number),
            "operator" => Some(TokenType::Operator),
            _ => None,
        }
    }
}
