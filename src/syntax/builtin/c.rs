//! C language rules

use crate::syntax::rule_set::RuleSet;
use crate::syntax::rules::Rule;
use crate::syntax::tokens::TokenType;

fn rule(name: &str, pattern: &str, token_type: TokenType) -> Rule {
    Rule::new(
        pattern,
        token_type.default_color(),
        false,
        token_type.default_priority(),
    )
    .with_name(name)
}

/// Create the default C rule set
pub fn c_rules() -> RuleSet {
    let mut rules = RuleSet::new();

    // String and character literals
    rules.add(rule("string", r#""(?:[^"\\]|\\[\s\S])*""#, TokenType::String));
    rules.add(rule("char", r"'(?:[^'\\]|\\[\s\S])'", TokenType::Char));

    // Comments
    rules.add(rule(
        "block_comment",
        r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/",
        TokenType::Comment,
    ));
    rules.add(rule("line_comment", r"//[^\n]*", TokenType::Comment));

    // Preprocessor directives, anchored at line starts
    let mut directive = rule(
        "preprocessor",
        r"^[ \t]*#[ \t]*(?:include|define|undef|ifdef|ifndef|if|else|elif|endif|error|pragma|line)\b[^\n]*",
        TokenType::Preprocessor,
    );
    directive.set_multiline(true);
    rules.add(directive);

    // Keywords
    let keywords = concat!(
        r"\b(?:auto|break|case|char|const|continue|default|do|double|else|enum|extern|",
        r"float|for|goto|if|inline|int|long|register|restrict|return|short|signed|",
        r"sizeof|static|struct|switch|typedef|union|unsigned|void|volatile|while)\b",
    );
    rules.add(rule("keyword", keywords, TokenType::Keyword));

    // GL / EGL types
    let gl_types = concat!(
        r"\b(?:GLuint|GLint|GLfloat|GLdouble|GLboolean|GLchar|GLbyte|GLubyte|GLshort|GLushort|",
        r"GLenum|GLbitfield|GLsizei|GLintptr|GLsizeiptr|GLvoid|GLclampf|GLclampd|GLsync|",
        r"GLuint64|GLint64|EGLDisplay|EGLSurface|EGLContext|EGLConfig|pthread_t)\b",
    );
    rules.add(rule("gl_type", gl_types, TokenType::Type));

    // Standard types
    let types = concat!(
        r"\b(?:bool|_Bool|_Complex|_Imaginary|size_t|ptrdiff_t|wchar_t|uint8_t|uint16_t|",
        r"uint32_t|uint64_t|int8_t|int16_t|int32_t|int64_t)\b",
    );
    rules.add(rule("type", types, TokenType::Type));

    // ALL_CAPS constants and macros
    rules.add(rule("constant", r"\b[A-Z_][A-Z0-9_]{2,}\b", TokenType::Constant));

    // Calls: only the identifier is colored, the paren is context
    rules.add(rule(
        "gl_call",
        r"\b(?P<hl>(?:gl|egl)[A-Z][a-zA-Z0-9_]*)\s*\(",
        TokenType::Function,
    ));
    rules.add(rule(
        "call",
        r"\b(?P<hl>[a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
        TokenType::Function,
    ));

    // Numbers
    rules.add(rule("hex", r"\b0[xX][0-9a-fA-F]+[lLuU]*\b", TokenType::Number));
    rules.add(rule(
        "float",
        r"\b\d+\.\d+(?:[eE][+-]?\d+)?[fFlL]*\b",
        TokenType::Number,
    ));
    rules.add(rule(
        "integer",
        r"\b\d+(?:[eE][+-]?\d+)?[fFlLuU]*\b",
        TokenType::Number,
    ));

    // Operators and punctuation
    rules.add(rule("operator", r"[+\-*/%=<>!&|^~?:;,.]", TokenType::Operator));

    rules
}
