use logos::{Lexer, Logos, Skip};

use crate::{error::ParseError, interpreter::diagnostics::Diagnostics};

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the scanner.
/// This enum defines all recognized tokens in the language; literal payloads
/// (numbers, strings, identifiers) live directly on the variants.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `42` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", number_literal)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", number_literal)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", number_literal)]
    #[regex(r"[0-9]+", number_literal)]
    Number(f64),
    /// String literal tokens with quotes stripped and the `\n`, `\t`, `\"`
    /// and `\\` escapes expanded. Strings may span lines.
    #[regex(r#""([^"\\]|\\[\s\S])*""#, string_literal, priority = 10)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `total`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `nix`
    #[token("nix")]
    Nix,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `return`
    #[token("return")]
    Return,
    /// `in`
    #[token("in")]
    In,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `!` or the keyword `not`
    #[token("!")]
    #[token("not")]
    Not,
    /// `=`
    #[token("=")]
    Equal,
    /// `` `= ``, the strict-assignment operator
    #[token("`=")]
    StrictAssign,
    /// `+=`
    #[token("+=")]
    PlusEqual,
    /// `-=`
    #[token("-=")]
    MinusEqual,
    /// `*=`
    #[token("*=")]
    StarEqual,
    /// `/=`
    #[token("/=")]
    SlashEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `..`
    #[token("..")]
    DotDot,

    /// `// comments` running to the end of the line.
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// `/[ block comments ]/`; they may span lines and do not nest.
    #[regex(r"/\[([^\]]|\][^/])*\]/", block_comment, priority = 10)]
    BlockComment,
    /// A `/[` block comment that never closes; reported as a warning.
    #[regex(r"/\[([^\]]|\][^/])*\]?", unterminated_block_comment, priority = 5)]
    UnterminatedBlockComment,
    /// A string literal that never closes; reported as a scan error.
    #[regex(r#""([^"\\]|\\[\s\S])*"#, unterminated_string, priority = 5)]
    UnterminatedString,
    /// Newlines advance the line counter and are otherwise ignored.
    #[token("\n", track_newline)]
    Newline,
    /// End of input, appended once by [`scan`].
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

fn track_newline(lexer: &mut Lexer<Token>) -> Skip {
    lexer.extras.line += 1;
    Skip
}

fn count_newlines(lexer: &mut Lexer<Token>) {
    let newlines = lexer.slice().chars().filter(|&c| c == '\n').count();
    lexer.extras.line += newlines;
}

fn block_comment(lexer: &mut Lexer<Token>) -> Skip {
    count_newlines(lexer);
    Skip
}

fn unterminated_block_comment(lexer: &mut Lexer<Token>) {
    count_newlines(lexer);
}

fn unterminated_string(lexer: &mut Lexer<Token>) {
    count_newlines(lexer);
}

/// Parses a numeric literal from the current token slice.
fn number_literal(lexer: &mut Lexer<Token>) -> Option<f64> {
    lexer.slice().parse().ok()
}

/// Produces the value of a string literal: counts the newlines it spans,
/// strips the surrounding quotes and expands the supported escapes.
fn string_literal(lexer: &mut Lexer<Token>) -> String {
    count_newlines(lexer);
    let slice = lexer.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// Expands the `\n`, `\t`, `\"` and `\\` escapes. Every other backslash
/// sequence is kept as written.
fn unescape(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some('"') => text.push('"'),
            Some('\\') => text.push('\\'),
            Some(other) => {
                text.push('\\');
                text.push(other);
            },
            None => text.push('\\'),
        }
    }
    text
}

/// Scans a source string into `(token, line)` pairs terminated by a single
/// [`Token::Eof`].
///
/// Scan errors do not abort: a stray character or an unterminated string is
/// reported to the diagnostic sink and scanning continues with the next
/// character, so one bad token cannot hide the rest of the input.
pub fn scan(source: &str, diagnostics: &mut Diagnostics) -> Vec<(Token, usize)> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(item) = lexer.next() {
        match item {
            Ok(Token::UnterminatedString) => {
                diagnostics.static_error(&ParseError::UnterminatedString { line: lexer.extras
                                                                                      .line });
            },
            Ok(Token::UnterminatedBlockComment) => {
                diagnostics.warning(lexer.extras.line, "Unterminated block comment.");
            },
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(()) => {
                diagnostics.static_error(&ParseError::UnexpectedCharacter {
                    character: lexer.slice().to_string(),
                    line: lexer.extras.line,
                });
            },
        }
    }

    tokens.push((Token::Eof, lexer.extras.line));
    tokens
}
