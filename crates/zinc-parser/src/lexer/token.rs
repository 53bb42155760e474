//! Token definitions for the Zinc programming language.
//!
//! This module defines the token kinds and structures produced by the lexer.
//! Zinc does not reserve its keywords lexically: `fn`, `struct`, `import`
//! and friends all lex as plain `Ident` tokens and the parser matches their
//! lexemes. What IS lexical is the identifier class: lowercase-leading
//! (`Ident`), uppercase-leading with lowercase letters (`TypeIdent`),
//! all-uppercase (`ConstIdent`), and the `@`/`#`/`$`-prefixed variants.

use std::fmt::{self, Display, Formatter};

use logos::Logos;
use zinc_source::types::Span;

/// Represents the kind of token in the Zinc language.
///
/// Trivia (whitespace runs, newlines, comments) are real tokens rather than
/// skipped input, so the parser can reason about their positions for
/// recovery and the statement-terminator rule.
#[derive(Logos, Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Trivia
    #[regex(r"[ \t\r\f]+")]
    Whitespace,
    #[token("\n")]
    Newline,
    #[regex(r"//[^\n]*")]
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    Comment,

    // Identifier classes
    #[regex(r"[a-z_][a-zA-Z0-9_]*")]
    Ident,
    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    TypeIdent,
    #[regex(r"[A-Z][A-Z0-9_]*", priority = 4)]
    ConstIdent,
    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_]*")]
    AtIdent,
    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_]*")]
    HashIdent,
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    DollarIdent,

    // Literals
    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*")]
    #[regex(r"0[oO][0-7][0-7_]*")]
    #[regex(r"0[bB][01][01_]*")]
    Integer,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    Real,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
    #[regex(r"'([^'\\\n]|\\.)'")]
    CharLiteral,

    // Operators
    #[token("+")]
    Plus,
    #[token("++")]
    PlusPlus,
    #[token("+=")]
    PlusEq,
    #[token("-")]
    Minus,
    #[token("--")]
    MinusMinus,
    #[token("-=")]
    MinusEq,
    #[token("*")]
    Star,
    #[token("*=")]
    StarEq,
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashEq,
    #[token("%")]
    Percent,
    #[token("%=")]
    PercentEq,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("&=")]
    AmpEq,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("|=")]
    PipeEq,
    #[token("^")]
    Caret,
    #[token("^=")]
    CaretEq,
    #[token("~")]
    Tilde,
    #[token("<<")]
    Shl,
    #[token("<<=")]
    ShlEq,
    #[token(">>")]
    Shr,
    #[token(">>=")]
    ShrEq,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEq,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEq,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEq,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("?")]
    Question,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("...")]
    Ellipsis,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("$")]
    Dollar,

    // Synthetic tokens
    /// End of input; produced indefinitely once the source is exhausted
    Eof,
    /// Unrecognized byte sequence
    Invalid,
}

impl TokenKind {
    /// Returns true for the trivia kinds the parser skips transparently.
    #[must_use]
    pub const fn is_trivia(&self) -> bool { matches!(self, Self::Whitespace | Self::Comment) }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Whitespace => "<whitespace>",
            Self::Newline => "<newline>",
            Self::Comment => "<comment>",
            Self::Ident => "<identifier>",
            Self::TypeIdent => "<type identifier>",
            Self::ConstIdent => "<constant identifier>",
            Self::AtIdent => "<@-identifier>",
            Self::HashIdent => "<#-identifier>",
            Self::DollarIdent => "<$-identifier>",
            Self::Integer => "<integer>",
            Self::Real => "<real>",
            Self::String => "<string>",
            Self::CharLiteral => "<char>",
            Self::Plus => "+",
            Self::PlusPlus => "++",
            Self::PlusEq => "+=",
            Self::Minus => "-",
            Self::MinusMinus => "--",
            Self::MinusEq => "-=",
            Self::Star => "*",
            Self::StarEq => "*=",
            Self::Slash => "/",
            Self::SlashEq => "/=",
            Self::Percent => "%",
            Self::PercentEq => "%=",
            Self::Amp => "&",
            Self::AmpAmp => "&&",
            Self::AmpEq => "&=",
            Self::Pipe => "|",
            Self::PipePipe => "||",
            Self::PipeEq => "|=",
            Self::Caret => "^",
            Self::CaretEq => "^=",
            Self::Tilde => "~",
            Self::Shl => "<<",
            Self::ShlEq => "<<=",
            Self::Shr => ">>",
            Self::ShrEq => ">>=",
            Self::Bang => "!",
            Self::BangEq => "!=",
            Self::Eq => "=",
            Self::EqEq => "==",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Arrow => "->",
            Self::FatArrow => "=>",
            Self::Question => "?",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::ColonColon => "::",
            Self::Dot => ".",
            Self::DotDot => "..",
            Self::Ellipsis => "...",
            Self::At => "@",
            Self::Hash => "#",
            Self::Dollar => "$",
            Self::Eof => "<end of file>",
            Self::Invalid => "<invalid>",
        };

        write!(f, "{text}")
    }
}

/// Parsed payload of a literal token.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum TokenValue {
    /// No payload (non-literal tokens)
    #[default]
    None,
    /// Integer literal value
    Int(i64),
    /// Real literal value
    Real(f64),
    /// String literal content with escapes resolved
    Str(String),
    /// Character literal value
    Char(char),
}

/// Represents a token in the Zinc language.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The lexeme (the actual text of the token) from the source code.
    pub lexeme: &'src str,
    /// The span of the token in the source code.
    pub span: Span,
    /// The parsed literal payload, if any.
    pub value: TokenValue,
}

impl<'src> Token<'src> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, lexeme: &'src str, span: Span, value: TokenValue) -> Self {
        Self { kind, lexeme, span, value }
    }

    /// Creates a token with an empty lexeme and no payload.
    #[must_use]
    pub const fn with_empty_lexeme(kind: TokenKind, span: Span) -> Self {
        Self { kind, span, lexeme: "", value: TokenValue::None }
    }

    /// Checks if the token is of the specified kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool { self.kind == kind }

    /// Checks if the token is an `Ident` with the given lexeme.
    ///
    /// Zinc keywords are not reserved, so this is how the parser recognizes
    /// them.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Ident && self.lexeme == keyword
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.kind, self.span.start, self.span.end)
    }
}
