use logos::{FilterResult, Lexer, Logos};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Keywords
    #[token("namespace")]
    Namespace,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("isA")]
    IsA,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    IntLit(u32),

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // Association arrows
    #[token("--")]
    DashDash,
    #[token("->")]
    Arrow,
    #[token("<-")]
    BackArrow,

    // Punctuation
    #[token("*")]
    Star,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Comments (skip)
    #[regex(r"//[^\n]*")]
    #[token("/*", block_comment)]
    Comment,
}

/// Consumes a block comment body up to and including `*/`. An unterminated
/// comment swallows the rest of the input and is an error.
fn block_comment(lex: &mut Lexer<Token>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

/// Returns true if the given string is a modeling-language keyword.
pub fn is_keyword(s: &str) -> bool {
    matches!(s, "namespace" | "class" | "interface" | "isA")
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Namespace => write!(f, "namespace"),
            Token::Class => write!(f, "class"),
            Token::Interface => write!(f, "interface"),
            Token::IsA => write!(f, "isA"),
            Token::IntLit(n) => write!(f, "{n}"),
            Token::Ident => write!(f, "identifier"),
            Token::DashDash => write!(f, "'--'"),
            Token::Arrow => write!(f, "'->'"),
            Token::BackArrow => write!(f, "'<-'"),
            Token::Star => write!(f, "'*'"),
            Token::DotDot => write!(f, "'..'"),
            Token::Dot => write!(f, "'.'"),
            Token::Comma => write!(f, "','"),
            Token::Semi => write!(f, "';'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::Comment => write!(f, "comment"),
        }
    }
}
