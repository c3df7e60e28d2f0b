use logos::Logos;
use std::fmt;

/// Token types for the interface definition language
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum Token<'src> {
    // Keywords
    #[token("interface")]
    Interface,

    #[token("import")]
    Import,

    #[token("as")]
    As,

    #[token("self")]
    SelfType,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    // String literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    String(&'src str),

    // Numbers
    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    // Symbols
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("?")]
    Question,

    #[token("->")]
    Arrow,

    #[token("=")]
    Equals,
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Interface => write!(f, "interface"),
            Token::Import => write!(f, "import"),
            Token::As => write!(f, "as"),
            Token::SelfType => write!(f, "self"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            Token::String(s) => write!(f, "string {}", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Question => write!(f, "?"),
            Token::Arrow => write!(f, "->"),
            Token::Equals => write!(f, "="),
        }
    }
}

/// Tokenize a source string
pub fn tokenize(source: &str) -> Vec<(Token, std::ops::Range<usize>)> {
    let lexer = Token::lexer(source);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let source = "interface import as self";
        let tokens = tokenize(source);

        assert_eq!(tokens[0].0, Token::Interface);
        assert_eq!(tokens[1].0, Token::Import);
        assert_eq!(tokens[2].0, Token::As);
        assert_eq!(tokens[3].0, Token::SelfType);
    }

    #[test]
    fn test_identifiers() {
        let source = "PersonInterface setId _private";
        let tokens = tokenize(source);

        assert_eq!(tokens[0].0, Token::Ident("PersonInterface"));
        assert_eq!(tokens[1].0, Token::Ident("setId"));
        assert_eq!(tokens[2].0, Token::Ident("_private"));
    }

    #[test]
    fn test_method_declaration() {
        let source = "setId(value: int) -> self";
        let tokens = tokenize(source);

        assert_eq!(tokens[0].0, Token::Ident("setId"));
        assert_eq!(tokens[1].0, Token::LParen);
        assert_eq!(tokens[2].0, Token::Ident("value"));
        assert_eq!(tokens[3].0, Token::Colon);
        assert_eq!(tokens[4].0, Token::Ident("int"));
        assert_eq!(tokens[5].0, Token::RParen);
        assert_eq!(tokens[6].0, Token::Arrow);
        assert_eq!(tokens[7].0, Token::SelfType);
    }

    #[test]
    fn test_nullable_marker() {
        let source = "getId() -> ?int";
        let tokens = tokenize(source);

        assert_eq!(tokens[3].0, Token::Arrow);
        assert_eq!(tokens[4].0, Token::Question);
        assert_eq!(tokens[5].0, Token::Ident("int"));
    }

    #[test]
    fn test_literals() {
        let source = r#""hello" 42 3.14 -10 true false null"#;
        let tokens = tokenize(source);

        assert!(matches!(tokens[0].0, Token::String(_)));
        assert_eq!(tokens[1].0, Token::Number("42"));
        assert_eq!(tokens[2].0, Token::Number("3.14"));
        assert_eq!(tokens[3].0, Token::Number("-10"));
        assert_eq!(tokens[4].0, Token::True);
        assert_eq!(tokens[5].0, Token::False);
        assert_eq!(tokens[6].0, Token::Null);
    }

    #[test]
    fn test_comments_ignored() {
        let source = r#"
            // line comment
            interface PersonInterface /* block comment */ {
                /* multi-line
                   comment */
            }
        "#;

        let tokens = tokenize(source);

        assert_eq!(tokens[0].0, Token::Interface);
        assert_eq!(tokens[1].0, Token::Ident("PersonInterface"));
        assert_eq!(tokens[2].0, Token::LBrace);
        assert_eq!(tokens[3].0, Token::RBrace);
    }

    #[test]
    fn test_dotted_import_path() {
        let source = "import fixtures.ObjectCollection as Collection";
        let tokens = tokenize(source);

        assert_eq!(tokens[0].0, Token::Import);
        assert_eq!(tokens[1].0, Token::Ident("fixtures"));
        assert_eq!(tokens[2].0, Token::Dot);
        assert_eq!(tokens[3].0, Token::Ident("ObjectCollection"));
        assert_eq!(tokens[4].0, Token::As);
        assert_eq!(tokens[5].0, Token::Ident("Collection"));
    }
}
