use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{tokenize, Token};

/// Parse interface source text, extracting the declaration matching
/// `expected_name`. Fails with [`ParseError::NotFound`] when no such
/// interface exists in the text.
pub fn parse_interface(source: &str, expected_name: &str) -> ParseResult<InterfaceSpec> {
    Parser::new(source).parse(expected_name)
}

/// Imports behave as a mapping keyed by qualified name: a repeated path
/// keeps its original position and takes the latest alias.
pub fn upsert_import(imports: &mut Vec<Import>, import: Import) {
    match imports.iter_mut().find(|existing| existing.path == import.path) {
        Some(existing) => *existing = import,
        None => imports.push(import),
    }
}

/// Parser for the interface definition language
pub struct Parser<'src> {
    tokens: Vec<(Token<'src>, std::ops::Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let tokens = tokenize(source);
        Self { tokens, pos: 0 }
    }

    /// Parse the source, keeping every import in encounter order and the
    /// methods of the interface named `expected_name` in source order.
    pub fn parse(&mut self, expected_name: &str) -> ParseResult<InterfaceSpec> {
        let mut imports = Vec::new();
        let mut matched: Option<Vec<MethodSignature>> = None;

        while !self.is_at_end() {
            match self.peek() {
                Some((Token::Import, _)) => {
                    let import = self.parse_import()?;
                    upsert_import(&mut imports, import);
                }
                Some((Token::Interface, _)) => {
                    self.advance(); // consume 'interface'
                    let name = self.expect_ident()?;
                    self.expect(Token::LBrace)?;

                    if name == expected_name && matched.is_none() {
                        matched = Some(self.parse_methods()?);
                    } else {
                        self.skip_block()?;
                    }
                }
                _ => {
                    return Err(ParseError::malformed(
                        self.peek_span().start,
                        format!("Unexpected token: {}", Self::format_token(self.peek())),
                    ));
                }
            }
        }

        match matched {
            Some(methods) => Ok(InterfaceSpec {
                name: expected_name.to_string(),
                methods,
                imports,
            }),
            None => Err(ParseError::not_found(expected_name)),
        }
    }

    /// Parse an import statement
    fn parse_import(&mut self) -> ParseResult<Import> {
        let start = self.peek_span().start;
        self.expect(Token::Import)?;

        let path = self.parse_dotted_path()?;

        let alias = if self.match_token(Token::As) {
            Some(self.expect_ident()?)
        } else {
            None
        };

        let end = self.current_span().end;

        Ok(Import {
            path,
            alias,
            span: Span::new(start, end),
        })
    }

    /// Parse method declarations up to and including the closing brace
    fn parse_methods(&mut self) -> ParseResult<Vec<MethodSignature>> {
        let mut methods = Vec::new();

        while !self.check(Token::RBrace) && !self.is_at_end() {
            methods.push(self.parse_method()?);
        }

        self.expect(Token::RBrace)?;
        Ok(methods)
    }

    /// Parse one method declaration: `name(params) [-> type]`
    fn parse_method(&mut self) -> ParseResult<MethodSignature> {
        let start = self.peek_span().start;
        let name = self.expect_ident()?;

        self.expect(Token::LParen)?;

        let mut params = Vec::new();
        while !self.check(Token::RParen) && !self.is_at_end() {
            params.push(self.parse_param()?);

            if !self.check(Token::RParen) {
                self.expect(Token::Comma)?;
            }
        }

        self.expect(Token::RParen)?;

        let return_type = if self.match_token(Token::Arrow) {
            self.parse_type_spec()?
        } else {
            TypeSpec::untyped()
        };

        let end = self.current_span().end;

        Ok(MethodSignature {
            name,
            params,
            return_type,
            span: Span::new(start, end),
        })
    }

    /// Parse one parameter: `name [: type] [= literal]`
    fn parse_param(&mut self) -> ParseResult<ParamSpec> {
        let name = self.expect_ident()?;

        let type_spec = if self.match_token(Token::Colon) {
            self.parse_type_spec()?
        } else {
            TypeSpec::untyped()
        };

        let default = if self.match_token(Token::Equals) {
            Some(self.parse_literal()?)
        } else {
            None
        };

        Ok(ParamSpec {
            name,
            type_spec,
            default,
        })
    }

    /// Parse a type reference: `self` or `[?]name`. A dotted name resolves
    /// to its last segment; imports carry the qualified path.
    fn parse_type_spec(&mut self) -> ParseResult<TypeSpec> {
        if self.match_token(Token::SelfType) {
            return Ok(TypeSpec::named("self"));
        }

        let nullable = self.match_token(Token::Question);
        let dotted = self.parse_dotted_path()?;
        let type_name = dotted.rsplit('.').next().unwrap_or(&dotted).to_string();

        Ok(TypeSpec {
            type_name,
            nullable,
        })
    }

    /// Parse a literal default value
    fn parse_literal(&mut self) -> ParseResult<Literal> {
        match self.peek() {
            Some((Token::String(s), _)) => {
                let value = s.trim_matches('"').to_string();
                self.advance();
                Ok(Literal::String { value })
            }
            Some((Token::Number(n), span)) => {
                let value = n.parse::<f64>().map_err(|_| {
                    ParseError::malformed(span.start, format!("Invalid number literal: {}", n))
                })?;
                self.advance();
                Ok(Literal::Number { value })
            }
            Some((Token::True, _)) => {
                self.advance();
                Ok(Literal::Boolean { value: true })
            }
            Some((Token::False, _)) => {
                self.advance();
                Ok(Literal::Boolean { value: false })
            }
            Some((Token::Null, _)) => {
                self.advance();
                Ok(Literal::Null)
            }
            _ => Err(ParseError::malformed(
                self.peek_span().start,
                format!("Expected literal, found {}", Self::format_token(self.peek())),
            )),
        }
    }

    /// Parse a dotted path like `fixtures.ObjectCollection`
    fn parse_dotted_path(&mut self) -> ParseResult<String> {
        let mut path = self.expect_ident()?;

        while self.match_token(Token::Dot) {
            path.push('.');
            path.push_str(&self.expect_ident()?);
        }

        Ok(path)
    }

    /// Skip a brace-delimited block whose opening brace is already consumed
    fn skip_block(&mut self) -> ParseResult<()> {
        let mut depth = 1usize;

        while depth > 0 {
            match self.advance() {
                Some((Token::LBrace, _)) => depth += 1,
                Some((Token::RBrace, _)) => depth -= 1,
                Some(_) => {}
                None => {
                    return Err(ParseError::malformed(
                        self.peek_span().start,
                        "Unexpected end of input inside interface body",
                    ));
                }
            }
        }

        Ok(())
    }

    fn peek(&self) -> Option<&(Token<'src>, std::ops::Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&(Token<'src>, std::ops::Range<usize>)> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, token: Token) -> bool {
        if let Some((t, _)) = self.peek() {
            std::mem::discriminant(t) == std::mem::discriminant(&token)
        } else {
            false
        }
    }

    fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.check(token.clone()) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::malformed(
                self.peek_span().start,
                format!(
                    "Expected {}, found {}",
                    token,
                    Self::format_token(self.peek())
                ),
            ))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::Ident(s), _)) => {
                let val = s.to_string();
                self.advance();
                Ok(val)
            }
            _ => Err(ParseError::malformed(
                self.peek_span().start,
                format!("Expected identifier, found {}", Self::format_token(self.peek())),
            )),
        }
    }

    /// Get the span of the current token (the one we just consumed)
    fn current_span(&self) -> std::ops::Range<usize> {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map(|(_, span)| span.clone())
            .unwrap_or(0..0)
    }

    /// Get the span of the next token (the one we're about to consume)
    fn peek_span(&self) -> std::ops::Range<usize> {
        self.tokens.get(self.pos).map(|(_, span)| span.clone()).unwrap_or_else(|| {
            let end = self.tokens.last().map(|(_, span)| span.end).unwrap_or(0);
            end..end
        })
    }

    fn format_token(token: Option<&(Token, std::ops::Range<usize>)>) -> String {
        match token {
            Some((t, _)) => t.to_string(),
            None => "end of input".to_string(),
        }
    }
}
