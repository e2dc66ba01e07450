// ABOUTME: Lexer module producing a single-token lookahead over the source string

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{opt, recognize},
    multi::many0,
    sequence::pair,
    IResult, Parser,
};

/// Infix/comparison operators recognized by the lexer. Unary sign handling
/// lives in the parser (spec §4.3): the lexer only ever hands back `Plus` or
/// `Minus` tokens, never a fused unary-minus token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Pow,
    Comma,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    /// An identifier that resolved against the symbol table, carried as its
    /// name; the parser looks it up again against its own table borrow.
    Identifier(String),
    Infix(Op),
    Open,
    Close,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 0-based byte offset of the token's first character.
    pub start: usize,
}

/// Stateful single-token-lookahead tokenizer (spec §3 "Lexer state").
///
/// Whitespace (spaces, tabs, newlines) is skipped between tokens. An
/// identifier is always the longest run of `[A-Za-z0-9_]` following a
/// leading `[A-Za-z_]` — there is no partial/prefix retry, matching spec
/// §4.1's "no prefix fallback".
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

fn parse_number(input: &str) -> IResult<&str, f64> {
    recognize(pair(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), opt(digit1))))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(pair(
            alt((char('e'), char('E'))),
            pair(opt(alt((char('+'), char('-')))), digit1),
        )),
    ))
    .map(|s: &str| s.parse::<f64>().expect("lexer only recognizes valid floats"))
    .parse(input)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(is_ident_start),
        take_while(is_ident_continue),
    ))
    .parse(input)
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0 }
    }

    /// Current 0-based byte offset into the source.
    pub fn pos(&self) -> usize {
        self.pos
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.src[self.pos..].trim_start_matches([' ', '\t', '\n', '\r']);
        self.pos += self.src[self.pos..].len() - trimmed.len();
    }

    /// Produce the next token, or an `Err` carrying the 0-based offset of an
    /// unrecognized character or a malformed (but non-identifier) lexeme.
    pub fn next_token(&mut self) -> Result<Token, usize> {
        self.skip_whitespace();
        let start = self.pos;
        let rest = &self.src[self.pos..];

        if rest.is_empty() {
            return Ok(Token {
                kind: TokenKind::End,
                start,
            });
        }

        if let Ok((remaining, value)) = parse_number(rest) {
            self.pos += rest.len() - remaining.len();
            return Ok(Token {
                kind: TokenKind::Number(value),
                start,
            });
        }

        if rest.starts_with(char::is_alphabetic) || rest.starts_with('_') {
            match parse_identifier(rest) {
                Ok((remaining, name)) => {
                    self.pos += rest.len() - remaining.len();
                    return Ok(Token {
                        kind: TokenKind::Identifier(name.to_string()),
                        start,
                    });
                }
                Err(_) => return Err(start),
            }
        }

        let two: Option<(&str, Op)> = [
            ("<=", Op::Le),
            (">=", Op::Ge),
            ("==", Op::Eq),
            ("!=", Op::Ne),
        ]
        .into_iter()
        .find(|(lit, _)| rest.starts_with(lit));

        if let Some((lit, op)) = two {
            self.pos += lit.len();
            return Ok(Token {
                kind: TokenKind::Infix(op),
                start,
            });
        }

        let one: Option<(char, TokenKind)> = [
            ('+', TokenKind::Infix(Op::Plus)),
            ('-', TokenKind::Infix(Op::Minus)),
            ('*', TokenKind::Infix(Op::Mul)),
            ('/', TokenKind::Infix(Op::Div)),
            ('%', TokenKind::Infix(Op::Mod)),
            ('^', TokenKind::Infix(Op::Pow)),
            (',', TokenKind::Infix(Op::Comma)),
            ('<', TokenKind::Infix(Op::Lt)),
            ('>', TokenKind::Infix(Op::Gt)),
            ('(', TokenKind::Open),
            (')', TokenKind::Close),
        ]
        .into_iter()
        .find(|(c, _)| rest.starts_with(*c));

        if let Some((_, kind)) = one {
            self.pos += 1;
            return Ok(Token { kind, start });
        }

        Err(start)
    }
}

/// Consumes a tag, used only by tests below to sanity-check `parse_number`
/// and `parse_identifier` in isolation without going through `Lexer`.
#[cfg(test)]
fn consume(t: &str, input: &str) -> IResult<&str, &str> {
    tag(t)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number("3.14").unwrap().1, 3.14);
        assert_eq!(parse_number(".5").unwrap().1, 0.5);
        assert_eq!(parse_number("42").unwrap().1, 42.0);
        assert_eq!(parse_number("1e3").unwrap().1, 1000.0);
        assert_eq!(parse_number("1.5e-2").unwrap().1, 0.015);
    }

    #[test]
    fn identifiers() {
        assert_eq!(parse_identifier("sin x").unwrap().1, "sin");
        assert_eq!(parse_identifier("_foo123 ").unwrap().1, "_foo123");
        assert!(consume("(", "(x)").is_ok());
    }

    #[test]
    fn tokenizes_a_full_expression() {
        let mut lx = Lexer::new("1 + 2 * sin(x)");
        let mut kinds = Vec::new();
        loop {
            let tok = lx.next_token().unwrap();
            if tok.kind == TokenKind::End {
                break;
            }
            kinds.push(tok.kind);
        }
        assert_eq!(
            kinds,
            vec![
                TokenKind::Number(1.0),
                TokenKind::Infix(Op::Plus),
                TokenKind::Number(2.0),
                TokenKind::Infix(Op::Mul),
                TokenKind::Identifier("sin".into()),
                TokenKind::Open,
                TokenKind::Identifier("x".into()),
                TokenKind::Close,
            ]
        );
    }

    #[test]
    fn comparison_operators_are_two_char_first() {
        let mut lx = Lexer::new("<= >= == !=");
        let mut kinds = Vec::new();
        while let Ok(tok) = lx.next_token() {
            if tok.kind == TokenKind::End {
                break;
            }
            kinds.push(tok.kind);
        }
        assert_eq!(
            kinds,
            vec![
                TokenKind::Infix(Op::Le),
                TokenKind::Infix(Op::Ge),
                TokenKind::Infix(Op::Eq),
                TokenKind::Infix(Op::Ne),
            ]
        );
    }

    #[test]
    fn unknown_character_errors_at_its_position() {
        let mut lx = Lexer::new("1 @ 2");
        lx.next_token().unwrap(); // "1"
        let err = lx.next_token().unwrap_err();
        assert_eq!(err, 2);
    }
}
