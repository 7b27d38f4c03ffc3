//! Tokenizer for the supported SPARQL subset

use crate::error::{MemoryError, Result};

/// One token of the supported query grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `<...>` full IRI
    Iri(String),
    /// `?name`
    Var(String),
    /// `"..."` with optional `@lang`
    Str { lexical: String, lang: Option<String> },
    /// Bare numeral, lexical form preserved
    Number(String),
    /// Bare keyword: SELECT, WHERE, ASK, INSERT, DATA, MINUS, FILTER
    Ident(String),
    LBrace,
    RBrace,
    LParen,
    RParen,
    Dot,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '{' => {
                chars.next();
                tokens.push(Token::LBrace);
            }
            '}' => {
                chars.next();
                tokens.push(Token::RBrace);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Eq);
            }
            '!' => {
                chars.next();
                match chars.next() {
                    Some('=') => tokens.push(Token::Ne),
                    other => {
                        return Err(MemoryError::lex(format!(
                            "expected '=' after '!', found {other:?}"
                        )))
                    }
                }
            }
            '<' => {
                chars.next();
                // Either an IRI or a comparison operator.
                match chars.peek() {
                    Some('=') => {
                        chars.next();
                        tokens.push(Token::Le);
                    }
                    Some(&n) if n.is_whitespace() || n == '?' => {
                        tokens.push(Token::Lt);
                    }
                    _ => {
                        let mut iri = String::new();
                        loop {
                            match chars.next() {
                                Some('>') => break,
                                Some(c) => iri.push(c),
                                None => {
                                    return Err(MemoryError::lex("unterminated IRI"));
                                }
                            }
                        }
                        tokens.push(Token::Iri(iri));
                    }
                }
            }
            '>' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Ge);
                } else {
                    tokens.push(Token::Gt);
                }
            }
            '?' => {
                chars.next();
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    return Err(MemoryError::lex("empty variable name"));
                }
                tokens.push(Token::Var(name));
            }
            '"' => {
                chars.next();
                let mut lexical = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some('\\') => lexical.push('\\'),
                            Some('"') => lexical.push('"'),
                            Some('n') => lexical.push('\n'),
                            Some('r') => lexical.push('\r'),
                            Some('t') => lexical.push('\t'),
                            other => {
                                return Err(MemoryError::lex(format!(
                                    "invalid escape {other:?}"
                                )))
                            }
                        },
                        Some('"') => break,
                        Some(c) => lexical.push(c),
                        None => return Err(MemoryError::lex("unterminated string literal")),
                    }
                }
                let lang = if chars.peek() == Some(&'@') {
                    chars.next();
                    let mut tag = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '-' {
                            tag.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    Some(tag)
                } else {
                    None
                };
                tokens.push(Token::Str { lexical, lang });
            }
            c if c.is_ascii_digit() || c == '-' || c == '+' => {
                let mut num = String::new();
                num.push(c);
                chars.next();
                while let Some(&n) = chars.peek() {
                    // A '.' is part of the numeral only when a digit follows;
                    // otherwise it terminates the triple.
                    if n.is_ascii_digit() || n == 'e' || n == 'E' || n == '-' || n == '+' {
                        num.push(n);
                        chars.next();
                    } else if n == '.' {
                        let mut lookahead = chars.clone();
                        lookahead.next();
                        match lookahead.peek() {
                            Some(d) if d.is_ascii_digit() => {
                                num.push('.');
                                chars.next();
                            }
                            _ => break,
                        }
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Number(num));
            }
            c if c.is_ascii_alphabetic() => {
                let mut ident = String::new();
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphanumeric() {
                        ident.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => {
                return Err(MemoryError::lex(format!("unexpected character {other:?}")));
            }
        }
    }

    Ok(tokens)
}
