//! Recursive-descent parser for the supported SPARQL subset

use entail_core::{Literal, TermValue};
use entail_vocab::xsd;

use crate::error::{MemoryError, Result};
use crate::lex::{tokenize, Token};

/// A term in pattern position: a variable or a ground value.
#[derive(Debug, Clone, PartialEq)]
pub enum PTerm {
    Var(String),
    Value(TermValue),
}

/// One triple pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct TriplePattern {
    pub s: PTerm,
    pub p: PTerm,
    pub o: PTerm,
}

/// Comparison operators usable in FILTER.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A binary comparison filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub left: PTerm,
    pub op: CompareOp,
    pub right: PTerm,
}

/// A conjunctive group: triple patterns, filters and MINUS sub-groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupPattern {
    pub triples: Vec<TriplePattern>,
    pub filters: Vec<Filter>,
    pub minus: Vec<GroupPattern>,
}

/// A parsed query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Select {
        vars: Vec<String>,
        pattern: GroupPattern,
    },
    Ask(GroupPattern),
    InsertData(Vec<[TermValue; 3]>),
}

pub fn parse(input: &str) -> Result<Query> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let query = parser.query()?;
    if parser.pos != parser.tokens.len() {
        return Err(MemoryError::parse("trailing tokens after query"));
    }
    Ok(query)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| MemoryError::parse("unexpected end of query"))?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> Result<()> {
        let token = self.next()?;
        if &token == expected {
            Ok(())
        } else {
            Err(MemoryError::parse(format!(
                "expected {expected:?}, found {token:?}"
            )))
        }
    }

    fn keyword(&mut self, word: &str) -> Result<()> {
        match self.next()? {
            Token::Ident(ident) if ident == word => Ok(()),
            other => Err(MemoryError::parse(format!(
                "expected {word}, found {other:?}"
            ))),
        }
    }

    fn query(&mut self) -> Result<Query> {
        match self.next()? {
            Token::Ident(kw) if kw == "SELECT" => self.select(),
            Token::Ident(kw) if kw == "ASK" => Ok(Query::Ask(self.group()?)),
            Token::Ident(kw) if kw == "INSERT" => {
                self.keyword("DATA")?;
                self.insert_data()
            }
            other => Err(MemoryError::unsupported(format!(
                "query must start with SELECT, ASK or INSERT DATA, found {other:?}"
            ))),
        }
    }

    fn select(&mut self) -> Result<Query> {
        let mut vars = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Var(_)) => {
                    if let Token::Var(name) = self.next()? {
                        vars.push(name);
                    }
                }
                _ => break,
            }
        }
        if vars.is_empty() {
            return Err(MemoryError::unsupported("SELECT with no projected variables"));
        }
        self.keyword("WHERE")?;
        let pattern = self.group()?;
        Ok(Query::Select { vars, pattern })
    }

    fn group(&mut self) -> Result<GroupPattern> {
        self.expect(&Token::LBrace)?;
        let mut group = GroupPattern::default();
        loop {
            match self.peek() {
                Some(Token::RBrace) => {
                    self.next()?;
                    return Ok(group);
                }
                Some(Token::Ident(kw)) if kw == "MINUS" => {
                    self.next()?;
                    group.minus.push(self.group()?);
                }
                Some(Token::Ident(kw)) if kw == "FILTER" => {
                    self.next()?;
                    group.filters.push(self.filter()?);
                }
                Some(_) => {
                    group.triples.push(self.triple()?);
                }
                None => return Err(MemoryError::parse("unterminated group pattern")),
            }
        }
    }

    fn filter(&mut self) -> Result<Filter> {
        self.expect(&Token::LParen)?;
        let left = self.pterm()?;
        let op = match self.next()? {
            Token::Eq => CompareOp::Eq,
            Token::Ne => CompareOp::Ne,
            Token::Lt => CompareOp::Lt,
            Token::Le => CompareOp::Le,
            Token::Gt => CompareOp::Gt,
            Token::Ge => CompareOp::Ge,
            other => {
                return Err(MemoryError::parse(format!(
                    "expected comparison operator, found {other:?}"
                )))
            }
        };
        let right = self.pterm()?;
        self.expect(&Token::RParen)?;
        Ok(Filter { left, op, right })
    }

    fn triple(&mut self) -> Result<TriplePattern> {
        let s = self.pterm()?;
        let p = self.pterm()?;
        let o = self.pterm()?;
        self.expect(&Token::Dot)?;
        Ok(TriplePattern { s, p, o })
    }

    fn pterm(&mut self) -> Result<PTerm> {
        match self.next()? {
            Token::Var(name) => Ok(PTerm::Var(name)),
            Token::Iri(iri) => Ok(PTerm::Value(TermValue::resource(iri))),
            Token::Str { lexical, lang } => Ok(PTerm::Value(TermValue::Literal(match lang {
                Some(lang) => Literal::lang_string(lexical, lang),
                None => Literal::string(lexical),
            }))),
            Token::Number(lexical) => {
                let datatype = if lexical.contains('.') || lexical.contains('e') || lexical.contains('E') {
                    xsd::DECIMAL
                } else {
                    xsd::INTEGER
                };
                Ok(PTerm::Value(TermValue::Literal(Literal::typed(
                    lexical, datatype,
                ))))
            }
            other => Err(MemoryError::parse(format!(
                "expected term, found {other:?}"
            ))),
        }
    }

    fn insert_data(&mut self) -> Result<Query> {
        let group = self.group()?;
        if !group.filters.is_empty() || !group.minus.is_empty() {
            return Err(MemoryError::unsupported(
                "INSERT DATA pattern must contain only ground triples",
            ));
        }
        let mut triples = Vec::new();
        for tp in group.triples {
            match (tp.s, tp.p, tp.o) {
                (PTerm::Value(s), PTerm::Value(p), PTerm::Value(o)) => {
                    triples.push([s, p, o]);
                }
                _ => {
                    return Err(MemoryError::unsupported(
                        "INSERT DATA triples must be ground",
                    ))
                }
            }
        }
        Ok(Query::InsertData(triples))
    }
}
