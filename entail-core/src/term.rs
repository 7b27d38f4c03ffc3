//! Term model: variables, resources and literals
//!
//! Terms are the argument positions of atoms. A term is either a logical
//! [`Variable`] or a ground [`TermValue`] (a resource or a literal). The
//! representation is all-string so every type derives `Eq`/`Ord`/`Hash` and
//! can sit in binding maps and solution sets; numeric access parses the
//! lexical form on demand.

use std::fmt;
use std::sync::Arc;

use entail_vocab::xsd;

/// A resource identifier (full IRI).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(iri: impl Into<Arc<str>>) -> Self {
        Iri(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Iri::new(s)
    }
}

/// An opaque logical variable, scoped to a rule.
///
/// Variables are created when rules are parsed (outside this subsystem) and
/// are only ever referenced here. Two variables are the same variable iff
/// their identifiers are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(Arc<str>);

impl Variable {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Variable(name.into())
    }

    /// The variable's identifier, without any query-syntax prefix.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// An RDF literal: lexical form plus optional datatype or language tag.
///
/// A literal carries at most one of `datatype` and `lang`; the constructors
/// enforce this.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    lexical: Arc<str>,
    datatype: Option<Iri>,
    lang: Option<Arc<str>>,
}

impl Literal {
    /// A plain string literal (xsd:string semantics).
    pub fn string(lexical: impl Into<Arc<str>>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: None,
            lang: None,
        }
    }

    /// A language-tagged string literal.
    pub fn lang_string(lexical: impl Into<Arc<str>>, lang: impl Into<Arc<str>>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: None,
            lang: Some(lang.into()),
        }
    }

    /// A literal with an explicit datatype IRI.
    pub fn typed(lexical: impl Into<Arc<str>>, datatype: impl Into<Iri>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            lang: None,
        }
    }

    /// An xsd:integer literal.
    pub fn integer(value: i64) -> Self {
        Literal::typed(value.to_string(), xsd::INTEGER)
    }

    /// A numeric literal from a double value.
    ///
    /// Integral values become xsd:integer, everything else xsd:decimal, so
    /// arithmetic built-ins produce `31` rather than `31.0` for whole
    /// numbers.
    pub fn number(value: f64) -> Self {
        if value.fract() == 0.0 && value.is_finite() && value.abs() < i64::MAX as f64 {
            Literal::integer(value as i64)
        } else {
            Literal::typed(value.to_string(), xsd::DECIMAL)
        }
    }

    /// An xsd:boolean literal.
    pub fn boolean(value: bool) -> Self {
        Literal::typed(value.to_string(), xsd::BOOLEAN)
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// True for plain or xsd:string literals without a language tag.
    pub fn is_string(&self) -> bool {
        self.lang.is_none()
            && match &self.datatype {
                None => true,
                Some(dt) => dt.as_str() == xsd::STRING,
            }
    }

    /// True when the datatype is one of the numeric XSD types.
    pub fn is_numeric(&self) -> bool {
        self.datatype
            .as_ref()
            .is_some_and(|dt| xsd::is_numeric(dt.as_str()))
    }

    /// Parse the lexical form as a number, if the literal is numeric or its
    /// lexical form happens to be a valid numeral.
    pub fn as_f64(&self) -> Option<f64> {
        if self.lang.is_some() {
            return None;
        }
        self.lexical.parse::<f64>().ok().filter(|f| f.is_finite())
    }
}

/// A ground value a variable can be bound to: a store resource identity or a
/// literal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermValue {
    Resource(Iri),
    Literal(Literal),
}

impl TermValue {
    pub fn resource(iri: impl Into<Iri>) -> Self {
        TermValue::Resource(iri.into())
    }

    pub fn as_resource(&self) -> Option<&Iri> {
        match self {
            TermValue::Resource(iri) => Some(iri),
            TermValue::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            TermValue::Resource(_) => None,
            TermValue::Literal(lit) => Some(lit),
        }
    }

    /// Numeric view of a literal value, `None` for resources and
    /// non-numeric literals.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_literal().and_then(Literal::as_f64)
    }
}

impl From<Literal> for TermValue {
    fn from(lit: Literal) -> Self {
        TermValue::Literal(lit)
    }
}

/// One argument position of an atom: a variable or a ground value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Variable(Variable),
    Value(TermValue),
}

impl Term {
    /// Create a variable term
    pub fn var(name: impl Into<Arc<str>>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Create a resource term
    pub fn resource(iri: impl Into<Iri>) -> Self {
        Term::Value(TermValue::Resource(iri.into()))
    }

    /// Create a literal term
    pub fn literal(lit: Literal) -> Self {
        Term::Value(TermValue::Literal(lit))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            Term::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&TermValue> {
        match self {
            Term::Variable(_) => None,
            Term::Value(v) => Some(v),
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl From<TermValue> for Term {
    fn from(v: TermValue) -> Self {
        Term::Value(v)
    }
}
