//! RDF Vocabulary Constants and Namespace IRIs for Entail
//!
//! This crate provides a centralized location for the vocabulary IRIs used
//! throughout the Entail ecosystem.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)
//! - `swrlb` - SWRL built-in vocabulary (http://www.w3.org/2003/11/swrlb#)

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// rdfs:domain IRI
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";

    /// rdfs:range IRI
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
}

/// XSD vocabulary constants
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:short IRI
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";

    /// xsd:byte IRI
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:nonNegativeInteger IRI
    pub const NON_NEGATIVE_INTEGER: &str =
        "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";

    /// xsd:positiveInteger IRI
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";

    /// All numeric XSD datatypes, i.e. those whose literals render unquoted
    /// in SPARQL and compare by value rather than by lexical form.
    pub const NUMERIC_TYPES: &[&str] = &[
        INTEGER,
        LONG,
        INT,
        SHORT,
        BYTE,
        DECIMAL,
        DOUBLE,
        FLOAT,
        NON_NEGATIVE_INTEGER,
        POSITIVE_INTEGER,
    ];

    /// Check whether a datatype IRI denotes a numeric XSD type
    pub fn is_numeric(datatype: &str) -> bool {
        NUMERIC_TYPES.contains(&datatype)
    }
}

/// OWL vocabulary constants
pub mod owl {
    /// owl:disjointWith IRI
    pub const DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";

    /// owl:FunctionalProperty IRI
    pub const FUNCTIONAL_PROPERTY: &str = "http://www.w3.org/2002/07/owl#FunctionalProperty";

    /// owl:InverseFunctionalProperty IRI
    pub const INVERSE_FUNCTIONAL_PROPERTY: &str =
        "http://www.w3.org/2002/07/owl#InverseFunctionalProperty";

    /// owl:Restriction IRI
    pub const RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";

    /// owl:onProperty IRI
    pub const ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";

    /// owl:maxCardinality IRI
    pub const MAX_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#maxCardinality";
}

/// SWRL built-in vocabulary constants
///
/// These identify the built-in predicates and computations of the standard
/// library registered by the reasoner.
pub mod swrlb {
    pub const ADD: &str = "http://www.w3.org/2003/11/swrlb#add";
    pub const SUBTRACT: &str = "http://www.w3.org/2003/11/swrlb#subtract";
    pub const MULTIPLY: &str = "http://www.w3.org/2003/11/swrlb#multiply";
    pub const DIVIDE: &str = "http://www.w3.org/2003/11/swrlb#divide";
    pub const MOD: &str = "http://www.w3.org/2003/11/swrlb#mod";
    pub const EQUAL: &str = "http://www.w3.org/2003/11/swrlb#equal";
    pub const NOT_EQUAL: &str = "http://www.w3.org/2003/11/swrlb#notEqual";
    pub const LESS_THAN: &str = "http://www.w3.org/2003/11/swrlb#lessThan";
    pub const LESS_THAN_OR_EQUAL: &str = "http://www.w3.org/2003/11/swrlb#lessThanOrEqual";
    pub const GREATER_THAN: &str = "http://www.w3.org/2003/11/swrlb#greaterThan";
    pub const GREATER_THAN_OR_EQUAL: &str =
        "http://www.w3.org/2003/11/swrlb#greaterThanOrEqual";
    pub const STRING_CONCAT: &str = "http://www.w3.org/2003/11/swrlb#stringConcat";
    pub const STRING_LENGTH: &str = "http://www.w3.org/2003/11/swrlb#stringLength";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_datatypes() {
        assert!(xsd::is_numeric(xsd::INTEGER));
        assert!(xsd::is_numeric(xsd::DOUBLE));
        assert!(!xsd::is_numeric(xsd::STRING));
        assert!(!xsd::is_numeric(xsd::BOOLEAN));
    }
}
