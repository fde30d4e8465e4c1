//! IRIs of the SHACL and RDF vocabulary read from validation result graphs.

/// SHACL namespace.
pub const SHACL: &str = "http://www.w3.org/ns/shacl#";

/// SHACL validation report terms.
pub mod sh {
    /// `sh:conforms`
    pub const CONFORMS: &str = "http://www.w3.org/ns/shacl#conforms";
    /// `sh:result`
    pub const RESULT: &str = "http://www.w3.org/ns/shacl#result";
    /// `sh:resultMessage`
    pub const RESULT_MESSAGE: &str = "http://www.w3.org/ns/shacl#resultMessage";
    /// `sh:focusNode`
    pub const FOCUS_NODE: &str = "http://www.w3.org/ns/shacl#focusNode";
    /// `sh:resultPath`
    pub const RESULT_PATH: &str = "http://www.w3.org/ns/shacl#resultPath";
    /// `sh:resultSeverity`
    pub const RESULT_SEVERITY: &str = "http://www.w3.org/ns/shacl#resultSeverity";
    /// `sh:sourceShape`
    pub const SOURCE_SHAPE: &str = "http://www.w3.org/ns/shacl#sourceShape";
    /// `sh:sourceConstraintComponent`
    pub const SOURCE_CONSTRAINT_COMPONENT: &str =
        "http://www.w3.org/ns/shacl#sourceConstraintComponent";
    /// `sh:value`
    pub const VALUE: &str = "http://www.w3.org/ns/shacl#value";
    /// `sh:Violation`
    pub const VIOLATION: &str = "http://www.w3.org/ns/shacl#Violation";
    /// `sh:Warning`
    pub const WARNING: &str = "http://www.w3.org/ns/shacl#Warning";
    /// `sh:Info`
    pub const INFO: &str = "http://www.w3.org/ns/shacl#Info";
}

/// RDF terms.
pub mod rdf {
    /// `rdf:type`
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}
