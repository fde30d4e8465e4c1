//! Read access to the graphs a report is synthesized from.
//!
//! The core never depends on a particular triple store. A [`ResultGraph`]
//! exposes the SHACL engine's output, a [`ResourceLookup`] exposes the
//! validated input. Adapters for `sophia` graphs live in [`crate::rdf`].

use crate::error::Result;
use crate::model::{LocalizedText, Term};

/// One `sh:result` node exactly as found in a result graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
    /// `sh:focusNode`.
    pub focus_node: Option<Term>,
    /// `sh:resultPath`.
    pub result_path: Option<Term>,
    /// `sh:resultSeverity` IRI, unresolved.
    pub severity: Option<String>,
    /// `sh:resultMessage` values in graph order.
    pub messages: Vec<LocalizedText>,
    /// `sh:sourceShape`.
    pub source_shape: Option<Term>,
    /// `sh:sourceConstraintComponent`.
    pub source_constraint_component: Option<Term>,
    /// `sh:value`.
    pub value: Option<Term>,
}

/// The output of a SHACL engine run.
pub trait ResultGraph {
    /// Reads the `sh:conforms` marker; `None` if the graph carries none.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying graph cannot be read.
    fn conforms(&self) -> Result<Option<bool>>;

    /// Enumerates the `sh:result` nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying graph cannot be read.
    fn results(&self) -> Result<Vec<RawResult>>;
}

/// Resource lookups on the validated input graph.
pub trait ResourceLookup {
    /// A prepared property accessor.
    type Property;

    /// Prepares an accessor for the property with the given IRI.
    fn property(&self, iri: &str) -> Self::Property;

    /// Returns true if the graph describes the resource, i.e. the resource is
    /// the subject of at least one triple.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying graph cannot be read.
    fn describes(&self, resource: &str) -> Result<bool>;

    /// Returns the first value of `property` on `resource`, in the graph's
    /// own iteration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying graph cannot be read.
    fn first_value(&self, resource: &str, property: &Self::Property) -> Result<Option<Term>>;
}

/// A [`ResultGraph`] held entirely in memory.
///
/// Used by callers that receive results from an engine that does not produce
/// an RDF graph, and by tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryResultGraph {
    /// The `sh:conforms` marker.
    pub conforms: Option<bool>,
    /// The result nodes.
    pub results: Vec<RawResult>,
}

impl MemoryResultGraph {
    /// Creates a graph with the given conformance flag and no results.
    #[must_use]
    pub fn new(conforms: bool) -> Self {
        Self {
            conforms: Some(conforms),
            results: Vec::new(),
        }
    }

    /// Appends a result node.
    #[must_use]
    pub fn with_result(mut self, result: RawResult) -> Self {
        self.results.push(result);
        self
    }
}

impl ResultGraph for MemoryResultGraph {
    fn conforms(&self) -> Result<Option<bool>> {
        Ok(self.conforms)
    }

    fn results(&self) -> Result<Vec<RawResult>> {
        Ok(self.results.clone())
    }
}
