//! Adapters from `sophia` graphs to the report sources.
//!
//! [`RdfResultGraph`] reads a SHACL validation report graph, and
//! [`RdfInputGraph`] serves focus node lookups on the validated data. Both
//! borrow any [`sophia_api::graph::Graph`].

use std::collections::HashSet;
use std::sync::Arc;

use sophia_api::graph::Graph;
use sophia_api::term::matcher::Any;
use sophia_api::term::{IriRef, SimpleTerm, Term as RdfTerm, TermKind};
use sophia_api::triple::Triple;

use crate::error::{ReportError, Result};
use crate::model::{LocalizedText, Term};
use crate::source::{RawResult, ResourceLookup, ResultGraph};
use crate::vocab::sh;

/// Converts an RDF term into a report term.
///
/// Quoted triples and variables have no report representation and yield
/// `None`. The datatype of language-tagged literals is left out.
pub fn to_term<T: RdfTerm>(term: T) -> Option<Term> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Term::Iri(iri.as_str().to_string())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Term::BlankNode(id.as_str().to_string())),
        TermKind::Literal => {
            let lexical = term.lexical_form()?.to_string();
            let language = term.language_tag().map(|tag| tag.as_str().to_string());
            let datatype = if language.is_some() {
                None
            } else {
                term.datatype().map(|iri| iri.as_str().to_string())
            };
            Some(Term::Literal {
                lexical,
                datatype,
                language,
            })
        }
        _ => None,
    }
}

fn iri(value: &str) -> IriRef<&str> {
    IriRef::new_unchecked(value)
}

/// A SHACL validation report held in a `sophia` graph.
#[derive(Debug)]
pub struct RdfResultGraph<'g, G> {
    graph: &'g G,
}

impl<'g, G: Graph> RdfResultGraph<'g, G> {
    /// Wraps a result graph.
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// All objects of `node`'s `property`, in graph order.
    fn objects(&self, node: &SimpleTerm<'static>, property: &str) -> Result<Vec<Term>> {
        let mut values = Vec::new();
        for triple in self.graph.triples_matching([node], [iri(property)], Any) {
            let triple = triple.map_err(ReportError::graph)?;
            values.extend(to_term(triple.o()));
        }
        Ok(values)
    }

    fn object(&self, node: &SimpleTerm<'static>, property: &str) -> Result<Option<Term>> {
        Ok(self.objects(node, property)?.into_iter().next())
    }

    /// The distinct `sh:result` objects, in first-seen order.
    fn result_nodes(&self) -> Result<Vec<SimpleTerm<'static>>> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for triple in self.graph.triples_matching(Any, [iri(sh::RESULT)], Any) {
            let triple = triple.map_err(ReportError::graph)?;
            let Some(key) = to_term(triple.o()) else {
                continue;
            };
            if seen.insert(key) {
                nodes.push(triple.o().into_term::<SimpleTerm<'static>>());
            }
        }
        Ok(nodes)
    }

    fn raw_result(&self, node: &SimpleTerm<'static>) -> Result<RawResult> {
        let messages = self
            .objects(node, sh::RESULT_MESSAGE)?
            .into_iter()
            .filter_map(|message| match message {
                Term::Literal {
                    lexical, language, ..
                } => Some(LocalizedText {
                    language,
                    text: lexical,
                }),
                _ => None,
            })
            .collect();
        Ok(RawResult {
            focus_node: self.object(node, sh::FOCUS_NODE)?,
            result_path: self.object(node, sh::RESULT_PATH)?,
            severity: self
                .object(node, sh::RESULT_SEVERITY)?
                .and_then(|severity| severity.as_iri().map(str::to_string)),
            messages,
            source_shape: self.object(node, sh::SOURCE_SHAPE)?,
            source_constraint_component: self.object(node, sh::SOURCE_CONSTRAINT_COMPONENT)?,
            value: self.object(node, sh::VALUE)?,
        })
    }
}

impl<G: Graph> ResultGraph for RdfResultGraph<'_, G> {
    fn conforms(&self) -> Result<Option<bool>> {
        let flag = self
            .graph
            .triples_matching(Any, [iri(sh::CONFORMS)], Any)
            .next()
            .transpose()
            .map_err(ReportError::graph)?
            .and_then(|triple| triple.o().lexical_form().map(|l| l.to_string()));
        Ok(flag.map(|lexical| matches!(lexical.trim(), "true" | "1")))
    }

    fn results(&self) -> Result<Vec<RawResult>> {
        self.result_nodes()?
            .iter()
            .map(|node| self.raw_result(node))
            .collect()
    }
}

/// The validated input data held in a `sophia` graph.
#[derive(Debug)]
pub struct RdfInputGraph<'g, G> {
    graph: &'g G,
}

impl<'g, G: Graph> RdfInputGraph<'g, G> {
    /// Wraps an input graph.
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }
}

impl<G: Graph> ResourceLookup for RdfInputGraph<'_, G> {
    type Property = IriRef<Arc<str>>;

    fn property(&self, iri: &str) -> Self::Property {
        IriRef::new_unchecked(Arc::from(iri))
    }

    fn describes(&self, resource: &str) -> Result<bool> {
        self.graph
            .triples_matching([iri(resource)], Any, Any)
            .next()
            .transpose()
            .map(|triple| triple.is_some())
            .map_err(ReportError::graph)
    }

    fn first_value(&self, resource: &str, property: &Self::Property) -> Result<Option<Term>> {
        for triple in self
            .graph
            .triples_matching([iri(resource)], [property.clone()], Any)
        {
            let triple = triple.map_err(ReportError::graph)?;
            if let Some(term) = to_term(triple.o()) {
                return Ok(Some(term));
            }
        }
        Ok(None)
    }
}
