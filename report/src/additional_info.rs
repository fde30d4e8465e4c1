//! Additional information appended to report items.
//!
//! A deployment can configure text templates such as
//! `"Order ${http://example.org/id} of ${http://example.org/customer}"` that
//! are filled in from the focus node's properties in the validated input. A
//! default template applies to every focus node; per-type templates override
//! it for focus nodes whose `rdf:type` matches.
//!
//! Templates are parsed once when the settings are loaded. Malformed
//! placeholders are configuration errors and fail at that point.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::error::{ReportError, Result};
use crate::model::Term;
use crate::source::ResourceLookup;
use crate::vocab::rdf;

const PLACEHOLDER_PATTERN: &str = r"\$\{([^}]*)\}";

fn placeholder_pattern() -> std::result::Result<&'static Regex, &'static regex::Error> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN)).as_ref()
}

/// A parsed template: literal text with positional property slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefinition {
    /// Literal segments; always one more than `properties`.
    literals: Vec<String>,
    /// Property IRIs, one per slot, in declaration order.
    properties: Vec<String>,
}

impl TemplateDefinition {
    /// Parses template text containing `${propertyIri}` placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidTemplate`] if a placeholder is empty,
    /// contains whitespace, or is not closed.
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |message: &str| ReportError::InvalidTemplate {
            template: template.to_string(),
            message: message.to_string(),
        };
        let pattern = placeholder_pattern().map_err(|e| invalid(&e.to_string()))?;

        let mut literals = Vec::new();
        let mut properties = Vec::new();
        let mut last = 0;
        for captures in pattern.captures_iter(template) {
            let (Some(whole), Some(property)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let property = property.as_str();
            if property.is_empty() {
                return Err(invalid("empty placeholder"));
            }
            if property.chars().any(char::is_whitespace) {
                return Err(invalid("placeholder contains whitespace"));
            }
            if property.contains("${") {
                return Err(invalid("nested placeholder"));
            }
            literals.push(template[last..whole.start()].to_string());
            properties.push(property.to_string());
            last = whole.end();
        }
        literals.push(template[last..].to_string());

        if literals.iter().any(|literal| literal.contains("${")) {
            return Err(invalid("unclosed placeholder"));
        }
        Ok(Self {
            literals,
            properties,
        })
    }

    /// The property IRIs referenced by the template, in slot order.
    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Fills the slots with the given values; missing values render empty.
    #[must_use]
    pub fn render(&self, values: &[String]) -> String {
        let mut out = String::new();
        for (index, literal) in self.literals.iter().enumerate() {
            out.push_str(literal);
            if index < self.properties.len() {
                if let Some(value) = values.get(index) {
                    out.push_str(value);
                }
            }
        }
        out
    }
}

/// The configured templates of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalInfoTemplates {
    default: Option<TemplateDefinition>,
    by_type: Vec<(String, TemplateDefinition)>,
}

impl AdditionalInfoTemplates {
    /// Parses the default template and the per-type templates.
    ///
    /// Per-type templates are matched in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidTemplate`] for the first malformed template.
    pub fn new<I>(default: Option<&str>, by_type: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let default = default.map(TemplateDefinition::parse).transpose()?;
        let by_type = by_type
            .into_iter()
            .map(|(type_iri, template)| Ok((type_iri, TemplateDefinition::parse(&template)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { default, by_type })
    }

    /// Returns true if at least one template is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.default.is_some() || !self.by_type.is_empty()
    }

    /// Returns the template for a focus node of the given type.
    #[must_use]
    pub fn for_type(&self, type_iri: Option<&str>) -> Option<&TemplateDefinition> {
        type_iri
            .and_then(|type_iri| {
                self.by_type
                    .iter()
                    .find(|(candidate, _)| candidate == type_iri)
                    .map(|(_, definition)| definition)
            })
            .or(self.default.as_ref())
    }
}

/// Source of additional information for a report item's focus node.
pub trait AdditionalInfo {
    /// Returns the text to append for the focus node, if any.
    fn additional_info(&mut self, focus_node: Option<&Term>) -> Option<String>;
}

/// Provides no additional information.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdditionalInfo;

impl AdditionalInfo for NoAdditionalInfo {
    fn additional_info(&mut self, _focus_node: Option<&Term>) -> Option<String> {
        None
    }
}

/// Applies the configured templates to focus nodes of one input graph.
///
/// One resolver serves one request; it caches the property accessors its
/// templates use.
pub struct AdditionalInfoResolver<'a, G: ResourceLookup> {
    templates: &'a AdditionalInfoTemplates,
    graph: &'a G,
    properties: HashMap<String, G::Property>,
}

impl<'a, G: ResourceLookup> AdditionalInfoResolver<'a, G> {
    /// Creates a resolver over the validated input graph.
    pub fn new(templates: &'a AdditionalInfoTemplates, graph: &'a G) -> Self {
        Self {
            templates,
            graph,
            properties: HashMap::new(),
        }
    }

    /// Returns true if any template is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.templates.is_enabled()
    }

    /// Renders the applicable template for the focus node.
    ///
    /// The template is chosen by the focus node's first `rdf:type`. Each
    /// placeholder takes the first value of its property; missing values
    /// render as empty text. Returns `None` if no template applies or the
    /// focus node is not described by the input graph.
    pub fn resolve(&mut self, focus_node: &Term) -> Option<String> {
        if !self.templates.is_enabled() {
            return None;
        }
        let resource = focus_node.as_iri()?;
        match self.graph.describes(resource) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(err) => {
                warn!(error = %err, focus_node = resource, "Unable to look up focus node");
                return None;
            }
        }

        let node_type = self.first_value(resource, rdf::TYPE);
        let templates = self.templates;
        let definition = templates.for_type(node_type.as_ref().and_then(Term::as_iri))?;
        let values: Vec<String> = definition
            .properties()
            .iter()
            .map(|property| {
                self.first_value(resource, property)
                    .map(|value| value.display_value().to_string())
                    .unwrap_or_default()
            })
            .collect();
        Some(definition.render(&values))
    }

    fn first_value(&mut self, resource: &str, property: &str) -> Option<Term> {
        let graph = self.graph;
        let accessor = self
            .properties
            .entry(property.to_string())
            .or_insert_with(|| graph.property(property));
        match graph.first_value(resource, accessor) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    error = %err,
                    focus_node = resource,
                    property,
                    "Unable to read property value"
                );
                None
            }
        }
    }
}

impl<G: ResourceLookup> AdditionalInfo for AdditionalInfoResolver<'_, G> {
    fn additional_info(&mut self, focus_node: Option<&Term>) -> Option<String> {
        focus_node.and_then(|node| self.resolve(node))
    }
}
