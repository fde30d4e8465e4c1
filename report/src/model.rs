//! Core report model types.
//!
//! Records are what the extractor reads out of a result graph; items, counters
//! and [`StructuredReport`] are what callers receive. All of them are plain
//! owned values created and consumed within one validation request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vocab::sh;

/// Severity of a validation finding.
///
/// Declared from most to least severe, so the derived ordering sorts
/// violations first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// `sh:Violation`: the finding fails the validation.
    Violation,
    /// `sh:Warning`: non-blocking.
    Warning,
    /// `sh:Info`: informational.
    Info,
}

impl Severity {
    /// Resolves a `sh:resultSeverity` IRI.
    ///
    /// Missing or unrecognized severities resolve to [`Severity::Violation`].
    #[must_use]
    pub fn from_iri(iri: Option<&str>) -> Self {
        match iri {
            Some(sh::INFO) => Severity::Info,
            Some(sh::WARNING) => Severity::Warning,
            _ => Severity::Violation,
        }
    }

    /// Returns the SHACL IRI of this severity.
    #[must_use]
    pub fn iri(self) -> &'static str {
        match self {
            Severity::Violation => sh::VIOLATION,
            Severity::Warning => sh::WARNING,
            Severity::Info => sh::INFO,
        }
    }

    /// Returns the report item kind used by renderers (`error`, `warning`, `info`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Violation => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RDF term as it appears in a result or input graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Term {
    /// A named resource.
    Iri(String),
    /// A blank node, by its graph-local label.
    BlankNode(String),
    /// A literal value.
    Literal {
        /// Lexical form.
        lexical: String,
        /// Datatype IRI, if the graph exposes one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
        /// Language tag, verbatim.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

impl Term {
    /// Creates an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Creates a plain literal term.
    pub fn literal(lexical: impl Into<String>) -> Self {
        Term::Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    /// Creates a language-tagged literal term.
    pub fn lang_literal(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// Returns the IRI if this term is a named resource.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the text shown for this term in a report.
    ///
    /// IRIs render as themselves, literals as their lexical form and blank
    /// nodes as the empty string (their labels carry no meaning to a reader).
    #[must_use]
    pub fn display_value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::BlankNode(_) => "",
            Term::Literal { lexical, .. } => lexical,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_value())
    }
}

/// One language alternative of a result message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Language tag as found in the graph; `None` for untagged text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// The message text.
    pub text: String,
}

impl LocalizedText {
    /// Creates an untagged text.
    pub fn untagged(text: impl Into<String>) -> Self {
        Self {
            language: None,
            text: text.into(),
        }
    }

    /// Creates a language-tagged text.
    pub fn tagged(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            text: text.into(),
        }
    }
}

/// A normalized validation result read from a result graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// `sh:focusNode`.
    pub focus_node: Option<Term>,
    /// `sh:resultPath`.
    pub result_path: Option<Term>,
    /// `sh:resultSeverity`, resolved.
    pub severity: Severity,
    /// All `sh:resultMessage` alternatives, in graph order.
    pub messages: Vec<LocalizedText>,
    /// `sh:sourceShape`.
    pub source_shape: Option<Term>,
    /// `sh:sourceConstraintComponent`.
    pub source_constraint_component: Option<Term>,
    /// `sh:value`.
    pub value: Option<Term>,
}

impl ResultRecord {
    /// Creates a record with the given severity and no other fields.
    #[must_use]
    pub fn new(severity: Severity) -> Self {
        Self {
            focus_node: None,
            result_path: None,
            severity,
            messages: Vec::new(),
            source_shape: None,
            source_constraint_component: None,
            value: None,
        }
    }
}

/// One entry of a structured report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    /// Severity of the finding.
    pub severity: Severity,
    /// Localized message, followed by any additional info.
    pub description: String,
    /// Focus node and result path, labelled.
    pub location: String,
    /// Source shape and value, labelled.
    #[serde(default)]
    pub test: String,
    /// Display value of `sh:value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Display value of `sh:sourceShape`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_shape: Option<String>,
    /// The source constraint component that produced the finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertion_ref: Option<String>,
    /// Message translations that were not selected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<LocalizedText>,
}

impl ReportItem {
    /// Creates an item carrying only a severity and a description.
    pub fn new(severity: Severity, description: impl Into<String>) -> Self {
        Self {
            severity,
            description: description.into(),
            location: String::new(),
            test: String::new(),
            value: None,
            source_shape: None,
            assertion_ref: None,
            alternatives: Vec::new(),
        }
    }
}

/// Number of report items per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Violations.
    pub errors: u64,
    /// Warnings.
    pub warnings: u64,
    /// Infos.
    pub infos: u64,
}

impl Counters {
    /// Tallies the given items by severity.
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a ReportItem>) -> Self {
        let mut counters = Counters::default();
        for item in items {
            counters.record(item.severity);
        }
        counters
    }

    /// Counts one more finding of the given severity.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Violation => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.infos += 1,
        }
    }

    /// Total number of findings.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.errors + self.warnings + self.infos
    }
}

impl std::ops::AddAssign for Counters {
    fn add_assign(&mut self, other: Counters) {
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.infos += other.infos;
    }
}

/// Overall result of a report.
///
/// Variants are declared from weakest to strongest: when reports are merged
/// the strongest result wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestOutcome {
    /// No result was determined.
    Undefined,
    /// No violations were found.
    Success,
    /// At least one violation was found, or validation could not run.
    Failure,
}

impl TestOutcome {
    /// Derives the outcome from the report counters.
    #[must_use]
    pub fn from_counters(counters: &Counters) -> Self {
        if counters.errors > 0 {
            TestOutcome::Failure
        } else {
            TestOutcome::Success
        }
    }
}

/// Content attached to a report for the benefit of its reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContext {
    /// The validated input, serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// The shapes the input was validated against, serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shapes: Option<String>,
    /// The raw SHACL validation report, serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl ReportContext {
    /// Returns true if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.shapes.is_none() && self.report.is_none()
    }
}

/// The structured validation report returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredReport {
    /// Report title.
    pub name: String,
    /// Overall result.
    pub result: TestOutcome,
    /// Findings per severity.
    pub counters: Counters,
    /// The findings.
    pub items: Vec<ReportItem>,
    /// Attached content, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ReportContext>,
}

impl StructuredReport {
    /// Builds a report from its items, deriving counters and result.
    pub fn from_items(
        name: impl Into<String>,
        items: Vec<ReportItem>,
        context: Option<ReportContext>,
    ) -> Self {
        let counters = Counters::tally(&items);
        Self {
            name: name.into(),
            result: TestOutcome::from_counters(&counters),
            counters,
            items,
            context,
        }
    }

    /// Creates an empty report whose result is [`TestOutcome::Undefined`].
    pub fn undefined(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: TestOutcome::Undefined,
            counters: Counters::default(),
            items: Vec::new(),
            context: None,
        }
    }

    /// Returns true if the report's result is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.result == TestOutcome::Failure
    }
}

/// The detailed report together with its optional aggregate view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPair {
    /// Every finding.
    pub detailed: StructuredReport,
    /// Findings with repeats collapsed, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<StructuredReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_severity_is_violation() {
        assert_eq!(Severity::from_iri(None), Severity::Violation);
        assert_eq!(
            Severity::from_iri(Some("http://example.org/Fatal")),
            Severity::Violation
        );
        assert_eq!(Severity::from_iri(Some(sh::WARNING)), Severity::Warning);
        assert_eq!(Severity::from_iri(Some(sh::INFO)), Severity::Info);
    }

    #[test]
    fn severities_sort_violations_first() {
        let mut severities = vec![Severity::Info, Severity::Violation, Severity::Warning];
        severities.sort();
        assert_eq!(
            severities,
            vec![Severity::Violation, Severity::Warning, Severity::Info]
        );
    }

    #[test]
    fn blank_nodes_display_empty() {
        assert_eq!(Term::BlankNode("b0".into()).display_value(), "");
        assert_eq!(Term::lang_literal("x", "en").to_string(), "x");
        assert_eq!(Term::iri("http://example.org/a").to_string(), "http://example.org/a");
    }

    #[test]
    fn report_from_items_derives_counters_and_result() {
        let items = vec![
            ReportItem::new(Severity::Warning, "w"),
            ReportItem::new(Severity::Info, "i"),
        ];
        let report = StructuredReport::from_items("r", items, None);
        assert_eq!(
            report.counters,
            Counters {
                errors: 0,
                warnings: 1,
                infos: 1
            }
        );
        assert_eq!(report.result, TestOutcome::Success);

        let items = vec![ReportItem::new(Severity::Violation, "e")];
        let report = StructuredReport::from_items("r", items, None);
        assert_eq!(report.result, TestOutcome::Failure);
        assert_eq!(report.counters.total(), 1);
    }

    #[test]
    fn outcome_strength_order() {
        assert!(TestOutcome::Undefined < TestOutcome::Success);
        assert!(TestOutcome::Success < TestOutcome::Failure);
    }
}
