//! Report configuration.
//!
//! [`ReportConfig`] is the serialized form, read from TOML. It is turned
//! once into [`ReportSettings`], which holds the parsed locale and templates
//! and is shared read-only by every request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::additional_info::AdditionalInfoTemplates;
use crate::error::Result;
use crate::locale::Locale;

/// Fixed texts used when building report items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportLabels {
    /// Label of the focus node part of an item's location.
    pub focus_node: String,
    /// Label of the result path part of an item's location.
    pub result_path: String,
    /// Label of the shape part of an item's test.
    pub shape: String,
    /// Label of the value part of an item's test.
    pub value: String,
    /// Occurrence annotation of aggregated items; `{count}` is replaced.
    pub occurrences: String,
    /// Description of the item reported when no result graph was produced.
    pub report_generation_failure: String,
}

impl ReportLabels {
    /// Renders the occurrence annotation for `count` repeats.
    #[must_use]
    pub fn occurrence_label(&self, count: usize) -> String {
        self.occurrences.replace("{count}", &count.to_string())
    }
}

const REPORT_GENERATION_FAILURE: &str =
    "Unable to generate the validation report due to a problem with the provided content.";

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            focus_node: "Focus node".to_string(),
            result_path: "Result path".to_string(),
            shape: "Shape".to_string(),
            value: "Value".to_string(),
            occurrences: "{count} occurrences".to_string(),
            report_generation_failure: REPORT_GENERATION_FAILURE.to_string(),
        }
    }
}

/// A template that applies to focus nodes of one `rdf:type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeTemplate {
    /// The `rdf:type` IRI.
    #[serde(rename = "type")]
    pub type_iri: String,
    /// Template text with `${propertyIri}` placeholders.
    pub template: String,
}

/// Additional info templates, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdditionalInfoConfig {
    /// Template applied when no type-specific template matches.
    pub default: Option<String>,
    /// Type-specific templates, matched in order.
    pub types: Vec<TypeTemplate>,
}

/// Report configuration as read from a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Title given to produced reports.
    pub name: String,
    /// Locale messages are selected for.
    pub locale: String,
    /// Whether report items are ordered by severity.
    pub ordered: bool,
    /// Whether an aggregate report is produced next to the detailed one.
    pub aggregate: bool,
    /// Whether unselected message translations are kept on report items.
    pub include_unmatched_messages: bool,
    /// Text placed between an item's message and its additional info.
    pub additional_info_separator: String,
    /// Fixed report texts.
    pub labels: ReportLabels,
    /// Additional info templates.
    pub additional_info: AdditionalInfoConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name: "SHACL Validation".to_string(),
            locale: "en".to_string(),
            ordered: false,
            aggregate: false,
            include_unmatched_messages: false,
            additional_info_separator: " - ".to_string(),
            labels: ReportLabels::default(),
            additional_info: AdditionalInfoConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Parses a TOML settings document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReportError::Config`] if the document is not valid
    /// TOML or contains unknown keys.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Validates the configuration and parses its locale and templates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReportError::InvalidLocale`] or
    /// [`crate::ReportError::InvalidTemplate`] for malformed values.
    pub fn into_settings(self) -> Result<ReportSettings> {
        let locale: Locale = self.locale.parse()?;
        let templates = AdditionalInfoTemplates::new(
            self.additional_info.default.as_deref(),
            self.additional_info
                .types
                .into_iter()
                .map(|t| (t.type_iri, t.template)),
        )?;
        Ok(ReportSettings {
            name: self.name,
            locale,
            ordered: self.ordered,
            aggregate: self.aggregate,
            include_unmatched_messages: self.include_unmatched_messages,
            additional_info_separator: self.additional_info_separator,
            labels: self.labels,
            templates: Arc::new(templates),
        })
    }
}

/// Validated, immutable report settings.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Title given to produced reports.
    pub name: String,
    /// Locale messages are selected for.
    pub locale: Locale,
    /// Whether report items are ordered by severity.
    pub ordered: bool,
    /// Whether an aggregate report is produced.
    pub aggregate: bool,
    /// Whether unselected message translations are kept on report items.
    pub include_unmatched_messages: bool,
    /// Text placed between an item's message and its additional info.
    pub additional_info_separator: String,
    /// Fixed report texts.
    pub labels: ReportLabels,
    /// Parsed additional info templates.
    pub templates: Arc<AdditionalInfoTemplates>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        let config = ReportConfig::default();
        Self {
            name: config.name,
            locale: Locale::default(),
            ordered: config.ordered,
            aggregate: config.aggregate,
            include_unmatched_messages: config.include_unmatched_messages,
            additional_info_separator: config.additional_info_separator,
            labels: config.labels,
            templates: Arc::new(AdditionalInfoTemplates::default()),
        }
    }
}
