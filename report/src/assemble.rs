//! Report assembly.
//!
//! Turns extracted result records into a [`StructuredReport`]: one item per
//! record, a localized description, labelled location and test strings, and
//! counters tallied from the items.

use tracing::debug;

use crate::additional_info::AdditionalInfo;
use crate::config::ReportSettings;
use crate::extract::Extraction;
use crate::locale::MessagePool;
use crate::model::{ReportContext, ReportItem, ResultRecord, Severity, StructuredReport, Term};

/// Builds structured reports from extracted records.
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler<'s> {
    settings: &'s ReportSettings,
}

impl<'s> ReportAssembler<'s> {
    /// Creates an assembler for the given settings.
    #[must_use]
    pub fn new(settings: &'s ReportSettings) -> Self {
        Self { settings }
    }

    /// Assembles the report of one extraction.
    ///
    /// Items keep the order of the extracted records. If no result graph was
    /// produced the report holds a single error item describing the failure.
    pub fn assemble(
        &self,
        extraction: &Extraction,
        additional_info: &mut dyn AdditionalInfo,
        context: Option<ReportContext>,
    ) -> StructuredReport {
        let items = if extraction.graph_present {
            extraction
                .records
                .iter()
                .map(|record| self.item(record, additional_info))
                .collect()
        } else {
            debug!("Reporting validator failure");
            vec![ReportItem::new(
                Severity::Violation,
                self.settings.labels.report_generation_failure.clone(),
            )]
        };
        StructuredReport::from_items(self.settings.name.clone(), items, context)
    }

    /// Builds the report item of one record.
    pub fn item(
        &self,
        record: &ResultRecord,
        additional_info: &mut dyn AdditionalInfo,
    ) -> ReportItem {
        let labels = &self.settings.labels;
        let translation =
            MessagePool::new(record.messages.iter().cloned()).select(&self.settings.locale);

        let mut description = translation
            .selected
            .map(|message| message.text)
            .unwrap_or_default();
        if let Some(info) = additional_info
            .additional_info(record.focus_node.as_ref())
            .filter(|info| !info.is_empty())
        {
            if !description.is_empty() {
                description.push_str(&self.settings.additional_info_separator);
            }
            description.push_str(&info);
        }

        ReportItem {
            severity: record.severity,
            description,
            location: labelled_parts(&[
                (labels.focus_node.as_str(), display(&record.focus_node)),
                (labels.result_path.as_str(), display(&record.result_path)),
            ]),
            test: labelled_parts(&[
                (labels.shape.as_str(), display(&record.source_shape)),
                (labels.value.as_str(), display(&record.value)),
            ]),
            value: non_blank(&record.value),
            source_shape: non_blank(&record.source_shape),
            assertion_ref: non_blank(&record.source_constraint_component),
            alternatives: if self.settings.include_unmatched_messages {
                translation.unmatched
            } else {
                Vec::new()
            },
        }
    }
}

/// Orders records by severity: violations, then warnings, then infos.
///
/// The sort is stable, so records of equal severity keep their discovery
/// order. Callers that request ordered reports apply this before assembly.
pub fn sort_records(records: &mut [ResultRecord]) {
    records.sort_by_key(|record| record.severity);
}

fn display(term: &Option<Term>) -> &str {
    term.as_ref().map_or("", Term::display_value)
}

fn non_blank(term: &Option<Term>) -> Option<String> {
    let value = display(term);
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Joins `[label] - [value]` pairs with ` - `, skipping blank values.
fn labelled_parts(parts: &[(&str, &str)]) -> String {
    parts
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| format!("[{label}] - [{value}]"))
        .collect::<Vec<_>>()
        .join(" - ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::additional_info::NoAdditionalInfo;
    use crate::error::Result;
    use crate::model::{LocalizedText, TestOutcome};

    struct FixedInfo(&'static str);

    impl AdditionalInfo for FixedInfo {
        fn additional_info(&mut self, focus_node: Option<&Term>) -> Option<String> {
            focus_node.map(|_| self.0.to_string())
        }
    }

    fn record(severity: Severity, focus: &str, message: &str) -> ResultRecord {
        ResultRecord {
            focus_node: Some(Term::iri(focus)),
            result_path: Some(Term::iri("http://example.org/name")),
            messages: vec![LocalizedText::untagged(message)],
            source_shape: Some(Term::iri("http://example.org/PersonShape")),
            source_constraint_component: Some(Term::iri(
                "http://www.w3.org/ns/shacl#MinCountConstraintComponent",
            )),
            ..ResultRecord::new(severity)
        }
    }

    #[test]
    fn engine_failure_yields_single_error() {
        let settings = ReportSettings::default();
        let report = ReportAssembler::new(&settings).assemble(
            &Extraction::engine_failure(),
            &mut NoAdditionalInfo,
            None,
        );
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.counters.errors, 1);
        assert_eq!(report.counters.warnings, 0);
        assert_eq!(report.counters.infos, 0);
        assert_eq!(report.result, TestOutcome::Failure);
        assert_eq!(
            report.items[0].description,
            settings.labels.report_generation_failure
        );
    }

    #[test]
    fn conforming_extraction_is_success() {
        let settings = ReportSettings::default();
        let report = ReportAssembler::new(&settings).assemble(
            &Extraction::from_records(Vec::new()),
            &mut NoAdditionalInfo,
            None,
        );
        assert!(report.items.is_empty());
        assert_eq!(report.result, TestOutcome::Success);
    }

    #[test]
    fn counters_follow_item_severities() {
        let settings = ReportSettings::default();
        let extraction = Extraction::from_records(vec![
            record(Severity::Warning, "http://example.org/a", "w"),
            record(Severity::Violation, "http://example.org/b", "e"),
            record(Severity::Info, "http://example.org/c", "i"),
            record(Severity::Violation, "http://example.org/d", "e"),
        ]);
        let report =
            ReportAssembler::new(&settings).assemble(&extraction, &mut NoAdditionalInfo, None);
        assert_eq!(report.counters.errors, 2);
        assert_eq!(report.counters.warnings, 1);
        assert_eq!(report.counters.infos, 1);
        assert_eq!(report.result, TestOutcome::Failure);
        let order: Vec<_> = report.items.iter().map(|i| &i.description).collect();
        assert_eq!(order, vec!["w", "e", "i", "e"]);
    }

    #[test]
    fn warnings_only_is_success() {
        let settings = ReportSettings::default();
        let records = vec![record(Severity::Warning, "http://example.org/a", "w")];
        let extraction = Extraction::from_records(records);
        let report =
            ReportAssembler::new(&settings).assemble(&extraction, &mut NoAdditionalInfo, None);
        assert_eq!(report.result, TestOutcome::Success);
    }

    #[test]
    fn item_fields_are_labelled() {
        let settings = ReportSettings::default();
        let mut rec = record(Severity::Violation, "http://example.org/alice", "Missing name");
        rec.value = Some(Term::literal("x"));
        let item = ReportAssembler::new(&settings).item(&rec, &mut NoAdditionalInfo);
        assert_eq!(
            item.location,
            "[Focus node] - [http://example.org/alice] - [Result path] - [http://example.org/name]"
        );
        assert_eq!(
            item.test,
            "[Shape] - [http://example.org/PersonShape] - [Value] - [x]"
        );
        assert_eq!(item.value.as_deref(), Some("x"));
        assert_eq!(
            item.assertion_ref.as_deref(),
            Some("http://www.w3.org/ns/shacl#MinCountConstraintComponent")
        );
    }

    #[test]
    fn missing_fields_never_fail() {
        let settings = ReportSettings::default();
        let rec = ResultRecord {
            source_shape: Some(Term::BlankNode("b0".into())),
            ..ResultRecord::new(Severity::Info)
        };
        let item = ReportAssembler::new(&settings).item(&rec, &mut FixedInfo("extra"));
        assert_eq!(item.description, "");
        assert_eq!(item.location, "");
        assert_eq!(item.test, "");
        assert_eq!(item.source_shape, None);
    }

    #[test]
    fn additional_info_is_appended_deterministically() {
        let settings = ReportSettings::default();
        let rec = record(Severity::Violation, "http://example.org/alice", "Missing name");
        let assembler = ReportAssembler::new(&settings);
        let first = assembler.item(&rec, &mut FixedInfo("Person 42"));
        let second = assembler.item(&rec, &mut FixedInfo("Person 42"));
        assert_eq!(first.description, "Missing name - Person 42");
        assert_eq!(first, second);
    }

    #[test]
    fn configured_separator_joins_additional_info() {
        let settings = ReportSettings {
            additional_info_separator: " | ".into(),
            ..ReportSettings::default()
        };
        let rec = record(Severity::Violation, "http://example.org/alice", "Missing name");
        let item = ReportAssembler::new(&settings).item(&rec, &mut FixedInfo("Person 42"));
        assert_eq!(item.description, "Missing name | Person 42");
    }

    #[test]
    fn empty_additional_info_is_dropped() {
        let settings = ReportSettings::default();
        let rec = record(Severity::Violation, "http://example.org/alice", "Missing name");
        let item = ReportAssembler::new(&settings).item(&rec, &mut FixedInfo(""));
        assert_eq!(item.description, "Missing name");
    }

    #[test]
    fn additional_info_alone_has_no_separator() {
        let settings = ReportSettings::default();
        let mut rec = record(Severity::Violation, "http://example.org/alice", "unused");
        rec.messages.clear();
        let item = ReportAssembler::new(&settings).item(&rec, &mut FixedInfo("Person 42"));
        assert_eq!(item.description, "Person 42");
    }

    #[test]
    fn description_uses_requested_locale() -> Result<()> {
        let settings = ReportSettings {
            locale: "de".parse()?,
            include_unmatched_messages: true,
            ..ReportSettings::default()
        };
        let mut rec = record(Severity::Violation, "http://example.org/a", "default");
        rec.messages.push(LocalizedText::tagged("de-AT", "Wert fehlt"));
        let item = ReportAssembler::new(&settings).item(&rec, &mut NoAdditionalInfo);
        assert_eq!(item.description, "Wert fehlt");
        assert_eq!(item.alternatives, vec![LocalizedText::untagged("default")]);
        Ok(())
    }

    #[test]
    fn sorting_is_stable_by_severity() {
        let mut records = vec![
            record(Severity::Info, "http://example.org/1", "i1"),
            record(Severity::Violation, "http://example.org/2", "e1"),
            record(Severity::Warning, "http://example.org/3", "w1"),
            record(Severity::Violation, "http://example.org/4", "e2"),
        ];
        sort_records(&mut records);
        let order: Vec<_> = records.iter().map(|r| &r.messages[0].text).collect();
        assert_eq!(order, vec!["e1", "e2", "w1", "i1"]);
    }
}
