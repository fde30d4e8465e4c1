//! End-to-end report generation.
//!
//! Chains extraction, optional ordering, assembly, merging and aggregation
//! the way a validation service calls them for one request.

use tracing::{debug, trace};

use crate::additional_info::AdditionalInfo;
use crate::aggregate::ReportAggregator;
use crate::assemble::{sort_records, ReportAssembler};
use crate::config::ReportSettings;
use crate::extract::extract;
use crate::merge::merge;
use crate::model::{ReportContext, ReportPair, StructuredReport};
use crate::source::ResultGraph;

/// Generates the report of one SHACL engine run.
///
/// `results` is `None` when the engine produced no result graph; the
/// detailed report then carries the single engine failure item.
pub fn generate<R>(
    results: Option<&R>,
    additional_info: &mut dyn AdditionalInfo,
    settings: &ReportSettings,
    context: Option<ReportContext>,
) -> ReportPair
where
    R: ResultGraph + ?Sized,
{
    let detailed = detailed(results, additional_info, settings, context);
    finish(detailed, settings)
}

/// Generates one report covering several SHACL engine runs over the same
/// input, typically one per shape set.
///
/// Each run is assembled on its own, then the reports are merged and the
/// aggregate view, if requested, is computed on the merged report. The
/// context is attached to the merged report.
pub fn generate_all<R>(
    results: &[Option<&R>],
    additional_info: &mut dyn AdditionalInfo,
    settings: &ReportSettings,
    context: Option<ReportContext>,
) -> ReportPair
where
    R: ResultGraph + ?Sized,
{
    let reports = results
        .iter()
        .map(|graph| detailed(*graph, additional_info, settings, None))
        .collect();
    let mut merged = merge(&settings.name, reports);
    if context.is_some() {
        merged.context = context;
    }
    finish(merged, settings)
}

fn detailed<R>(
    results: Option<&R>,
    additional_info: &mut dyn AdditionalInfo,
    settings: &ReportSettings,
    context: Option<ReportContext>,
) -> StructuredReport
where
    R: ResultGraph + ?Sized,
{
    let mut extraction = extract(results);
    if settings.ordered {
        sort_records(&mut extraction.records);
    }
    ReportAssembler::new(settings).assemble(&extraction, additional_info, context)
}

fn finish(detailed: StructuredReport, settings: &ReportSettings) -> ReportPair {
    log_report(&detailed);
    let aggregate = settings
        .aggregate
        .then(|| ReportAggregator::new(&settings.labels).aggregate(&detailed));
    ReportPair {
        detailed,
        aggregate,
    }
}

fn log_report(report: &StructuredReport) {
    debug!(
        name = %report.name,
        result = ?report.result,
        errors = report.counters.errors,
        warnings = report.counters.warnings,
        infos = report.counters.infos,
        "Validation report"
    );
    for item in &report.items {
        trace!(
            severity = %item.severity,
            location = %item.location,
            "{}",
            item.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::additional_info::NoAdditionalInfo;
    use crate::model::{LocalizedText, Term, TestOutcome};
    use crate::source::{MemoryResultGraph, RawResult};
    use crate::vocab::sh;

    fn result(focus: &str, severity: &str, message: &str) -> RawResult {
        RawResult {
            focus_node: Some(Term::iri(focus)),
            severity: Some(severity.to_string()),
            messages: vec![LocalizedText::untagged(message)],
            source_shape: Some(Term::iri("http://example.org/Shape")),
            ..RawResult::default()
        }
    }

    #[test]
    fn ordered_aggregate_pipeline() {
        let graph = MemoryResultGraph::new(false)
            .with_result(result("http://example.org/a", sh::INFO, "note"))
            .with_result(result("http://example.org/b", sh::VIOLATION, "missing"))
            .with_result(result("http://example.org/c", sh::VIOLATION, "missing"));
        let settings = ReportSettings {
            ordered: true,
            aggregate: true,
            ..ReportSettings::default()
        };

        let pair = generate(Some(&graph), &mut NoAdditionalInfo, &settings, None);
        let descriptions: Vec<_> = pair
            .detailed
            .items
            .iter()
            .map(|i| i.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["missing", "missing", "note"]);
        assert_eq!(pair.detailed.result, TestOutcome::Failure);

        let fallback = StructuredReport::undefined("");
        let aggregate = pair.aggregate.unwrap_or(fallback);
        assert_eq!(aggregate.items.len(), 2);
        assert_eq!(aggregate.items[0].description, "[2 occurrences] missing");
        assert_eq!(aggregate.counters, pair.detailed.counters);
    }

    #[test]
    fn aggregate_is_optional() {
        let graph = MemoryResultGraph::new(true);
        let settings = ReportSettings::default();
        let pair = generate(Some(&graph), &mut NoAdditionalInfo, &settings, None);
        assert!(pair.aggregate.is_none());
        assert_eq!(pair.detailed.result, TestOutcome::Success);
        assert_eq!(pair.detailed.name, "SHACL Validation");
    }

    #[test]
    fn engine_failure_in_one_run_fails_the_merge() {
        let passing = MemoryResultGraph::new(true);
        let warning = MemoryResultGraph::new(false)
            .with_result(result("http://example.org/a", sh::WARNING, "odd"));
        let context = ReportContext {
            input: Some("<a> <b> <c> .".into()),
            ..ReportContext::default()
        };

        let pair = generate_all(
            &[Some(&passing), Some(&warning), None],
            &mut NoAdditionalInfo,
            &ReportSettings::default(),
            Some(context.clone()),
        );
        assert_eq!(pair.detailed.result, TestOutcome::Failure);
        assert_eq!(pair.detailed.counters.errors, 1);
        assert_eq!(pair.detailed.counters.warnings, 1);
        assert_eq!(pair.detailed.items.len(), 2);
        assert_eq!(pair.detailed.context, Some(context));
    }

    #[test]
    fn no_runs_is_undefined() {
        let pair = generate_all::<MemoryResultGraph>(
            &[],
            &mut NoAdditionalInfo,
            &ReportSettings::default(),
            None,
        );
        assert_eq!(pair.detailed.result, TestOutcome::Undefined);
    }
}
