//! Merging of reports.
//!
//! When an input is validated against several shape sets, each produces its
//! own report. Merging folds them into one: items are concatenated, counters
//! summed and the strongest result kept.

use tracing::debug;

use crate::model::StructuredReport;

/// Merges reports into one.
///
/// The merged report takes the name of the first report and the first
/// context that is present. Its result is the strongest of the inputs
/// (`FAILURE` over `SUCCESS` over `UNDEFINED`). A single report is returned
/// unchanged; no reports at all give an empty `UNDEFINED` report named
/// `name`.
#[must_use]
pub fn merge(name: &str, reports: Vec<StructuredReport>) -> StructuredReport {
    let count = reports.len();
    let mut reports = reports.into_iter();
    let Some(mut merged) = reports.next() else {
        return StructuredReport::undefined(name);
    };
    for report in reports {
        merged.result = merged.result.max(report.result);
        merged.counters += report.counters;
        merged.items.extend(report.items);
        if merged.context.is_none() {
            merged.context = report.context;
        }
    }
    debug!(
        reports = count,
        result = ?merged.result,
        items = merged.items.len(),
        "Merged reports"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Counters, ReportContext, ReportItem, Severity, TestOutcome};

    fn report(result: TestOutcome, errors: u64, warnings: u64, infos: u64) -> StructuredReport {
        StructuredReport {
            result,
            counters: Counters {
                errors,
                warnings,
                infos,
            },
            ..StructuredReport::undefined("r")
        }
    }

    #[test]
    fn empty_merge_is_undefined() {
        let merged = merge("none", Vec::new());
        assert_eq!(merged.result, TestOutcome::Undefined);
        assert_eq!(merged.name, "none");
        assert_eq!(merged.counters.total(), 0);
    }

    #[test]
    fn single_report_is_identity() {
        let single = StructuredReport::from_items(
            "only",
            vec![ReportItem::new(Severity::Warning, "w")],
            Some(ReportContext {
                shapes: Some("shapes".into()),
                ..ReportContext::default()
            }),
        );
        assert_eq!(merge("other", vec![single.clone()]), single);
    }

    #[test]
    fn failure_dominates() {
        let merged = merge(
            "r",
            vec![
                report(TestOutcome::Success, 0, 0, 0),
                report(TestOutcome::Failure, 1, 0, 0),
                report(TestOutcome::Undefined, 0, 0, 0),
            ],
        );
        assert_eq!(merged.result, TestOutcome::Failure);
    }

    #[test]
    fn success_replaces_undefined() {
        let merged = merge(
            "r",
            vec![
                report(TestOutcome::Undefined, 0, 0, 0),
                report(TestOutcome::Success, 0, 0, 0),
            ],
        );
        assert_eq!(merged.result, TestOutcome::Success);

        let merged = merge(
            "r",
            vec![
                report(TestOutcome::Success, 0, 0, 0),
                report(TestOutcome::Undefined, 0, 0, 0),
            ],
        );
        assert_eq!(merged.result, TestOutcome::Success);
    }

    #[test]
    fn counters_are_summed_and_items_concatenated() {
        let mut first = report(TestOutcome::Failure, 2, 1, 0);
        first.items.push(ReportItem::new(Severity::Violation, "a"));
        let mut second = report(TestOutcome::Success, 0, 3, 5);
        second.items.push(ReportItem::new(Severity::Info, "b"));
        second.context = Some(ReportContext {
            input: Some("input".into()),
            ..ReportContext::default()
        });

        let merged = merge("r", vec![first, second]);
        assert_eq!(
            merged.counters,
            Counters {
                errors: 2,
                warnings: 4,
                infos: 5
            }
        );
        let descriptions: Vec<_> = merged.items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(descriptions, vec!["a", "b"]);
        assert_eq!(
            merged.context.and_then(|c| c.input).as_deref(),
            Some("input")
        );
    }
}
