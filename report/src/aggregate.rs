//! Aggregate report view.
//!
//! Collapses repeated findings (same source shape, severity and description)
//! into the first item seen, annotated with the number of occurrences. The
//! counters are carried over untouched: they keep counting every individual
//! finding, only the displayed item list shrinks.

use std::collections::HashMap;

use crate::config::ReportLabels;
use crate::model::{ReportItem, Severity, StructuredReport};

/// Identity of a finding for aggregation purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AggregateKey<'a> {
    source_shape: Option<&'a str>,
    severity: Severity,
    description: &'a str,
}

impl<'a> AggregateKey<'a> {
    fn of(item: &'a ReportItem) -> Self {
        Self {
            source_shape: item.source_shape.as_deref(),
            severity: item.severity,
            description: &item.description,
        }
    }
}

/// Produces aggregate views of reports.
#[derive(Debug, Clone, Copy)]
pub struct ReportAggregator<'l> {
    labels: &'l ReportLabels,
}

impl<'l> ReportAggregator<'l> {
    /// Creates an aggregator that annotates repeats using `labels`.
    #[must_use]
    pub fn new(labels: &'l ReportLabels) -> Self {
        Self { labels }
    }

    /// Returns the aggregate view of `report`.
    ///
    /// Items appear in the order their key was first seen; the first item of
    /// each key is kept as is, except that its description is prefixed with
    /// `[N occurrences] ` when the key was seen N > 1 times.
    #[must_use]
    pub fn aggregate(&self, report: &StructuredReport) -> StructuredReport {
        let mut positions: HashMap<AggregateKey<'_>, usize> = HashMap::new();
        let mut groups: Vec<(&ReportItem, usize)> = Vec::new();
        for item in &report.items {
            let index = *positions.entry(AggregateKey::of(item)).or_insert_with(|| {
                groups.push((item, 0));
                groups.len() - 1
            });
            groups[index].1 += 1;
        }

        let items = groups
            .into_iter()
            .map(|(first, count)| {
                let mut item = first.clone();
                if count > 1 {
                    item.description = format!(
                        "[{}] {}",
                        self.labels.occurrence_label(count),
                        item.description
                    );
                }
                item
            })
            .collect();

        StructuredReport {
            name: report.name.clone(),
            result: report.result,
            counters: report.counters,
            items,
            context: report.context.clone(),
        }
    }
}

/// Returns the aggregate view of `report` using the default labels.
#[must_use]
pub fn aggregate(report: &StructuredReport) -> StructuredReport {
    ReportAggregator::new(&ReportLabels::default()).aggregate(report)
}
