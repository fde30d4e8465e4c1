//! Result record extraction.
//!
//! Walks a raw result graph and yields normalized [`ResultRecord`]s plus the
//! graph's conformance flag. Extraction never fails: an absent graph, or one
//! that cannot be read, is reported as `graph_present == false` and left to
//! the assembler to turn into the engine failure item.

use tracing::{debug, warn};

use crate::model::{ResultRecord, Severity};
use crate::source::{RawResult, ResultGraph};

/// Records extracted from one result graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// False if no result graph was produced, i.e. the engine failed.
    pub graph_present: bool,
    /// The graph's `sh:conforms` flag. A missing flag reads as false.
    pub conforms: bool,
    /// Result records in discovery order. Always empty when `conforms` is true.
    pub records: Vec<ResultRecord>,
}

impl Extraction {
    /// The extraction of an engine run that produced no result graph.
    #[must_use]
    pub fn engine_failure() -> Self {
        Self::default()
    }

    /// An extraction built from already normalized records.
    ///
    /// `conforms` is derived: true iff there are no records.
    #[must_use]
    pub fn from_records(records: Vec<ResultRecord>) -> Self {
        Self {
            graph_present: true,
            conforms: records.is_empty(),
            records,
        }
    }
}

/// Extracts the result records of a result graph.
///
/// A conforming graph yields no records, whatever result nodes it carries.
pub fn extract<G>(graph: Option<&G>) -> Extraction
where
    G: ResultGraph + ?Sized,
{
    let Some(graph) = graph else {
        debug!("No result graph produced");
        return Extraction::engine_failure();
    };

    let conforms = match graph.conforms() {
        Ok(flag) => flag.unwrap_or(false),
        Err(err) => {
            warn!(error = %err, "Unable to read the conformance flag of the result graph");
            return Extraction::engine_failure();
        }
    };
    if conforms {
        return Extraction {
            graph_present: true,
            conforms,
            records: Vec::new(),
        };
    }

    match graph.results() {
        Ok(results) => {
            let records: Vec<ResultRecord> = results.into_iter().map(normalize).collect();
            debug!(records = records.len(), "Extracted validation results");
            Extraction {
                graph_present: true,
                conforms,
                records,
            }
        }
        Err(err) => {
            warn!(error = %err, "Unable to read the results of the result graph");
            Extraction::engine_failure()
        }
    }
}

/// Normalizes one raw result node into a record.
#[must_use]
pub fn normalize(raw: RawResult) -> ResultRecord {
    ResultRecord {
        severity: Severity::from_iri(raw.severity.as_deref()),
        focus_node: raw.focus_node,
        result_path: raw.result_path,
        messages: raw.messages,
        source_shape: raw.source_shape,
        source_constraint_component: raw.source_constraint_component,
        value: raw.value,
    }
}
