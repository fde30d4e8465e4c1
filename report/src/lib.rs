//! SHACL validation report synthesis.
//!
//! The `shacl-report` crate turns the raw RDF output of a SHACL engine into a
//! structured report for humans and API clients: one item per finding with a
//! message in the requested language, optional additional information about
//! the offending resource, counters per severity and an overall result.
//! Reports of several engine runs can be merged, and repeated findings can be
//! collapsed into an aggregate view.
//!
//! # Entry Point
//!
//! ```
//! use shacl_report::{
//!     generate, LocalizedText, MemoryResultGraph, NoAdditionalInfo, RawResult, ReportConfig,
//!     TestOutcome,
//! };
//!
//! # fn main() -> shacl_report::Result<()> {
//! let settings = ReportConfig::from_toml("locale = \"de\"\naggregate = true")?.into_settings()?;
//! let results = MemoryResultGraph::new(false).with_result(RawResult {
//!     messages: vec![
//!         LocalizedText::tagged("en", "Value is missing"),
//!         LocalizedText::tagged("de", "Wert fehlt"),
//!     ],
//!     ..RawResult::default()
//! });
//!
//! let pair = generate(Some(&results), &mut NoAdditionalInfo, &settings, None);
//! assert_eq!(pair.detailed.result, TestOutcome::Failure);
//! assert_eq!(pair.detailed.items[0].description, "Wert fehlt");
//! assert!(pair.aggregate.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Graphs
//!
//! The core reads graphs through the [`ResultGraph`] and [`ResourceLookup`]
//! traits. [`rdf`] adapts any `sophia` graph to both.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod additional_info;
pub mod aggregate;
pub mod assemble;
pub mod config;
pub mod error;
pub mod extract;
pub mod locale;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod rdf;
pub mod source;
pub mod vocab;

pub use additional_info::{
    AdditionalInfo, AdditionalInfoResolver, AdditionalInfoTemplates, NoAdditionalInfo,
    TemplateDefinition,
};
pub use aggregate::{aggregate, ReportAggregator};
pub use assemble::ReportAssembler;
pub use config::{ReportConfig, ReportLabels, ReportSettings};
pub use error::{ReportError, Result};
pub use extract::{extract, Extraction};
pub use locale::{Locale, MessagePool, Translation};
pub use merge::merge;
pub use model::{
    Counters, LocalizedText, ReportContext, ReportItem, ReportPair, ResultRecord, Severity,
    StructuredReport, Term, TestOutcome,
};
pub use pipeline::{generate, generate_all};
pub use rdf::{RdfInputGraph, RdfResultGraph};
pub use source::{MemoryResultGraph, RawResult, ResourceLookup, ResultGraph};
