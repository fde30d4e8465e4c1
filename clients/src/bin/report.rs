//! `shacl-report`: synthesizes a structured report from SHACL validation results.
//!
//! Reads one SHACL result graph per shape set (Turtle), optionally the
//! validated input graph for additional info, and prints the merged report as
//! JSON on stdout. Logs go to stderr and are filtered with `RUST_LOG`.
//!
//! **Usage:**
//! ```
//! shacl-report --results <ttl>... [--input <ttl>] [--config <toml>] [--locale <tag>]
//!              [--aggregate] [--ordered] [--attach-input] [--attach-shapes <ttl>...]
//!              [--attach-report] [--output detailed|aggregate|both]
//! ```
//!
//! Exits non-zero if the merged result is a failure.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shacl_report::{
    generate_all, AdditionalInfo, AdditionalInfoResolver, NoAdditionalInfo, RdfInputGraph,
    RdfResultGraph, ReportConfig, ReportContext,
};
use sophia_api::source::TripleSource;
use sophia_inmem::graph::LightGraph;
use sophia_turtle::parser::turtle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Which report views to print.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Every finding.
    Detailed,
    /// Repeated findings collapsed.
    Aggregate,
    /// Both views.
    Both,
}

/// Synthesize a structured SHACL validation report.
#[derive(Parser)]
#[command(
    name = "shacl-report",
    about = "Synthesize a structured report from SHACL validation results"
)]
struct Args {
    /// SHACL result graphs (Turtle), one per validated shape set.
    #[arg(long, required = true, num_args = 1..)]
    results: Vec<PathBuf>,

    /// The validated input graph (Turtle), used for additional info.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Report settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Locale to select messages for, overriding the settings file.
    #[arg(long)]
    locale: Option<String>,

    /// Also produce the aggregate view.
    #[arg(long)]
    aggregate: bool,

    /// Order findings by severity.
    #[arg(long)]
    ordered: bool,

    /// Attach the input graph text to the report.
    #[arg(long)]
    attach_input: bool,

    /// Shape files whose text is attached to the report.
    #[arg(long, num_args = 1..)]
    attach_shapes: Vec<PathBuf>,

    /// Attach the text of the SHACL result graphs to the report.
    #[arg(long)]
    attach_report: bool,

    /// Report views to print.
    #[arg(long, value_enum, default_value = "both")]
    output: Output,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match args.config.as_deref() {
        Some(path) => ReportConfig::from_toml(&read_text(path)?)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(locale) = &args.locale {
        config.locale = locale.clone();
    }
    config.aggregate |= args.aggregate || args.output == Output::Aggregate;
    config.ordered |= args.ordered;
    let settings = config.into_settings().context("Invalid report settings")?;

    let result_files: Vec<ResultFile> = args.results.iter().map(|p| read_results(p)).collect();
    let sources: Vec<Option<RdfResultGraph<'_, LightGraph>>> = result_files
        .iter()
        .map(|file| file.graph.as_ref().map(RdfResultGraph::new))
        .collect();
    let runs: Vec<Option<&RdfResultGraph<'_, LightGraph>>> =
        sources.iter().map(Option::as_ref).collect();

    let input_text = args.input.as_deref().map(read_text).transpose()?;
    let input_graph = input_text
        .as_deref()
        .map(|text| parse_turtle(text).context("Failed to parse the input graph"))
        .transpose()?;

    let shapes = args
        .attach_shapes
        .iter()
        .map(|path| read_text(path))
        .collect::<Result<Vec<_>>>()?;
    let reports: Vec<String> = if args.attach_report {
        result_files.iter().filter_map(|f| f.text.clone()).collect()
    } else {
        Vec::new()
    };
    let attached_input = if args.attach_input {
        input_text.clone()
    } else {
        None
    };
    let context = report_context(attached_input, &shapes, &reports);

    let lookup = input_graph.as_ref().map(RdfInputGraph::new);
    let mut resolver = lookup
        .as_ref()
        .map(|lookup| AdditionalInfoResolver::new(&settings.templates, lookup));
    let mut no_info = NoAdditionalInfo;
    let additional_info: &mut dyn AdditionalInfo = match resolver.as_mut() {
        Some(resolver) => resolver,
        None => &mut no_info,
    };

    let pair = generate_all(&runs, additional_info, &settings, context);
    info!(
        result = ?pair.detailed.result,
        errors = pair.detailed.counters.errors,
        warnings = pair.detailed.counters.warnings,
        infos = pair.detailed.counters.infos,
        "Report generated"
    );

    let json = match args.output {
        Output::Detailed => serde_json::to_string_pretty(&pair.detailed),
        Output::Aggregate => serde_json::to_string_pretty(&pair.aggregate),
        Output::Both => serde_json::to_string_pretty(&pair),
    }
    .context("Failed to serialize the report")?;
    println!("{json}");

    if pair.detailed.is_failure() {
        process::exit(1);
    }
    Ok(())
}

/// One `--results` file: its text if readable, its graph if parseable.
struct ResultFile {
    text: Option<String>,
    graph: Option<LightGraph>,
}

/// Reads one result graph. A file that cannot be read or parsed stands for
/// an engine run that produced no result graph.
fn read_results(path: &Path) -> ResultFile {
    let text = match read_text(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "Unreadable result graph"
            );
            return ResultFile {
                text: None,
                graph: None,
            };
        }
    };
    let graph = match parse_turtle(&text) {
        Ok(graph) => Some(graph),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "Unusable result graph"
            );
            None
        }
    };
    ResultFile {
        text: Some(text),
        graph,
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn parse_turtle(text: &str) -> Result<LightGraph> {
    turtle::parse_str(text)
        .collect_triples::<LightGraph>()
        .map_err(|err| anyhow::anyhow!("Invalid Turtle: {err}"))
}

/// Builds the attached content of the report; several documents of one kind
/// are joined with a newline. Returns `None` when nothing is attached.
fn report_context(
    input: Option<String>,
    shapes: &[String],
    reports: &[String],
) -> Option<ReportContext> {
    let join = |parts: &[String]| (!parts.is_empty()).then(|| parts.join("\n"));
    let context = ReportContext {
        input,
        shapes: join(shapes),
        report: join(reports),
    };
    (!context.is_empty()).then_some(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_attached_gives_no_context() {
        assert_eq!(report_context(None, &[], &[]), None);
    }

    #[test]
    fn shapes_and_reports_are_attached() {
        let shapes = vec!["ex:A a sh:NodeShape .".to_string(), "ex:B".to_string()];
        let reports = vec!["[] sh:conforms true .".to_string()];
        let context = report_context(Some("ex:a ex:b ex:c .".to_string()), &shapes, &reports);
        assert_eq!(
            context,
            Some(ReportContext {
                input: Some("ex:a ex:b ex:c .".to_string()),
                shapes: Some("ex:A a sh:NodeShape .\nex:B".to_string()),
                report: Some("[] sh:conforms true .".to_string()),
            })
        );
    }

    #[test]
    fn unreadable_result_file_has_no_graph() {
        let file = read_results(Path::new("/nonexistent/results.ttl"));
        assert!(file.text.is_none());
        assert!(file.graph.is_none());
    }

    #[test]
    fn args_accept_attachments() {
        let args = Args::parse_from([
            "shacl-report",
            "--results",
            "a.ttl",
            "b.ttl",
            "--attach-shapes",
            "shapes.ttl",
            "--attach-report",
        ]);
        assert_eq!(args.results.len(), 2);
        assert_eq!(args.attach_shapes, vec![PathBuf::from("shapes.ttl")]);
        assert!(args.attach_report);
        assert!(!args.attach_input);
    }
}
