//! `tolstack check` command - Validate a definition and its stacks

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{load_definition, smart_round};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{DimensionExt, DimensionSet, StackDefinition};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Stack definition file (YAML or JSON)
    pub file: PathBuf,

    /// Strict mode - negative stack tolerances become errors
    #[arg(long)]
    pub strict: bool,
}

/// A stack whose composed tolerances went negative
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToleranceFinding {
    pub name: String,
    pub upper_tol: f64,
    pub lower_tol: f64,
}

/// Machine-readable result for `--format json|yaml`
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    file: String,
    dimensions: usize,
    findings: &'a [ToleranceFinding],
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let (definition, set) = load_definition(&args.file)?;
    let findings = find_negative_tolerances(&definition, &set);

    for finding in &findings {
        tracing::warn!(
            name = %finding.name,
            upper_tol = finding.upper_tol,
            lower_tol = finding.lower_tol,
            "stack tolerance is negative"
        );
    }

    match global.format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let report = CheckReport {
                file: args.file.display().to_string(),
                dimensions: set.len(),
                findings: &findings,
            };
            if global.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
            } else {
                print!("{}", serde_yml::to_string(&report).into_diagnostic()?);
            }
        }
        // auto, table, csv and tsv all print text
        _ => print_summary(&args, set.len(), &findings),
    }

    if args.strict && !findings.is_empty() {
        return Err(miette::miette!(
            "{} stack(s) have negative tolerances",
            findings.len()
        ));
    }
    Ok(())
}

fn print_summary(args: &CheckArgs, count: usize, findings: &[ToleranceFinding]) {
    for finding in findings {
        println!("{} {}", style("!").yellow(), describe(finding));
    }

    if findings.is_empty() {
        println!(
            "{} {} dimension(s) OK in {}",
            style("✓").green(),
            count,
            args.file.display()
        );
    } else if !args.strict {
        println!(
            "{} {} dimension(s), {} warning(s)",
            style("→").blue(),
            count,
            findings.len()
        );
    }
}

/// One-line description with the signed tolerances
pub fn describe(finding: &ToleranceFinding) -> String {
    format!(
        "{} has negative tolerance (upper {} / lower {})",
        finding.name,
        smart_round(finding.upper_tol),
        smart_round(finding.lower_tol)
    )
}

/// Derived entries whose upper or lower tolerance is below zero
pub fn find_negative_tolerances(
    definition: &StackDefinition,
    set: &DimensionSet,
) -> Vec<ToleranceFinding> {
    set.iter()
        .filter(|(name, _)| definition.is_derived(name))
        .filter(|(_, dim)| dim.check_tolerances().is_err())
        .map(|(name, dim)| ToleranceFinding {
            name: name.to_string(),
            upper_tol: dim.upper_tol(),
            lower_tol: dim.lower_tol(),
        })
        .collect()
}
