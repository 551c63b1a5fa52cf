//! `tolstack show` command - Display dimension properties

use std::io;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{load_definition, smart_round};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{DimensionSet, DimensionSnapshot, StackDefinition};

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Stack definition file (YAML or JSON)
    pub file: PathBuf,

    /// Dimensions to show (default: all, sorted by name)
    pub names: Vec<String>,
}

/// One dimension's properties, tagged with its name
#[derive(Debug, Clone, Serialize)]
pub struct DimensionReport {
    pub name: String,
    pub kind: &'static str,
    pub units: String,
    #[serde(flatten)]
    pub values: DimensionSnapshot,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "KIND")]
    kind: &'static str,
    #[tabled(rename = "BASIC")]
    basic: f64,
    #[tabled(rename = "+TOL")]
    upper_tol: f64,
    #[tabled(rename = "-TOL")]
    lower_tol: f64,
    #[tabled(rename = "LOWER")]
    lower_limit: f64,
    #[tabled(rename = "UPPER")]
    upper_limit: f64,
    #[tabled(rename = "MID")]
    midpoint: f64,
    #[tabled(rename = "TOL")]
    tolerance: f64,
}

const HEADER: [&str; 9] = [
    "name",
    "kind",
    "basic",
    "upper_tol",
    "lower_tol",
    "lower_limit",
    "upper_limit",
    "midpoint",
    "tolerance",
];

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (definition, set) = load_definition(&args.file)?;
    let reports = collect_reports(&definition, &set, &args.names)?;

    match effective_format(global.format, true) {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&reports).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Tsv => write_delimited(&reports, b'\t')?,
        OutputFormat::Csv => write_delimited(&reports, b',')?,
        OutputFormat::Table | OutputFormat::Auto => {
            let rows = reports.iter().map(|r| ReportRow {
                name: r.name.clone(),
                kind: r.kind,
                basic: smart_round(r.values.basic),
                upper_tol: smart_round(r.values.upper_tol),
                lower_tol: smart_round(r.values.lower_tol),
                lower_limit: smart_round(r.values.lower_limit),
                upper_limit: smart_round(r.values.upper_limit),
                midpoint: smart_round(r.values.midpoint),
                tolerance: smart_round(r.values.tolerance),
            });
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
            println!("Units: {}", set.units());
        }
    }

    Ok(())
}

/// Snapshot the requested dimensions, or all of them when `names` is empty
pub fn collect_reports(
    definition: &StackDefinition,
    set: &DimensionSet,
    names: &[String],
) -> Result<Vec<DimensionReport>> {
    let selected: Vec<&str> = if names.is_empty() {
        set.names().collect()
    } else {
        names.iter().map(|n| n.as_str()).collect()
    };

    selected
        .into_iter()
        .map(|name| -> Result<DimensionReport> {
            let dim = set.require(name)?;
            Ok(DimensionReport {
                name: name.to_string(),
                kind: if definition.is_derived(name) {
                    "derived"
                } else {
                    "leaf"
                },
                units: set.units().to_string(),
                values: DimensionSnapshot::of(&**dim),
            })
        })
        .collect()
}

fn write_delimited(reports: &[DimensionReport], delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(io::stdout().lock());
    writer.write_record(HEADER).into_diagnostic()?;

    for r in reports {
        let v = &r.values;
        let record = [
            r.name.clone(),
            r.kind.to_string(),
            smart_round(v.basic).to_string(),
            smart_round(v.upper_tol).to_string(),
            smart_round(v.lower_tol).to_string(),
            smart_round(v.lower_limit).to_string(),
            smart_round(v.upper_limit).to_string(),
            smart_round(v.midpoint).to_string(),
            smart_round(v.tolerance).to_string(),
        ];
        writer.write_record(&record).into_diagnostic()?;
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
