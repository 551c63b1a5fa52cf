//! `tolstack sample` command - Emit raw Monte Carlo draws

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::cli::helpers::load_definition;
use crate::cli::GlobalOpts;
use crate::core::Dimension;

#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    /// Stack definition file (YAML or JSON)
    pub file: PathBuf,

    /// Dimension to sample
    pub name: String,

    /// Number of draws
    #[arg(long, short = 'n', default_value_t = 1000)]
    pub count: u32,

    /// Seed for reproducible draws
    #[arg(long, env = "TOLSTACK_SEED")]
    pub seed: Option<u64>,
}

pub fn run(args: SampleArgs, _global: &GlobalOpts) -> Result<()> {
    let (_, set) = load_definition(&args.file)?;
    let dim = set.require(&args.name)?;

    let mut seeded;
    let mut thread;
    let rng: &mut dyn RngCore = match args.seed {
        Some(seed) => {
            seeded = StdRng::seed_from_u64(seed);
            &mut seeded
        }
        None => {
            thread = rand::rng();
            &mut thread
        }
    };

    tracing::debug!(name = %args.name, count = args.count, seed = ?args.seed, "sampling");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    draw_into(&mut out, &**dim, rng, args.count).into_diagnostic()?;
    out.flush().into_diagnostic()?;
    Ok(())
}

/// Write `count` draws of `dim`, one per line
pub fn draw_into<W: Write>(
    out: &mut W,
    dim: &dyn Dimension,
    rng: &mut dyn RngCore,
    count: u32,
) -> io::Result<()> {
    for _ in 0..count {
        writeln!(out, "{}", dim.sample_with(rng))?;
    }
    Ok(())
}
