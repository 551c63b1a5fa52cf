use clap::Parser;
use miette::Result;
use tolstack::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    // Logs go to stderr so stdout stays machine-readable
    let filter =
        EnvFilter::try_from_env("TOLSTACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show(args) => tolstack::cli::commands::show::run(args, &cli.global),
        Commands::Sample(args) => tolstack::cli::commands::sample::run(args, &cli.global),
        Commands::Check(args) => tolstack::cli::commands::check::run(args, &cli.global),
    }
}
