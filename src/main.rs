use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the hold order for one bomb
    Solve(cmd::solve::SolveArgs),
    /// List the switch catalog
    Catalog(cmd::catalog::CatalogArgs),
    /// Run many random rounds and summarise them
    Survey(cmd::survey::SurveyArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args),
        Commands::Catalog(args) => cmd::catalog::run(args),
        Commands::Survey(args) => cmd::survey::run(args),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}
