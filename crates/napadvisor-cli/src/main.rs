use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "napadvisor", version, about = "Should I nap right now?")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a nap recommendation
    Recommend(commands::recommend::RecommendArgs),
    /// Show the rules recommendations are based on
    Guide {
        /// Print the rule tables as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let result = match cli.command {
        Commands::Recommend(args) => commands::recommend::run(args),
        Commands::Guide { json } => commands::guide::run(json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
