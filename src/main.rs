use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rulecheck_rs::rules::loader::ConfigLoader;
use rulecheck_rs::rules::runner::RuleRunner;
use rulecheck_rs::RuleInterpreter;

use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run every test case of a run configuration
    Run {
        /// Path to the run configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Pretty-print the report
        #[arg(short, long)]
        pretty: bool,

        /// Exit successfully even when some rules fail
        #[arg(long)]
        allow_failures: bool,
    },
    /// Evaluate one rule given as tokens after `--`
    Eval {
        /// Path to the run configuration providing the snapshots
        #[arg(short, long)]
        config: PathBuf,

        /// Rule tokens, e.g. -- "{1}.location" = "'eastus'"
        #[arg(last = true, required = true)]
        tokens: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let loader = ConfigLoader::new();

    match args.command {
        Commands::Run {
            config,
            pretty,
            allow_failures,
        } => {
            let run_config = loader
                .load(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            ConfigLoader::require_testcases(&run_config)?;
            let store = ConfigLoader::load_snapshots(&run_config).await?;

            let runner = RuleRunner::new(Arc::new(store), run_config.context());
            let report = runner.run(&run_config.testcases).await?;

            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", json);

            if !report.all_passed() && !allow_failures {
                std::process::exit(1);
            }
        }
        Commands::Eval { config, tokens } => {
            let run_config = loader
                .load(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            let store = ConfigLoader::load_snapshots(&run_config).await?;

            let mut interpreter = RuleInterpreter::new(tokens, Arc::new(store), run_config.context());
            let passed = interpreter.compare().await?;

            println!("Result: {}", if passed { "passed" } else { "failed" });
            for record in interpreter.lineage() {
                println!("  snapshot {} ({}) {}", record.id, record.source, record.path);
            }
        }
    }

    Ok(())
}
