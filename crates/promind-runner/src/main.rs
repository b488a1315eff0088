use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::{sleep, Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use promind_db::{DatabaseConfig, DatabaseReader, DatabaseWriter};
use promind_orchestrator::OptimizerConfig;
use promind_types::DEFAULT_TASK_TYPE;

mod context;
mod seed;

use context::AppContext;

/// A command-line runner for the promind optimization service.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the promind database file
    #[arg(long, default_value = "db/promind.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register agents and bootstrap prompts from a YAML seed file
    Seed {
        /// Path to the seed file
        #[arg(long, default_value = "seeds/agents.yml")]
        file: PathBuf,
    },

    /// Run the optimization loop for one or all optimization-enabled agents
    Optimize {
        /// Optimize only this agent
        #[arg(long)]
        agent: Option<String>,

        /// Repeat cycles on the configured interval instead of exiting
        #[arg(long)]
        watch: bool,

        /// Passing score threshold on the 1-10 scale
        #[arg(long)]
        passing_score: Option<u8>,

        /// Attempts per agent before the loop gives up
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// Interactive chat: `agent: <name> | input: <text>`, or plain text for the default agent
    Chat,

    /// Show registered agents with their active prompt versions and scores
    List,

    /// Show recent run records for an agent
    Runs {
        /// Agent name
        #[arg(long)]
        agent: String,

        /// Number of records to show
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,promind_db=info,promind_orchestrator=info")),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file in the current directory.
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let store = Arc::new(
        DatabaseWriter::new(DatabaseConfig::new(cli.db.to_string_lossy()))
            .await
            .context("Failed to open database")?,
    );

    match cli.command {
        Commands::Seed { file } => {
            let report = seed::seed_from_file(&store, &file).await?;
            println!(
                "Seeded {} agents ({} prompts ensured) from {}",
                report.agents, report.prompts, file.display()
            );
        }

        Commands::Optimize {
            agent,
            watch,
            passing_score,
            max_attempts,
        } => {
            let mut config = OptimizerConfig::default();
            if let Ok(url) = std::env::var("PROMIND_WEBHOOK_URL") {
                if !url.is_empty() {
                    config = config.with_webhook_url(url);
                }
            }
            if let Some(score) = passing_score {
                config = config.with_passing_score(score);
            }
            if let Some(attempts) = max_attempts {
                config = config.with_max_attempts(attempts);
            }
            let config = config.validated()?;

            let ctx = AppContext::new(store, config);
            run_optimize(&ctx, agent.as_deref(), watch).await?;
        }

        Commands::Chat => {
            let ctx = AppContext::new(store, OptimizerConfig::default());
            run_chat(&ctx).await?;
        }

        Commands::List => run_list(&store).await?,

        Commands::Runs { agent, limit } => {
            let reader = DatabaseReader::new(store.connection().clone());
            run_history(&reader, &agent, limit).await?;
        }
    }

    Ok(())
}

async fn run_optimize(ctx: &AppContext, agent: Option<&str>, watch: bool) -> Result<()> {
    loop {
        let controller = ctx.build_controller().await?;

        match agent {
            Some(name) => {
                let definition = ctx.store.get_agent(name).await?;
                let input =
                    promind_orchestrator::OptimizationController::test_input_for(&definition);
                match controller.optimize_agent(&definition, &input).await {
                    Ok(outcome) => println!(
                        "{}: {} after {} attempt(s), score {}, prompt v{}",
                        outcome.agent_name,
                        outcome.halt,
                        outcome.attempts,
                        outcome.final_score,
                        outcome.final_version
                    ),
                    Err(e) => error!("Failed to optimize '{name}': {e:#}"),
                }
            }
            None => {
                let outcomes = controller.optimize_all().await?;
                for outcome in &outcomes {
                    println!(
                        "{}: {} after {} attempt(s), score {}, prompt v{}",
                        outcome.agent_name,
                        outcome.halt,
                        outcome.attempts,
                        outcome.final_score,
                        outcome.final_version
                    );
                }
            }
        }

        if !watch {
            break;
        }
        info!(
            "Waiting {}s until next optimization cycle...",
            ctx.config.cycle_interval_secs
        );
        sleep(Duration::from_secs(ctx.config.cycle_interval_secs)).await;
    }

    Ok(())
}

async fn run_chat(ctx: &AppContext) -> Result<()> {
    let gateway = ctx.build_gateway();

    println!("--- Promind Chat ---");
    println!("Address an agent with `agent: <name> | input: <text>`; plain text goes to '{}'.", ctx.config.default_agent);
    println!("Type `exit` to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if !line.is_empty() {
            match gateway.handle_message(&line).await {
                Ok(output) => println!("{output}"),
                Err(e) => println!("Error: {e:#}"),
            }
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}

async fn run_list(store: &DatabaseWriter) -> Result<()> {
    let agents = store.list_agents(false).await?;
    if agents.is_empty() {
        println!("No agents registered. Run `promind-runner seed` first.");
        return Ok(());
    }

    println!("{:<20} {:<12} {:<10} {:>8} {:>8}  goal", "name", "role", "optimize", "prompt", "score");
    for agent in agents {
        let (version, score) = match store.get_latest_prompt(&agent.name, DEFAULT_TASK_TYPE).await {
            Ok(prompt) => (
                format!("v{}", prompt.version),
                prompt
                    .effectiveness_score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Err(_) => ("-".to_string(), "-".to_string()),
        };
        println!(
            "{:<20} {:<12} {:<10} {:>8} {:>8}  {}",
            agent.name,
            agent.role.to_string(),
            if agent.optimize_prompt { "yes" } else { "no" },
            version,
            score,
            agent.goal
        );
    }

    Ok(())
}

async fn run_history(reader: &DatabaseReader, agent: &str, limit: i64) -> Result<()> {
    let runs = reader.get_recent_runs(agent, limit).await?;
    if runs.is_empty() {
        println!("No runs recorded for '{agent}'.");
        return Ok(());
    }

    for run in runs {
        println!(
            "[{}] v{} {} score={} input={:?}",
            run.created_at.format("%Y-%m-%d %H:%M:%S"),
            run.prompt_version,
            if run.is_successful { "ok" } else { "FAILED" },
            run.effectiveness_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            truncate(&run.input, 60),
        );
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}…")
    }
}
