mod advice_cmds;
mod config;
mod deliver;
mod discover_cmd;
mod pivot_cmd;
mod render;
mod roadmap_cmds;
mod star_cmds;
mod tui;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use innings_core::generate::CheckIn;
use innings_core::intake::{
    ConstraintTag, DEFAULT_SPORT, FinancialUrgency, Level, LockerRoomRole, PhysicalCapacity,
};
use innings_db::models::{FlowKind, OpportunityCategory};
use innings_db::pool;

use config::InningsConfig;
use deliver::ResultOptions;
use pivot_cmd::PivotAnswers;

#[derive(Parser)]
#[command(
    name = "innings",
    version,
    about = "Second Innings: career roadmaps for athletes"
)]
struct Cli {
    /// Database URL (overrides INNINGS_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Answer every generation request with this payload file
    #[arg(long, global = true, value_name = "FILE")]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write an innings config file (no database required)
    Init {
        /// SQLite database URL
        #[arg(long)]
        db_url: Option<String>,
        /// Bridge executable that answers generation requests
        #[arg(long)]
        provider_command: Option<String>,
        /// Argument passed to the bridge (repeatable)
        #[arg(long = "provider-arg", value_name = "ARG")]
        provider_args: Vec<String>,
        /// Environment variable holding the provider API key
        #[arg(long)]
        api_key_env: Option<String>,
        /// Generation deadline in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create and migrate the locker database
    DbInit,
    /// Development roadmap for an aspiring athlete
    Discover {
        /// Sport played
        #[arg(long, default_value = DEFAULT_SPORT)]
        sport: String,
        /// Age in years
        #[arg(long)]
        age: String,
        /// Current level: Beginner, Intermediate, Advanced, Elite
        #[arg(long, default_value = "Beginner")]
        level: Level,
        /// What the athlete wants to achieve
        #[arg(long)]
        goal: String,
        #[command(flatten)]
        options: ResultOptions,
    },
    /// Career pivot plan for an athlete leaving competitive sport
    Pivot {
        /// Sport played
        #[arg(long, default_value = DEFAULT_SPORT)]
        sport: String,
        /// Years played at a competitive level
        #[arg(long)]
        years: String,
        /// Reason for moving on (repeatable), e.g. "Acute Injury", "Burnout/Mental Fatigue"
        #[arg(long = "constraint", value_name = "TAG")]
        constraints: Vec<ConstraintTag>,
        /// Identity score, 1 (adaptable) to 10 (the sport is who I am)
        #[arg(long, default_value_t = 5)]
        identity: u8,
        /// Physical capacity: field, desk, mixed
        #[arg(long, default_value = "mixed")]
        physical: PhysicalCapacity,
        /// Locker-room role: strategist, motivator, technician
        #[arg(long, default_value = "strategist")]
        role: LockerRoomRole,
        /// Financial urgency: immediate, stable, study
        #[arg(long, default_value = "stable")]
        urgency: FinancialUrgency,
        #[command(flatten)]
        options: ResultOptions,
    },
    /// Saved roadmap management
    Roadmap {
        #[command(subcommand)]
        command: RoadmapCommands,
    },
    /// Starred opportunities
    Star {
        #[command(subcommand)]
        command: StarCommands,
    },
    /// Check eligibility for a government scheme
    Eligibility {
        /// Short description of the athlete
        #[arg(long)]
        profile: String,
        /// Scheme name
        #[arg(long)]
        scheme: String,
    },
    /// Translate an on-field role into corporate skills
    Skills {
        #[arg(long, default_value = DEFAULT_SPORT)]
        sport: String,
        /// Position or role played, e.g. "wicket-keeper"
        #[arg(long)]
        role: String,
    },
    /// Well-being check-in for retired athletes
    Support {
        /// Time since retirement, e.g. "6 months"
        #[arg(long)]
        since: String,
        /// What you miss most about competing
        #[arg(long)]
        misses: String,
        /// Clarity of purpose, 1 to 10
        #[arg(long, default_value_t = 5)]
        clarity: u8,
        /// Current mood
        #[arg(long)]
        mood: String,
    },
    /// Browse the locker interactively
    Locker {
        /// Directory that exports are written to
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum RoadmapCommands {
    /// List saved roadmaps, newest first
    List {
        /// Only roadmaps from this flow (discovery or pivot)
        #[arg(long)]
        flow: Option<FlowKind>,
        /// Only roadmaps for this sport
        #[arg(long)]
        sport: Option<String>,
        /// Oldest first
        #[arg(long)]
        oldest_first: bool,
    },
    /// Show a saved roadmap
    Show {
        id: i64,
        /// Show every phase expanded
        #[arg(long)]
        expand_all: bool,
    },
    /// Export a saved roadmap as Markdown
    Export {
        id: i64,
        /// Output file or directory (defaults to a title-derived name here)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete a saved roadmap
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum StarCommands {
    /// Star an opportunity, or unstar it if already starred
    Toggle {
        /// Catalog id, e.g. sai-pension
        id: String,
        /// pension, scholarship, or job
        #[arg(long)]
        category: OpportunityCategory,
        /// Display title (defaults to the id)
        #[arg(long)]
        title: Option<String>,
    },
    /// List starred opportunities
    List {
        #[arg(long)]
        category: Option<OpportunityCategory>,
    },
}

/// Execute the `innings init` command: write config file.
fn cmd_init(
    db_url: Option<String>,
    provider: config::ProviderSection,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection { url: db_url },
        provider,
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    if let Some(url) = &cfg.database.url {
        println!("  database.url = {url}");
    }
    match &cfg.provider.command {
        Some(command) => println!("  provider.command = {command}"),
        None => println!("  provider.command is unset; pass --fixture <file> to generate offline"),
    }
    println!();
    println!("Next: run `innings db-init` to create the locker database.");

    Ok(())
}

/// Execute the `innings db-init` command: create database and run migrations.
async fn cmd_db_init(resolved: &InningsConfig) -> anyhow::Result<()> {
    println!("Initializing locker database...");

    pool::ensure_database_exists(&resolved.db_config).await?;
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("innings db-init complete.");
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let resolve = || InningsConfig::resolve(cli.database_url.as_deref(), cli.fixture.as_deref());

    match cli.command {
        Commands::Init {
            db_url,
            provider_command,
            provider_args,
            api_key_env,
            timeout_secs,
            force,
        } => {
            let provider = config::ProviderSection {
                command: provider_command,
                args: provider_args,
                api_key_env,
                timeout_secs,
            };
            cmd_init(db_url, provider, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(&resolve()?).await?;
        }
        Commands::Discover {
            sport,
            age,
            level,
            goal,
            options,
        } => {
            let resolved = resolve()?;
            discover_cmd::run_discover(&resolved, sport, age, level, goal, &options).await?;
        }
        Commands::Pivot {
            sport,
            years,
            constraints,
            identity,
            physical,
            role,
            urgency,
            options,
        } => {
            let resolved = resolve()?;
            let answers = PivotAnswers {
                sport,
                years_played: years,
                constraints,
                identity_score: identity,
                physical_capacity: physical,
                role,
                financial_urgency: urgency,
            };
            pivot_cmd::run_pivot(&resolved, &answers, &options).await?;
        }
        Commands::Roadmap { command } => {
            let resolved = resolve()?;
            let store = innings_db::open_store(&resolved.db_config).await?;
            let result = roadmap_cmds::run_roadmap_command(command, &store).await;
            store.close().await;
            result?;
        }
        Commands::Star { command } => {
            let resolved = resolve()?;
            let store = innings_db::open_store(&resolved.db_config).await?;
            let result = star_cmds::run_star_command(command, &store).await;
            store.close().await;
            result?;
        }
        Commands::Eligibility { profile, scheme } => {
            let client = resolve()?.generation_client().await?;
            advice_cmds::run_eligibility(&client, &profile, &scheme).await?;
        }
        Commands::Skills { sport, role } => {
            let client = resolve()?.generation_client().await?;
            advice_cmds::run_skills(&client, &sport, &role).await?;
        }
        Commands::Support {
            since,
            misses,
            clarity,
            mood,
        } => {
            if !(1..=10).contains(&clarity) {
                anyhow::bail!("clarity must be between 1 and 10, got {clarity}");
            }
            let client = resolve()?.generation_client().await?;
            let check_in = CheckIn {
                time_since_retirement: since,
                misses_most: misses,
                purpose_clarity: clarity,
                mood,
            };
            advice_cmds::run_support(&client, &check_in).await?;
        }
        Commands::Locker { export_dir } => {
            let resolved = resolve()?;
            let store = innings_db::open_store(&resolved.db_config)
                .await
                .context("cannot open the locker")?;
            let result = tui::run_locker(store.clone(), export_dir).await;
            store.close().await;
            result?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
