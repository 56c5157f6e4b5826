//! Binary entrypoint for the Quest-Bot CLI.
//!
//! Commands:
//! - `init` - create a starter `questbot.toml` and the quest directory
//! - `play` - interactive quest session
//! - `generate --time .. --location .. --conditions .. --mood .. [--difficulty ..]` - issue a quest without prompts
//! - `list` - archive of stored quests
//! - `show <quest-id>` - narrative rendering of a stored quest
//!
//! See the library crate docs for module-level details: `questbot::`.
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use questbot::config::{Config, IdStrategy, DEFAULT_CONFIG_PATH};
use questbot::console::{
    write_briefing, Console, DEFAULT_CONDITIONS, DEFAULT_LOCATION, DEFAULT_MOOD, DEFAULT_TIME,
};
use questbot::quest::{
    render_narrative, Difficulty, Handler, IdAllocator, PlayerContext, QuestSession, QuestStore,
    SessionCounter, StoreCounter,
};

#[derive(Parser)]
#[command(name = "questbot")]
#[command(about = "Procedurally generated exploration quests from The Handler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file and create the quest directory
    Init,
    /// Start an interactive quest session
    Play,
    /// Generate and start a quest without prompting
    Generate {
        /// Time of day (morning, afternoon, evening, night)
        #[arg(long, default_value = DEFAULT_TIME)]
        time: String,
        /// Location (urban downtown, forest trail, suburban neighborhood, park)
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,
        /// Current conditions (sunny, rainy, foggy, snowy, cloudy)
        #[arg(long, default_value = DEFAULT_CONDITIONS)]
        conditions: String,
        /// Mood (adventurous, contemplative, energetic, mysterious, curious)
        #[arg(long, default_value = DEFAULT_MOOD)]
        mood: String,
        /// Assign a tier instead of classifying (reconnaissance, standard, challenging, legendary)
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
    },
    /// List stored quests with status and difficulty
    List,
    /// Print the narrative record of a stored quest
    Show {
        /// Mission ID, e.g. QUEST-20240315-001
        quest_id: String,
    },
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, String> {
    Difficulty::parse(raw).ok_or_else(|| {
        format!(
            "unknown difficulty '{}' (expected reconnaissance, standard, challenging or legendary)",
            raw
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing file is fine here; `init` writes it
    let config = Config::load_or_default(&cli.config)?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Init => init(&cli.config)?,
        Commands::Play => {
            info!("Starting Quest-Bot v{}", env!("CARGO_PKG_VERSION"));
            let store = open_store(&config)?;
            let handler = build_handler(&config, &store)?;
            let stdin = io::stdin();
            let mut console = Console::new(
                QuestSession::new(&store),
                handler,
                stdin.lock(),
                io::stdout(),
            );
            console.run()?;
        }
        Commands::Generate {
            time,
            location,
            conditions,
            mood,
            difficulty,
        } => {
            let store = open_store(&config)?;
            let mut handler = build_handler(&config, &store)?;
            let context = PlayerContext::new(time, location, conditions, mood);
            let quest = match difficulty {
                Some(tier) => handler.generate_quest_with_difficulty(&context, tier),
                None => handler.generate_quest(&context),
            };
            let mut session = QuestSession::new(&store);
            session.start_quest(quest)?;
            if let Some(quest) = session.active() {
                let mut out = io::stdout().lock();
                write_briefing(&mut out, quest)?;
                writeln!(
                    out,
                    "\nQuest saved to {}",
                    store.record_path(quest.quest_id())?.display()
                )?;
            }
        }
        Commands::List => {
            let store = open_store(&config)?;
            let summaries = store.summaries()?;
            if summaries.is_empty() {
                println!("No quest logs found in {}.", store.dir().display());
            }
            for summary in summaries {
                println!(
                    "{}  {:<11} {:<15} {}",
                    summary.quest_id,
                    summary.status_label(),
                    summary.difficulty.as_str().to_uppercase(),
                    summary.title
                );
            }
        }
        Commands::Show { quest_id } => {
            let store = open_store(&config)?;
            let record = store
                .load(&quest_id)?
                .ok_or_else(|| anyhow!("No quest found with ID {}", quest_id))?;
            print!("{}", render_narrative(&record.into_quest()?));
        }
    }

    Ok(())
}

fn init(config_path: &str) -> Result<()> {
    if Path::new(config_path).exists() {
        println!(
            "Configuration already exists at {}; leaving it unchanged.",
            config_path
        );
    } else {
        Config::create_default(config_path)?;
        info!("Configuration file created at {}", config_path);
        println!("Configuration file created at {}", config_path);
    }
    let store = open_store(&Config::load(config_path)?)?;
    println!("Quest logs will be stored in {}", store.dir().display());
    Ok(())
}

fn open_store(config: &Config) -> Result<QuestStore> {
    QuestStore::open(&config.storage.quest_dir)
        .with_context(|| format!("Failed to open quest directory {}", config.storage.quest_dir))
}

fn build_handler(
    config: &Config,
    store: &QuestStore,
) -> Result<Handler<StdRng, Box<dyn IdAllocator>>> {
    let rng = match config.handler.seed {
        Some(seed) => {
            debug!("handler seeded with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let ids: Box<dyn IdAllocator> = match config.handler.id_strategy {
        IdStrategy::Session => Box::new(SessionCounter::new()),
        IdStrategy::Store => Box::new(StoreCounter::new(store.list()?)),
    };
    Ok(Handler::with_parts(rng, ids))
}

/// CLI verbosity overrides the configured level.
fn log_level(config: &Config, verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::from_str(&config.logging.level).unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn init_logging(config: &Config, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(config, verbosity));

    let log_file = config.logging.file.as_ref().and_then(|file| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .ok()
    });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only in an interactive terminal
        let is_tty = atty::is(atty::Stream::Stdout);

        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
