use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use study_tracker::app::report;
use study_tracker::celebrate::{Celebration, SoundCategory, SoundSink};
use study_tracker::clock::Clock;
use study_tracker::config::SettingField;
use study_tracker::progress::UpdateOutcome;
use study_tracker::storage::{FileStore, Gateway};
use study_tracker::{Catalog, Config, StudyTracker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "study-tracker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding progress data (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall progress, streak and time estimates
    Status,
    /// List every chapter with its progress
    Chapters,
    /// Show one chapter in detail (defaults to the current chapter)
    Show { chapter: Option<u32> },
    /// Set pages read for a chapter
    Pages {
        chapter: u32,
        #[arg(allow_negative_numbers = true)]
        pages: i64,
    },
    /// Set problems solved for a chapter
    Problems {
        chapter: u32,
        #[arg(allow_negative_numbers = true)]
        problems: i64,
    },
    /// Toggle the MCQ quiz for a chapter
    Quiz { chapter: u32 },
    /// Toggle the checkpoint for a chapter
    Checkpoint { chapter: u32 },
    /// Show the current chapter, or focus another one
    Current { chapter: Option<u32> },
    /// Show or change estimation settings
    Settings {
        /// Hours of study per day
        #[arg(long)]
        daily_hours: Option<String>,
        /// Minutes per page
        #[arg(long)]
        reading_speed: Option<String>,
        /// Minutes per problem
        #[arg(long)]
        problem_time: Option<String>,
    },
    /// Export progress to a dated JSON file
    Export {
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Import progress from a JSON backup
    Import {
        path: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete all progress and streak data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Toggle celebration sounds
    Sound,
}

/// Stands in for an audio backend
struct LogSink;

impl SoundSink for LogSink {
    fn play(&self, sound: SoundCategory) {
        tracing::debug!("Playing sound {}", sound);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };

    let gateway = Gateway::new(FileStore::new(data_dir));
    let mut tracker =
        StudyTracker::open(Catalog::builtin(), gateway, Clock::System, config.settings, LogSink);

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => print!("{}", report::render_status(&tracker)),
        Commands::Chapters => print!("{}", report::render_chapters(&tracker)),
        Commands::Show { chapter } => {
            let id = chapter.or(tracker.current_chapter()).unwrap_or(1);
            print!("{}", report::render_chapter(&tracker, id)?);
        }
        Commands::Pages { chapter, pages } => {
            let outcome = tracker.set_pages(chapter, pages)?;
            print_outcome(&tracker, chapter, &outcome).await?;
        }
        Commands::Problems { chapter, problems } => {
            let outcome = tracker.set_problems(chapter, problems)?;
            print_outcome(&tracker, chapter, &outcome).await?;
        }
        Commands::Quiz { chapter } => {
            let outcome = tracker.toggle_quiz(chapter)?;
            print_outcome(&tracker, chapter, &outcome).await?;
        }
        Commands::Checkpoint { chapter } => {
            let outcome = tracker.toggle_checkpoint(chapter)?;
            print_outcome(&tracker, chapter, &outcome).await?;
        }
        Commands::Current { chapter } => {
            if let Some(id) = chapter {
                if !tracker.set_current_chapter(id) {
                    println!("No chapter {id}; keeping the current one.");
                }
            }
            match tracker.current_chapter() {
                Some(id) => print!("{}", report::render_chapter(&tracker, id)?),
                None => println!("No chapters."),
            }
        }
        Commands::Settings { daily_hours, reading_speed, problem_time } => {
            let inputs = [
                (SettingField::DailyHours, daily_hours),
                (SettingField::ReadingSpeed, reading_speed),
                (SettingField::ProblemTime, problem_time),
            ];
            let mut changed = false;
            for (field, raw) in inputs {
                if let Some(raw) = raw {
                    tracker.apply_setting(field, &raw);
                    changed = true;
                }
            }
            if changed {
                config.settings = *tracker.settings();
                config.save()?;
            }

            let settings = tracker.settings();
            println!("Daily hours:   {}", settings.daily_hours);
            println!("Reading speed: {} min/page", settings.reading_speed);
            println!("Problem time:  {} min/problem", settings.problem_time);
        }
        Commands::Export { output } => {
            let path = tracker.export_to_dir(&output)?;
            println!("{}", report::render_notice(&Celebration::DataExported));
            println!("  {}", path.display());
        }
        Commands::Import { path, yes } => {
            let prompt = tracker.import_file(&path).await?.prompt();
            if yes || confirm(&prompt)? {
                if let Some(event) = tracker.confirm()? {
                    println!("{}", report::render_notice(&event));
                }
            } else {
                tracker.dismiss();
                println!("Import cancelled.");
            }
        }
        Commands::Reset { yes } => {
            let prompt = tracker.request_reset().prompt();
            if yes || confirm(&prompt)? {
                tracker.confirm()?;
                println!("All progress has been reset.");
            } else {
                tracker.dismiss();
                println!("Reset cancelled.");
            }
        }
        Commands::Sound => {
            let enabled = tracker.toggle_sound();
            println!("Sound {}", if enabled { "on" } else { "off" });
        }
    }

    if tracker.store().is_degraded() {
        tracing::warn!("Storage unavailable; changes from this run were not saved");
    }

    Ok(())
}

async fn print_outcome(
    tracker: &StudyTracker,
    chapter: u32,
    outcome: &UpdateOutcome,
) -> Result<()> {
    if let Some(event) = outcome.headline() {
        println!("{}\n", report::render_notice(event));
    }
    if let Some(book) = outcome.events.iter().find(|e| **e == Celebration::BookCompleted) {
        tokio::time::sleep(book.delay()).await;
        println!("{}\n", report::render_notice(book));
    }
    print!("{}", report::render_chapter(tracker, chapter)?);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
