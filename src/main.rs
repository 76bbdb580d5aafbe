// SPDX-License-Identifier: MIT

//! animesort CLI - batch anime-character image classifier
//!
//! Enumerates images in a folder, classifies them by recognized character and
//! work through the AnimeTrace API, and exports the sorted tree as a zip.

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use animesort::client::{error_message, ModelId, RecognitionOutcome, TraceClient};
use animesort::config::AppConfig;
use animesort::engine::{
    ClassificationRun, Decision, RunMode, RunOptions,
};
use animesort::export::{export, ExportOptions, ScratchDir};
use animesort::history::{SuggestionStore, UNKNOWN};
use animesort::SorterError;

/// animesort CLI - sort anime images by character and work
#[derive(Parser, Debug)]
#[command(name = "animesort")]
#[command(version = "0.1.0")]
#[command(about = "Batch anime character image classifier", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a folder of images and export the sorted zip
    Sort {
        /// Folder containing the images
        dir: PathBuf,

        /// Recognition model identifier (see `animesort models`)
        #[arg(short, long)]
        model: Option<String>,

        /// Confirm every image interactively instead of taking the best match
        #[arg(long)]
        manual: bool,

        /// Only build the by-character tree
        #[arg(long, conflicts_with = "works_only")]
        characters_only: bool,

        /// Only build the by-work tree
        #[arg(long, conflicts_with = "characters_only")]
        works_only: bool,

        /// Output archive path (default: sorted_images_<date>.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available recognition models
    Models,

    /// Suggestion history operations
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommands {
    /// Show recorded character and work names
    List,

    /// Delete all recorded suggestions
    Clear {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Commands::Sort { dir, model, manual, characters_only, works_only, output } => {
            run_sort(config, dir, model, manual, characters_only, works_only, output).await
        }
        Commands::Models => {
            run_models(&config);
            Ok(())
        }
        Commands::History { action } => run_history_command(config, action),
        Commands::Config { action } => run_config_command(config, action),
    }
}

/// Enumerate classifiable images in a folder, sorted by path
fn collect_images(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for pattern in ["*.jpg", "*.jpeg", "*.png"] {
        let full = dir.join(pattern);
        let full = full.to_str().context("image folder path is not valid UTF-8")?;
        for entry in glob::glob(full)? {
            match entry {
                Ok(path) => images.push(path),
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
        }
    }
    images.sort();
    Ok(images)
}

#[allow(clippy::too_many_arguments)]
async fn run_sort(
    config: AppConfig,
    dir: PathBuf,
    model: Option<String>,
    manual: bool,
    characters_only: bool,
    works_only: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let images = collect_images(&dir)?;
    if images.is_empty() {
        return Err(SorterError::NoImages(dir.display().to_string()).into());
    }
    info!("Found {} images in {:?}", images.len(), dir);

    let model = match model {
        Some(id) => id.parse::<ModelId>()?,
        None => config.model()?,
    };

    let (by_character, by_work) = if characters_only {
        (true, false)
    } else if works_only {
        (false, true)
    } else {
        (config.export.by_character, config.export.by_work)
    };
    if !by_character && !by_work {
        return Err(SorterError::Config(
            "both classification trees are disabled".to_string(),
        )
        .into());
    }

    let options = RunOptions {
        mode: if manual { RunMode::Manual } else { RunMode::Automatic },
        model,
        by_character,
        by_work,
    };

    let client = TraceClient::new(&config.api.url, Duration::from_secs(config.api.timeout_secs))?;
    let mut store = SuggestionStore::load(Path::new(&config.history_path));
    let mut run = ClassificationRun::new(images, options, Arc::new(client));

    // A fatal API code aborts the run but partial results are still exported
    let run_result = if manual {
        drive_manual(&mut run, &mut store).await
    } else {
        run.run_auto(|processed, total| println!("  [{}/{}] processed", processed, total))
            .await
    };
    let fatal = match run_result {
        Ok(()) => None,
        Err(e @ SorterError::ApiFatal(_)) => {
            eprintln!("Run aborted: {}", e);
            Some(e)
        }
        Err(e) => return Err(e.into()),
    };

    if run.is_cancelled() {
        println!("Cancelled, nothing exported");
        return Ok(());
    }

    let entries = run.into_entries();
    if entries.is_empty() {
        println!("No images were classified, nothing to export");
        return match fatal {
            Some(e) => Err(e.into()),
            None => Ok(()),
        };
    }

    let archive_path = output.unwrap_or_else(|| {
        PathBuf::from(format!("sorted_images_{}.zip", Local::now().format("%Y-%m-%d")))
    });

    let scratch = ScratchDir::new()?;
    let export_options = ExportOptions { by_character, by_work };
    export(&entries, scratch.path(), export_options, &archive_path)?;
    scratch.cleanup()?;

    println!("Sorted {} images into {:?}", entries.len(), archive_path);
    match fatal {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Drive the manual state machine from stdin prompts
async fn drive_manual(
    run: &mut ClassificationRun,
    store: &mut SuggestionStore,
) -> animesort::Result<()> {
    run.start_manual().await?;

    while let Some(pending) = run.pending().cloned() {
        let (processed, total) = run.progress();
        println!("\n=== Image {}/{}: {:?} ===", processed + 1, total, pending.image);

        match &pending.outcome {
            RecognitionOutcome::Success(_) => {
                println!("Candidates (model {}):", pending.model);
                for (i, candidate) in pending.outcome.candidates().iter().enumerate() {
                    println!("  {}. {} - {}", i + 1, candidate.character, candidate.work);
                }
            }
            RecognitionOutcome::Empty => println!("No match found"),
            RecognitionOutcome::RecoverableError { code, .. } => {
                println!("Recognition failed: {}", error_message(*code));
            }
            // The engine never parks on a fatal outcome; end the run if one
            // ever shows up here
            RecognitionOutcome::FatalError { code, .. } => {
                return Err(SorterError::ApiFatal(*code));
            }
        }

        print!("[c]onfirm / [s]kip / [r]etry with model / [q]uit run > ");
        match prompt()?.as_str() {
            "c" | "" => {
                let character_options = pending.character_options();
                let work_options = pending.work_options();
                let decision = Decision {
                    character_text: prompt_name("character", character_options.first())?,
                    character_selection: character_options.first().cloned(),
                    work_text: prompt_name("work", work_options.first())?,
                    work_selection: work_options.first().cloned(),
                };

                match decision.resolve(run.options()) {
                    Ok((character, work)) => run.confirm(&character, &work, store).await?,
                    Err(e) => println!("{} (type a name or enter \"{}\")", e, UNKNOWN),
                }
            }
            "s" => run.skip().await?,
            "q" => run.cancel(),
            "r" => {
                println!("Models:");
                for m in ModelId::ALL {
                    println!("  {} - {}", m.as_str(), m.label());
                }
                print!("model id > ");
                match prompt()?.parse::<ModelId>() {
                    Ok(model) => {
                        if !run.retry_with_model(model).await? {
                            println!("Retry found nothing new, keeping previous candidates");
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            other => println!("Unrecognized action: {:?}", other),
        }
    }

    Ok(())
}

fn prompt() -> animesort::Result<String> {
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask for a name; empty input falls back to the suggested default
fn prompt_name(field: &str, default: Option<&String>) -> animesort::Result<Option<String>> {
    match default {
        Some(d) => print!("{} [{}] > ", field, d),
        None => print!("{} > ", field),
    }
    let input = prompt()?;
    Ok(if input.is_empty() { None } else { Some(input) })
}

fn run_models(config: &AppConfig) {
    let default = config.model().ok();
    println!("Available models:");
    for model in ModelId::ALL {
        let marker = if Some(model) == default { "→" } else { " " };
        println!("  {} {:<24} {}", marker, model.as_str(), model.label());
    }
}

fn run_history_command(config: AppConfig, action: HistoryCommands) -> anyhow::Result<()> {
    let mut store = SuggestionStore::load(Path::new(&config.history_path));

    match action {
        HistoryCommands::List => {
            println!("Characters:");
            for name in store.character_suggestions() {
                println!("  {}", name);
            }
            println!("Works:");
            for name in store.work_suggestions() {
                println!("  {}", name);
            }
        }
        HistoryCommands::Clear { force } => {
            if !force {
                eprintln!("Use --force to confirm clearing suggestion history");
                return Ok(());
            }
            store.clear()?;
            println!("Suggestion history cleared");
        }
    }

    Ok(())
}

fn run_config_command(config: AppConfig, action: ConfigCommands) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            let default_config = AppConfig::default();
            default_config.save(&output)?;
            println!("Generated config at {:?}", output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["animesort", "models"]).unwrap();
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_sort_command() {
        let cli = Cli::try_parse_from([
            "animesort", "sort", "/tmp/images", "--manual", "--model", "pre_stable",
        ])
        .unwrap();

        match cli.command {
            Commands::Sort { dir, manual, model, .. } => {
                assert!(manual);
                assert_eq!(dir, PathBuf::from("/tmp/images"));
                assert_eq!(model.as_deref(), Some("pre_stable"));
            }
            _ => panic!("Expected Sort command"),
        }
    }

    #[test]
    fn test_cli_exclusive_tree_flags() {
        let result = Cli::try_parse_from([
            "animesort", "sort", "/tmp/images", "--characters-only", "--works-only",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_images_filters_and_sorts() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["b.png", "a.jpg", "c.jpeg", "notes.txt"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }

        let images = collect_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.jpeg"]);
    }
}
