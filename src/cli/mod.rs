//! Command-line interface for lessonquiz.
//!
//! Provides commands for browsing the lesson catalog, replaying scripted
//! sessions, playing a lesson interactively in the terminal and inspecting
//! configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::catalog::{format_time, Catalog};
use crate::config::{self, ResolvedConfig};
use crate::core::SessionSettings;
use crate::domain::{Expected, LessonId, WrongHints};
use crate::script::{run_script, Script};

pub mod play;

/// lessonquiz - Interactive video lessons with timed quiz questions
#[derive(Parser, Debug)]
#[command(name = "lessonquiz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (overrides config and LESSONQUIZ_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Config file (skips config discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List curriculum modules and lessons
    Lessons,

    /// Show a lesson and its questions
    Show {
        /// Lesson ID
        lesson_id: String,

        /// Include expected answers and hints
        #[arg(long)]
        answers: bool,
    },

    /// Replay a scripted session and print the event log
    RunScript {
        /// Script file (YAML)
        script: PathBuf,

        /// Lesson to open (overrides the script)
        #[arg(short, long)]
        lesson: Option<String>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Play a lesson interactively in the terminal
    Play {
        /// Lesson ID (catalog default if omitted)
        lesson_id: Option<String>,

        /// Playback speed multiplier
        #[arg(short, long, default_value = "1.0")]
        speed: f64,
    },

    /// Validate a catalog file
    Validate {
        /// Catalog file (configured catalog if omitted)
        file: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let resolved = match self.config {
            Some(ref path) => config::load_from(path)?,
            None => config::config()?.clone(),
        };
        let catalog_path = self.catalog_path(&resolved);

        match self.command {
            Commands::Lessons => {
                let catalog = load_catalog(catalog_path.as_deref())?;
                list_lessons(&catalog);
                Ok(())
            }
            Commands::Show { lesson_id, answers } => {
                let catalog = load_catalog(catalog_path.as_deref())?;
                show_lesson(&catalog, &lesson_id, answers)
            }
            Commands::RunScript {
                script,
                lesson,
                json,
            } => {
                let catalog = load_catalog(catalog_path.as_deref())?;
                replay_script(catalog, resolved.settings, &script, lesson, json)
            }
            Commands::Play { lesson_id, speed } => {
                let catalog = load_catalog(catalog_path.as_deref())?;
                play::play(
                    Arc::new(catalog),
                    resolved.settings,
                    lesson_id.map(LessonId::new),
                    speed,
                )
                .await
            }
            Commands::Validate { file } => validate(file.or(catalog_path).as_deref()),
            Commands::Config => {
                show_config(
                    catalog_path.as_deref(),
                    resolved.config_file.as_deref(),
                    &resolved.settings,
                );
                Ok(())
            }
        }
    }

    /// Catalog file in effect: `--catalog`, else the configured one
    fn catalog_path(&self, resolved: &ResolvedConfig) -> Option<PathBuf> {
        self.catalog.clone().or_else(|| resolved.catalog.clone())
    }
}

/// Load the catalog from a file, or the built-in one
fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => Catalog::from_file(p),
        None => Catalog::builtin(),
    }
}

/// List modules and lessons
fn list_lessons(catalog: &Catalog) {
    let default = catalog.default_lesson().map(|l| l.id.clone());

    for module in catalog.modules() {
        let status = if module.implemented { "" } else { " (coming soon)" };
        println!("{} {}{}", module.icon, module.title, status);

        for lesson in &module.lessons {
            let marker = if Some(&lesson.id) == default.as_ref() { "*" } else { " " };
            let count = lesson.questions.len();
            println!(
                "  {} {:<24} {:>6}  {} question{}  {}",
                marker,
                lesson.id,
                format_time(f64::from(lesson.duration)),
                count,
                if count == 1 { "" } else { "s" },
                lesson.title
            );
        }
        println!();
    }

    println!("{} lessons (* = default)", catalog.lesson_count());
}

/// Show lesson details
fn show_lesson(catalog: &Catalog, lesson_id: &str, answers: bool) -> Result<()> {
    let lesson = catalog
        .lesson(&LessonId::from(lesson_id))
        .with_context(|| format!("Lesson not found: {}", lesson_id))?;

    println!("ID: {}", lesson.id);
    println!("Title: {}", lesson.title);
    if !lesson.description.is_empty() {
        println!("Description: {}", lesson.description);
    }
    println!("Duration: {}", format_time(f64::from(lesson.duration)));
    if lesson.has_video() {
        println!("Video: {}", lesson.video_src);
    }

    if lesson.questions.is_empty() {
        println!("\nNo questions.");
        return Ok(());
    }

    println!("\nQuestions:");
    for question in &lesson.questions {
        println!(
            "  [{}] {} ({}): {}",
            format_time(question.time),
            question.id,
            question.kind(),
            question.prompt
        );

        if let Some(options) = question.options() {
            for (i, option) in options.iter().enumerate() {
                println!("      {}. {}", i + 1, option);
            }
        }

        if answers {
            match &question.expected {
                Expected::MultipleChoice { answer, .. } => println!("      answer: {}", answer + 1),
                Expected::TrueFalse { answer } => println!("      answer: {}", answer),
                Expected::ShortAnswer { answer } => println!("      answer: {}", answer),
                Expected::Ordering { .. } => {
                    let order: Vec<String> = question
                        .canonical_order()
                        .unwrap_or_default()
                        .iter()
                        .map(|i| (i + 1).to_string())
                        .collect();
                    println!("      answer: {}", order.join(", "));
                }
            }
            match &question.wrong_hints {
                Some(WrongHints::Uniform(hint)) => println!("      hint: {}", hint),
                Some(WrongHints::PerOption(hints)) => {
                    for (i, hint) in hints.iter().enumerate().filter(|(_, h)| !h.is_empty()) {
                        println!("      hint {}: {}", i + 1, hint);
                    }
                }
                None => {}
            }
        }
    }

    Ok(())
}

/// Replay a script and print the event log
fn replay_script(
    catalog: Catalog,
    settings: SessionSettings,
    path: &Path,
    lesson: Option<String>,
    json: bool,
) -> Result<()> {
    let script = Script::from_file(path)
        .with_context(|| format!("Failed to load script: {}", path.display()))?;
    let lesson = lesson.map(LessonId::new);

    let report = run_script(Arc::new(catalog), settings, &script, lesson.as_ref())?;

    if json {
        for event in &report.events {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        for event in &report.events {
            println!("{}", event);
        }
        eprintln!(
            "\n[{} steps, {} surface commands, final state {:?} on {}]",
            script.steps.len(),
            report.commands.len(),
            report.final_state,
            report.lesson_id
        );
    }

    Ok(())
}

/// Validate a catalog file
fn validate(path: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(path)?;
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in catalog".to_string());

    println!(
        "{}: OK ({} modules, {} lessons, {} questions)",
        source,
        catalog.modules().len(),
        catalog.lesson_count(),
        catalog.lessons().map(|l| l.questions.len()).sum::<usize>()
    );
    Ok(())
}

/// Show resolved configuration
fn show_config(catalog: Option<&Path>, config_file: Option<&Path>, settings: &SessionSettings) {
    println!("lessonquiz configuration:");
    println!();

    match config_file {
        Some(path) => println!("  Config file: {}", path.display()),
        None => println!("  Config file: (none found, using defaults)"),
    }
    match catalog {
        Some(path) => println!("  Catalog:     {}", path.display()),
        None => println!("  Catalog:     (built-in)"),
    }

    println!();
    println!("  Playback:");
    println!("    replay_rewind_seconds: {}", settings.replay_rewind_seconds);
    println!("    seek_debounce_ms:      {}", settings.seek_debounce_ms);
    println!("    backward_seek:         {:?}", settings.backward_seek);
    println!("  Grading:");
    println!("    fallback_hint:         {}", settings.fallback_hint);
}
