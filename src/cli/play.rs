//! Interactive terminal playback.
//!
//! A simulated video clock ticks on a tokio interval and feeds time reports
//! to the controller. When a question becomes active the clock is paused
//! and the learner answers on stdin.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use crate::catalog::{format_time, Catalog};
use crate::core::{Controller, QuizState, SessionSettings};
use crate::domain::LessonId;
use crate::presentation::{parse_answer, render_question, DisplayOrder};
use crate::surface::SimulatedSurface;

/// How often the simulated surface reports time
const TICK: Duration = Duration::from_millis(250);

type Input = Lines<BufReader<Stdin>>;

/// Play a lesson until the video ends or stdin closes
pub async fn play(
    catalog: Arc<Catalog>,
    settings: SessionSettings,
    lesson: Option<LessonId>,
    speed: f64,
) -> Result<()> {
    if !(speed.is_finite() && speed > 0.0) {
        anyhow::bail!("Speed must be a positive number, got {}", speed);
    }

    let mut controller = match lesson {
        Some(ref id) => Controller::with_lesson(catalog, id, settings)
            .with_context(|| format!("Lesson not found: {}", id))?,
        None => Controller::new(catalog, settings)?,
    };

    let lesson = controller.session().lesson().clone();
    println!("{}", lesson.title);
    if !lesson.description.is_empty() {
        println!("{}", lesson.description);
    }
    println!(
        "{} · {} question{}\n",
        format_time(f64::from(lesson.duration)),
        lesson.questions.len(),
        if lesson.questions.len() == 1 { "" } else { "s" }
    );

    controller.mount(SimulatedSurface::new(f64::from(lesson.duration)));
    controller.start();

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut rng = StdRng::from_entropy();
    let mut interval = tokio::time::interval(TICK);
    let mut last_shown_second = -1;

    loop {
        interval.tick().await;
        controller.poll(Instant::now());

        if controller.state() != QuizState::Idle {
            if !ask(&mut controller, &mut input, &mut rng).await? {
                println!("\nStopped.");
                return Ok(());
            }
            continue;
        }

        let Some(surface) = controller.surface_mut() else {
            break;
        };
        if surface.is_finished() {
            break;
        }

        if let Some(t) = surface.advance(TICK.as_secs_f64() * speed) {
            controller.on_time_update(t);

            let second = t.floor() as i64;
            if second != last_shown_second && second % 10 == 0 {
                println!("  ▶ {}", format_time(t));
                last_shown_second = second;
            }
        }
    }

    println!("\nLesson complete.");
    Ok(())
}

/// Run the question overlay until the question is closed. Returns false if
/// the learner quit or input ended.
async fn ask(
    controller: &mut Controller<SimulatedSurface>,
    input: &mut Input,
    rng: &mut StdRng,
) -> Result<bool> {
    let Some(question) = controller.session().active_question().cloned() else {
        return Ok(true);
    };
    let order = DisplayOrder::for_question(&question, rng);

    println!("\n── Quick Check ──");
    print!("{}", render_question(&question, &order));
    println!("(w = watch again, s = skip, q = quit)");

    loop {
        let Some(line) = prompt(input, "> ").await? else {
            return Ok(false);
        };

        match line.trim() {
            "q" | "quit" => return Ok(false),
            "w" | "watch again" => {
                let target = controller.watch_again(Instant::now());
                println!("Rewinding to {}", format_time(target));
                return Ok(true);
            }
            "s" | "skip" => {
                controller.dismiss();
                return Ok(true);
            }
            text => {
                let Some(answer) = parse_answer(&question, text, &order) else {
                    debug!(input = text, "Unparseable answer");
                    continue;
                };

                let Some(feedback) = controller.submit(answer) else {
                    return Ok(true);
                };

                if feedback.correct {
                    println!("✓ Correct! {}", feedback.message);
                    if prompt(input, "Press Enter to continue ").await?.is_none() {
                        return Ok(false);
                    }
                    controller.continue_playback();
                    return Ok(true);
                }

                println!("✗ Incorrect - Try Again. {}", feedback.message);
            }
        }
    }
}

async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
