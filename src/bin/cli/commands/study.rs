use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, Utc};
use serde_json::json;

use lifeos_lib::study::{stats, RecordSessionRequest, StudyMode, StudyTimer};

use super::{print_json, short_id};
use crate::app::{find_by_id, split_list, App};
use crate::render::{format_clock, format_minutes, paint, Color};
use crate::{OutputFormat, StudyCommand};

pub async fn run(app: &mut App, cmd: StudyCommand, format: &OutputFormat, use_color: bool) -> Result<()> {
    match cmd {
        StudyCommand::Timer { stopwatch, minutes, tag } => {
            run_timer(app, stopwatch, minutes, tag, format).await?;
        }
        StudyCommand::Log { minutes, pomodoro, tags, notes } => {
            let session = app.state.sessions.record_session(RecordSessionRequest {
                duration_seconds: minutes * 60,
                mode: Some(if pomodoro { StudyMode::Pomodoro } else { StudyMode::Stopwatch }),
                notes,
                tags: split_list(tags.as_deref()),
            });
            match format {
                OutputFormat::Json => print_json(&session)?,
                OutputFormat::Plain => println!("Logged {} ({})", format_minutes(minutes), short_id(&session.id)),
            }
        }
        StudyCommand::List => {
            let sessions = app.state.sessions.list_sessions();
            match format {
                OutputFormat::Json => print_json(sessions)?,
                OutputFormat::Plain => {
                    if sessions.is_empty() {
                        println!("No sessions yet.");
                    }
                    for s in sessions {
                        println!(
                            "{}  {}  {:>3}m {:02}s  {:<9} {}",
                            paint(short_id(&s.id), Color::GRAY, use_color),
                            s.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                            s.duration_seconds / 60,
                            s.duration_seconds % 60,
                            s.mode.label(),
                            s.tags.join(", ")
                        );
                    }
                }
            }
        }
        StudyCommand::Stats => {
            let sessions = app.state.sessions.list_sessions();
            let week = stats::daily_minutes(sessions, Local::now().date_naive());
            let by_tag = stats::minutes_by_tag(sessions);
            let summary = stats::summary(sessions);

            match format {
                OutputFormat::Json => print_json(&json!({
                    "week": week,
                    "byTag": by_tag,
                    "summary": summary,
                }))?,
                OutputFormat::Plain => {
                    println!("Last 7 days");
                    let peak = week.iter().map(|d| d.minutes).max().unwrap_or(0).max(1);
                    for day in &week {
                        let bar = "\u{2588}".repeat((day.minutes * 30 / peak) as usize);
                        println!(
                            "  {}  {:<30} {}",
                            day.date.format("%a %d"),
                            paint(&bar, Color::CYAN, use_color),
                            format_minutes(day.minutes)
                        );
                    }

                    if !by_tag.is_empty() {
                        println!("\nBy tag");
                        for group in &by_tag {
                            println!("  {:<20} {}", group.tag, format_minutes(group.minutes));
                        }
                    }

                    println!(
                        "\n{} sessions, {} total, {} average ({} pomodoro, {} stopwatch)",
                        summary.sessions,
                        format_minutes(summary.total_minutes),
                        format_minutes(summary.average_minutes),
                        summary.pomodoro_count,
                        summary.stopwatch_count
                    );
                }
            }
        }
        StudyCommand::Tags => {
            let tags = app.state.sessions.known_tags();
            match format {
                OutputFormat::Json => print_json(&tags)?,
                OutputFormat::Plain => {
                    for tag in tags {
                        println!("{}", tag);
                    }
                }
            }
        }
        StudyCommand::Delete { id } => {
            let id = find_by_id(app.state.sessions.list_sessions(), &id, "session")?.id.clone();
            app.state.sessions.delete_session(&id)?;
            println!("Deleted session");
        }
    }

    Ok(())
}

async fn run_timer(
    app: &mut App,
    stopwatch: bool,
    minutes: Option<u32>,
    tag: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let study_config = app.state.config.study.clone();
    let mut timer = if stopwatch {
        StudyTimer::stopwatch()
    } else {
        StudyTimer::pomodoro(minutes.unwrap_or(study_config.pomodoro_minutes))
    };

    eprintln!("{} started. Press Ctrl-C to finish.", timer.mode().label());
    timer.start(Utc::now());

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Utc::now();
                if timer.is_complete(now) {
                    eprintln!("\rTime is up!      ");
                    break;
                }
                let shown = timer.remaining(now).unwrap_or_else(|| timer.elapsed(now));
                eprint!("\r{}  ", format_clock(shown));
                std::io::stderr().flush()?;
            }
            _ = &mut ctrl_c => {
                eprintln!();
                break;
            }
        }
    }

    let mode = timer.mode();
    let Some(seconds) = timer.finish(Utc::now(), study_config.min_session_seconds) else {
        println!(
            "Session shorter than {}s, not saved.",
            study_config.min_session_seconds
        );
        return Ok(());
    };

    let session = app.state.sessions.record_session(RecordSessionRequest {
        duration_seconds: seconds,
        mode: Some(mode),
        notes: None,
        tags: tag.into_iter().collect(),
    });

    match format {
        OutputFormat::Json => print_json(&session)?,
        OutputFormat::Plain => println!(
            "Saved {} session: {}",
            mode.label(),
            format_clock(session.duration_seconds)
        ),
    }
    Ok(())
}
