use anyhow::Result;
use chrono::Local;
use serde_json::json;

use lifeos_lib::study::stats;

use super::{print_json, short_id};
use crate::app::App;
use crate::render::{format_minutes, paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let state = &app.state;
    let today = Local::now();
    let week = stats::daily_minutes(state.sessions.list_sessions(), today.date_naive());
    let week_total: u64 = week.iter().map(|d| d.minutes).sum();

    match format {
        OutputFormat::Json => print_json(&json!({
            "todos": state.todos.list_todos(),
            "pendingTodos": state.todos.pending_count(),
            "week": week,
            "books": state.books.stats(),
            "movies": state.movies.stats(),
            "archiveItems": state.archive.list_items().len(),
            "courses": state.courses.list_courses().len(),
        }))?,
        OutputFormat::Plain => {
            println!("{}", paint(&today.format("%A, %d %B %Y  %H:%M").to_string(), Color::BOLD, use_color));

            println!("\nTodo ({} open)", state.todos.pending_count());
            for todo in state.todos.list_todos().iter().filter(|t| !t.completed) {
                println!("  {}  {}", paint(short_id(&todo.id), Color::GRAY, use_color), todo.text);
            }

            println!("\nStudy this week: {}", format_minutes(week_total));
            for day in &week {
                println!("  {}  {}", day.date.format("%a"), format_minutes(day.minutes));
            }

            let books = state.books.stats();
            let movies = state.movies.stats();
            println!(
                "\nBooks {} ({} reading)  Movies {} ({} to watch)  Archive {}  Courses {}",
                books.total,
                books.reading,
                movies.total,
                movies.to_watch,
                state.archive.list_items().len(),
                state.courses.list_courses().len()
            );
        }
    }

    Ok(())
}
