mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lifeos-cli", about = "Books, movies, study sessions, archive, todos and courses", version)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Use a specific data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Kind {
    Book,
    Movie,
}

#[derive(Subcommand)]
enum Command {
    /// Book library
    #[command(subcommand)]
    Books(BooksCommand),

    /// Movie watchlist
    #[command(subcommand)]
    Movies(MoviesCommand),

    /// Study timer and session history
    #[command(subcommand)]
    Study(StudyCommand),

    /// Archive of notes, links and documents
    #[command(subcommand)]
    Archive(ArchiveCommand),

    /// Todo list
    #[command(subcommand)]
    Todo(TodoCommand),

    /// Courses and their file trees
    #[command(subcommand)]
    Courses(CoursesCommand),

    /// Search books or movies online
    Search {
        /// book or movie
        kind: Kind,
        /// Search query
        query: String,
        /// Add the result with this number (as listed) to the collection
        #[arg(long)]
        add: Option<usize>,
    },

    /// Overview of todos, recent study time and collection counts
    Dashboard,
}

#[derive(Subcommand)]
pub enum BooksCommand {
    /// List books
    List {
        /// Filter by title or author
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a book
    Add {
        title: String,
        author: String,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        publisher: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        /// E-book rather than a physical copy
        #[arg(long)]
        ebook: bool,
    },
    /// Set reading status
    Status {
        id: String,
        status: commands::books::StatusArg,
    },
    /// Remove a book
    Delete { id: String },
    /// Ask the assistant for a synopsis and themes
    Insight { id: String },
}

#[derive(Subcommand)]
pub enum MoviesCommand {
    /// List movies
    List {
        /// Filter by title or genre
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a movie
    Add {
        title: String,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        director: Option<String>,
    },
    /// Toggle the watched flag
    Watched { id: String },
    /// Rate from 1 to 5
    Rate {
        id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
    },
    /// Remove a movie
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum StudyCommand {
    /// Run a timer in the terminal; Ctrl-C finishes the session
    Timer {
        /// Count up instead of running a Pomodoro
        #[arg(long)]
        stopwatch: bool,
        /// Pomodoro length in minutes (default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        minutes: Option<u32>,
        /// Tag for the session
        #[arg(long)]
        tag: Option<String>,
    },
    /// Record a session after the fact
    Log {
        /// Duration in minutes
        minutes: u64,
        #[arg(long)]
        pomodoro: bool,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List sessions
    List,
    /// Weekly chart, tag breakdown and totals
    Stats,
    /// Tags used so far
    Tags,
    /// Remove a session
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ArchiveCommand {
    /// List or search archive items
    List {
        /// Filter by title, tag or category
        #[arg(long)]
        search: Option<String>,
        /// Only items from this year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Add an item, optionally attaching a file
    Add {
        title: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        url: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        /// File to attach
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Item counts per year
    Years,
    /// Write an attachment to disk
    Export {
        id: String,
        /// Output file (defaults to the attachment name)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Remove an item
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum TodoCommand {
    /// List todos
    List,
    /// Add a todo
    Add { text: String },
    /// Toggle done
    Done { id: String },
    /// Remove a todo
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum CoursesCommand {
    /// List courses
    List,
    /// Create a course
    New {
        title: String,
        /// Comma-separated keywords
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        platform: Option<String>,
    },
    /// Show course details and notes
    Show { course: String },
    /// Print the whole file tree
    Tree { course: String },
    /// List one folder
    Ls {
        course: String,
        /// Folder path such as Week1/Slides
        path: Option<String>,
    },
    /// Create a folder
    Mkdir {
        course: String,
        name: String,
        /// Parent folder path
        #[arg(long)]
        path: Option<String>,
    },
    /// Upload files into a folder
    Upload {
        course: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Target folder path
        #[arg(long)]
        path: Option<String>,
    },
    /// Remove a file or folder
    Rm {
        course: String,
        /// Entry name or id
        name: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Rename a file or folder
    Mv {
        course: String,
        name: String,
        new_name: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Write a stored file to disk
    Export {
        course: String,
        name: String,
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Browse the tree interactively
    Browse { course: String },
    /// Replace the course notes (use "-" to read from stdin)
    Notes { course: String, text: String },
    /// Set progress in percent
    Progress { course: String, percent: f64 },
    /// Summarize the notes with the assistant
    Summarize { course: String },
    /// Delete a course and all of its files
    Delete { course: String },
}

/// Read from stdin when the argument is "-"
fn resolve_text(text: String) -> anyhow::Result<String> {
    if text == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok(buf)
    } else {
        Ok(text)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        None | Some(Command::Dashboard) => {
            commands::dashboard::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Books(cmd)) => {
            commands::books::run(&mut app, cmd, &cli.format, use_color).await?;
        }
        Some(Command::Movies(cmd)) => {
            commands::movies::run(&mut app, cmd, &cli.format, use_color)?;
        }
        Some(Command::Study(cmd)) => {
            commands::study::run(&mut app, cmd, &cli.format, use_color).await?;
        }
        Some(Command::Archive(cmd)) => {
            commands::archive::run(&mut app, cmd, &cli.format, use_color).await?;
        }
        Some(Command::Todo(cmd)) => {
            commands::todos::run(&mut app, cmd, &cli.format, use_color)?;
        }
        Some(Command::Courses(cmd)) => {
            let cmd = match cmd {
                CoursesCommand::Notes { course, text } => CoursesCommand::Notes {
                    course,
                    text: resolve_text(text)?,
                },
                other => other,
            };
            commands::courses::run(&mut app, cmd, &cli.format, use_color).await?;
        }
        Some(Command::Search { kind, query, add }) => {
            commands::search::run(&mut app, kind, &query, add, &cli.format, use_color).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_minutes_must_be_positive() {
        assert!(Cli::try_parse_from(["lifeos-cli", "study", "timer", "--minutes", "0"]).is_err());

        let cli = Cli::try_parse_from(["lifeos-cli", "study", "timer", "--minutes", "1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Study(StudyCommand::Timer { minutes: Some(1), .. }))
        ));
    }
}
