use anyhow::Result;

use lifeos_lib::movies::CreateMovieRequest;

use super::{print_json, short_id};
use crate::app::{find_by_id, App};
use crate::render::{paint, stars, truncate, Color};
use crate::{MoviesCommand, OutputFormat};

pub fn run(app: &mut App, cmd: MoviesCommand, format: &OutputFormat, use_color: bool) -> Result<()> {
    let movies = &mut app.state.movies;

    match cmd {
        MoviesCommand::List { search } => {
            let list: Vec<_> = match search.as_deref() {
                Some(q) => movies.search(q),
                None => movies.list_movies().iter().collect(),
            };

            match format {
                OutputFormat::Json => print_json(&list)?,
                OutputFormat::Plain => {
                    if list.is_empty() {
                        println!("No movies.");
                        return Ok(());
                    }
                    for movie in &list {
                        let mark = if movie.watched {
                            paint("[x]", Color::GREEN, use_color)
                        } else {
                            "[ ]".to_string()
                        };
                        let year = movie.year.map(|y| format!(" ({})", y)).unwrap_or_default();
                        println!(
                            "{}  {} {:<40} {:<12} {}",
                            paint(short_id(&movie.id), Color::GRAY, use_color),
                            mark,
                            format!("{}{}", truncate(&movie.title, 32), year),
                            truncate(&movie.genre, 12),
                            stars(movie.rating)
                        );
                    }
                    let stats = movies.stats();
                    println!(
                        "\n{} movies: {} watched, {} to watch",
                        stats.total, stats.watched, stats.to_watch
                    );
                }
            }
        }
        MoviesCommand::Add { title, genre, year, director } => {
            let movie = movies.add_movie(CreateMovieRequest {
                title,
                genre,
                year,
                director,
                poster_url: None,
            })?;
            match format {
                OutputFormat::Json => print_json(&movie)?,
                OutputFormat::Plain => println!("Added '{}' ({})", movie.title, short_id(&movie.id)),
            }
        }
        MoviesCommand::Watched { id } => {
            let id = find_by_id(movies.list_movies(), &id, "movie")?.id.clone();
            let movie = movies.toggle_watched(&id)?;
            let state = if movie.watched { "watched" } else { "not watched" };
            println!("'{}' marked {}", movie.title, state);
        }
        MoviesCommand::Rate { id, rating } => {
            let id = find_by_id(movies.list_movies(), &id, "movie")?.id.clone();
            let movie = movies.rate(&id, rating)?;
            println!("'{}' {}", movie.title, stars(movie.rating));
        }
        MoviesCommand::Delete { id } => {
            let movie = find_by_id(movies.list_movies(), &id, "movie")?.clone();
            movies.delete_movie(&movie.id)?;
            println!("Deleted '{}'", movie.title);
        }
    }

    Ok(())
}
