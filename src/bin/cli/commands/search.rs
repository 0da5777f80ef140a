use anyhow::{bail, Result};

use lifeos_lib::search::{Candidate, ContentKind, SearchAdapter};

use super::{print_json, short_id};
use crate::app::App;
use crate::{Kind, OutputFormat};

pub async fn run(
    app: &mut App,
    kind: Kind,
    query: &str,
    add: Option<usize>,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let kind = match kind {
        Kind::Book => ContentKind::Book,
        Kind::Movie => ContentKind::Movie,
    };

    let client = app.search_client()?;
    let candidates = match client.search(query, kind).await {
        Ok(candidates) => candidates,
        Err(e) => {
            log::warn!("Online search failed: {}", e);
            Vec::new()
        }
    };

    if candidates.is_empty() {
        println!("Nothing found online for '{}' (or the search failed).", query);
        return Ok(());
    }

    let Some(number) = add else {
        match format {
            OutputFormat::Json => print_json(&candidates)?,
            OutputFormat::Plain => {
                for (idx, candidate) in candidates.iter().enumerate() {
                    println!("{:>2}. {}", idx + 1, candidate.summary());
                }
                println!("\nAdd one with --add <number>");
            }
        }
        return Ok(());
    };

    if number == 0 || number > candidates.len() {
        bail!("Pick a result between 1 and {}", candidates.len());
    }

    match candidates[number - 1].clone() {
        Candidate::Book(book) => {
            let book = app.state.books.add_candidate(book)?;
            println!("Added book '{}' ({})", book.title, short_id(&book.id));
        }
        Candidate::Movie(movie) => {
            let movie = app.state.movies.add_candidate(movie)?;
            println!("Added movie '{}' ({})", movie.title, short_id(&movie.id));
        }
    }

    Ok(())
}
