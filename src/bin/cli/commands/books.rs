use anyhow::Result;

use lifeos_lib::library::{BookStatus, BookType, CreateBookRequest};

use super::{print_json, short_id};
use crate::app::{find_by_id, App};
use crate::render::{paint, truncate, Color};
use crate::{BooksCommand, OutputFormat};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StatusArg {
    Unread,
    Reading,
    Read,
}

impl From<StatusArg> for BookStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Unread => BookStatus::Unread,
            StatusArg::Reading => BookStatus::Reading,
            StatusArg::Read => BookStatus::Read,
        }
    }
}

fn status_color(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Unread => Color::GRAY,
        BookStatus::Reading => Color::YELLOW,
        BookStatus::Read => Color::GREEN,
    }
}

pub async fn run(app: &mut App, cmd: BooksCommand, format: &OutputFormat, use_color: bool) -> Result<()> {
    let books = &mut app.state.books;

    match cmd {
        BooksCommand::List { search } => {
            let list: Vec<_> = match search.as_deref() {
                Some(q) => books.search(q),
                None => books.list_books().iter().collect(),
            };

            match format {
                OutputFormat::Json => print_json(&list)?,
                OutputFormat::Plain => {
                    if list.is_empty() {
                        println!("No books.");
                        return Ok(());
                    }
                    for book in &list {
                        let kind = match book.book_type {
                            BookType::Physical => "",
                            BookType::EBook => " [e-book]",
                        };
                        println!(
                            "{}  {:<9} {} - {}{}",
                            paint(short_id(&book.id), Color::GRAY, use_color),
                            paint(book.status.label(), status_color(book.status), use_color),
                            truncate(&book.title, 40),
                            book.author,
                            kind
                        );
                    }
                    let stats = books.stats();
                    println!(
                        "\n{} books: {} unread, {} reading, {} read",
                        stats.total, stats.unread, stats.reading, stats.read
                    );
                }
            }
        }
        BooksCommand::Add { title, author, isbn, publisher, year, ebook } => {
            let book = books.add_book(CreateBookRequest {
                title,
                author,
                isbn,
                publisher,
                year,
                book_type: if ebook { BookType::EBook } else { BookType::Physical },
                ..Default::default()
            })?;
            match format {
                OutputFormat::Json => print_json(&book)?,
                OutputFormat::Plain => println!("Added '{}' ({})", book.title, short_id(&book.id)),
            }
        }
        BooksCommand::Status { id, status } => {
            let id = find_by_id(books.list_books(), &id, "book")?.id.clone();
            let book = books.set_status(&id, status.into())?;
            println!("'{}' is now {}", book.title, book.status.label());
        }
        BooksCommand::Delete { id } => {
            let book = find_by_id(books.list_books(), &id, "book")?.clone();
            books.delete_book(&book.id)?;
            println!("Deleted '{}'", book.title);
        }
        BooksCommand::Insight { id } => {
            let book = find_by_id(app.state.books.list_books(), &id, "book")?.clone();
            let client = app.search_client()?;
            match client.book_insight(&book.title, &book.author).await {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    log::warn!("Book insight failed: {}", e);
                    println!("AI unavailable: {}", e);
                }
            }
        }
    }

    Ok(())
}
