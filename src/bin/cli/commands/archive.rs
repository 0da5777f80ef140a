use std::path::PathBuf;

use anyhow::{Context, Result};

use lifeos_lib::archive::CreateArchiveItemRequest;
use lifeos_lib::ingest;

use super::{print_json, short_id};
use crate::app::{find_by_id, split_list, App};
use crate::render::{format_size, paint, truncate, Color};
use crate::{ArchiveCommand, OutputFormat};

pub async fn run(app: &mut App, cmd: ArchiveCommand, format: &OutputFormat, use_color: bool) -> Result<()> {
    match cmd {
        ArchiveCommand::List { search, year } => {
            let archive = &app.state.archive;
            let items = archive.search(search.as_deref().unwrap_or(""), year);

            match format {
                OutputFormat::Json => print_json(&items)?,
                OutputFormat::Plain => {
                    if items.is_empty() {
                        println!("No archive items.");
                        return Ok(());
                    }
                    for item in &items {
                        let attachment = match (&item.file_name, item.file_size) {
                            (Some(name), Some(size)) => format!("  [{} {}]", name, format_size(size)),
                            _ => String::new(),
                        };
                        println!(
                            "{}  {}  {:<40} {}{}",
                            paint(short_id(&item.id), Color::GRAY, use_color),
                            item.effective_year(),
                            truncate(&item.title, 40),
                            paint(&item.category, Color::CYAN, use_color),
                            attachment
                        );
                        if !item.tags.is_empty() {
                            println!("          {}", paint(&item.tags.join(", "), Color::GRAY, use_color));
                        }
                    }
                    println!(
                        "\n{} items, {} with files",
                        items.len(),
                        archive.attachment_count()
                    );
                }
            }
        }
        ArchiveCommand::Add { title, category, content, url, tags, year, file } => {
            let attachment = match file {
                Some(path) => Some(
                    ingest::read_encoded(&path, app.state.config.max_upload_bytes)
                        .await
                        .with_context(|| format!("Failed to attach {}", path.display()))?,
                ),
                None => None,
            };

            let item = app.state.archive.add_item(CreateArchiveItemRequest {
                title,
                category,
                content,
                tags: split_list(tags.as_deref()),
                year,
                url,
                attachment,
            })?;

            match format {
                OutputFormat::Json => print_json(&item)?,
                OutputFormat::Plain => println!("Archived '{}' ({})", item.title, short_id(&item.id)),
            }
        }
        ArchiveCommand::Years => {
            let counts = app.state.archive.year_counts();
            match format {
                OutputFormat::Json => print_json(&counts)?,
                OutputFormat::Plain => {
                    for entry in &counts {
                        println!("{}  {}", entry.year, entry.count);
                    }
                }
            }
        }
        ArchiveCommand::Export { id, output } => {
            let archive = &app.state.archive;
            let id = find_by_id(archive.list_items(), &id, "archive item")?.id.clone();
            let (name, _mime, bytes) = archive.attachment(&id)?;
            let target = output.unwrap_or_else(|| PathBuf::from(&name));
            std::fs::write(&target, &bytes)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            println!("Wrote {} ({})", target.display(), format_size(bytes.len() as u64));
        }
        ArchiveCommand::Delete { id } => {
            let item = find_by_id(app.state.archive.list_items(), &id, "archive item")?.clone();
            app.state.archive.delete_item(&item.id)?;
            println!("Deleted '{}'", item.title);
        }
    }

    Ok(())
}
