use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};

use lifeos_lib::courses::tree::TreeStats;
use lifeos_lib::courses::{CreateCourseRequest, TreePath, UploadReport};

use super::{print_json, short_id};
use crate::app::{course_path, find_entry, App};
use crate::render::{entry_line, format_size, paint, print_tree, truncate, Color};
use crate::{CoursesCommand, OutputFormat};

pub async fn run(app: &mut App, cmd: CoursesCommand, format: &OutputFormat, use_color: bool) -> Result<()> {
    match cmd {
        CoursesCommand::List => {
            let courses = app.state.courses.list_courses();
            match format {
                OutputFormat::Json => {
                    let output: Vec<serde_json::Value> = courses
                        .iter()
                        .map(|c| {
                            json!({
                                "id": c.id,
                                "title": c.title,
                                "platform": c.platform,
                                "keywords": c.keywords,
                                "progress": c.progress,
                                "files": TreeStats::of(&c.file_system),
                            })
                        })
                        .collect();
                    print_json(&output)?;
                }
                OutputFormat::Plain => {
                    if courses.is_empty() {
                        println!("No courses.");
                    }
                    for course in courses {
                        let stats = TreeStats::of(&course.file_system);
                        println!(
                            "{}  {:<32} {:<12} {:>5.1}%  {} files",
                            paint(short_id(&course.id), Color::GRAY, use_color),
                            truncate(&course.title, 32),
                            course.platform.as_deref().unwrap_or(""),
                            course.progress,
                            stats.files
                        );
                    }
                }
            }
        }
        CoursesCommand::New { title, keywords, platform } => {
            let course = app.state.courses.create_course(CreateCourseRequest {
                title,
                keywords: keywords.unwrap_or_default(),
                platform,
            })?;
            match format {
                OutputFormat::Json => print_json(&course)?,
                OutputFormat::Plain => println!("Created course '{}' ({})", course.title, short_id(&course.id)),
            }
        }
        CoursesCommand::Show { course } => {
            let course = app.find_course(&course)?;
            let stats = TreeStats::of(&course.file_system);
            match format {
                OutputFormat::Json => print_json(&json!({
                    "id": course.id,
                    "title": course.title,
                    "platform": course.platform,
                    "keywords": course.keywords,
                    "progress": course.progress,
                    "notes": course.notes,
                    "aiSummary": course.ai_summary,
                    "files": stats,
                }))?,
                OutputFormat::Plain => {
                    println!("{}", paint(&course.title, Color::BOLD, use_color));
                    println!(
                        "{}  {:.0}% complete  {}",
                        course.platform.as_deref().unwrap_or("Online"),
                        course.progress,
                        course.keywords.join(", ")
                    );
                    println!(
                        "{} folders, {} files, {}",
                        stats.folders,
                        stats.files,
                        format_size(stats.total_bytes)
                    );
                    if !course.notes.is_empty() {
                        println!("\nNotes\n{}", course.notes);
                    }
                    if let Some(summary) = &course.ai_summary {
                        println!("\nSummary\n{}", summary);
                    }
                }
            }
        }
        CoursesCommand::Tree { course } => {
            let course = app.find_course(&course)?;
            match format {
                OutputFormat::Json => print_json(&course.file_system)?,
                OutputFormat::Plain => {
                    println!("{}", course.title);
                    print_tree(&course.file_system, "", use_color);
                }
            }
        }
        CoursesCommand::Ls { course, path } => {
            let course = app.find_course(&course)?;
            let path = course_path(&course, path.as_deref())?;
            let items = path.current_items(&course.file_system);
            match format {
                OutputFormat::Json => print_json(items)?,
                OutputFormat::Plain => {
                    println!("{}", path.display());
                    if items.is_empty() {
                        println!("  (empty)");
                    }
                    for node in items {
                        println!("  {}", entry_line(node, use_color));
                    }
                }
            }
        }
        CoursesCommand::Mkdir { course, name, path } => {
            let course = app.find_course(&course)?;
            let path = course_path(&course, path.as_deref())?;
            let folder = app.state.courses.create_folder(&course.id, &path, &name)?;
            println!("Created {}{}/", path_prefix(&path), folder.name);
        }
        CoursesCommand::Upload { course, files, path } => {
            let course = app.find_course(&course)?;
            let path = course_path(&course, path.as_deref())?;
            let report = app.state.courses.upload_files(&course.id, &path, &files).await?;
            print_upload_report(&report, format, use_color)?;
        }
        CoursesCommand::Rm { course, name, path } => {
            let course = app.find_course(&course)?;
            let path = course_path(&course, path.as_deref())?;
            let node = find_entry(path.current_items(&course.file_system), &name)?;
            app.state.courses.remove_node(&course.id, &path, &node.id)?;
            println!("Removed {}{}", path_prefix(&path), node.name);
        }
        CoursesCommand::Mv { course, name, new_name, path } => {
            let course = app.find_course(&course)?;
            let path = course_path(&course, path.as_deref())?;
            let node = find_entry(path.current_items(&course.file_system), &name)?;
            app.state.courses.rename_node(&course.id, &path, &node.id, &new_name)?;
            println!("Renamed '{}' to '{}'", node.name, new_name.trim());
        }
        CoursesCommand::Export { course, name, path, output } => {
            let course = app.find_course(&course)?;
            let path = course_path(&course, path.as_deref())?;
            let node = find_entry(path.current_items(&course.file_system), &name)?;
            let (_mime, bytes) = app.state.courses.file_content(&course.id, &path, &node.id)?;
            let target = output.unwrap_or_else(|| PathBuf::from(&node.name));
            std::fs::write(&target, &bytes)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            println!("Wrote {} ({})", target.display(), format_size(bytes.len() as u64));
        }
        CoursesCommand::Browse { course } => {
            let course = app.find_course(&course)?;
            browse(app, &course.id, &course.title, use_color).await?;
        }
        CoursesCommand::Notes { course, text } => {
            let course = app.find_course(&course)?;
            app.state.courses.update_notes(&course.id, text)?;
            println!("Notes saved for '{}'", course.title);
        }
        CoursesCommand::Progress { course, percent } => {
            let course = app.find_course(&course)?;
            let updated = app.state.courses.set_progress(&course.id, percent)?;
            println!("'{}' is {:.0}% complete", updated.title, updated.progress);
        }
        CoursesCommand::Summarize { course } => {
            let course = app.find_course(&course)?;
            if course.notes.trim().is_empty() {
                bail!("Course '{}' has no notes to summarize", course.title);
            }
            let client = app.search_client()?;
            match client.summarize_course(&course.title, &course.notes).await {
                Ok(summary) => {
                    app.state.courses.set_ai_summary(&course.id, summary.clone())?;
                    println!("{}", summary);
                }
                Err(e) => {
                    log::warn!("Course summary failed: {}", e);
                    println!("Error connecting to AI assistant: {}", e);
                }
            }
        }
        CoursesCommand::Delete { course } => {
            let course = app.find_course(&course)?;
            app.state.courses.delete_course(&course.id)?;
            println!("Deleted course '{}' and all of its files", course.title);
        }
    }

    Ok(())
}

fn path_prefix(path: &TreePath) -> String {
    if path.is_root() {
        "/".to_string()
    } else {
        format!("{}/", path.display())
    }
}

fn print_upload_report(report: &UploadReport, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "path": report.path.display(),
            "inserted": report.inserted.iter().map(|n| json!({
                "id": n.id,
                "name": n.name,
                "size": n.size(),
            })).collect::<Vec<_>>(),
            "rejected": report.rejected.iter().map(|r| json!({
                "path": r.path.display().to_string(),
                "reason": r.reason,
            })).collect::<Vec<_>>(),
        }))?,
        OutputFormat::Plain => {
            for node in &report.inserted {
                println!(
                    "{} {}{} ({})",
                    paint("added", Color::GREEN, use_color),
                    path_prefix(&report.path),
                    node.name,
                    format_size(node.size())
                );
            }
            for rejected in &report.rejected {
                println!(
                    "{} {}: {}",
                    paint("skipped", Color::RED, use_color),
                    rejected.path.display(),
                    rejected.reason
                );
            }
        }
    }
    Ok(())
}

const BROWSE_HELP: &str = "\
Commands:
  ls                 list the current folder
  cd NAME | .. | /   change folder
  pwd                show the current path
  tree               show the whole course tree
  mkdir NAME         create a folder here
  upload FILE...     upload files here
  rm NAME            remove a file or folder here
  mv NAME NEW        rename (NEW may contain spaces)
  help               show this help
  exit               leave";

/// Line-oriented file browser over one course
async fn browse(app: &mut App, course_id: &str, title: &str, use_color: bool) -> Result<()> {
    let mut path = TreePath::root();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", BROWSE_HELP);

    loop {
        // The tree may have changed under the path
        path = path.resolve(&app.state.courses.get_course(course_id)?.file_system);

        print!("{}:{}> ", title, path.display());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match browse_step(app, course_id, &mut path, command, &args, use_color).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("{}", paint(&format!("{:#}", e), Color::RED, use_color)),
        }
    }

    Ok(())
}

async fn browse_step(
    app: &mut App,
    course_id: &str,
    path: &mut TreePath,
    command: &str,
    args: &[&str],
    use_color: bool,
) -> Result<bool> {
    let joined = args.join(" ");

    match command {
        "exit" | "quit" => return Ok(false),
        "help" => println!("{}", BROWSE_HELP),
        "pwd" => println!("{}", path.display()),
        "ls" => {
            let tree = &app.state.courses.get_course(course_id)?.file_system;
            let items = path.current_items(tree);
            if items.is_empty() {
                println!("  (empty)");
            }
            for node in items {
                println!("  {}", entry_line(node, use_color));
            }
        }
        "tree" => {
            let tree = &app.state.courses.get_course(course_id)?.file_system;
            print_tree(tree, "", use_color);
        }
        "cd" => match joined.as_str() {
            "" | "/" => path.to_root(),
            ".." => path.ascend_to(path.len().saturating_sub(1)),
            name => {
                let tree = &app.state.courses.get_course(course_id)?.file_system;
                let node = find_entry(path.current_items(tree), name)?;
                path.descend(tree, &node.id)?;
            }
        },
        "mkdir" => {
            let folder = app.state.courses.create_folder(course_id, path, &joined)?;
            println!("Created {}/", folder.name);
        }
        "upload" => {
            if args.is_empty() {
                bail!("upload needs at least one file");
            }
            let files: Vec<PathBuf> = args.iter().map(PathBuf::from).collect();
            let report = app.state.courses.upload_files(course_id, path, &files).await?;
            *path = report.path.clone();
            print_upload_report(&report, &OutputFormat::Plain, use_color)?;
        }
        "rm" => {
            let id = {
                let tree = &app.state.courses.get_course(course_id)?.file_system;
                find_entry(path.current_items(tree), &joined)?.id.clone()
            };
            *path = app.state.courses.remove_node(course_id, path, &id)?;
        }
        "mv" => {
            let [name, rest @ ..] = args else {
                bail!("usage: mv NAME NEW");
            };
            if rest.is_empty() {
                bail!("usage: mv NAME NEW");
            }
            let id = {
                let tree = &app.state.courses.get_course(course_id)?.file_system;
                find_entry(path.current_items(tree), name)?.id.clone()
            };
            *path = app.state.courses.rename_node(course_id, path, &id, &rest.join(" "))?;
        }
        other => bail!("Unknown command '{}'. Type help for a list.", other),
    }

    Ok(true)
}
