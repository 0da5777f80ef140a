use anyhow::Result;

use super::{print_json, short_id};
use crate::app::{find_by_id, App};
use crate::render::{paint, Color};
use crate::{OutputFormat, TodoCommand};

pub fn run(app: &mut App, cmd: TodoCommand, format: &OutputFormat, use_color: bool) -> Result<()> {
    let todos = &mut app.state.todos;

    match cmd {
        TodoCommand::List => match format {
            OutputFormat::Json => print_json(todos.list_todos())?,
            OutputFormat::Plain => {
                if todos.list_todos().is_empty() {
                    println!("Nothing to do.");
                }
                for todo in todos.list_todos() {
                    let line = if todo.completed {
                        paint(&format!("[x] {}", todo.text), Color::DIM, use_color)
                    } else {
                        format!("[ ] {}", todo.text)
                    };
                    println!("{}  {}", paint(short_id(&todo.id), Color::GRAY, use_color), line);
                }
            }
        },
        TodoCommand::Add { text } => {
            let todo = todos.add_todo(&text)?;
            println!("Added ({})", short_id(&todo.id));
        }
        TodoCommand::Done { id } => {
            let id = find_by_id(todos.list_todos(), &id, "todo")?.id.clone();
            let todo = todos.toggle(&id)?;
            println!("[{}] {}", if todo.completed { "x" } else { " " }, todo.text);
        }
        TodoCommand::Delete { id } => {
            let id = find_by_id(todos.list_todos(), &id, "todo")?.id.clone();
            todos.delete_todo(&id)?;
            println!("Deleted");
        }
    }

    Ok(())
}
