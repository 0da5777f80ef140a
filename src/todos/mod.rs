//! Dashboard todo list

use serde::{Deserialize, Serialize};

use crate::storage::{
    new_id, Collection, CollectionStore, FileStorage, Record, Result, StorageError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Record for TodoItem {
    fn id(&self) -> &str {
        &self.id
    }
}

pub struct TodoStorage {
    todos: CollectionStore<TodoItem>,
}

impl TodoStorage {
    pub fn new(storage: FileStorage) -> Self {
        Self {
            todos: CollectionStore::open(storage, Collection::Todos),
        }
    }

    pub fn list_todos(&self) -> &[TodoItem] {
        self.todos.items()
    }

    pub fn add_todo(&mut self, text: &str) -> Result<TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StorageError::Validation("Todo text is empty".to_string()));
        }
        Ok(self.todos.create(TodoItem {
            id: new_id(),
            text: text.to_string(),
            completed: false,
        }))
    }

    pub fn toggle(&mut self, id: &str) -> Result<TodoItem> {
        self.todos.update(id, |t| t.completed = !t.completed)
    }

    pub fn delete_todo(&mut self, id: &str) -> Result<()> {
        self.todos.delete(id)?;
        Ok(())
    }

    pub fn pending_count(&self) -> usize {
        self.todos.items().iter().filter(|t| !t.completed).count()
    }
}
