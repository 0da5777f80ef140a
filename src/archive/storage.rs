//! Archive storage, kept in archive.json

use std::collections::BTreeMap;

use super::models::{ArchiveItem, CreateArchiveItemRequest, YearCount};
use crate::ingest::decode_data_url;
use crate::storage::{clean, Collection, CollectionStore, FileStorage, Result, StorageError};

pub struct ArchiveStorage {
    items: CollectionStore<ArchiveItem>,
}

impl ArchiveStorage {
    pub fn new(storage: FileStorage) -> Self {
        Self {
            items: CollectionStore::open(storage, Collection::Archive),
        }
    }

    pub fn list_items(&self) -> &[ArchiveItem] {
        self.items.items()
    }

    pub fn get_item(&self, id: &str) -> Option<&ArchiveItem> {
        self.items.get(id)
    }

    pub fn add_item(&mut self, request: CreateArchiveItemRequest) -> Result<ArchiveItem> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(StorageError::Validation(
                "Archive item title is required".to_string(),
            ));
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in request.tags.iter().map(|t| t.trim()) {
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        let item = self.items.create(ArchiveItem::new(CreateArchiveItemRequest {
            title,
            category: clean(request.category),
            content: clean(request.content),
            url: clean(request.url),
            tags,
            ..request
        }));

        log::info!(
            "Archived '{}'{}",
            item.title,
            if item.has_attachment() { " with attachment" } else { "" }
        );
        Ok(item)
    }

    pub fn delete_item(&mut self, id: &str) -> Result<()> {
        let removed = self.items.delete(id)?;
        log::info!("Deleted archive item '{}'", removed.title);
        Ok(())
    }

    /// Substring match on title, any tag or category, optionally limited to one year
    pub fn search(&self, query: &str, year: Option<i32>) -> Vec<&ArchiveItem> {
        let query = query.trim().to_lowercase();
        self.items
            .items()
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&query)
                    || item.tags.iter().any(|t| t.to_lowercase().contains(&query))
                    || item.category.to_lowercase().contains(&query)
            })
            .filter(|item| year.map_or(true, |y| item.effective_year() == y))
            .collect()
    }

    /// Item count per effective year, newest year first
    pub fn year_counts(&self) -> Vec<YearCount> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for item in self.items.items() {
            *counts.entry(item.effective_year()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .rev()
            .map(|(year, count)| YearCount { year, count })
            .collect()
    }

    pub fn attachment_count(&self) -> usize {
        self.items.items().iter().filter(|i| i.has_attachment()).count()
    }

    /// Decoded attachment bytes with file name and mime type
    pub fn attachment(&self, id: &str) -> Result<(String, String, Vec<u8>)> {
        let item = self
            .get_item(id)
            .ok_or_else(|| StorageError::NotFound(format!("Archive item {}", id)))?;
        let data = item.file_data.as_deref().ok_or_else(|| {
            StorageError::NotFound(format!("Attachment for archive item {}", id))
        })?;
        let (mime, bytes) = decode_data_url(data)
            .map_err(|e| StorageError::Validation(format!("Corrupt attachment: {}", e)))?;
        let name = item.file_name.clone().unwrap_or_else(|| item.title.clone());
        Ok((name, mime, bytes))
    }
}
