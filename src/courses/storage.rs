//! Course storage operations
//!
//! Handles CRUD for courses (stored in courses.json) and every edit of a
//! course's file tree. Tree edits go through the path-directed rebuild in
//! `tree` and the whole course list is persisted after each one.

use std::path::PathBuf;

use futures_util::StreamExt;

use super::models::{Course, CreateCourseRequest, FileSystemNode, NodeKind};
use super::navigator::TreePath;
use super::tree::{self, Rebuilt};
use super::CourseError;
use crate::ingest::{self, decode_data_url};
use crate::storage::{Collection, CollectionStore, FileStorage};

type Result<T> = std::result::Result<T, CourseError>;

/// A file from an upload batch that was not added
#[derive(Debug, Clone)]
pub struct UploadRejection {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch upload
#[derive(Debug, Clone)]
pub struct UploadReport {
    /// Nodes inserted, in the order their reads completed
    pub inserted: Vec<FileSystemNode>,
    pub rejected: Vec<UploadRejection>,
    /// The target path re-resolved after the last insert
    pub path: TreePath,
}

pub struct CourseStorage {
    courses: CollectionStore<Course>,
    max_upload_bytes: u64,
}

impl CourseStorage {
    pub fn new(storage: FileStorage, max_upload_bytes: u64) -> Self {
        Self {
            courses: CollectionStore::open(storage, Collection::Courses),
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// List all courses, newest first
    pub fn list_courses(&self) -> &[Course] {
        self.courses.items()
    }

    pub fn get_course(&self, id: &str) -> Result<&Course> {
        self.courses
            .get(id)
            .ok_or_else(|| CourseError::CourseNotFound(id.to_string()))
    }

    pub fn create_course(&mut self, request: CreateCourseRequest) -> Result<Course> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(CourseError::Validation("Course title is required".to_string()));
        }

        let keywords: Vec<String> = request
            .keywords
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        let platform = request
            .platform
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "Online".to_string());

        let course = self
            .courses
            .create(Course::new(title, keywords, Some(platform)));

        log::info!("Created course '{}'", course.title);
        Ok(course)
    }

    /// Delete a course together with its whole file tree
    pub fn delete_course(&mut self, id: &str) -> Result<Course> {
        self.get_course(id)?;
        let removed = self.courses.delete(id)?;
        log::info!("Deleted course '{}'", removed.title);
        Ok(removed)
    }

    pub fn update_notes(&mut self, id: &str, notes: String) -> Result<Course> {
        self.get_course(id)?;
        Ok(self.courses.update(id, |c| c.notes = notes)?)
    }

    pub fn set_progress(&mut self, id: &str, progress: f64) -> Result<Course> {
        if !(0.0..=100.0).contains(&progress) {
            return Err(CourseError::Validation(
                "Progress must be between 0 and 100".to_string(),
            ));
        }
        self.get_course(id)?;
        Ok(self.courses.update(id, |c| c.progress = progress)?)
    }

    pub fn set_ai_summary(&mut self, id: &str, summary: String) -> Result<Course> {
        self.get_course(id)?;
        Ok(self.courses.update(id, |c| c.ai_summary = Some(summary))?)
    }

    // ===== Tree Operations =====

    /// Apply a path-directed edit to one course's tree and persist it.
    ///
    /// A path whose folder chain no longer exists changes nothing and
    /// reports `StalePath`. Returns `path` re-resolved against the new tree.
    fn edit_tree<F>(&mut self, course_id: &str, path: &TreePath, edit: F) -> Result<TreePath>
    where
        F: FnOnce(Vec<FileSystemNode>, &[String]) -> Rebuilt,
    {
        let ids = path.ids();
        let course = self.get_course(course_id)?;
        if tree::children_at(&course.file_system, &ids).is_none() {
            log::warn!(
                "Ignoring edit in course '{}': {} no longer exists",
                course.title,
                path.display()
            );
            return Err(CourseError::StalePath(path.display()));
        }

        let mut applied = false;
        let updated = self.courses.update(course_id, |course| {
            let nodes = std::mem::take(&mut course.file_system);
            let rebuilt = edit(nodes, &ids);
            course.file_system = rebuilt.nodes;
            applied = rebuilt.applied;
        })?;

        if !applied {
            return Err(CourseError::NodeNotFound(path.display()));
        }

        Ok(path.resolve(&updated.file_system))
    }

    /// Insert a node into the folder at `path` (root if empty)
    pub fn insert_node(
        &mut self,
        course_id: &str,
        path: &TreePath,
        node: FileSystemNode,
    ) -> Result<TreePath> {
        let name = node.name.clone();
        let resolved = self.edit_tree(course_id, path, |nodes, ids| {
            tree::insert_node(nodes, ids, node)
        })?;
        log::info!("Added '{}' at {}", name, resolved.display());
        Ok(resolved)
    }

    /// Create an empty folder in the folder at `path`
    pub fn create_folder(
        &mut self,
        course_id: &str,
        path: &TreePath,
        name: &str,
    ) -> Result<FileSystemNode> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CourseError::Validation("Folder name is required".to_string()));
        }

        let folder = FileSystemNode::new_folder(name.to_string());
        self.insert_node(course_id, path, folder.clone())?;
        Ok(folder)
    }

    /// Remove a file or folder (with everything below it) from the folder at `parent`
    pub fn remove_node(
        &mut self,
        course_id: &str,
        parent: &TreePath,
        node_id: &str,
    ) -> Result<TreePath> {
        self.node_in(course_id, parent, node_id)?;
        let resolved = self.edit_tree(course_id, parent, |nodes, ids| {
            tree::remove_node(nodes, ids, node_id)
        })?;
        log::info!("Removed node {} from {}", node_id, resolved.display());
        Ok(resolved)
    }

    pub fn rename_node(
        &mut self,
        course_id: &str,
        parent: &TreePath,
        node_id: &str,
        new_name: &str,
    ) -> Result<TreePath> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CourseError::Validation("Name is required".to_string()));
        }
        self.node_in(course_id, parent, node_id)?;
        self.edit_tree(course_id, parent, |nodes, ids| {
            tree::rename_node(nodes, ids, node_id, new_name)
        })
    }

    /// Look up a direct child of the folder at `parent`
    pub fn node_in(&self, course_id: &str, parent: &TreePath, node_id: &str) -> Result<&FileSystemNode> {
        let course = self.get_course(course_id)?;
        let level = tree::children_at(&course.file_system, &parent.ids())
            .ok_or_else(|| CourseError::StalePath(parent.display()))?;
        tree::find_child(level, node_id).ok_or_else(|| CourseError::NodeNotFound(node_id.to_string()))
    }

    /// Decode the stored content of a file node into its mime type and bytes
    pub fn file_content(
        &self,
        course_id: &str,
        parent: &TreePath,
        node_id: &str,
    ) -> Result<(String, Vec<u8>)> {
        let node = self.node_in(course_id, parent, node_id)?;
        match &node.kind {
            NodeKind::File { data_url, .. } => Ok(decode_data_url(data_url)?),
            NodeKind::Folder { .. } => Err(CourseError::NotAFile(node.name.clone())),
        }
    }

    /// Read and insert a batch of files into the folder at `path`.
    ///
    /// Reads run concurrently; each one that completes is inserted on its
    /// own. Oversize or unreadable files are skipped and reported, the rest
    /// of the batch continues.
    pub async fn upload_files(
        &mut self,
        course_id: &str,
        path: &TreePath,
        files: &[PathBuf],
    ) -> Result<UploadReport> {
        self.get_course(course_id)?;

        let mut report = UploadReport {
            inserted: Vec::new(),
            rejected: Vec::new(),
            path: path.clone(),
        };

        let mut batch = ingest::read_batch(files, self.max_upload_bytes);
        while let Some((file_path, result)) = batch.next().await {
            let outcome = match result {
                Ok(encoded) => {
                    let node = FileSystemNode::from(encoded);
                    self.insert_node(course_id, &report.path, node.clone())
                        .map(|resolved| (node, resolved))
                }
                Err(e) => Err(e.into()),
            };

            match outcome {
                Ok((node, resolved)) => {
                    report.path = resolved;
                    report.inserted.push(node);
                }
                Err(e) => {
                    log::warn!("Skipped {}: {}", file_path.display(), e);
                    report.rejected.push(UploadRejection {
                        path: file_path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
