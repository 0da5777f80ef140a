//! Course data models
//!
//! A course owns a tree of files and folders for its notes and material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::{EncodedFile, FileKind};
use crate::storage::{new_id, now_millis, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Completion percentage, stored as entered
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    /// Root level of the course file tree
    #[serde(default)]
    pub file_system: Vec<FileSystemNode>,
}

impl Course {
    pub fn new(title: String, keywords: Vec<String>, platform: Option<String>) -> Self {
        Self {
            id: new_id(),
            title,
            keywords,
            platform,
            progress: 0.0,
            notes: String::new(),
            ai_summary: None,
            file_system: Vec::new(),
        }
    }
}

impl Record for Course {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A file or folder inside one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemNode {
    pub id: String,
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Folders carry children, files carry content; never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Folder {
        #[serde(default)]
        children: Vec<FileSystemNode>,
    },
    #[serde(rename_all = "camelCase")]
    File {
        file_type: FileKind,
        #[serde(default)]
        size: u64,
        #[serde(default)]
        data_url: String,
    },
}

impl FileSystemNode {
    pub fn new_folder(name: String) -> Self {
        Self {
            id: new_id(),
            name,
            created_at: now_millis(),
            kind: NodeKind::Folder {
                children: Vec::new(),
            },
        }
    }

    pub fn new_file(name: String, file_type: FileKind, size: u64, data_url: String) -> Self {
        Self {
            id: new_id(),
            name,
            created_at: now_millis(),
            kind: NodeKind::File {
                file_type,
                size,
                data_url,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Children of a folder; files have none
    pub fn children(&self) -> &[FileSystemNode] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::File { size, .. } => *size,
            NodeKind::Folder { .. } => 0,
        }
    }
}

impl From<EncodedFile> for FileSystemNode {
    fn from(file: EncodedFile) -> Self {
        let kind = file.kind();
        FileSystemNode::new_file(file.name, kind, file.size, file.data_url)
    }
}

/// Request to create a new course
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    /// Comma-separated keywords
    #[serde(default)]
    pub keywords: String,
    pub platform: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_json_shape() {
        let folder = FileSystemNode::new_folder("Week1".to_string());
        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json["type"], "folder");
        assert_eq!(json["children"], serde_json::json!([]));
        assert!(json["createdAt"].is_i64());
        assert!(json.get("dataUrl").is_none());

        let file = FileSystemNode::new_file(
            "notes.pdf".to_string(),
            FileKind::Document,
            2048,
            "data:application/pdf;base64,".to_string(),
        );
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["fileType"], "document");
        assert_eq!(json["size"], 2048);
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_reads_legacy_course_records() {
        let raw = r#"{
            "id": "1700000000000",
            "title": "Algebra",
            "keywords": ["math"],
            "platform": "Online",
            "progress": 0,
            "notes": "",
            "fileSystem": [
                {"id": "1", "name": "Week1", "type": "folder", "createdAt": 1700000000000,
                 "children": [
                    {"id": "2", "name": "board.png", "type": "file", "fileType": "img",
                     "createdAt": 1700000000001, "size": 12, "dataUrl": "data:image/png;base64,AA=="}
                 ]},
                {"id": "3", "name": "Empty", "type": "folder", "createdAt": 1700000000002}
            ]
        }"#;

        let course: Course = serde_json::from_str(raw).unwrap();
        assert_eq!(course.file_system.len(), 2);
        let week1 = &course.file_system[0];
        assert!(week1.is_folder());
        assert_eq!(week1.children()[0].size(), 12);
        assert!(matches!(
            week1.children()[0].kind,
            NodeKind::File { file_type: FileKind::Image, .. }
        ));
        assert!(course.file_system[1].children().is_empty());
    }
}
