//! Navigation path through a course tree

use serde::{Deserialize, Serialize};

use super::models::FileSystemNode;
use super::tree::children_at;
use super::CourseError;

/// One folder on the way from the root to the current directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub id: String,
    pub name: String,
}

/// Ordered folder chain from the tree root; empty means the root itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePath {
    segments: Vec<PathSegment>,
}

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Folder ids from root, the form the tree editor takes
    pub fn ids(&self) -> Vec<String> {
        self.segments.iter().map(|s| s.id.clone()).collect()
    }

    /// Breadcrumb text such as `/Week1/Slides`
    pub fn display(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|s| format!("/{}", s.name))
            .collect()
    }

    /// Push a folder of the current directory onto the path
    pub fn descend(&mut self, tree: &[FileSystemNode], folder_id: &str) -> Result<(), CourseError> {
        let current = self.current_items(tree);
        let node = current
            .iter()
            .find(|n| n.id == folder_id)
            .ok_or_else(|| CourseError::NodeNotFound(folder_id.to_string()))?;

        if !node.is_folder() {
            return Err(CourseError::NotAFolder(node.name.clone()));
        }

        self.segments.push(PathSegment {
            id: node.id.clone(),
            name: node.name.clone(),
        });
        Ok(())
    }

    /// Truncate the path to `len` folders (0 = root)
    pub fn ascend_to(&mut self, len: usize) {
        self.segments.truncate(len);
    }

    pub fn to_root(&mut self) {
        self.segments.clear();
    }

    /// Re-derive this path against `tree`, keeping the longest prefix whose
    /// folders still exist. Names are refreshed from the tree.
    pub fn resolve(&self, tree: &[FileSystemNode]) -> TreePath {
        let mut level = tree;
        let mut segments = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            let Some(folder) = level.iter().find(|n| n.id == segment.id && n.is_folder()) else {
                log::debug!(
                    "Path truncated at '{}': folder {} no longer exists",
                    segment.name,
                    segment.id
                );
                break;
            };
            segments.push(PathSegment {
                id: folder.id.clone(),
                name: folder.name.clone(),
            });
            level = folder.children();
        }

        TreePath { segments }
    }

    /// Items of the directory at the end of the path. A path that no longer
    /// resolves shows the deepest directory that still does.
    pub fn current_items<'a>(&self, tree: &'a [FileSystemNode]) -> &'a [FileSystemNode] {
        let resolved = self.resolve(tree);
        children_at(tree, &resolved.ids()).unwrap_or(tree)
    }

    /// Build a path from folder names (case-insensitive), e.g. `["Week1", "Slides"]`
    pub fn from_names<S: AsRef<str>>(tree: &[FileSystemNode], names: &[S]) -> Result<TreePath, CourseError> {
        let mut path = TreePath::root();
        let mut level = tree;

        for name in names {
            let wanted = name.as_ref().to_lowercase();
            let matches: Vec<&FileSystemNode> = level
                .iter()
                .filter(|n| n.is_folder() && n.name.to_lowercase() == wanted)
                .collect();

            let folder = match matches.as_slice() {
                [] => return Err(CourseError::NodeNotFound(name.as_ref().to_string())),
                [folder] => *folder,
                _ => return Err(CourseError::AmbiguousName(name.as_ref().to_string())),
            };

            path.segments.push(PathSegment {
                id: folder.id.clone(),
                name: folder.name.clone(),
            });
            level = folder.children();
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::courses::models::NodeKind;
    use crate::courses::tree::{insert_node, remove_node, rename_node};
    use crate::ingest::FileKind;

    fn folder(id: &str, name: &str, children: Vec<FileSystemNode>) -> FileSystemNode {
        let mut node = FileSystemNode::new_folder(name.to_string());
        node.id = id.to_string();
        node.kind = NodeKind::Folder { children };
        node
    }

    fn sample_tree() -> Vec<FileSystemNode> {
        vec![folder(
            "a",
            "Week1",
            vec![folder("b", "Slides", vec![folder("c", "Extra", vec![])])],
        )]
    }

    fn path_to_c(tree: &[FileSystemNode]) -> TreePath {
        let mut path = TreePath::root();
        path.descend(tree, "a").unwrap();
        path.descend(tree, "b").unwrap();
        path.descend(tree, "c").unwrap();
        path
    }

    #[test]
    fn test_descend_and_ascend() {
        let tree = sample_tree();
        let mut path = path_to_c(&tree);
        assert_eq!(path.display(), "/Week1/Slides/Extra");
        assert_eq!(path.ids(), vec!["a", "b", "c"]);

        path.ascend_to(1);
        assert_eq!(path.display(), "/Week1");
        path.to_root();
        assert!(path.is_root());
        assert_eq!(path.display(), "/");
    }

    #[test]
    fn test_descend_rejects_missing_and_files() {
        let tree = insert_node(
            sample_tree(),
            &[],
            FileSystemNode::new_file("a.pdf".to_string(), FileKind::Document, 1, String::new()),
        )
        .nodes;
        let file_id = tree[1].id.clone();

        let mut path = TreePath::root();
        assert!(matches!(path.descend(&tree, "b"), Err(CourseError::NodeNotFound(_))));
        assert!(matches!(path.descend(&tree, &file_id), Err(CourseError::NotAFolder(_))));
        assert!(path.is_root());
    }

    #[test]
    fn test_resolve_valid_path_is_identity() {
        let tree = sample_tree();
        let path = path_to_c(&tree);
        assert_eq!(path.resolve(&tree), path);
        assert_eq!(path.resolve(&tree).resolve(&tree), path);
    }

    #[test]
    fn test_resolve_truncates_at_removed_folder() {
        let tree = sample_tree();
        let path = path_to_c(&tree);

        let tree = remove_node(tree, &["a".to_string()], "b").nodes;
        let resolved = path.resolve(&tree);
        assert_eq!(resolved.ids(), vec!["a"]);
        assert!(path.current_items(&tree).is_empty());
    }

    #[test]
    fn test_resolve_refreshes_renamed_folder() {
        let tree = sample_tree();
        let path = path_to_c(&tree);

        let tree = rename_node(tree, &[], "a", "Week One").nodes;
        assert_eq!(path.resolve(&tree).display(), "/Week One/Slides/Extra");
    }

    #[test]
    fn test_from_names() {
        let tree = sample_tree();
        let path = TreePath::from_names(&tree, &["week1", "SLIDES"]).unwrap();
        assert_eq!(path.ids(), vec!["a", "b"]);

        assert!(matches!(
            TreePath::from_names(&tree, &["Week2"]),
            Err(CourseError::NodeNotFound(_))
        ));

        let tree = insert_node(tree, &[], folder("d", "week1", vec![])).nodes;
        assert!(matches!(
            TreePath::from_names(&tree, &["Week1"]),
            Err(CourseError::AmbiguousName(_))
        ));
    }
}
