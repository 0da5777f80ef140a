//! Path-directed edits of a course file tree
//!
//! Every edit consumes the current root list and hands back a new one. The
//! folders along the target path are rebuilt on the way back up; every other
//! subtree is moved over untouched. Nothing is ever re-parented, so an edit
//! cannot introduce a cycle.

use serde::Serialize;

use super::models::{FileSystemNode, NodeKind};

/// Result of a tree edit
#[derive(Debug, Clone, PartialEq)]
pub struct Rebuilt {
    pub nodes: Vec<FileSystemNode>,
    /// False when the target folder (or node) was not found; `nodes` is then
    /// identical to the input
    pub applied: bool,
}

/// Rebuild the chain of folders named by `path`, handing the children list
/// of the last folder (or the root list for an empty path) to `edit`.
fn rebuild_at<F>(nodes: Vec<FileSystemNode>, path: &[String], edit: F) -> Rebuilt
where
    F: FnOnce(Vec<FileSystemNode>) -> Rebuilt,
{
    let Some((head, tail)) = path.split_first() else {
        return edit(nodes);
    };

    let mut edit = Some(edit);
    let mut applied = false;
    let nodes = nodes
        .into_iter()
        .map(|node| match node.kind {
            NodeKind::Folder { children } if node.id == *head => {
                let Some(edit) = edit.take() else {
                    return FileSystemNode {
                        kind: NodeKind::Folder { children },
                        ..node
                    };
                };
                let inner = rebuild_at(children, tail, edit);
                applied = inner.applied;
                FileSystemNode {
                    kind: NodeKind::Folder {
                        children: inner.nodes,
                    },
                    ..node
                }
            }
            kind => FileSystemNode { kind, ..node },
        })
        .collect();

    Rebuilt { nodes, applied }
}

/// Append `node` to the children of the folder at `path` (root if empty)
pub fn insert_node(nodes: Vec<FileSystemNode>, path: &[String], node: FileSystemNode) -> Rebuilt {
    rebuild_at(nodes, path, |mut children| {
        children.push(node);
        Rebuilt {
            nodes: children,
            applied: true,
        }
    })
}

/// Remove the child `node_id` from the folder at `parent_path`
pub fn remove_node(nodes: Vec<FileSystemNode>, parent_path: &[String], node_id: &str) -> Rebuilt {
    rebuild_at(nodes, parent_path, |mut children| {
        let before = children.len();
        children.retain(|child| child.id != node_id);
        let applied = children.len() != before;
        Rebuilt {
            nodes: children,
            applied,
        }
    })
}

/// Rename the child `node_id` of the folder at `parent_path`
pub fn rename_node(
    nodes: Vec<FileSystemNode>,
    parent_path: &[String],
    node_id: &str,
    new_name: &str,
) -> Rebuilt {
    rebuild_at(nodes, parent_path, |children| {
        let mut applied = false;
        let children = children
            .into_iter()
            .map(|child| {
                if child.id == node_id {
                    applied = true;
                    FileSystemNode {
                        name: new_name.to_string(),
                        ..child
                    }
                } else {
                    child
                }
            })
            .collect();
        Rebuilt {
            nodes: children,
            applied,
        }
    })
}

/// The children list of the folder at `path`, or `None` if the path dangles
pub fn children_at<'a>(nodes: &'a [FileSystemNode], path: &[String]) -> Option<&'a [FileSystemNode]> {
    let mut level = nodes;
    for id in path {
        let folder = level.iter().find(|n| n.id == *id && n.is_folder())?;
        level = folder.children();
    }
    Some(level)
}

/// Find a direct child by id
pub fn find_child<'a>(level: &'a [FileSystemNode], id: &str) -> Option<&'a FileSystemNode> {
    level.iter().find(|n| n.id == id)
}

/// Counts over a whole tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub folders: usize,
    pub files: usize,
    pub total_bytes: u64,
}

impl TreeStats {
    pub fn of(nodes: &[FileSystemNode]) -> Self {
        let mut stats = TreeStats::default();
        stats.accumulate(nodes);
        stats
    }

    fn accumulate(&mut self, nodes: &[FileSystemNode]) {
        for node in nodes {
            match &node.kind {
                NodeKind::Folder { children } => {
                    self.folders += 1;
                    self.accumulate(children);
                }
                NodeKind::File { size, .. } => {
                    self.files += 1;
                    self.total_bytes += size;
                }
            }
        }
    }
}
