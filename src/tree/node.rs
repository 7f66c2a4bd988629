use super::icons::{icon_category, IconCategory};

/// Whether a tree entry is drawn as a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// A node in a parsed tree. Each node owns its children in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Raw segment text; a trailing `/` or `\` marks a folder.
    pub name: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with the given children.
    pub fn with_children(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    fn has_trailing_separator(&self) -> bool {
        self.name.ends_with('/') || self.name.ends_with('\\')
    }

    /// A node is a folder if it has children or its name ends with a separator.
    pub fn kind(&self) -> NodeKind {
        if !self.children.is_empty() || self.has_trailing_separator() {
            NodeKind::Folder
        } else {
            NodeKind::File
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    /// Name without the trailing folder separator.
    pub fn display_name(&self) -> &str {
        self.name
            .strip_suffix('/')
            .or_else(|| self.name.strip_suffix('\\'))
            .unwrap_or(&self.name)
    }

    pub fn icon(&self) -> IconCategory {
        match self.kind() {
            NodeKind::Folder => IconCategory::Folder,
            NodeKind::File => icon_category(&self.name),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }
}
