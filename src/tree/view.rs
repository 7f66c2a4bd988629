//! Display model for a parsed forest: visible roots, folder expansion,
//! flattened rows, selection and scrolling.

use std::collections::{HashMap, HashSet};

use super::icons::IconCategory;
use super::node::{NodeKind, TreeNode};

/// Index path from the visible roots down to a node.
pub type NodePath = Vec<usize>;

/// Options controlling how a forest is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Show the children of a lone root instead of the root itself.
    pub hide_root_name: bool,
    /// Whether folders start out expanded.
    pub expanded: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            hide_root_name: false,
            expanded: true,
        }
    }
}

/// A flattened representation of a tree node for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub name: String,
    pub path: NodePath,
    pub kind: NodeKind,
    pub icon: IconCategory,
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_last_sibling: bool,
    /// For each ancestor level below the roots, whether that ancestor is
    /// the last of its siblings. Drives the `│` continuation guides.
    pub ancestor_is_last: Vec<bool>,
}

impl FlatRow {
    /// Box-drawing prefix for this row. Top-level rows get none.
    pub fn prefix(&self) -> String {
        if self.depth == 0 {
            return String::new();
        }
        let mut prefix = String::new();
        for is_last in &self.ancestor_is_last {
            prefix.push_str(if *is_last { "    " } else { "│   " });
        }
        prefix.push_str(if self.is_last_sibling { "└── " } else { "├── " });
        prefix
    }
}

/// State for the tree view.
#[derive(Debug, Clone)]
pub struct TreeView {
    forest: Vec<TreeNode>,
    options: ViewOptions,
    collapsed: HashSet<NodePath>,
    rows: Vec<FlatRow>,
    pub selected_index: usize,
    pub scroll_offset: usize,
}

impl TreeView {
    pub fn new(forest: Vec<TreeNode>, options: ViewOptions) -> Self {
        let mut view = Self {
            forest,
            options,
            collapsed: HashSet::new(),
            rows: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
        };
        if !options.expanded {
            view.collapse_all();
        }
        view.flatten();
        view
    }

    /// Roots actually shown, honoring `hide_root_name`.
    pub fn roots(&self) -> &[TreeNode] {
        match self.forest.as_slice() {
            [only] if self.options.hide_root_name => only.children.as_slice(),
            forest => forest,
        }
    }

    /// Title for the view: the lone root's name, if there is exactly one.
    pub fn title(&self) -> Option<&str> {
        match self.forest.as_slice() {
            [only] => Some(only.display_name()),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&FlatRow> {
        self.rows.get(self.selected_index)
    }

    /// Swap in a freshly parsed forest. Folders are matched by their chain
    /// of names, so a collapsed folder stays collapsed when siblings move
    /// around it. Folders new to the forest start as `expanded` says.
    pub fn replace_forest(&mut self, forest: Vec<TreeNode>) {
        let old = self.folder_chains();
        let collapsed: HashSet<&Vec<String>> = self
            .collapsed
            .iter()
            .filter_map(|path| old.get(path))
            .collect();
        let known: HashSet<&Vec<String>> = old.values().collect();
        let expanded = self.options.expanded;

        self.forest = forest;
        self.collapsed = self
            .folder_chains()
            .into_iter()
            .filter(|(_, chain)| {
                collapsed.contains(chain) || (!expanded && !known.contains(chain))
            })
            .map(|(path, _)| path)
            .collect();
        self.flatten();
    }

    /// Rebuild the flat row list from the visible roots.
    pub fn flatten(&mut self) {
        let mut rows = Vec::new();
        let roots = self.roots();
        for (i, node) in roots.iter().enumerate() {
            self.flatten_node(node, vec![i], i + 1 == roots.len(), &[], &mut rows);
        }
        self.rows = rows;
        if !self.rows.is_empty() && self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len() - 1;
        }
    }

    fn flatten_node(
        &self,
        node: &TreeNode,
        path: NodePath,
        is_last: bool,
        ancestor_is_last: &[bool],
        rows: &mut Vec<FlatRow>,
    ) {
        let has_children = !node.children.is_empty();
        let is_expanded = has_children && !self.collapsed.contains(&path);
        let depth = path.len() - 1;

        rows.push(FlatRow {
            name: node.display_name().to_string(),
            path: path.clone(),
            kind: node.kind(),
            icon: node.icon(),
            depth,
            has_children,
            is_expanded,
            is_last_sibling: is_last,
            ancestor_is_last: ancestor_is_last.to_vec(),
        });

        if !is_expanded {
            return;
        }

        // Roots draw no connector, so they contribute no guide column.
        let mut guides = ancestor_is_last.to_vec();
        if depth > 0 {
            guides.push(is_last);
        }
        for (i, child) in node.children.iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(i);
            self.flatten_node(
                child,
                child_path,
                i + 1 == node.children.len(),
                &guides,
                rows,
            );
        }
    }

    /// Every expandable folder under the visible roots, keyed by path, with
    /// the display names leading to it.
    fn folder_chains(&self) -> HashMap<NodePath, Vec<String>> {
        fn walk(
            node: &TreeNode,
            path: &mut NodePath,
            chain: &mut Vec<String>,
            out: &mut HashMap<NodePath, Vec<String>>,
        ) {
            if node.children.is_empty() {
                return;
            }
            chain.push(node.display_name().to_string());
            out.insert(path.clone(), chain.clone());
            for (i, child) in node.children.iter().enumerate() {
                path.push(i);
                walk(child, path, chain, out);
                path.pop();
            }
            chain.pop();
        }

        let mut chains = HashMap::new();
        for (i, root) in self.roots().iter().enumerate() {
            walk(root, &mut vec![i], &mut Vec::new(), &mut chains);
        }
        chains
    }

    fn collapse_all(&mut self) {
        self.collapsed = self.folder_chains().into_keys().collect();
    }

    /// Expand or collapse the selected folder.
    pub fn toggle_selected(&mut self) {
        let Some(row) = self.selected() else {
            return;
        };
        if !row.has_children {
            return;
        }
        let path = row.path.clone();
        if !self.collapsed.remove(&path) {
            self.collapsed.insert(path);
        }
        self.flatten();
    }

    /// Expand the selected folder.
    pub fn expand_selected(&mut self) {
        let Some(row) = self.selected() else {
            return;
        };
        if row.has_children && !row.is_expanded {
            let path = row.path.clone();
            self.collapsed.remove(&path);
            self.flatten();
        }
    }

    /// Collapse the selected folder, or jump to its parent.
    pub fn collapse_selected(&mut self) {
        let Some(row) = self.selected() else {
            return;
        };
        let path = row.path.clone();

        if row.is_expanded {
            self.collapsed.insert(path);
            self.flatten();
            return;
        }

        if let Some((_, parent)) = path.split_last() {
            if let Some(i) = self.rows.iter().position(|r| r.path == parent) {
                self.selected_index = i;
            }
        }
    }

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }

    /// Move selection up by one row.
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.rows.len().saturating_sub(1);
    }

    /// Update the scroll offset to ensure the selected row is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }

    /// Draw every visible row as plain text with box-drawing connectors.
    pub fn render_plain(&self, use_icons: bool) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.prefix());
            out.push_str(row.icon.glyph(use_icons));
            out.push_str(&row.name);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse;

    fn view(text: &str) -> TreeView {
        TreeView::new(parse(text), ViewOptions::default())
    }

    fn names(view: &TreeView) -> Vec<&str> {
        view.rows().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_flatten_expanded_by_default() {
        let v = view("a/\n  b\n  c/\n    d\n");
        assert_eq!(names(&v), vec!["a", "b", "c", "d"]);
        let depths: Vec<usize> = v.rows().iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2]);
        assert_eq!(v.rows()[3].path, vec![0, 1, 0]);
    }

    #[test]
    fn test_collapsed_by_default() {
        let v = TreeView::new(
            parse("a/\n  b\n  c/\n    d\n"),
            ViewOptions {
                expanded: false,
                ..Default::default()
            },
        );
        assert_eq!(names(&v), vec!["a"]);
        assert!(!v.rows()[0].is_expanded);
    }

    #[test]
    fn test_hide_root_name_with_single_root() {
        let v = TreeView::new(
            parse("D:\\P\n├───x\n└───y\n"),
            ViewOptions {
                hide_root_name: true,
                ..Default::default()
            },
        );
        assert_eq!(names(&v), vec!["x", "y"]);
        assert_eq!(v.title(), Some("P"));
    }

    #[test]
    fn test_hide_root_name_ignored_with_many_roots() {
        let v = TreeView::new(
            parse("a\nb"),
            ViewOptions {
                hide_root_name: true,
                ..Default::default()
            },
        );
        assert_eq!(names(&v), vec!["a", "b"]);
        assert_eq!(v.title(), None);
    }

    #[test]
    fn test_toggle_and_collapse_navigation() {
        let mut v = view("a/\n  b\n  c/\n    d\n");
        v.selected_index = 2; // c
        v.toggle_selected();
        assert_eq!(names(&v), vec!["a", "b", "c"]);
        v.expand_selected();
        assert_eq!(names(&v), vec!["a", "b", "c", "d"]);

        v.selected_index = 3; // d is a file: collapse jumps to parent
        v.collapse_selected();
        assert_eq!(v.selected_index, 2);
        v.collapse_selected();
        assert_eq!(names(&v), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_folder_is_not_expandable() {
        let mut v = view("assets/\nmain.rs");
        assert_eq!(v.rows()[0].kind, NodeKind::Folder);
        assert!(!v.rows()[0].has_children);
        v.toggle_selected();
        assert_eq!(names(&v), vec!["assets", "main.rs"]);
    }

    #[test]
    fn test_selection_bounds_and_scroll() {
        let mut v = view("a\nb\nc\nd\ne");
        v.select_previous();
        assert_eq!(v.selected_index, 0);
        v.select_last();
        assert_eq!(v.selected_index, 4);
        v.select_next();
        assert_eq!(v.selected_index, 4);
        v.update_scroll(2);
        assert_eq!(v.scroll_offset, 3);
        v.select_first();
        v.update_scroll(2);
        assert_eq!(v.scroll_offset, 0);
    }

    #[test]
    fn test_replace_forest_clamps_selection() {
        let mut v = view("a\nb\nc");
        v.select_last();
        v.replace_forest(parse("only"));
        assert_eq!(v.selected_index, 0);
        assert_eq!(names(&v), vec!["only"]);
    }

    #[test]
    fn test_reload_keeps_collapsed_folder_when_sibling_inserted() {
        let mut v = view("a/\n  x\nb/\n  y\n");
        v.selected_index = 2; // b
        v.toggle_selected();
        assert_eq!(names(&v), vec!["a", "x", "b"]);

        v.replace_forest(parse("new/\n  z\na/\n  x\nb/\n  y\n"));
        assert_eq!(names(&v), vec!["new", "z", "a", "x", "b"]);
    }

    #[test]
    fn test_reload_does_not_collapse_folder_reusing_old_path() {
        let mut v = view("a/\n  x\nb/\n  y\n");
        v.toggle_selected(); // a at [0]
        assert_eq!(names(&v), vec!["a", "b", "y"]);

        // [0] now holds a different folder.
        v.replace_forest(parse("c/\n  w\nb/\n  y\n"));
        assert_eq!(names(&v), vec!["c", "w", "b", "y"]);
    }

    #[test]
    fn test_reload_collapses_new_folders_when_not_expanded() {
        let options = ViewOptions {
            expanded: false,
            ..Default::default()
        };
        let mut v = TreeView::new(parse("a/\n  x\n"), options);
        v.expand_selected();
        assert_eq!(names(&v), vec!["a", "x"]);

        v.replace_forest(parse("a/\n  x\n  sub/\n    deep\nb/\n  y\n"));
        assert_eq!(names(&v), vec!["a", "x", "sub", "b"]);
        assert!(v.rows()[0].is_expanded);
        assert!(!v.rows()[2].is_expanded);
        assert!(!v.rows()[3].is_expanded);
    }

    #[test]
    fn test_render_plain_connectors() {
        let v = view("root/\n  src/\n    main.rs\n  README.md\n");
        let expected = "\
[D] root
├── [D] src
│   └── [F] main.rs
└── [F] README.md
";
        assert_eq!(v.render_plain(false), expected);
    }

    #[test]
    fn test_render_plain_last_branch_has_no_guide() {
        let v = view("r\n  a\n  b/\n    c\n");
        let expected = "\
[D] r
├── [F] a
└── [D] b
    └── [F] c
";
        assert_eq!(v.render_plain(false), expected);
    }
}
