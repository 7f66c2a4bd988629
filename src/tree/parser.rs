//! Text tree parsing: indented lists and `tree` command output.
//!
//! Both grammars share the same depth-stack discipline: every open frame
//! is a node whose children are still being collected. A new line closes
//! every frame at its depth or deeper, then attaches to whatever frame is
//! left on top.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::format::{detect_format, normalize_line_endings, TreeFormat};
use super::node::TreeNode;

/// Indentation unit for the indented grammar.
const INDENT_UNIT: &str = "  ";

/// Columns per nesting level in `tree` output.
const CLI_COLUMN_WIDTH: usize = 4;

/// Characters that count as leading whitespace when measuring CLI depth.
const CLI_CONNECTOR_CHARS: &[char] = &['│', '├', '└', '─', '|', '+', '\\'];

/// Name following a box-drawing connector run (`├───name`, `└── name`).
static BOX_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[├└+\\]─+\s*(.+)$").expect("box name regex"));

/// Name following an ASCII connector (`+---name`, `\---name`, `|---name`).
static ASCII_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[|+\\]---\s*(.+)$").expect("ascii name regex"));

struct Frame {
    depth: usize,
    node: TreeNode,
}

/// Assembles a forest from `(depth, name)` lines.
#[derive(Default)]
struct ForestBuilder {
    roots: Vec<TreeNode>,
    open: Vec<Frame>,
}

impl ForestBuilder {
    /// Close every open frame with depth `>= depth`, handing each node to
    /// its parent (or to the forest when no parent is left).
    fn close_from(&mut self, depth: usize) {
        while self.open.last().is_some_and(|top| top.depth >= depth) {
            let Some(frame) = self.open.pop() else {
                break;
            };
            match self.open.last_mut() {
                Some(parent) => parent.node.children.push(frame.node),
                None => self.roots.push(frame.node),
            }
        }
    }

    /// Start a new top-level root, closing everything still open.
    fn open_root(&mut self, name: String) {
        self.close_from(0);
        self.open.push(Frame {
            depth: 0,
            node: TreeNode::new(name),
        });
    }

    /// Attach a node below the nearest shallower open frame.
    ///
    /// Returns `false` (and drops the line) when no such frame exists.
    fn open_child(&mut self, depth: usize, name: String) -> bool {
        self.close_from(depth);
        if self.open.is_empty() {
            return false;
        }
        self.open.push(Frame {
            depth,
            node: TreeNode::new(name),
        });
        true
    }

    fn finish(mut self) -> Vec<TreeNode> {
        self.close_from(0);
        self.roots
    }
}

/// Parse tree text in either grammar, auto-detecting which one it uses.
///
/// Never fails: malformed lines are skipped and the worst case is an
/// empty forest.
pub fn parse(text: &str) -> Vec<TreeNode> {
    let normalized = normalize_line_endings(text);
    let format = detect_format(&normalized);
    let forest = match format {
        TreeFormat::CliDrawn => parse_cli(&normalized),
        TreeFormat::Indented => parse_indented(&normalized),
    };
    debug!(
        format = format.label(),
        roots = forest.len(),
        "parsed tree text"
    );
    forest
}

/// Parse the two-space indented grammar. Depth-0 lines start new roots.
pub fn parse_indented(text: &str) -> Vec<TreeNode> {
    let normalized = normalize_line_endings(text);
    let mut builder = ForestBuilder::default();

    for line in normalized.trim().split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        let mut rest = line;
        let mut depth = 0;
        while let Some(stripped) = rest.strip_prefix(INDENT_UNIT) {
            depth += 1;
            rest = stripped;
        }

        let name = rest.trim();
        if name.is_empty() {
            continue;
        }

        if depth == 0 {
            builder.open_root(name.to_string());
        } else if !builder.open_child(depth, name.to_string()) {
            trace!(depth, line, "dropping indented line without a parent");
        }
    }

    builder.finish()
}

/// Root name from the first line of `tree` output: the last path segment.
fn cli_root_name(root_line: &str) -> &str {
    let without_trailing = root_line
        .strip_suffix(['/', '\\'])
        .unwrap_or(root_line);
    without_trailing
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(root_line)
}

/// Depth of a connector line relative to the synthesized root at depth 0.
fn cli_depth(line: &str) -> usize {
    let leading = line
        .chars()
        .take_while(|c| *c == ' ' || CLI_CONNECTOR_CHARS.contains(c))
        .count();
    leading / CLI_COLUMN_WIDTH + 1
}

fn cli_entry_name(line: &str) -> Option<&str> {
    let captures = BOX_NAME_REGEX
        .captures(line)
        .or_else(|| ASCII_NAME_REGEX.captures(line))?;
    let name = captures.get(1)?.as_str().trim();
    (!name.is_empty()).then_some(name)
}

/// Parse `tree` command output into a single-root forest.
pub fn parse_cli(text: &str) -> Vec<TreeNode> {
    let normalized = normalize_line_endings(text);
    let mut lines = normalized
        .split('\n')
        .map(str::trim_end)
        .filter(|line| !line.is_empty());

    let Some(first) = lines.next() else {
        return Vec::new();
    };

    let root_line = first.trim();
    let mut builder = ForestBuilder::default();
    builder.open_root(cli_root_name(root_line).to_string());

    for line in lines {
        let Some(name) = cli_entry_name(line) else {
            trace!(line, "skipping line without a connector");
            continue;
        };
        builder.open_child(cli_depth(line), name.to_string());
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> TreeNode {
        TreeNode::new(name)
    }

    fn node(name: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::with_children(name, children)
    }

    #[test]
    fn test_indented_nested_folders() {
        let forest = parse("a/\n  b\n  c/\n    d\n");
        assert_eq!(
            forest,
            vec![node("a/", vec![leaf("b"), node("c/", vec![leaf("d")])])]
        );
    }

    #[test]
    fn test_single_line_is_single_leaf() {
        let forest = parse("README.md");
        assert_eq!(forest, vec![leaf("README.md")]);
        assert_eq!(forest[0].icon().as_str(), "readme");
    }

    #[test]
    fn test_cli_windows_box_drawing() {
        let forest = parse("D:\\P\n├───x\n└───y\n");
        assert_eq!(forest, vec![node("P", vec![leaf("x"), leaf("y")])]);
    }

    #[test]
    fn test_indented_multiple_roots() {
        let forest = parse("one\ntwo\nthree");
        assert_eq!(forest, vec![leaf("one"), leaf("two"), leaf("three")]);
        assert!(forest.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn test_indented_root_resets_stack() {
        let forest = parse("a/\n  x\nb/\n  y");
        assert_eq!(
            forest,
            vec![node("a/", vec![leaf("x")]), node("b/", vec![leaf("y")])]
        );
    }

    #[test]
    fn test_indented_blank_lines_and_crlf() {
        let forest = parse("\r\nsrc/\r\n\r\n  main.rs\r\n  lib.rs\r\n\r\n");
        assert_eq!(
            forest,
            vec![node("src/", vec![leaf("main.rs"), leaf("lib.rs")])]
        );
    }

    #[test]
    fn test_indented_partial_indent_truncates() {
        // Three spaces is one full unit plus a stray space that gets trimmed.
        let forest = parse("a\n   b\n     c");
        assert_eq!(forest, vec![node("a", vec![node("b", vec![leaf("c")])])]);
    }

    #[test]
    fn test_indented_skipped_level_attaches_to_nearest_ancestor() {
        let forest = parse("a\n    deep\n  shallow");
        assert_eq!(
            forest,
            vec![node("a", vec![leaf("deep"), leaf("shallow")])]
        );
    }

    #[test]
    fn test_indented_sibling_after_deep_branch() {
        let text = "root/\n  a/\n    a1\n    a2/\n      a2x\n  b\n";
        let forest = parse(text);
        assert_eq!(
            forest,
            vec![node(
                "root/",
                vec![
                    node("a/", vec![leaf("a1"), node("a2/", vec![leaf("a2x")])]),
                    leaf("b"),
                ]
            )]
        );
    }

    #[test]
    fn test_indented_children_are_one_level_deeper() {
        let forest = parse("a\n  b\n    c\n  d\n    e\n      f");
        let a = &forest[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].children, vec![leaf("c")]);
        assert_eq!(a.children[1].children, vec![node("e", vec![leaf("f")])]);
    }

    #[test]
    fn test_indented_leading_indent_on_first_line_is_ignored() {
        let forest = parse("  a\n    b");
        assert_eq!(forest, vec![node("a", vec![leaf("b")])]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\n  \t\n").is_empty());
        assert!(parse_cli("").is_empty());
    }

    #[test]
    fn test_cli_unix_tree_output() {
        let text = "\
.
├── Cargo.toml
├── src
│   ├── lib.rs
│   └── tree
│       └── mod.rs
└── README.md

2 directories, 4 files
";
        let forest = parse(text);
        assert_eq!(
            forest,
            vec![node(
                ".",
                vec![
                    leaf("Cargo.toml"),
                    node(
                        "src",
                        vec![leaf("lib.rs"), node("tree", vec![leaf("mod.rs")])]
                    ),
                    leaf("README.md"),
                ]
            )]
        );
    }

    #[test]
    fn test_cli_windows_nested() {
        let text = "C:\\Users\\me\\PROJECT\n├───src\n│   └───components\n└───dist\n";
        let forest = parse(text);
        assert_eq!(
            forest,
            vec![node(
                "PROJECT",
                vec![node("src", vec![leaf("components")]), leaf("dist")]
            )]
        );
    }

    #[test]
    fn test_cli_windows_ascii() {
        let text = "C:\\PROJECT\n+---src\n|   \\---lib\n\\---dist\n";
        let forest = parse(text);
        assert_eq!(
            forest,
            vec![node(
                "PROJECT",
                vec![node("src", vec![leaf("lib")]), leaf("dist")]
            )]
        );
    }

    #[test]
    fn test_cli_skips_lines_without_connector() {
        let text = "D:\\P\n├───src\n│   │   main.js\n│   │\n└───dist\n";
        let forest = parse(text);
        assert_eq!(forest, vec![node("P", vec![leaf("src"), leaf("dist")])]);
    }

    #[test]
    fn test_cli_root_name_variants() {
        assert_eq!(cli_root_name("/home/me/project/"), "project");
        assert_eq!(cli_root_name("D:\\work\\site"), "site");
        assert_eq!(cli_root_name("D:\\"), "D:");
        assert_eq!(cli_root_name("project"), "project");
        assert_eq!(cli_root_name("/"), "/");
    }

    #[test]
    fn test_cli_depth_heuristic() {
        assert_eq!(cli_depth("├───x"), 2);
        assert_eq!(cli_depth("│   └───x"), 3);
        assert_eq!(cli_depth("+---x"), 1);
        assert_eq!(cli_depth("|   \\---x"), 2);
    }

    #[test]
    fn test_cli_always_single_root() {
        let forest = parse("root\n├── a\nloose line\n└── b");
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children, vec![leaf("a"), leaf("b")]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let inputs = [
            "a/\n  b\n  c/\n    d\n",
            "D:\\P\n├───x\n│   └───z\n└───y\n",
            "x\n      y\n  z\nw",
        ];
        for text in inputs {
            assert_eq!(parse(text), parse(text));
        }
    }
}
