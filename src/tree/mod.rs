//! Text-driven file tree: grammar detection, parsing, classification and
//! a display model for hosts that draw the result.

pub mod format;
pub mod icons;
pub mod node;
pub mod parser;
pub mod view;

pub use format::{detect_format, TreeFormat};
pub use icons::{icon_category, IconCategory};
pub use node::{NodeKind, TreeNode};
pub use parser::{parse, parse_cli, parse_indented};
pub use view::{FlatRow, TreeView, ViewOptions};
