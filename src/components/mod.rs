pub mod status_bar;
pub mod ticker;
pub mod tree;
