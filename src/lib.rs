//! Text-driven file trees and infinite tickers.
//!
//! - [`tree`] turns indented or `tree`-command text into an ordered forest
//!   and offers a display model for hosts that draw it.
//! - [`ticker`] computes how many copies of a content pattern a seamless
//!   infinite loop needs, the keyframes that drive it, and the playback
//!   lifecycle around them.
//!
//! Neither core ever fails: malformed text yields a partial or empty
//! forest, and missing measurements yield a "not ready" layout.

pub mod config;
pub mod error;
pub mod file;
pub mod id;
pub mod ticker;
pub mod tree;

pub use error::{AppError, Result};
pub use id::generate_uuid;
