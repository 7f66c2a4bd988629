//! Random identifiers for hosts that need unique element ids.

use uuid::Uuid;

/// A random (version 4) UUID in its lowercase hyphenated form.
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}
