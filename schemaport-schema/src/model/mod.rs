//! The canonical, dialect-neutral schema model.
//!
//! A [`ProjectVersion`] owns ordered [`Entity`] values and the
//! [`Relationship`] values linking them. Every element carries a UUID and a
//! [`Status`]; only active elements are rendered.

mod entity;
mod relationship;
mod types;
mod version;

pub use entity::*;
pub use relationship::*;
pub use types::*;
pub use version::*;

/// Version stamp for newly created elements (unix seconds).
pub fn current_version() -> i64 {
    chrono::Utc::now().timestamp()
}
