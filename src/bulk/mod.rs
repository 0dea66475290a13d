//! Bulk mutation of remote collections
//!
//! The one bulk operation here is drain deletion: repeatedly fetch page
//! one of a compacting collection and delete everything on it until the
//! fetch comes back empty.

mod drain;

pub use drain::delete_all;
