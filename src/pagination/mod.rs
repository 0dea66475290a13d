//! Wave-based concurrent pagination
//!
//! A pagination run opens with one sequential fetch that pins the
//! page-number bound for the whole run, then advances in waves of up to
//! `concurrency` concurrent fetches. Each wave is jointly awaited
//! before any of its pages is yielded, so output order is strictly
//! ascending by page number no matter how the network reorders
//! completions.

mod cursor;
mod paginate;

pub use cursor::{Cursor, Page};
pub use paginate::{get_all, paginate};
