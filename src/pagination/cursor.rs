//! Pinned run cursor and yielded pages

use crate::envelope::Pagination;
use crate::types::JsonValue;

/// Position of a pagination run, pinned once from the first sequential
/// fetch.
///
/// Waves run concurrently and their responses land in arbitrary order,
/// so pagination metadata observed mid-run is never trusted; the bound
/// captured here is the only one the run consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Cursor {
    /// Pin a cursor from first-fetch pagination metadata
    pub fn from_pagination(pagination: &Pagination) -> Self {
        Self {
            current_page: pagination.current_page,
            total_pages: pagination.total_pages,
        }
    }

    /// Cursor for a response without pagination metadata: the run is a
    /// single page
    pub fn single(page: u32) -> Self {
        Self {
            current_page: page,
            total_pages: page,
        }
    }

    /// Check whether the run ends at the current page
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// One page yielded by a pagination run
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Items of this page, in server order
    pub items: Vec<JsonValue>,
    /// Page number this page was fetched as
    pub number: u32,
    /// The run's pinned page bound
    pub total_pages: u32,
}
