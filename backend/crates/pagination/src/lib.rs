//! Skip/limit window planning for paginated collection endpoints.
//!
//! Handlers receive pagination hints as untrusted query-string text. This
//! crate turns that text into a [`PageWindow`] via [`plan`], a total
//! function: absent or unparseable values degrade to defaults instead of
//! failing the request. The window's `limit >= 1` invariant is enforced at
//! construction and preserved across serde boundaries by a guarded DTO
//! round-trip, so a deserialised window is as trustworthy as a constructed
//! one.
//!
//! ```
//! use pagination::{plan, DEFAULT_PAGE_LIMIT};
//!
//! let window = plan(Some("10"), Some("not-a-number"), DEFAULT_PAGE_LIMIT);
//! assert_eq!(window.skip(), 10);
//! assert_eq!(window.limit(), DEFAULT_PAGE_LIMIT);
//! ```

use serde::{Deserialize, Serialize};

/// Page size applied when a request names no usable limit.
pub const DEFAULT_PAGE_LIMIT: u64 = 20;

/// Invalid window geometry rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// A window must yield at least one record slot.
    #[error("page limit must be at least 1")]
    ZeroLimit,
}

/// A validated skip/limit window over an ordered collection.
///
/// `skip` counts records to pass over from the start of the collection;
/// `limit` caps how many records the page may carry. `limit` is always at
/// least one; a zero-record page is expressed by a window that lands past
/// the end of the collection, never by a zero limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageWindowDto", into = "PageWindowDto")]
pub struct PageWindow {
    skip: u64,
    limit: u64,
}

impl PageWindow {
    /// Builds a window, rejecting geometry that violates the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ZeroLimit`] when `limit` is zero.
    pub const fn try_new(skip: u64, limit: u64) -> Result<Self, WindowError> {
        if limit == 0 {
            return Err(WindowError::ZeroLimit);
        }
        Ok(Self { skip, limit })
    }

    /// Records to pass over before the page begins.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum records the page may carry.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

/// Serde-facing shape of [`PageWindow`]; re-validated on the way in.
#[derive(Debug, Serialize, Deserialize)]
struct PageWindowDto {
    skip: u64,
    limit: u64,
}

impl TryFrom<PageWindowDto> for PageWindow {
    type Error = WindowError;

    fn try_from(dto: PageWindowDto) -> Result<Self, Self::Error> {
        Self::try_new(dto.skip, dto.limit)
    }
}

impl From<PageWindow> for PageWindowDto {
    fn from(window: PageWindow) -> Self {
        Self {
            skip: window.skip,
            limit: window.limit,
        }
    }
}

/// Plans a window from raw query-string text.
///
/// Total by contract: every input produces a valid window. A value that is
/// absent, fails to parse as a base-10 unsigned integer, or (for `limit`)
/// parses to zero degrades to its default: zero for `skip`,
/// `default_limit` for `limit`. A zero `default_limit` is promoted to one
/// so the window invariant holds regardless of configuration.
#[must_use]
pub fn plan(raw_skip: Option<&str>, raw_limit: Option<&str>, default_limit: u64) -> PageWindow {
    let skip = raw_skip
        .and_then(|text| text.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let limit = raw_limit
        .and_then(|text| text.trim().parse::<u64>().ok())
        .filter(|parsed| *parsed > 0)
        .unwrap_or(default_limit)
        .max(1);
    PageWindow { skip, limit }
}

/// One page of an ordered collection plus the window that produced it.
///
/// Validation lives in [`PageWindow`]; the envelope itself is plain data,
/// so fields are public. Transport adapters decide the wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records inside the window, in collection order.
    pub items: Vec<T>,
    /// The window the store applied when producing `items`.
    pub window: PageWindow,
}
