//! Offset cursor and page envelope primitives shared by listing endpoints.
//!
//! Listing adapters follow one protocol:
//!
//! 1. Normalise the caller's `limit` and `cursor` into a [`PageRequest`].
//! 2. Ask storage for [`PageRequest::probe_size`] rows (one more than the
//!    limit) starting at [`PageRequest::offset`].
//! 3. Build the response with [`Page::from_probe`], which truncates the extra
//!    row and emits a continuation [`Cursor`] only when it existed.
//!
//! The cursor is a plain scan offset rendered as a decimal string. It is not a
//! keyset cursor: rows inserted or deleted between two page reads can shift
//! the window.
//!
//! # Examples
//!
//! ```
//! use pagination::{Cursor, Page, PageRequest};
//!
//! let request = PageRequest::new(Some(2), None);
//! assert_eq!(request.probe_size(), 3);
//!
//! let page = Page::from_probe(request, vec!["a", "b", "c"]);
//! assert_eq!(page.items(), &["a", "b"]);
//! assert_eq!(page.next_cursor(), Some(Cursor::from_offset(2)));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Page size applied when the caller omits a limit or supplies a
/// non-positive one.
pub const DEFAULT_LIMIT: usize = 20;

/// Errors raised while decoding a cursor token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token was empty once trimmed.
    #[error("cursor must not be empty")]
    Empty,
    /// The token is not a non-negative decimal offset.
    #[error("cursor is not a valid offset: {value}")]
    Malformed {
        /// Raw token supplied by the caller.
        value: String,
    },
}

/// Continuation token identifying the scan offset of the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Cursor {
    offset: u64,
}

impl Cursor {
    /// Build a cursor pointing at `offset` rows into the ordered scan.
    #[must_use]
    pub const fn from_offset(offset: u64) -> Self {
        Self { offset }
    }

    /// Number of rows to skip when resuming from this cursor.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Render the wire representation of the cursor.
    #[must_use]
    pub fn encode(self) -> String {
        self.offset.to_string()
    }

    /// Parse a wire token back into a cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Empty`] for blank input and
    /// [`CursorError::Malformed`] when the token is not a non-negative
    /// decimal integer.
    pub fn decode(raw: &str) -> Result<Self, CursorError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CursorError::Empty);
        }
        trimmed
            .parse::<u64>()
            .map(Self::from_offset)
            .map_err(|_| CursorError::Malformed {
                value: raw.to_owned(),
            })
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

impl FromStr for Cursor {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl From<Cursor> for String {
    fn from(value: Cursor) -> Self {
        value.encode()
    }
}

impl TryFrom<String> for Cursor {
    type Error = CursorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

/// Normalised paging window for one listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: usize,
    offset: u64,
}

impl PageRequest {
    /// Normalise caller-supplied paging parameters.
    ///
    /// A missing or non-positive `limit` becomes [`DEFAULT_LIMIT`]; a missing
    /// cursor starts at offset zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{Cursor, PageRequest, DEFAULT_LIMIT};
    ///
    /// let request = PageRequest::new(Some(-4), Some(Cursor::from_offset(40)));
    /// assert_eq!(request.limit(), DEFAULT_LIMIT);
    /// assert_eq!(request.offset(), 40);
    /// ```
    #[must_use]
    pub fn new(limit: Option<i64>, cursor: Option<Cursor>) -> Self {
        let normalised_limit = limit
            .filter(|value| *value > 0)
            .and_then(|value| usize::try_from(value).ok())
            .unwrap_or(DEFAULT_LIMIT);
        Self {
            limit: normalised_limit,
            offset: cursor.map_or(0, Cursor::offset),
        }
    }

    /// Maximum number of items returned to the caller.
    #[must_use]
    pub const fn limit(self) -> usize {
        self.limit
    }

    /// Rows to skip before the first returned item.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Rows to request from storage: one beyond the limit so a following
    /// page can be detected without a count query.
    #[must_use]
    pub const fn probe_size(self) -> usize {
        self.limit.saturating_add(1)
    }

    /// Cursor addressing the page after this one.
    #[must_use]
    pub fn following(self) -> Cursor {
        let step = u64::try_from(self.limit).unwrap_or(u64::MAX);
        Cursor::from_offset(self.offset.saturating_add(step))
    }
}

/// One page of listing results plus the continuation token, if any.
///
/// `nextCursor` is always serialised so consumers see a stable shape; it is
/// `null` on the final page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`PageRequest::probe_size`].
    ///
    /// When storage returned more than `limit` rows the surplus is dropped and
    /// a cursor for the next page is attached.
    #[must_use]
    pub fn from_probe(request: PageRequest, mut rows: Vec<T>) -> Self {
        let has_more = rows.len() > request.limit();
        rows.truncate(request.limit());
        Self {
            items: rows,
            next_cursor: has_more.then(|| request.following()),
        }
    }

    /// Items on this page in storage order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Cursor for the following page, absent on the last page.
    #[must_use]
    pub const fn next_cursor(&self) -> Option<Cursor> {
        self.next_cursor
    }

    /// Split the page into its items and continuation token.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<Cursor>) {
        (self.items, self.next_cursor)
    }

    /// Convert every item while keeping the continuation token.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}
