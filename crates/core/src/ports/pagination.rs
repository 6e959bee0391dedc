//! Keyset (cursor) pagination types and page assembly.
//!
//! Listings are paginated with a seek predicate instead of numeric
//! offsets: the client replays an opaque cursor built from the last row
//! of the previous page, and the store fetches `limit + 1` rows strictly
//! beyond it under a composite `(sort key, id)` ordering. The extra row
//! only signals that another page exists and is dropped before returning.
//!
//! Rows are never skipped or duplicated across pages as long as the
//! sort-key/id pair is immutable during the scan; concurrent writes may
//! shift a row relative to a strictly-consistent snapshot, which is
//! accepted for a feed UI.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Default page size when the client sends no limit.
pub const DEFAULT_LIMIT: i64 = 10;

/// Hard cap on the page size, applied after validation.
pub const MAX_LIMIT: i64 = 100;

// =============================================================================
// Cursor
// =============================================================================

/// Opaque marker encoding the last-seen row of a paginated scan.
///
/// `id` breaks ties when several rows share the same sort key. `key` is
/// present for scans ordered by a non-id column (snippet title) and
/// absent for plain id-seek scans (comments, where ids are assigned in
/// creation order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub id: i64,
    pub key: Option<String>,
}

impl Cursor {
    /// Cursor for an id-ordered scan.
    pub fn by_id(id: i64) -> Self {
        Self { id, key: None }
    }

    /// Cursor for a `(key, id)`-ordered scan.
    pub fn keyed(id: i64, key: impl Into<String>) -> Self {
        Self {
            id,
            key: Some(key.into()),
        }
    }
}

// =============================================================================
// Ordering
// =============================================================================

/// Ordering direction for a paginated scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl OrderDirection {
    /// Parse the `orderby` query parameter, falling back to a
    /// per-endpoint default when absent.
    pub fn parse(raw: Option<&str>, default: Self) -> DomainResult<Self> {
        match raw {
            None => Ok(default),
            Some("asc") => Ok(Self::Asc),
            Some("desc") => Ok(Self::Desc),
            Some(other) => Err(DomainError::Validation(format!(
                "orderby must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }

    /// SQL keyword for this direction.
    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// =============================================================================
// Page Request
// =============================================================================

/// A validated pagination request: limit, optional resume cursor, and
/// scan direction.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub limit: i64,
    pub cursor: Option<Cursor>,
    pub direction: OrderDirection,
}

impl PageRequest {
    /// Validate raw client parameters into a page request.
    ///
    /// Rejects negative limits; caps the limit at [`MAX_LIMIT`].
    /// `limit = 0` is allowed and yields an empty page whose
    /// `has_next_page` reflects whether any row matches the base filter.
    pub fn new(
        limit: Option<i64>,
        cursor: Option<Cursor>,
        direction: OrderDirection,
    ) -> DomainResult<Self> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit < 0 {
            return Err(DomainError::Validation(format!(
                "limit must be non-negative, got {limit}"
            )));
        }
        Ok(Self {
            limit: limit.min(MAX_LIMIT),
            cursor,
            direction,
        })
    }

    /// Number of rows to fetch: one more than the limit, so the presence
    /// of a following page can be detected without a second query.
    pub fn fetch_limit(&self) -> i64 {
        self.limit + 1
    }

    /// The seek predicate for this request.
    pub fn seek(&self) -> SeekFilter {
        match &self.cursor {
            None => SeekFilter::None,
            Some(Cursor { id, key: None }) => SeekFilter::IdBeyond(*id),
            Some(Cursor {
                id,
                key: Some(key),
            }) => SeekFilter::KeyBeyond {
                key: key.clone(),
                id: *id,
            },
        }
    }
}

// =============================================================================
// Seek Predicate
// =============================================================================

/// The cursor predicate, kept as an explicit sum type so the branching
/// is testable without a live datastore. The storage layer translates
/// each variant to SQL with bound parameters; in-memory stores evaluate
/// [`SeekFilter::admits`] directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekFilter {
    /// First page: no cursor constraint.
    None,
    /// Resume strictly beyond `id` (id-ordered scans).
    IdBeyond(i64),
    /// Resume strictly beyond the composite `(key, id)` pair:
    /// `key > cursor.key OR (key = cursor.key AND id > cursor.id)` for
    /// ascending scans, mirrored with `<` for descending.
    KeyBeyond { key: String, id: i64 },
}

impl SeekFilter {
    /// Whether a row with the given sort key and id lies strictly beyond
    /// the cursor in the given direction.
    pub fn admits(&self, row_key: Option<&str>, row_id: i64, direction: OrderDirection) -> bool {
        match self {
            Self::None => true,
            Self::IdBeyond(id) => match direction {
                OrderDirection::Asc => row_id > *id,
                OrderDirection::Desc => row_id < *id,
            },
            Self::KeyBeyond { key, id } => {
                let Some(row_key) = row_key else {
                    return false;
                };
                match direction {
                    OrderDirection::Asc => {
                        row_key > key.as_str() || (row_key == key.as_str() && row_id > *id)
                    }
                    OrderDirection::Desc => {
                        row_key < key.as_str() || (row_key == key.as_str() && row_id < *id)
                    }
                }
            }
        }
    }
}

// =============================================================================
// Page
// =============================================================================

/// One page of a paginated scan.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// At most `limit` rows, in scan order.
    pub items: Vec<T>,
    /// Cursor resuming after the last item; `None` when the page is
    /// empty or is the last page.
    pub next_cursor: Option<Cursor>,
    /// True iff a row exists strictly beyond the last returned item.
    pub has_next_page: bool,
    /// The (validated) limit this page was produced with.
    pub limit: i64,
    /// Total rows matching the domain filter, computed independently of
    /// the cursor. Reflects the current total, not a snapshot as of the
    /// first page, so it can drift during concurrent writes.
    pub total_count: i64,
}

impl<T> Page<T> {
    /// Assemble a page from a `limit + 1` fetch.
    ///
    /// `cursor_of` builds the resume cursor from a row; it must use the
    /// same column the scan was ordered by.
    pub fn assemble<F>(mut rows: Vec<T>, limit: i64, total_count: i64, cursor_of: F) -> Self
    where
        F: Fn(&T) -> Cursor,
    {
        let has_next_page = rows.len() as i64 > limit;
        rows.truncate(limit as usize);

        let next_cursor = if has_next_page {
            rows.last().map(&cursor_of)
        } else {
            None
        };

        Self {
            items: rows,
            next_cursor,
            has_next_page,
            limit,
            total_count,
        }
    }

    /// Map page items while preserving pagination metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_next_page: self.has_next_page,
            limit: self.limit,
            total_count: self.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(id: i64, title: &str) -> (i64, String) {
        (id, title.to_string())
    }

    fn cursor_of(row: &(i64, String)) -> Cursor {
        Cursor::keyed(row.0, row.1.clone())
    }

    #[test]
    fn assemble_trims_extra_row_and_flags_next_page() {
        // Fetched limit + 1 = 3 rows for limit = 2
        let rows = vec![titled(1, "apple"), titled(2, "banana"), titled(3, "cherry")];
        let page = Page::assemble(rows, 2, 4, cursor_of);

        assert_eq!(page.items.len(), 2);
        assert!(page.has_next_page);
        assert_eq!(page.next_cursor, Some(Cursor::keyed(2, "banana")));
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn assemble_last_page_has_no_cursor() {
        let rows = vec![titled(3, "cherry"), titled(4, "date")];
        let page = Page::assemble(rows, 2, 4, cursor_of);

        assert_eq!(page.items.len(), 2);
        assert!(!page.has_next_page);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn assemble_empty_page() {
        let page = Page::assemble(Vec::new(), 10, 0, cursor_of);
        assert!(page.items.is_empty());
        assert!(!page.has_next_page);
        assert_eq!(page.next_cursor, None);
    }

    // Test critique: limit=0 doit quand même signaler l'existence de lignes
    #[test]
    fn assemble_limit_zero_still_detects_rows() {
        // fetch_limit = 1 brought back one row
        let page = Page::assemble(vec![titled(1, "apple")], 0, 1, cursor_of);
        assert!(page.items.is_empty());
        assert!(page.has_next_page);
        // No last item to build a cursor from
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn page_request_rejects_negative_limit() {
        let err = PageRequest::new(Some(-1), None, OrderDirection::Asc).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn page_request_caps_limit() {
        let req = PageRequest::new(Some(10_000), None, OrderDirection::Asc).unwrap();
        assert_eq!(req.limit, MAX_LIMIT);
        assert_eq!(req.fetch_limit(), MAX_LIMIT + 1);
    }

    #[test]
    fn order_direction_parse() {
        assert_eq!(
            OrderDirection::parse(None, OrderDirection::Desc).unwrap(),
            OrderDirection::Desc
        );
        assert_eq!(
            OrderDirection::parse(Some("asc"), OrderDirection::Desc).unwrap(),
            OrderDirection::Asc
        );
        assert!(OrderDirection::parse(Some("sideways"), OrderDirection::Asc).is_err());
    }

    #[test]
    fn seek_filter_tie_breaks_on_id() {
        let seek = SeekFilter::KeyBeyond {
            key: "banana".into(),
            id: 5,
        };
        // Same key, higher id: admitted ascending, rejected descending
        assert!(seek.admits(Some("banana"), 6, OrderDirection::Asc));
        assert!(!seek.admits(Some("banana"), 6, OrderDirection::Desc));
        // Same key, same id: never admitted (strictly beyond)
        assert!(!seek.admits(Some("banana"), 5, OrderDirection::Asc));
        assert!(!seek.admits(Some("banana"), 5, OrderDirection::Desc));
        // Later key admitted ascending regardless of id
        assert!(seek.admits(Some("cherry"), 1, OrderDirection::Asc));
        assert!(!seek.admits(Some("cherry"), 1, OrderDirection::Desc));
    }

    #[test]
    fn seek_filter_id_only() {
        let seek = SeekFilter::IdBeyond(10);
        assert!(seek.admits(None, 11, OrderDirection::Asc));
        assert!(!seek.admits(None, 10, OrderDirection::Asc));
        assert!(seek.admits(None, 9, OrderDirection::Desc));
    }

    // Scénario complet: ["apple","banana","cherry","date"], limit=2
    #[test]
    fn two_page_walk_over_four_titles() {
        let all = vec![
            titled(1, "apple"),
            titled(2, "banana"),
            titled(3, "cherry"),
            titled(4, "date"),
        ];

        let scan = |req: &PageRequest| -> Page<(i64, String)> {
            let seek = req.seek();
            let rows: Vec<_> = all
                .iter()
                .filter(|(id, title)| seek.admits(Some(title), *id, req.direction))
                .take(req.fetch_limit() as usize)
                .cloned()
                .collect();
            Page::assemble(rows, req.limit, all.len() as i64, cursor_of)
        };

        let req = PageRequest::new(Some(2), None, OrderDirection::Asc).unwrap();
        let page1 = scan(&req);
        assert_eq!(
            page1.items.iter().map(|r| r.1.as_str()).collect::<Vec<_>>(),
            vec!["apple", "banana"]
        );
        assert!(page1.has_next_page);
        assert_eq!(page1.next_cursor, Some(Cursor::keyed(2, "banana")));

        let req2 = PageRequest::new(Some(2), page1.next_cursor, OrderDirection::Asc).unwrap();
        let page2 = scan(&req2);
        assert_eq!(
            page2.items.iter().map(|r| r.1.as_str()).collect::<Vec<_>>(),
            vec!["cherry", "date"]
        );
        assert!(!page2.has_next_page);
        assert_eq!(page2.next_cursor, None);
    }

    #[test]
    fn cursor_past_the_end_yields_empty_final_page() {
        let all = vec![titled(1, "apple"), titled(2, "banana")];
        let req = PageRequest::new(
            Some(2),
            Some(Cursor::keyed(2, "banana")),
            OrderDirection::Asc,
        )
        .unwrap();
        let seek = req.seek();
        let rows: Vec<_> = all
            .iter()
            .filter(|(id, title)| seek.admits(Some(title), *id, req.direction))
            .cloned()
            .collect();
        let page = Page::assemble(rows, req.limit, 2, cursor_of);
        assert!(page.items.is_empty());
        assert!(!page.has_next_page);
        assert_eq!(page.next_cursor, None);
    }
}
