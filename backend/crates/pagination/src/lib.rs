//! Page-number pagination primitives shared by user directory endpoints.
//!
//! A [`PageRequest`] is a validated `(page, size)` pair: `page` is 1-based and
//! `size` is bounded by [`MAX_PAGE_SIZE`]. [`paginate`] slices an ordered
//! collection into a [`Page`] envelope; stores that window their own queries
//! use [`PageRequest::offset`] and [`PageRequest::limit`] together with
//! [`Page::from_parts`].
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, paginate};
//!
//! let users: Vec<u32> = (1..=12).collect();
//! let request = PageRequest::new(3, 5).expect("valid request");
//! let page = paginate(&users, request);
//! assert_eq!(page.items, vec![11, 12]);
//! assert_eq!(page.total, 12);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Page number used when the client omits `page`.
pub const DEFAULT_PAGE: u64 = 1;
/// Page length used when the client omits `size`.
pub const DEFAULT_PAGE_SIZE: u64 = 6;
/// Largest page length a client may request.
pub const MAX_PAGE_SIZE: u64 = 100;
/// Smallest acceptable value for both `page` and `size`.
pub const MIN_PAGE_VALUE: u64 = 1;

/// Which page parameter failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParam {
    /// The 1-based page index.
    Page,
    /// The requested page length.
    Size,
}

impl PageParam {
    /// Query-string name of the parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Size => "size",
        }
    }
}

/// Validation failures raised by [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// `page` or `size` is below [`MIN_PAGE_VALUE`].
    #[error("{} must be greater than or equal to {min}, got {value}", param.as_str())]
    BelowMinimum {
        /// Offending parameter.
        param: PageParam,
        /// Value supplied by the caller.
        value: i64,
        /// Inclusive lower bound.
        min: u64,
    },
    /// `size` exceeds [`MAX_PAGE_SIZE`].
    #[error("{} must be less than or equal to {max}, got {value}", param.as_str())]
    AboveMaximum {
        /// Offending parameter.
        param: PageParam,
        /// Value supplied by the caller.
        value: i64,
        /// Inclusive upper bound.
        max: u64,
    },
}

impl PageRequestError {
    /// Parameter that failed validation.
    #[must_use]
    pub const fn param(&self) -> PageParam {
        match self {
            Self::BelowMinimum { param, .. } | Self::AboveMaximum { param, .. } => *param,
        }
    }

    /// Value rejected by validation.
    #[must_use]
    pub const fn value(&self) -> i64 {
        match self {
            Self::BelowMinimum { value, .. } | Self::AboveMaximum { value, .. } => *value,
        }
    }
}

/// Validated page-number request.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate raw `page` and `size` values.
    ///
    /// `page` is checked before `size`, so a request with both out of range
    /// reports the page failure.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when either value is out of bounds.
    pub fn new(page: i64, size: i64) -> Result<Self, PageRequestError> {
        let page = bounded(PageParam::Page, page, None)?;
        let size = bounded(PageParam::Size, size, Some(MAX_PAGE_SIZE))?;
        Ok(Self { page, size })
    }

    /// Validate optional values, substituting the defaults for absent ones.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when a supplied value is out of bounds.
    pub fn from_optional(page: Option<i64>, size: Option<i64>) -> Result<Self, PageRequestError> {
        let defaults = Self::default();
        Self::new(
            page.unwrap_or_else(|| saturating_i64(defaults.page)),
            size.unwrap_or_else(|| saturating_i64(defaults.size)),
        )
    }

    /// 1-based page index.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Requested page length.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size
    }
}

fn bounded(param: PageParam, value: i64, max: Option<u64>) -> Result<u64, PageRequestError> {
    let Ok(unsigned) = u64::try_from(value) else {
        return Err(PageRequestError::BelowMinimum {
            param,
            value,
            min: MIN_PAGE_VALUE,
        });
    };
    if unsigned < MIN_PAGE_VALUE {
        return Err(PageRequestError::BelowMinimum {
            param,
            value,
            min: MIN_PAGE_VALUE,
        });
    }
    match max {
        Some(max) if unsigned > max => Err(PageRequestError::AboveMaximum { param, value, max }),
        _ => Ok(unsigned),
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Paginated envelope returned by list endpoints.
///
/// Serialises as `{"items": [...], "total": n, "page": p, "size": s}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    /// Items on the requested page, in store order.
    pub items: Vec<T>,
    /// Number of items in the whole collection.
    pub total: u64,
    /// 1-based page index that was requested.
    pub page: u64,
    /// Page length that was requested.
    pub size: u64,
}

impl<T> Page<T> {
    /// Build an envelope from an already windowed query result.
    #[must_use]
    pub const fn from_parts(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
        }
    }
}

/// Slice `items` into the page described by `request`.
///
/// Items keep their original order. A request beyond the final page yields
/// an empty `items` list with the real `total`.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total = items.len();
    let start = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let end = start.saturating_add(limit).min(total);
    let window = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();
    Page::from_parts(
        window,
        u64::try_from(total).unwrap_or(u64::MAX),
        request,
    )
}

#[cfg(test)]
mod tests {
    //! Unit coverage for request validation and slicing.

    use super::*;
    use rstest::rstest;

    fn collection(len: u32) -> Vec<u32> {
        (1..=len).collect()
    }

    #[rstest]
    #[case(1, 5, vec![1, 2, 3, 4, 5])]
    #[case(2, 5, vec![6, 7, 8, 9, 10])]
    #[case(3, 5, vec![11, 12])]
    #[case(4, 5, Vec::new())]
    #[case(1000, 5, Vec::new())]
    #[case(1, 100, (1..=12).collect())]
    fn paginate_windows_the_collection(
        #[case] page: i64,
        #[case] size: i64,
        #[case] expected: Vec<u32>,
    ) {
        let request = PageRequest::new(page, size).expect("valid request");
        let result = paginate(&collection(12), request);

        assert_eq!(result.items, expected);
        assert_eq!(result.total, 12);
        assert_eq!(result.page, page.unsigned_abs());
        assert_eq!(result.size, size.unsigned_abs());
    }

    #[rstest]
    fn paginate_never_exceeds_page_size() {
        let items = collection(37);
        for size in 1..=MAX_PAGE_SIZE {
            for page in 1..=40 {
                let request = PageRequest::new(page, saturating_i64(size)).expect("valid");
                let result = paginate(&items, request);
                assert!(u64::try_from(result.items.len()).expect("fits") <= size);
                if size.saturating_mul(request.page() - 1) >= 37 {
                    assert!(result.items.is_empty(), "page {page} size {size}");
                }
            }
        }
    }

    #[rstest]
    fn paginate_reports_same_total_for_every_page() {
        let items = collection(12);
        let totals: Vec<u64> = (1..=4)
            .map(|page| paginate(&items, PageRequest::new(page, 5).expect("valid")).total)
            .collect();
        assert!(totals.iter().all(|total| *total == 12));
    }

    #[rstest]
    fn paginate_handles_empty_collections() {
        let result = paginate::<u32>(&[], PageRequest::default());
        assert!(result.items.is_empty());
        assert_eq!(result.total, 0);
    }

    #[rstest]
    fn consecutive_pages_are_disjoint() {
        let items = collection(12);
        let first = paginate(&items, PageRequest::new(1, 5).expect("valid"));
        let second = paginate(&items, PageRequest::new(2, 5).expect("valid"));
        assert!(first.items.iter().all(|item| !second.items.contains(item)));
    }

    #[rstest]
    #[case(0, 6, PageParam::Page)]
    #[case(-3, 6, PageParam::Page)]
    #[case(1, 0, PageParam::Size)]
    #[case(1, -1, PageParam::Size)]
    fn new_rejects_values_below_minimum(
        #[case] page: i64,
        #[case] size: i64,
        #[case] expected_param: PageParam,
    ) {
        let err = PageRequest::new(page, size).expect_err("out of range");
        assert!(matches!(err, PageRequestError::BelowMinimum { .. }));
        assert_eq!(err.param(), expected_param);
    }

    #[rstest]
    fn new_rejects_oversized_pages() {
        let err = PageRequest::new(1, 150).expect_err("too large");
        assert_eq!(
            err,
            PageRequestError::AboveMaximum {
                param: PageParam::Size,
                value: 150,
                max: MAX_PAGE_SIZE,
            }
        );
        assert_eq!(err.to_string(), "size must be less than or equal to 100, got 150");
    }

    #[rstest]
    fn new_accepts_the_maximum_page_size() {
        let request = PageRequest::new(1, 100).expect("boundary is inclusive");
        assert_eq!(request.size(), MAX_PAGE_SIZE);
    }

    #[rstest]
    fn page_is_checked_before_size() {
        let err = PageRequest::new(0, 500).expect_err("both invalid");
        assert_eq!(err.param(), PageParam::Page);
    }

    #[rstest]
    fn from_optional_applies_defaults() {
        let request = PageRequest::from_optional(None, None).expect("defaults are valid");
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);

        let request = PageRequest::from_optional(Some(2), None).expect("valid");
        assert_eq!(request.page(), 2);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    fn offset_saturates_for_huge_pages() {
        let request = PageRequest::new(i64::MAX, 100).expect("valid");
        assert_eq!(request.offset(), u64::MAX);
        let result = paginate(&collection(3), request);
        assert!(result.items.is_empty());
    }

    #[rstest]
    fn page_serialises_as_envelope() {
        let page = Page::from_parts(vec!["a"], 7, PageRequest::new(2, 1).expect("valid"));
        let value = serde_json::to_value(&page).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({ "items": ["a"], "total": 7, "page": 2, "size": 1 })
        );
    }
}
