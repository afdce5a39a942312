//! List-query normalization shared by every paginated listing endpoint.
//!
//! Query parameters arrive untyped and untrusted. [`normalize`] turns them
//! into a bounded [`ListQuery`] and never fails: unparsable numbers fall back
//! to defaults and out-of-range numbers are clamped instead of rejected.
//! That leniency can hide client bugs, so substitutions are logged at
//! `debug` level. Callers that want rejection use [`normalize_strict`].
//!
//! `sortBy` is passed through untouched. The data layer owns the schema and
//! must check it against its own allow-list before building a query.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;
pub const MIN_LIMIT: u64 = 1;
pub const MAX_LIMIT: u64 = 100;
/// Pages above this are clamped so `offset` always fits a SQL `BIGINT`.
pub const MAX_PAGE: u64 = u32::MAX as u64;

pub const PAGE_FIELD: &str = "page";
pub const LIMIT_FIELD: &str = "limit";
pub const SORT_BY_FIELD: &str = "sortBy";
pub const SORT_ORDER_FIELD: &str = "sortOrder";

/// A single scalar as supplied by the client.
///
/// Query strings only ever produce [`QueryValue::Text`]; JSON bodies keep
/// their scalar type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Null,
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl QueryValue {
    /// Base-10 integer coercion.
    ///
    /// Text is read as an optional sign followed by the leading run of
    /// digits, so `"2.7"` is 2, `" 12abc"` is 12 and `"abc"` is `None`.
    /// Floats truncate toward zero. Booleans and nulls never coerce.
    pub fn coerce_int(&self) -> Option<i64> {
        match self {
            QueryValue::Integer(value) => Some(*value),
            QueryValue::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            QueryValue::Text(text) => parse_int_prefix(text),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            QueryValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Display for QueryValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryValue::Null => f.write_str("null"),
            QueryValue::Integer(value) => write!(f, "{value}"),
            QueryValue::Float(value) => write!(f, "{value}"),
            QueryValue::Bool(value) => write!(f, "{value}"),
            QueryValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    };

    let mut seen_digit = false;
    let mut magnitude: i64 = 0;
    for digit in unsigned.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        magnitude = magnitude
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    seen_digit.then_some(if negative { -magnitude } else { magnitude })
}

/// Untyped query parameters keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawListQuery(HashMap<String, QueryValue>);

impl RawListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URL query string. Every value is text; a repeated key keeps
    /// its first value. A malformed string yields an empty query so that the
    /// defaults apply.
    pub fn from_query_str(query: &str) -> Self {
        match serde_html_form::from_str::<HashMap<String, Vec<String>>>(query) {
            Ok(pairs) => pairs
                .into_iter()
                .filter_map(|(key, values)| values.into_iter().next().map(|value| (key, value)))
                .collect(),
            Err(err) => {
                log::warn!("Ignoring malformed query string {query:?}: {err}");
                Self::default()
            }
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the value for `key`, treating an explicit null as absent.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key).filter(|value| **value != QueryValue::Null)
    }

    /// Returns the trimmed text value for `key`, skipping blank strings.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(QueryValue::as_text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RawListQuery
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<&ListQuery> for RawListQuery {
    fn from(query: &ListQuery) -> Self {
        let raw = RawListQuery::new()
            .with(PAGE_FIELD, query.page as i64)
            .with(LIMIT_FIELD, query.limit as i64)
            .with(SORT_ORDER_FIELD, query.sort_order.as_str());
        match &query.sort_by {
            Some(sort_by) => raw.with(SORT_BY_FIELD, sort_by.as_str()),
            None => raw,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub const fn is_descending(self) -> bool {
        matches!(self, SortOrder::Desc)
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical pagination and sort descriptor.
///
/// Only produced by [`normalize`] or [`normalize_strict`], so `offset` is
/// always `(page - 1) * limit` for the `page` and `limit` it carries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: u64,
    limit: u64,
    offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<String>,
    sort_order: SortOrder,
}

impl ListQuery {
    fn from_parts(page: u64, limit: u64, sort_by: Option<String>, sort_order: SortOrder) -> Self {
        Self {
            page,
            limit,
            offset: (page - 1) * limit,
            sort_by,
            sort_order,
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Client-supplied sort field. Untrusted: validate before use.
    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_parts(DEFAULT_PAGE, DEFAULT_LIMIT, None, SortOrder::Asc)
    }
}

fn lenient_bounded(raw: &RawListQuery, field: &str, default: u64, min: u64, max: u64) -> u64 {
    let requested = raw.get(field).and_then(QueryValue::coerce_int);
    let value = requested
        .unwrap_or(default as i64)
        .clamp(min as i64, max as i64) as u64;

    if let Some(original) = raw.get(field) {
        if requested != Some(value as i64) {
            log::debug!("List query field {field}={original} normalized to {value}");
        }
    }

    value
}

/// Normalizes untrusted list parameters. Total: every input maps to a valid
/// descriptor.
///
/// `sortOrder` is descending only for the exact text `"desc"`; `"DESC"` and
/// any other value sort ascending.
pub fn normalize(raw: &RawListQuery) -> ListQuery {
    let page = lenient_bounded(raw, PAGE_FIELD, DEFAULT_PAGE, 1, MAX_PAGE);
    let limit = lenient_bounded(raw, LIMIT_FIELD, DEFAULT_LIMIT, MIN_LIMIT, MAX_LIMIT);
    let sort_by = raw.get(SORT_BY_FIELD).map(ToString::to_string);
    let sort_order = match raw.get(SORT_ORDER_FIELD) {
        Some(QueryValue::Text(order)) if order == "desc" => SortOrder::Desc,
        _ => SortOrder::Asc,
    };

    ListQuery::from_parts(page, limit, sort_by, sort_order)
}

/// Errors reported by [`normalize_strict`].
#[derive(Debug, Error)]
pub enum ListQueryError {
    #[error("{field} must be an integer")]
    NotAnInteger { field: &'static str },

    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("sortOrder must be \"asc\" or \"desc\", got {0:?}")]
    InvalidSortOrder(String),
}

#[derive(Debug, Validate)]
struct StrictBounds {
    #[validate(custom(function = "validate_page"))]
    page: i64,
    #[validate(range(min = 1, max = 100))]
    limit: i64,
}

/// Upper bound is [`MAX_PAGE`], the lenient clamp ceiling.
fn validate_page(page: i64) -> Result<(), ValidationError> {
    if (1..=MAX_PAGE as i64).contains(&page) {
        return Ok(());
    }
    let mut err = ValidationError::new("range");
    err.add_param("min".into(), &1);
    err.add_param("max".into(), &MAX_PAGE);
    err.add_param("value".into(), &page);
    Err(err)
}

fn strict_int(raw: &RawListQuery, field: &'static str, default: u64) -> Result<i64, ListQueryError> {
    match raw.get(field) {
        None => Ok(default as i64),
        Some(QueryValue::Integer(value)) => Ok(*value),
        Some(QueryValue::Float(value)) if value.fract() == 0.0 => Ok(*value as i64),
        Some(QueryValue::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| ListQueryError::NotAnInteger { field }),
        Some(_) => Err(ListQueryError::NotAnInteger { field }),
    }
}

/// Rejecting variant of [`normalize`].
///
/// Absent fields take the same defaults, but a present `page` or `limit`
/// must be an in-range integer and a present `sortOrder` must be exactly
/// `"asc"` or `"desc"`.
pub fn normalize_strict(raw: &RawListQuery) -> Result<ListQuery, ListQueryError> {
    let bounds = StrictBounds {
        page: strict_int(raw, PAGE_FIELD, DEFAULT_PAGE)?,
        limit: strict_int(raw, LIMIT_FIELD, DEFAULT_LIMIT)?,
    };
    bounds.validate()?;

    let sort_order = match raw.get(SORT_ORDER_FIELD) {
        None => SortOrder::Asc,
        Some(QueryValue::Text(order)) if order == "asc" => SortOrder::Asc,
        Some(QueryValue::Text(order)) if order == "desc" => SortOrder::Desc,
        Some(other) => return Err(ListQueryError::InvalidSortOrder(other.to_string())),
    };

    Ok(ListQuery::from_parts(
        bounds.page as u64,
        bounds.limit as u64,
        raw.get(SORT_BY_FIELD).map(ToString::to_string),
        sort_order,
    ))
}

fn get_pages(
    total_pages: u64,
    current_page: u64,
    left_edge: u64,
    left_current: u64,
    right_current: u64,
    right_edge: u64,
) -> Vec<Option<u64>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of results plus the page-number window shown by list views.
/// Gaps in the window are `None`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<u64>>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, query: &ListQuery, total: u64) -> Self {
        let total_pages = total.div_ceil(query.limit());
        let pages = get_pages(total_pages, query.page(), 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: query.page(),
            limit: query.limit(),
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawListQuery {
        pairs.iter().copied().collect()
    }

    #[test]
    fn prefix_parsing_follows_integer_semantics() {
        assert_eq!(parse_int_prefix("2.7"), Some(2));
        assert_eq!(parse_int_prefix("  12abc"), Some(12));
        assert_eq!(parse_int_prefix("-5"), Some(-5));
        assert_eq!(parse_int_prefix("+3"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("0x10"), Some(0));
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn scalar_values_coerce() {
        assert_eq!(QueryValue::Integer(7).coerce_int(), Some(7));
        assert_eq!(QueryValue::Float(2.7).coerce_int(), Some(2));
        assert_eq!(QueryValue::Float(-2.7).coerce_int(), Some(-2));
        assert_eq!(QueryValue::Float(f64::NAN).coerce_int(), None);
        assert_eq!(QueryValue::Bool(true).coerce_int(), None);
        assert_eq!(QueryValue::Null.coerce_int(), None);
    }

    #[test]
    fn fractional_text_truncates() {
        let query = normalize(&raw(&[("page", "2.7"), ("limit", "10.9")]));
        assert_eq!(query.page(), 2);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 10);
    }

    #[test]
    fn zero_limit_is_not_unlimited() {
        let query = normalize(&raw(&[("limit", "0")]));
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn negative_limit_floors_to_one() {
        let query = normalize(&raw(&[("limit", "-40")]));
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn huge_page_is_capped_and_offset_stays_consistent() {
        let query = normalize(&raw(&[("page", "99999999999999999999"), ("limit", "100")]));
        assert_eq!(query.page(), MAX_PAGE);
        assert_eq!(query.offset(), (MAX_PAGE - 1) * 100);
    }

    #[test]
    fn null_values_count_as_absent() {
        let query = normalize(
            &RawListQuery::new()
                .with("page", QueryValue::Null)
                .with("sortBy", QueryValue::Null),
        );
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn non_text_sort_by_is_passed_through_as_text() {
        let query = normalize(&RawListQuery::new().with("sortBy", 5_i64));
        assert_eq!(query.sort_by(), Some("5"));
    }

    #[test]
    fn only_exact_desc_sorts_descending() {
        for order in ["DESC", "Desc", " desc", "descending", "invalid", ""] {
            let query = normalize(&raw(&[("sortOrder", order)]));
            assert_eq!(query.sort_order(), SortOrder::Asc, "{order:?}");
        }
        let query = normalize(&raw(&[("sortOrder", "desc")]));
        assert_eq!(query.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn query_string_values_arrive_as_text() {
        let raw = RawListQuery::from_query_str("page=3&limit=10&sortBy=lastName&sortOrder=desc");
        assert_eq!(raw.get("page"), Some(&QueryValue::Text("3".to_string())));

        let query = normalize(&raw);
        assert_eq!(query.page(), 3);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 20);
        assert_eq!(query.sort_by(), Some("lastName"));
        assert_eq!(query.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let raw = RawListQuery::from_query_str("page=2&class=7B&sortBy=grade&sortBy=lastName");
        assert_eq!(raw.text("class"), Some("7B"));
        assert_eq!(raw.text("sortBy"), Some("grade"));

        let query = normalize(&raw);
        assert_eq!(query.page(), 2);
        assert_eq!(query.sort_by(), Some("grade"));
    }

    #[test]
    fn json_values_keep_their_scalar_type() {
        let raw: RawListQuery =
            serde_json::from_str(r#"{"page": 2, "limit": 2.5, "sortOrder": null, "all": true}"#)
                .unwrap();
        assert_eq!(raw.get("page"), Some(&QueryValue::Integer(2)));
        assert_eq!(raw.get("limit"), Some(&QueryValue::Float(2.5)));
        assert_eq!(raw.get("sortOrder"), None);
        assert_eq!(raw.get("all"), Some(&QueryValue::Bool(true)));

        let query = normalize(&raw);
        assert_eq!((query.page(), query.limit(), query.offset()), (2, 2, 2));
    }

    #[test]
    fn text_skips_blank_values() {
        let raw = raw(&[("search", "   "), ("class", " 7B ")]);
        assert_eq!(raw.text("search"), None);
        assert_eq!(raw.text("class"), Some("7B"));
        assert_eq!(raw.text("missing"), None);
    }

    #[test]
    fn descriptor_serializes_in_camel_case() {
        let query = normalize(&raw(&[("page", "2"), ("sortBy", "grade")]));
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "page": 2,
                "limit": 20,
                "offset": 20,
                "sortBy": "grade",
                "sortOrder": "asc",
            })
        );
    }

    #[test]
    fn strict_accepts_valid_input() {
        let query = normalize_strict(&raw(&[
            ("page", "4"),
            ("limit", "25"),
            ("sortOrder", "desc"),
        ]))
        .unwrap();
        assert_eq!((query.page(), query.limit(), query.offset()), (4, 25, 75));
        assert_eq!(query.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn strict_uses_defaults_for_absent_fields() {
        assert_eq!(normalize_strict(&RawListQuery::new()).unwrap(), ListQuery::default());
    }

    #[test]
    fn strict_rejects_non_integers() {
        let err = normalize_strict(&raw(&[("page", "2.7")])).unwrap_err();
        assert!(matches!(err, ListQueryError::NotAnInteger { field: "page" }));

        let err = normalize_strict(&raw(&[("limit", "abc")])).unwrap_err();
        assert!(matches!(err, ListQueryError::NotAnInteger { field: "limit" }));
    }

    #[test]
    fn strict_rejects_out_of_range_values() {
        let err = normalize_strict(&raw(&[("limit", "500")])).unwrap_err();
        match err {
            ListQueryError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("limit"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = normalize_strict(&raw(&[("page", "0")])).unwrap_err();
        assert!(matches!(err, ListQueryError::Validation(_)));
    }

    #[test]
    fn strict_page_ceiling_matches_lenient_cap() {
        let query = normalize_strict(&raw(&[("page", "4294967295"), ("limit", "1")])).unwrap();
        assert_eq!(query.page(), MAX_PAGE);
        assert_eq!(normalize(&raw(&[("page", "4294967296")])).page(), MAX_PAGE);

        let err = normalize_strict(&raw(&[("page", "4294967296")])).unwrap_err();
        match err {
            ListQueryError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("page"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn page_envelope_serializes_in_camel_case() {
        let page = Paginated::new(vec![1, 2], &ListQuery::default(), 42);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert!(json.get("total_pages").is_none());
    }

    #[test]
    fn strict_rejects_unknown_sort_order() {
        let err = normalize_strict(&raw(&[("sortOrder", "DESC")])).unwrap_err();
        assert!(matches!(err, ListQueryError::InvalidSortOrder(ref order) if order == "DESC"));
    }

    #[test]
    fn page_window_collapses_distant_pages() {
        let query = normalize(&raw(&[("page", "10"), ("limit", "10")]));
        let page = Paginated::new(vec![(); 10], &query, 200);

        assert_eq!(page.total_pages, 20);
        let mut expected = vec![Some(1), Some(2), None];
        expected.extend((8..=14).map(Some));
        expected.extend([None, Some(19), Some(20)]);
        assert_eq!(page.pages, expected);
    }

    #[test]
    fn page_window_without_gaps() {
        let query = normalize(&raw(&[("page", "5"), ("limit", "10")]));
        let page = Paginated::new(Vec::<()>::new(), &query, 100);
        assert_eq!(page.pages, (1..=10).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn page_window_is_empty_without_results() {
        let page = Paginated::new(Vec::<()>::new(), &ListQuery::default(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.pages.is_empty());
    }

    #[test]
    fn page_window_past_the_end_centres_on_last_page() {
        let query = normalize(&raw(&[("page", "50"), ("limit", "10")]));
        let page = Paginated::new(Vec::<()>::new(), &query, 30);
        assert_eq!(page.page, 50);
        assert_eq!(page.pages, vec![Some(1), Some(2), Some(3)]);
    }
}
