//! Controlled searches, pages and response envelopes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u64 = 25;

/// Page size used when collecting every result of a search.
pub const ALL_ITEMS_PAGE_LIMIT: u64 = 200;

/// `{ "value": ... }`, the shape of labels and facet values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithValue<T> {
    pub value: T,
}

/// A plain link to another resource, as used in search bodies and handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<WithValue<String>>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "$type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// One end of a [`TimeSpanInterval`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeSpanBound {
    Link(Link),
    Span(TimeSpan),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSpanInterval {
    #[serde(rename = "$type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub since: TimeSpanBound,
    pub until: TimeSpanBound,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<WithValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<WithValue<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChronoUnit {
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
}

/// A relative amount of time, e.g. "3 Years".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSearchValue {
    pub value: i64,
    pub unit: ChronoUnit,
}

/// The right-hand side of a simple condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Text(String),
    List(Vec<ConditionValue>),
    Relative(TimeSearchValue),
    Link(Link),
    Interval(TimeSpanInterval),
    Span(TimeSpan),
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        ConditionValue::Bool(b)
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::Text(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        ConditionValue::Text(s)
    }
}

impl From<Link> for ConditionValue {
    fn from(link: Link) -> Self {
        ConditionValue::Link(link)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "belongs_to")]
    BelongsTo,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "exactly_contains")]
    ExactlyContains,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "between_dates")]
    BetweenDates,
    #[serde(rename = "in_date")]
    InDate,
    #[serde(rename = "between_periods")]
    BetweenPeriods,
    #[serde(rename = "in_period")]
    InPeriod,
    #[serde(rename = "before_date")]
    BeforeDate,
    #[serde(rename = "before_n_date")]
    BeforeNDate,
    #[serde(rename = "after_date")]
    AfterDate,
    #[serde(rename = "after_n_date")]
    AfterNDate,
    #[serde(rename = "exactly_in_period")]
    ExactlyInPeriod,
    #[serde(rename = "is_defined")]
    IsDefined,
}

/// How a facet groups its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetMode {
    Equals,
    BelongsTo,
}

impl fmt::Display for FacetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetMode::Equals => f.write_str("Equals"),
            FacetMode::BelongsTo => f.write_str("BelongsTo"),
        }
    }
}

/// A search condition: a single test or an OR over nested conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum ControlledSearchCondition {
    #[serde(rename = "SimpleEntitySearchCondition")]
    Simple {
        property: String,
        operator: Operator,
        value: ConditionValue,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<bool>,
    },
    #[serde(rename = "OrEntitySearchCondition")]
    Or {
        conditions: Vec<ControlledSearchCondition>,
    },
}

impl ControlledSearchCondition {
    pub fn simple(
        property: impl Into<String>,
        operator: Operator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        ControlledSearchCondition::Simple {
            property: property.into(),
            operator,
            value: value.into(),
            default: None,
        }
    }

    pub fn or(conditions: Vec<ControlledSearchCondition>) -> Self {
        ControlledSearchCondition::Or { conditions }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub name: String,
    pub order: Order,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConditions {
    #[serde(default)]
    pub sort: Vec<SortField>,
    #[serde(default)]
    pub group: Vec<SortField>,
}

/// A query over one entity type, persisted by the server on creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlledSearch {
    #[serde(default)]
    pub conditions: Vec<ControlledSearchCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_condition: Option<SortConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ControlledSearch {
    pub fn new(conditions: Vec<ControlledSearchCondition>) -> Self {
        Self {
            conditions,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortConditions) -> Self {
        self.sort_condition = Some(sort);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Server-issued handle for a persisted search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlledSearchResponse {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub id: String,
    pub tenant: String,
    pub entity_type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Link(Link),
    Scalar(WithValue<serde_json::Value>),
}

/// One aggregation bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub value: FacetValue,
    pub count: u64,
}

/// Facet name to ordered buckets.
pub type Facets = BTreeMap<String, Vec<Facet>>;

/// Position within a result set, plus the server's ceilings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub max_offset: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub total: u64,
}

impl Page {
    /// A request page; the ceilings are filled in by the server.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            ..Default::default()
        }
    }

    /// The page right after this one, same size.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            ..*self
        }
    }

    /// True when the page after this one would pass either ceiling.
    ///
    /// A zero limit also counts as exhausted: the offset could never advance.
    pub fn is_exhausted(&self) -> bool {
        let end = self.offset.saturating_add(self.limit);
        self.limit == 0 || end > self.max_offset || end > self.total
    }
}

/// A page of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetResponse<T> {
    pub entities: Vec<T>,
    #[serde(default)]
    pub page: Page,
}

impl<T> GetResponse<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> GetResponse<U> {
        GetResponse {
            entities: self.entities.into_iter().map(f).collect(),
            page: self.page,
        }
    }
}

/// A page of search results with facets and the search that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSearchResponse<T> {
    pub entities: Vec<T>,
    #[serde(default)]
    pub page: Page,
    #[serde(default)]
    pub facets: Facets,
    #[serde(default)]
    pub original_search: ControlledSearch,
    #[serde(default)]
    pub sort_conditions: SortConditions,
    #[serde(default)]
    pub url: String,
}

impl<T> GetSearchResponse<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> GetSearchResponse<U> {
        GetSearchResponse {
            entities: self.entities.into_iter().map(f).collect(),
            page: self.page,
            facets: self.facets,
            original_search: self.original_search,
            sort_conditions: self.sort_conditions,
            url: self.url,
        }
    }
}
