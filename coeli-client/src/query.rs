//! Request paths and query strings.

use coeli_types::{ControlledSearchResponse, FacetMode, Page, DEFAULT_PAGE_LIMIT};
use urlencoding::encode;

/// Optional parts of a search results request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Facet names to aggregate; sent as `facet=a,b`.
    pub facets: Vec<String>,
    /// Page to fetch. Falls back to a default-sized first page.
    pub page: Option<Page>,
    /// Facet modes, sent as `facetMode=x,y`.
    pub facet_modes: Vec<FacetMode>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_facets<I, S>(mut self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets = facets.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_facet_modes(mut self, modes: impl IntoIterator<Item = FacetMode>) -> Self {
        self.facet_modes = modes.into_iter().collect();
        self
    }
}

pub(crate) fn search_path(entity_type: &str) -> String {
    format!("/{}/search", encode(entity_type))
}

pub(crate) fn search_results_path(handle: &ControlledSearchResponse, options: &SearchOptions) -> String {
    let page = options.page.unwrap_or(Page::new(DEFAULT_PAGE_LIMIT, 0));
    let mut path = format!(
        "/{}/search/{}/?limit={}&offset={}",
        encode(&handle.entity_type_name),
        encode(&handle.id),
        page.limit,
        page.offset
    );
    if !options.facets.is_empty() {
        let facets: Vec<_> = options.facets.iter().map(|f| encode(f)).collect();
        path.push_str("&facet=");
        path.push_str(&facets.join(","));
    }
    if !options.facet_modes.is_empty() {
        let modes: Vec<String> = options.facet_modes.iter().map(ToString::to_string).collect();
        path.push_str("&facetMode=");
        path.push_str(&modes.join(","));
    }
    path
}

pub(crate) fn slug_path(entity_type: &str, slug: &str) -> String {
    format!("/{}/slugs/{}", encode(entity_type), encode(slug))
}

pub(crate) fn entity_path(entity_type: &str, id: &str) -> String {
    format!("/{}/{}", encode(entity_type), encode(id))
}

pub(crate) fn collection_path(entity_type: &str) -> String {
    format!("/{}/", encode(entity_type))
}

/// Path of a search handle below its tenant segment.
///
/// `https://host/api/t1/Artwork/search/abc` with tenant `t1` becomes
/// `/Artwork/search/abc`. The tenant segment is the last one followed by the
/// entity type name, so an API root named like the tenant is left alone.
/// Without such a pair the last tenant segment is used, and without any the
/// whole path is kept.
pub fn canonical_search_url(handle: &ControlledSearchResponse) -> String {
    let href = handle.self_link.href.as_str();
    let path = match href.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => href,
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let entity_type = encode(&handle.entity_type_name);
    let anchored = segments.windows(2).rposition(|pair| {
        pair[0] == handle.tenant
            && (pair[1] == handle.entity_type_name || pair[1] == &*entity_type)
    });
    let tenant_at = anchored.or_else(|| segments.iter().rposition(|s| *s == handle.tenant));
    let rest = match tenant_at {
        Some(i) => &segments[i + 1..],
        None => &segments[..],
    };
    format!("/{}", rest.join("/"))
}
