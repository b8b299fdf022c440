//! The API client.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::query::{self, canonical_search_url, SearchOptions};
use crate::transport::{ApiRequest, ReqwestTransport, Transport};
use coeli_format::{PlainEntity, ValueFormatter};
use coeli_types::{
    ControlledSearch, ControlledSearchResponse, Entity, GetResponse, GetSearchResponse, Language,
    Page, ALL_ITEMS_PAGE_LIMIT,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for one tenant of the Coeli API.
///
/// Every operation comes in two flavors: `try_*` returns a [`ClientResult`],
/// the plain name logs the failure and returns `None`.
///
/// Fetched entities are formatted for the request language and handed to a
/// caller-supplied projection, one entity at a time.
#[derive(Clone)]
pub struct CoeliClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    formatter: ValueFormatter,
}

impl CoeliClient {
    /// Client for the production API.
    pub fn new(tenant: impl Into<String>, token: impl Into<String>) -> ClientResult<Self> {
        Self::with_config(ClientConfig::new(tenant, token))
    }

    pub fn with_config(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout())?;
        Self::with_transport(config, transport)
    }

    /// Client over a custom transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> ClientResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
            formatter: ValueFormatter::new(),
        })
    }

    /// Replaces the formatter, e.g. one with a custom locale.
    #[must_use]
    pub fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn formatter(&self) -> &ValueFormatter {
        &self.formatter
    }

    // ── Controlled searches ──

    /// Persists a search over `entity_type` and returns its handle.
    pub async fn try_create_controlled_search(
        &self,
        language: Language,
        entity_type: &str,
        search: &ControlledSearch,
    ) -> ClientResult<ControlledSearchResponse> {
        let body = serde_json::to_value(search)?;
        self.fetch(Method::POST, &query::search_path(entity_type), language, Some(body))
            .await
    }

    pub async fn create_controlled_search(
        &self,
        language: Language,
        entity_type: &str,
        search: &ControlledSearch,
    ) -> Option<ControlledSearchResponse> {
        self.try_create_controlled_search(language, entity_type, search)
            .await
            .ok()
    }

    /// Fetches one page of a persisted search.
    ///
    /// The response `url` is the handle's path below the tenant segment.
    pub async fn try_get_controlled_search<T, F>(
        &self,
        language: Language,
        handle: &ControlledSearchResponse,
        project: F,
        options: &SearchOptions,
    ) -> ClientResult<GetSearchResponse<T>>
    where
        F: Fn(PlainEntity) -> T,
    {
        let path = query::search_results_path(handle, options);
        let raw: GetSearchResponse<Entity> = self.fetch(Method::GET, &path, language, None).await?;
        let mut response = raw.map(|entity| project(self.formatter.format_entity(language, &entity)));
        response.url = canonical_search_url(handle);
        Ok(response)
    }

    pub async fn get_controlled_search<T, F>(
        &self,
        language: Language,
        handle: &ControlledSearchResponse,
        project: F,
        options: &SearchOptions,
    ) -> Option<GetSearchResponse<T>>
    where
        F: Fn(PlainEntity) -> T,
    {
        self.try_get_controlled_search(language, handle, project, options)
            .await
            .ok()
    }

    /// Creates a search and fetches one page of it.
    pub async fn try_create_and_get_controlled_search<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        search: &ControlledSearch,
        project: F,
        options: &SearchOptions,
    ) -> ClientResult<GetSearchResponse<T>>
    where
        F: Fn(PlainEntity) -> T,
    {
        let handle = self
            .try_create_controlled_search(language, entity_type, search)
            .await?;
        self.try_get_controlled_search(language, &handle, project, options)
            .await
    }

    pub async fn create_and_get_controlled_search<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        search: &ControlledSearch,
        project: F,
        options: &SearchOptions,
    ) -> Option<GetSearchResponse<T>>
    where
        F: Fn(PlainEntity) -> T,
    {
        self.try_create_and_get_controlled_search(language, entity_type, search, project, options)
            .await
            .ok()
    }

    /// Creates a search and collects every result page.
    ///
    /// Starts at `options.page` (default: offset 0, limit
    /// [`ALL_ITEMS_PAGE_LIMIT`]) and keeps requesting the next page until the
    /// last one received is exhausted. Facets and page info come from the
    /// first page; entities are concatenated in page order. A failing page
    /// fails the whole call.
    pub async fn try_create_controlled_search_and_get_all_items<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        search: &ControlledSearch,
        project: F,
        options: &SearchOptions,
    ) -> ClientResult<GetSearchResponse<T>>
    where
        F: Fn(PlainEntity) -> T,
    {
        let handle = self
            .try_create_controlled_search(language, entity_type, search)
            .await?;

        let first_options = SearchOptions {
            page: Some(options.page.unwrap_or(Page::new(ALL_ITEMS_PAGE_LIMIT, 0))),
            ..options.clone()
        };
        let mut result = self
            .try_get_controlled_search(language, &handle, &project, &first_options)
            .await?;

        let mut cursor = result.page;
        while !cursor.is_exhausted() {
            let requested = cursor.next();
            debug!(
                "Fetching search {} at offset {} (limit {})",
                handle.id, requested.offset, requested.limit
            );
            let page_options = SearchOptions {
                page: Some(requested),
                ..options.clone()
            };
            let batch = self
                .try_get_controlled_search(language, &handle, &project, &page_options)
                .await?;
            result.entities.extend(batch.entities);

            cursor = batch.page;
            if cursor.offset < requested.offset {
                warn!(
                    "Search {} answered offset {} for requested offset {}, keeping the requested one",
                    handle.id, cursor.offset, requested.offset
                );
                cursor.offset = requested.offset;
            }
        }

        Ok(result)
    }

    pub async fn create_controlled_search_and_get_all_items<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        search: &ControlledSearch,
        project: F,
        options: &SearchOptions,
    ) -> Option<GetSearchResponse<T>>
    where
        F: Fn(PlainEntity) -> T,
    {
        self.try_create_controlled_search_and_get_all_items(
            language,
            entity_type,
            search,
            project,
            options,
        )
        .await
        .ok()
    }

    // ── Entities ──

    pub async fn try_get_entity_by_slug<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        slug: &str,
        project: F,
    ) -> ClientResult<T>
    where
        F: Fn(PlainEntity) -> T,
    {
        let entity: Entity = self
            .fetch(Method::GET, &query::slug_path(entity_type, slug), language, None)
            .await?;
        Ok(project(self.formatter.format_entity(language, &entity)))
    }

    pub async fn get_entity_by_slug<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        slug: &str,
        project: F,
    ) -> Option<T>
    where
        F: Fn(PlainEntity) -> T,
    {
        self.try_get_entity_by_slug(language, entity_type, slug, project)
            .await
            .ok()
    }

    pub async fn try_get_entity_by_id<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        id: &str,
        project: F,
    ) -> ClientResult<T>
    where
        F: Fn(PlainEntity) -> T,
    {
        let entity: Entity = self
            .fetch(Method::GET, &query::entity_path(entity_type, id), language, None)
            .await?;
        Ok(project(self.formatter.format_entity(language, &entity)))
    }

    pub async fn get_entity_by_id<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        id: &str,
        project: F,
    ) -> Option<T>
    where
        F: Fn(PlainEntity) -> T,
    {
        self.try_get_entity_by_id(language, entity_type, id, project)
            .await
            .ok()
    }

    /// Lists entities of one type, one server-sized page.
    pub async fn try_get_entities<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        project: F,
    ) -> ClientResult<GetResponse<T>>
    where
        F: Fn(PlainEntity) -> T,
    {
        let raw: GetResponse<Entity> = self
            .fetch(Method::GET, &query::collection_path(entity_type), language, None)
            .await?;
        Ok(raw.map(|entity| project(self.formatter.format_entity(language, &entity))))
    }

    pub async fn get_entities<T, F>(
        &self,
        language: Language,
        entity_type: &str,
        project: F,
    ) -> Option<GetResponse<T>>
    where
        F: Fn(PlainEntity) -> T,
    {
        self.try_get_entities(language, entity_type, project)
            .await
            .ok()
    }

    // ── Requests ──

    /// Builds the request for `partial_url` below the tenant root.
    pub fn build_request(
        &self,
        method: Method,
        partial_url: &str,
        language: Language,
        body: Option<serde_json::Value>,
    ) -> ApiRequest {
        let tag = language.as_str().to_string();
        ApiRequest {
            method,
            url: format!("{}{}", self.config.tenant_url(), partial_url),
            headers: vec![
                ("Accept-Language".to_string(), tag.clone()),
                ("Content-Language".to_string(), tag),
                (
                    "Authorization".to_string(),
                    format!("Authorization {}", self.config.token),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }

    /// Performs a request and decodes its JSON body. Every failure is logged here.
    async fn fetch<R: DeserializeOwned>(
        &self,
        method: Method,
        partial_url: &str,
        language: Language,
        body: Option<serde_json::Value>,
    ) -> ClientResult<R> {
        let request = self.build_request(method, partial_url, language, body);
        debug!("{} {}", request.method, request.url);

        let result = self.execute(&request).await;
        if let Err(e) = &result {
            warn!("Request failed: {} ({})", e, request);
        }
        result
    }

    async fn execute<R: DeserializeOwned>(&self, request: &ApiRequest) -> ClientResult<R> {
        let response = self.transport.perform(request).await?;
        match response.status {
            404 => Err(ClientError::NotFound {
                url: request.url.clone(),
            }),
            status if response.is_error() => Err(ClientError::Status {
                status,
                url: request.url.clone(),
            }),
            _ => Ok(serde_json::from_str(&response.body)?),
        }
    }
}

impl fmt::Debug for CoeliClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoeliClient")
            .field("config", &self.config)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}
