#![allow(dead_code)]

use async_trait::async_trait;
use coeli_client::{ApiRequest, ApiResponse, ClientConfig, ClientError, ClientResult, Transport};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const TENANT: &str = "t1";
pub const TOKEN: &str = "secret-token";

/// Routes client logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig::new(TENANT, TOKEN).with_api_base_url(base_url)
}

/// A raw entity as the API returns it.
pub fn entity_json(id: &str, title: &str) -> Value {
    json!({
        "$metadata": {
            "self": { "href": format!("https://app.coeli.cat/coeli/t1/Artwork/{id}") },
            "$type": { "$type": "EntityType", "name": "Artwork" },
            "slug": id,
            "version": 1
        },
        "title": {
            "$metadata": { "$type": { "$type": "ValueType", "name": "Token" } },
            "value": title
        },
        "height": {
            "$metadata": { "$type": { "$type": "ValueType", "name": "Decimal", "unit": " cm" } },
            "value": 1234.5
        }
    })
}

pub fn handle_json(id: &str) -> Value {
    json!({
        "self": { "href": format!("https://app.coeli.cat/coeli/t1/Artwork/search/{id}") },
        "id": id,
        "tenant": TENANT,
        "entityTypeName": "Artwork"
    })
}

pub fn page_json(entities: Vec<Value>, limit: u64, offset: u64, max_offset: u64, total: u64) -> Value {
    json!({
        "entities": entities,
        "page": { "limit": limit, "offset": offset, "maxOffset": max_offset, "total": total },
        "facets": {},
        "originalSearch": { "conditions": [] },
        "sortConditions": { "sort": [], "group": [] },
        "url": ""
    })
}

/// Transport that records requests and replays scripted responses.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    responses: Arc<Mutex<VecDeque<ApiResponse>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.responses.lock().unwrap().push_back(ApiResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn perform(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Transport("no scripted response".to_string()))
    }
}
