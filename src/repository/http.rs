//! [`VehicleReader`] backed by the rental platform's REST API.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::domain::types::VehicleId;
use crate::domain::vehicle::Vehicle;
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{VehicleFilterQuery, VehicleReader, decode_vehicle_list};

/// Everything needed to prepare a request: where the API lives and which
/// credentials to attach.
#[derive(Clone, Debug)]
pub struct RequestContext {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|token: &String| !token.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL of `path` relative to the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl From<&ClientConfig> for RequestContext {
    fn from(config: &ClientConfig) -> Self {
        let context = RequestContext::new(config.api_url.as_str())
            .with_timeout(Duration::from_secs(config.request_timeout_secs));
        match &config.api_token {
            Some(token) => context.with_token(token.as_str()),
            None => context,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpVehicleRepository {
    client: Client,
    context: RequestContext,
}

impl HttpVehicleRepository {
    pub fn new(context: RequestContext) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(context.timeout).build()?;
        Ok(Self { client, context })
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Issues a GET and returns the response body. A 404 yields `Ok(None)`.
    fn get_body(
        &self,
        path: &str,
        query: Option<&VehicleFilterQuery>,
    ) -> RepositoryResult<Option<String>> {
        let url = self.context.endpoint(path);
        log::trace!("GET {url} {query:?}");

        let mut request = self.client.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(token) = self.context.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            log::warn!("GET {url} returned {status}");
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(Some(response.text()?))
    }

    /// List endpoints always exist, so a 404 from them is an error.
    fn get_vehicles(
        &self,
        path: &str,
        query: Option<&VehicleFilterQuery>,
    ) -> RepositoryResult<Vec<Vehicle>> {
        let body = self.get_body(path, query)?.ok_or_else(|| RepositoryError::Status {
            status: StatusCode::NOT_FOUND.as_u16(),
            url: self.context.endpoint(path),
        })?;
        decode_vehicle_list(&body)
    }
}

impl VehicleReader for HttpVehicleRepository {
    fn list_vehicles(&self) -> RepositoryResult<Vec<Vehicle>> {
        self.get_vehicles("vehicles", None)
    }

    fn filter_vehicles(&self, query: &VehicleFilterQuery) -> RepositoryResult<Vec<Vehicle>> {
        self.get_vehicles("vehicles/filter", Some(query))
    }

    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        match self.get_body(&format!("vehicles/{id}"), None)? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }
}
