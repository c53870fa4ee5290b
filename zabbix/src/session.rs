use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::time::Duration;

use crate::error::Error;
use crate::models::rpc::{Request, Response};
use crate::models::version::ApiVersion;

const JSONRPC_PATH: &str = "api_jsonrpc.php";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An authenticated (after [`ZabbixApi::login`]) session against one Zabbix frontend.
///
/// Calls are issued one at a time; every call takes `&mut self` to bump the
/// JSON-RPC request id.
#[derive(Debug)]
pub struct ZabbixApi {
    client: Client,
    url: String,
    next_id: u64,
    version: Option<ApiVersion>,
    auth: Option<String>,
}

impl ZabbixApi {
    /// Builds a client for the frontend at `api`.
    ///
    /// `api` may be the frontend root or the full `api_jsonrpc.php` URL.
    /// With `no_verify` set, TLS certificates are not validated for any call
    /// made through this session.
    pub fn new(api: &str, no_verify: bool) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let mut client_builder = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers);

        if no_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        Ok(ZabbixApi {
            client: client_builder.build()?,
            url: endpoint_url(api),
            next_id: 0,
            version: None,
            auth: None,
        })
    }

    /// JSON-RPC endpoint URL calls are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn version(&self) -> Option<ApiVersion> {
        self.version
    }

    pub(crate) fn is_logged_in(&self) -> bool {
        self.auth.is_some()
    }

    /// Asks the server for its API version and remembers it for later calls.
    pub async fn api_version(&mut self) -> Result<ApiVersion, Error> {
        let raw: String = self.request("apiinfo.version", json!([]), false).await?;
        let version = raw.parse::<ApiVersion>()?;
        debug!("Zabbix API version {} at {}", raw, self.url);

        self.version = Some(version);
        Ok(version)
    }

    /// Logs in and keeps the session token for subsequent calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), Error> {
        let version = match self.version {
            Some(version) => version,
            None => self.api_version().await?,
        };

        let user_key = if version.uses_username_param() {
            "username"
        } else {
            "user"
        };
        let mut params = Map::new();
        params.insert(user_key.to_string(), json!(username));
        params.insert("password".to_string(), json!(password));

        self.auth = None;
        let token: String = self
            .request("user.login", Value::Object(params), false)
            .await?;
        self.auth = Some(token);

        debug!("Logged in to {} as {}", self.url, username);
        Ok(())
    }

    /// Calls an API method that needs an authenticated session.
    pub async fn call<T: DeserializeOwned>(&mut self, method: &str, params: Value) -> Result<T, Error> {
        if self.auth.is_none() {
            return Err(Error::NotLoggedIn);
        }
        self.request(method, params, true).await
    }

    async fn request<T: DeserializeOwned>(
        &mut self,
        method: &str,
        params: Value,
        authenticated: bool,
    ) -> Result<T, Error> {
        self.next_id += 1;
        let mut body = Request::new(method, &params, self.next_id);
        let mut request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json-rpc");

        if authenticated {
            if let Some(token) = self.auth.as_deref() {
                if self.version.is_some_and(ApiVersion::uses_bearer_auth) {
                    request = request.bearer_auth(token);
                } else {
                    body.auth = Some(token);
                }
            }
        }

        debug!("Calling {} (id {})", method, body.id);
        let response = request.json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatusCode(status.as_u16()));
        }

        let envelope: Response = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(format!("{} returned a non JSON-RPC body: {}", method, e)))?;
        let result = envelope.into_result()?;

        serde_json::from_value(result)
            .map_err(|e| Error::InvalidResponse(format!("unexpected {} result: {}", method, e)))
    }
}

fn endpoint_url(api: &str) -> String {
    let trimmed = api.trim().trim_end_matches('/');
    if trimmed.ends_with(JSONRPC_PATH) {
        trimmed.to_string()
    } else {
        format!("{}/{}", trimmed, JSONRPC_PATH)
    }
}
