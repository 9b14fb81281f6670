// Async HTTP client for the Cloudflare v4 REST API.
//
// Base path: /client/v4/
// Auth: Bearer token or X-Auth-Key + X-Auth-Email default headers

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::{Credentials, TransportConfig};
use crate::types::{ApiMessage, Envelope, ErrorEnvelope, Page, ResultInfo};

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Cloudflare v4 API.
///
/// Every call unwraps the `{ success, errors, result, result_info }`
/// envelope. A `success: false` envelope becomes [`Error::Api`] even when
/// the HTTP status is 2xx.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build an authenticated client against `base_url`.
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(credentials)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    /// Build a client that sends no credentials (public endpoints only).
    pub fn anonymous(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_anonymous_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: TransportConfig::default().timeout,
        })
    }

    /// Ensure the base URL ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"zones/abc/dns_records"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(|e| self.transport(e))?;
        let (result, _) = self.handle_envelope(resp).await?;
        Ok(result)
    }

    /// Fetch one page of a list endpoint. `page` is 1-based.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
        page: u32,
        per_page: u32,
    ) -> Result<Page<T>, Error> {
        let url = self.url(path)?;
        debug!("GET {url} page={page} per_page={per_page} params={params:?}");

        let resp = self
            .http
            .get(url)
            .query(params)
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        let (items, info) = self.handle_envelope::<Vec<T>>(resp).await?;
        Ok(Page::from_parts(items, page, info))
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        let (result, _) = self.handle_envelope(resp).await?;
        Ok(result)
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self
            .http
            .patch(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        let (result, _) = self.handle_envelope(resp).await?;
        Ok(result)
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        let (result, _) = self.handle_envelope(resp).await?;
        Ok(result)
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        let (result, _) = self.handle_envelope(resp).await?;
        Ok(result)
    }

    // ── Response handling ────────────────────────────────────────────

    fn transport(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(e)
        }
    }

    async fn handle_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<(T, Option<ResultInfo>), Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            return Err(Error::RateLimited { retry_after_secs });
        }

        let body = resp.text().await.map_err(|e| self.transport(e))?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            let preview = body.chars().take(200).collect::<String>();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        for msg in &envelope.messages {
            trace!(code = ?msg.code, "api message: {}", msg.message);
        }

        if !envelope.success {
            return Err(api_error(status, &envelope.errors));
        }

        let result = envelope.result.ok_or(Error::MissingResult)?;
        Ok((result, envelope.result_info))
    }

    fn parse_error(status: reqwest::StatusCode, raw: &str) -> Error {
        let errors = serde_json::from_str::<ErrorEnvelope>(raw)
            .unwrap_or_default()
            .errors;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Error::Authentication {
                message: joined(&errors).unwrap_or_else(|| status.to_string()),
            };
        }

        if errors.is_empty() && !raw.is_empty() {
            return Error::Api {
                status: status.as_u16(),
                code: None,
                message: raw.to_owned(),
            };
        }

        api_error(status, &errors)
    }

    // ── Pagination helper ────────────────────────────────────────────

    /// Collect all pages into a single `Vec<T>`.
    ///
    /// Stops after the page whose `result_info` reports no further pages,
    /// or on the first empty page.
    pub async fn paginate_all<T, F, Fut>(&self, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, Error>>,
    {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let current = fetch(page).await?;
            let more = current.has_more() && !current.items.is_empty();
            all.extend(current.items);

            if !more {
                break;
            }
            page += 1;
        }

        Ok(all)
    }
}

fn joined(errors: &[ApiMessage]) -> Option<String> {
    if errors.is_empty() {
        None
    } else {
        Some(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

fn api_error(status: reqwest::StatusCode, errors: &[ApiMessage]) -> Error {
    Error::Api {
        status: status.as_u16(),
        code: errors.first().and_then(|e| e.code),
        message: joined(errors).unwrap_or_else(|| status.to_string()),
    }
}
