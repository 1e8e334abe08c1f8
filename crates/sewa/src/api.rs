//! Thin JSON client for the portal's REST backend.
//!
//! Every call returns a [`Promise`] that is resolved on ehttp's worker
//! thread and polled from the UI thread, so nothing here ever blocks a frame.

use poll_promise::Promise;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::{Args, Error, Result, Settings};

pub const API_BASE_URL_ENV: &str = "SEWA_API_BASE_URL";
pub const API_TOKEN_ENV: &str = "SEWA_API_TOKEN";

pub type ApiPromise<T> = Promise<Result<T>>;

/// The `{ success, message, data, ... }` wrapper the backend puts around
/// every payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    pub status: Option<u16>,
    pub timestamp: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Spring style page; only the content is of interest to us.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

/// Some listings are paged, some are plain arrays.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Page(Page<T>),
    Items(Vec<T>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// cli args > environment > settings file
    pub fn resolve(args: &Args, settings: &Settings) -> Result<Self> {
        Self::resolve_with(args, settings, |key| std::env::var(key).ok())
    }

    pub fn resolve_with(
        args: &Args,
        settings: &Settings,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let base_url = args
            .api_url
            .clone()
            .or_else(|| env(API_BASE_URL_ENV))
            .unwrap_or_else(|| settings.api_base_url.clone());
        let token = args.token.clone().or_else(|| env(API_TOKEN_ENV));

        Ok(Self::new(&base_url)?.with_token(token))
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Resolve an endpoint path against the base url. The base url's own path
    /// (`/api/v1`) is always kept.
    pub fn url(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!(
            "{}/{}",
            base,
            path.trim_start_matches('/')
        ))?)
    }

    pub fn get<T>(&self, path: &str) -> ApiPromise<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.send("GET", path, None, decode_data)
    }

    /// GET a listing, accepting both a page and a bare array as payload.
    pub fn get_list<T>(&self, path: &str) -> ApiPromise<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.send("GET", path, None, decode_list)
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> ApiPromise<T>
    where
        B: Serialize,
        T: DeserializeOwned + Send + 'static,
    {
        match serde_json::to_vec(body) {
            Ok(body) => self.send("POST", path, Some(body), decode_data),
            Err(err) => Promise::from_ready(Err(err.into())),
        }
    }

    pub fn put<B, T>(&self, path: &str, body: &B) -> ApiPromise<T>
    where
        B: Serialize,
        T: DeserializeOwned + Send + 'static,
    {
        match serde_json::to_vec(body) {
            Ok(body) => self.send("PUT", path, Some(body), decode_data),
            Err(err) => Promise::from_ready(Err(err.into())),
        }
    }

    pub fn delete(&self, path: &str) -> ApiPromise<()> {
        self.send("DELETE", path, None, decode_empty)
    }

    fn request(&self, method: &str, path: &str, body: Option<Vec<u8>>) -> Result<ehttp::Request> {
        let url = self.url(path)?;

        let mut request = ehttp::Request::get(url.as_str());
        request.method = method.to_owned();
        if let Some(body) = body {
            request.body = body;
        }
        request.headers.insert("Content-Type", "application/json");
        if let Some(token) = &self.config.token {
            request
                .headers
                .insert("Authorization", format!("Bearer {token}"));
        }

        Ok(request)
    }

    fn send<T>(
        &self,
        method: &str,
        path: &str,
        body: Option<Vec<u8>>,
        decode: fn(u16, &str, &[u8]) -> Result<T>,
    ) -> ApiPromise<T>
    where
        T: Send + 'static,
    {
        let request = match self.request(method, path, body) {
            Ok(request) => request,
            Err(err) => return Promise::from_ready(Err(err)),
        };

        debug!("API request: {} {}", request.method, request.url);

        let (sender, promise) = Promise::new();
        ehttp::fetch(request, move |response| {
            let result = match response {
                Ok(resp) => {
                    debug!("API response: {} {}", resp.status, resp.url);
                    decode(resp.status, &resp.status_text, &resp.bytes)
                }
                Err(err) => Err(Error::Transport(err)),
            };

            if let Err(err) = &result {
                warn!("API error: {err}");
            }

            sender.send(result);
        });

        promise
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn error_from_response(status: u16, status_text: &str, bytes: &[u8]) -> Error {
    let message = serde_json::from_slice::<ApiResponse<IgnoredAny>>(bytes)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status_text.to_owned());

    if status == 401 {
        Error::Unauthorized(message)
    } else {
        Error::http(status, message)
    }
}

/// Unwrap the envelope of a response that must carry data.
pub fn decode_data<T: DeserializeOwned>(status: u16, status_text: &str, bytes: &[u8]) -> Result<T> {
    if !is_success(status) {
        return Err(error_from_response(status, status_text, bytes));
    }

    let envelope: ApiResponse<T> = serde_json::from_slice(bytes)?;
    if !envelope.success {
        return Err(Error::http(status, envelope.message));
    }

    envelope
        .data
        .ok_or_else(|| Error::Generic("response envelope carried no data".to_owned()))
}

pub fn decode_list<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    bytes: &[u8],
) -> Result<Vec<T>> {
    Ok(match decode_data::<Listing<T>>(status, status_text, bytes)? {
        Listing::Page(page) => page.content,
        Listing::Items(items) => items,
    })
}

/// For endpoints like DELETE whose payload is irrelevant (or absent).
pub fn decode_empty(status: u16, status_text: &str, bytes: &[u8]) -> Result<()> {
    if !is_success(status) {
        return Err(error_from_response(status, status_text, bytes));
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    let envelope: ApiResponse<IgnoredAny> = serde_json::from_slice(bytes)?;
    if envelope.success {
        Ok(())
    } else {
        Err(Error::http(status, envelope.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings_with(url: &str) -> Settings {
        Settings {
            api_base_url: url.to_owned(),
            ..Settings::default()
        }
    }

    #[test]
    fn url_keeps_the_base_path() {
        let client = ApiClient::new(ApiConfig::new("http://localhost:8080/api/v1").unwrap());
        assert_eq!(
            client.url("/calendar/events").unwrap().as_str(),
            "http://localhost:8080/api/v1/calendar/events"
        );

        let client = ApiClient::new(ApiConfig::new("http://localhost:8080/api/v1/").unwrap());
        assert_eq!(
            client.url("calendar/7").unwrap().as_str(),
            "http://localhost:8080/api/v1/calendar/7"
        );
    }

    #[test]
    fn config_precedence_is_args_then_env_then_settings() {
        let settings = settings_with("http://settings.example/api/v1");
        let env = |key: &str| match key {
            API_BASE_URL_ENV => Some("http://env.example/api/v1".to_owned()),
            API_TOKEN_ENV => Some("env-token".to_owned()),
            _ => None,
        };

        let from_env = ApiConfig::resolve_with(&Args::default(), &settings, env).unwrap();
        assert_eq!(from_env.base_url.as_str(), "http://env.example/api/v1");
        assert_eq!(from_env.token.as_deref(), Some("env-token"));

        let args = Args {
            api_url: Some("http://args.example/api/v1".to_owned()),
            token: Some("arg-token".to_owned()),
            ..Args::default()
        };
        let from_args = ApiConfig::resolve_with(&args, &settings, env).unwrap();
        assert_eq!(from_args.base_url.as_str(), "http://args.example/api/v1");
        assert_eq!(from_args.token.as_deref(), Some("arg-token"));

        let from_settings = ApiConfig::resolve_with(&Args::default(), &settings, |_| None).unwrap();
        assert_eq!(
            from_settings.base_url.as_str(),
            "http://settings.example/api/v1"
        );
        assert_eq!(from_settings.token, None);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiConfig::resolve_with(&Args::default(), &settings_with("not a url"), |_| None);
        assert!(matches!(err, Err(Error::Url(_))));
    }

    #[test]
    fn blank_token_is_dropped() {
        let config = ApiConfig::new("http://localhost:8080/api/v1")
            .unwrap()
            .with_token(Some("  ".to_owned()));
        assert_eq!(config.token, None);
    }

    #[test]
    fn decode_data_unwraps_the_envelope() {
        let body = br#"{"success":true,"message":"ok","data":[1,2,3],"status":200,"timestamp":"2026-01-01T00:00:00Z"}"#;
        let data: Vec<u32> = decode_data(200, "OK", body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn decode_data_reports_unsuccessful_envelopes() {
        let body = br#"{"success":false,"message":"Chapter is inactive","data":null}"#;
        let err = decode_data::<Vec<u32>>(200, "OK", body).unwrap_err();
        assert_eq!(err.to_string(), "http 200: Chapter is inactive");
    }

    #[test]
    fn decode_data_uses_server_message_on_failure() {
        let body = br#"{"success":false,"message":"Event not found","status":400}"#;
        let err = decode_data::<u32>(400, "Bad Request", body).unwrap_err();
        assert!(err.is_not_found());

        let err = decode_data::<u32>(502, "Bad Gateway", b"<html>").unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "http 502: Bad Gateway");

        let err = decode_data::<u32>(401, "Unauthorized", b"").unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn decode_empty_accepts_blank_and_enveloped_bodies() {
        assert!(decode_empty(204, "No Content", b"").is_ok());
        assert!(decode_empty(200, "OK", br#"{"success":true,"message":"deleted","data":null}"#).is_ok());
        assert!(decode_empty(200, "OK", br#"{"success":false,"message":"nope"}"#).is_err());
        assert!(decode_empty(404, "Not Found", b"").unwrap_err().is_not_found());
    }

    #[test]
    fn page_content_is_extracted() {
        let body = br#"{"success":true,"message":"","data":{"content":[4,5],"totalPages":1}}"#;
        let page: Page<u32> = decode_data(200, "OK", body).unwrap();
        assert_eq!(page.content, vec![4, 5]);

        let listed: Vec<u32> = decode_list(200, "OK", body).unwrap();
        assert_eq!(listed, vec![4, 5]);

        let bare = br#"{"success":true,"message":"","data":[6]}"#;
        let listed: Vec<u32> = decode_list(200, "OK", bare).unwrap();
        assert_eq!(listed, vec![6]);
    }
}
