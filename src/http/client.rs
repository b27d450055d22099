// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::request::Request;
use super::response::Response;
use super::{headers, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub user_agent: String,
    /// Default timeout, overridden per request
    pub timeout: Duration,
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    pub default_headers: HeaderMap,
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            headers::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// HTTP client shared by page loading and the bridge client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// POST form fields, keeping their order
    pub async fn post_form<K, V>(
        &self,
        url: impl AsRef<str>,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Response>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.execute(Request::post(url)?.form(fields)).await
    }

    /// Execute a request
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned());
        let body = response.bytes().await?;
        let response_time = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "{} {} -> {} ({}ms)",
            request.method,
            request.url,
            status.as_u16(),
            response_time
        );

        Ok(Response::new(status, headers, body, final_url, response_time).reason(reason))
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
    }

    #[tokio::test]
    async fn test_get_and_post_form() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/finding"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("a=1&b=x+y"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let health = client
            .get(format!("{}/api/health", server.uri()))
            .await
            .unwrap();
        assert!(health.is_success());
        assert_eq!(health.text_lossy(), "ok");

        let posted = client
            .post_form(
                format!("{}/api/finding", server.uri()),
                [("a", "1"), ("b", "x y")],
            )
            .await
            .unwrap();
        assert_eq!(posted.status_code(), 201);
    }

    #[tokio::test]
    async fn test_server_reason_phrase() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 599 Bridge Busy\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await
                .unwrap();
        });

        let client = HttpClient::new().unwrap();
        let response = client.get(format!("http://{}/api/finding", addr)).await.unwrap();
        assert_eq!(response.status_code(), 599);
        assert_eq!(response.status_line(), "599 Bridge Busy");
    }

    #[tokio::test]
    async fn test_per_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = Request::get(server.uri())
            .unwrap()
            .timeout(Duration::from_millis(50));
        let err = client.execute(request).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
