// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Target loading: a URL, a local HTML file, or stdin

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tokio::io::AsyncReadExt;
use url::Url;

use crate::dom::{parse_html_with_url, Document};
use crate::error::{Error, ErrorContext, Result};
use crate::http::{HttpClient, Request};

/// Where a page comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `http://` or `https://` URL
    Url(Url),
    /// Local HTML file
    File(PathBuf),
    /// `-`
    Stdin,
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::config("empty target"));
        }
        if s == "-" {
            return Ok(Target::Stdin);
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Target::Url(Url::parse(s)?));
        }
        if lower.starts_with("file://") {
            let url = Url::parse(s)?;
            let path = url
                .to_file_path()
                .map_err(|_| Error::config(format!("not a local file URL: {}", s)))?;
            return Ok(Target::File(path));
        }
        Ok(Target::File(PathBuf::from(s)))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Url(url) => write!(f, "{}", url),
            Target::File(path) => write!(f, "{}", path.display()),
            Target::Stdin => f.write_str("-"),
        }
    }
}

/// A loaded and parsed page
#[derive(Debug, Clone)]
pub struct LoadedPage {
    /// Final URL after redirects, or the `file://` URL of a local file
    pub url: Option<Url>,
    pub html: String,
    pub document: Document,
}

impl LoadedPage {
    /// Parse raw HTML as if it had been served from `url`
    pub fn from_html(html: impl Into<String>, url: Option<Url>) -> Result<Self> {
        let html = html.into();
        let document = parse_html_with_url(&html, url.clone())?;
        Ok(Self {
            url,
            html,
            document,
        })
    }

    /// Page URL as a string, empty when unknown
    pub fn url_string(&self) -> String {
        self.url.as_ref().map(Url::to_string).unwrap_or_default()
    }
}

/// Loads targets into parsed documents
#[derive(Clone)]
pub struct PageLoader {
    client: HttpClient,
}

impl PageLoader {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn load(&self, target: &Target) -> Result<LoadedPage> {
        match target {
            Target::Url(url) => self.fetch(url).await,
            Target::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| Error::load(path.display().to_string(), None, e.to_string()))?;
                let url = std::fs::canonicalize(path)
                    .ok()
                    .and_then(|abs| Url::from_file_path(abs).ok());
                tracing::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
                LoadedPage::from_html(String::from_utf8_lossy(&bytes), url)
            }
            Target::Stdin => {
                let mut html = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut html)
                    .await
                    .context("reading stdin")?;
                LoadedPage::from_html(html, None)
            }
        }
    }

    async fn fetch(&self, url: &Url) -> Result<LoadedPage> {
        let response = self.client.execute(Request::get(url.as_str())?).await?;
        if !response.is_success() {
            return Err(Error::load(
                url.as_str(),
                Some(response.status_code()),
                response.status_line(),
            ));
        }
        if !response.is_html() {
            tracing::warn!(
                "{} served {} - parsing as HTML anyway",
                response.url,
                response.content_type().unwrap_or("no content type")
            );
        }
        tracing::info!("Fetched {} ({}ms)", response.url, response.response_time_ms);
        LoadedPage::from_html(response.text_lossy(), Some(response.url.clone()))
    }
}
