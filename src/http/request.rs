// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request type

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::form_urlencoded;
use url::Url;

use super::{headers, FORM_URLENCODED};
use crate::error::Result;

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// Per-request timeout; `None` falls back to the client timeout
    pub timeout: Option<Duration>,
}

impl Request {
    /// Create a request with an arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        })
    }

    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Set a header; invalid names or values are ignored
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set an `application/x-www-form-urlencoded` body. Field order is kept.
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in fields {
            serializer.append_pair(k.as_ref(), v.as_ref());
        }
        self.body = Some(Bytes::from(serializer.finish()));
        self.header(headers::CONTENT_TYPE, FORM_URLENCODED)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = Request::get("http://127.0.0.1:17373/api/health").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.port(), Some(17373));
        assert!(req.timeout.is_none());
    }

    #[test]
    fn test_bad_url() {
        assert!(Request::get("not a url").is_err());
    }

    #[test]
    fn test_form_body() {
        let req = Request::post("http://127.0.0.1:17373/api/finding")
            .unwrap()
            .form([("title", "Save & exit"), ("evidence", "<a href=\"/x?y=1\">")]);

        assert_eq!(
            req.headers.get("content-type").unwrap(),
            "application/x-www-form-urlencoded"
        );
        let body = String::from_utf8(req.body.unwrap().to_vec()).unwrap();
        assert_eq!(
            body,
            "title=Save+%26+exit&evidence=%3Ca+href%3D%22%2Fx%3Fy%3D1%22%3E"
        );
    }
}
