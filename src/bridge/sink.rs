// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Destinations for scan findings

use std::io::Write;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::discovery::BridgeLocator;
use super::submit::{BridgeClient, SubmissionSummary};
use crate::error::Result;
use crate::finding::{Finding, FindingExport};

/// Something that accepts a batch of findings for one page
#[async_trait]
pub trait FindingSink: Send + Sync {
    /// Deliver `findings`; `page_url` fills in findings without a URL
    async fn deliver(&self, findings: &[Finding], page_url: &str) -> Result<SubmissionSummary>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Discovers the local bridge, then posts findings to it
pub struct BridgeSink {
    locator: BridgeLocator,
    client: BridgeClient,
}

impl BridgeSink {
    pub fn new(locator: BridgeLocator, client: BridgeClient) -> Self {
        Self { locator, client }
    }

    pub fn locator(&self) -> &BridgeLocator {
        &self.locator
    }
}

#[async_trait]
impl FindingSink for BridgeSink {
    async fn deliver(&self, findings: &[Finding], page_url: &str) -> Result<SubmissionSummary> {
        let base = self.locator.require().await?;
        Ok(self.client.submit_all(&base, findings, page_url).await)
    }

    fn name(&self) -> &str {
        "bridge"
    }
}

/// Writes the JSON export to any writer (stdout in the CLI)
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: Write + Send> FindingSink for JsonSink<W> {
    async fn deliver(&self, findings: &[Finding], _page_url: &str) -> Result<SubmissionSummary> {
        let json = FindingExport::new(findings).to_json_pretty()?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        Ok(SubmissionSummary {
            bridge: self.name().to_string(),
            found: findings.len(),
            sent: findings.len(),
            ..Default::default()
        })
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use crate::error::Error;
    use crate::finding::FindingType;
    use crate::http::HttpClient;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_json_sink() {
        let sink = JsonSink::new(Vec::new());
        let findings = vec![Finding::new(
            FindingType::HiddenOrDisabledControl,
            "https://app.test/",
        )];
        let summary = sink.deliver(&findings, "").await.unwrap();
        assert_eq!(summary.sent, 1);

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["findings"][0]["host"], "app.test");
    }

    #[tokio::test]
    async fn test_bridge_sink() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/finding"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let config = BridgeConfig::default()
            .ports([server.address().port()])
            .request_timeout(Duration::from_millis(500));
        let http = HttpClient::new().unwrap();
        let sink = BridgeSink::new(
            BridgeLocator::new(http.clone(), config.clone()),
            BridgeClient::new(http, config),
        );

        let findings = vec![Finding::new(FindingType::HiddenOrDisabledControl, "")];
        let summary = sink.deliver(&findings, "https://page.test/").await.unwrap();
        assert_eq!(summary.bridge, server.uri());
        assert_eq!(summary.sent, 1);
        assert_eq!(sink.name(), "bridge");
    }

    #[tokio::test]
    async fn test_bridge_sink_unreachable() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = BridgeConfig::default().ports([port]);
        let http = HttpClient::new().unwrap();
        let sink = BridgeSink::new(
            BridgeLocator::new(http.clone(), config.clone()),
            BridgeClient::new(http, config),
        );

        let err = sink.deliver(&[], "").await.unwrap_err();
        assert!(matches!(err, Error::BridgeUnreachable { .. }));
    }
}
