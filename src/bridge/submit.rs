// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Sequential submission of findings to a bridge

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::finding::{Finding, FindingType};
use crate::http::{HttpClient, Request, Response};

/// Finding endpoint under the bridge base URL
pub const FINDING_PATH: &str = "/api/finding";

const DEFAULT_TITLE: &str = "Client-side gated control found in browser DOM";
const DEFAULT_SUMMARY: &str =
    "Control appears client-side disabled/hidden in rendered DOM and may still be triggerable.";
const NO_EVIDENCE: &str = "(no evidence)";

/// Counters and first failures of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionSummary {
    /// Bridge base URL
    pub bridge: String,
    pub found: usize,
    pub sent: usize,
    pub failed: usize,
    /// First non-2xx answer as `"{status} {reason}"`
    pub http_error: Option<String>,
    /// First transport error message
    pub first_error: Option<String>,
}

impl SubmissionSummary {
    pub fn all_sent(&self) -> bool {
        self.failed == 0
    }
}

/// Posts findings to `{base}/api/finding` one at a time
#[derive(Clone)]
pub struct BridgeClient {
    client: HttpClient,
    config: BridgeConfig,
}

impl BridgeClient {
    pub fn new(client: HttpClient, config: BridgeConfig) -> Self {
        Self { client, config }
    }

    /// Form fields in submission order. Empty finding fields fall back to
    /// the page URL and the generic texts.
    pub fn form_fields(&self, finding: &Finding, page_url: &str) -> Vec<(&'static str, String)> {
        let or = |value: &str, fallback: &str| {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };

        vec![
            ("source", self.config.source.clone()),
            ("url", or(&finding.url, page_url)),
            ("type", finding.finding_type.as_str().to_string()),
            ("severity", finding.severity.as_str().to_string()),
            ("confidence", finding.confidence.to_string()),
            ("title", or(&finding.title, DEFAULT_TITLE)),
            ("summary", or(&finding.summary, DEFAULT_SUMMARY)),
            ("evidence", or(&finding.evidence, NO_EVIDENCE)),
            (
                "recommendation",
                or(
                    &finding.recommendation,
                    FindingType::HiddenOrDisabledControl.recommendation(),
                ),
            ),
        ]
    }

    /// POST a single finding
    pub async fn submit(&self, base: &str, finding: &Finding, page_url: &str) -> Result<Response> {
        let request = Request::post(format!("{}{}", base, FINDING_PATH))?
            .form(self.form_fields(finding, page_url))
            .timeout(self.config.request_timeout);
        self.client.execute(request).await
    }

    /// POST every finding in order, counting successes and failures
    pub async fn submit_all(
        &self,
        base: &str,
        findings: &[Finding],
        page_url: &str,
    ) -> SubmissionSummary {
        let mut summary = SubmissionSummary {
            bridge: base.to_string(),
            found: findings.len(),
            ..Default::default()
        };

        for finding in findings {
            match self.submit(base, finding, page_url).await {
                Ok(response) if response.is_success() => summary.sent += 1,
                Ok(response) => {
                    summary.failed += 1;
                    tracing::debug!("Bridge rejected finding: {}", response.status_line());
                    summary.http_error.get_or_insert_with(|| response.status_line());
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::debug!("Bridge submission failed: {}", e);
                    summary.first_error.get_or_insert_with(|| e.brief());
                }
            }
        }

        tracing::info!(
            "Submitted {} findings to {}: {} sent, {} failed",
            summary.found,
            base,
            summary.sent,
            summary.failed
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;
    use std::time::Duration;
    use url::form_urlencoded;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> BridgeClient {
        let config = BridgeConfig::default().request_timeout(Duration::from_millis(300));
        BridgeClient::new(HttpClient::new().unwrap(), config)
    }

    fn finding(evidence: &str) -> Finding {
        Finding::new(FindingType::HiddenOrDisabledControl, "https://app.test/admin")
            .severity(Severity::High)
            .confidence(85)
            .title("Client-side disabled/hidden control found in rendered DOM")
            .summary("Detected an actionable element that is disabled on the client side.")
            .evidence(evidence)
    }

    #[test]
    fn test_form_fields_and_fallbacks() {
        let mut bare = Finding::new(FindingType::HiddenOrDisabledControl, "");
        bare.recommendation.clear();

        let fields = client().form_fields(&bare, "https://page.test/");
        let get = |k: &str| {
            fields
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(fields[0].0, "source");
        assert_eq!(get("source"), "clientsideeye-browser-bridge");
        assert_eq!(get("url"), "https://page.test/");
        assert_eq!(get("type"), "HIDDEN_OR_DISABLED_CONTROL");
        assert_eq!(get("severity"), "MEDIUM");
        assert_eq!(get("confidence"), "55");
        assert_eq!(get("title"), DEFAULT_TITLE);
        assert_eq!(get("summary"), DEFAULT_SUMMARY);
        assert_eq!(get("evidence"), "(no evidence)");
        assert!(get("recommendation").starts_with("Do not rely on client-side"));
    }

    #[tokio::test]
    async fn test_submit_all_counts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FINDING_PATH))
            .and(body_string_contains("reject-me"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(FINDING_PATH))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let findings = vec![
            finding("<button disabled>Save</button>"),
            finding("<a hidden>reject-me</a>"),
            finding("<a hidden>Delete</a>"),
        ];
        let summary = client()
            .submit_all(&server.uri(), &findings, "https://app.test/admin")
            .await;

        assert_eq!(summary.found, 3);
        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.http_error.as_deref(), Some("400 Bad Request"));
        assert!(summary.first_error.is_none());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
        let fields: Vec<(String, String)> = form_urlencoded::parse(&requests[0].body)
            .into_owned()
            .collect();
        let names: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "source",
                "url",
                "type",
                "severity",
                "confidence",
                "title",
                "summary",
                "evidence",
                "recommendation"
            ]
        );
        assert_eq!(fields[7].1, "<button disabled>Save</button>");
    }

    #[tokio::test]
    async fn test_transport_errors_counted() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base = format!("http://127.0.0.1:{}", port);

        let findings = vec![finding("a"), finding("b")];
        let summary = client().submit_all(&base, &findings, "").await;

        assert_eq!(summary.sent, 0);
        assert_eq!(summary.failed, 2);
        assert!(summary.first_error.is_some());
        assert!(summary.http_error.is_none());
        assert!(!summary.all_sent());
    }
}
