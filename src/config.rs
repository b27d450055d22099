// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scan and bridge configuration

use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable that pins bridge discovery to a single port
pub const BRIDGE_PORT_ENV: &str = "CLIENTSIDEEYE_BRIDGE_PORT";

/// Identifier sent as the `source` field of every submission
pub const BRIDGE_SOURCE: &str = "clientsideeye-browser-bridge";

pub const DEFAULT_BRIDGE_HOST: &str = "127.0.0.1";
pub const DEFAULT_FIRST_PORT: u16 = 17373;
pub const DEFAULT_LAST_PORT: u16 = 17382;

/// DOM scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Upper bound on loading plus scanning one target
    pub exec_timeout: Duration,
    /// Findings kept per scan, in document order
    pub max_findings: usize,
    /// Resolve `<style>` blocks in addition to inline styles
    pub use_stylesheets: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exec_timeout: Duration::from_millis(5000),
            max_findings: 50,
            use_stylesheets: true,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exec_timeout(mut self, timeout: Duration) -> Self {
        self.exec_timeout = timeout;
        self
    }

    pub fn max_findings(mut self, max: usize) -> Self {
        self.max_findings = max;
        self
    }

    pub fn use_stylesheets(mut self, enabled: bool) -> Self {
        self.use_stylesheets = enabled;
        self
    }

    /// Only inline `style` attributes count towards visibility
    pub fn inline_styles_only() -> Self {
        Self {
            use_stylesheets: false,
            ..Default::default()
        }
    }
}

/// Local bridge discovery and submission configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub host: String,
    /// Probe order
    pub ports: Vec<u16>,
    /// Timeout applied to each probe and each submission
    pub request_timeout: Duration,
    /// Value of the `source` form field
    pub source: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BRIDGE_HOST.to_string(),
            ports: (DEFAULT_FIRST_PORT..=DEFAULT_LAST_PORT).collect(),
            request_timeout: Duration::from_millis(1200),
            source: BRIDGE_SOURCE.to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus the `CLIENTSIDEEYE_BRIDGE_PORT` override
    pub fn from_env() -> Result<Self> {
        Self::default().port_override(std::env::var(BRIDGE_PORT_ENV).ok().as_deref())
    }

    /// Pin discovery to one port when `value` is set and non-empty
    pub fn port_override(self, value: Option<&str>) -> Result<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(self),
            Some(v) => {
                let port: u16 = v.parse().map_err(|_| {
                    Error::config(format!("{} must be a port number, got '{}'", BRIDGE_PORT_ENV, v))
                })?;
                Ok(self.ports([port]))
            }
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.ports = ports.into_iter().collect();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn first_port(&self) -> u16 {
        self.ports.first().copied().unwrap_or(DEFAULT_FIRST_PORT)
    }

    pub fn last_port(&self) -> u16 {
        self.ports.last().copied().unwrap_or(DEFAULT_LAST_PORT)
    }

    /// `http://{host}:{port}`
    pub fn base_url(&self, port: u16) -> String {
        format!("http://{}:{}", self.host, port)
    }

    /// Candidate base URLs in probe order
    pub fn candidates(&self) -> impl Iterator<Item = String> + '_ {
        self.ports.iter().map(move |&port| self.base_url(port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.exec_timeout, Duration::from_millis(5000));
        assert_eq!(config.max_findings, 50);
        assert!(config.use_stylesheets);
        assert!(!ScanConfig::inline_styles_only().use_stylesheets);
    }

    #[test]
    fn test_bridge_candidates() {
        let config = BridgeConfig::default();
        let bases: Vec<_> = config.candidates().collect();
        assert_eq!(bases.len(), 10);
        assert_eq!(bases[0], "http://127.0.0.1:17373");
        assert_eq!(bases[9], "http://127.0.0.1:17382");
        assert_eq!(config.request_timeout, Duration::from_millis(1200));
    }

    #[test]
    fn test_port_override() {
        let pinned = BridgeConfig::default().port_override(Some(" 18000 ")).unwrap();
        assert_eq!(pinned.ports, vec![18000]);

        let untouched = BridgeConfig::default().port_override(Some("")).unwrap();
        assert_eq!(untouched.first_port(), 17373);
        assert_eq!(untouched.last_port(), 17382);

        assert!(BridgeConfig::default().port_override(Some("http")).is_err());
    }
}
