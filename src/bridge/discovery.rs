// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Local bridge discovery over a bounded port list

use parking_lot::RwLock;

use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, Request};

/// Health endpoint probed on every candidate port
pub const HEALTH_PATH: &str = "/api/health";

/// Finds the first healthy bridge and remembers it
pub struct BridgeLocator {
    client: HttpClient,
    config: BridgeConfig,
    resolved: RwLock<Option<String>>,
    last_error: RwLock<Option<String>>,
}

impl BridgeLocator {
    pub fn new(client: HttpClient, config: BridgeConfig) -> Self {
        Self {
            client,
            config,
            resolved: RwLock::new(None),
            last_error: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Base URL of a previously resolved bridge
    pub fn cached(&self) -> Option<String> {
        self.resolved.read().clone()
    }

    /// Forget the resolved bridge so the next call probes again
    pub fn reset(&self) {
        *self.resolved.write() = None;
        *self.last_error.write() = None;
    }

    /// `"{base} -> {reason}"` for the last candidate that failed
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Probe failure text, when at least one probe failed
    pub fn probe_failure_text(&self) -> Option<String> {
        self.last_error()
            .map(|last| format!("Bridge probe failed.\nLast: {}", last))
    }

    /// Probe candidates in order; the first 2xx health answer wins and is cached
    pub async fn resolve(&self) -> Option<String> {
        if let Some(base) = self.cached() {
            return Some(base);
        }

        for base in self.config.candidates() {
            match self.probe(&base).await {
                Ok(()) => {
                    tracing::info!("Bridge found at {}", base);
                    *self.resolved.write() = Some(base.clone());
                    return Some(base);
                }
                Err(reason) => {
                    tracing::debug!("Bridge probe {} -> {}", base, reason);
                    *self.last_error.write() = Some(format!("{} -> {}", base, reason));
                }
            }
        }

        if let Some(text) = self.probe_failure_text() {
            tracing::warn!("{}", text);
        }
        None
    }

    /// Like [`resolve`](Self::resolve) but unreachable is an error
    pub async fn require(&self) -> Result<String> {
        self.resolve().await.ok_or_else(|| Error::BridgeUnreachable {
            first_port: self.config.first_port(),
            last_port: self.config.last_port(),
            last_error: self.last_error(),
        })
    }

    async fn probe(&self, base: &str) -> std::result::Result<(), String> {
        let request = Request::get(format!("{}{}", base, HEALTH_PATH))
            .map_err(|e| e.brief())?
            .timeout(self.config.request_timeout);
        let response = self.client.execute(request).await.map_err(|e| e.brief())?;
        if response.is_success() {
            Ok(())
        } else {
            Err(response.status_line())
        }
    }
}
