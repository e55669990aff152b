//! Spreadsheet endpoint notifier
//!
//! Reports every scan outcome to a web-app endpoint (typically a spreadsheet
//! script) as a GET request with four query parameters: `tag`, `balance`,
//! `status`, and `access`. Parameters are form-encoded, so tags or statuses
//! containing `&`, `=`, or spaces cannot corrupt the query string.
//!
//! Only HTTP 200 counts as delivered. Any other status is logged and
//! otherwise ignored. Transport failures are returned as errors; there is no
//! retry.

use crate::core::{NotifyStatus, Notifier};
use crate::types::{LedgerError, ScanOutcome};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Notifier backed by a blocking `ureq` agent
pub struct SheetsNotifier {
    agent: ureq::Agent,
    endpoint: Url,
}

impl fmt::Debug for SheetsNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsNotifier")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl SheetsNotifier {
    /// Create a notifier for `endpoint`
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL of the endpoint; existing query parameters are kept
    /// * `timeout` - Overall request timeout, or `None` to wait indefinitely
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is empty or not a valid URL.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, LedgerError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(LedgerError::config("endpoint URL is empty"));
        }

        let endpoint = Url::parse(endpoint).map_err(|e| LedgerError::invalid_url(endpoint, e))?;

        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(SheetsNotifier {
            agent: builder.build(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the request URL for an outcome
    pub fn request_url(&self, outcome: &ScanOutcome) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("tag", &outcome.tag)
            .append_pair("balance", &outcome.balance_text())
            .append_pair("status", outcome.status.as_str())
            .append_pair("access", outcome.access.as_str());
        url
    }
}

impl Notifier for SheetsNotifier {
    fn notify(&mut self, outcome: &ScanOutcome) -> Result<NotifyStatus, LedgerError> {
        let url = self.request_url(outcome);

        match self.agent.request_url("GET", &url).call() {
            Ok(resp) if resp.status() == 200 => {
                let body = resp
                    .into_string()
                    .map_err(|e| LedgerError::notify(format!("failed to read response: {}", e)))?;
                log::info!("Data sent to endpoint: {}", body);
                Ok(NotifyStatus::Delivered { body })
            }
            Ok(resp) => {
                log::warn!("Endpoint answered with status {}", resp.status());
                Ok(NotifyStatus::Rejected {
                    code: resp.status(),
                })
            }
            Err(ureq::Error::Status(code, _)) => {
                log::warn!("Endpoint answered with status {}", code);
                Ok(NotifyStatus::Rejected { code })
            }
            Err(ureq::Error::Transport(err)) => Err(LedgerError::notify(err.to_string())),
        }
    }
}
