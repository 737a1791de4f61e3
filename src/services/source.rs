//! Snapshot sources: the i2pcontrol JSON-RPC client and a fixed stand-in
//!
//! Everything protocol-shaped lives here, behind the [`SnapshotSource`]
//! seam; the rest of the crate only ever sees a [`Snapshot`] or an error.

use chrono::Utc;
use log::debug;
use serde_json::{Value, json};

use crate::{Error, Result, Snapshot, SnapshotSource};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:7657/jsonrpc";
pub const DEFAULT_PASSWORD: &str = "itoopie";

const API_VERSION: u32 = 1;
/// Rate-stat window queried from the router, in milliseconds.
const RATE_PERIOD_MS: u64 = 3_600_000;

const REJECT_STAT: &str = "tunnel.buildExploratoryReject";
const SUCCESS_STAT: &str = "tunnel.buildExploratorySuccess";
const EXPIRE_STAT: &str = "tunnel.buildExploratoryExpire";

/// JSON-RPC 2.0 client for a router's i2pcontrol endpoint.
///
/// Authenticates once per snapshot and queries one rate stat per counter.
/// Every transport, HTTP, or RPC-level failure maps to [`Error::Source`].
pub struct I2pControlSource {
    endpoint: String,
    password: String,
    client: reqwest::blocking::Client,
}

impl I2pControlSource {
    pub fn new(endpoint: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::Source(e.to_string()))?;
        Ok(I2pControlSource {
            endpoint: endpoint.into(),
            password: password.into(),
            client,
        })
    }

    fn call(&self, id: u64, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "id": id,
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| Error::Source(format!("{method}: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::Source(format!("{method}: HTTP {}", response.status())));
        }
        let reply: Value = response
            .json()
            .map_err(|e| Error::Source(format!("{method}: {e}")))?;
        if let Some(err) = reply.get("error") {
            return Err(Error::Source(format!("{method}: {err}")));
        }
        reply
            .get("result")
            .cloned()
            .ok_or_else(|| Error::Source(format!("{method}: reply carries no result")))
    }

    fn authenticate(&self) -> Result<String> {
        let result = self.call(
            1,
            "Authenticate",
            json!({ "API": API_VERSION, "Password": self.password }),
        )?;
        result
            .get("Token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::Source("Authenticate: reply carries no token".to_string()))
    }

    fn rate_stat(&self, id: u64, token: &str, stat: &str) -> Result<u64> {
        let result = self.call(
            id,
            "GetRate",
            json!({ "Stat": stat, "Period": RATE_PERIOD_MS, "Token": token }),
        )?;
        let value = result
            .get("Result")
            .and_then(Value::as_f64)
            .ok_or_else(|| Error::Source(format!("GetRate {stat}: reply carries no value")))?;
        Ok(value.max(0.0) as u64)
    }
}

impl SnapshotSource for I2pControlSource {
    fn snapshot(&self) -> Result<Snapshot> {
        let token = self.authenticate()?;
        let rejected = self.rate_stat(2, &token, REJECT_STAT)?;
        let succeeded = self.rate_stat(3, &token, SUCCESS_STAT)?;
        let expired = self.rate_stat(4, &token, EXPIRE_STAT)?;
        debug!("router counters: rejected={rejected} succeeded={succeeded} expired={expired}");
        Ok(Snapshot {
            collected_at: Utc::now(),
            rejected,
            succeeded,
            expired,
        })
    }
}

/// Source returning fixed counters; offline runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSource {
    pub rejected: u64,
    pub succeeded: u64,
    pub expired: u64,
}

impl FixedSource {
    #[must_use]
    pub fn new(rejected: u64, succeeded: u64, expired: u64) -> Self {
        FixedSource {
            rejected,
            succeeded,
            expired,
        }
    }
}

impl SnapshotSource for FixedSource {
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            collected_at: Utc::now(),
            rejected: self.rejected,
            succeeded: self.succeeded,
            expired: self.expired,
        })
    }
}
