//! JSON-RPC transport for EVM-compatible chains.
//!
//! The client holds no private keys. Writes go through
//! `eth_sendTransaction`, so the RPC endpoint must manage signing for the
//! `from` account (a local development node or a wallet-backed provider).
//! Reads go through `eth_call` against the latest block.
//!
//! Contract reverts are pulled out of JSON-RPC error responses in two
//! shapes: `Error(string)` payloads in the error `data` field, and
//! `execution reverted: ...` message prefixes. Both surface as
//! [`Error::Revert`] with the bare reason.

use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::chain::abi;
use crate::error::{Error, Result};

/// Minimal JSON-RPC client for one endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
}

/// A mined transaction receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    /// True when the transaction executed without reverting (`status` 0x1).
    pub succeeded: bool,
    /// Block the transaction landed in.
    pub block_number: u64,
}

impl RpcClient {
    /// Create a client for an endpoint.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Rpc(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Send a JSON-RPC request and return the result field.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        debug!(method, "rpc request");
        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Rpc(format!("{method}: request timed out"))
                } else {
                    Error::Rpc(format!("{method}: {e}"))
                }
            })?;

        if !resp.status().is_success() {
            return Err(Error::Rpc(format!("{method}: HTTP {}", resp.status())));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| Error::Rpc(format!("{method}: invalid JSON response: {e}")))?;

        if let Some(error) = json.get("error") {
            return Err(decode_rpc_error(error));
        }

        json.get("result")
            .cloned()
            .ok_or_else(|| Error::Rpc(format!("{method}: response missing 'result' field")))
    }

    /// Execute a read-only contract call and return the raw return data.
    pub async fn call_contract(&self, to: &str, data: &str) -> Result<Vec<u8>> {
        let tx = json!({ "to": to, "data": data });
        let result = self.rpc_call("eth_call", json!([tx, "latest"])).await?;
        let payload = result
            .as_str()
            .ok_or_else(|| Error::Rpc("eth_call returned non-string result".into()))?;
        hex::decode(payload.trim_start_matches("0x"))
            .map_err(|e| Error::Rpc(format!("eth_call returned invalid hex: {e}")))
    }

    /// Submit a state-changing transaction, signed by the endpoint, and
    /// return its hash.
    pub async fn send_transaction(&self, from: &str, to: &str, data: &str) -> Result<String> {
        let tx = json!({
            "from": from,
            "to": to,
            "data": data,
        });
        let result = self
            .rpc_call("eth_sendTransaction", json!([tx]))
            .await?;
        result
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| {
                Error::Transaction("eth_sendTransaction returned non-string result".into())
            })
    }

    /// Fetch the receipt for a transaction. `None` while still pending.
    pub async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>> {
        let receipt = self
            .rpc_call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        if receipt.is_null() {
            return Ok(None);
        }
        Ok(Some(parse_receipt(&receipt)))
    }

    /// Current block height.
    pub async fn block_number(&self) -> Result<u64> {
        let result = self.rpc_call("eth_blockNumber", json!([])).await?;
        parse_quantity(&result, "block number")
    }
}

/// Parse a hex quantity field (`"0x1a"`).
fn parse_quantity(value: &Value, what: &str) -> Result<u64> {
    let text = value
        .as_str()
        .ok_or_else(|| Error::Rpc(format!("{what} is not a string")))?;
    u64::from_str_radix(text.trim_start_matches("0x"), 16)
        .map_err(|e| Error::Rpc(format!("{what} is not a hex quantity: {e}")))
}

fn parse_receipt(receipt: &Value) -> TxReceipt {
    let status = receipt
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("0x0");
    let block_number = receipt
        .get("blockNumber")
        .and_then(Value::as_str)
        .and_then(|s| u64::from_str_radix(s.trim_start_matches("0x"), 16).ok())
        .unwrap_or(0);
    TxReceipt {
        succeeded: status != "0x0",
        block_number,
    }
}

/// Map a JSON-RPC error object to the domain taxonomy, extracting revert
/// reasons where the node provides them.
fn decode_rpc_error(error: &Value) -> Error {
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown RPC error");

    if let Some(data) = error.get("data").and_then(Value::as_str) {
        if let Ok(bytes) = hex::decode(data.trim_start_matches("0x")) {
            if let Some(reason) = abi::decode_revert(&bytes) {
                return Error::Revert(reason);
            }
        }
    }

    if let Some(rest) = message.strip_prefix("execution reverted") {
        let reason = rest.trim_start_matches(':').trim();
        if reason.is_empty() {
            return Error::Revert("execution reverted".into());
        }
        return Error::Revert(reason.to_string());
    }

    Error::Rpc(message.to_string())
}
