use crate::domain::errors::ChainError;
use crate::domain::ports::ChainReader;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

pub const TOKEN_DECIMALS: u32 = 18;

// ERC-20 function selectors
const SELECTOR_TOTAL_SUPPLY: &str = "18160ddd";
const SELECTOR_BALANCE_OF: &str = "70a08231";

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Read-only JSON-RPC connector for the token contract.
///
/// Queries `totalSupply()` and `balanceOf(address)` via `eth_call`. When
/// no contract address is configured, queries answer zero instead of
/// failing, so the alert loop stays quiet on a bare dev setup.
pub struct JsonRpcChainReader {
    http: reqwest::Client,
    rpc_url: Url,
    contract_address: String,
}

impl JsonRpcChainReader {
    pub fn new(rpc_url: Url, contract_address: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            rpc_url,
            contract_address,
        }
    }

    async fn eth_call(&self, calldata: String) -> Result<u128, ChainError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": self.contract_address, "data": calldata },
                "latest"
            ]
        });

        let response: RpcResponse = self
            .http
            .post(self.rpc_url.clone())
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let hex_word = response.result.ok_or_else(|| ChainError::MalformedResponse {
            reason: "neither result nor error present".to_string(),
        })?;

        decode_uint_word(&hex_word)
    }

    fn wei_to_tokens(raw: u128) -> Result<Decimal, ChainError> {
        let raw = i128::try_from(raw).map_err(|_| ChainError::MalformedResponse {
            reason: "amount exceeds representable range".to_string(),
        })?;
        Decimal::try_from_i128_with_scale(raw, TOKEN_DECIMALS).map_err(|e| {
            ChainError::MalformedResponse {
                reason: format!("amount does not fit a decimal: {}", e),
            }
        })
    }
}

#[async_trait]
impl ChainReader for JsonRpcChainReader {
    async fn total_supply(&self) -> Result<Decimal, ChainError> {
        if self.contract_address.is_empty() {
            debug!("Chain: no contract configured, reporting zero supply");
            return Ok(Decimal::ZERO);
        }
        let raw = self
            .eth_call(format!("0x{}", SELECTOR_TOTAL_SUPPLY))
            .await?;
        Self::wei_to_tokens(raw)
    }

    async fn balance_of(&self, address: &str) -> Result<Decimal, ChainError> {
        if self.contract_address.is_empty() {
            return Ok(Decimal::ZERO);
        }
        let calldata = format!(
            "0x{}{}",
            SELECTOR_BALANCE_OF,
            encode_address_argument(address)?
        );
        let raw = self.eth_call(calldata).await?;
        Self::wei_to_tokens(raw)
    }
}

/// ABI-encode an address as a left-padded 32-byte word.
fn encode_address_argument(address: &str) -> Result<String, ChainError> {
    let stripped = address.strip_prefix("0x").unwrap_or(address);
    let bytes = hex::decode(stripped).map_err(|_| ChainError::InvalidAddress {
        address: address.to_string(),
    })?;
    if bytes.len() != 20 {
        return Err(ChainError::InvalidAddress {
            address: address.to_string(),
        });
    }
    Ok(format!("{:0>64}", stripped.to_lowercase()))
}

/// Decode a 32-byte big-endian uint word returned by `eth_call`.
fn decode_uint_word(hex_word: &str) -> Result<u128, ChainError> {
    let stripped = hex_word.strip_prefix("0x").unwrap_or(hex_word);
    let bytes = hex::decode(stripped).map_err(|e| ChainError::MalformedResponse {
        reason: format!("invalid hex in result: {}", e),
    })?;
    if bytes.len() != 32 {
        return Err(ChainError::MalformedResponse {
            reason: format!("expected 32-byte word, got {} bytes", bytes.len()),
        });
    }
    if bytes[..16].iter().any(|&b| b != 0) {
        return Err(ChainError::MalformedResponse {
            reason: "value exceeds 128 bits".to_string(),
        });
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&bytes[16..]);
    Ok(u128::from_be_bytes(low))
}
