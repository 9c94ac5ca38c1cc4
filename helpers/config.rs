//! Deployment configuration read from the environment.
//!
//! Every setting has a default that targets a local dev node, so the deploy
//! script runs unconfigured against `anvil` or `hardhat node`.

use std::{path::PathBuf, time::Duration};

use alloy::{signers::local::PrivateKeySigner, transports::http::reqwest::Url};

use crate::error::{DeployError, Result};

pub const RPC_URL_VAR: &str = "NFT_DEPLOY_RPC_URL";
pub const PRIVATE_KEY_VAR: &str = "NFT_DEPLOY_PRIVATE_KEY";
pub const ARTIFACTS_VAR: &str = "NFT_DEPLOY_ARTIFACTS";
pub const CHAIN_ID_VAR: &str = "NFT_DEPLOY_CHAIN_ID";
pub const CONFIRMATIONS_VAR: &str = "NFT_DEPLOY_CONFIRMATIONS";
pub const TIMEOUT_VAR: &str = "NFT_DEPLOY_TIMEOUT_SECS";

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
/// First account of the well-known dev-node mnemonic.
pub const DEFAULT_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_CONFIRMATIONS: u64 = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub rpc_url: Url,
    pub signer: PrivateKeySigner,
    pub artifacts_dir: PathBuf,
    pub chain_id: Option<u64>,
    pub options: DeployOptions,
}

/// How long and how deep to wait for a deployment receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    pub confirmations: u64,
    pub timeout: Option<Duration>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            confirmations: DEFAULT_CONFIRMATIONS,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl DeployConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let rpc_url = get(RPC_URL_VAR)
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string())
            .parse::<Url>()
            .map_err(|e| invalid(RPC_URL_VAR, e))?;

        let signer = get(PRIVATE_KEY_VAR)
            .unwrap_or_else(|| DEFAULT_PRIVATE_KEY.to_string())
            .parse::<PrivateKeySigner>()
            .map_err(|e| invalid(PRIVATE_KEY_VAR, e))?;

        let artifacts_dir =
            PathBuf::from(get(ARTIFACTS_VAR).unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_string()));

        let chain_id = get(CHAIN_ID_VAR)
            .map(|value| parse_u64(CHAIN_ID_VAR, &value))
            .transpose()?;

        let confirmations = get(CONFIRMATIONS_VAR)
            .map(|value| parse_u64(CONFIRMATIONS_VAR, &value))
            .transpose()?
            .unwrap_or(DEFAULT_CONFIRMATIONS);
        if confirmations == 0 {
            return Err(invalid(CONFIRMATIONS_VAR, "must be at least 1"));
        }

        let timeout = match get(TIMEOUT_VAR) {
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            Some(value) => match parse_u64(TIMEOUT_VAR, &value)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        };

        Ok(Self {
            rpc_url,
            signer,
            artifacts_dir,
            chain_id,
            options: DeployOptions {
                confirmations,
                timeout,
            },
        })
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|e| invalid(var, e))
}

fn invalid(var: &'static str, reason: impl std::fmt::Display) -> DeployError {
    DeployError::Config {
        var,
        reason: reason.to_string(),
    }
}
