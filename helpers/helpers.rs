//! Common helper functions for deploy scripts and tests

mod artifacts;
mod config;
mod deploy;
mod error;
mod factory;
mod report;

pub use artifacts::{Artifact, ArtifactStore, Bytecode};
pub use config::{DeployConfig, DeployOptions};
pub use deploy::{deploy_contract, DeployedContract};
pub use error::{DeployError, Result};
pub use factory::ContractFactory;
pub use report::{deployment_line, init_tracing, print_deployment, DEPLOYMENT_LABEL};

pub mod env {
    pub use crate::config::{
        ARTIFACTS_VAR, CHAIN_ID_VAR, CONFIRMATIONS_VAR, DEFAULT_ARTIFACTS_DIR,
        DEFAULT_CONFIRMATIONS, DEFAULT_PRIVATE_KEY, DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS,
        PRIVATE_KEY_VAR, RPC_URL_VAR, TIMEOUT_VAR,
    };
}

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
};
use tracing::info;

pub const NFT_CONTRACT: &str = "TheDynamicNFT";
pub const NFT_NAME: &str = "Tiger";
pub const NFT_SYMBOL: &str = "TIGER";

/// Script setup: a signing provider plus where to find compiled contracts
pub struct ScriptSetup {
    pub provider: DynProvider,
    pub deployer: Address,
    pub chain_id: u64,
    pub artifacts: ArtifactStore,
}

impl ScriptSetup {
    /// Looks up a contract factory by name in the configured artifacts directory.
    pub fn contract_factory(&self, name: &str) -> Result<ContractFactory> {
        self.artifacts.contract_factory(name)
    }
}

/// Connect to the configured node with the configured signer and check the chain id
pub async fn setup_script(config: &DeployConfig) -> Result<ScriptSetup> {
    let deployer = config.signer.address();
    let provider = ProviderBuilder::new()
        .wallet(config.signer.clone())
        .connect_http(config.rpc_url.clone())
        .erased();

    let chain_id = check_chain_id(&provider, config.chain_id).await?;
    info!(rpc = %config.rpc_url, chain_id, %deployer, "connected");

    Ok(ScriptSetup {
        provider,
        deployer,
        chain_id,
        artifacts: ArtifactStore::new(&config.artifacts_dir),
    })
}

/// Returns the connected chain id, failing when it differs from `expected`.
pub async fn check_chain_id<P: Provider>(provider: &P, expected: Option<u64>) -> Result<u64> {
    let actual = provider.get_chain_id().await?;
    match expected {
        Some(expected) if expected != actual => {
            Err(DeployError::ChainIdMismatch { expected, actual })
        }
        _ => Ok(actual),
    }
}

/// Deploys `TheDynamicNFT` with the name `Tiger` and the symbol `TIGER`.
pub async fn deploy_nft(setup: &ScriptSetup, options: &DeployOptions) -> Result<DeployedContract> {
    let factory = setup.contract_factory(NFT_CONTRACT)?;
    factory
        .deploy_with_strs(&setup.provider, &[NFT_NAME, NFT_SYMBOL], options)
        .await
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::U64,
        providers::{mock::Asserter, ProviderBuilder},
    };

    use super::*;

    fn mocked_chain(chain_id: u64) -> impl Provider {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(chain_id));
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter)
    }

    #[tokio::test]
    async fn chain_id_mismatch_is_rejected() {
        let provider = mocked_chain(31337);
        match check_chain_id(&provider, Some(1)).await {
            Err(DeployError::ChainIdMismatch { expected, actual }) => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 31337);
            }
            other => panic!("expected ChainIdMismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn matching_or_unset_chain_id_is_accepted() {
        assert_eq!(check_chain_id(&mocked_chain(31337), Some(31337)).await.unwrap(), 31337);
        assert_eq!(check_chain_id(&mocked_chain(11155111), None).await.unwrap(), 11155111);
    }
}
