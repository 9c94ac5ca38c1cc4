//! One-time NFT deployment shared by the integration tests

use std::path::PathBuf;

use alloy::node_bindings::{Anvil, AnvilInstance};
use helpers::{
    deploy_nft, env, print_deployment, setup_script, DeployConfig, DeployedContract, ScriptSetup,
};

/// Artifacts directory checked into this crate. Its `TheDynamicNFT` init code
/// deploys a tiny runtime and ignores the constructor arguments.
pub fn fixture_artifacts() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/artifacts")
}

/// A dev node with `TheDynamicNFT` deployed on it. The node lives as long as this value.
pub struct NftDeployment {
    pub anvil: AnvilInstance,
    pub setup: ScriptSetup,
    pub nft: DeployedContract,
}

impl NftDeployment {
    /// Spawns `anvil`, deploys the NFT and prints its address.
    pub async fn before() -> anyhow::Result<Self> {
        let anvil = Anvil::new().try_spawn()?;

        let rpc_url = anvil.endpoint();
        let chain_id = anvil.chain_id().to_string();
        let artifacts = fixture_artifacts().to_string_lossy().to_string();
        let config = DeployConfig::from_lookup(|name| match name {
            env::RPC_URL_VAR => Some(rpc_url.clone()),
            env::CHAIN_ID_VAR => Some(chain_id.clone()),
            env::ARTIFACTS_VAR => Some(artifacts.clone()),
            _ => None,
        })?;

        let setup = setup_script(&config).await?;
        let nft = deploy_nft(&setup, &config.options).await?;
        print_deployment(&nft);

        Ok(Self { anvil, setup, nft })
    }
}
