//! Deploys TheDynamicNFT and prints its address

use helpers::{deploy_nft, init_tracing, print_deployment, setup_script, DeployConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = DeployConfig::from_env()?;
    info!(artifacts = %config.artifacts_dir.display(), "loaded config");

    let setup = setup_script(&config).await?;
    let nft = deploy_nft(&setup, &config.options).await?;

    print_deployment(&nft);
    Ok(())
}
