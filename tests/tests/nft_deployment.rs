use alloy::{
    consensus::Transaction as _,
    dyn_abi::{DynSolType, DynSolValue},
    primitives::Address,
    providers::{Provider, ProviderBuilder},
};
use helpers::{
    deploy_nft, print_deployment, ArtifactStore, DeployError, DeployOptions, ScriptSetup,
    NFT_CONTRACT, NFT_NAME, NFT_SYMBOL,
};
use tests::{fixture_artifacts, NftDeployment};

/// Setup against a node that is never contacted.
fn offline_setup(artifacts: ArtifactStore) -> anyhow::Result<ScriptSetup> {
    let provider = ProviderBuilder::new()
        .connect_http("http://127.0.0.1:9".parse()?)
        .erased();
    Ok(ScriptSetup {
        provider,
        deployer: Address::ZERO,
        chain_id: 31337,
        artifacts,
    })
}

#[tokio::test]
#[ignore = "requires anvil on PATH"]
async fn should_print_contract_address() -> anyhow::Result<()> {
    let deployment = NftDeployment::before().await?;
    let nft = &deployment.nft;
    print_deployment(nft);

    let rendered = nft.address.to_string();
    assert_ne!(nft.address, Address::ZERO);
    assert_eq!(rendered.len(), 42);
    assert_eq!(Address::parse_checksummed(&rendered, None)?, nft.address);
    assert_eq!(nft.deployer, deployment.setup.deployer);

    let provider = &deployment.setup.provider;
    let code = provider.get_code_at(nft.address).await?;
    assert!(!code.is_empty(), "no code at {}", nft.address);

    // Constructor arguments trail the creation code in the transaction input.
    let tx = provider
        .get_transaction_by_hash(nft.transaction_hash)
        .await?
        .ok_or_else(|| anyhow::anyhow!("deployment transaction not found"))?;
    let factory = deployment.setup.contract_factory(NFT_CONTRACT)?;
    let input = tx.input();
    assert_eq!(&input[..factory.bytecode().len()], &factory.bytecode()[..]);
    let args = DynSolType::Tuple(vec![DynSolType::String, DynSolType::String])
        .abi_decode_params(&input[factory.bytecode().len()..])?;
    assert_eq!(
        args,
        DynSolValue::Tuple(vec![
            DynSolValue::String(NFT_NAME.to_string()),
            DynSolValue::String(NFT_SYMBOL.to_string()),
        ])
    );
    Ok(())
}

#[tokio::test]
async fn deployment_fails_when_factory_is_missing() -> anyhow::Result<()> {
    let empty = tempfile::TempDir::new()?;
    let setup = offline_setup(ArtifactStore::new(empty.path()))?;

    match deploy_nft(&setup, &DeployOptions::default()).await {
        Err(DeployError::ArtifactNotFound { name, .. }) => assert_eq!(name, NFT_CONTRACT),
        other => panic!("expected ArtifactNotFound, got {other:?}"),
    }
    Ok(())
}

#[test]
fn fixture_factory_encodes_tiger_args_in_order() -> anyhow::Result<()> {
    let factory = ArtifactStore::new(fixture_artifacts()).contract_factory(NFT_CONTRACT)?;
    let args = factory.coerce_args(&[NFT_NAME, NFT_SYMBOL])?;
    assert_eq!(
        args,
        vec![
            DynSolValue::String("Tiger".to_string()),
            DynSolValue::String("TIGER".to_string()),
        ]
    );

    let data = factory.deploy_data(&args)?;
    assert!(data.len() > factory.bytecode().len());
    Ok(())
}
