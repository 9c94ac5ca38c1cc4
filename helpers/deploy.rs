use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, TxHash},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use tracing::info;

use crate::{
    config::DeployOptions,
    error::{DeployError, Result},
};

/// Handle to a contract whose creation transaction has been confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    pub transaction_hash: TxHash,
    pub deployer: Address,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Sends a contract-creation transaction with `data` as init code and waits until the
/// contract is live at its new address.
pub async fn deploy_contract<P: Provider>(
    provider: &P,
    name: &str,
    data: Bytes,
    options: &DeployOptions,
) -> Result<DeployedContract> {
    let tx = TransactionRequest::default().with_deploy_code(data);
    let pending = provider.send_transaction(tx).await?;
    let tx_hash = *pending.tx_hash();
    info!(contract = name, tx = %tx_hash, "deployment transaction sent");

    let receipt = pending
        .with_required_confirmations(options.confirmations)
        .with_timeout(options.timeout)
        .get_receipt()
        .await?;

    if !receipt.status() {
        return Err(DeployError::DeploymentReverted { tx: tx_hash });
    }
    let address = receipt
        .contract_address()
        .ok_or(DeployError::MissingContractAddress { tx: tx_hash })?;

    let code = provider.get_code_at(address).await?;
    if code.is_empty() {
        return Err(DeployError::NoCodeAtAddress { address });
    }

    info!(
        contract = name,
        %address,
        block = ?receipt.block_number(),
        gas_used = receipt.gas_used(),
        "contract deployed"
    );

    Ok(DeployedContract {
        name: name.to_string(),
        address,
        transaction_hash: tx_hash,
        deployer: receipt.from(),
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
    })
}
