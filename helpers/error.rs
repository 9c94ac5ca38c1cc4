use std::path::PathBuf;

use alloy::{
    primitives::{Address, TxHash},
    providers::PendingTransactionError,
    transports::TransportError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("invalid value for {var}: {reason}")]
    Config { var: &'static str, reason: String },

    #[error("failed to read artifacts under {path}: {source}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {path} is not valid contract JSON: {source}")]
    InvalidArtifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact for contract \"{name}\" not found{}", suggestion_suffix(.suggestions))]
    ArtifactNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error(
        "there are multiple artifacts for contract \"{name}\", use one of these fully qualified names instead: {}",
        .candidates.join(", ")
    )]
    AmbiguousArtifact {
        name: String,
        candidates: Vec<String>,
    },

    #[error("contract \"{name}\" is abstract or an interface and can't be deployed")]
    AbstractContract { name: String },

    #[error("contract \"{name}\" has unlinked library references in its bytecode")]
    UnlinkedLibraries { name: String },

    #[error("bytecode of contract \"{name}\" is not valid hex: {reason}")]
    InvalidBytecode { name: String, reason: String },

    #[error("constructor of \"{name}\" expects {expected} argument(s), got {actual}")]
    ConstructorArity {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("constructor argument {index} of \"{name}\" is invalid: {reason}")]
    ConstructorArgument {
        name: String,
        index: usize,
        reason: String,
    },

    #[error("configured chain id {expected} does not match the connected chain id {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),

    #[error("deployment transaction {tx} reverted")]
    DeploymentReverted { tx: TxHash },

    #[error("receipt of deployment transaction {tx} has no contract address")]
    MissingContractAddress { tx: TxHash },

    #[error("contract not deployed: no code at {address}")]
    NoCodeAtAddress { address: Address },
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!(". Did you mean \"{only}\"?"),
        many => format!(
            ". Did you mean one of these? {}",
            many.iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
