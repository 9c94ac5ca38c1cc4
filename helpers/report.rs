use alloy::primitives::Address;
use tracing_subscriber::EnvFilter;

use crate::deploy::DeployedContract;

pub const DEPLOYMENT_LABEL: &str = "NFT deployed at address:";

/// The line printed for a deployed contract. The label and the address are separated by
/// two spaces.
pub fn deployment_line(address: &Address) -> String {
    format!("{DEPLOYMENT_LABEL}  {address}")
}

pub fn print_deployment(contract: &DeployedContract) {
    println!("{}", deployment_line(&contract.address));
}

/// Logs go to stderr so stdout only carries deployment lines. Filter via `RUST_LOG`,
/// `info` otherwise. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn line_has_label_two_spaces_and_checksummed_address() {
        let addr = address!("5fbdb2315678afecb367f032d93f642f64180aa3");
        assert_eq!(
            deployment_line(&addr),
            "NFT deployed at address:  0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }
}
