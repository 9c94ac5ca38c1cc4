use alloy::{
    dyn_abi::{DynSolType, DynSolValue, Specifier},
    json_abi::JsonAbi,
    primitives::{hex, Bytes},
    providers::Provider,
};

use crate::{
    artifacts::Artifact,
    config::DeployOptions,
    deploy::{deploy_contract, DeployedContract},
    error::{DeployError, Result},
};

/// Library link placeholder prefix left in bytecode by the Solidity compiler.
const LINK_PLACEHOLDER: &str = "__";

/// ABI and creation code of one deployable contract.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    abi: JsonAbi,
    bytecode: Bytes,
}

impl ContractFactory {
    pub fn from_artifact(name: &str, artifact: Artifact) -> Result<Self> {
        let name = artifact.contract_name.clone().unwrap_or_else(|| name.to_string());
        let raw = artifact.bytecode.as_hex().trim();
        let digits = raw.strip_prefix("0x").unwrap_or(raw);

        if digits.is_empty() {
            return Err(DeployError::AbstractContract { name });
        }
        if digits.contains(LINK_PLACEHOLDER) {
            return Err(DeployError::UnlinkedLibraries { name });
        }
        let bytecode = hex::decode(digits).map_err(|e| DeployError::InvalidBytecode {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            name,
            abi: artifact.abi,
            bytecode: bytecode.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Solidity types of the constructor inputs, empty when the contract declares none.
    pub fn constructor_types(&self) -> Result<Vec<DynSolType>> {
        let Some(constructor) = &self.abi.constructor else {
            return Ok(vec![]);
        };
        constructor
            .inputs
            .iter()
            .enumerate()
            .map(|(index, param)| {
                param.resolve().map_err(|e| DeployError::ConstructorArgument {
                    name: self.name.clone(),
                    index,
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// Parses textual constructor arguments into values of the declared types.
    pub fn coerce_args(&self, args: &[&str]) -> Result<Vec<DynSolValue>> {
        let types = self.constructor_types()?;
        self.check_arity(types.len(), args.len())?;
        types
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (ty, arg))| {
                ty.coerce_str(arg).map_err(|e| DeployError::ConstructorArgument {
                    name: self.name.clone(),
                    index,
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// Creation code followed by the ABI-encoded constructor arguments.
    pub fn deploy_data(&self, args: &[DynSolValue]) -> Result<Bytes> {
        let types = self.constructor_types()?;
        self.check_arity(types.len(), args.len())?;
        for (index, (ty, value)) in types.iter().zip(args).enumerate() {
            if !ty.matches(value) {
                return Err(DeployError::ConstructorArgument {
                    name: self.name.clone(),
                    index,
                    reason: format!("expected {ty}, got {value:?}"),
                });
            }
        }

        let mut data = self.bytecode.to_vec();
        if !args.is_empty() {
            data.extend(DynSolValue::Tuple(args.to_vec()).abi_encode_params());
        }
        Ok(data.into())
    }

    pub async fn deploy<P: Provider>(
        &self,
        provider: &P,
        args: &[DynSolValue],
        options: &DeployOptions,
    ) -> Result<DeployedContract> {
        let data = self.deploy_data(args)?;
        deploy_contract(provider, &self.name, data, options).await
    }

    /// Shorthand for [`Self::coerce_args`] followed by [`Self::deploy`].
    pub async fn deploy_with_strs<P: Provider>(
        &self,
        provider: &P,
        args: &[&str],
        options: &DeployOptions,
    ) -> Result<DeployedContract> {
        let values = self.coerce_args(args)?;
        self.deploy(provider, &values, options).await
    }

    fn check_arity(&self, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(DeployError::ConstructorArity {
                name: self.name.clone(),
                expected,
                actual,
            })
        }
    }
}
