//! Lookup of compiled contract artifacts by contract name.
//!
//! Understands the Hardhat layout (`artifacts/<source>/<Contract>.json`, bytecode as a hex
//! string) and the Foundry layout (`out/<File>.sol/<Contract>.json`, bytecode under `object`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{DeployError, Result},
    factory::ContractFactory,
};

const BUILD_INFO_DIR: &str = "build-info";
const DEBUG_SUFFIX: &str = ".dbg.json";
const MAX_SUGGESTION_DISTANCE: usize = 3;
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytecode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Bytecode {
    Hex(String),
    Object { object: String },
}

impl Bytecode {
    pub fn as_hex(&self) -> &str {
        match self {
            Self::Hex(hex) | Self::Object { object: hex } => hex,
        }
    }
}

/// Directory of compiled artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `name`, either a bare contract name or `<source>:<Contract>`.
    ///
    /// A qualified name is looked up under its full source path (Hardhat) and then under the
    /// source file name alone (Foundry writes `src/Foo.sol:Foo` to `out/Foo.sol/Foo.json`).
    pub fn resolve(&self, name: &str) -> Result<Artifact> {
        let path = match name.rsplit_once(':') {
            Some((source, contract)) => self.find_qualified(name, source, contract)?,
            None => self.find_unique(name)?,
        };
        debug!(contract = name, path = %path.display(), "resolved artifact");
        self.read(&path)
    }

    pub fn contract_factory(&self, name: &str) -> Result<ContractFactory> {
        let artifact = self.resolve(name)?;
        let contract = name.rsplit_once(':').map_or(name, |(_, contract)| contract);
        ContractFactory::from_artifact(contract, artifact)
    }

    fn find_qualified(&self, name: &str, source: &str, contract: &str) -> Result<PathBuf> {
        let file_name = format!("{contract}.json");
        let hardhat = self.root.join(source).join(&file_name);
        let foundry = Path::new(source)
            .file_name()
            .map(|file| self.root.join(file).join(&file_name));

        [Some(hardhat), foundry]
            .into_iter()
            .flatten()
            .find(|path| path.is_file())
            .ok_or_else(|| DeployError::ArtifactNotFound {
                name: name.to_string(),
                suggestions: vec![],
            })
    }

    fn find_unique(&self, name: &str) -> Result<PathBuf> {
        let mut files = Vec::new();
        self.collect_json(&self.root, &mut files)?;

        let file_name = format!("{name}.json");
        let mut matches: Vec<PathBuf> = files
            .iter()
            .filter(|path| path.file_name().is_some_and(|f| f.to_string_lossy() == file_name))
            .cloned()
            .collect();

        match matches.len() {
            0 => Err(DeployError::ArtifactNotFound {
                name: name.to_string(),
                suggestions: suggest(name, &files),
            }),
            1 => Ok(matches.remove(0)),
            _ => {
                let mut candidates: Vec<String> = matches
                    .iter()
                    .map(|path| self.fully_qualified_name(path))
                    .collect();
                candidates.sort();
                Err(DeployError::AmbiguousArtifact {
                    name: name.to_string(),
                    candidates,
                })
            }
        }
    }

    fn collect_json(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|source| DeployError::ArtifactIo {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| DeployError::ArtifactIo {
                path: dir.to_path_buf(),
                source,
            })?;
            // Symlinked directories are not followed.
            let file_type = entry.file_type().map_err(|source| DeployError::ArtifactIo {
                path: entry.path(),
                source,
            })?;
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().to_string();
            if file_type.is_dir() {
                if file_name != BUILD_INFO_DIR {
                    self.collect_json(&path, out)?;
                }
            } else if file_name.ends_with(".json") && !file_name.ends_with(DEBUG_SUFFIX) {
                out.push(path);
            }
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<Artifact> {
        let content = fs::read_to_string(path).map_err(|source| DeployError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DeployError::InvalidArtifact {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `contracts/Foo.sol/Foo.json` under the root becomes `contracts/Foo.sol:Foo`.
    fn fully_qualified_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let source = relative
            .parent()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        format!("{source}:{}", contract_stem(path))
    }
}

fn contract_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn suggest(name: &str, files: &[PathBuf]) -> Vec<String> {
    let mut scored: Vec<(usize, String)> = files
        .iter()
        .map(|path| contract_stem(path))
        .map(|stem| (strsim::levenshtein(name, &stem), stem))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .collect();
    scored.sort();
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, stem)| stem)
        .collect()
}
