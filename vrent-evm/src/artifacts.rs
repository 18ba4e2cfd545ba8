// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Compiled contract artifacts, as written by `truffle compile` into `build/contracts`.

use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the compiled artifacts, relative to the project root.
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse artifact {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Artifact for {0} has no deployable bytecode")]
    EmptyBytecode(String),
    #[error("Artifact {path:?} contains {found:?}, expected {expected:?}")]
    NameMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("Artifact for {contract} was not built with the configured compiler settings: {}", .mismatches.join("; "))]
    CompilerMismatch {
        contract: String,
        mismatches: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerInfo {
    pub name: String,
    pub version: String,
}

/// The subset of a Truffle artifact needed to deploy a contract.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub bytecode: Bytes,
    #[serde(default)]
    pub compiler: Option<CompilerInfo>,
    /// solc metadata, itself a JSON document encoded as a string.
    #[serde(default)]
    pub metadata: Option<String>,
}

impl ContractArtifact {
    /// Load `<dir>/<contract_name>.json`.
    pub fn load(dir: &Path, contract_name: &str) -> Result<Self, Error> {
        let path = dir.join(format!("{contract_name}.json"));
        debug!("Loading artifact for {contract_name} from {path:?}");

        let raw = std::fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let artifact: ContractArtifact =
            serde_json::from_str(&raw).map_err(|source| Error::Json {
                path: path.clone(),
                source,
            })?;

        if artifact.contract_name != contract_name {
            return Err(Error::NameMismatch {
                path,
                expected: contract_name.to_string(),
                found: artifact.contract_name,
            });
        }
        if artifact.bytecode.is_empty() {
            return Err(Error::EmptyBytecode(artifact.contract_name));
        }

        Ok(artifact)
    }

    /// Optimizer settings recorded in the solc metadata, if present.
    fn optimizer(&self) -> Option<(bool, u32)> {
        let metadata: serde_json::Value = serde_json::from_str(self.metadata.as_deref()?).ok()?;
        let optimizer = metadata.get("settings")?.get("optimizer")?;
        let enabled = optimizer.get("enabled")?.as_bool()?;
        let runs = u32::try_from(optimizer.get("runs")?.as_u64()?).ok()?;
        Some((enabled, runs))
    }

    /// Compare the artifact with the expected compiler settings.
    ///
    /// Returns one human readable line per mismatch. Settings the artifact does not record are
    /// not reported.
    pub fn compiler_mismatches(&self, settings: &CompilerSettings) -> Vec<String> {
        let mut mismatches = Vec::new();

        if let Some(compiler) = &self.compiler {
            // solc reports e.g. `0.8.6+commit.11564f7e`
            let version = compiler.version.split('+').next().unwrap_or_default();
            if version != settings.version {
                mismatches.push(format!(
                    "solc version {} instead of {}",
                    compiler.version, settings.version
                ));
            }
        }

        if let Some((enabled, runs)) = self.optimizer() {
            if enabled != settings.optimizer_enabled {
                mismatches.push(format!(
                    "optimizer enabled={enabled} instead of {}",
                    settings.optimizer_enabled
                ));
            } else if enabled && runs != settings.optimizer_runs {
                mismatches.push(format!(
                    "optimizer runs={runs} instead of {}",
                    settings.optimizer_runs
                ));
            }
        }

        mismatches
    }

    /// Log every compiler mismatch, and fail on any when `strict`.
    pub fn check_compiler(&self, settings: &CompilerSettings, strict: bool) -> Result<(), Error> {
        let mismatches = self.compiler_mismatches(settings);
        if mismatches.is_empty() {
            return Ok(());
        }

        for mismatch in &mismatches {
            warn!("Artifact {}: {mismatch}", self.contract_name);
        }

        if strict {
            Err(Error::CompilerMismatch {
                contract: self.contract_name.clone(),
                mismatches,
            })
        } else {
            Ok(())
        }
    }
}

/// Compiler settings the contracts are expected to be built with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSettings {
    pub version: String,
    pub optimizer_enabled: bool,
    pub optimizer_runs: u32,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            version: "0.8.6".to_string(),
            optimizer_enabled: true,
            optimizer_runs: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_artifact(dir: &Path, file: &str, body: serde_json::Value) {
        fs::write(dir.join(format!("{file}.json")), body.to_string()).unwrap();
    }

    fn metadata(enabled: bool, runs: u32) -> String {
        serde_json::json!({
            "compiler": { "version": "0.8.6+commit.11564f7e" },
            "settings": { "optimizer": { "enabled": enabled, "runs": runs } }
        })
        .to_string()
    }

    #[test]
    fn loads_a_truffle_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "payment",
            serde_json::json!({
                "contractName": "payment",
                "abi": [],
                "bytecode": "0x6080604052",
                "deployedBytecode": "0x6080",
                "compiler": { "name": "solc", "version": "0.8.6+commit.11564f7e" },
                "metadata": metadata(true, 200),
                "networks": {}
            }),
        );

        let artifact = ContractArtifact::load(dir.path(), "payment").unwrap();
        assert_eq!(artifact.contract_name, "payment");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
        assert!(artifact
            .compiler_mismatches(&CompilerSettings::default())
            .is_empty());
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ContractArtifact::load(dir.path(), "vRent"),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn empty_bytecode_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "vRent",
            serde_json::json!({ "contractName": "vRent", "bytecode": "0x" }),
        );

        assert!(matches!(
            ContractArtifact::load(dir.path(), "vRent"),
            Err(Error::EmptyBytecode(name)) if name == "vRent"
        ));
    }

    #[test]
    fn unlinked_bytecode_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "vRent",
            serde_json::json!({
                "contractName": "vRent",
                "bytecode": "0x73__$9f1c2b7e9d$__6080"
            }),
        );

        assert!(matches!(
            ContractArtifact::load(dir.path(), "vRent"),
            Err(Error::Json { .. })
        ));
    }

    #[test]
    fn artifact_for_another_contract_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "payment",
            serde_json::json!({ "contractName": "vRent", "bytecode": "0x60" }),
        );

        assert!(matches!(
            ContractArtifact::load(dir.path(), "payment"),
            Err(Error::NameMismatch { .. })
        ));
    }

    #[test]
    fn compiler_mismatches_are_reported() {
        let artifact = ContractArtifact {
            contract_name: "payment".to_string(),
            bytecode: Bytes::from_static(&[0x60]),
            compiler: Some(CompilerInfo {
                name: "solc".to_string(),
                version: "0.8.17+commit.8df45f5f".to_string(),
            }),
            metadata: Some(metadata(true, 1000)),
        };

        let mismatches = artifact.compiler_mismatches(&CompilerSettings::default());
        assert_eq!(mismatches.len(), 2);
        assert!(mismatches[0].contains("0.8.17"));
        assert!(mismatches[1].contains("runs=1000"));

        assert!(artifact
            .check_compiler(&CompilerSettings::default(), false)
            .is_ok());
        assert!(matches!(
            artifact.check_compiler(&CompilerSettings::default(), true),
            Err(Error::CompilerMismatch { .. })
        ));
    }

    #[test]
    fn artifacts_without_compiler_information_pass() {
        let artifact = ContractArtifact {
            contract_name: "payment".to_string(),
            bytecode: Bytes::from_static(&[0x60]),
            compiler: None,
            metadata: None,
        };
        assert!(artifact
            .check_compiler(&CompilerSettings::default(), true)
            .is_ok());
    }
}
