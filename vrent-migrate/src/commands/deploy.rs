// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::args::max_fee_per_gas::{get_max_fee_per_gas_from_opt_param, MaxFeePerGasParam};
use crate::exit_code::{
    artifact_error_exit_code, credential_error_exit_code, sequencer_error_exit_code, ExitCodeError,
    IO_ERROR, SERIALIZATION_ERROR, UNKNOWN_NETWORK,
};
use clap::Args;
use color_eyre::eyre::{eyre, Result};
use color_eyre::Section;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vrent_evm::artifacts::{CompilerSettings, ContractArtifact, DEFAULT_ARTIFACTS_DIR};
use vrent_evm::backend::EvmBackend;
use vrent_evm::common::{Address, RpcUrl};
use vrent_evm::contract::payment::PAYMENT_CONTRACT_NAME;
use vrent_evm::contract::rent::RENT_CONTRACT_NAME;
use vrent_evm::sequencer::{self, DeploymentPlan, DeploymentReport, MissingTokenPolicy};
use vrent_evm::transaction_config::TransactionConfig;
use vrent_evm::utils::{parse_address, parse_rpc_url, wallet_provider};
use vrent_evm::{CustomNetwork, Network, NetworkProfile, PaymentTokens};

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// The network to deploy to: mainnet, rinkeby, bsc, bscTestnet, matic or mumbai.
    ///
    /// Any other name deploys to a custom network and needs both `--rpc-url` and `--chain-id`.
    #[clap(long, verbatim_doc_comment)]
    pub network: String,

    /// Owner of both contracts.
    #[clap(long, env = "VRENT_OWNER", value_parser = parse_address)]
    pub owner: Address,

    /// Receives the fees collected by the Rent contract.
    #[clap(long, env = "VRENT_BENEFICIARY", value_parser = parse_address)]
    pub beneficiary: Address,

    /// Directory holding the compiled `payment.json` and `vRent.json` artifacts.
    #[clap(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Deploy even when the network has no address for a payment token.
    ///
    /// The slot is left unconfigured instead of aborting the run.
    #[clap(long)]
    pub allow_missing_tokens: bool,

    /// Max fee per gas for each transaction.
    ///
    /// Valid values are "auto" (default), "unlimited", "limited-auto:<WEI AMOUNT>", or a custom
    /// value in WEI.
    #[clap(long, verbatim_doc_comment)]
    pub max_fee_per_gas: Option<MaxFeePerGasParam>,

    /// Seconds to wait for each transaction to be mined.
    #[clap(long, value_parser = parse_secs, default_value = "60")]
    pub tx_timeout: Duration,

    /// Write the deployed addresses and transaction hashes to this file as JSON.
    #[clap(long)]
    pub records_file: Option<PathBuf>,

    /// RPC endpoint. Overrides the endpoint of a known network.
    #[clap(long, value_parser = parse_rpc_url)]
    pub rpc_url: Option<RpcUrl>,

    /// Chain id of a custom network.
    #[clap(long, requires = "rpc_url")]
    pub chain_id: Option<u64>,

    /// WETH token of a custom network.
    #[clap(long, value_parser = parse_address, requires = "chain_id")]
    pub weth: Option<Address>,

    /// USDC token of a custom network.
    #[clap(long, value_parser = parse_address, requires = "chain_id")]
    pub usdc: Option<Address>,

    /// solc version the artifacts are expected to be built with.
    #[clap(long, default_value = "0.8.6")]
    pub solc_version: String,

    /// Optimizer runs the artifacts are expected to be built with.
    #[clap(long, default_value_t = 200)]
    pub optimizer_runs: u32,

    /// Expect the artifacts to be built without the optimizer.
    #[clap(long)]
    pub no_optimizer: bool,

    /// Abort when an artifact was built with other compiler settings, instead of warning.
    #[clap(long)]
    pub strict_compiler: bool,
}

fn parse_secs(value: &str) -> Result<Duration, ParseIntError> {
    value.parse().map(Duration::from_secs)
}

impl DeployArgs {
    fn compiler_settings(&self) -> CompilerSettings {
        CompilerSettings {
            version: self.solc_version.clone(),
            optimizer_enabled: !self.no_optimizer,
            optimizer_runs: self.optimizer_runs,
        }
    }

    fn missing_token_policy(&self) -> MissingTokenPolicy {
        if self.allow_missing_tokens {
            MissingTokenPolicy::Skip
        } else {
            MissingTokenPolicy::Reject
        }
    }

    /// The network to deploy to, and the RPC endpoint overriding its default one.
    fn resolve_network(&self) -> Result<(Network, Option<RpcUrl>), vrent_evm::Error> {
        match self.network.parse::<Network>() {
            Ok(network) => {
                if self.chain_id.is_some() || self.weth.is_some() || self.usdc.is_some() {
                    warn!(
                        "Ignoring --chain-id, --weth and --usdc for the known network {network}"
                    );
                }
                Ok((network, self.rpc_url.clone()))
            }
            Err(err) => match (&self.rpc_url, self.chain_id) {
                (Some(rpc_url), Some(chain_id)) => {
                    let payment_tokens = PaymentTokens {
                        weth: self.weth,
                        usdc: self.usdc,
                    };
                    info!(
                        "Using custom network {} with chain id {chain_id}",
                        self.network
                    );
                    let custom = CustomNetwork::new(
                        &self.network,
                        rpc_url.clone(),
                        chain_id,
                        payment_tokens,
                    );
                    Ok((Network::Custom(custom), None))
                }
                _ => {
                    error!(
                        "Unknown network {:?} and no custom network given",
                        self.network
                    );
                    Err(err)
                }
            },
        }
    }
}

fn load_artifact(
    dir: &Path,
    contract_name: &str,
    settings: &CompilerSettings,
    strict: bool,
) -> Result<ContractArtifact, ExitCodeError> {
    let artifact = ContractArtifact::load(dir, contract_name)
        .and_then(|artifact| {
            artifact.check_compiler(settings, strict)?;
            Ok(artifact)
        })
        .map_err(|err| {
            let exit_code = artifact_error_exit_code(&err);
            (
                eyre!(err)
                    .wrap_err(format!("Failed to load the {contract_name} artifact"))
                    .suggestion("Build the contracts, or point --artifacts-dir at their output"),
                exit_code,
            )
        })?;
    Ok(artifact)
}

fn write_records(path: &Path, report: &DeploymentReport) -> Result<(), ExitCodeError> {
    let json = serde_json::to_string_pretty(report).map_err(|err| {
        (
            eyre!(err).wrap_err("Failed to serialize the deployment records"),
            SERIALIZATION_ERROR,
        )
    })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            (
                eyre!(err).wrap_err(format!("Failed to create {}", parent.display())),
                IO_ERROR,
            )
        })?;
    }

    std::fs::write(path, json).map_err(|err| {
        (
            eyre!(err).wrap_err(format!(
                "Failed to write the deployment records to {}",
                path.display()
            )),
            IO_ERROR,
        )
    })?;
    info!("Deployment records written to {path:?}");
    Ok(())
}

pub async fn deploy(args: DeployArgs) -> Result<(), ExitCodeError> {
    let (network, rpc_url_override) = args.resolve_network().map_err(|err| {
        (
            eyre!(err).with_suggestion(|| {
                "Use one of the networks listed by `vrent-migrate networks`, or give --rpc-url and --chain-id"
            }),
            UNKNOWN_NETWORK,
        )
    })?;

    let settings = args.compiler_settings();
    let payment_artifact = load_artifact(
        &args.artifacts_dir,
        PAYMENT_CONTRACT_NAME,
        &settings,
        args.strict_compiler,
    )?;
    let rent_artifact = load_artifact(
        &args.artifacts_dir,
        RENT_CONTRACT_NAME,
        &settings,
        args.strict_compiler,
    )?;

    let profile = NetworkProfile::from_env(network, rpc_url_override).map_err(|err| {
        let exit_code = credential_error_exit_code(&err);
        (
            eyre!(err).wrap_err("Failed to load the deployment credentials"),
            exit_code,
        )
    })?;

    let plan = DeploymentPlan::new(
        &profile,
        args.owner,
        args.beneficiary,
        payment_artifact,
        rent_artifact,
    )
    .with_missing_token_policy(args.missing_token_policy());

    let max_fee_per_gas = get_max_fee_per_gas_from_opt_param(args.max_fee_per_gas);
    let provider = wallet_provider(
        profile.rpc_url.clone(),
        profile.credential.clone().into_signer(),
    );
    let backend = EvmBackend::new(provider)
        .with_transaction_config(TransactionConfig { max_fee_per_gas })
        .with_tx_timeout(args.tx_timeout);

    let report = sequencer::execute(&plan, &backend).await.map_err(|err| {
        let exit_code = sequencer_error_exit_code(&err);
        (
            eyre!(err).wrap_err(format!("Failed to deploy to {}", plan.network_name)),
            exit_code,
        )
    })?;

    for line in report.output_lines() {
        println!("{line}");
    }

    if let Some(path) = &args.records_file {
        write_records(path, &report)?;
    }

    Ok(())
}
