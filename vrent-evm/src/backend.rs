// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::artifacts::ContractArtifact;
use crate::common::{Address, Calldata, TxHash};
use crate::retry::retry;
use crate::transaction_config::TransactionConfig;
use crate::TX_TIMEOUT;
use alloy::dyn_abi::DynSolValue;
use alloy::network::TransactionBuilder;
use alloy::primitives::Bytes;
use alloy::providers::{PendingTransactionError, Provider};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::{RpcError, TransportErrorKind};
use async_trait::async_trait;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),
    #[error("{tx_identifier} transaction {tx_hash} reverted")]
    Reverted {
        tx_identifier: String,
        tx_hash: TxHash,
    },
    #[error("Receipt of {contract} deployment {tx_hash} has no contract address")]
    MissingContractAddress { contract: String, tx_hash: TxHash },
}

/// A contract creation: the artifact's bytecode followed by the ABI encoded constructor arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct DeployRequest {
    pub contract_name: String,
    pub bytecode: Bytes,
    pub constructor_args: Vec<DynSolValue>,
}

impl DeployRequest {
    pub fn new(artifact: &ContractArtifact, constructor_args: Vec<DynSolValue>) -> Self {
        Self {
            contract_name: artifact.contract_name.clone(),
            bytecode: artifact.bytecode.clone(),
            constructor_args,
        }
    }

    pub fn deploy_code(&self) -> Bytes {
        let mut code = self.bytecode.to_vec();
        code.extend(DynSolValue::Tuple(self.constructor_args.clone()).abi_encode_params());
        code.into()
    }
}

/// A state changing call on a deployed contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    pub method: &'static str,
    pub calldata: Calldata,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Submits and confirms transactions on one chain.
///
/// Both `deploy` and `call` only return once the transaction is mined.
#[async_trait]
pub trait DeploymentBackend: Send + Sync {
    async fn chain_id(&self) -> Result<u64, Error>;

    async fn deploy(&self, request: DeployRequest) -> Result<DeployedContract, Error>;

    async fn call(&self, request: CallRequest) -> Result<TxHash, Error>;
}

/// [`DeploymentBackend`] on top of an alloy provider with a wallet.
pub struct EvmBackend<P> {
    provider: P,
    transaction_config: TransactionConfig,
    tx_timeout: Duration,
}

impl<P: Provider> EvmBackend<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            transaction_config: TransactionConfig::default(),
            tx_timeout: TX_TIMEOUT,
        }
    }

    pub fn with_transaction_config(mut self, transaction_config: TransactionConfig) -> Self {
        self.transaction_config = transaction_config;
        self
    }

    /// How long to wait for each transaction to be mined.
    pub fn with_tx_timeout(mut self, tx_timeout: Duration) -> Self {
        self.tx_timeout = tx_timeout;
        self
    }

    async fn apply_fees(&self, tx: TransactionRequest) -> Result<TransactionRequest, Error> {
        let max_fee_per_gas = self.transaction_config.max_fee_per_gas;
        if !max_fee_per_gas.needs_estimate() {
            return Ok(tx);
        }

        let estimate = retry(
            || async { self.provider.estimate_eip1559_fees().await },
            "estimate_eip1559_fees",
            None,
        )
        .await?;

        match max_fee_per_gas.apply(estimate) {
            Some(fees) => {
                debug!(
                    "Using max fee per gas {} and max priority fee per gas {}",
                    fees.max_fee_per_gas, fees.max_priority_fee_per_gas
                );
                Ok(tx
                    .with_max_fee_per_gas(fees.max_fee_per_gas)
                    .with_max_priority_fee_per_gas(fees.max_priority_fee_per_gas))
            }
            None => Ok(tx),
        }
    }

    async fn send_and_confirm(
        &self,
        tx: TransactionRequest,
        tx_identifier: &str,
    ) -> Result<TransactionReceipt, Error> {
        let tx = self.apply_fees(tx).await?;

        let pending_tx_builder = self
            .provider
            .send_transaction(tx)
            .await
            .inspect_err(|err| error!("Error sending {tx_identifier} transaction: {err:?}"))?
            .with_timeout(Some(self.tx_timeout));

        let tx_hash = *pending_tx_builder.tx_hash();
        debug!("{tx_identifier} transaction is pending with tx_hash: {tx_hash:?}");

        let receipt = pending_tx_builder.get_receipt().await.inspect_err(|err| {
            error!("Error waiting for {tx_identifier} transaction {tx_hash:?}: {err:?}")
        })?;

        if !receipt.status() {
            error!("{tx_identifier} transaction {tx_hash:?} reverted");
            return Err(Error::Reverted {
                tx_identifier: tx_identifier.to_string(),
                tx_hash,
            });
        }

        debug!(
            "{tx_identifier} transaction {tx_hash:?} mined in block {:?}, gas used {}",
            receipt.block_number, receipt.gas_used
        );
        Ok(receipt)
    }
}

#[async_trait]
impl<P: Provider> DeploymentBackend for EvmBackend<P> {
    async fn chain_id(&self) -> Result<u64, Error> {
        let chain_id = retry(
            || async { self.provider.get_chain_id().await },
            "get_chain_id",
            None,
        )
        .await?;
        Ok(chain_id)
    }

    async fn deploy(&self, request: DeployRequest) -> Result<DeployedContract, Error> {
        let tx_identifier = format!("deploy {}", request.contract_name);
        let tx = TransactionRequest::default().with_deploy_code(request.deploy_code());

        let receipt = self.send_and_confirm(tx, &tx_identifier).await?;
        let address = receipt
            .contract_address
            .ok_or_else(|| Error::MissingContractAddress {
                contract: request.contract_name.clone(),
                tx_hash: receipt.transaction_hash,
            })?;

        Ok(DeployedContract {
            address,
            tx_hash: receipt.transaction_hash,
        })
    }

    async fn call(&self, request: CallRequest) -> Result<TxHash, Error> {
        let tx = TransactionRequest::default()
            .with_to(request.to)
            .with_input(request.calldata);

        let receipt = self.send_and_confirm(tx, request.method).await?;
        Ok(receipt.transaction_hash)
    }
}
