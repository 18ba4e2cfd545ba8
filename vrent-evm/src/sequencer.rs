// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Deploys Payment, configures its token slots, then deploys Rent against it.

use crate::artifacts::ContractArtifact;
use crate::backend::{self, CallRequest, DeployRequest, DeploymentBackend};
use crate::common::{Address, TxHash};
use crate::contract::payment::{PaymentContract, PaymentSlot};
use crate::contract::rent;
use crate::{NetworkProfile, PaymentTokens};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] backend::Error),
    #[error("Connected to chain id {actual}, but network {network} expects {expected}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
    #[error("Network {network} has no {slot} token address")]
    MissingPaymentToken { network: String, slot: PaymentSlot },
}

/// What to do with a payment slot whose token address is unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingTokenPolicy {
    /// Abort the run before the slot would be configured.
    #[default]
    Reject,
    /// Leave the slot unconfigured and carry on.
    Skip,
}

/// Everything one deployment run needs, fixed before the first transaction.
#[derive(Clone, Debug)]
pub struct DeploymentPlan {
    pub network_name: String,
    /// Checked against the backend before anything is sent.
    pub expected_chain_id: Option<u64>,
    pub owner: Address,
    pub beneficiary: Address,
    pub payment_tokens: PaymentTokens,
    pub missing_token_policy: MissingTokenPolicy,
    pub payment_artifact: ContractArtifact,
    pub rent_artifact: ContractArtifact,
}

impl DeploymentPlan {
    pub fn new(
        profile: &NetworkProfile,
        owner: Address,
        beneficiary: Address,
        payment_artifact: ContractArtifact,
        rent_artifact: ContractArtifact,
    ) -> Self {
        Self {
            network_name: profile.name().to_string(),
            expected_chain_id: Some(profile.chain_id),
            owner,
            beneficiary,
            payment_tokens: profile.payment_tokens,
            missing_token_policy: MissingTokenPolicy::default(),
            payment_artifact,
            rent_artifact,
        }
    }

    pub fn with_missing_token_policy(mut self, policy: MissingTokenPolicy) -> Self {
        self.missing_token_policy = policy;
        self
    }

    /// Fail fast, before any transaction, when a slot has no token and the policy rejects it.
    fn check_payment_tokens(&self) -> Result<(), Error> {
        if self.missing_token_policy == MissingTokenPolicy::Skip {
            return Ok(());
        }
        match PaymentSlot::ALL
            .into_iter()
            .find(|slot| slot.token(&self.payment_tokens).is_none())
        {
            Some(slot) => {
                error!(
                    "Network {} has no {slot} token address, refusing to deploy",
                    self.network_name
                );
                Err(Error::MissingPaymentToken {
                    network: self.network_name.clone(),
                    slot,
                })
            }
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: TxHash,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSlotRecord {
    pub slot: PaymentSlot,
    pub token: Address,
    pub tx_hash: TxHash,
}

/// The outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReport {
    pub network: String,
    pub chain_id: u64,
    pub payment: DeploymentRecord,
    pub rent: DeploymentRecord,
    pub token_slots: Vec<TokenSlotRecord>,
}

impl DeploymentReport {
    fn env_line(&self, contract: &str, address: &Address) -> String {
        format!(
            "REACT_APP_{}_{contract}_CONTRACT_ADDRESS={address}",
            self.network.to_uppercase()
        )
    }

    pub fn payment_env_line(&self) -> String {
        self.env_line("PAYMENT", &self.payment.address)
    }

    pub fn rent_env_line(&self) -> String {
        self.env_line("RENT", &self.rent.address)
    }

    /// The frontend config snippet, with every space removed.
    pub fn config_block(&self) -> String {
        let config = format!(
            "{}:\n{{\n contract_address: '{}',\npayment_address:'{}'\n}}",
            self.network, self.rent.address, self.payment.address
        );
        config.replace(' ', "")
    }

    /// The lines printed after a run: Payment env line, Rent env line, config block.
    pub fn output_lines(&self) -> Vec<String> {
        vec![
            self.payment_env_line(),
            self.rent_env_line(),
            self.config_block(),
        ]
    }
}

/// Run the plan against a backend.
///
/// Every transaction is awaited before the next one is sent, so the token slots are set before
/// Rent is deployed. Any error aborts the run; nothing is retried.
pub async fn execute<B>(plan: &DeploymentPlan, backend: &B) -> Result<DeploymentReport, Error>
where
    B: DeploymentBackend + ?Sized,
{
    plan.check_payment_tokens()?;

    let chain_id = backend.chain_id().await?;
    if let Some(expected) = plan.expected_chain_id {
        if expected != chain_id {
            error!(
                "Chain id mismatch for {}: expected {expected}, node reports {chain_id}",
                plan.network_name
            );
            return Err(Error::ChainIdMismatch {
                network: plan.network_name.clone(),
                expected,
                actual: chain_id,
            });
        }
    }

    info!(
        "Deploying {} on {} with owner {}",
        plan.payment_artifact.contract_name, plan.network_name, plan.owner
    );
    let deployed = backend
        .deploy(DeployRequest::new(
            &plan.payment_artifact,
            PaymentContract::constructor_args(plan.owner),
        ))
        .await?;
    let payment = PaymentContract::new(deployed.address);
    let payment_record = DeploymentRecord {
        contract_name: plan.payment_artifact.contract_name.clone(),
        address: deployed.address,
        tx_hash: deployed.tx_hash,
    };
    info!(
        "{} deployed at {}",
        payment_record.contract_name, payment_record.address
    );

    let mut token_slots = Vec::with_capacity(PaymentSlot::ALL.len());
    for slot in PaymentSlot::ALL {
        let Some(token) = slot.token(&plan.payment_tokens) else {
            warn!(
                "Network {} has no {slot} token address, leaving the slot unconfigured",
                plan.network_name
            );
            continue;
        };

        let (calldata, to) = payment.set_payment_token_calldata(slot, token);
        let tx_hash = backend
            .call(CallRequest {
                to,
                method: "setPaymentToken",
                calldata,
            })
            .await?;
        info!("Payment {slot} set to {token}");
        token_slots.push(TokenSlotRecord {
            slot,
            token,
            tx_hash,
        });
    }

    info!(
        "Deploying {} with payment {} and beneficiary {}",
        plan.rent_artifact.contract_name,
        payment.address(),
        plan.beneficiary
    );
    let deployed = backend
        .deploy(DeployRequest::new(
            &plan.rent_artifact,
            rent::constructor_args(payment.address(), plan.beneficiary, plan.owner),
        ))
        .await?;
    let rent_record = DeploymentRecord {
        contract_name: plan.rent_artifact.contract_name.clone(),
        address: deployed.address,
        tx_hash: deployed.tx_hash,
    };
    info!(
        "{} deployed at {}",
        rent_record.contract_name, rent_record.address
    );

    Ok(DeploymentReport {
        network: plan.network_name.clone(),
        chain_id,
        payment: payment_record,
        rent: rent_record,
        token_slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn report(network: &str) -> DeploymentReport {
        DeploymentReport {
            network: network.to_string(),
            chain_id: 1,
            payment: DeploymentRecord {
                contract_name: "payment".to_string(),
                address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
                tx_hash: TxHash::ZERO,
            },
            rent: DeploymentRecord {
                contract_name: "vRent".to_string(),
                address: address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
                tx_hash: TxHash::ZERO,
            },
            token_slots: vec![],
        }
    }

    #[test]
    fn env_lines_use_the_upper_cased_network_name() {
        let report = report("bscTestnet");
        assert_eq!(
            report.payment_env_line(),
            "REACT_APP_BSCTESTNET_PAYMENT_CONTRACT_ADDRESS=0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert_eq!(
            report.rent_env_line(),
            "REACT_APP_BSCTESTNET_RENT_CONTRACT_ADDRESS=0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
        );
    }

    #[test]
    fn config_block_matches_the_frontend_format() {
        assert_eq!(
            report("mainnet").config_block(),
            "mainnet:\n{\ncontract_address:'0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512',\n\
             payment_address:'0x5FbDB2315678afecb367f032d93F642f64180aa3'\n}"
        );
    }

    #[test]
    fn config_block_has_no_spaces_for_any_network_name() {
        for name in ["mainnet", "bscTestnet", "my local chain", " padded "] {
            assert!(!report(name).config_block().contains(' '), "{name:?}");
        }
    }

    #[test]
    fn payment_line_comes_before_rent_line() {
        let lines = report("matic").output_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("REACT_APP_MATIC_PAYMENT_CONTRACT_ADDRESS="));
        assert!(lines[1].starts_with("REACT_APP_MATIC_RENT_CONTRACT_ADDRESS="));
        assert!(lines[2].starts_with("matic:"));
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_value(report("mumbai")).unwrap();
        assert_eq!(json["network"], "mumbai");
        assert!(json["payment"]["address"]
            .as_str()
            .unwrap()
            .eq_ignore_ascii_case("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert_eq!(json["rent"]["contract_name"], "vRent");
    }
}
