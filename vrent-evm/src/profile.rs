// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use crate::utils::{self, parse_rpc_url, required_env_var, signer_from_str, API_KEY, PRIVATE_KEY};
use crate::{Network, PaymentTokens};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest;

/// The private key a deployment is signed with. Never printed.
#[derive(Clone)]
pub struct SigningCredential(PrivateKeySigner);

impl SigningCredential {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self(signer)
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    pub fn into_signer(self) -> PrivateKeySigner {
        self.0
    }
}

impl std::fmt::Debug for SigningCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningCredential")
            .field("address", &format_args!("{}", self.address()))
            .finish_non_exhaustive()
    }
}

/// Everything needed to talk to one network, resolved once at start up.
#[derive(Clone, Debug)]
pub struct NetworkProfile {
    pub network: Network,
    pub payment_tokens: PaymentTokens,
    pub rpc_url: reqwest::Url,
    pub chain_id: u64,
    pub credential: SigningCredential,
}

impl NetworkProfile {
    pub fn new(network: Network, rpc_url: reqwest::Url, credential: SigningCredential) -> Self {
        Self {
            payment_tokens: network.payment_tokens(),
            chain_id: network.chain_id(),
            network,
            rpc_url,
            credential,
        }
    }

    /// Build the profile from the environment.
    ///
    /// `PRIVATE_KEY` is always required. `API_KEY` is required as the RPC endpoint for networks
    /// that have no public one, unless `rpc_url_override` is given.
    pub fn from_env(
        network: Network,
        rpc_url_override: Option<reqwest::Url>,
    ) -> Result<Self, utils::Error> {
        let credential = SigningCredential::new(signer_from_str(&required_env_var(PRIVATE_KEY)?)?);

        let rpc_url = match (rpc_url_override, network.public_rpc_url()) {
            (Some(url), _) => url,
            (None, Some(url)) => url.clone(),
            (None, None) => parse_rpc_url(&required_env_var(API_KEY)?)?,
        };

        info!(
            "Using network {network} (chain id {}) via {rpc_url} as {}",
            network.chain_id(),
            credential.address()
        );

        Ok(Self::new(network, rpc_url, credential))
    }

    pub fn name(&self) -> &str {
        self.network.identifier()
    }
}
