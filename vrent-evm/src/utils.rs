// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use alloy::network::EthereumWallet;
use alloy::providers::{Provider, ProviderBuilder, WalletProvider};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest;
use std::env;
use std::str::FromStr;

/// Environment variable holding the hex encoded private key used to sign deployments.
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
/// Environment variable holding the RPC endpoint for networks without a public one.
pub const API_KEY: &str = "API_KEY";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Missing environment variable {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Invalid RPC URL {url:?}: {reason}")]
    InvalidRpcUrl { url: String, reason: String },
    #[error("Invalid address {value:?}: {reason}")]
    InvalidAddress { value: String, reason: String },
}

/// Read a required environment variable. Empty values count as missing.
pub fn required_env_var(name: &'static str) -> Result<String, Error> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => {
            error!("Environment variable {name} is not set");
            Err(Error::MissingEnvVar(name))
        }
    }
}

/// Parse a hex encoded private key, with or without the `0x` prefix.
pub fn signer_from_str(key: &str) -> Result<PrivateKeySigner, Error> {
    PrivateKeySigner::from_str(key.trim()).map_err(|err| Error::InvalidPrivateKey(err.to_string()))
}

pub fn parse_rpc_url(url: &str) -> Result<reqwest::Url, Error> {
    reqwest::Url::parse(url).map_err(|err| Error::InvalidRpcUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })
}

pub fn parse_address(value: &str) -> Result<Address, Error> {
    Address::from_str(value.trim()).map_err(|err| Error::InvalidAddress {
        value: value.to_string(),
        reason: err.to_string(),
    })
}

/// An HTTP provider that signs every transaction with `signer`.
pub fn wallet_provider(
    rpc_url: reqwest::Url,
    signer: PrivateKeySigner,
) -> impl Provider + WalletProvider + Clone {
    let wallet = EthereumWallet::from(signer);
    ProviderBuilder::new().wallet(wallet).connect_http(rpc_url)
}
