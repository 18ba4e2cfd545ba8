// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use alloy::primitives::address;
use alloy::transports::http::reqwest;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::sync::LazyLock;

#[macro_use]
extern crate tracing;

pub mod artifacts;
pub mod backend;
pub mod common;
pub mod contract;
pub mod profile;
mod retry;
pub mod sequencer;
pub mod transaction_config;
pub mod utils;

pub use profile::{NetworkProfile, SigningCredential};

/// Default time to wait for a transaction to be mined.
pub const TX_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

static PUBLIC_BSC_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://bsc-dataseed2.binance.org"
        .parse()
        .expect("Invalid RPC URL")
});

static PUBLIC_BSC_TESTNET_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://data-seed-prebsc-1-s1.binance.org:8545/"
        .parse()
        .expect("Invalid RPC URL")
});

static PUBLIC_MATIC_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://polygon-mainnet.infura.io/v3/c847a9ffb72d45a2a1ee452b6f381bc1"
        .parse()
        .expect("Invalid RPC URL")
});

static PUBLIC_MUMBAI_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://polygon-mumbai.infura.io/v3/c847a9ffb72d45a2a1ee452b6f381bc1"
        .parse()
        .expect("Invalid RPC URL")
});

const MAINNET_WETH_ADDRESS: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
const MAINNET_USDC_ADDRESS: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

const RINKEBY_WETH_ADDRESS: Address = address!("c778417E063141139Fce010982780140Aa0cD5Ab");
const RINKEBY_USDC_ADDRESS: Address = address!("eb8f08a975Ab53E34D8a0330E0D34de942C95926");

// BSC uses the same BEP-20 token for both slots.
const BSC_WETH_ADDRESS: Address = address!("e9e7cea3dedca5984780bafc599bd69add087d56");
const BSC_USDC_ADDRESS: Address = address!("e9e7cea3dedca5984780bafc599bd69add087d56");

const MATIC_WETH_ADDRESS: Address = address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619");
const MATIC_USDC_ADDRESS: Address = address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174");

const MUMBAI_WETH_ADDRESS: Address = address!("062f24cb618e6ba873EC1C85FD08B8D2Ee9bF23e");
const MUMBAI_USDC_ADDRESS: Address = address!("e6b8a5CF854791412c1f6EFC7CAf629f5Df1c747");

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown network identifier: {0:?}")]
    UnknownNetwork(String),
}

/// The two tokens a Payment contract accepts.
///
/// `None` means the table has no address for that token on the network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTokens {
    pub weth: Option<Address>,
    pub usdc: Option<Address>,
}

impl PaymentTokens {
    pub const fn new(weth: Address, usdc: Address) -> Self {
        Self {
            weth: Some(weth),
            usdc: Some(usdc),
        }
    }

    pub const fn empty() -> Self {
        Self {
            weth: None,
            usdc: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weth.is_none() && self.usdc.is_none()
    }
}

/// Look up the payment tokens for a network identifier.
///
/// Unrecognised identifiers and `bscTestnet` resolve to empty tokens. This never fails, but an
/// unrecognised identifier is logged.
pub fn payment_tokens(identifier: &str) -> PaymentTokens {
    match identifier {
        "mainnet" => PaymentTokens::new(MAINNET_WETH_ADDRESS, MAINNET_USDC_ADDRESS),
        "rinkeby" => PaymentTokens::new(RINKEBY_WETH_ADDRESS, RINKEBY_USDC_ADDRESS),
        "bsc" => PaymentTokens::new(BSC_WETH_ADDRESS, BSC_USDC_ADDRESS),
        "bscTestnet" => PaymentTokens::empty(),
        "matic" => PaymentTokens::new(MATIC_WETH_ADDRESS, MATIC_USDC_ADDRESS),
        "mumbai" => PaymentTokens::new(MUMBAI_WETH_ADDRESS, MUMBAI_USDC_ADDRESS),
        other => {
            warn!(
                "No payment tokens known for network {other:?}, leaving both token addresses empty"
            );
            PaymentTokens::empty()
        }
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomNetwork {
    pub name: String,
    #[serde_as(as = "DisplayFromStr")]
    pub rpc_url_http: reqwest::Url,
    pub chain_id: u64,
    pub payment_tokens: PaymentTokens,
}

impl CustomNetwork {
    pub fn new(
        name: impl Into<String>,
        rpc_url_http: reqwest::Url,
        chain_id: u64,
        payment_tokens: PaymentTokens,
    ) -> Self {
        Self {
            name: name.into(),
            rpc_url_http,
            chain_id,
            payment_tokens,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Rinkeby,
    Bsc,
    BscTestnet,
    Matic,
    Mumbai,
    Custom(CustomNetwork),
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl std::str::FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "rinkeby" => Ok(Network::Rinkeby),
            "bsc" => Ok(Network::Bsc),
            "bscTestnet" => Ok(Network::BscTestnet),
            "matic" => Ok(Network::Matic),
            "mumbai" => Ok(Network::Mumbai),
            _ => Err(Error::UnknownNetwork(s.to_string())),
        }
    }
}

impl Network {
    /// All networks with a built-in parameter table entry.
    pub const KNOWN: [Network; 6] = [
        Network::Mainnet,
        Network::Rinkeby,
        Network::Bsc,
        Network::BscTestnet,
        Network::Matic,
        Network::Mumbai,
    ];

    pub fn identifier(&self) -> &str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Rinkeby => "rinkeby",
            Network::Bsc => "bsc",
            Network::BscTestnet => "bscTestnet",
            Network::Matic => "matic",
            Network::Mumbai => "mumbai",
            Network::Custom(custom) => &custom.name,
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Rinkeby => 4,
            Network::Bsc => 56,
            Network::BscTestnet => 97,
            Network::Matic => 137,
            Network::Mumbai => 80001,
            Network::Custom(custom) => custom.chain_id,
        }
    }

    /// The public RPC endpoint for the network.
    ///
    /// `None` for networks whose endpoint has to come from the environment (see
    /// [`utils::API_KEY`]).
    pub fn public_rpc_url(&self) -> Option<&reqwest::Url> {
        match self {
            Network::Mainnet | Network::Rinkeby => None,
            Network::Bsc => Some(&PUBLIC_BSC_HTTP_RPC_URL),
            Network::BscTestnet => Some(&PUBLIC_BSC_TESTNET_HTTP_RPC_URL),
            Network::Matic => Some(&PUBLIC_MATIC_HTTP_RPC_URL),
            Network::Mumbai => Some(&PUBLIC_MUMBAI_HTTP_RPC_URL),
            Network::Custom(custom) => Some(&custom.rpc_url_http),
        }
    }

    pub fn payment_tokens(&self) -> PaymentTokens {
        match self {
            Network::Custom(custom) => custom.payment_tokens,
            known => payment_tokens(known.identifier()),
        }
    }
}
