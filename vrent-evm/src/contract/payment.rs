// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Calldata};
use crate::PaymentTokens;
use alloy::dyn_abi::DynSolValue;
use alloy::sol;
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

/// Artifact name of the payment router contract.
pub const PAYMENT_CONTRACT_NAME: &str = "payment";

sol!(
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IPayment {
        function setPaymentToken(uint8 index, address token) external;
    }
);

/// Token slots on the Payment contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentSlot {
    Usdc = 1,
    Weth = 2,
}

impl PaymentSlot {
    /// Slots in the order they are configured after deployment.
    pub const ALL: [PaymentSlot; 2] = [PaymentSlot::Usdc, PaymentSlot::Weth];

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn token(&self, tokens: &PaymentTokens) -> Option<Address> {
        match self {
            PaymentSlot::Usdc => tokens.usdc,
            PaymentSlot::Weth => tokens.weth,
        }
    }
}

impl std::fmt::Display for PaymentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentSlot::Usdc => write!(f, "USDC (slot 1)"),
            PaymentSlot::Weth => write!(f, "WETH (slot 2)"),
        }
    }
}

/// A deployed Payment contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentContract {
    address: Address,
}

impl PaymentContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Constructor arguments: `(owner)`.
    pub fn constructor_args(owner: Address) -> Vec<DynSolValue> {
        vec![DynSolValue::Address(owner)]
    }

    /// Point a payment slot at a token.
    /// Returns the transaction calldata.
    pub fn set_payment_token_calldata(
        &self,
        slot: PaymentSlot,
        token: Address,
    ) -> (Calldata, Address) {
        let calldata = IPayment::setPaymentTokenCall {
            index: slot.index(),
            token,
        }
        .abi_encode();
        (calldata.into(), self.address)
    }
}
