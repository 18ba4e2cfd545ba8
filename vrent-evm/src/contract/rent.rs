// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use alloy::dyn_abi::DynSolValue;

/// Artifact name of the rental contract.
pub const RENT_CONTRACT_NAME: &str = "vRent";

/// Constructor arguments: `(payment, beneficiary, owner)`.
///
/// The Payment address always comes first.
pub fn constructor_args(
    payment: Address,
    beneficiary: Address,
    owner: Address,
) -> Vec<DynSolValue> {
    vec![
        DynSolValue::Address(payment),
        DynSolValue::Address(beneficiary),
        DynSolValue::Address(owner),
    ]
}
