// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use alloy::eips::eip1559::Eip1559Estimation;

#[derive(Clone, Debug, Default)]
pub struct TransactionConfig {
    pub max_fee_per_gas: MaxFeePerGas,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaxFeePerGas {
    /// Use the current market price for fee per gas. WARNING: This can result in unexpected high gas fees!
    #[default]
    Auto,
    /// Use the current market price for fee per gas, but with an upper limit.
    LimitedAuto(u128),
    /// Use no max fee per gas. WARNING: This can result in unexpected high gas fees!
    Unlimited,
    /// Use a custom max fee per gas in WEI.
    Custom(u128),
}

impl MaxFeePerGas {
    /// Whether the fee fields have to be set on the transaction, rather than left to the provider.
    pub fn needs_estimate(&self) -> bool {
        matches!(self, MaxFeePerGas::LimitedAuto(_) | MaxFeePerGas::Custom(_))
    }

    /// Apply this setting to a node estimate.
    ///
    /// Returns `None` when the provider should fill the fees itself.
    pub fn apply(&self, estimate: Eip1559Estimation) -> Option<Eip1559Estimation> {
        let max_fee_per_gas = match *self {
            MaxFeePerGas::Auto | MaxFeePerGas::Unlimited => return None,
            MaxFeePerGas::LimitedAuto(limit) => estimate.max_fee_per_gas.min(limit),
            MaxFeePerGas::Custom(fee) => fee,
        };

        Some(Eip1559Estimation {
            max_fee_per_gas,
            max_priority_fee_per_gas: estimate.max_priority_fee_per_gas.min(max_fee_per_gas),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(max_fee_per_gas: u128, max_priority_fee_per_gas: u128) -> Eip1559Estimation {
        Eip1559Estimation {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        }
    }

    #[test]
    fn auto_and_unlimited_leave_fees_to_the_provider() {
        assert_eq!(MaxFeePerGas::Auto.apply(estimate(100, 2)), None);
        assert_eq!(MaxFeePerGas::Unlimited.apply(estimate(100, 2)), None);
        assert!(!MaxFeePerGas::Auto.needs_estimate());
    }

    #[test]
    fn limited_auto_caps_the_estimate() {
        let fees = MaxFeePerGas::LimitedAuto(50)
            .apply(estimate(100, 60))
            .expect("fees are set");
        assert_eq!(fees.max_fee_per_gas, 50);
        assert_eq!(fees.max_priority_fee_per_gas, 50);

        let fees = MaxFeePerGas::LimitedAuto(500)
            .apply(estimate(100, 2))
            .expect("fees are set");
        assert_eq!(fees.max_fee_per_gas, 100);
        assert_eq!(fees.max_priority_fee_per_gas, 2);
    }

    #[test]
    fn custom_overrides_the_estimate() {
        let fees = MaxFeePerGas::Custom(7)
            .apply(estimate(100, 2))
            .expect("fees are set");
        assert_eq!(fees.max_fee_per_gas, 7);
        assert_eq!(fees.max_priority_fee_per_gas, 2);
    }
}
