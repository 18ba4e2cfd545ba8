// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use vrent_evm::transaction_config::MaxFeePerGas;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MaxFeePerGasParam {
    Auto,
    LimitedAuto(u128),
    Unlimited,
    Custom(u128),
}

impl std::str::FromStr for MaxFeePerGasParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();

        match s.as_str() {
            "auto" => Ok(MaxFeePerGasParam::Auto),
            "unlimited" => Ok(MaxFeePerGasParam::Unlimited),
            _ => {
                if let Some(rest) = s.strip_prefix("limited-auto:") {
                    rest.parse::<u128>()
                        .map(MaxFeePerGasParam::LimitedAuto)
                        .map_err(|_| format!("Invalid limited-auto value: {rest}"))
                } else {
                    s.parse::<u128>()
                        .map(MaxFeePerGasParam::Custom)
                        .map_err(|_| format!("Invalid custom value: {s}"))
                }
            }
        }
    }
}

impl std::fmt::Display for MaxFeePerGasParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "MaxFeePerGas::Auto"),
            Self::LimitedAuto(value) => write!(f, "MaxFeePerGas::LimitedAuto({value})"),
            Self::Unlimited => write!(f, "MaxFeePerGas::Unlimited"),
            Self::Custom(value) => write!(f, "MaxFeePerGas::Custom({value})"),
        }
    }
}

/// Deployments are rare and the old chains have no reference gas price, so the node estimate is
/// used unless the user caps it.
pub fn get_max_fee_per_gas_from_opt_param(param: Option<MaxFeePerGasParam>) -> MaxFeePerGas {
    match param.unwrap_or(MaxFeePerGasParam::Auto) {
        MaxFeePerGasParam::Auto => MaxFeePerGas::Auto,
        MaxFeePerGasParam::LimitedAuto(value) => MaxFeePerGas::LimitedAuto(value),
        MaxFeePerGasParam::Unlimited => MaxFeePerGas::Unlimited,
        MaxFeePerGasParam::Custom(value) => MaxFeePerGas::Custom(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!("AUTO".parse(), Ok(MaxFeePerGasParam::Auto));
        assert_eq!("Unlimited".parse(), Ok(MaxFeePerGasParam::Unlimited));
    }

    #[test]
    fn limited_auto_carries_its_cap() {
        assert_eq!(
            "limited-auto:5000000000".parse(),
            Ok(MaxFeePerGasParam::LimitedAuto(5_000_000_000))
        );
        assert!("limited-auto:lots".parse::<MaxFeePerGasParam>().is_err());
    }

    #[test]
    fn plain_numbers_are_custom_wei_amounts() {
        assert_eq!("42".parse(), Ok(MaxFeePerGasParam::Custom(42)));
        assert!("market".parse::<MaxFeePerGasParam>().is_err());
    }

    #[test]
    fn missing_param_means_auto() {
        assert_eq!(get_max_fee_per_gas_from_opt_param(None), MaxFeePerGas::Auto);
        assert_eq!(
            get_max_fee_per_gas_from_opt_param(Some(MaxFeePerGasParam::LimitedAuto(7))),
            MaxFeePerGas::LimitedAuto(7)
        );
    }
}
