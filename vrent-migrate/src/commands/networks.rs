// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use vrent_evm::common::Address;
use vrent_evm::utils::API_KEY;
use vrent_evm::Network;

pub fn list() {
    for line in table() {
        println!("{line}");
    }
}

fn table() -> Vec<String> {
    let mut lines = vec![format!(
        "{:<12} {:>8}  {:<44} {:<44} RPC",
        "NETWORK", "CHAIN ID", "WETH", "USDC"
    )];

    for network in Network::KNOWN {
        let tokens = network.payment_tokens();
        let rpc = match network.public_rpc_url() {
            Some(url) => url.to_string(),
            None => format!("${API_KEY}"),
        };
        lines.push(format!(
            "{:<12} {:>8}  {:<44} {:<44} {rpc}",
            network.identifier(),
            network.chain_id(),
            token_cell(tokens.weth),
            token_cell(tokens.usdc),
        ));
    }

    lines
}

fn token_cell(token: Option<Address>) -> String {
    token.map_or_else(|| "-".to_string(), |token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_network_has_a_row() {
        let lines = table();
        assert_eq!(lines.len(), 1 + Network::KNOWN.len());
        assert!(lines[0].starts_with("NETWORK"));
        for network in Network::KNOWN {
            assert!(
                lines
                    .iter()
                    .any(|line| line.starts_with(&format!("{:<12} ", network.identifier()))),
                "{network}"
            );
        }
    }

    #[test]
    fn networks_without_public_rpc_point_at_the_env_var() {
        let lines = table();
        let mainnet = lines
            .iter()
            .find(|line| line.starts_with("mainnet "))
            .unwrap();
        assert!(mainnet.ends_with("$API_KEY"));
        assert!(mainnet.contains("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"));
    }

    #[test]
    fn bsc_testnet_has_no_tokens() {
        let lines = table();
        let row = lines
            .iter()
            .find(|line| line.starts_with("bscTestnet "))
            .unwrap();
        assert!(!row.contains("0x"));
    }
}
