// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod deploy;
mod networks;

use crate::exit_code::ExitCodeError;
use crate::opt::Opt;
use clap::{error::ErrorKind, CommandFactory as _, Subcommand};

#[derive(Subcommand, Debug)]
pub enum SubCmd {
    /// Deploy the Payment contract, register its payment tokens, then deploy Rent against it.
    ///
    /// The signing key is read from `PRIVATE_KEY`. On mainnet and rinkeby the RPC endpoint is
    /// read from `API_KEY` unless `--rpc-url` is given.
    Deploy(deploy::DeployArgs),

    /// List the known networks with their chain id, RPC endpoint and payment tokens.
    Networks,
}

pub async fn handle_subcommand(opt: Opt) -> Result<(), ExitCodeError> {
    match opt.command {
        Some(SubCmd::Deploy(args)) => deploy::deploy(args).await,
        Some(SubCmd::Networks) => {
            networks::list();
            Ok(())
        }
        None => {
            // If no subcommand is given, default to clap's error behaviour.
            Opt::command()
                .error(ErrorKind::MissingSubcommand, "Please provide a subcommand")
                .exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_definition_is_consistent() {
        Opt::command().debug_assert();
    }

    #[test]
    fn networks_takes_no_arguments() {
        let opt = Opt::try_parse_from(["vrent-migrate", "networks"]).unwrap();
        assert!(matches!(opt.command, Some(SubCmd::Networks)));
        assert!(Opt::try_parse_from(["vrent-migrate", "networks", "mainnet"]).is_err());
    }

    #[test]
    fn log_options_are_accepted_after_the_subcommand() {
        let opt = Opt::try_parse_from([
            "vrent-migrate",
            "networks",
            "--log-format",
            "json",
            "--log-output-dest",
            "stdout",
        ])
        .unwrap();
        assert_eq!(opt.log_format, Some(vrent_logging::LogFormat::Json));
        assert_eq!(opt.log_output_dest, vrent_logging::LogOutputDest::Stdout);
    }

    #[test]
    fn logs_go_to_stderr_by_default() {
        let opt = Opt::try_parse_from(["vrent-migrate", "networks"]).unwrap();
        assert_eq!(opt.log_output_dest, vrent_logging::LogOutputDest::Stderr);
        assert_eq!(opt.log_format, None);
    }
}
