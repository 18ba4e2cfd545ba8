// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::commands::SubCmd;
use clap::Parser;
use vrent_logging::{LogFormat, LogOutputDest};

// Please do not remove the blank lines in these doc comments.
// They are used for inserting line breaks when the help menu is rendered.

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Opt {
    // Available subcommands. Optional so a missing one is reported with the usage.
    #[clap(subcommand)]
    pub command: Option<SubCmd>,

    /// Specify the logging format.
    ///
    /// Valid values are "default" or "json".
    ///
    /// If the argument is not used, the default format will be applied.
    #[clap(long, global = true, value_parser = LogFormat::parse_from_str, verbatim_doc_comment)]
    pub log_format: Option<LogFormat>,

    /// Specify the logging output destination.
    ///
    /// Valid values are "stderr", "stdout", "data-dir", or a custom path.
    ///
    /// `stderr` is the default value, which keeps stdout for the deployment output.
    ///
    /// The data directory location is platform specific:
    ///  - Linux: $HOME/.local/share/vrent/migrate/logs
    ///  - macOS: $HOME/Library/Application Support/vrent/migrate/logs
    ///  - Windows: C:\Users\<username>\AppData\Roaming\vrent\migrate\logs
    #[allow(rustdoc::invalid_html_tags)]
    #[clap(
        long,
        global = true,
        value_parser = LogOutputDest::parse_from_str,
        verbatim_doc_comment,
        default_value = "stderr"
    )]
    pub log_output_dest: LogOutputDest,
}
