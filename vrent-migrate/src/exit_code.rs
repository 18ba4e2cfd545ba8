// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use color_eyre::eyre::Report;
use vrent_evm::{artifacts, backend, sequencer, utils};

pub(crate) const INVALID_INPUT_EXIT_CODE: i32 = 6;
pub(crate) const SERIALIZATION_ERROR: i32 = 11;
pub(crate) const IO_ERROR: i32 = 12;
const NETWORK_ERROR: i32 = 13;
pub(crate) const UNKNOWN_NETWORK: i32 = 61;

pub type ExitCodeError = (Report, i32);

pub(crate) fn credential_error_exit_code(err: &utils::Error) -> i32 {
    match err {
        utils::Error::MissingEnvVar(_) => 21,
        utils::Error::InvalidPrivateKey(_) => 22,
        utils::Error::InvalidRpcUrl { .. } => 23,
        utils::Error::InvalidAddress { .. } => INVALID_INPUT_EXIT_CODE,
    }
}

pub(crate) fn artifact_error_exit_code(err: &artifacts::Error) -> i32 {
    match err {
        artifacts::Error::Io { .. } => IO_ERROR,
        artifacts::Error::Json { .. } => SERIALIZATION_ERROR,
        artifacts::Error::EmptyBytecode(_) => 31,
        artifacts::Error::NameMismatch { .. } => 32,
        artifacts::Error::CompilerMismatch { .. } => 33,
    }
}

pub(crate) fn backend_error_exit_code(err: &backend::Error) -> i32 {
    match err {
        backend::Error::Rpc(_) => NETWORK_ERROR,
        backend::Error::PendingTransaction(_) => 41,
        backend::Error::Reverted { .. } => 42,
        backend::Error::MissingContractAddress { .. } => 43,
    }
}

pub(crate) fn sequencer_error_exit_code(err: &sequencer::Error) -> i32 {
    match err {
        sequencer::Error::Backend(err) => backend_error_exit_code(err),
        sequencer::Error::ChainIdMismatch { .. } => 51,
        sequencer::Error::MissingPaymentToken { .. } => 52,
    }
}
