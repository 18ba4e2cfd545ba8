// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use tracing_subscriber::fmt::MakeWriter;
use vrent_logging::{Level, LogBuilder, LogFormat};

/// A test writer that captures output to a string
#[derive(Clone)]
struct TestWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl TestWriter {
    fn new() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn get_output(&self) -> String {
        let buffer = self.buffer.lock().expect("Failed to acquire buffer lock");
        String::from_utf8(buffer.clone()).expect("Buffer contains invalid UTF-8")
    }
}

impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .expect("Failed to acquire buffer lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for TestWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn this_crate(level: Level) -> Vec<(String, Level)> {
    vec![("formatter".to_string(), level)]
}

#[test]
fn default_format_writes_level_module_and_line() {
    let writer = TestWriter::new();
    let (_handle, _guard) = LogBuilder::init_scoped_with_writer(
        this_crate(Level::INFO),
        LogFormat::Default,
        writer.clone(),
    );

    info!("Payment deployed at 0x5FbDB2315678afecb367f032d93F642f64180aa3");

    let output = writer.get_output();
    let line = output.lines().next().expect("one log line");
    assert!(line.starts_with('['), "{line}");
    assert!(line.contains(" INFO formatter "), "{line}");
    assert!(line.ends_with("] Payment deployed at 0x5FbDB2315678afecb367f032d93F642f64180aa3"));
}

#[test]
fn current_span_name_follows_the_line_number() {
    let writer = TestWriter::new();
    let (_handle, _guard) = LogBuilder::init_scoped_with_writer(
        this_crate(Level::INFO),
        LogFormat::Default,
        writer.clone(),
    );

    let span = tracing::info_span!("deploy");
    let _enter = span.enter();
    info!("Sending transaction");

    let output = writer.get_output();
    assert!(output.contains("/deploy] Sending transaction"), "{output}");
}

#[test]
fn events_below_the_target_level_are_filtered_out() {
    let writer = TestWriter::new();
    let (_handle, _guard) = LogBuilder::init_scoped_with_writer(
        this_crate(Level::INFO),
        LogFormat::Default,
        writer.clone(),
    );

    debug!("hidden");
    warn!("shown");

    let output = writer.get_output();
    assert!(!output.contains("hidden"));
    assert!(output.contains(" WARN formatter "));
}

#[test]
fn reload_handle_changes_the_level() {
    let writer = TestWriter::new();
    let (handle, _guard) = LogBuilder::init_scoped_with_writer(
        this_crate(Level::INFO),
        LogFormat::Default,
        writer.clone(),
    );

    debug!("before reload");
    handle.modify_log_level("formatter=debug").unwrap();
    debug!("after reload");

    let output = writer.get_output();
    assert!(!output.contains("before reload"));
    assert!(output.contains("after reload"));
}

#[test]
fn json_format_writes_one_object_per_event() {
    let writer = TestWriter::new();
    let (_handle, _guard) = LogBuilder::init_scoped_with_writer(
        this_crate(Level::INFO),
        LogFormat::Json,
        writer.clone(),
    );

    info!(network = "matic", "Rent deployed");

    let output = writer.get_output();
    let line = output.lines().next().expect("one log line");
    assert!(line.starts_with('{') && line.ends_with('}'), "{line}");
    assert!(line.contains("\"message\":\"Rent deployed\""), "{line}");
    assert!(line.contains("\"network\":\"matic\""), "{line}");
    assert!(line.contains("\"level\":\"INFO\""), "{line}");
}
