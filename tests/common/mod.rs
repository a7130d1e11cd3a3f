//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Counter snapshot shaped like a small Windows host.
pub const HOST_CATALOG: &str = r#"{
    "categories": [
        {
            "name": "Memory",
            "type": "SingleInstance",
            "help": "Physical and virtual memory",
            "counters": [
                { "name": "Available Bytes", "help": "free memory" },
                { "name": "Committed Bytes", "help": "committed memory" }
            ]
        },
        {
            "name": "ICMP",
            "type": "SingleInstance",
            "counters": [{ "name": "Messages/sec", "help": "help A" }]
        },
        {
            "name": "Network Interface",
            "type": "MultiInstance",
            "help": "Network adapters",
            "counters": [{ "name": "Bytes Sent/sec", "help": "sent" }],
            "instances": [{ "name": "Ethernet" }, { "name": "Loopback" }]
        },
        {
            "name": "Process",
            "type": "MultiInstance",
            "help": "Running processes",
            "instances": [
                { "name": "Idle", "counters": [{ "name": "% Processor Time", "help": "help B" }] }
            ]
        }
    ]
}"#;

/// Temporary working directory holding a catalog for one test.
pub struct TestFixture {
    pub dir: TempDir,
    pub catalog: PathBuf,
}

impl TestFixture {
    pub fn with_catalog(file_name: &str, contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let catalog = dir.path().join(file_name);
        std::fs::write(&catalog, contents).expect("write catalog");
        Self { dir, catalog }
    }

    pub fn host() -> Self {
        Self::with_catalog("host.json", HOST_CATALOG)
    }

    #[allow(dead_code)]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run the binary against this fixture's catalog.
    pub fn run(&self, args: &[&str]) -> Output {
        run_with_catalog(&self.catalog, args)
    }
}

pub fn run_with_catalog(catalog: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdh2zbx"))
        .arg("--catalog")
        .arg(catalog)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run pdh2zbx")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
