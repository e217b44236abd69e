//! Test support utilities for ymir integration tests.
//!
//! Every test gets its own temporary project directory. Child processes are
//! pointed at it with `.current_dir()`, so tests can run in parallel.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment around a temporary project root.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    /// Empty project directory, no `.ymir` yet.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Project with `ymir init` already run.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize project: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Path inside `.ymir`.
    pub fn ymir(&self, relative: &str) -> PathBuf {
        self.dir.path().join(".ymir").join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(relative))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, content).expect("failed to write file");
    }

    pub fn stack(&self, name: &str) -> String {
        self.read(&format!(".ymir/stacks/{}", name))
    }

    pub fn write_stack(&self, name: &str, content: &str) {
        self.write(&format!(".ymir/stacks/{}", name), content);
    }

    pub fn write_stack_config(&self, name: &str, content: &str) {
        self.write(&format!(".ymir/stack-config/{}", name), content);
    }
}
