//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// A ymir command running in the project directory.
    ///
    /// Colors and inherited project/log settings are switched off so output
    /// is stable.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ymir").expect("failed to find ymir binary");
        cmd.current_dir(self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("YMIR_PROJECT");
        cmd.env_remove("YMIR_LOG");
        cmd
    }

    /// Run ymir with `args`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .unwrap_or_else(|e| panic!("failed to run ymir {:?}: {}", args, e))
    }

    pub fn init_cmd(&self) -> Output {
        self.run(&["init"])
    }

    pub fn checkout(&self, name: &str) -> Output {
        self.run(&["checkout", name])
    }

    pub fn current_stack(&self) -> Output {
        self.run(&["stack"])
    }

    /// `ymir add KEY --path PATH` plus any extra arguments.
    pub fn add(&self, key: &str, path: &str, extra: &[&str]) -> Output {
        let mut args = vec!["add", key, "--path", path];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    pub fn export(&self) -> Output {
        self.run(&["export"])
    }

    /// Register the executable at `location` under `alias`.
    pub fn install_plugin(&self, location: &str, alias: &str) -> Output {
        self.run(&["plugin", "install", location, alias])
    }
}
