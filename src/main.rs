//! ymir - multi-stack secret and configuration manager.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ymir::cli::output;
use ymir::cli::{execute, Cli};
use ymir::error::{Error, PluginError, ProjectError, StackError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("YMIR_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ymir=debug")
        } else {
            EnvFilter::new("ymir=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, cli.project) {
        output::error(&format!("{}: {}", e.code(), e));
        if let Some(hint) = suggestion(&e) {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<String> {
    match e {
        Error::Project(ProjectError::NotFound(_)) => Some("run: ymir init".to_string()),
        Error::Stack(StackError::NotFound { name, .. }) => {
            Some(format!("run: ymir checkout {} --create", name))
        }
        Error::Stack(StackError::CurrentProtected(name)) => Some(format!(
            "run: ymir delete {} --force --checkout <stack>",
            name
        )),
        Error::Stack(StackError::MissingRequired { key, .. }) => {
            Some(format!("run: ymir add {} --path <location>", key))
        }
        Error::Stack(StackError::PropertyExists { key, .. }) => {
            Some(format!("run: ymir update {}", key))
        }
        Error::Plugin(PluginError::ConfigNotFound { alias, .. }) => Some(format!(
            "run: ymir plugin install <location> {}",
            alias
        )),
        Error::Stack(StackError::NoDefaultResolver) => {
            Some("add a DEFAULT_RESOLVER section to .ymir/stack-config/default".to_string())
        }
        _ => None,
    }
}
