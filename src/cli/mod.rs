//! Command-line interface.

pub mod completions;
pub mod env;
pub mod init;
pub mod output;
pub mod plugin;
pub mod property;
pub mod stack;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::project::Project;
use crate::error::Result;

/// ymir - stacks of secrets, resolved from wherever they live.
#[derive(Parser)]
#[command(
    name = "ymir",
    about = "Multi-stack secret and configuration manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, env = "YMIR_PROJECT")]
    pub project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create .ymir with the default, dev, stage and prod stacks
    Init,

    /// Switch the checked out stack
    Checkout {
        /// Stack name
        name: String,
        /// Create the stack first if it does not exist
        #[arg(long)]
        create: bool,
    },

    /// Show the checked out stack
    Stack {
        /// List every stack
        #[arg(short, long)]
        list: bool,
        /// Print the path of the stack file
        #[arg(long)]
        path: bool,
        /// Print the stack config with defaults filled in
        #[arg(long, conflicts_with_all = ["list", "path"])]
        config: bool,
    },

    /// Create a stack
    Create {
        /// Stack name
        name: String,
    },

    /// Delete a stack file
    Delete {
        /// Stack name
        name: String,
        /// Allow deleting the checked out stack
        #[arg(short, long)]
        force: bool,
        /// Stack to check out when deleting the checked out one
        #[arg(long, value_name = "STACK")]
        checkout: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a property to a stack
    Add {
        /// Property key (e.g., DATABASE_URL)
        key: String,
        #[command(flatten)]
        prop: PropertyArgs,
        /// Also store this value in the resolver
        #[arg(long)]
        value: Option<String>,
        #[command(flatten)]
        dest: Destination,
    },

    /// Change the definition of a property
    Update {
        /// Property key
        key: String,
        #[command(flatten)]
        prop: PropertyArgs,
        /// Also update the value in the resolver
        #[arg(long)]
        value: Option<String>,
        #[command(flatten)]
        dest: Destination,
    },

    /// Remove a property from a stack
    Remove {
        /// Property key
        key: String,
        /// Also delete the value from the resolver
        #[arg(long)]
        purge: bool,
        #[command(flatten)]
        dest: Destination,
    },

    /// Resolve a stack and write its .env file
    Export {
        /// Stack to export (defaults to the checked out stack)
        #[arg(short, long)]
        stack: Option<String>,
    },

    /// Push a .env file through a resolver and record its keys
    Import {
        /// Path to .env file
        file: PathBuf,
        /// Resolver alias (defaults to the stack's default resolver)
        #[arg(short, long)]
        resolver: Option<String>,
        #[command(flatten)]
        dest: Destination,
    },

    /// Manage resolver plugins
    Plugin {
        #[command(subcommand)]
        action: PluginAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Which stack an edit applies to.
#[derive(Args, Debug, Clone, Default)]
pub struct Destination {
    /// Edit the default stack
    #[arg(short, long)]
    pub global: bool,
    /// Edit a named stack instead of the checked out one
    #[arg(short, long)]
    pub stack: Option<String>,
}

/// Fields of a property definition.
#[derive(Args, Debug, Clone, Default)]
pub struct PropertyArgs {
    /// Location of the value in the resolver
    #[arg(short, long)]
    pub path: Option<String>,
    /// Free-form description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Resolver alias, when not the stack's default
    #[arg(short, long)]
    pub resolver: Option<String>,
    /// Mark the property as required
    #[arg(long)]
    pub required: Option<bool>,
}

/// Plugin subcommands.
#[derive(Subcommand)]
pub enum PluginAction {
    /// Register a plugin executable under an alias
    Install {
        /// Executable path, name on PATH, or @builtin/<name>
        location: String,
        /// Alias used in stacks and stack configs
        alias: String,
        /// Package name recorded in the descriptor
        #[arg(long)]
        pk_name: Option<String>,
        /// Command that installs the plugin
        #[arg(long)]
        install_cmd: Option<String>,
        /// Mark the plugin as globally installed
        #[arg(long)]
        global: bool,
    },

    /// List registered plugins
    List,

    /// Ask a plugin to describe itself
    Info {
        /// Plugin alias
        alias: String,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command against the project at `root` (or the current
/// directory).
pub fn execute(command: Command, root: Option<PathBuf>) -> Result<()> {
    use Command::*;

    let cwd = std::env::current_dir()?;
    let located = locate(&cwd, root.as_deref());

    let open = || Project::open(located.root());

    match command {
        Init => init::execute(&located),
        Checkout { name, create } => stack::checkout(&open()?, &name, create),
        Stack { list, path, config } => stack::show(&open()?, list, path, config),
        Create { name } => stack::create(&open()?, &name),
        Delete {
            name,
            force,
            checkout,
            yes,
        } => stack::delete(&open()?, &name, force, checkout.as_deref(), yes),
        Add {
            key,
            prop,
            value,
            dest,
        } => property::add(&open()?, &key, prop, value, &dest),
        Update {
            key,
            prop,
            value,
            dest,
        } => property::update(&open()?, &key, prop, value, &dest),
        Remove { key, purge, dest } => property::remove(&open()?, &key, purge, &dest),
        Export { stack } => env::export(&open()?, stack.as_deref()),
        Import {
            file,
            resolver,
            dest,
        } => env::import(&open()?, &file, resolver.as_deref(), &dest),
        Plugin { action } => match action {
            PluginAction::Install {
                location,
                alias,
                pk_name,
                install_cmd,
                global,
            } => plugin::install(&open()?, &location, &alias, pk_name, install_cmd, global),
            PluginAction::List => plugin::list(&open()?),
            PluginAction::Info { alias } => plugin::info(&open()?, &alias),
        },
        Completions { shell } => completions::execute(shell),
    }
}

fn locate(cwd: &Path, root: Option<&Path>) -> Project {
    match root {
        Some(root) if root.is_absolute() => Project::locate(cwd, None, Some(root)),
        Some(root) => Project::locate(cwd, Some(root), None),
        None => Project::locate(cwd, None, None),
    }
}

/// Resolve the stack an edit targets.
pub(crate) fn destination(project: &Project, dest: &Destination) -> Result<String> {
    let current = project.current_stack_name()?;
    crate::core::stack::destination_stack(&current, dest.global, dest.stack.as_deref())
}
