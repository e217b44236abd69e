//! Error types for ymir.
//!
//! Errors are grouped by domain. Every variant carries a stable, upper-case
//! code (see [`Error::code`]) that the CLI prints next to the message and
//! that plugins use in their own error replies.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Stable error code, e.g. `STACK_NOT_FOUND`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Project(e) => e.code(),
            Self::Stack(e) => e.code(),
            Self::Plugin(e) => e.code(),
            Self::Resolver(e) => e.code(),
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Prompt(_) => "PROMPT_ERROR",
        }
    }
}

/// `.ymir` project layout errors.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("not in a ymir project: {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("ymir project already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("invalid current_stack file at {}: {reason}", path.display())]
    InvalidCurrentStack { path: PathBuf, reason: String },
}

impl ProjectError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PROJECT_NOT_FOUND",
            Self::AlreadyExists(_) => "PROJECT_EXISTS",
            Self::InvalidCurrentStack { .. } => "INVALID_CURRENT_STACK",
        }
    }
}

/// Stack and stack-config errors.
#[derive(Error, Debug)]
pub enum StackError {
    #[error("stack {name} does not exist")]
    NotFound { name: String, path: PathBuf },

    #[error("stack config {name} does not exist")]
    ConfigNotFound { name: String, path: PathBuf },

    #[error("stack {0} already exists")]
    AlreadyExists(String),

    #[error("can not delete the default stack")]
    DefaultProtected,

    #[error("can not delete the checked out stack {0} without --force")]
    CurrentProtected(String),

    #[error("invalid config: missing {} in stack config and default config", missing.join(", "))]
    InvalidConfig { missing: Vec<String> },

    #[error("no default resolver found in config files")]
    NoDefaultResolver,

    #[error("no FILE config found in stack or default stack")]
    NoFileConfig,

    #[error("key {key} already exists in stack {stack}")]
    PropertyExists { key: String, stack: String },

    #[error("cannot specify both --global and --stack")]
    ConflictingDestination,

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("missing required properties for {key}: {}", missing.join(", "))]
    MissingRequired { key: String, missing: Vec<String> },

    #[error("invalid stack name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl StackError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "STACK_NOT_FOUND",
            Self::ConfigNotFound { .. } => "STACK_CONFIG_NOT_FOUND",
            Self::AlreadyExists(_) => "STACK_EXISTS",
            Self::DefaultProtected => "DEFAULT_STACK_PROTECTED",
            Self::CurrentProtected(_) => "CURRENT_STACK_PROTECTED",
            Self::InvalidConfig { .. } => "INVALID_STACK_CONFIG",
            Self::NoDefaultResolver => "NO_DEFAULT_RESOLVER",
            Self::NoFileConfig => "NO_FILE_CONFIG",
            Self::PropertyExists { .. } => "PROPERTY_EXISTS",
            Self::ConflictingDestination => "CONFLICTING_DESTINATION",
            Self::InvalidKey { .. } => "INVALID_KEY",
            Self::MissingRequired { .. } => "MISSING_REQUIRED_PROPS",
            Self::InvalidName { .. } => "INVALID_STACK_NAME",
        }
    }
}

/// Plugin descriptor and installation errors.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("plugin config not found for alias {alias} at {}", path.display())]
    ConfigNotFound { alias: String, path: PathBuf },

    #[error("invalid plugin config for alias {alias}: {reason}")]
    InvalidConfig { alias: String, reason: String },

    #[error("invalid plugin installation for {location}: {reason}")]
    InvalidInstallation { location: String, reason: String },

    #[error("invalid plugin alias '{alias}': {reason}")]
    InvalidAlias { alias: String, reason: String },
}

impl PluginError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "PLUGIN_CONFIG_NOT_FOUND",
            Self::InvalidConfig { .. } => "INVALID_PLUGIN_CONFIG",
            Self::InvalidInstallation { .. } => "INVALID_PLUGIN_INSTALLATION",
            Self::InvalidAlias { .. } => "INVALID_PLUGIN_ALIAS",
        }
    }
}

/// Errors raised by, or while talking to, a resolver.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Resolver-level failure reported by the plugin (bad config, auth, ...).
    #[error("resolver {alias} failed: {code}: {message}")]
    Failed {
        alias: String,
        code: String,
        message: String,
    },

    #[error("resolver {alias} broke the plugin protocol: {reason}")]
    Protocol { alias: String, reason: String },

    #[error("resolver {alias} does not support {operation}")]
    Unsupported {
        alias: String,
        operation: &'static str,
    },

    #[error("error adding property {key} with resolver {alias}: {source}")]
    Add {
        alias: String,
        key: String,
        #[source]
        source: Box<Error>,
    },

    #[error("error removing property {key} with resolver {alias}: {source}")]
    Remove {
        alias: String,
        key: String,
        #[source]
        source: Box<Error>,
    },

    #[error("error updating property {key} with resolver {alias}: {source}")]
    Update {
        alias: String,
        key: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unable to import env with resolver {alias}: {source}")]
    Import {
        alias: String,
        #[source]
        source: Box<Error>,
    },
}

impl ResolverError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Failed { .. } => "RESOLVER_ERROR",
            Self::Protocol { .. } => "PLUGIN_PROTOCOL_ERROR",
            Self::Unsupported { .. } => "UNSUPPORTED_OPERATION",
            Self::Add { .. } => "RESOLVER_ADD_ERROR",
            Self::Remove { .. } => "RESOLVER_REMOVE_ERROR",
            Self::Update { .. } => "RESOLVER_UPDATE_ERROR",
            Self::Import { .. } => "UNABLE_TO_IMPORT_ENV",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
