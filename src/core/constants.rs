//! Constants used throughout ymir.
//!
//! Centralizes directory names, reserved section names, and defaults.

/// Project folder name, created inside the project root.
pub const YMIR_DIR: &str = ".ymir";

/// Directory holding stack files (`.ymir/stacks/<name>`).
pub const STACKS_DIR: &str = "stacks";

/// Directory holding stack config files (`.ymir/stack-config/<name>`).
pub const STACK_CONFIG_DIR: &str = "stack-config";

/// Directory holding plugin descriptors (`.ymir/plugins/<alias>`).
pub const PLUGINS_DIR: &str = "plugins";

/// File recording the checked out stack.
pub const CURRENT_STACK_FILE: &str = "current_stack";

/// Name of the stack merged underneath every other stack.
pub const DEFAULT_STACK: &str = "default";

/// Stacks scaffolded by `init`.
pub const INIT_STACKS: &[&str] = &["default", "dev", "stage", "prod"];

/// Stack checked out right after `init`.
pub const INIT_CURRENT_STACK: &str = "dev";

/// Metadata section, never resolved.
pub const SECTION_DESCRIBE: &str = "DESCRIBE";

/// Stack-config section naming the fallback resolver alias.
pub const SECTION_DEFAULT_RESOLVER: &str = "DEFAULT_RESOLVER";

/// Stack-config section naming the `.env` target.
pub const SECTION_FILE: &str = "FILE";

/// Plugin descriptor section holding the install location.
pub const SECTION_LOCATION: &str = "LOCATION";

/// Prefix of per-resolver config sections (`RESOLVER_CONFIG_<ALIAS>`).
pub const RESOLVER_CONFIG_PREFIX: &str = "RESOLVER_CONFIG_";

/// Stack-config sections that fall back to the default stack config.
pub const DEFAULTED_CONFIG_SECTIONS: &[&str] = &[SECTION_FILE, SECTION_DEFAULT_RESOLVER];

/// Keys serialized without the `?` marker when no whitelist is given.
pub const DEFAULT_REQUIRED_PROPS: &[&str] = &["path"];

/// Keys serialized without the `?` marker in plugin descriptors.
pub const PLUGIN_REQUIRED_PROPS: &[&str] = &["alias", "path"];

/// Keys serialized without the `?` marker in stack config files.
pub const CONFIG_REQUIRED_PROPS: &[&str] =
    &["name", "alias", "path", "ymir_version", "project_version"];

/// Installed-location prefix for resolvers compiled into ymir.
pub const BUILTIN_PREFIX: &str = "@builtin/";

/// Alias of the built-in environment resolver registered by `init`.
pub const ENV_RESOLVER_ALIAS: &str = "env";

/// Default `.env` file name.
pub const ENV_FILE: &str = ".env";
