//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A property key, which is also its section name (e.g. DATABASE_URL).
///
/// Only `A-Z` and `_` survive the round trip through a section header.
pub type PropertyKey = String;

/// A stack name (e.g. dev, prod). Doubles as the file name under `stacks/`.
pub type StackName = String;

/// A resolver alias (e.g. env, ssm). Doubles as the file name under `plugins/`.
pub type Alias = String;

/// Where a resolver is installed: `@builtin/<name>`, a path, or a command name.
pub type Location = String;
