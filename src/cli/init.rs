//! Init command.

use crate::cli::output;
use crate::core::constants;
use crate::core::init::init;
use crate::core::project::Project;
use crate::error::Result;

/// Scaffold `.ymir` in the project root.
pub fn execute(project: &Project) -> Result<()> {
    init(project)?;

    output::success(&format!(
        "initialized {}",
        output::path(project.ymir_path().display())
    ));
    output::kv("stacks", constants::INIT_STACKS.join(", "));
    output::kv("checked out", constants::INIT_CURRENT_STACK);
    output::kv("default resolver", constants::ENV_RESOLVER_ALIAS);
    output::hint(&format!(
        "add a property with {}",
        output::cmd("ymir add KEY --path <location>")
    ));
    Ok(())
}
