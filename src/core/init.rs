//! Project scaffolding.

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::core::constants;
use crate::core::format::{serialize_stack, StackDocument};
use crate::core::plugin::{install_plugin_with_path, InstallOptions};
use crate::core::project::Project;
use crate::core::property::RequiredProps;
use crate::error::{ProjectError, Result};

/// Create `.ymir` under the project root.
///
/// Writes the `default`, `dev`, `stage` and `prod` stacks and configs,
/// checks out `dev`, and registers the built-in `env` resolver as the
/// default resolver.
///
/// # Errors
///
/// Returns `ProjectError::AlreadyExists` if `.ymir` is already there.
pub fn init(project: &Project) -> Result<()> {
    if project.ymir_path().exists() {
        return Err(ProjectError::AlreadyExists(project.ymir_path().to_path_buf()).into());
    }

    for dir in [
        project.stacks_dir(),
        project.stack_config_dir(),
        project.plugins_dir(),
    ] {
        std::fs::create_dir_all(&dir)?;
        debug!(path = %dir.display(), "created directory");
    }

    project.write_current_stack(constants::INIT_CURRENT_STACK, None)?;

    for &name in constants::INIT_STACKS {
        std::fs::write(project.stack_path(name), stack_template(name))?;
        let config = if name == constants::DEFAULT_STACK {
            default_config(project)
        } else {
            String::new()
        };
        std::fs::write(project.stack_config_path(name), config)?;
    }

    install_plugin_with_path(
        project,
        &format!("{}{}", constants::BUILTIN_PREFIX, constants::ENV_RESOLVER_ALIAS),
        constants::ENV_RESOLVER_ALIAS,
        &InstallOptions::default(),
    )?;

    info!(path = %project.ymir_path().display(), "initialized project");
    Ok(())
}

fn stack_template(name: &str) -> String {
    let description = if name == constants::DEFAULT_STACK {
        "Variables shared by every stack, overridden by the named stacks".to_string()
    } else {
        format!("Variables of the {} stack", name)
    };
    let doc = document(json!({
        (constants::SECTION_DESCRIBE): {"description": description}
    }));
    serialize_stack(&doc, None, &RequiredProps::default())
}

fn default_config(project: &Project) -> String {
    let name = project
        .root()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "ymir-project".to_string());

    let doc = document(json!({
        (constants::SECTION_DESCRIBE): {
            "name": name,
            "ymir_version": env!("CARGO_PKG_VERSION"),
            "project_version": "0.0.1"
        },
        (constants::SECTION_DEFAULT_RESOLVER): {"name": constants::ENV_RESOLVER_ALIAS},
        (constants::SECTION_FILE): {"path": ".", "name": constants::ENV_FILE}
    }));
    serialize_stack(&doc, None, &RequiredProps::for_stack_config(&doc))
}

fn document(value: Value) -> StackDocument {
    StackDocument::try_from(value).unwrap_or_default()
}
