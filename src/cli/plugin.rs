//! Plugin commands.

use crate::cli::output;
use crate::core::plugin::{
    install_plugin_with_path, installed_location, read_descriptor, DefaultLoader, InstallOptions,
    Loader,
};
use crate::core::project::Project;
use crate::error::Result;

pub fn install(
    project: &Project,
    location: &str,
    alias: &str,
    pk_name: Option<String>,
    install_cmd: Option<String>,
    is_global: bool,
) -> Result<()> {
    let opts = InstallOptions {
        pk_name,
        install_cmd,
        is_global,
    };
    let path = install_plugin_with_path(project, location, alias, &opts)?;
    output::success(&format!(
        "installed {} as {}",
        output::path(location),
        output::key(alias)
    ));
    output::kv("descriptor", output::path(path.display()));
    Ok(())
}

/// Every descriptor with its installed location; broken ones are flagged
/// instead of failing the listing.
pub fn list(project: &Project) -> Result<()> {
    let aliases = project.list_plugins()?;
    if aliases.is_empty() {
        output::dimmed("no plugins installed");
        return Ok(());
    }

    for alias in aliases {
        let location = read_descriptor(project, &alias)
            .and_then(|descriptor| installed_location(&alias, &descriptor));
        match location {
            Ok(location) => output::kv(&alias, location),
            Err(e) => output::warn(&format!("{}: {}", alias, e)),
        }
    }
    Ok(())
}

pub fn info(project: &Project, alias: &str) -> Result<()> {
    let descriptor = read_descriptor(project, alias)?;
    let location = installed_location(alias, &descriptor)?;
    let resolver = DefaultLoader::new(project.root()).load(alias, &location)?;
    let info = resolver.info()?;

    output::header(&info.name);
    output::kv("version", &info.version);
    output::kv("alias", &info.alias);
    output::kv("location", &location);
    if !info.install_path.is_empty() {
        output::kv("install path", &info.install_path);
    }
    if !info.required_config.is_empty() {
        output::kv("required config", info.required_config.join(", "));
    }
    Ok(())
}
