//! `.ymir` project layout.
//!
//! ```text
//! <root>/.ymir/
//! ├── current_stack        # "[dev]: ./stacks/dev"
//! ├── stacks/<name>
//! ├── stack-config/<name>
//! └── plugins/<alias>
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::types::StackName;
use crate::error::{ProjectError, Result};

/// A project root and its `.ymir` folder.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    ymir: PathBuf,
}

impl Project {
    /// Project rooted at `root`; does not touch the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let ymir = root.join(constants::YMIR_DIR);
        Self { root, ymir }
    }

    /// Pick the project root: an absolute path wins, then `cwd` + relative,
    /// then `cwd` itself.
    pub fn locate(cwd: &Path, relative: Option<&Path>, absolute: Option<&Path>) -> Self {
        if let Some(absolute) = absolute {
            return Self::new(absolute);
        }
        match relative {
            Some(relative) => Self::new(cwd.join(relative)),
            None => Self::new(cwd),
        }
    }

    /// Open an existing project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` if `.ymir` is missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let project = Self::new(root);
        if !project.exists() {
            return Err(ProjectError::NotFound(project.ymir).into());
        }
        debug!(path = %project.ymir.display(), "opened project");
        Ok(project)
    }

    pub fn exists(&self) -> bool {
        self.ymir.is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ymir_path(&self) -> &Path {
        &self.ymir
    }

    pub fn stacks_dir(&self) -> PathBuf {
        self.ymir.join(constants::STACKS_DIR)
    }

    pub fn stack_config_dir(&self) -> PathBuf {
        self.ymir.join(constants::STACK_CONFIG_DIR)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.ymir.join(constants::PLUGINS_DIR)
    }

    pub fn stack_path(&self, name: &str) -> PathBuf {
        self.stacks_dir().join(name)
    }

    pub fn stack_config_path(&self, name: &str) -> PathBuf {
        self.stack_config_dir().join(name)
    }

    pub fn plugin_path(&self, alias: &str) -> PathBuf {
        plugin_path_in(&self.ymir, alias)
    }

    pub fn current_stack_path(&self) -> PathBuf {
        self.ymir.join(constants::CURRENT_STACK_FILE)
    }

    pub fn stack_exists(&self, name: &str) -> bool {
        self.stack_path(name).is_file()
    }

    /// Names of all stack files, sorted.
    pub fn list_stacks(&self) -> Result<Vec<StackName>> {
        list_files(&self.stacks_dir())
    }

    /// Aliases of all plugin descriptors, sorted.
    pub fn list_plugins(&self) -> Result<Vec<String>> {
        list_files(&self.plugins_dir())
    }

    /// Checked out stack name and the absolute path of its file.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::InvalidCurrentStack` if the file is not of
    /// the form `[<name>]: <path>`.
    pub fn current_stack(&self) -> Result<(StackName, PathBuf)> {
        let path = self.current_stack_path();
        let content = std::fs::read_to_string(&path)?;
        let (name, location) = parse_current_stack(&content).ok_or_else(|| {
            ProjectError::InvalidCurrentStack {
                path: path.clone(),
                reason: format!("expected \"[<name>]: <path>\", got {:?}", content.trim()),
            }
        })?;
        let location = location.strip_prefix("./").unwrap_or(location);
        Ok((name.to_string(), self.ymir.join(location)))
    }

    pub fn current_stack_name(&self) -> Result<StackName> {
        self.current_stack().map(|(name, _)| name)
    }

    /// Record `name` as the checked out stack.
    pub fn write_current_stack(&self, name: &str, location: Option<&str>) -> Result<()> {
        let location = location
            .map(str::to_string)
            .unwrap_or_else(|| format!("./{}/{}", constants::STACKS_DIR, name));
        std::fs::write(self.current_stack_path(), format!("[{}]: {}", name, location))?;
        Ok(())
    }
}

/// Descriptor path of `alias` under the `.ymir` folder at `ymir`.
pub fn plugin_path_in(ymir: &Path, alias: &str) -> PathBuf {
    ymir.join(constants::PLUGINS_DIR).join(alias)
}

fn parse_current_stack(content: &str) -> Option<(&str, &str)> {
    let (name, location) = content.split_once(':')?;
    let name = name.trim().strip_prefix('[')?.strip_suffix(']')?;
    let location = location.trim();
    if name.is_empty() || location.is_empty() {
        return None;
    }
    Some((name, location))
}

fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}
