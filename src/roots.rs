//! Filesystem roots scanned during discovery.
//!
//! Claude Code keeps its configuration in:
//! - **Personal**: `$CLAUDE_CONFIG_DIR` or `~/.claude/`
//! - **Project**: `.claude/` in the project root, plus `.mcp.json` at the
//!   project root itself
//!
//! Discovery never reads these locations from process state directly.
//! A [`DiscoveryRoots`] value is built once (usually by a binary from its
//! flags and environment) and passed down, so tests can point every
//! lookup at a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{ResourceKind, Scope};

/// Environment variable for the personal config directory override.
pub const CLAUDE_CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

/// Environment variable naming the project directory.
pub const CLAUDE_PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Name of the per-root configuration directory.
const CONFIG_DIR_NAME: &str = ".claude";

/// File holding MCP server definitions.
const MCP_FILE_NAME: &str = ".mcp.json";

/// File holding hook registrations.
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Resolved personal and project roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRoots {
    personal_root: PathBuf,
    project_dir: PathBuf,
}

impl DiscoveryRoots {
    /// Creates roots from a home directory and a project directory.
    ///
    /// The personal root is `<home>/.claude`.
    #[must_use]
    pub fn new(home_dir: impl AsRef<Path>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            personal_root: home_dir.as_ref().join(CONFIG_DIR_NAME),
            project_dir: project_dir.into(),
        }
    }

    /// Creates roots with an explicit personal configuration root.
    #[must_use]
    pub fn with_personal_root(
        personal_root: impl Into<PathBuf>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            personal_root: personal_root.into(),
            project_dir: project_dir.into(),
        }
    }

    /// Resolves roots the way Claude Code does.
    ///
    /// An absolute `config_override` (the value of `CLAUDE_CONFIG_DIR`)
    /// becomes the personal root; a relative one is ignored and the
    /// personal root falls back to `<home>/.claude`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if neither an absolute override nor a
    /// home directory is available.
    pub fn resolve(
        home_dir: Option<PathBuf>,
        config_override: Option<&str>,
        project_dir: PathBuf,
    ) -> Result<Self> {
        if let Some(dir) = config_override {
            let path = PathBuf::from(dir);
            if path.is_absolute() {
                return Ok(Self::with_personal_root(path, project_dir));
            }
        }

        let home = home_dir.ok_or_else(|| Error::NotFound("home directory".into()))?;
        Ok(Self::new(home, project_dir))
    }

    /// The personal configuration root (e.g., `~/.claude`).
    #[must_use]
    pub fn personal_root(&self) -> &Path {
        &self.personal_root
    }

    /// The project directory.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the configuration directory for the given scope.
    #[must_use]
    pub fn config_dir(&self, scope: Scope) -> PathBuf {
        match scope {
            Scope::Personal => self.personal_root.clone(),
            Scope::Project => self.project_dir.join(CONFIG_DIR_NAME),
        }
    }

    /// Returns the directory holding `kind` for the given scope.
    #[must_use]
    pub fn resource_dir(&self, kind: ResourceKind, scope: Scope) -> PathBuf {
        self.config_dir(scope).join(kind.relative_dir())
    }

    /// Skills directory: `<root>/skills/`.
    #[must_use]
    pub fn skills_dir(&self, scope: Scope) -> PathBuf {
        self.resource_dir(ResourceKind::Skills, scope)
    }

    /// Agents directory: `<root>/agents/`.
    #[must_use]
    pub fn agents_dir(&self, scope: Scope) -> PathBuf {
        self.resource_dir(ResourceKind::Agents, scope)
    }

    /// Hook scripts directory: `<root>/hooks/scripts/`.
    #[must_use]
    pub fn hook_scripts_dir(&self, scope: Scope) -> PathBuf {
        self.resource_dir(ResourceKind::HookScripts, scope)
    }

    /// Settings file holding hook registrations: `<root>/settings.json`.
    #[must_use]
    pub fn settings_file(&self, scope: Scope) -> PathBuf {
        self.config_dir(scope).join(SETTINGS_FILE_NAME)
    }

    /// MCP configuration file.
    ///
    /// - **Personal**: `~/.claude/.mcp.json`
    /// - **Project**: `.mcp.json` at the project root (not inside `.claude/`)
    #[must_use]
    pub fn mcp_file(&self, scope: Scope) -> PathBuf {
        match scope {
            Scope::Personal => self.personal_root.join(MCP_FILE_NAME),
            Scope::Project => self.project_dir.join(MCP_FILE_NAME),
        }
    }

    /// Resolves `path_for` in every scope, personal first, dropping any
    /// path that names a location already returned.
    ///
    /// Paths are compared after canonicalization when they exist, so
    /// `--project-dir .` run from the home directory still collapses onto
    /// the personal root.
    pub fn distinct_paths(&self, path_for: impl Fn(&Self, Scope) -> PathBuf) -> Vec<PathBuf> {
        let mut seen: Vec<PathBuf> = Vec::with_capacity(Scope::ALL.len());
        let mut paths = Vec::with_capacity(Scope::ALL.len());
        for &scope in Scope::ALL {
            let path = path_for(self, scope);
            let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.contains(&key) {
                debug!(path = %path.display(), scope = %scope, "location already scanned");
                continue;
            }
            seen.push(key);
            paths.push(path);
        }
        paths
    }

    /// Classifies a discovered path against these roots.
    #[must_use]
    pub fn scope_of(&self, path: &Path) -> Scope {
        Scope::classify(path, &self.personal_root)
    }
}
