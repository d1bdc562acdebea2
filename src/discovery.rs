//! Component discovery across the personal and project roots.
//!
//! Every function here tolerates a broken filesystem: a missing root
//! contributes nothing, an unreadable definition file is recorded with
//! default values, and a malformed JSON file is skipped. Nothing in this
//! module returns an error.
//!
//! Roots are visited personal first, then project. Within a root,
//! entries are sorted by file name, so scanning an unchanged tree twice
//! yields identical inventories. A location shared by both scopes (a
//! project rooted at the home directory) is scanned once, as personal.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::component::{Agent, ComponentInfo, HookRegistration, HookScript, McpServer, Skill};
use crate::inventory::Inventory;
use crate::roots::DiscoveryRoots;
use crate::types::LifecycleEvent;

/// File name marking a skill directory.
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Rules file that lives next to agents and scripts but is neither.
pub const RULES_FILE_NAME: &str = "CLAUDE.md";

/// Runs every discovery pass and assembles an [`Inventory`].
#[must_use]
pub fn scan(roots: &DiscoveryRoots) -> Inventory {
    Inventory::new(
        discover_skills(roots),
        discover_agents(roots),
        discover_mcp_servers(roots),
        discover_hook_registrations(roots),
        discover_hook_scripts(roots),
    )
}

/// Finds every `<skills>/<name>/SKILL.md` under both roots.
#[must_use]
pub fn discover_skills(roots: &DiscoveryRoots) -> Vec<Skill> {
    let mut skills = Vec::new();

    for skills_dir in roots.distinct_paths(DiscoveryRoots::skills_dir) {
        for dir in sorted_entries(&skills_dir) {
            if !dir.is_dir() {
                continue;
            }
            let skill_file = dir.join(SKILL_FILE_NAME);
            if !skill_file.exists() {
                continue;
            }

            let info = ComponentInfo::new(
                file_name(&dir),
                &skill_file,
                roots.scope_of(&skill_file),
            );
            let skill = match fs::read_to_string(&skill_file) {
                Ok(content) => Skill::from_content(info, &content),
                Err(e) => {
                    warn!(path = %skill_file.display(), error = %e, "unreadable skill file");
                    Skill::unreadable(info)
                }
            };
            debug!(name = %skill.info.name, has_hooks = skill.has_hooks, "discovered skill");
            skills.push(skill);
        }
    }

    skills
}

/// Finds every `*.md` directly under both agents directories,
/// except `CLAUDE.md`.
#[must_use]
pub fn discover_agents(roots: &DiscoveryRoots) -> Vec<Agent> {
    let mut agents = Vec::new();

    for agents_dir in roots.distinct_paths(DiscoveryRoots::agents_dir) {
        for path in sorted_entries(&agents_dir) {
            if !path.is_file() || !has_extension(&path, "md") || file_name(&path) == RULES_FILE_NAME
            {
                continue;
            }

            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let info = ComponentInfo::new(name, &path, roots.scope_of(&path));
            let agent = match fs::read_to_string(&path) {
                Ok(content) => Agent::from_content(info, &content),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable agent file");
                    Agent::unreadable(info)
                }
            };
            debug!(name = %agent.info.name, has_skills = agent.has_skills, "discovered agent");
            agents.push(agent);
        }
    }

    agents
}

/// Reads the `mcpServers` object of both MCP configuration files.
#[must_use]
pub fn discover_mcp_servers(roots: &DiscoveryRoots) -> Vec<McpServer> {
    let mut servers = Vec::new();

    for mcp_file in roots.distinct_paths(DiscoveryRoots::mcp_file) {
        let Some(config) = read_json(&mcp_file) else {
            continue;
        };
        let Some(entries) = config.get("mcpServers").and_then(|v| v.as_object()) else {
            debug!(path = %mcp_file.display(), "no mcpServers object");
            continue;
        };

        let scope = roots.scope_of(&mcp_file);
        for (name, details) in entries {
            let command = details
                .get("command")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            debug!(name = %name, source = %mcp_file.display(), "discovered MCP server");
            servers.push(McpServer::new(
                ComponentInfo::new(name.as_str(), &mcp_file, scope),
                command,
            ));
        }
    }

    servers
}

/// Collects handler objects registered under `hooks` in both settings
/// files. Events outside [`LifecycleEvent::ALL`] are ignored.
#[must_use]
pub fn discover_hook_registrations(roots: &DiscoveryRoots) -> Vec<HookRegistration> {
    let mut registrations = Vec::new();

    for settings_file in roots.distinct_paths(DiscoveryRoots::settings_file) {
        let Some(config) = read_json(&settings_file) else {
            continue;
        };
        let Some(hooks) = config.get("hooks").and_then(|v| v.as_object()) else {
            continue;
        };

        let scope = roots.scope_of(&settings_file);
        for (event_name, handlers) in hooks {
            let Some(event) = LifecycleEvent::from_name(event_name) else {
                debug!(event = %event_name, "ignoring unknown hook event");
                continue;
            };
            let Some(handlers) = handlers.as_array() else {
                warn!(event = %event_name, path = %settings_file.display(), "hook handlers are not a list");
                continue;
            };
            for handler in handlers {
                registrations.push(HookRegistration::new(
                    event,
                    &settings_file,
                    scope,
                    handler.clone(),
                ));
            }
        }
    }

    registrations
}

/// Lists regular files directly under both hook script directories,
/// except `CLAUDE.md`.
#[must_use]
pub fn discover_hook_scripts(roots: &DiscoveryRoots) -> Vec<HookScript> {
    let mut scripts = Vec::new();

    for scripts_dir in roots.distinct_paths(DiscoveryRoots::hook_scripts_dir) {
        for path in sorted_entries(&scripts_dir) {
            if !path.is_file() || file_name(&path) == RULES_FILE_NAME {
                continue;
            }
            let executable = is_executable(&path);
            debug!(path = %path.display(), executable, "discovered hook script");
            scripts.push(HookScript {
                info: ComponentInfo::new(file_name(&path), &path, roots.scope_of(&path)),
                executable,
            });
        }
    }

    scripts
}

/// Returns `true` if any execute permission bit is set.
#[cfg(unix)]
#[must_use]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Returns `true` if the file exists; Windows has no execute bit.
#[cfg(not(unix))]
#[must_use]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Entries of `dir` sorted by file name. Missing or unreadable
/// directories yield nothing.
fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "skipping root");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    paths
}

/// Reads and parses a JSON file, or `None` if it is absent or broken.
fn read_json(path: &Path) -> Option<serde_json::Value> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable config file");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping malformed JSON");
            None
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ext)
}
