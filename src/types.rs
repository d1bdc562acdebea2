//! Core type definitions shared by discovery, gap analysis and integration.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a component was discovered.
///
/// A component found under the personal configuration root
/// (e.g., `~/.claude/`) is always [`Scope::Personal`]; anything else
/// belongs to the project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// User-level configuration under the home directory.
    Personal,
    /// Project-local configuration (e.g., `.claude/` in the project root).
    #[default]
    Project,
}

impl Scope {
    /// Both scopes, in the order discovery visits them.
    pub const ALL: &'static [Self] = &[Self::Personal, Self::Project];

    /// Classifies `path` relative to the personal configuration root.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use ecosystem_locate::Scope;
    ///
    /// let personal = Path::new("/home/me/.claude");
    /// assert_eq!(Scope::classify(Path::new("/home/me/.claude/skills/a"), personal), Scope::Personal);
    /// assert_eq!(Scope::classify(Path::new("/home/me/repo/.claude/skills/a"), personal), Scope::Project);
    /// ```
    #[must_use]
    pub fn classify(path: &Path, personal_root: &Path) -> Self {
        if path.starts_with(personal_root) {
            Self::Personal
        } else {
            Self::Project
        }
    }

    /// Returns the lowercase name used in JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle events a hook can be registered for.
///
/// Registrations for any event outside this set are ignored during
/// discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Before a tool call runs.
    PreToolUse,
    /// After a tool call completes.
    PostToolUse,
    /// When the main agent stops.
    Stop,
    /// When a subagent finishes.
    SubagentStop,
    /// When a subagent is launched.
    SubagentStart,
    /// When a session begins.
    SessionStart,
    /// When a session ends.
    SessionEnd,
    /// When the user submits a prompt.
    UserPromptSubmit,
}

impl LifecycleEvent {
    /// All known events, in report order.
    pub const ALL: &'static [Self] = &[
        Self::PreToolUse,
        Self::PostToolUse,
        Self::Stop,
        Self::SubagentStop,
        Self::SubagentStart,
        Self::SessionStart,
        Self::SessionEnd,
        Self::UserPromptSubmit,
    ];

    /// Returns the event name as it appears in settings files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::Stop => "Stop",
            Self::SubagentStop => "SubagentStop",
            Self::SubagentStart => "SubagentStart",
            Self::SessionStart => "SessionStart",
            Self::SessionEnd => "SessionEnd",
            Self::UserPromptSubmit => "UserPromptSubmit",
        }
    }

    /// Looks up an event by its settings-file name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.as_str() == name)
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of resources found under a configuration root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// `skills/<name>/SKILL.md`
    Skills,
    /// `agents/<name>.md`
    Agents,
    /// `hooks/scripts/*`
    HookScripts,
}

impl ResourceKind {
    /// Path of the resource directory relative to a configuration root.
    #[must_use]
    pub fn relative_dir(self) -> PathBuf {
        match self {
            Self::Skills => PathBuf::from("skills"),
            Self::Agents => PathBuf::from("agents"),
            Self::HookScripts => Path::new("hooks").join("scripts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_personal_root_is_personal() {
        let root = Path::new("/home/u/.claude");
        assert_eq!(
            Scope::classify(&root.join("agents/a.md"), root),
            Scope::Personal
        );
    }

    #[test]
    fn classify_project_under_home_is_project() {
        let root = Path::new("/home/u/.claude");
        let path = Path::new("/home/u/code/app/.claude/agents/a.md");
        assert_eq!(Scope::classify(path, root), Scope::Project);
    }

    #[test]
    fn classify_relative_path_is_project() {
        let root = Path::new("/home/u/.claude");
        assert_eq!(
            Scope::classify(Path::new(".claude/skills/x"), root),
            Scope::Project
        );
    }

    #[test]
    fn scope_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Scope::Personal).unwrap(),
            "\"personal\""
        );
        assert_eq!(
            serde_json::from_str::<Scope>("\"project\"").unwrap(),
            Scope::Project
        );
    }

    #[test]
    fn lifecycle_event_lookup() {
        assert_eq!(
            LifecycleEvent::from_name("SubagentStop"),
            Some(LifecycleEvent::SubagentStop)
        );
        assert_eq!(LifecycleEvent::from_name("Notification"), None);
        assert_eq!(LifecycleEvent::ALL.len(), 8);
    }

    #[test]
    fn lifecycle_event_names_round_trip() {
        for event in LifecycleEvent::ALL {
            assert_eq!(LifecycleEvent::from_name(event.as_str()), Some(*event));
        }
    }

    #[test]
    fn hook_scripts_dir_is_nested() {
        assert_eq!(
            ResourceKind::HookScripts.relative_dir(),
            Path::new("hooks").join("scripts")
        );
    }
}
