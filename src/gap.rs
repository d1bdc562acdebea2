//! Integration gap analysis.
//!
//! Four independent rules, each firing at most once per component:
//!
//! | type                    | fires when                                   | severity |
//! |-------------------------|----------------------------------------------|----------|
//! | `skill_no_hooks`        | skill text has no `hooks:`                   | low      |
//! | `agent_no_skills`       | agent declares no skills                     | medium   |
//! | `mcp_no_hooks`          | no matcher contains `mcp__<name>__`          | low      |
//! | `script_not_executable` | hook script lacks the execute bit            | high     |

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::component::{Agent, Component, HookRegistration, HookScript, McpServer, Skill};
use crate::inventory::Inventory;

/// How urgently a gap should be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// The rule that produced a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    SkillNoHooks,
    AgentNoSkills,
    McpNoHooks,
    ScriptNotExecutable,
}

impl GapKind {
    /// Fixed severity for this kind of gap.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::SkillNoHooks | Self::McpNoHooks => Severity::Low,
            Self::AgentNoSkills => Severity::Medium,
            Self::ScriptNotExecutable => Severity::High,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SkillNoHooks => "skill_no_hooks",
            Self::AgentNoSkills => "agent_no_skills",
            Self::McpNoHooks => "mcp_no_hooks",
            Self::ScriptNotExecutable => "script_not_executable",
        }
    }
}

impl fmt::Display for GapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A missing integration involving exactly one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    #[serde(rename = "type")]
    pub kind: GapKind,
    /// Name of the component the gap is about.
    pub component: String,
    pub severity: Severity,
    pub recommendation: String,
    /// Location of the same component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Gap {
    /// Builds a gap for `component`, filling severity and recommendation
    /// from `kind`.
    #[must_use]
    pub fn new(kind: GapKind, component: Component<'_>) -> Self {
        let name = component.name();
        let recommendation = match (kind, component) {
            (GapKind::SkillNoHooks, _) => {
                format!("Add PreToolUse/PostToolUse hooks to {name} skill")
            }
            (GapKind::AgentNoSkills, _) => format!("Add skills field to {name} agent"),
            (GapKind::McpNoHooks, Component::McpServer(server)) => {
                format!("Add PreToolUse hook for {}", server.tools_pattern)
            }
            (GapKind::McpNoHooks, _) => {
                format!("Add PreToolUse hook for {}", crate::component::tools_pattern(name))
            }
            (GapKind::ScriptNotExecutable, _) => {
                format!("chmod +x {}", component.path().display())
            }
        };

        Self {
            kind,
            component: name.to_string(),
            severity: kind.severity(),
            recommendation,
            path: Some(component.path().to_path_buf()),
        }
    }
}

/// Applies every rule to a scanned inventory.
#[must_use]
pub fn analyze_inventory(inventory: &Inventory) -> Vec<Gap> {
    let matchers: Vec<&str> = inventory.matchers().collect();
    apply_rules(
        &inventory.skills,
        &inventory.agents,
        &inventory.mcp_servers,
        &matchers,
        &inventory.hook_scripts,
    )
}

/// Applies every rule, in rule order, and returns the gaps found.
#[must_use]
pub fn analyze_gaps(
    skills: &[Skill],
    agents: &[Agent],
    mcp_servers: &[McpServer],
    registrations: &[HookRegistration],
    hook_scripts: &[HookScript],
) -> Vec<Gap> {
    let matchers: Vec<&str> = registrations
        .iter()
        .filter_map(|r| r.matcher.as_deref())
        .collect();
    apply_rules(skills, agents, mcp_servers, &matchers, hook_scripts)
}

fn apply_rules(
    skills: &[Skill],
    agents: &[Agent],
    mcp_servers: &[McpServer],
    matchers: &[&str],
    hook_scripts: &[HookScript],
) -> Vec<Gap> {
    let mut gaps = Vec::new();

    gaps.extend(
        skills
            .iter()
            .filter(|s| !s.has_hooks)
            .map(|s| Gap::new(GapKind::SkillNoHooks, Component::Skill(s))),
    );

    gaps.extend(
        agents
            .iter()
            .filter(|a| !a.has_skills)
            .map(|a| Gap::new(GapKind::AgentNoSkills, Component::Agent(a))),
    );

    gaps.extend(
        mcp_servers
            .iter()
            .filter(|server| {
                let prefix = server.tool_prefix();
                !matchers.iter().any(|m| m.contains(&prefix))
            })
            .map(|s| Gap::new(GapKind::McpNoHooks, Component::McpServer(s))),
    );

    gaps.extend(
        hook_scripts
            .iter()
            .filter(|s| !s.executable)
            .map(|s| Gap::new(GapKind::ScriptNotExecutable, Component::HookScript(s))),
    );

    gaps
}
