//! Hook configuration and remediation generation from a discovery report.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gap::{Gap, GapKind};
use crate::inventory::Inventory;
use crate::report::DiscoveryReport;

/// Directory the generated hooks append their log lines to.
pub const LOG_DIR: &str = ".claude/hooks/scripts/logs";

/// Matcher for file-modifying tools.
pub const FILE_WRITE_MATCHER: &str = "Write|Edit";

/// Matcher for subagent launches.
pub const TASK_MATCHER: &str = "Task";

/// Shown when the integrator's input cannot be used.
pub const USAGE: &str = "Usage: discover-ecosystem | generate-integrations";

/// A single action run by a hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HookAction {
    /// Run a shell command.
    Command { command: String },
}

/// Actions registered under one optional matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    pub hooks: Vec<HookAction>,
}

impl HookGroup {
    /// A group whose only action appends `message` to `log_file`.
    fn logging(matcher: Option<String>, message: &str, log_file: &str) -> Self {
        Self {
            matcher,
            hooks: vec![HookAction::Command {
                command: format!("echo \"{message} at $(date)\" >> {LOG_DIR}/{log_file}"),
            }],
        }
    }
}

/// Generated hook configuration, keyed by lifecycle event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(rename = "PreToolUse", default)]
    pub pre_tool_use: Vec<HookGroup>,
    #[serde(rename = "PostToolUse", default)]
    pub post_tool_use: Vec<HookGroup>,
    #[serde(rename = "SubagentStop", default)]
    pub subagent_stop: Vec<HookGroup>,
}

impl HooksConfig {
    /// Wraps the buckets as the `hooks` object of a settings file.
    #[must_use]
    pub fn to_settings(&self) -> serde_json::Value {
        serde_json::json!({ "hooks": self })
    }
}

/// Appends `group` unless a group with the same matcher is already there.
fn push_once(bucket: &mut Vec<HookGroup>, group: HookGroup) {
    if !bucket.iter().any(|g| g.matcher == group.matcher) {
        bucket.push(group);
    }
}

/// Builds the hook configuration for `inventory`.
///
/// - one `PreToolUse` group per MCP server (`mcp__<name>__.*`)
/// - one `PostToolUse` `Write|Edit` group if any skill lacks hooks
/// - one `PreToolUse` `Task` group if any agent exists
/// - one `SubagentStop` group, always
#[must_use]
pub fn generate_hooks_config(inventory: &Inventory) -> HooksConfig {
    let mut config = HooksConfig::default();

    for server in &inventory.mcp_servers {
        let name = &server.info.name;
        config.pre_tool_use.push(HookGroup::logging(
            Some(format!("mcp__{name}__.*")),
            &format!("[MCP] {name} tool invoked"),
            "mcp-usage.log",
        ));
    }

    if inventory.skills.iter().any(|s| !s.has_hooks) {
        push_once(
            &mut config.post_tool_use,
            HookGroup::logging(
                Some(FILE_WRITE_MATCHER.to_string()),
                "[Skill] File modification detected",
                "skill-activity.log",
            ),
        );
    }

    if !inventory.agents.is_empty() {
        push_once(
            &mut config.pre_tool_use,
            HookGroup::logging(
                Some(TASK_MATCHER.to_string()),
                "[Agent] Subagent launched",
                "agent-activity.log",
            ),
        );
    }

    config.subagent_stop.push(HookGroup::logging(
        None,
        "[Agent] Subagent completed",
        "agent-activity.log",
    ));

    config
}

/// Shell lines addressing `gaps`, in gap order.
///
/// Only a missing execute bit is fixed automatically; skill and agent
/// gaps get a `#` reminder line and MCP gaps are covered by the
/// generated config instead.
#[must_use]
pub fn remediation_commands(gaps: &[Gap]) -> Vec<String> {
    gaps.iter()
        .filter_map(|gap| match gap.kind {
            GapKind::ScriptNotExecutable => {
                let target = gap
                    .path
                    .as_ref()
                    .map_or_else(|| gap.component.clone(), |p| p.display().to_string());
                Some(format!("chmod +x {target}"))
            }
            GapKind::AgentNoSkills => Some(format!(
                "# manual: add a skills field to the {} agent",
                gap.component
            )),
            GapKind::SkillNoHooks => Some(format!(
                "# manual: add hooks to the {} skill",
                gap.component
            )),
            GapKind::McpNoHooks => None,
        })
        .collect()
}

/// The JSON document emitted by the integration stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationReport {
    pub generated_hooks_config: HooksConfig,
    pub remediation_commands: Vec<String>,
    pub summary: IntegrationSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSummary {
    pub mcp_hooks_generated: usize,
    pub gaps_with_remediations: usize,
}

/// Builds the integration report for a discovery report.
#[must_use]
pub fn integrate(report: &DiscoveryReport) -> IntegrationReport {
    let remediation = remediation_commands(&report.gaps);
    let gaps_with_remediations = report
        .gaps
        .iter()
        .filter(|g| g.kind != GapKind::McpNoHooks)
        .count();

    IntegrationReport {
        generated_hooks_config: generate_hooks_config(&report.inventory),
        remediation_commands: remediation,
        summary: IntegrationSummary {
            mcp_hooks_generated: report.inventory.mcp_servers.len(),
            gaps_with_remediations,
        },
    }
}

/// Parses a discovery report and integrates it.
///
/// # Errors
///
/// Returns [`Error::Json`] if `input` is not JSON, or
/// [`Error::InvalidInput`] if it is JSON but not a discovery report.
pub fn integrate_str(input: &str) -> Result<IntegrationReport> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    if !value.is_object() {
        return Err(Error::InvalidInput(
            "expected a discovery report object".to_string(),
        ));
    }
    let report: DiscoveryReport =
        serde_json::from_value(value).map_err(|e| Error::InvalidInput(e.to_string()))?;
    Ok(integrate(&report))
}
