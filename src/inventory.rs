//! The aggregate produced by a scan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::{Agent, HookRegistration, HookScript, McpServer, Skill};
use crate::types::LifecycleEvent;

/// Everything discovered in one scan.
///
/// Serializes to the `inventory` object of the discovery report. Hook
/// registrations are summarized as a per-event count under
/// `hooks_by_event`; the registrations themselves are only available on
/// an inventory built by a scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub skills: Vec<Skill>,
    pub agents: Vec<Agent>,
    pub mcp_servers: Vec<McpServer>,
    /// Registration count for every known lifecycle event.
    pub hooks_by_event: BTreeMap<LifecycleEvent, usize>,
    pub hook_scripts: Vec<HookScript>,
    #[serde(skip)]
    registrations: Vec<HookRegistration>,
}

impl Inventory {
    /// Assembles an inventory, counting registrations per event.
    #[must_use]
    pub fn new(
        skills: Vec<Skill>,
        agents: Vec<Agent>,
        mcp_servers: Vec<McpServer>,
        registrations: Vec<HookRegistration>,
        hook_scripts: Vec<HookScript>,
    ) -> Self {
        let mut hooks_by_event: BTreeMap<LifecycleEvent, usize> =
            LifecycleEvent::ALL.iter().map(|&e| (e, 0)).collect();
        for registration in &registrations {
            *hooks_by_event.entry(registration.event).or_default() += 1;
        }

        Self {
            skills,
            agents,
            mcp_servers,
            hooks_by_event,
            hook_scripts,
            registrations,
        }
    }

    /// Hook registrations found by the scan, in discovery order.
    #[must_use]
    pub fn registrations(&self) -> &[HookRegistration] {
        &self.registrations
    }

    /// Every matcher pattern registered under any event.
    pub fn matchers(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().filter_map(|r| r.matcher.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::types::Scope;

    fn registration(event: LifecycleEvent, matcher: Option<&str>) -> HookRegistration {
        let handler = match matcher {
            Some(m) => serde_json::json!({ "matcher": m }),
            None => serde_json::json!({}),
        };
        HookRegistration::new(event, Path::new("settings.json"), Scope::Project, handler)
    }

    #[test]
    fn counts_every_known_event() {
        let inventory = Inventory::new(
            vec![],
            vec![],
            vec![],
            vec![
                registration(LifecycleEvent::PreToolUse, Some("Bash")),
                registration(LifecycleEvent::PreToolUse, None),
                registration(LifecycleEvent::Stop, None),
            ],
            vec![],
        );

        assert_eq!(inventory.hooks_by_event.len(), LifecycleEvent::ALL.len());
        assert_eq!(inventory.hooks_by_event[&LifecycleEvent::PreToolUse], 2);
        assert_eq!(inventory.hooks_by_event[&LifecycleEvent::Stop], 1);
        assert_eq!(inventory.hooks_by_event[&LifecycleEvent::SessionEnd], 0);
        assert_eq!(inventory.registrations().len(), 3);
    }

    #[test]
    fn matchers_skip_registrations_without_one() {
        let inventory = Inventory::new(
            vec![],
            vec![],
            vec![],
            vec![
                registration(LifecycleEvent::PreToolUse, Some("mcp__db__.*")),
                registration(LifecycleEvent::SubagentStop, None),
            ],
            vec![],
        );
        assert_eq!(inventory.matchers().collect::<Vec<_>>(), vec!["mcp__db__.*"]);
    }

    #[test]
    fn hooks_by_event_serializes_in_event_order() {
        let inventory = Inventory::new(vec![], vec![], vec![], vec![], vec![]);
        let json = serde_json::to_string(&inventory).unwrap();
        let pre = json.find("\"PreToolUse\"").unwrap();
        let prompt = json.find("\"UserPromptSubmit\"").unwrap();
        assert!(pre < prompt);
        assert!(!json.contains("registrations"));
    }

    #[test]
    fn deserializes_partial_document() {
        let inventory: Inventory =
            serde_json::from_str(r#"{"skills": [{"name": "a", "has_hooks": true}]}"#).unwrap();
        assert_eq!(inventory.skills.len(), 1);
        assert!(inventory.skills[0].has_hooks);
        assert!(inventory.agents.is_empty());
    }
}
