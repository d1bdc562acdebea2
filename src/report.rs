//! The JSON document emitted by the discovery stage.

use serde::{Deserialize, Serialize};

use crate::discovery;
use crate::gap::{Gap, Severity, analyze_inventory};
use crate::inventory::Inventory;
use crate::roots::DiscoveryRoots;

/// Inventory, gaps and counts for one scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryReport {
    pub inventory: Inventory,
    pub gaps: Vec<Gap>,
    pub summary: Summary,
}

/// Aggregate counts over the inventory and gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub total_skills: usize,
    pub total_agents: usize,
    pub total_mcp_servers: usize,
    pub total_hook_scripts: usize,
    pub total_gaps: usize,
    pub high_severity_gaps: usize,
    pub skills_with_hooks: usize,
    pub agents_with_skills: usize,
}

impl Summary {
    #[must_use]
    pub fn compute(inventory: &Inventory, gaps: &[Gap]) -> Self {
        Self {
            total_skills: inventory.skills.len(),
            total_agents: inventory.agents.len(),
            total_mcp_servers: inventory.mcp_servers.len(),
            total_hook_scripts: inventory.hook_scripts.len(),
            total_gaps: gaps.len(),
            high_severity_gaps: gaps.iter().filter(|g| g.severity == Severity::High).count(),
            skills_with_hooks: inventory.skills.iter().filter(|s| s.has_hooks).count(),
            agents_with_skills: inventory.agents.iter().filter(|a| a.has_skills).count(),
        }
    }
}

impl DiscoveryReport {
    /// Analyzes `inventory` and wraps it with its gaps and summary.
    #[must_use]
    pub fn from_inventory(inventory: Inventory) -> Self {
        let gaps = analyze_inventory(&inventory);
        let summary = Summary::compute(&inventory, &gaps);
        Self {
            inventory,
            gaps,
            summary,
        }
    }

    /// Scans `roots` and builds the full report.
    #[must_use]
    pub fn discover(roots: &DiscoveryRoots) -> Self {
        Self::from_inventory(discovery::scan(roots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentInfo, HookScript, Skill};
    use crate::types::Scope;

    #[test]
    fn summary_counts_gaps_and_flags() {
        let inventory = Inventory::new(
            vec![
                Skill::unreadable(ComponentInfo::new("a", "a", Scope::Project)),
                Skill {
                    info: ComponentInfo::new("b", "b", Scope::Project),
                    has_hooks: true,
                    description: String::new(),
                },
            ],
            vec![],
            vec![],
            vec![],
            vec![HookScript {
                info: ComponentInfo::new("foo.sh", "/p/foo.sh", Scope::Project),
                executable: false,
            }],
        );

        let report = DiscoveryReport::from_inventory(inventory);
        assert_eq!(report.summary.total_skills, 2);
        assert_eq!(report.summary.skills_with_hooks, 1);
        assert_eq!(report.summary.total_hook_scripts, 1);
        assert_eq!(report.summary.total_gaps, 2);
        assert_eq!(report.summary.high_severity_gaps, 1);
    }

    #[test]
    fn report_has_top_level_sections() {
        let report = DiscoveryReport::from_inventory(Inventory::default());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["inventory"]["skills"].is_array());
        assert!(value["inventory"]["hooks_by_event"].is_object());
        assert!(value["gaps"].is_array());
        assert_eq!(value["summary"]["total_gaps"], 0);
    }
}
