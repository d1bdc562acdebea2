//! Discovery, gap analysis and hook integration for a Claude Code
//! ecosystem of skills, agents, MCP servers and hooks.
//!
//! The crate backs a two-stage pipeline:
//!
//! ```text
//! discover-ecosystem | generate-integrations
//! ```
//!
//! The first stage scans the personal (`~/.claude`) and project
//! (`.claude/`) roots and prints a [`DiscoveryReport`]; the second reads
//! that report and prints an [`IntegrationReport`] with a generated hook
//! configuration and remediation commands.
//!
//! ## Modules
//!
//! - [`roots`] - Personal and project root resolution
//! - [`frontmatter`] - Permissive frontmatter scanning
//! - [`component`] - Discovered component records
//! - [`discovery`] - Filesystem discovery
//! - [`inventory`] - Scan aggregate
//! - [`gap`] - Integration gap analysis
//! - [`report`] - Discovery stage output
//! - [`integrate`] - Hook config and remediation generation
//! - [`clean`] - Frontmatter allow-list cleaning
//! - [`validation`] - Skill metadata validation

pub mod clean;
pub mod component;
pub mod discovery;
pub mod error;
pub mod frontmatter;
pub mod gap;
pub mod integrate;
pub mod inventory;
pub mod logging;
pub mod report;
pub mod roots;
pub mod types;
pub mod validation;

pub use component::{
    Agent, Component, ComponentInfo, HookRegistration, HookScript, McpServer, Skill,
};
pub use discovery::scan;
pub use error::{Error, Result};
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use gap::{Gap, GapKind, Severity, analyze_gaps};
pub use integrate::{HooksConfig, IntegrationReport, integrate, integrate_str};
pub use inventory::Inventory;
pub use report::{DiscoveryReport, Summary};
pub use roots::DiscoveryRoots;
pub use types::{LifecycleEvent, ResourceKind, Scope};
pub use validation::{ToolEvent, ValidationIssue, validate_skill_content};
