//! Entity structs for the dashboard collections.
//!
//! This module defines the record types held by the domain store, the
//! name-keyed reference newtypes used between them, and the input structs
//! accepted by the create operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// Reference to a team member by name.
///
/// Names act as informal foreign keys: nothing validates that a reference
/// resolves to an existing member, and renaming a member orphans every
/// reference to the old name. Accepted limitation, not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberRef(pub String);

impl MemberRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemberRef {
    fn from(name: &str) -> Self {
        MemberRef(name.to_string())
    }
}

/// Reference to a project by name. Same non-enforcement policy as [`MemberRef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRef(pub String);

impl ProjectRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectRef {
    fn from(name: &str) -> Self {
        ProjectRef(name.to_string())
    }
}

/// A project with a progress figure and a named team.
///
/// `progress` is a free-standing 0..=100 figure; it tracks `status` only
/// loosely and no linkage between the two is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress: u8,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub manager: MemberRef,
    pub team: Vec<MemberRef>,
}

/// A single work item assigned to a team member within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: MemberRef,
    pub project: ProjectRef,
    pub due_date: NaiveDate,
    pub completed: bool,
}

/// A team member. `name` is the identity other records reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub email: String,
    pub avatar: String,
    pub department: String,
    pub tasks_completed: u32,
    pub current_tasks: u32,
}

/// One step of a workflow template. Order within the workflow is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
    pub completed: bool,
}

/// A reusable process template with an ordered step sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub steps: Vec<WorkflowStep>,
    pub active_instances: u32,
}

/// An append-only audit trail entry.
///
/// `timestamp` is display text ("2 hours ago"), not a clock value; insertion
/// order is the de facto recency order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub timestamp: String,
    pub icon: String,
}

/// The current login session. At most one user is logged in at a time.
///
/// The full member record is snapshotted at login so restoring a session
/// needs no lookup; a later rename of the member is not reflected until the
/// next login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub current_user: Option<TeamMember>,
}

/// Fields accepted when creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub manager: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Fields accepted when creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub project: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

/// Fields accepted when adding a team member.
#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
}

/// Fields accepted when creating a workflow. `steps_text` is newline
/// delimited, one step per line; blank lines are dropped.
#[derive(Debug, Clone)]
pub struct NewWorkflow {
    pub name: String,
    pub description: String,
    pub steps_text: String,
}
