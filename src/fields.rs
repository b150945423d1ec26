//! Enumerations and field types for the dashboard domain.
//!
//! This module defines the structured value types used across projects, tasks
//! and the section navigation: project/task status, task priority, and the
//! named dashboard sections.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

/// Workflow status of a task.
///
/// `Completed` is coupled to the `completed` flag only through the toggle
/// operation; direct status edits do not maintain the linkage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
}

/// Priority classification for tasks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Named dashboard sections a view can be derived for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Dashboard,
    Projects,
    Tasks,
    Team,
    Workflows,
    Analytics,
}

/// Format a project status for display.
pub fn format_project_status(s: ProjectStatus) -> &'static str {
    match s {
        ProjectStatus::Active => "active",
        ProjectStatus::Completed => "completed",
        ProjectStatus::OnHold => "on-hold",
    }
}

/// Format a task status for display.
pub fn format_task_status(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::Todo => "todo",
        TaskStatus::InProgress => "in-progress",
        TaskStatus::Review => "review",
        TaskStatus::Completed => "completed",
    }
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
        Priority::Urgent => "urgent",
    }
}

/// Format a section name for display.
pub fn format_section(s: Section) -> &'static str {
    match s {
        Section::Dashboard => "Dashboard",
        Section::Projects => "Projects",
        Section::Tasks => "Tasks",
        Section::Team => "Team",
        Section::Workflows => "Workflows",
        Section::Analytics => "Analytics",
    }
}
