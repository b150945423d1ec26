//! First-run seed fixture.
//!
//! Any collection that is absent or empty at startup is populated from these
//! builders. The dataset is deterministic so tests and fresh installs see the
//! same records.

use chrono::NaiveDate;

use crate::fields::*;
use crate::model::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

const AVATAR_PLACEHOLDER: &str = "https://via.placeholder.com/80";

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Website Redesign".into(),
            description: "Complete redesign of company website with modern UI/UX".into(),
            status: ProjectStatus::Active,
            progress: 75,
            start_date: date(2024, 1, 15),
            end_date: date(2024, 3, 30),
            manager: "Sarah Johnson".into(),
            team: vec!["John Doe".into(), "Mike Smith".into(), "Lisa Chen".into()],
        },
        Project {
            id: 2,
            name: "Mobile App Development".into(),
            description: "iOS and Android app for customer engagement".into(),
            status: ProjectStatus::Active,
            progress: 45,
            start_date: date(2024, 2, 1),
            end_date: date(2024, 5, 15),
            manager: "David Wilson".into(),
            team: vec!["Alex Brown".into(), "Emma Davis".into(), "Tom Lee".into()],
        },
        Project {
            id: 3,
            name: "Marketing Campaign".into(),
            description: "Q2 marketing campaign for new product launch".into(),
            status: ProjectStatus::Completed,
            progress: 100,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 3, 31),
            manager: "Jennifer Adams".into(),
            team: vec!["Rachel Green".into(), "Chris Martin".into()],
        },
    ]
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Design Homepage Layout".into(),
            description: "Create wireframes and mockups for homepage".into(),
            status: TaskStatus::Completed,
            priority: Priority::High,
            assignee: "John Doe".into(),
            project: "Website Redesign".into(),
            due_date: date(2024, 2, 15),
            completed: true,
        },
        Task {
            id: 2,
            title: "Implement User Authentication".into(),
            description: "Set up login and registration system".into(),
            status: TaskStatus::InProgress,
            priority: Priority::High,
            assignee: "Mike Smith".into(),
            project: "Mobile App Development".into(),
            due_date: date(2024, 3, 1),
            completed: false,
        },
        Task {
            id: 3,
            title: "Create Social Media Content".into(),
            description: "Design posts for Instagram and Facebook".into(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assignee: "Lisa Chen".into(),
            project: "Marketing Campaign".into(),
            due_date: date(2024, 2, 28),
            completed: false,
        },
        Task {
            id: 4,
            title: "API Integration".into(),
            description: "Integrate third-party payment APIs".into(),
            status: TaskStatus::Review,
            priority: Priority::Urgent,
            assignee: "Alex Brown".into(),
            project: "Mobile App Development".into(),
            due_date: date(2024, 2, 20),
            completed: false,
        },
    ]
}

pub fn team_members() -> Vec<TeamMember> {
    vec![
        TeamMember {
            id: 1,
            name: "John Doe".into(),
            role: "Frontend Developer".into(),
            email: "john.doe@company.com".into(),
            avatar: AVATAR_PLACEHOLDER.into(),
            department: "Engineering".into(),
            tasks_completed: 24,
            current_tasks: 3,
        },
        TeamMember {
            id: 2,
            name: "Sarah Johnson".into(),
            role: "Project Manager".into(),
            email: "sarah.johnson@company.com".into(),
            avatar: AVATAR_PLACEHOLDER.into(),
            department: "Management".into(),
            tasks_completed: 18,
            current_tasks: 5,
        },
        TeamMember {
            id: 3,
            name: "Mike Smith".into(),
            role: "Backend Developer".into(),
            email: "mike.smith@company.com".into(),
            avatar: AVATAR_PLACEHOLDER.into(),
            department: "Engineering".into(),
            tasks_completed: 31,
            current_tasks: 2,
        },
        TeamMember {
            id: 4,
            name: "Lisa Chen".into(),
            role: "UI/UX Designer".into(),
            email: "lisa.chen@company.com".into(),
            avatar: AVATAR_PLACEHOLDER.into(),
            department: "Design".into(),
            tasks_completed: 15,
            current_tasks: 4,
        },
    ]
}

pub fn workflows() -> Vec<Workflow> {
    fn step(name: &str, completed: bool) -> WorkflowStep {
        WorkflowStep { name: name.into(), completed }
    }

    vec![
        Workflow {
            id: 1,
            name: "Content Approval Process".into(),
            description: "Standard workflow for content creation and approval".into(),
            steps: vec![
                step("Content Creation", true),
                step("Design Review", true),
                step("Legal Review", false),
                step("Final Approval", false),
            ],
            active_instances: 3,
        },
        Workflow {
            id: 2,
            name: "Bug Fix Workflow".into(),
            description: "Process for reporting and fixing bugs".into(),
            steps: vec![
                step("Bug Report", true),
                step("Investigation", true),
                step("Fix Development", false),
                step("Testing", false),
                step("Deployment", false),
            ],
            active_instances: 7,
        },
    ]
}

pub fn activities() -> Vec<Activity> {
    vec![
        Activity {
            id: 1,
            kind: "task_completed".into(),
            title: "Task Completed".into(),
            description: "John Doe completed \"Design Homepage Layout\"".into(),
            timestamp: "2 hours ago".into(),
            icon: "fas fa-check".into(),
        },
        Activity {
            id: 2,
            kind: "project_updated".into(),
            title: "Project Updated".into(),
            description: "Website Redesign progress updated to 75%".into(),
            timestamp: "4 hours ago".into(),
            icon: "fas fa-chart-line".into(),
        },
        Activity {
            id: 3,
            kind: "new_task".into(),
            title: "New Task Created".into(),
            description: "API Integration task assigned to Alex Brown".into(),
            timestamp: "1 day ago".into(),
            icon: "fas fa-plus".into(),
        },
    ]
}

/// Default avatar used when adding a member without one.
pub fn default_avatar() -> String {
    AVATAR_PLACEHOLDER.to_string()
}
