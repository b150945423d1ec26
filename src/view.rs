//! View model derivation for the dashboard sections.
//!
//! `render_section` maps a section name and a store snapshot to a plain data
//! projection; the renderer (terminal table printer or TUI) owns the actual
//! painting. Derivation is pure in `(db, today)` so calling it twice with the
//! same snapshot yields the same view model.

use chrono::NaiveDate;

use crate::db::Database;
use crate::fields::*;
use crate::model::{Activity, MemberRef, ProjectRef, Task, WorkflowStep};

/// How many activity entries the dashboard shows.
const RECENT_ACTIVITY_LIMIT: usize = 5;
/// How many project progress bars the dashboard shows.
const PROJECT_PROGRESS_LIMIT: usize = 4;

/// Headline counters plus the recent-activity and progress strips.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total_projects: usize,
    pub open_tasks: usize,
    pub team_members: usize,
    pub overdue_tasks: usize,
    pub recent_activities: Vec<Activity>,
    pub project_progress: Vec<ProjectProgress>,
}

/// One progress strip entry on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectProgress {
    pub name: String,
    pub progress: u8,
    pub manager: MemberRef,
}

/// One card in the projects grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress: u8,
    pub end_date: NaiveDate,
}

/// One row in the tasks list.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: u64,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: MemberRef,
    pub project: ProjectRef,
    pub due_date: NaiveDate,
    pub completed: bool,
}

impl From<&Task> for TaskRow {
    fn from(t: &Task) -> Self {
        TaskRow {
            id: t.id,
            title: t.title.clone(),
            status: t.status,
            priority: t.priority,
            assignee: t.assignee.clone(),
            project: t.project.clone(),
            due_date: t.due_date,
            completed: t.completed,
        }
    }
}

/// One card in the team grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberCard {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub department: String,
    pub avatar: String,
    pub tasks_completed: u32,
    pub current_tasks: u32,
}

/// One card in the workflows grid.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowCard {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub steps: Vec<WorkflowStep>,
    pub active_instances: u32,
}

/// Chart feeds for the analytics section, recomputed from the live
/// collections.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    /// Tasks per status: (status, count), all four statuses always present.
    pub status_breakdown: Vec<(TaskStatus, usize)>,
    /// Progress percentage per project, collection order.
    pub project_timeline: Vec<(String, u8)>,
    /// Member headcount per department, first-seen order.
    pub department_workload: Vec<(String, usize)>,
}

/// The view model handed to the renderer for one section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView {
    Dashboard(DashboardView),
    Projects(Vec<ProjectCard>),
    Tasks(Vec<TaskRow>),
    Team(Vec<MemberCard>),
    Workflows(Vec<WorkflowCard>),
    Analytics(AnalyticsView),
}

/// Derive the view model for `section` from the current store snapshot.
/// `today` is the overdue cutoff; a task is overdue when its due date is
/// strictly earlier and it is not completed.
pub fn render_section(section: Section, db: &Database, today: NaiveDate) -> SectionView {
    match section {
        Section::Dashboard => SectionView::Dashboard(dashboard(db, today)),
        Section::Projects => SectionView::Projects(
            db.projects
                .iter()
                .map(|p| ProjectCard {
                    id: p.id,
                    name: p.name.clone(),
                    description: p.description.clone(),
                    status: p.status,
                    progress: p.progress,
                    end_date: p.end_date,
                })
                .collect(),
        ),
        Section::Tasks => SectionView::Tasks(task_rows(db)),
        Section::Team => SectionView::Team(
            db.team_members
                .iter()
                .map(|m| MemberCard {
                    id: m.id,
                    name: m.name.clone(),
                    role: m.role.clone(),
                    department: m.department.clone(),
                    avatar: m.avatar.clone(),
                    tasks_completed: m.tasks_completed,
                    current_tasks: m.current_tasks,
                })
                .collect(),
        ),
        Section::Workflows => SectionView::Workflows(
            db.workflows
                .iter()
                .map(|w| WorkflowCard {
                    id: w.id,
                    name: w.name.clone(),
                    description: w.description.clone(),
                    steps: w.steps.clone(),
                    active_instances: w.active_instances,
                })
                .collect(),
        ),
        Section::Analytics => SectionView::Analytics(analytics(db)),
    }
}

/// Task rows for the tasks section; also used for filtered lists.
pub fn task_rows(db: &Database) -> Vec<TaskRow> {
    db.tasks.iter().map(TaskRow::from).collect()
}

fn dashboard(db: &Database, today: NaiveDate) -> DashboardView {
    DashboardView {
        total_projects: db.projects.len(),
        open_tasks: db.tasks.iter().filter(|t| !t.completed).count(),
        team_members: db.team_members.len(),
        overdue_tasks: db
            .tasks
            .iter()
            .filter(|t| t.due_date < today && !t.completed)
            .count(),
        // Collection order is the recency order; activities are append-only.
        recent_activities: db
            .activities
            .iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .cloned()
            .collect(),
        project_progress: db
            .projects
            .iter()
            .take(PROJECT_PROGRESS_LIMIT)
            .map(|p| ProjectProgress {
                name: p.name.clone(),
                // Stored progress is unenforced; the gauge renderer rejects
                // values over 100.
                progress: p.progress.min(100),
                manager: p.manager.clone(),
            })
            .collect(),
    }
}

fn analytics(db: &Database) -> AnalyticsView {
    let count = |s: TaskStatus| db.tasks.iter().filter(|t| t.status == s).count();
    let status_breakdown = vec![
        (TaskStatus::Completed, count(TaskStatus::Completed)),
        (TaskStatus::InProgress, count(TaskStatus::InProgress)),
        (TaskStatus::Review, count(TaskStatus::Review)),
        (TaskStatus::Todo, count(TaskStatus::Todo)),
    ];

    let project_timeline = db
        .projects
        .iter()
        .map(|p| (p.name.clone(), p.progress))
        .collect();

    let mut department_workload: Vec<(String, usize)> = Vec::new();
    for m in &db.team_members {
        match department_workload.iter_mut().find(|(d, _)| d == &m.department) {
            Some((_, n)) => *n += 1,
            None => department_workload.push((m.department.clone(), 1)),
        }
    }

    AnalyticsView {
        status_breakdown,
        project_timeline,
        department_workload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use crate::store::MemoryStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn seeded() -> Database {
        Database::load(&MemoryStore::new())
    }

    #[test]
    fn dashboard_counts_from_the_seed() {
        let db = seeded();
        let SectionView::Dashboard(v) = render_section(Section::Dashboard, &db, d(2024, 3, 10))
        else {
            panic!("wrong view");
        };
        assert_eq!(v.total_projects, 3);
        assert_eq!(v.open_tasks, 3);
        assert_eq!(v.team_members, 4);
        // Tasks 2 (due 2024-03-01), 3 (02-28) and 4 (02-20) are open and past
        // due; task 1 is past due but completed.
        assert_eq!(v.overdue_tasks, 3);
        assert_eq!(v.recent_activities.len(), 3);
        assert_eq!(v.project_progress.len(), 3);
    }

    #[test]
    fn due_today_is_not_overdue() {
        let db = seeded();
        let SectionView::Dashboard(v) = render_section(Section::Dashboard, &db, d(2024, 2, 20))
        else {
            panic!("wrong view");
        };
        // Task 4 is due exactly on the cutoff date.
        assert_eq!(v.overdue_tasks, 0);
    }

    #[test]
    fn dashboard_caps_activities_at_five_and_progress_at_four() {
        let store = MemoryStore::new();
        let mut db = Database::load(&store);
        for i in 0..4 {
            db.create_project(
                &store,
                crate::model::NewProject {
                    name: format!("Filler {i}"),
                    description: "filler".into(),
                    manager: "Sarah Johnson".into(),
                    start_date: d(2024, 1, 1),
                    end_date: d(2024, 12, 31),
                },
            )
            .unwrap();
        }
        for i in 0..4 {
            db.activities.push(Activity {
                id: 4 + i,
                kind: "new_task".into(),
                title: "New Task Created".into(),
                description: format!("filler activity {i}"),
                timestamp: "just now".into(),
                icon: "fas fa-plus".into(),
            });
        }

        let SectionView::Dashboard(v) = render_section(Section::Dashboard, &db, d(2024, 3, 10))
        else {
            panic!("wrong view");
        };
        assert_eq!(v.recent_activities.len(), 5);
        // First five in collection order, not timestamp order.
        assert_eq!(v.recent_activities[0].id, 1);
        assert_eq!(v.project_progress.len(), 4);
        assert_eq!(v.project_progress[0].name, "Website Redesign");
    }

    #[test]
    fn dashboard_progress_is_clamped_to_one_hundred() {
        let mut db = seeded();
        db.projects[0].progress = 250;
        let SectionView::Dashboard(v) = render_section(Section::Dashboard, &db, d(2024, 3, 10))
        else {
            panic!("wrong view");
        };
        assert_eq!(v.project_progress[0].progress, 100);
        // Untouched projects keep their stored figure.
        assert_eq!(v.project_progress[1].progress, 45);
    }

    #[test]
    fn task_rows_mirror_the_task_fields() {
        let db = seeded();
        let rows = task_rows(&db);
        assert_eq!(rows.len(), db.tasks.len());
        for (row, t) in rows.iter().zip(&db.tasks) {
            assert_eq!(row, &TaskRow::from(t));
            assert_eq!(row.id, t.id);
            assert_eq!(row.title, t.title);
            assert_eq!(row.assignee, t.assignee);
            assert_eq!(row.project, t.project);
            assert_eq!(row.due_date, t.due_date);
            assert_eq!((row.status, row.priority, row.completed), (t.status, t.priority, t.completed));
        }
    }

    #[test]
    fn render_is_idempotent_for_the_same_snapshot() {
        let db = seeded();
        let today = d(2024, 3, 10);
        for section in [
            Section::Dashboard,
            Section::Projects,
            Section::Tasks,
            Section::Team,
            Section::Workflows,
            Section::Analytics,
        ] {
            let a = render_section(section, &db, today);
            let b = render_section(section, &db, today);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn analytics_recomputes_from_live_collections() {
        let store = MemoryStore::new();
        let mut db = Database::load(&store);
        let SectionView::Analytics(before) = render_section(Section::Analytics, &db, d(2024, 3, 1))
        else {
            panic!("wrong view");
        };
        assert_eq!(
            before.status_breakdown,
            vec![
                (TaskStatus::Completed, 1),
                (TaskStatus::InProgress, 1),
                (TaskStatus::Review, 1),
                (TaskStatus::Todo, 1),
            ]
        );
        assert_eq!(
            before.department_workload,
            vec![
                ("Engineering".to_string(), 2),
                ("Management".to_string(), 1),
                ("Design".to_string(), 1),
            ]
        );

        db.create_task(
            &store,
            NewTask {
                title: "Another".into(),
                description: "d".into(),
                assignee: "John Doe".into(),
                project: "Website Redesign".into(),
                priority: Priority::Low,
                due_date: d(2099, 1, 1),
            },
        )
        .unwrap();
        let SectionView::Analytics(after) = render_section(Section::Analytics, &db, d(2024, 3, 1))
        else {
            panic!("wrong view");
        };
        assert_eq!(after.status_breakdown[3], (TaskStatus::Todo, 2));
    }

    #[test]
    fn workflow_cards_keep_step_order() {
        let db = seeded();
        let SectionView::Workflows(cards) = render_section(Section::Workflows, &db, d(2024, 3, 1))
        else {
            panic!("wrong view");
        };
        let names: Vec<&str> = cards[1].steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bug Report", "Investigation", "Fix Development", "Testing", "Deployment"]
        );
    }
}
