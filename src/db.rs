//! In-memory domain store and its persistence discipline.
//!
//! `Database` owns the five dashboard collections plus the login session.
//! Every mutating operation either leaves the store exactly as it found it
//! (validation or persistence failure) or leaves it fully updated with the
//! affected collection written back through the blob store. There is no
//! partially-written state observable to a subsequent read.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DomainError;
use crate::fields::{ProjectStatus, TaskStatus};
use crate::model::*;
use crate::seed;
use crate::store::*;

/// Owner of all dashboard collections and the current session.
///
/// Collections are insertion-ordered; records are never deleted. New ids are
/// `collection length + 1`, not max+1; safe only because deletion is out of
/// scope.
#[derive(Debug, Default)]
pub struct Database {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub team_members: Vec<TeamMember>,
    pub workflows: Vec<Workflow>,
    pub activities: Vec<Activity>,
    pub session: Session,
}

/// Read one collection slot leniently: a missing slot, unreadable slot, or
/// malformed snapshot all come back as `None` (with a stderr note for the
/// malformed case) so startup can fall through to the seed fixture.
fn load_slot<T: DeserializeOwned>(store: &dyn BlobStore, slot: &str) -> Option<Vec<T>> {
    match store.get(slot) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(items) => Some(items),
            Err(e) => {
                eprintln!("Error parsing '{slot}' slot, reseeding: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            eprintln!("Error reading '{slot}' slot, reseeding: {e}");
            None
        }
    }
}

fn persist<T: Serialize>(store: &dyn BlobStore, slot: &str, items: &[T]) -> Result<(), DomainError> {
    let data = serde_json::to_string_pretty(items).map_err(std::io::Error::other)?;
    store.set(slot, &data)?;
    Ok(())
}

impl Database {
    /// Restore every collection from the store, seeding any that is absent or
    /// empty. Runs once at process start; seeds are only written back to the
    /// store when their collection first mutates.
    pub fn load(store: &dyn BlobStore) -> Self {
        let projects = load_slot(store, SLOT_PROJECTS)
            .filter(|v: &Vec<Project>| !v.is_empty())
            .unwrap_or_else(seed::projects);
        let tasks = load_slot(store, SLOT_TASKS)
            .filter(|v: &Vec<Task>| !v.is_empty())
            .unwrap_or_else(seed::tasks);
        let team_members = load_slot(store, SLOT_TEAM_MEMBERS)
            .filter(|v: &Vec<TeamMember>| !v.is_empty())
            .unwrap_or_else(seed::team_members);
        let workflows = load_slot(store, SLOT_WORKFLOWS)
            .filter(|v: &Vec<Workflow>| !v.is_empty())
            .unwrap_or_else(seed::workflows);
        let activities = load_slot(store, SLOT_ACTIVITIES)
            .filter(|v: &Vec<Activity>| !v.is_empty())
            .unwrap_or_else(seed::activities);

        let session = match store.get(SLOT_SESSION) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                eprintln!("Error parsing session slot, logging out: {e}");
                Session::default()
            }),
            Ok(None) => Session::default(),
            Err(e) => {
                eprintln!("Error reading session slot, logging out: {e}");
                Session::default()
            }
        };

        Database {
            projects,
            tasks,
            team_members,
            workflows,
            activities,
            session,
        }
    }

    /// Create a project. Status starts `active` with zero progress and an
    /// empty team roster.
    pub fn create_project(
        &mut self,
        store: &dyn BlobStore,
        input: NewProject,
    ) -> Result<Project, DomainError> {
        if let Some(err) = DomainError::validate(&[
            ("name", !input.name.trim().is_empty()),
            ("description", !input.description.trim().is_empty()),
            ("manager", !input.manager.trim().is_empty()),
        ]) {
            return Err(err);
        }

        let project = Project {
            id: self.projects.len() as u64 + 1,
            name: input.name,
            description: input.description,
            status: ProjectStatus::Active,
            progress: 0,
            start_date: input.start_date,
            end_date: input.end_date,
            manager: MemberRef(input.manager),
            team: Vec::new(),
        };
        self.projects.push(project);
        if let Err(e) = persist(store, SLOT_PROJECTS, &self.projects) {
            self.projects.pop();
            return Err(e);
        }
        Ok(self.projects.last().expect("just pushed").clone())
    }

    /// Create a task. Status starts `todo`, not completed.
    pub fn create_task(
        &mut self,
        store: &dyn BlobStore,
        input: NewTask,
    ) -> Result<Task, DomainError> {
        if let Some(err) = DomainError::validate(&[
            ("title", !input.title.trim().is_empty()),
            ("description", !input.description.trim().is_empty()),
            ("assignee", !input.assignee.trim().is_empty()),
        ]) {
            return Err(err);
        }

        let task = Task {
            id: self.tasks.len() as u64 + 1,
            title: input.title,
            description: input.description,
            status: TaskStatus::Todo,
            priority: input.priority,
            assignee: MemberRef(input.assignee),
            project: ProjectRef(input.project),
            due_date: input.due_date,
            completed: false,
        };
        self.tasks.push(task);
        if let Err(e) = persist(store, SLOT_TASKS, &self.tasks) {
            self.tasks.pop();
            return Err(e);
        }
        Ok(self.tasks.last().expect("just pushed").clone())
    }

    /// Add a team member. Stats start at zero and the avatar defaults to the
    /// shared placeholder.
    pub fn create_team_member(
        &mut self,
        store: &dyn BlobStore,
        input: NewTeamMember,
    ) -> Result<TeamMember, DomainError> {
        if let Some(err) = DomainError::validate(&[
            ("name", !input.name.trim().is_empty()),
            ("email", !input.email.trim().is_empty()),
            ("role", !input.role.trim().is_empty()),
            ("department", !input.department.trim().is_empty()),
        ]) {
            return Err(err);
        }

        let member = TeamMember {
            id: self.team_members.len() as u64 + 1,
            name: input.name,
            role: input.role,
            email: input.email,
            avatar: seed::default_avatar(),
            department: input.department,
            tasks_completed: 0,
            current_tasks: 0,
        };
        self.team_members.push(member);
        if let Err(e) = persist(store, SLOT_TEAM_MEMBERS, &self.team_members) {
            self.team_members.pop();
            return Err(e);
        }
        Ok(self.team_members.last().expect("just pushed").clone())
    }

    /// Create a workflow from newline-delimited step text. Blank lines are
    /// dropped; step order follows the input.
    pub fn create_workflow(
        &mut self,
        store: &dyn BlobStore,
        input: NewWorkflow,
    ) -> Result<Workflow, DomainError> {
        if let Some(err) = DomainError::validate(&[
            ("name", !input.name.trim().is_empty()),
            ("description", !input.description.trim().is_empty()),
            ("steps", !input.steps_text.trim().is_empty()),
        ]) {
            return Err(err);
        }

        let steps: Vec<WorkflowStep> = input
            .steps_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| WorkflowStep {
                name: line.to_string(),
                completed: false,
            })
            .collect();

        let workflow = Workflow {
            id: self.workflows.len() as u64 + 1,
            name: input.name,
            description: input.description,
            steps,
            active_instances: 0,
        };
        self.workflows.push(workflow);
        if let Err(e) = persist(store, SLOT_WORKFLOWS, &self.workflows) {
            self.workflows.pop();
            return Err(e);
        }
        Ok(self.workflows.last().expect("just pushed").clone())
    }

    /// Flip a task's completed flag and realign its status: `completed` when
    /// now done, `todo` when unchecked. Unchecking discards any richer status
    /// the task had ("review" becomes "todo") — intentional source behavior.
    ///
    /// An unknown id is a silent no-op returning `Ok(None)`.
    pub fn toggle_task_complete(
        &mut self,
        store: &dyn BlobStore,
        task_id: u64,
    ) -> Result<Option<Task>, DomainError> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == task_id) else {
            return Ok(None);
        };

        let prev_status = self.tasks[idx].status;
        let prev_completed = self.tasks[idx].completed;

        self.tasks[idx].completed = !prev_completed;
        self.tasks[idx].status = if self.tasks[idx].completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Todo
        };

        if let Err(e) = persist(store, SLOT_TASKS, &self.tasks) {
            self.tasks[idx].status = prev_status;
            self.tasks[idx].completed = prev_completed;
            return Err(e);
        }
        Ok(Some(self.tasks[idx].clone()))
    }

    /// Write the current session to its slot, or clear the slot when logged
    /// out.
    pub fn persist_session(&self, store: &dyn BlobStore) -> Result<(), DomainError> {
        if self.session.current_user.is_some() {
            let data = serde_json::to_string_pretty(&self.session).map_err(std::io::Error::other)?;
            store.set(SLOT_SESSION, &data)?;
        } else {
            store.remove(SLOT_SESSION)?;
        }
        Ok(())
    }

    /// Get a task by id.
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Find a team member by exact email.
    pub fn member_by_email(&self, email: &str) -> Option<&TeamMember> {
        self.team_members.iter().find(|m| m.email == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn fresh() -> (Database, MemoryStore) {
        let store = MemoryStore::new();
        let db = Database::load(&store);
        (db, store)
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            description: "d".into(),
            assignee: "John Doe".into(),
            project: "Website Redesign".into(),
            priority: Priority::Low,
            due_date: d(2099, 1, 1),
        }
    }

    #[test]
    fn empty_store_loads_the_seed_fixture() {
        let (db, _) = fresh();
        assert_eq!(db.projects.len(), 3);
        assert_eq!(db.tasks.len(), 4);
        assert_eq!(db.team_members.len(), 4);
        assert_eq!(db.workflows.len(), 2);
        assert_eq!(db.activities.len(), 3);
        assert!(db.session.current_user.is_none());
    }

    #[test]
    fn slot_holding_empty_list_is_reseeded() {
        let store = MemoryStore::new();
        store.set(SLOT_TASKS, "[]").unwrap();
        let db = Database::load(&store);
        assert_eq!(db.tasks.len(), 4);
    }

    #[test]
    fn malformed_slot_is_reseeded() {
        let store = MemoryStore::new();
        store.set(SLOT_PROJECTS, "{not json").unwrap();
        let db = Database::load(&store);
        assert_eq!(db.projects.len(), 3);
    }

    #[test]
    fn create_task_appends_with_length_plus_one_id() {
        let (mut db, store) = fresh();
        assert_eq!(db.projects.len(), 3);
        assert_eq!(db.tasks.len(), 4);
        assert_eq!(db.tasks.iter().filter(|t| t.completed).count(), 1);

        let created = db.create_task(&store, new_task("X")).unwrap();
        assert_eq!(db.tasks.len(), 5);
        assert_eq!(created.id, 5);
        assert_eq!(created.status, TaskStatus::Todo);
        assert!(!created.completed);
    }

    #[test]
    fn create_project_defaults_to_active_with_zero_progress() {
        let (mut db, store) = fresh();
        let created = db
            .create_project(
                &store,
                NewProject {
                    name: "Infra Upgrade".into(),
                    description: "Move CI to new runners".into(),
                    manager: "Sarah Johnson".into(),
                    start_date: d(2024, 6, 1),
                    end_date: d(2024, 9, 1),
                },
            )
            .unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(created.status, ProjectStatus::Active);
        assert_eq!(created.progress, 0);
        assert!(created.team.is_empty());
        assert_eq!(db.projects.len(), 4);
    }

    #[test]
    fn create_rejects_missing_fields_and_leaves_state_untouched() {
        let (mut db, store) = fresh();
        let before = db.tasks.len();
        let err = db
            .create_task(
                &store,
                NewTask {
                    title: "  ".into(),
                    description: String::new(),
                    assignee: "John Doe".into(),
                    project: "Website Redesign".into(),
                    priority: Priority::Low,
                    due_date: d(2099, 1, 1),
                },
            )
            .unwrap_err();
        match err {
            DomainError::Validation { missing } => {
                assert_eq!(missing, vec!["title", "description"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(db.tasks.len(), before);
        // Nothing was persisted either.
        assert_eq!(store.get(SLOT_TASKS).unwrap(), None);
    }

    #[test]
    fn create_persists_the_whole_collection() {
        let (mut db, store) = fresh();
        db.create_task(&store, new_task("X")).unwrap();
        let raw = store.get(SLOT_TASKS).unwrap().unwrap();
        let persisted: Vec<Task> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.len(), 5);
        assert_eq!(persisted[4].title, "X");
    }

    #[test]
    fn toggle_is_its_own_inverse_but_lossy_for_status() {
        let (mut db, store) = fresh();
        // Seed task 4 is in review, not completed.
        assert_eq!(db.task(4).unwrap().status, TaskStatus::Review);

        let toggled = db.toggle_task_complete(&store, 4).unwrap().unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.status, TaskStatus::Completed);

        let toggled_back = db.toggle_task_complete(&store, 4).unwrap().unwrap();
        assert!(!toggled_back.completed);
        // The original "review" status is not restored.
        assert_eq!(toggled_back.status, TaskStatus::Todo);
    }

    #[test]
    fn toggle_unknown_id_is_a_silent_noop() {
        let (mut db, store) = fresh();
        let before: Vec<u64> = db.tasks.iter().map(|t| t.id).collect();
        assert!(db.toggle_task_complete(&store, 999).unwrap().is_none());
        let after: Vec<u64> = db.tasks.iter().map(|t| t.id).collect();
        assert_eq!(before, after);
        assert_eq!(store.get(SLOT_TASKS).unwrap(), None);
    }

    #[test]
    fn workflow_steps_parse_in_order_dropping_blank_lines() {
        let (mut db, store) = fresh();
        let created = db
            .create_workflow(
                &store,
                NewWorkflow {
                    name: "Release Checklist".into(),
                    description: "Steps before shipping".into(),
                    steps_text: "Tag build\n\n  Smoke test  \nAnnounce\n".into(),
                },
            )
            .unwrap();
        let names: Vec<&str> = created.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Tag build", "Smoke test", "Announce"]);
        assert!(created.steps.iter().all(|s| !s.completed));
        assert_eq!(created.active_instances, 0);
    }

    #[test]
    fn persisted_state_round_trips_through_a_reload() {
        let (mut db, store) = fresh();
        db.create_task(&store, new_task("X")).unwrap();
        db.create_team_member(
            &store,
            NewTeamMember {
                name: "Priya Patel".into(),
                email: "priya.patel@company.com".into(),
                role: "QA Engineer".into(),
                department: "Engineering".into(),
            },
        )
        .unwrap();
        db.create_project(
            &store,
            NewProject {
                name: "Infra Upgrade".into(),
                description: "Move CI to new runners".into(),
                manager: "Sarah Johnson".into(),
                start_date: d(2024, 6, 1),
                end_date: d(2024, 9, 1),
            },
        )
        .unwrap();
        db.create_workflow(
            &store,
            NewWorkflow {
                name: "Release Checklist".into(),
                description: "Steps before shipping".into(),
                steps_text: "One\nTwo".into(),
            },
        )
        .unwrap();

        let reloaded = Database::load(&store);
        assert_eq!(reloaded.tasks.len(), db.tasks.len());
        assert_eq!(reloaded.team_members.len(), db.team_members.len());
        assert_eq!(reloaded.projects.len(), db.projects.len());
        assert_eq!(reloaded.workflows.len(), db.workflows.len());
        assert_eq!(reloaded.tasks[4].title, "X");
        assert_eq!(reloaded.team_members[4].name, "Priya Patel");
        assert_eq!(reloaded.projects[3].name, "Infra Upgrade");
        assert_eq!(reloaded.workflows[2].steps.len(), 2);
    }

    #[test]
    fn activities_slot_round_trips_with_the_renamed_type_key() {
        let store = MemoryStore::new();
        let db = Database::load(&store);

        let json = serde_json::to_string_pretty(&db.activities).unwrap();
        // `kind` is stored under "type" on the wire.
        assert!(json.contains("\"type\": \"task_completed\""));
        assert!(!json.contains("\"kind\""));

        store.set(SLOT_ACTIVITIES, &json).unwrap();
        let reloaded = Database::load(&store);
        assert_eq!(reloaded.activities, db.activities);
    }

    #[test]
    fn member_lookup_by_email_is_exact() {
        let (db, _) = fresh();
        assert_eq!(
            db.member_by_email("sarah.johnson@company.com").unwrap().name,
            "Sarah Johnson"
        );
        assert!(db.member_by_email("SARAH.JOHNSON@COMPANY.COM").is_none());
    }
}
