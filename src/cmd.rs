//! Command implementations for the CLI interface.
//!
//! Every user-facing operation arrives here as one variant of [`Commands`]
//! and is dispatched to exactly one `cmd_*` handler. Commands run to
//! completion one at a time in arrival order; a handler persists any
//! mutation before it returns, so state on disk always reflects the last
//! completed command.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::db::Database;
use crate::error::DomainError;
use crate::fields::*;
use crate::model::*;
use crate::query::{self, SearchOutcome};
use crate::session;
use crate::store::BlobStore;
use crate::tui::app::run_tui;
use crate::view::*;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard UI.
    Ui,

    /// Print the view for one dashboard section.
    Show {
        /// Section: dashboard | projects | tasks | team | workflows | analytics.
        #[arg(value_enum)]
        section: Section,
    },

    /// Manage projects.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage tasks.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Manage team members.
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },

    /// Manage workflow templates.
    Workflow {
        #[command(subcommand)]
        action: WorkflowAction,
    },

    /// Search projects, tasks and team members.
    Search {
        /// Query text; anything shorter than 2 characters is inactive.
        query: String,
    },

    /// Log in as a team member.
    Login {
        /// Team member email.
        email: String,
        /// Password (shared demo secret).
        password: String,
    },

    /// Log out of the current session.
    Logout,

    /// Show the currently logged-in user.
    Whoami,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project.
    Add {
        /// Project name.
        name: String,
        /// Longer description.
        #[arg(long)]
        desc: String,
        /// Manager name (references a team member; not validated).
        #[arg(long)]
        manager: String,
        /// Start date, YYYY-MM-DD.
        #[arg(long)]
        start: NaiveDate,
        /// End date, YYYY-MM-DD.
        #[arg(long)]
        end: NaiveDate,
    },
    /// List all projects.
    List,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Longer description.
        #[arg(long)]
        desc: String,
        /// Assignee name (references a team member; not validated).
        #[arg(long)]
        assignee: String,
        /// Project name the task belongs to.
        #[arg(long)]
        project: String,
        /// Priority: low | medium | high | urgent.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Due date, YYYY-MM-DD.
        #[arg(long)]
        due: NaiveDate,
    },
    /// List tasks with optional filters.
    List {
        /// Filter by status; omit for all.
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
        /// Filter by priority; omit for all.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },
    /// Toggle a task's completed flag by id.
    Toggle {
        /// Task id.
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum TeamAction {
    /// Add a team member.
    Add {
        /// Full name.
        name: String,
        /// Email address (login identity).
        #[arg(long)]
        email: String,
        /// Role title.
        #[arg(long)]
        role: String,
        /// Department name.
        #[arg(long)]
        department: String,
    },
    /// List all team members.
    List,
}

#[derive(Subcommand)]
pub enum WorkflowAction {
    /// Create a workflow template.
    Add {
        /// Workflow name.
        name: String,
        /// Longer description.
        #[arg(long)]
        desc: String,
        /// Step name, in order. May be repeated.
        #[arg(long = "step")]
        steps: Vec<String>,
    },
    /// List all workflows.
    List,
}

fn fail(err: DomainError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

/// Launch the terminal user interface.
pub fn cmd_ui(db: &mut Database, store: &dyn BlobStore) {
    if let Err(e) = run_tui(db, store) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Print the view model for a single section.
pub fn cmd_show(db: &Database, section: Section) {
    let today = Local::now().date_naive();
    match render_section(section, db, today) {
        SectionView::Dashboard(v) => print_dashboard(&v),
        SectionView::Projects(cards) => print_project_table(&cards),
        SectionView::Tasks(rows) => print_task_table(&rows),
        SectionView::Team(cards) => print_team_table(&cards),
        SectionView::Workflows(cards) => print_workflows(&cards),
        SectionView::Analytics(v) => print_analytics(&v),
    }
}

/// Create a project and echo the stored record.
pub fn cmd_project_add(
    db: &mut Database,
    store: &dyn BlobStore,
    name: String,
    desc: String,
    manager: String,
    start: NaiveDate,
    end: NaiveDate,
) {
    let input = NewProject {
        name,
        description: desc,
        manager,
        start_date: start,
        end_date: end,
    };
    match db.create_project(store, input) {
        Ok(p) => println!("Created project #{}: {}", p.id, p.name),
        Err(e) => fail(e),
    }
}

/// Create a task and echo the stored record.
pub fn cmd_task_add(
    db: &mut Database,
    store: &dyn BlobStore,
    title: String,
    desc: String,
    assignee: String,
    project: String,
    priority: Priority,
    due: NaiveDate,
) {
    let input = NewTask {
        title,
        description: desc,
        assignee,
        project,
        priority,
        due_date: due,
    };
    match db.create_task(store, input) {
        Ok(t) => println!("Created task #{}: {}", t.id, t.title),
        Err(e) => fail(e),
    }
}

/// List tasks, optionally filtered by status and priority.
pub fn cmd_task_list(db: &Database, status: Option<TaskStatus>, priority: Option<Priority>) {
    let filtered = query::filter_tasks(&db.tasks, status, priority);
    let rows: Vec<TaskRow> = filtered.iter().map(TaskRow::from).collect();
    print_task_table(&rows);
}

/// Toggle a task's completion. An unknown id prints nothing and succeeds.
pub fn cmd_task_toggle(db: &mut Database, store: &dyn BlobStore, id: u64) {
    match db.toggle_task_complete(store, id) {
        Ok(Some(t)) => println!(
            "Task #{} is now {}",
            t.id,
            if t.completed { "completed" } else { "open" }
        ),
        Ok(None) => {}
        Err(e) => fail(e),
    }
}

/// Add a team member and echo the stored record.
pub fn cmd_team_add(
    db: &mut Database,
    store: &dyn BlobStore,
    name: String,
    email: String,
    role: String,
    department: String,
) {
    let input = NewTeamMember {
        name,
        email,
        role,
        department,
    };
    match db.create_team_member(store, input) {
        Ok(m) => println!("Added team member #{}: {}", m.id, m.name),
        Err(e) => fail(e),
    }
}

/// Create a workflow from ordered step names.
pub fn cmd_workflow_add(
    db: &mut Database,
    store: &dyn BlobStore,
    name: String,
    desc: String,
    steps: Vec<String>,
) {
    let input = NewWorkflow {
        name,
        description: desc,
        steps_text: steps.join("\n"),
    };
    match db.create_workflow(store, input) {
        Ok(w) => println!("Created workflow #{} with {} steps", w.id, w.steps.len()),
        Err(e) => fail(e),
    }
}

/// Search across projects, tasks and team members.
pub fn cmd_search(db: &Database, query_text: &str) {
    match query::search(query_text, &db.projects, &db.tasks, &db.team_members) {
        SearchOutcome::Inactive => {
            println!("Query too short; type at least 2 characters.");
        }
        SearchOutcome::Results(r) => {
            if r.is_empty() {
                println!("No matches for '{query_text}'.");
                return;
            }
            if !r.projects.is_empty() {
                println!("Projects:");
                for p in &r.projects {
                    println!(
                        "  #{:<3} {:<28} {}",
                        p.id,
                        truncate(&p.name, 28),
                        format_project_status(p.status)
                    );
                }
            }
            if !r.tasks.is_empty() {
                println!("Tasks:");
                for t in &r.tasks {
                    println!(
                        "  #{:<3} {:<28} {:<12} {}",
                        t.id,
                        truncate(&t.title, 28),
                        format_task_status(t.status),
                        format_priority(t.priority)
                    );
                }
            }
            if !r.members.is_empty() {
                println!("Team:");
                for m in &r.members {
                    println!("  #{:<3} {:<28} {}", m.id, truncate(&m.name, 28), m.role);
                }
            }
        }
    }
}

/// Log in; prints the resulting identity.
pub fn cmd_login(db: &mut Database, store: &dyn BlobStore, email: &str, password: &str) {
    match session::login(db, store, email, password) {
        Ok(user) => println!("Logged in as {} ({})", user.name, user.role),
        Err(e) => fail(e),
    }
}

/// Log out of the current session.
pub fn cmd_logout(db: &mut Database, store: &dyn BlobStore) {
    match session::logout(db, store) {
        Ok(()) => println!("Logged out."),
        Err(e) => fail(e),
    }
}

/// Print the current session identity.
pub fn cmd_whoami(db: &Database) {
    match &db.session.current_user {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
        None => println!("Not logged in."),
    }
}

/// Generate shell completions to stdout.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

fn print_dashboard(v: &DashboardView) {
    println!("Projects: {}", v.total_projects);
    println!("Open tasks: {}", v.open_tasks);
    println!("Team members: {}", v.team_members);
    println!("Overdue tasks: {}", v.overdue_tasks);
    println!();
    println!("Recent activity:");
    for a in &v.recent_activities {
        println!("  {:<20} {} ({})", a.title, a.description, a.timestamp);
    }
    println!();
    println!("Project progress:");
    for p in &v.project_progress {
        println!(
            "  {:<28} {:>3}%  {}",
            truncate(&p.name, 28),
            p.progress,
            p.manager.as_str()
        );
    }
}

fn print_project_table(cards: &[ProjectCard]) {
    println!(
        "{:<4} {:<28} {:<10} {:>5}  {:<10} {}",
        "ID", "Name", "Status", "Prog", "End", "Description"
    );
    for p in cards {
        println!(
            "{:<4} {:<28} {:<10} {:>4}%  {:<10} {}",
            p.id,
            truncate(&p.name, 28),
            format_project_status(p.status),
            p.progress,
            p.end_date,
            truncate(&p.description, 40)
        );
    }
}

fn print_task_table(rows: &[TaskRow]) {
    println!(
        "{:<4} {:<3} {:<28} {:<12} {:<8} {:<16} {:<10} {}",
        "ID", "", "Title", "Status", "Pri", "Assignee", "Due", "Project"
    );
    for t in rows {
        let mark = if t.completed { "[x]" } else { "[ ]" };
        println!(
            "{:<4} {:<3} {:<28} {:<12} {:<8} {:<16} {:<10} {}",
            t.id,
            mark,
            truncate(&t.title, 28),
            format_task_status(t.status),
            format_priority(t.priority),
            truncate(t.assignee.as_str(), 16),
            t.due_date,
            truncate(t.project.as_str(), 24)
        );
    }
}

fn print_team_table(cards: &[MemberCard]) {
    println!(
        "{:<4} {:<20} {:<22} {:<12} {:>9} {:>7}",
        "ID", "Name", "Role", "Department", "Completed", "Active"
    );
    for m in cards {
        println!(
            "{:<4} {:<20} {:<22} {:<12} {:>9} {:>7}",
            m.id,
            truncate(&m.name, 20),
            truncate(&m.role, 22),
            truncate(&m.department, 12),
            m.tasks_completed,
            m.current_tasks
        );
    }
}

fn print_workflows(cards: &[WorkflowCard]) {
    for w in cards {
        println!(
            "#{} {} ({} active instances)",
            w.id, w.name, w.active_instances
        );
        println!("  {}", w.description);
        for s in &w.steps {
            let mark = if s.completed { "[x]" } else { "[ ]" };
            println!("  {mark} {}", s.name);
        }
        println!();
    }
}

fn print_analytics(v: &AnalyticsView) {
    println!("Task status breakdown:");
    for (status, n) in &v.status_breakdown {
        println!("  {:<12} {}", format_task_status(*status), n);
    }
    println!();
    println!("Project progress:");
    for (name, progress) in &v.project_timeline {
        println!("  {:<28} {:>3}%", truncate(name, 28), progress);
    }
    println!();
    println!("Department headcount:");
    for (dept, n) in &v.department_workload {
        println!("  {:<16} {}", truncate(dept, 16), n);
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
    }

    #[test]
    fn truncate_adds_ellipsis_at_width() {
        assert_eq!(truncate("a very long project name", 10), "a very lo…");
    }
}
