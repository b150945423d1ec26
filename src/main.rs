//! # Hub - Team Workflow Dashboard
//!
//! A file-backed project/task dashboard for small teams: projects, tasks,
//! team members and workflow templates, browsable from a CLI or an
//! interactive TUI.
//!
//! ## Key Features
//!
//! - **Five Collections**: projects, tasks, team members, workflow templates
//!   and an activity feed, each persisted as its own JSON snapshot
//! - **Dashboard Views**: per-section view models (stats, cards, analytics
//!   feeds) derived on demand from the in-memory store
//! - **Multiple Interfaces**: full CLI for automation + interactive TUI with
//!   section navigation, live search and task toggling
//! - **Trivial Login**: demo-grade shared-password sessions, restored across
//!   runs
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the dashboard TUI
//! hub ui
//!
//! # Print a section
//! hub show dashboard
//!
//! # Add a task via CLI
//! hub task add "Ship the release" --desc "Cut and announce v2" \
//!     --assignee "John Doe" --project "Website Redesign" --due 2024-04-01
//!
//! # Toggle it done
//! hub task toggle 5
//!
//! # Log in
//! hub login sarah.johnson@company.com 123
//! ```
//!
//! Data is stored locally in `~/.workflow-hub/`, one JSON file per
//! collection. Every mutating command rewrites the affected collection in
//! full before it returns; two processes sharing the directory are
//! last-write-wins.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod db;
pub mod error;
pub mod fields;
pub mod model;
pub mod query;
pub mod seed;
pub mod session;
pub mod store;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
}

use cli::Cli;
use cmd::*;
use db::Database;
use store::FileStore;

fn main() {
    let cli = Cli::parse();

    // Completions don't need state.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let data_dir = cli.data.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".workflow-hub")
    });

    let store = match FileStore::open(&data_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open data directory {}: {}", data_dir.display(), e);
            std::process::exit(1);
        }
    };

    let mut db = Database::load(&store);

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Ui => cmd_ui(&mut db, &store),

        Commands::Show { section } => cmd_show(&db, section),

        Commands::Project { action } => match action {
            ProjectAction::Add {
                name,
                desc,
                manager,
                start,
                end,
            } => cmd_project_add(&mut db, &store, name, desc, manager, start, end),
            ProjectAction::List => cmd_show(&db, fields::Section::Projects),
        },

        Commands::Task { action } => match action {
            TaskAction::Add {
                title,
                desc,
                assignee,
                project,
                priority,
                due,
            } => cmd_task_add(&mut db, &store, title, desc, assignee, project, priority, due),
            TaskAction::List { status, priority } => cmd_task_list(&db, status, priority),
            TaskAction::Toggle { id } => cmd_task_toggle(&mut db, &store, id),
        },

        Commands::Team { action } => match action {
            TeamAction::Add {
                name,
                email,
                role,
                department,
            } => cmd_team_add(&mut db, &store, name, email, role, department),
            TeamAction::List => cmd_show(&db, fields::Section::Team),
        },

        Commands::Workflow { action } => match action {
            WorkflowAction::Add { name, desc, steps } => {
                cmd_workflow_add(&mut db, &store, name, desc, steps)
            }
            WorkflowAction::List => cmd_show(&db, fields::Section::Workflows),
        },

        Commands::Search { query } => cmd_search(&db, &query),

        Commands::Login { email, password } => cmd_login(&mut db, &store, &email, &password),

        Commands::Logout => cmd_logout(&mut db, &store),

        Commands::Whoami => cmd_whoami(&db),
    }
}
