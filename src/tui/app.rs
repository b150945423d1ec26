//! Interactive dashboard TUI.
//!
//! The `App` here is a renderer over the domain store: it derives section
//! view models through `view::render_section`, paints them, and translates
//! key presses into the same domain operations the CLI commands use. All
//! persistence goes through the blob store handed in at startup.

use std::io;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::db::Database;
use crate::fields::*;
use crate::query::{self, SearchOutcome};
use crate::session;
use crate::store::BlobStore;
use crate::tui::colors::{DARK_GREEN, DARK_PURPLE, DARK_RED, GOLD, STEEL_BLUE};
use crate::view::{render_section, SectionView, TaskRow};

/// Which screen the TUI is on.
#[derive(Clone, Copy, PartialEq)]
enum AppState {
    Browse,
    Login,
    Help,
}

/// Which login field has focus.
#[derive(Clone, Copy, PartialEq)]
enum LoginFocus {
    Email,
    Password,
}

const SECTIONS: [Section; 6] = [
    Section::Dashboard,
    Section::Projects,
    Section::Tasks,
    Section::Team,
    Section::Workflows,
    Section::Analytics,
];

/// Terminal renderer state. Owns no domain data; the database and store are
/// borrowed for the lifetime of the UI run.
pub struct App<'a> {
    db: &'a mut Database,
    store: &'a dyn BlobStore,
    state: AppState,
    section: Section,
    task_list_state: TableState,
    /// Task ids currently visible in the tasks section, filter/search applied.
    visible_tasks: Vec<u64>,
    search_text: String,
    search_active: bool,
    filter_status: Option<TaskStatus>,
    filter_priority: Option<Priority>,
    login_email: String,
    login_password: String,
    login_focus: LoginFocus,
    status_message: String,
}

impl<'a> App<'a> {
    pub fn new(db: &'a mut Database, store: &'a dyn BlobStore) -> Self {
        let mut app = App {
            db,
            store,
            state: AppState::Browse,
            section: Section::Dashboard,
            task_list_state: TableState::default(),
            visible_tasks: Vec::new(),
            search_text: String::new(),
            search_active: false,
            filter_status: None,
            filter_priority: None,
            login_email: String::new(),
            login_password: String::new(),
            login_focus: LoginFocus::Email,
            status_message: String::new(),
        };
        app.update_visible_tasks();
        app
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn section_color(&self) -> Color {
        match self.section {
            Section::Dashboard | Section::Analytics => STEEL_BLUE,
            Section::Projects => DARK_GREEN,
            Section::Tasks => GOLD,
            Section::Team => DARK_PURPLE,
            Section::Workflows => DARK_RED,
        }
    }

    /// Recompute the task rows the tasks section shows, applying the status
    /// and priority filters plus any active search, preserving selection
    /// where possible.
    fn update_visible_tasks(&mut self) {
        let old_selected_id = self
            .task_list_state
            .selected()
            .and_then(|idx| self.visible_tasks.get(idx))
            .copied();

        let mut tasks =
            query::filter_tasks(&self.db.tasks, self.filter_status, self.filter_priority);
        if let SearchOutcome::Results(r) = query::search(&self.search_text, &[], &tasks, &[]) {
            tasks = r.tasks;
        }
        self.visible_tasks = tasks.iter().map(|t| t.id).collect();

        if let Some(old_id) = old_selected_id {
            if let Some(new_idx) = self.visible_tasks.iter().position(|&id| id == old_id) {
                self.task_list_state.select(Some(new_idx));
            } else {
                self.task_list_state.select(if self.visible_tasks.is_empty() {
                    None
                } else {
                    Some(0)
                });
            }
        } else if !self.visible_tasks.is_empty() && self.task_list_state.selected().is_none() {
            self.task_list_state.select(Some(0));
        } else if self.visible_tasks.is_empty() {
            self.task_list_state.select(None);
        }
    }

    fn navigate(&mut self, section: Section) {
        self.section = section;
        self.status_message.clear();
        self.update_visible_tasks();
    }

    fn cycle_status_filter(&mut self) {
        self.filter_status = match self.filter_status {
            None => Some(TaskStatus::Todo),
            Some(TaskStatus::Todo) => Some(TaskStatus::InProgress),
            Some(TaskStatus::InProgress) => Some(TaskStatus::Review),
            Some(TaskStatus::Review) => Some(TaskStatus::Completed),
            Some(TaskStatus::Completed) => None,
        };
        self.update_visible_tasks();
        let label = self
            .filter_status
            .map_or("all", format_task_status);
        self.set_status_message(format!("Status filter: {label}"));
    }

    fn cycle_priority_filter(&mut self) {
        self.filter_priority = match self.filter_priority {
            None => Some(Priority::Low),
            Some(Priority::Low) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::High),
            Some(Priority::High) => Some(Priority::Urgent),
            Some(Priority::Urgent) => None,
        };
        self.update_visible_tasks();
        let label = self.filter_priority.map_or("all", format_priority);
        self.set_status_message(format!("Priority filter: {label}"));
    }

    fn toggle_selected_task(&mut self) {
        let Some(&task_id) = self
            .task_list_state
            .selected()
            .and_then(|idx| self.visible_tasks.get(idx))
        else {
            self.set_status_message("No task selected".to_string());
            return;
        };
        match self.db.toggle_task_complete(self.store, task_id) {
            Ok(Some(t)) => {
                self.set_status_message(format!(
                    "Task #{} marked {}",
                    t.id,
                    if t.completed { "completed" } else { "open" }
                ));
                self.update_visible_tasks();
            }
            Ok(None) => {}
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    fn submit_login(&mut self) {
        let email = self.login_email.trim().to_string();
        match session::login(self.db, self.store, &email, &self.login_password) {
            Ok(user) => {
                self.set_status_message(format!("Logged in as {}", user.name));
                self.state = AppState::Browse;
                self.login_email.clear();
                self.login_password.clear();
                self.login_focus = LoginFocus::Email;
            }
            Err(e) => self.set_status_message(format!("Login failed: {e}")),
        }
    }

    /// Handle keyboard input on the main browse screen.
    ///
    /// Returns true if the application should quit.
    fn handle_browse_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.search_active {
            match key {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.search_text.clear();
                    self.update_visible_tasks();
                    self.status_message.clear();
                }
                KeyCode::Enter => {
                    self.search_active = false;
                }
                KeyCode::Backspace => {
                    self.search_text.pop();
                    self.update_visible_tasks();
                }
                KeyCode::Char(c) => {
                    self.search_text.push(c);
                    self.update_visible_tasks();
                }
                _ => {}
            }
            return false;
        }

        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc => {
                if !self.search_text.is_empty() {
                    self.search_text.clear();
                    self.update_visible_tasks();
                    self.status_message.clear();
                } else {
                    return true;
                }
            }
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.navigate(SECTIONS[idx]);
            }
            KeyCode::Tab => {
                let idx = SECTIONS.iter().position(|&s| s == self.section).unwrap_or(0);
                self.navigate(SECTIONS[(idx + 1) % SECTIONS.len()]);
            }
            KeyCode::BackTab => {
                let idx = SECTIONS.iter().position(|&s| s == self.section).unwrap_or(0);
                self.navigate(SECTIONS[(idx + SECTIONS.len() - 1) % SECTIONS.len()]);
            }
            KeyCode::Up => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected > 0 {
                        self.task_list_state.select(Some(selected - 1));
                    }
                } else if !self.visible_tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < self.visible_tasks.len() {
                        self.task_list_state.select(Some(selected + 1));
                    }
                } else if !self.visible_tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter if self.section == Section::Tasks => {
                self.toggle_selected_task();
            }
            KeyCode::Char('/') => {
                self.search_active = true;
                self.search_text.clear();
                if self.section != Section::Tasks {
                    self.navigate(Section::Tasks);
                    self.search_active = true;
                }
            }
            KeyCode::Char('s') if self.section == Section::Tasks => self.cycle_status_filter(),
            KeyCode::Char('p') if self.section == Section::Tasks => self.cycle_priority_filter(),
            KeyCode::Char('l') => {
                self.state = AppState::Login;
                self.status_message.clear();
            }
            KeyCode::Char('o') => match session::logout(self.db, self.store) {
                Ok(()) => self.set_status_message("Logged out".to_string()),
                Err(e) => self.set_status_message(format!("Error: {e}")),
            },
            KeyCode::Char('h') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_login_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::Browse;
                self.login_email.clear();
                self.login_password.clear();
                self.login_focus = LoginFocus::Email;
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.login_focus = match self.login_focus {
                    LoginFocus::Email => LoginFocus::Password,
                    LoginFocus::Password => LoginFocus::Email,
                };
            }
            KeyCode::Enter => match self.login_focus {
                LoginFocus::Email => self.login_focus = LoginFocus::Password,
                LoginFocus::Password => self.submit_login(),
            },
            KeyCode::Backspace => {
                match self.login_focus {
                    LoginFocus::Email => self.login_email.pop(),
                    LoginFocus::Password => self.login_password.pop(),
                };
            }
            KeyCode::Char(c) => match self.login_focus {
                LoginFocus::Email => self.login_email.push(c),
                LoginFocus::Password => self.login_password.push(c),
            },
            _ => {}
        }
    }

    /// Handle one input event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(false);
            }
            match self.state {
                AppState::Browse => return Ok(self.handle_browse_input(key.code, key.modifiers)),
                AppState::Login => self.handle_login_input(key.code),
                AppState::Help => {
                    self.state = AppState::Browse;
                }
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = vec![Span::styled(
            "WORKFLOW HUB  ",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        for (i, section) in SECTIONS.iter().enumerate() {
            let label = format!("{}:{} ", i + 1, format_section(*section));
            if *section == self.section {
                spans.push(Span::styled(
                    label,
                    Style::default()
                        .fg(self.section_color())
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ));
            } else {
                spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
            }
        }
        let identity = match &self.db.session.current_user {
            Some(user) => format!("{} ({})", user.name, user.role),
            None => "not logged in".to_string(),
        };
        spans.push(Span::styled(
            format!(" | {identity}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ));

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_dashboard(&self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();
        let SectionView::Dashboard(v) = render_section(Section::Dashboard, self.db, today) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2 + v.project_progress.len() as u16),
            ])
            .split(area);

        let stats = Line::from(vec![
            Span::styled("Projects: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(v.total_projects.to_string()),
            Span::raw("   "),
            Span::styled("Open tasks: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(v.open_tasks.to_string()),
            Span::raw("   "),
            Span::styled("Team: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(v.team_members.to_string()),
            Span::raw("   "),
            Span::styled("Overdue: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                v.overdue_tasks.to_string(),
                Style::default().fg(if v.overdue_tasks > 0 {
                    Color::Red
                } else {
                    Color::Green
                }),
            ),
        ]);
        f.render_widget(
            Paragraph::new(stats).block(Block::default().borders(Borders::ALL).title("Overview")),
            chunks[0],
        );

        let activity_lines: Vec<Line> = v
            .recent_activities
            .iter()
            .map(|a| {
                Line::from(vec![
                    Span::styled(
                        format!("{}  ", a.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("{} ({})", a.description, a.timestamp)),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(activity_lines)
                .block(Block::default().borders(Borders::ALL).title("Recent Activity"))
                .wrap(Wrap { trim: true }),
            chunks[1],
        );

        let progress_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                std::iter::once(Constraint::Length(1))
                    .chain(v.project_progress.iter().map(|_| Constraint::Length(1)))
                    .collect::<Vec<_>>(),
            )
            .split(chunks[2]);
        f.render_widget(
            Paragraph::new(Span::styled(
                "Project Progress",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            progress_area[0],
        );
        for (i, p) in v.project_progress.iter().enumerate() {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(self.section_color()))
                .percent(p.progress as u16)
                .label(format!("{} {}% ({})", p.name, p.progress, p.manager.as_str()));
            f.render_widget(gauge, progress_area[i + 1]);
        }
    }

    fn render_projects(&self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();
        let SectionView::Projects(cards) = render_section(Section::Projects, self.db, today) else {
            return;
        };
        let header = Row::new(["ID", "Name", "Status", "Progress", "End", "Description"])
            .style(Style::default().bg(self.section_color()).fg(Color::White))
            .height(1);
        let rows: Vec<Row> = cards
            .iter()
            .map(|p| {
                let style = match p.status {
                    ProjectStatus::Completed => Style::default().fg(Color::DarkGray),
                    ProjectStatus::OnHold => Style::default().fg(Color::Yellow),
                    ProjectStatus::Active => Style::default().fg(Color::White),
                };
                Row::new(vec![
                    Cell::from(p.id.to_string()),
                    Cell::from(p.name.clone()),
                    Cell::from(format_project_status(p.status)),
                    Cell::from(format!("{}%", p.progress)),
                    Cell::from(p.end_date.to_string()),
                    Cell::from(p.description.clone()),
                ])
                .style(style)
            })
            .collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Length(28),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Min(20),
        ];
        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Projects ({})", cards.len())),
        );
        f.render_widget(table, area);
    }

    fn render_tasks(&mut self, f: &mut Frame, area: Rect) {
        let rows_data: Vec<TaskRow> = self
            .visible_tasks
            .iter()
            .filter_map(|&id| self.db.task(id))
            .map(TaskRow::from)
            .collect();

        let header = Row::new(["ID", "", "Title", "Status", "Priority", "Assignee", "Due", "Project"])
            .style(Style::default().bg(GOLD).fg(Color::Rgb(20, 20, 20)))
            .height(1);
        let rows: Vec<Row> = rows_data
            .iter()
            .map(|t| {
                let style = if t.completed {
                    Style::default().fg(Color::DarkGray)
                } else if t.priority == Priority::Urgent {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    Cell::from(t.id.to_string()),
                    Cell::from(if t.completed { "[x]" } else { "[ ]" }),
                    Cell::from(t.title.clone()),
                    Cell::from(format_task_status(t.status)),
                    Cell::from(format_priority(t.priority)),
                    Cell::from(t.assignee.as_str().to_string()),
                    Cell::from(t.due_date.to_string()),
                    Cell::from(t.project.as_str().to_string()),
                ])
                .style(style)
            })
            .collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(28),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Min(16),
        ];
        let status_label = self.filter_status.map_or("all", format_task_status);
        let priority_label = self.filter_priority.map_or("all", format_priority);
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) status={} priority={}",
                self.visible_tasks.len(),
                self.db.tasks.len(),
                status_label,
                priority_label,
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    fn render_team(&self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();
        let SectionView::Team(cards) = render_section(Section::Team, self.db, today) else {
            return;
        };
        let header = Row::new(["ID", "Name", "Role", "Department", "Completed", "Active"])
            .style(Style::default().bg(self.section_color()).fg(Color::White))
            .height(1);
        let rows: Vec<Row> = cards
            .iter()
            .map(|m| {
                Row::new(vec![
                    Cell::from(m.id.to_string()),
                    Cell::from(m.name.clone()),
                    Cell::from(m.role.clone()),
                    Cell::from(m.department.clone()),
                    Cell::from(m.tasks_completed.to_string()),
                    Cell::from(m.current_tasks.to_string()),
                ])
            })
            .collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Length(20),
            Constraint::Length(22),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Min(6),
        ];
        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Team ({})", cards.len())),
        );
        f.render_widget(table, area);
    }

    fn render_workflows(&self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();
        let SectionView::Workflows(cards) = render_section(Section::Workflows, self.db, today)
        else {
            return;
        };
        let mut lines: Vec<Line> = Vec::new();
        for w in &cards {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("#{} {} ", w.id, w.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("({} active instances)", w.active_instances),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(Span::raw(format!("  {}", w.description))));
            for s in &w.steps {
                let (mark, style) = if s.completed {
                    ("[x]", Style::default().fg(Color::Green))
                } else {
                    ("[ ]", Style::default().fg(Color::White))
                };
                lines.push(Line::from(Span::styled(
                    format!("  {mark} {}", s.name),
                    style,
                )));
            }
            lines.push(Line::from(""));
        }
        let para = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Workflows ({})", cards.len())),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(para, area);
    }

    fn render_analytics(&self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();
        let SectionView::Analytics(v) = render_section(Section::Analytics, self.db, today) else {
            return;
        };
        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            "Task status breakdown",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        let total: usize = v.status_breakdown.iter().map(|(_, n)| n).sum();
        for (status, n) in &v.status_breakdown {
            let bar = "█".repeat(if total == 0 { 0 } else { n * 30 / total.max(1) });
            lines.push(Line::from(format!(
                "  {:<12} {:>3}  {bar}",
                format_task_status(*status),
                n
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Project progress",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (name, progress) in &v.project_timeline {
            let bar = "█".repeat(*progress as usize * 30 / 100);
            lines.push(Line::from(format!("  {name:<28} {progress:>3}%  {bar}")));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Department headcount",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (dept, n) in &v.department_workload {
            lines.push(Line::from(format!("  {dept:<16} {n}")));
        }
        let para = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Analytics"))
            .wrap(Wrap { trim: false });
        f.render_widget(para, area);
    }

    fn render_login(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 40, area);
        f.render_widget(Clear, popup);

        let email_style = if self.login_focus == LoginFocus::Email {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let password_style = if self.login_focus == LoginFocus::Password {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let masked = "*".repeat(self.login_password.len());

        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Email:    ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(self.login_email.as_str(), email_style),
            ]),
            Line::from(vec![
                Span::styled("Password: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(masked, password_style),
            ]),
            Line::from(""),
            Line::from("Tab switches fields, Enter submits, Esc cancels"),
        ];
        let para = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Log In"))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        f.render_widget(para, popup);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 60, area);
        f.render_widget(Clear, popup);
        let text = vec![
            Line::from("1-6 / Tab    switch section"),
            Line::from("Up/Down      move selection (tasks)"),
            Line::from("Space/Enter  toggle selected task"),
            Line::from("/            search tasks"),
            Line::from("s            cycle status filter"),
            Line::from("p            cycle priority filter"),
            Line::from("l            log in"),
            Line::from("o            log out"),
            Line::from("q / Esc      quit"),
            Line::from(""),
            Line::from("Press any key to close"),
        ];
        let para = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .alignment(Alignment::Left);
        f.render_widget(para, popup);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.search_active {
            format!("Search: {} (Esc to clear, Enter to confirm)", self.search_text)
        } else if !self.search_text.is_empty() {
            format!(
                "Tasks: {} (search '{}') | Press 'h' for help",
                self.visible_tasks.len(),
                self.search_text
            )
        } else {
            format!(
                "{} | Press 'h' for help, 'q' to quit",
                format_section(self.section)
            )
        };
        let color = self.section_color();
        let text_color = match color {
            GOLD => Color::Rgb(20, 20, 20),
            _ => Color::White,
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(color).fg(text_color))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the section renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        match self.section {
            Section::Dashboard => self.render_dashboard(f, chunks[1]),
            Section::Projects => self.render_projects(f, chunks[1]),
            Section::Tasks => self.render_tasks(f, chunks[1]),
            Section::Team => self.render_team(f, chunks[1]),
            Section::Workflows => self.render_workflows(f, chunks[1]),
            Section::Analytics => self.render_analytics(f, chunks[1]),
        }

        match self.state {
            AppState::Login => self.render_login(f, chunks[1]),
            AppState::Help => self.render_help(f, chunks[1]),
            AppState::Browse => {}
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop: draw, then process one input event, until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Helper to build a centered rect using a percentage of the available area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Set up the terminal, run the dashboard UI, and restore the terminal.
pub fn run_tui(db: &mut Database, store: &dyn BlobStore) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(db, store);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
