//! Stateless query and filter functions over the dashboard collections.
//!
//! Everything here is a pure projection: no persistence, no mutation, input
//! order always preserved.

use crate::fields::{Priority, TaskStatus};
use crate::model::{Project, Task, TeamMember};

/// Queries shorter than this many characters do not activate search.
const MIN_QUERY_LEN: usize = 2;

/// Matches found for an active search, one list per entity type.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub members: Vec<TeamMember>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.tasks.is_empty() && self.members.is_empty()
    }
}

/// Outcome of a search request.
///
/// `Inactive` is the sentinel for a query too short to search on; the caller
/// falls back to the current section's default view.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Inactive,
    Results(SearchResults),
}

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive substring search across projects (name/description),
/// tasks (title/description) and members (name/role).
///
/// The query is taken as-is: whitespace counts toward the length check and
/// stays in the needle.
pub fn search(
    query: &str,
    projects: &[Project],
    tasks: &[Task],
    members: &[TeamMember],
) -> SearchOutcome {
    if query.chars().count() < MIN_QUERY_LEN {
        return SearchOutcome::Inactive;
    }
    let needle = query.to_lowercase();

    let results = SearchResults {
        projects: projects
            .iter()
            .filter(|p| matches(&p.name, &needle) || matches(&p.description, &needle))
            .cloned()
            .collect(),
        tasks: tasks
            .iter()
            .filter(|t| matches(&t.title, &needle) || matches(&t.description, &needle))
            .cloned()
            .collect(),
        members: members
            .iter()
            .filter(|m| matches(&m.name, &needle) || matches(&m.role, &needle))
            .cloned()
            .collect(),
    };
    SearchOutcome::Results(results)
}

/// Filter tasks by status and priority. `None` on either axis is the "all"
/// wildcard; otherwise exact equality. Order is preserved.
pub fn filter_tasks(
    tasks: &[Task],
    status: Option<TaskStatus>,
    priority: Option<Priority>,
) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| priority.map_or(true, |p| t.priority == p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn short_query_returns_the_inactive_sentinel() {
        let projects = seed::projects();
        let tasks = seed::tasks();
        let members = seed::team_members();
        for q in ["", "a", " "] {
            assert!(matches!(
                search(q, &projects, &tasks, &members),
                SearchOutcome::Inactive
            ));
        }
        // Empty collections too.
        assert!(matches!(search("a", &[], &[], &[]), SearchOutcome::Inactive));
    }

    #[test]
    fn whitespace_counts_toward_the_query_length() {
        let tasks = seed::tasks();
        // " a " is three characters, so the search runs; the padded needle
        // matches nothing in the seed titles or descriptions.
        let SearchOutcome::Results(r) = search(" a ", &[], &tasks, &[]) else {
            panic!("expected active search");
        };
        assert!(r.is_empty());
        assert!(matches!(search("  ", &[], &tasks, &[]), SearchOutcome::Results(_)));
    }

    #[test]
    fn search_is_case_insensitive_across_entity_fields() {
        let projects = seed::projects();
        let tasks = seed::tasks();
        let members = seed::team_members();

        let SearchOutcome::Results(r) = search("DESIGN", &projects, &tasks, &members) else {
            panic!("expected active search");
        };
        // "redesign" in a project name/description, "Design" in task titles
        // and descriptions, "Designer" in a member role.
        assert_eq!(r.projects.len(), 1);
        assert_eq!(r.projects[0].name, "Website Redesign");
        assert!(r.tasks.iter().any(|t| t.title == "Design Homepage Layout"));
        assert_eq!(r.members.len(), 1);
        assert_eq!(r.members[0].role, "UI/UX Designer");
    }

    #[test]
    fn search_preserves_collection_order() {
        let tasks = seed::tasks();
        let SearchOutcome::Results(r) = search("de", &[], &tasks, &[]) else {
            panic!("expected active search");
        };
        let ids: Vec<u64> = r.tasks.iter().map(|t| t.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn no_match_is_an_active_empty_result_not_the_sentinel() {
        let SearchOutcome::Results(r) = search("zzzz", &[], &seed::tasks(), &[]) else {
            panic!("expected active search");
        };
        assert!(r.is_empty());
    }

    #[test]
    fn filter_all_all_returns_the_full_input_in_order() {
        let tasks = seed::tasks();
        let out = filter_tasks(&tasks, None, None);
        let ids: Vec<u64> = out.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn filter_applies_both_axes_exactly() {
        let tasks = seed::tasks();
        let high = filter_tasks(&tasks, None, Some(Priority::High));
        assert_eq!(high.len(), 2);

        let in_progress_high =
            filter_tasks(&tasks, Some(TaskStatus::InProgress), Some(Priority::High));
        assert_eq!(in_progress_high.len(), 1);
        assert_eq!(in_progress_high[0].id, 2);

        let completed_low = filter_tasks(&tasks, Some(TaskStatus::Completed), Some(Priority::Low));
        assert!(completed_low.is_empty());
    }
}
