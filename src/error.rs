//! Error types for domain store and session operations.

use thiserror::Error;

/// Failures surfaced by the domain store and the session manager.
///
/// None of these are fatal: every failure leaves state as it was before the
/// call, and the user can simply retry.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A create operation was handed empty required fields.
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// Login email did not match any team member.
    #[error("no team member with email '{email}'")]
    UserNotFound { email: String },

    /// Login email matched but the password check failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The blob store rejected a read or write.
    #[error("store error: {0}")]
    Store(#[from] std::io::Error),
}

impl DomainError {
    /// Build a validation error from a (field, present?) checklist, keeping
    /// only the absent ones. Returns `None` when everything is present.
    pub fn validate(checks: &[(&'static str, bool)]) -> Option<Self> {
        let missing: Vec<&'static str> = checks
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            None
        } else {
            Some(DomainError::Validation { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_collects_every_missing_field() {
        let err = DomainError::validate(&[("name", false), ("email", true), ("role", false)])
            .expect("two fields missing");
        match err {
            DomainError::Validation { missing } => assert_eq!(missing, vec!["name", "role"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_passes_when_all_present() {
        assert!(DomainError::validate(&[("name", true), ("email", true)]).is_none());
    }
}
