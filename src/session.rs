//! Login/logout state machine over the domain store's session.
//!
//! The credential check is deliberately a toy: one shared secret for every
//! team member, exactly as the source application behaves. Login identity
//! only drives the display; no other operation checks it.

use crate::db::Database;
use crate::error::DomainError;
use crate::model::{Session, TeamMember};
use crate::store::BlobStore;

/// The single shared password accepted for every account.
pub const SHARED_PASSWORD: &str = "123";

/// Attempt a login by exact email match plus the shared-secret check.
///
/// On failure the session is left untouched; on success the member snapshot
/// becomes the current user and the session slot is persisted.
pub fn login(
    db: &mut Database,
    store: &dyn BlobStore,
    email: &str,
    password: &str,
) -> Result<TeamMember, DomainError> {
    let member = db
        .member_by_email(email)
        .cloned()
        .ok_or_else(|| DomainError::UserNotFound {
            email: email.to_string(),
        })?;
    if password != SHARED_PASSWORD {
        return Err(DomainError::InvalidCredentials);
    }

    db.session = Session {
        current_user: Some(member.clone()),
    };
    db.persist_session(store)?;
    Ok(member)
}

/// Log out unconditionally and clear the persisted session slot.
pub fn logout(db: &mut Database, store: &dyn BlobStore) -> Result<(), DomainError> {
    db.session = Session::default();
    db.persist_session(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SLOT_SESSION};

    fn fresh() -> (Database, MemoryStore) {
        let store = MemoryStore::new();
        let db = Database::load(&store);
        (db, store)
    }

    #[test]
    fn login_with_shared_password_succeeds() {
        let (mut db, store) = fresh();
        let user = login(&mut db, &store, "sarah.johnson@company.com", "123").unwrap();
        assert_eq!(user.name, "Sarah Johnson");
        assert_eq!(
            db.session.current_user.as_ref().map(|u| u.name.as_str()),
            Some("Sarah Johnson")
        );
        assert!(store.get(SLOT_SESSION).unwrap().is_some());
    }

    #[test]
    fn wrong_password_fails_and_leaves_session_unchanged() {
        let (mut db, store) = fresh();
        login(&mut db, &store, "sarah.johnson@company.com", "123").unwrap();

        let err = login(&mut db, &store, "sarah.johnson@company.com", "wrong").unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
        assert_eq!(
            db.session.current_user.as_ref().map(|u| u.name.as_str()),
            Some("Sarah Johnson")
        );
    }

    #[test]
    fn unknown_email_fails_with_user_not_found() {
        let (mut db, store) = fresh();
        let err = login(&mut db, &store, "nobody@company.com", "123").unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound { .. }));
        assert!(db.session.current_user.is_none());
    }

    #[test]
    fn logout_clears_session_and_slot() {
        let (mut db, store) = fresh();
        login(&mut db, &store, "john.doe@company.com", "123").unwrap();
        logout(&mut db, &store).unwrap();
        assert!(db.session.current_user.is_none());
        assert_eq!(store.get(SLOT_SESSION).unwrap(), None);

        // Logging out while logged out is fine too.
        logout(&mut db, &store).unwrap();
    }

    #[test]
    fn session_survives_a_reload() {
        let (mut db, store) = fresh();
        login(&mut db, &store, "mike.smith@company.com", "123").unwrap();

        let reloaded = Database::load(&store);
        assert_eq!(
            reloaded.session.current_user.map(|u| u.email),
            Some("mike.smith@company.com".to_string())
        );
    }
}
