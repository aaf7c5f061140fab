use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::{error::Error, service::auth::AdminRole};

pub const SESSION_ROLE_KEY: &str = "heimdall:auth:role";

/// The authenticated administrator role stored in the session after a
/// successful OTP verification.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionRole(pub String);

impl SessionRole {
    /// Insert the authenticated role into the session
    pub async fn insert(session: &Session, role: AdminRole) -> Result<(), Error> {
        session
            .insert(SESSION_ROLE_KEY, SessionRole(role.as_str().to_string()))
            .await?;

        Ok(())
    }

    /// Get the authenticated role from the session
    pub async fn get(session: &Session) -> Result<Option<AdminRole>, Error> {
        Ok(session
            .get::<SessionRole>(SESSION_ROLE_KEY)
            .await?
            .and_then(|SessionRole(role)| AdminRole::parse(&role)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::SessionRole;
    use crate::server::service::auth::AdminRole;

    fn session() -> Session {
        let store = Arc::new(MemoryStore::default());
        Session::new(None, store, None)
    }

    /// Expect a stored role to round-trip through the session
    #[tokio::test]
    async fn test_insert_and_get_role() {
        let session = session();

        SessionRole::insert(&session, AdminRole::Office)
            .await
            .expect("insert role");

        let role = SessionRole::get(&session).await.expect("get role");

        assert_eq!(role, Some(AdminRole::Office));
    }

    /// Expect an empty session to yield no role
    #[tokio::test]
    async fn test_get_role_empty_session() {
        let session = session();

        let role = SessionRole::get(&session).await.expect("get role");

        assert!(role.is_none());
    }
}
