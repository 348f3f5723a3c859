//! LogoutHandler - Command handler for ending a session.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::user::AccountError;
use crate::ports::SessionStore;

/// Command to revoke the caller's session.
#[derive(Debug, Clone)]
pub struct LogoutCommand {
    pub user_id: UserId,
    pub session_token: String,
}

/// Handler for logging out.
pub struct LogoutHandler {
    sessions: Arc<dyn SessionStore>,
}

impl LogoutHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: LogoutCommand) -> Result<(), AccountError> {
        self.sessions.revoke(&cmd.session_token).await?;
        info!(user_id = %cmd.user_id, "User logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use chrono::Duration;

    #[tokio::test]
    async fn revokes_only_the_given_session() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let user_id = UserId::new("alice").unwrap();
        let laptop = sessions.create(&user_id, Duration::hours(1)).await.unwrap();
        let phone = sessions.create(&user_id, Duration::hours(1)).await.unwrap();

        LogoutHandler::new(sessions.clone())
            .handle(LogoutCommand {
                user_id: user_id.clone(),
                session_token: laptop.clone(),
            })
            .await
            .unwrap();

        assert_eq!(sessions.resolve(&laptop).await.unwrap(), None);
        assert_eq!(sessions.resolve(&phone).await.unwrap(), Some(user_id));
    }
}
