//! Per-user session context
//!
//! A session is created when a user logs in and cleared on logout. It is
//! owned by the caller and passed to whatever needs it.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Local};
use tracing::info;

/// Who is logged in, since when, and their current state selection
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    username: Option<String>,
    login_time: Option<DateTime<Local>>,
    selected_state: Option<String>,
}

impl SessionContext {
    /// An empty, logged-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Log in with a display name. Blank names are rejected.
    pub fn login(&mut self, username: &str) -> Result<()> {
        self.login_at(username, Local::now())
    }

    /// Log in with an explicit timestamp
    pub fn login_at(&mut self, username: &str, at: DateTime<Local>) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Username must not be empty".to_string(),
            ));
        }

        info!(username, "User logged in");
        self.username = Some(username.to_string());
        self.login_time = Some(at);
        self.selected_state = None;
        Ok(())
    }

    /// Clear everything the session holds
    pub fn logout(&mut self) {
        if let Some(username) = self.username.take() {
            info!(username = %username, "User logged out");
        }
        self.login_time = None;
        self.selected_state = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn login_time(&self) -> Option<DateTime<Local>> {
        self.login_time
    }

    /// Remember the state the user is looking at. Requires a login.
    pub fn select_state(&mut self, state_name: &str) -> Result<()> {
        if !self.is_authenticated() {
            return Err(ForecastError::InvalidParameter(
                "Cannot select a state before logging in".to_string(),
            ));
        }
        self.selected_state = Some(state_name.to_string());
        Ok(())
    }

    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state.as_deref()
    }

    /// Greeting shown after login
    pub fn welcome_message(&self) -> Option<String> {
        let username = self.username.as_ref()?;
        let login_time = self.login_time?;
        Some(format!(
            "Welcome, {}. You logged in at {}.",
            username,
            login_time.format("%Y-%m-%d %H:%M:%S")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_login_logout_lifecycle() {
        let mut session = SessionContext::new();
        assert!(!session.is_authenticated());
        assert!(session.welcome_message().is_none());

        let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        session.login_at("  Ana ", at).unwrap();
        assert_eq!(session.username(), Some("Ana"));
        assert_eq!(session.login_time(), Some(at));
        assert_eq!(
            session.welcome_message().unwrap(),
            "Welcome, Ana. You logged in at 2024-03-01 09:30:00."
        );

        session.select_state("Texas").unwrap();
        assert_eq!(session.selected_state(), Some("Texas"));

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.login_time().is_none());
        assert!(session.selected_state().is_none());
    }

    #[test]
    fn test_blank_username_rejected() {
        let mut session = SessionContext::new();
        assert!(session.login("   ").is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_select_state_requires_login() {
        let mut session = SessionContext::new();
        assert!(session.select_state("Texas").is_err());
    }
}
