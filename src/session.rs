use crate::config::SessionConfig;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Locally persisted login flag
///
/// Route gating in the console is a single boolean in a client-local state
/// file; there is no server-side session. A missing or unparseable file
/// counts as logged out.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionState {
    #[serde(default)]
    authenticated: bool,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the configured path, or the default user data dir
    pub fn from_config(cfg: &SessionConfig) -> Result<Self, AppError> {
        match &cfg.state_file {
            Some(path) => Ok(Self::new(path.clone())),
            None => {
                let dir = dirs::data_dir().ok_or_else(|| {
                    AppError::SessionError("Could not determine the user data directory".to_string())
                })?;
                Ok(Self::new(dir.join("cnc-admin").join("session.json")))
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return false;
        };
        serde_json::from_str::<SessionState>(&content)
            .map(|state| state.authenticated)
            .unwrap_or(false)
    }

    /// Require a logged-in session, erroring otherwise
    pub fn require_authenticated(&self) -> Result<(), AppError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::NotAuthenticated)
        }
    }

    pub fn login(&self) -> Result<(), AppError> {
        let state = SessionState {
            authenticated: true,
        };
        let content = serde_json::to_string_pretty(&state)
            .map_err(|e| AppError::SessionError(format!("Failed to serialize state: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::SessionError(format!("Failed to create state directory: {}", e))
            })?;
        }

        fs::write(&self.path, content)
            .map_err(|e| AppError::SessionError(format!("Failed to write state file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, Permissions::from_mode(0o600)).map_err(|e| {
                AppError::SessionError(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    pub fn logout(&self) -> Result<(), AppError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AppError::SessionError(format!("Failed to remove state file: {}", e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SessionStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        (store, temp_dir)
    }

    #[test]
    fn test_fresh_store_is_logged_out() {
        let (store, _temp_dir) = create_test_store();
        assert!(!store.is_authenticated());
        assert!(store.require_authenticated().is_err());
    }

    #[test]
    fn test_login_then_logout() {
        let (store, _temp_dir) = create_test_store();

        store.login().unwrap();
        assert!(store.is_authenticated());
        assert!(store.require_authenticated().is_ok());

        store.logout().unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_logout_without_login_is_ok() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.logout().is_ok());
    }

    #[test]
    fn test_corrupt_state_file_counts_as_logged_out() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join("session.json"), "not json{").unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        SessionStore::new(path.clone()).login().unwrap();

        let reopened = SessionStore::new(path);
        assert!(reopened.is_authenticated());
    }
}
