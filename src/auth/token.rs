//! Durable persistence for the session token.
//!
//! One token string, stored as JSON in the app's data directory so a
//! session survives process restarts. Reads never fail: a missing,
//! unreadable, or corrupt file just means "not logged in".

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Token file name in the data directory.
const TOKEN_FILE: &str = "token.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

pub struct TokenStore {
    data_dir: PathBuf,
}

impl TokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }

    /// Read the persisted token. No side effects; any storage problem
    /// degrades to `None`.
    pub fn load(&self) -> Option<String> {
        let path = self.token_path();
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to read token file");
                return None;
            }
        };
        match serde_json::from_str::<StoredToken>(&contents) {
            Ok(stored) => Some(stored.token),
            Err(e) => {
                warn!(error = %e, "Failed to parse token file");
                None
            }
        }
    }

    /// Persist a token, replacing any previous value.
    pub fn save(&self, token: &str) -> Result<()> {
        let stored = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        std::fs::create_dir_all(&self.data_dir)
            .context("Failed to create token directory")?;
        let contents = serde_json::to_string_pretty(&stored)?;
        std::fs::write(self.token_path(), contents).context("Failed to write token file")?;
        Ok(())
    }

    /// Remove the persisted token. Removing an absent token is a no-op.
    pub fn clear(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove token file")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_store() -> TokenStore {
        let dir = std::env::temp_dir().join(format!(
            "lectern-token-test-{}-{}",
            std::process::id(),
            DIR_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        TokenStore::new(dir)
    }

    #[test]
    fn test_save_load_clear_roundtrip() {
        let store = temp_store();
        assert_eq!(store.load(), None);

        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));

        // Overwrite replaces the prior value
        store.save("def").unwrap();
        assert_eq!(store.load().as_deref(), Some("def"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        let _ = std::fs::remove_dir_all(&store.data_dir);
    }

    #[test]
    fn test_clear_when_empty_is_noop() {
        let store = temp_store();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_corrupt_file_degrades_to_logged_out() {
        let store = temp_store();
        std::fs::create_dir_all(&store.data_dir).unwrap();
        std::fs::write(store.token_path(), "not json at all").unwrap();
        assert_eq!(store.load(), None);
        let _ = std::fs::remove_dir_all(&store.data_dir);
    }
}
