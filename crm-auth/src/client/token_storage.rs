use crate::error::AuthError;
use std::fs;
use std::path::PathBuf;

/// Durable key/value storage for session credentials.
///
/// Everything lives in a single JSON object file so the session survives a
/// restart. Reads are fail-open: any I/O or parse problem is treated as "no
/// value", never an error, so a broken store degrades to the logged-out
/// state instead of taking the application down.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub const ACCESS_TOKEN: &'static str = "accessToken";
    pub const REFRESH_TOKEN: &'static str = "refreshToken";
    pub const ID_TOKEN: &'static str = "idToken";
    /// Absolute expiry as epoch milliseconds, string-encoded.
    pub const TOKEN_EXPIRY: &'static str = "tokenExpiry";

    const KEYS: [&'static str; 4] = [
        Self::ACCESS_TOKEN,
        Self::REFRESH_TOKEN,
        Self::ID_TOKEN,
        Self::TOKEN_EXPIRY,
    ];

    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Storage("Could not find cache directory".to_string()))?
            .join("crm");

        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir).map_err(|e| {
                AuthError::Storage(format!("Failed to create cache directory: {}", e))
            })?;
        }

        Ok(Self {
            path: cache_dir.join("session.json"),
        })
    }

    /// Store backed by an explicit file, used by tests and embedders that
    /// manage their own paths.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let map = self.read_map()?;
        map.get(key).and_then(|v| v.as_str()).map(str::to_string)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        self.write_map(&map)
    }

    pub fn remove(&self, key: &str) -> Result<(), AuthError> {
        let Some(mut map) = self.read_map() else {
            return Ok(());
        };
        map.remove(key);
        self.write_map(&map)
    }

    /// Remove every session key. The file is deleted rather than rewritten
    /// so a fresh bootstrap reads a genuinely empty store.
    pub fn clear(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| AuthError::Storage(format!("Failed to clear tokens: {}", e)))?;
        }
        Ok(())
    }

    /// True when none of the session keys hold a value.
    pub fn is_empty(&self) -> bool {
        Self::KEYS.iter().all(|key| self.get(key).is_none())
    }

    fn read_map(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn write_map(&self, map: &serde_json::Map<String, serde_json::Value>) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)
            .map_err(|e| AuthError::Storage(format!("Failed to save tokens: {}", e)))?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.path)
                .map_err(|e| AuthError::Storage(format!("Failed to get file permissions: {}", e)))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(|e| {
                AuthError::Storage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn set_get_remove_roundtrip() {
        let (_dir, store) = temp_store();

        assert_eq!(store.get(TokenStore::ACCESS_TOKEN), None);

        store.set(TokenStore::ACCESS_TOKEN, "a1").unwrap();
        store.set(TokenStore::TOKEN_EXPIRY, "3600000").unwrap();
        assert_eq!(store.get(TokenStore::ACCESS_TOKEN).as_deref(), Some("a1"));
        assert_eq!(store.get(TokenStore::TOKEN_EXPIRY).as_deref(), Some("3600000"));

        store.remove(TokenStore::ACCESS_TOKEN).unwrap();
        assert_eq!(store.get(TokenStore::ACCESS_TOKEN), None);
        assert_eq!(store.get(TokenStore::TOKEN_EXPIRY).as_deref(), Some("3600000"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        TokenStore::at(&path).set(TokenStore::REFRESH_TOKEN, "r1").unwrap();

        let reopened = TokenStore::at(&path);
        assert_eq!(reopened.get(TokenStore::REFRESH_TOKEN).as_deref(), Some("r1"));
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let (_dir, store) = temp_store();
        std::fs::write(&store.path, "not json").unwrap();

        assert_eq!(store.get(TokenStore::ACCESS_TOKEN), None);
        assert!(store.is_empty());

        // A write after corruption starts from a clean slate
        store.set(TokenStore::ACCESS_TOKEN, "a2").unwrap();
        assert_eq!(store.get(TokenStore::ACCESS_TOKEN).as_deref(), Some("a2"));
    }

    #[test]
    fn clear_removes_every_key() {
        let (_dir, store) = temp_store();
        store.set(TokenStore::ACCESS_TOKEN, "a").unwrap();
        store.set(TokenStore::REFRESH_TOKEN, "r").unwrap();
        store.set(TokenStore::ID_TOKEN, "i").unwrap();
        store.set(TokenStore::TOKEN_EXPIRY, "1").unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
