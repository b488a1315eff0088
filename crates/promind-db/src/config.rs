//! Database configuration for promind-db
//!
//! Local SQLite by default; a remote Turso URL plus auth token also works
//! since the driver speaks both.

/// Configuration for database connections
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database path or URL
    pub path: String,
    /// Authentication token for remote databases (Turso)
    pub auth_token: Option<String>,
    /// Connection timeout in seconds
    pub timeout_secs: u64,
}

impl DatabaseConfig {
    /// Create a new database configuration with default settings
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            auth_token: None,
            timeout_secs: 30,
        }
    }

    /// Create configuration for a remote Turso database
    pub fn remote<P: Into<String>>(url: P, auth_token: String) -> Self {
        Self {
            path: url.into(),
            auth_token: Some(auth_token),
            timeout_secs: 30,
        }
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Check if this is a remote database configuration
    pub fn is_remote(&self) -> bool {
        self.path.starts_with("libsql://") || self.auth_token.is_some()
    }

    /// Check if this is an in-memory database
    pub fn is_memory(&self) -> bool {
        self.path == ":memory:" || self.path.contains("mode=memory")
    }

    /// Get database type description
    pub fn database_type(&self) -> &'static str {
        if self.is_memory() {
            "in-memory SQLite"
        } else if self.is_remote() {
            "Turso (remote SQLite)"
        } else {
            "local SQLite"
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("promind.db")
    }
}

impl<P: Into<String>> From<P> for DatabaseConfig {
    fn from(path: P) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_config() {
        let config = DatabaseConfig::new("test.db");
        assert_eq!(config.path, "test.db");
        assert!(config.auth_token.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.database_type(), "local SQLite");
    }

    #[test]
    fn test_memory_config() {
        let config = DatabaseConfig::new(":memory:");
        assert!(config.is_memory());
        assert_eq!(config.database_type(), "in-memory SQLite");
    }

    #[test]
    fn test_remote_config() {
        let config = DatabaseConfig::remote("libsql://my-db.turso.io", "auth-token-123".to_string());
        assert!(config.is_remote());
        assert_eq!(config.database_type(), "Turso (remote SQLite)");
        assert_eq!(config.auth_token, Some("auth-token-123".to_string()));
    }
}
