use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    /// Minimum seconds between two automatic syncs of the same assignment.
    pub min_sync_interval: u64,
    /// Seconds between two scheduler passes over every site.
    pub cron_interval: u64,
    pub event_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: default_database_url(),
                max_connections: 5,
            },
            sync: SyncConfig::default(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            auto_sync: true,
            min_sync_interval: 300, // 5 minutes
            cron_interval: 300,
            event_capacity: 64,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("ASSIGN_SYNC_DATABASE_URL") {
            let v = v.trim();
            if !v.is_empty() {
                cfg.database.url = v.to_string();
            }
        }
        if let Some(value) = lookup("ASSIGN_SYNC_DB_MAX_CONNECTIONS").and_then(|v| parse_u32(&v)) {
            cfg.database.max_connections = value;
        }
        if let Some(v) = lookup("ASSIGN_SYNC_AUTO") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Some(value) = lookup("ASSIGN_SYNC_MIN_INTERVAL_SECS").and_then(|v| parse_u64(&v)) {
            cfg.sync.min_sync_interval = value;
        }
        if let Some(value) = lookup("ASSIGN_SYNC_CRON_INTERVAL_SECS").and_then(|v| parse_u64(&v)) {
            cfg.sync.cron_interval = value.max(1);
        }
        if let Some(value) = lookup("ASSIGN_SYNC_EVENT_CAPACITY").and_then(|v| parse_usize(&v)) {
            cfg.sync.event_capacity = value;
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.sync.cron_interval == 0 {
            return Err("Sync cron_interval must be greater than 0".to_string());
        }
        if self.sync.event_capacity == 0 {
            return Err("Sync event_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn default_database_url() -> String {
    match dirs::data_dir() {
        Some(dir) => format!(
            "sqlite:{}?mode=rwc",
            dir.join("assign-sync").join("offline.db").display()
        ),
        None => "sqlite:data/offline.db?mode=rwc".to_string(),
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}
