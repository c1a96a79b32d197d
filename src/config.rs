use std::env;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    /// Optional path to a JSON slot catalog ({"YYYY-MM-DD": ["10:00 AM", ...]}).
    pub catalog_path: Option<String>,
    /// How long a conflict notice stays visible on the client, in milliseconds.
    pub conflict_notice_ms: u64,
    pub reminder_poll_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            catalog_path: env::var("CATALOG_PATH").ok(),
            conflict_notice_ms: env::var("CONFLICT_NOTICE_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("CONFLICT_NOTICE_MS must be a number"),
            reminder_poll_secs: env::var("REMINDER_POLL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("REMINDER_POLL_SECS must be a number"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            catalog_path: None,
            conflict_notice_ms: 5000,
            reminder_poll_secs: 300,
        }
    }
}
