use std::env;
use tracing::warn;

/// Consultation length used when a professional snapshot or request does not carry one.
pub const DEFAULT_CONSULTATION_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    pub default_consultation_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("AGENDA_BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("AGENDA_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| {
                    warn!("AGENDA_PORT not set or invalid, using 3000");
                    3000
                }),
            default_consultation_minutes: env::var("AGENDA_DEFAULT_CONSULTATION_MINUTES")
                .ok()
                .and_then(|value| value.parse().ok())
                .filter(|minutes| *minutes > 0)
                .unwrap_or_else(|| {
                    warn!(
                        "AGENDA_DEFAULT_CONSULTATION_MINUTES not set or invalid, using {}",
                        DEFAULT_CONSULTATION_MINUTES
                    );
                    DEFAULT_CONSULTATION_MINUTES
                }),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            default_consultation_minutes: DEFAULT_CONSULTATION_MINUTES,
        }
    }
}
