use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_ADVICE_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ADVICE_MODEL: &str = "gpt-4o";
pub const DEFAULT_ROSTER_SIZE: usize = 20;
pub const DEFAULT_BOOKING_MONTH: u32 = 8;
pub const DEFAULT_REQUESTED_DAYS: [u32; 2] = [12, 13];
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_IDLE_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub advice_api_key: String,
    pub advice_base_url: String,
    pub advice_model: String,
    pub roster_size: usize,
    pub roster_seed: Option<u64>,
    /// Month (1-12) that free-text date extraction and "requested" date
    /// flags are locked to.
    pub booking_month: u32,
    pub requested_days: Vec<u32>,
    /// Consultations untouched for this long are dropped.
    pub session_idle_minutes: i64,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            advice_api_key: String::new(),
            advice_base_url: DEFAULT_ADVICE_BASE_URL.to_string(),
            advice_model: DEFAULT_ADVICE_MODEL.to_string(),
            roster_size: DEFAULT_ROSTER_SIZE,
            roster_seed: None,
            booking_month: DEFAULT_BOOKING_MONTH,
            requested_days: DEFAULT_REQUESTED_DAYS.to_vec(),
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            advice_api_key: env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("OPENAI_API_KEY not set, health advice will use the offline fallback");
                    String::new()
                }),
            advice_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| defaults.advice_base_url.clone()),
            advice_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| defaults.advice_model.clone()),
            roster_size: parse_var("ROSTER_SIZE").unwrap_or(defaults.roster_size),
            roster_seed: parse_var("ROSTER_SEED"),
            booking_month: match parse_var::<u32>("BOOKING_MONTH") {
                Some(month) if (1..=12).contains(&month) => month,
                Some(month) => {
                    warn!("BOOKING_MONTH {} out of range, using default", month);
                    defaults.booking_month
                }
                None => defaults.booking_month,
            },
            requested_days: env::var("REQUESTED_DAYS")
                .ok()
                .map(|raw| parse_day_list(&raw))
                .unwrap_or_else(|| defaults.requested_days.clone()),
            session_idle_minutes: match parse_var::<i64>("SESSION_IDLE_MINUTES") {
                Some(minutes) if minutes > 0 => minutes,
                Some(minutes) => {
                    warn!("SESSION_IDLE_MINUTES {} must be positive, using default", minutes);
                    defaults.session_idle_minutes
                }
                None => defaults.session_idle_minutes,
            },
            port: parse_var("PORT").unwrap_or(defaults.port),
        };

        if !config.is_advice_configured() {
            warn!("Health advice collaborator not configured - replies will carry the static disclaimer");
        }

        config
    }

    pub fn is_advice_configured(&self) -> bool {
        let key = self.advice_api_key.trim();
        !key.is_empty()
            && key != "your_openai_api_key_here"
            && !self.advice_base_url.is_empty()
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{} has an invalid value '{}', using default", name, raw);
            None
        }
    }
}

fn parse_day_list(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .filter(|day| (1..=31).contains(day))
        .collect()
}
