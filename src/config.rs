use crate::errors::{AppError, AppResult};
use crate::tournament::streak::DEFAULT_DAY_HOURS;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// Hours per "day" when walking trade dates for streaks.
    pub streak_day_hours: i64,
    /// Points on a preview P/L curve.
    pub preview_samples: usize,
    /// Half-width of the default preview range, as a fraction of the reference price.
    pub preview_range_pct: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3001,
            streak_day_hours: DEFAULT_DAY_HOURS,
            preview_samples: 200,
            preview_range_pct: 0.25,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("SERVER_PORT: {e}")))?;

        let streak_day_hours = env_var_or("STREAK_DAY_HOURS", &DEFAULT_DAY_HOURS.to_string())
            .parse::<i64>()
            .map_err(|e| AppError::Config(format!("STREAK_DAY_HOURS: {e}")))?;
        if streak_day_hours <= 0 {
            return Err(AppError::Config(format!(
                "STREAK_DAY_HOURS must be positive, got {streak_day_hours}"
            )));
        }

        let preview_samples = env_var_or("PREVIEW_SAMPLES", "200")
            .parse::<usize>()
            .map_err(|e| AppError::Config(format!("PREVIEW_SAMPLES: {e}")))?;
        if preview_samples < 2 {
            return Err(AppError::Config("PREVIEW_SAMPLES must be at least 2".into()));
        }

        let preview_range_pct = env_var_or("PREVIEW_RANGE_PCT", "0.25")
            .parse::<f64>()
            .map_err(|e| AppError::Config(format!("PREVIEW_RANGE_PCT: {e}")))?;
        if !(preview_range_pct > 0.0 && preview_range_pct < 1.0) {
            return Err(AppError::Config(format!(
                "PREVIEW_RANGE_PCT must be in (0, 1), got {preview_range_pct}"
            )));
        }

        Ok(Self {
            server_port,
            streak_day_hours,
            preview_samples,
            preview_range_pct,
        })
    }

    #[inline]
    pub fn streak_day_length(&self) -> chrono::Duration {
        chrono::Duration::hours(self.streak_day_hours)
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
