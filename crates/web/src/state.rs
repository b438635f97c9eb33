use axum::extract::FromRef;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use storage::{Database, models::ScoreWeighting};

use crate::config::Config;

/// Scoring and ledger policy shared by every request.
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub weighting: ScoreWeighting,
    pub ledger_offset: FixedOffset,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            weighting: config.score_weighting,
            ledger_offset: config.ledger_offset,
        }
    }

    /// The ledger's current calendar day.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.ledger_offset).date_naive()
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            weighting: ScoreWeighting::default(),
            ledger_offset: Utc.fix(),
        }
    }
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub settings: EngineSettings,
}
