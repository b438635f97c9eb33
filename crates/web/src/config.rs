use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use storage::models::ScoreWeighting;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub api_keys: String,
    pub score_weighting: ScoreWeighting,
    /// Offset used to decide which calendar day a like belongs to.
    pub ledger_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            max_connections: parse_max_connections(
                std::env::var("DATABASE_MAX_CONNECTIONS").ok().as_deref(),
            )?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            score_weighting: parse_weighting(std::env::var("SCORE_WEIGHTING").ok().as_deref())?,
            ledger_offset: parse_utc_offset(
                std::env::var("LEDGER_UTC_OFFSET_MINUTES").ok().as_deref(),
            )?,
        })
    }
}

fn parse_max_connections(raw: Option<&str>) -> Result<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_MAX_CONNECTIONS),
        Some(value) => {
            let n: u32 = value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive number")?;
            if n == 0 {
                bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
            }
            Ok(n)
        }
    }
}

fn parse_weighting(raw: Option<&str>) -> Result<ScoreWeighting> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ScoreWeighting::default()),
        Some(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("SCORE_WEIGHTING: {e}")),
    }
}

fn parse_utc_offset(raw: Option<&str>) -> Result<FixedOffset> {
    let minutes = match raw.map(str::trim) {
        None | Some("") => 0,
        Some(value) => value
            .parse::<i32>()
            .context("LEDGER_UTC_OFFSET_MINUTES must be a whole number of minutes")?,
    };

    if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        bail!("LEDGER_UTC_OFFSET_MINUTES must be within +/-{MAX_UTC_OFFSET_MINUTES}");
    }

    FixedOffset::east_opt(minutes * 60).context("LEDGER_UTC_OFFSET_MINUTES is out of range")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_connections_defaults_and_rejects_zero() {
        assert_eq!(parse_max_connections(None).unwrap(), 10);
        assert_eq!(parse_max_connections(Some(" 25 ")).unwrap(), 25);
        assert!(parse_max_connections(Some("0")).is_err());
        assert!(parse_max_connections(Some("many")).is_err());
    }

    #[test]
    fn test_weighting_defaults_to_unweighted() {
        assert_eq!(parse_weighting(None).unwrap(), ScoreWeighting::Unweighted);
        assert_eq!(parse_weighting(Some("")).unwrap(), ScoreWeighting::Unweighted);
        assert_eq!(
            parse_weighting(Some("Weighted")).unwrap(),
            ScoreWeighting::Weighted
        );
        assert!(parse_weighting(Some("median")).is_err());
    }

    #[test]
    fn test_utc_offset() {
        assert_eq!(parse_utc_offset(None).unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset(Some("480")).unwrap().local_minus_utc(), 480 * 60);
        assert_eq!(parse_utc_offset(Some("-300")).unwrap().local_minus_utc(), -300 * 60);
        assert!(parse_utc_offset(Some("900")).is_err());
        assert!(parse_utc_offset(Some("eight")).is_err());
    }
}
