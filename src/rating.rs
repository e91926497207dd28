//! The occasional "do you like this viewer?" prompt.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, SettingsData};

pub const SNOOZE_DAYS: i64 = 7;

pub const REVIEW_URL: &str =
    "https://chrome.google.com/webstore/detail/better-text-viewer/lcaidopdffhfemoefoaadecppnjdknkc/reviews";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RatingAnswer {
    Later,
    Never,
    RateNow,
}

impl RatingAnswer {
    /// Days until the next prompt; negative disables it.
    pub fn days(self) -> i64 {
        match self {
            RatingAnswer::Later => SNOOZE_DAYS,
            RatingAnswer::Never | RatingAnswer::RateNow => -1,
        }
    }

    /// Page to open after answering, if any.
    pub fn follow_up_url(self) -> Option<&'static str> {
        match self {
            RatingAnswer::RateNow => Some(REVIEW_URL),
            _ => None,
        }
    }
}

pub fn should_prompt(settings: &SettingsData, now: DateTime<Utc>) -> bool {
    settings.next_rating_prompt.map_or(false, |at| now > at)
}

pub fn next_prompt_date(days: i64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (days >= 0).then(|| now + Duration::days(days))
}

/// Reschedules the prompt `days` from `now` and persists it.
pub fn set_next_rating_prompt_date(config: &mut Config, days: i64, now: DateTime<Utc>) -> Result<()> {
    config.data.next_rating_prompt = next_prompt_date(days, now);
    debug!("Next rating prompt: {:?}", config.data.next_rating_prompt);
    config.save()
}

pub fn record_answer(config: &mut Config, answer: RatingAnswer, now: DateTime<Utc>) -> Result<()> {
    set_next_rating_prompt_date(config, answer.days(), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prompt_only_after_date() {
        let now = Utc::now();
        let mut settings = SettingsData::default();
        assert!(!should_prompt(&settings, now));

        settings.next_rating_prompt = Some(now + Duration::days(1));
        assert!(!should_prompt(&settings, now));

        settings.next_rating_prompt = Some(now - Duration::seconds(1));
        assert!(should_prompt(&settings, now));
    }

    #[test]
    fn test_negative_days_disable_prompt() {
        let now = Utc::now();
        assert_eq!(next_prompt_date(-1, now), None);
        assert_eq!(next_prompt_date(0, now), Some(now));
    }

    #[test]
    fn test_answers() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut config = Config::load_or_create(temp_dir.path())?;
        let now = Utc::now();

        record_answer(&mut config, RatingAnswer::Later, now)?;
        assert_eq!(config.data.next_rating_prompt, Some(now + Duration::days(7)));

        record_answer(&mut config, RatingAnswer::RateNow, now)?;
        assert_eq!(config.data.next_rating_prompt, None);
        assert_eq!(RatingAnswer::RateNow.follow_up_url(), Some(REVIEW_URL));

        let reloaded = Config::load_or_create(temp_dir.path())?;
        assert_eq!(reloaded.data.next_rating_prompt, None);
        Ok(())
    }
}
