//! Usage statistics over stored questions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Duration unit table used by [`display_duration`], largest first.
const DURATION_UNITS: [(f64, &str); 5] = [
    (31_536_000.0, "year"),
    (86_400.0, "day"),
    (3_600.0, "hour"),
    (60.0, "minute"),
    (1.0, "second"),
];

/// Render a duration in seconds as a coarse human-readable string.
///
/// Only the largest non-zero unit is reported, so `3_660.0` renders as
/// `"1 hour"` rather than `"1 hour 1 minute"`. Sub-second durations render
/// as `"less than a second"`.
#[must_use]
pub fn display_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    for (span, label) in DURATION_UNITS {
        let count = (seconds / span).floor();
        if count >= 1.0 {
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "count is a non-negative floored value well below u64::MAX"
            )]
            let count = count as u64;
            let suffix = if count == 1 { "" } else { "s" };
            return format!("{count} {label}{suffix}");
        }
    }
    "less than a second".to_owned()
}

/// Aggregated question counters, either global or scoped to one recipient.
///
/// The average response time is only defined over answered questions and is
/// absent while none have been answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionStats {
    asked_count: u64,
    answered_count: u64,
    avg_response_time_seconds: Option<f64>,
}

impl QuestionStats {
    /// Build a [`QuestionStats`] from aggregated counters.
    #[must_use]
    pub const fn new(
        asked_count: u64,
        answered_count: u64,
        avg_response_time_seconds: Option<f64>,
    ) -> Self {
        Self {
            asked_count,
            answered_count,
            avg_response_time_seconds,
        }
    }

    /// The zero-question state reported for unknown recipients.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0, 0, None)
    }

    /// Total questions asked.
    #[must_use]
    pub const fn asked_count(&self) -> u64 {
        self.asked_count
    }

    /// Questions with a recorded answer.
    #[must_use]
    pub const fn answered_count(&self) -> u64 {
        self.answered_count
    }

    /// Mean seconds between asking and answering, over answered questions.
    #[must_use]
    pub const fn avg_response_time_seconds(&self) -> Option<f64> {
        self.avg_response_time_seconds
    }
}

/// Serialised statistics payload.
///
/// The average fields serialise as explicit `null` rather than being
/// omitted, so clients can distinguish "no answers yet" without probing for
/// missing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionStatsDto {
    #[schema(example = 42)]
    pub asked_count: u64,
    #[schema(example = 17)]
    pub answered_count: u64,
    #[schema(value_type = Option<f64>, example = 5400.0)]
    pub avg_response_time_seconds: Option<f64>,
    #[schema(value_type = Option<String>, example = "1 hour")]
    pub avg_response_time_display: Option<String>,
}

impl From<QuestionStats> for QuestionStatsDto {
    fn from(stats: QuestionStats) -> Self {
        Self {
            asked_count: stats.asked_count(),
            answered_count: stats.answered_count(),
            avg_response_time_seconds: stats.avg_response_time_seconds(),
            avg_response_time_display: stats.avg_response_time_seconds().map(display_duration),
        }
    }
}
