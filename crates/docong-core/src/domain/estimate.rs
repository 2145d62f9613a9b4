//! Effort estimation: prediction request shape and score-to-effort mapping.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::errors::BoardError;
use super::session::UserProfile;
use super::todo::{TodoInput, WorkImportance, WorkProficiency, WorkType};

/// Length of one pomodoro window sent to the model (25 minutes).
pub const PREDICTION_WINDOW_SECS: i64 = 1500;

pub const MIN_EFFORT: u32 = 1;
pub const MAX_EFFORT: u32 = 12;

/// Timer mode of the predicted session. Only the basic mode is predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeStatus {
    Basic,
}

/// Body of `POST /api/todo/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub birth: NaiveDate,
    pub end_time: String,
    pub gender: Option<String>,
    pub importance: WorkImportance,
    pub job: Option<String>,
    pub mbti: Option<String>,
    pub position: Option<String>,
    pub proficiency: WorkProficiency,
    pub start_time: String,
    pub time_status: TimeStatus,
    #[serde(rename = "type")]
    pub work_type: WorkType,
}

impl PredictionRequest {
    /// Build a request for `draft` on behalf of `profile`, anchored at `now`.
    ///
    /// The model is trained on local wall-clock times, so both instants are
    /// shifted by `offset` and then written in UTC notation.
    pub fn new(
        profile: &UserProfile,
        draft: &TodoInput,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<Self, BoardError> {
        let birth = profile.birth.ok_or(BoardError::ProfileIncomplete)?;
        let start = now + TimeDelta::seconds(i64::from(offset.local_minus_utc()));
        let end = start + TimeDelta::seconds(PREDICTION_WINDOW_SECS);

        Ok(Self {
            birth,
            end_time: wall_clock_iso(end),
            gender: profile.gender.clone(),
            importance: draft.work_importance,
            job: profile.job.clone(),
            mbti: profile.mbti.clone(),
            position: profile.position.clone(),
            proficiency: draft.work_proficiency,
            start_time: wall_clock_iso(start),
            time_status: TimeStatus::Basic,
            work_type: draft.work_type,
        })
    }
}

fn wall_clock_iso(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Map a model score to an effort estimate: `clamp(round(score / 2), 1, 12)`.
///
/// A NaN score falls back to the minimum.
pub fn effort_from_score(score: f64) -> u32 {
    let half = (score / 2.0).round();
    if half.is_nan() {
        return MIN_EFFORT;
    }
    (half as i64).clamp(i64::from(MIN_EFFORT), i64::from(MAX_EFFORT)) as u32
}
