use super::domain::{
    LabelSet, MotivationalCategory, QuestionnaireResponse, QuestionnaireSubmission, SignalKind,
};
use super::tables::ScoringTables;
use crate::config::QuestionnaireConfig;

/// Validation errors raised before any scoring happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireViolation {
    #[error("unknown label '{label}' in {field}")]
    UnknownLabel { field: &'static str, label: String },
    #[error("{field} must be between {min} and {max} (found {found})")]
    LikertOutOfRange {
        field: &'static str,
        found: i64,
        min: u32,
        max: u32,
    },
}

/// Inclusive bounds for Likert answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikertScale {
    min: u32,
    max: u32,
}

impl LikertScale {
    pub fn new(min: u32, max: u32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    fn admit(&self, value: i64) -> Option<u32> {
        if value < i64::from(self.min) || value > i64::from(self.max) {
            return None;
        }
        u32::try_from(value).ok()
    }
}

impl Default for LikertScale {
    fn default() -> Self {
        Self::from(&QuestionnaireConfig::default())
    }
}

impl From<&QuestionnaireConfig> for LikertScale {
    fn from(config: &QuestionnaireConfig) -> Self {
        Self::new(config.likert_min, config.likert_max)
    }
}

/// Turns raw submissions into [`QuestionnaireResponse`] values or rejects them.
#[derive(Debug, Clone)]
pub struct QuestionnaireValidator {
    tables: &'static ScoringTables,
    scale: LikertScale,
}

impl Default for QuestionnaireValidator {
    fn default() -> Self {
        Self::with_scale(LikertScale::default())
    }
}

impl QuestionnaireValidator {
    pub fn with_scale(scale: LikertScale) -> Self {
        Self {
            tables: ScoringTables::standard(),
            scale,
        }
    }

    pub fn from_config(config: &QuestionnaireConfig) -> Self {
        Self::with_scale(LikertScale::from(config))
    }

    /// Resolve every label and bound every Likert answer. Repeated labels count once.
    pub fn validate(
        &self,
        submission: &QuestionnaireSubmission,
    ) -> Result<QuestionnaireResponse, QuestionnaireViolation> {
        let interest_fields = self.resolve(submission, SignalKind::InterestField)?;
        let qualities = self.resolve(submission, SignalKind::Quality)?;
        let free_time_activities = self.resolve(submission, SignalKind::FreeTimeActivity)?;

        let mut likert = [0u32; 6];
        for category in MotivationalCategory::ALL {
            let found = submission.likert(category);
            likert[category as usize] =
                self.scale
                    .admit(found)
                    .ok_or(QuestionnaireViolation::LikertOutOfRange {
                        field: category.field(),
                        found,
                        min: self.scale.min,
                        max: self.scale.max,
                    })?;
        }

        Ok(QuestionnaireResponse {
            interest_fields,
            qualities,
            free_time_activities,
            likert,
        })
    }

    fn resolve(
        &self,
        submission: &QuestionnaireSubmission,
        kind: SignalKind,
    ) -> Result<LabelSet, QuestionnaireViolation> {
        submission
            .labels(kind)
            .iter()
            .map(|raw| {
                self.tables
                    .lookup(kind, raw)
                    .map(|entry| (entry.label, entry.dimensions))
                    .ok_or_else(|| QuestionnaireViolation::UnknownLabel {
                        field: kind.field(),
                        label: raw.clone(),
                    })
            })
            .collect()
    }
}
