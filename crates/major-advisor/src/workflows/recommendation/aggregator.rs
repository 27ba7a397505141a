use serde::Serialize;

use super::domain::{
    ContributionSource, DimensionScores, MotivationalCategory, QuestionnaireResponse,
    ScoreContribution, SignalKind,
};
use super::tables::motivation_dimensions;

/// Score vector plus the contributions that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub scores: DimensionScores,
    pub contributions: Vec<ScoreContribution>,
}

/// Fold a validated questionnaire into the six RIASEC scores.
///
/// Each checked label adds one point to every letter it maps to; each motivational answer adds
/// its raw value to every mapped letter. Amotivation maps to no letter.
pub fn aggregate(response: &QuestionnaireResponse) -> ScoreBreakdown {
    let mut scores = DimensionScores::default();
    let mut contributions = Vec::new();

    for kind in SignalKind::ALL {
        for (&label, &dimensions) in response.labels(kind) {
            for &dimension in dimensions {
                scores.add(dimension, 1);
            }
            contributions.push(ScoreContribution {
                source: ContributionSource::Checkbox(kind),
                label,
                dimensions,
                points: 1,
            });
        }
    }

    for category in MotivationalCategory::ALL {
        let dimensions = motivation_dimensions(category);
        let points = response.likert(category);
        for &dimension in dimensions {
            scores.add(dimension, points);
        }
        if !dimensions.is_empty() {
            contributions.push(ScoreContribution {
                source: ContributionSource::Motivation(category),
                label: category.title(),
                dimensions,
                points,
            });
        }
    }

    ScoreBreakdown {
        scores,
        contributions,
    }
}

/// Scores only, for callers that do not need the audit trail.
pub fn score(response: &QuestionnaireResponse) -> DimensionScores {
    aggregate(response).scores
}
