//! Questionnaire scoring, major selection, and the explanation request.
//!
//! Scoring and selection are pure and synchronous; the only suspension point is the call to the
//! text generator behind [`explanation::ExplanationRequester`].

pub mod aggregator;
pub mod domain;
pub mod explanation;
pub mod router;
pub mod selector;
pub mod service;
pub mod tables;
pub mod validation;

#[cfg(test)]
mod tests;

pub use aggregator::{aggregate, ScoreBreakdown};
pub use domain::{
    ContributionSource, Dimension, DimensionRank, DimensionScores, MajorSelection,
    MotivationalCategory, QuestionnaireResponse, QuestionnaireSubmission, RecommendationResult,
    ScoreContribution, SignalKind,
};
pub use explanation::{
    worked_example_submission, ExplanationRequester, GenerationError, GenerationRequest,
    LlamaCppGenerator, PromptBuilder, RequestPolicy, TextGenerator,
};
pub use router::{recommendation_router, RecommendationResponse};
pub use selector::{rank, select};
pub use service::{Assessment, RecommendationError, RecommendationService};
pub use tables::{MajorCatalog, ScoringTables};
pub use validation::{LikertScale, QuestionnaireValidator, QuestionnaireViolation};
