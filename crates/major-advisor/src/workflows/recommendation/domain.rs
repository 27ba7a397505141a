use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// RIASEC personality dimension. Declaration order is the tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "R")]
    Realistic,
    #[serde(rename = "I")]
    Investigative,
    #[serde(rename = "A")]
    Artistic,
    #[serde(rename = "S")]
    Social,
    #[serde(rename = "E")]
    Enterprising,
    #[serde(rename = "C")]
    Conventional,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Realistic,
        Dimension::Investigative,
        Dimension::Artistic,
        Dimension::Social,
        Dimension::Enterprising,
        Dimension::Conventional,
    ];

    pub fn letter(self) -> char {
        match self {
            Dimension::Realistic => 'R',
            Dimension::Investigative => 'I',
            Dimension::Artistic => 'A',
            Dimension::Social => 'S',
            Dimension::Enterprising => 'E',
            Dimension::Conventional => 'C',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Realistic => "Realistic",
            Dimension::Investigative => "Investigative",
            Dimension::Artistic => "Artistic",
            Dimension::Social => "Social",
            Dimension::Enterprising => "Enterprising",
            Dimension::Conventional => "Conventional",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Checkbox question a label was selected under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    InterestField,
    Quality,
    FreeTimeActivity,
}

impl SignalKind {
    pub const ALL: [SignalKind; 3] = [
        SignalKind::InterestField,
        SignalKind::Quality,
        SignalKind::FreeTimeActivity,
    ];

    /// Wire name of the request field carrying this signal.
    pub fn field(self) -> &'static str {
        match self {
            SignalKind::InterestField => "interest_fields",
            SignalKind::Quality => "qualities",
            SignalKind::FreeTimeActivity => "free_time_activities",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SignalKind::InterestField => "Interest Fields",
            SignalKind::Quality => "Qualities",
            SignalKind::FreeTimeActivity => "Free-time Activities",
        }
    }
}

/// Motivational regulation construct answered on the Likert scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotivationalCategory {
    IntrinsicMotivation,
    IdentifiedRegulation,
    IntrojectedRegulation,
    IntegratedRegulation,
    Amotivation,
    ExternalRegulation,
}

impl MotivationalCategory {
    /// Questionnaire order.
    pub const ALL: [MotivationalCategory; 6] = [
        MotivationalCategory::IntrinsicMotivation,
        MotivationalCategory::IdentifiedRegulation,
        MotivationalCategory::IntrojectedRegulation,
        MotivationalCategory::IntegratedRegulation,
        MotivationalCategory::Amotivation,
        MotivationalCategory::ExternalRegulation,
    ];

    pub fn field(self) -> &'static str {
        match self {
            MotivationalCategory::IntrinsicMotivation => "intrinsic_motivation",
            MotivationalCategory::IdentifiedRegulation => "identified_regulation",
            MotivationalCategory::IntrojectedRegulation => "introjected_regulation",
            MotivationalCategory::IntegratedRegulation => "integrated_regulation",
            MotivationalCategory::Amotivation => "amotivation",
            MotivationalCategory::ExternalRegulation => "external_regulation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MotivationalCategory::IntrinsicMotivation => "Intrinsic Motivation",
            MotivationalCategory::IdentifiedRegulation => "Identified Regulation",
            MotivationalCategory::IntrojectedRegulation => "Introjected Regulation",
            MotivationalCategory::IntegratedRegulation => "Integrated Regulation",
            MotivationalCategory::Amotivation => "Amotivation",
            MotivationalCategory::ExternalRegulation => "External Regulation",
        }
    }
}

/// Raw questionnaire payload as submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireSubmission {
    pub interest_fields: Vec<String>,
    pub qualities: Vec<String>,
    pub free_time_activities: Vec<String>,
    pub intrinsic_motivation: i64,
    pub identified_regulation: i64,
    pub introjected_regulation: i64,
    pub integrated_regulation: i64,
    pub amotivation: i64,
    pub external_regulation: i64,
}

impl QuestionnaireSubmission {
    pub fn labels(&self, kind: SignalKind) -> &[String] {
        match kind {
            SignalKind::InterestField => &self.interest_fields,
            SignalKind::Quality => &self.qualities,
            SignalKind::FreeTimeActivity => &self.free_time_activities,
        }
    }

    pub fn likert(&self, category: MotivationalCategory) -> i64 {
        match category {
            MotivationalCategory::IntrinsicMotivation => self.intrinsic_motivation,
            MotivationalCategory::IdentifiedRegulation => self.identified_regulation,
            MotivationalCategory::IntrojectedRegulation => self.introjected_regulation,
            MotivationalCategory::IntegratedRegulation => self.integrated_regulation,
            MotivationalCategory::Amotivation => self.amotivation,
            MotivationalCategory::ExternalRegulation => self.external_regulation,
        }
    }
}

/// Canonical label to the letters it feeds.
pub type LabelSet = BTreeMap<&'static str, &'static [Dimension]>;

/// Validated questionnaire: labels resolved to their canonical spelling, Likert values in range.
///
/// Only [`QuestionnaireValidator`](super::validation::QuestionnaireValidator) constructs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionnaireResponse {
    pub(crate) interest_fields: LabelSet,
    pub(crate) qualities: LabelSet,
    pub(crate) free_time_activities: LabelSet,
    pub(crate) likert: [u32; 6],
}

impl QuestionnaireResponse {
    pub fn labels(&self, kind: SignalKind) -> &LabelSet {
        match kind {
            SignalKind::InterestField => &self.interest_fields,
            SignalKind::Quality => &self.qualities,
            SignalKind::FreeTimeActivity => &self.free_time_activities,
        }
    }

    pub fn likert(&self, category: MotivationalCategory) -> u32 {
        self.likert[category as usize]
    }
}

/// Six RIASEC accumulators. Frozen once aggregation returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionScores {
    values: [u64; 6],
}

impl DimensionScores {
    /// Accumulates in `u64`: three `u32` Likert answers plus every label cannot overflow it.
    pub(crate) fn add(&mut self, dimension: Dimension, points: u32) {
        self.values[dimension.index()] += u64::from(points);
    }

    pub fn get(&self, dimension: Dimension) -> u64 {
        self.values[dimension.index()]
    }

    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u64)> + '_ {
        Dimension::ALL
            .into_iter()
            .map(|dimension| (dimension, self.get(dimension)))
    }

    /// `A=16, S=11, ...` in ranked order.
    pub fn ranked_summary(&self, ranking: &[DimensionRank]) -> String {
        ranking
            .iter()
            .map(|rank| format!("{}={}", rank.dimension.letter(), rank.score))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Serialize for DimensionScores {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Dimension::ALL.len()))?;
        for (dimension, score) in self.iter() {
            map.serialize_entry(&dimension, &score)?;
        }
        map.end()
    }
}

/// One ranked entry of the score vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionRank {
    pub dimension: Dimension,
    pub score: u64,
}

/// Source of a single additive contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum ContributionSource {
    Checkbox(SignalKind),
    Motivation(MotivationalCategory),
}

/// Discrete contribution to the score vector, kept for audits and explanations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreContribution {
    pub source: ContributionSource,
    pub label: &'static str,
    pub dimensions: &'static [Dimension],
    pub points: u32,
}

/// Deterministic half of a recommendation: scores, ranking, and chosen majors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MajorSelection {
    pub scores: DimensionScores,
    pub ranking: Vec<DimensionRank>,
    pub primary: Dimension,
    pub secondary: Dimension,
    pub majors: Vec<&'static str>,
}

impl MajorSelection {
    /// `Top 5 majors: ...` line the explanation must open with.
    pub fn headline(&self) -> String {
        format!("Top 5 majors: {}.", self.majors.join(", "))
    }
}

/// Full outcome of a recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResult {
    pub scores: DimensionScores,
    pub dimensions: (Dimension, Dimension),
    pub majors: Vec<&'static str>,
    pub explanation: String,
}

impl RecommendationResult {
    pub fn new(selection: MajorSelection, explanation: String) -> Self {
        Self {
            scores: selection.scores,
            dimensions: (selection.primary, selection.secondary),
            majors: selection.majors,
            explanation,
        }
    }
}
