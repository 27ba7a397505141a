use super::domain::{Dimension, DimensionRank, DimensionScores, MajorSelection};
use super::tables::MajorCatalog;

pub const PRIMARY_PICKS: usize = 3;
pub const SECONDARY_PICKS: usize = 2;

/// Rank the six letters by score, highest first.
///
/// Ties keep RIASEC order (R, I, A, S, E, C), so equal scores always rank the same way.
pub fn rank(scores: &DimensionScores) -> Vec<DimensionRank> {
    let mut ranking: Vec<DimensionRank> = scores
        .iter()
        .map(|(dimension, score)| DimensionRank { dimension, score })
        .collect();
    ranking.sort_by(|left, right| {
        right
            .score
            .cmp(&left.score)
            .then(left.dimension.cmp(&right.dimension))
    });
    ranking
}

/// Pick 3 majors from the top letter and 2 from the runner-up, in catalog order.
///
/// A secondary major already taken from the primary list is skipped in favor of the next
/// entry, so the five majors are always distinct.
pub fn select(scores: &DimensionScores) -> MajorSelection {
    let ranking = rank(scores);
    let primary = ranking[0].dimension;
    let secondary = ranking[1].dimension;

    let mut majors: Vec<&'static str> = MajorCatalog::majors(primary)
        .iter()
        .copied()
        .take(PRIMARY_PICKS)
        .collect();

    let secondary_picks: Vec<&'static str> = MajorCatalog::majors(secondary)
        .iter()
        .copied()
        .filter(|major| !majors.contains(major))
        .take(SECONDARY_PICKS)
        .collect();
    majors.extend(secondary_picks);

    MajorSelection {
        scores: *scores,
        ranking,
        primary,
        secondary,
        majors,
    }
}

/// Letters in tie-break priority, for prompts and docs.
pub fn tie_break_order() -> String {
    Dimension::ALL
        .iter()
        .map(|dimension| dimension.letter().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
