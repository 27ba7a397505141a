use super::common::*;

use crate::workflows::recommendation::aggregator::{aggregate, score};
use crate::workflows::recommendation::domain::{
    ContributionSource, Dimension, MotivationalCategory, QuestionnaireSubmission, SignalKind,
};
use crate::workflows::recommendation::tables::{motivation_dimensions, ScoringTables};
use crate::workflows::recommendation::validation::{
    LikertScale, QuestionnaireValidator, QuestionnaireViolation,
};

fn expected_total(submission: &QuestionnaireSubmission) -> u64 {
    let tables = ScoringTables::standard();
    let mut total = 0u64;
    for kind in SignalKind::ALL {
        let mut seen = Vec::new();
        for raw in submission.labels(kind) {
            let entry = tables.lookup(kind, raw).expect("known label");
            if !seen.contains(&entry.label) {
                seen.push(entry.label);
                total += entry.dimensions.len() as u64;
            }
        }
    }
    for category in MotivationalCategory::ALL {
        total += submission.likert(category) as u64 * motivation_dimensions(category).len() as u64;
    }
    total
}

#[test]
fn worked_example_scores_follow_the_tables() {
    let scores = score(&validate(&worked_example()));

    assert_eq!(scores.get(Dimension::Artistic), 16);
    assert_eq!(scores.get(Dimension::Social), 11);
    assert_eq!(scores.get(Dimension::Investigative), 9);
    assert_eq!(scores.get(Dimension::Enterprising), 7);
    assert_eq!(scores.get(Dimension::Conventional), 4);
    assert_eq!(scores.get(Dimension::Realistic), 4);
}

#[test]
fn score_total_matches_label_and_likert_contributions() {
    for submission in [worked_example(), investigative_submission()] {
        let scores = score(&validate(&submission));
        assert_eq!(scores.total(), expected_total(&submission));
    }
}

#[test]
fn contributions_add_up_to_the_score_vector() {
    let breakdown = aggregate(&validate(&investigative_submission()));

    for dimension in Dimension::ALL {
        let from_trail: u64 = breakdown
            .contributions
            .iter()
            .filter(|contribution| contribution.dimensions.contains(&dimension))
            .map(|contribution| u64::from(contribution.points))
            .sum();
        assert_eq!(from_trail, breakdown.scores.get(dimension), "{dimension}");
    }

    assert!(!breakdown.contributions.iter().any(|contribution| {
        contribution.source == ContributionSource::Motivation(MotivationalCategory::Amotivation)
    }));
}

#[test]
fn label_order_does_not_change_scores() {
    let submission = investigative_submission();
    let mut permuted = submission.clone();
    permuted.interest_fields.reverse();
    permuted.qualities.rotate_left(1);
    permuted.free_time_activities.reverse();

    assert_eq!(
        score(&validate(&submission)),
        score(&validate(&permuted))
    );
}

#[test]
fn amotivation_never_changes_scores() {
    let baseline = score(&validate(&worked_example()));
    for amotivation in 1..=5 {
        let mut submission = worked_example();
        submission.amotivation = amotivation;
        assert_eq!(score(&validate(&submission)), baseline);
    }
}

#[test]
fn likert_values_feed_every_mapped_letter() {
    let mut submission = worked_example();
    submission.interest_fields.clear();
    submission.qualities.clear();
    submission.free_time_activities.clear();
    submission.intrinsic_motivation = 1;
    submission.identified_regulation = 1;
    submission.integrated_regulation = 1;
    submission.introjected_regulation = 5;
    submission.external_regulation = 1;

    let scores = score(&validate(&submission));
    assert_eq!(scores.get(Dimension::Realistic), 6);
    assert_eq!(scores.get(Dimension::Conventional), 6);
    assert_eq!(scores.get(Dimension::Enterprising), 7);
    assert_eq!(scores.get(Dimension::Artistic), 3);
    assert_eq!(scores.get(Dimension::Investigative), 2);
    assert_eq!(scores.get(Dimension::Social), 2);
}

#[test]
fn repeated_labels_count_once() {
    let mut submission = worked_example();
    let baseline = score(&validate(&submission));
    submission.qualities.push("creative".to_string());
    submission.qualities.push(" Creative ".to_string());

    assert_eq!(score(&validate(&submission)), baseline);
}

#[test]
fn unknown_label_is_rejected_instead_of_ignored() {
    let mut submission = worked_example();
    submission.interest_fields.push("Arts and comunication".to_string());

    let err = QuestionnaireValidator::default()
        .validate(&submission)
        .expect_err("misspelled label");
    assert_eq!(
        err,
        QuestionnaireViolation::UnknownLabel {
            field: "interest_fields",
            label: "Arts and comunication".to_string(),
        }
    );
}

#[test]
fn label_from_another_question_is_rejected() {
    let mut submission = worked_example();
    submission.free_time_activities.push("Creative".to_string());

    let err = QuestionnaireValidator::default()
        .validate(&submission)
        .expect_err("quality used as activity");
    assert!(matches!(
        err,
        QuestionnaireViolation::UnknownLabel {
            field: "free_time_activities",
            ..
        }
    ));
}

#[test]
fn likert_values_outside_scale_are_rejected() {
    let validator = QuestionnaireValidator::default();

    for (value, field) in [(0, "intrinsic_motivation"), (6, "intrinsic_motivation")] {
        let mut submission = worked_example();
        submission.intrinsic_motivation = value;
        let err = validator.validate(&submission).expect_err("out of range");
        assert_eq!(
            err,
            QuestionnaireViolation::LikertOutOfRange {
                field,
                found: value,
                min: 1,
                max: 5,
            }
        );
    }

    let mut submission = worked_example();
    submission.amotivation = -3;
    assert!(matches!(
        validator.validate(&submission),
        Err(QuestionnaireViolation::LikertOutOfRange {
            field: "amotivation",
            ..
        })
    ));
}

#[test]
fn wider_scale_admits_larger_values() {
    let validator = QuestionnaireValidator::with_scale(LikertScale::new(0, 10));
    let mut submission = worked_example();
    submission.external_regulation = 10;
    submission.amotivation = 0;

    let scores = score(&validator.validate(&submission).expect("within scale"));
    assert_eq!(scores.get(Dimension::Realistic), 12);
}

#[test]
fn largest_configurable_scale_does_not_overflow() {
    let validator = QuestionnaireValidator::with_scale(LikertScale::new(0, u32::MAX));
    let max = i64::from(u32::MAX);
    let mut submission = worked_example();
    submission.intrinsic_motivation = max;
    submission.identified_regulation = max;
    submission.integrated_regulation = max;
    submission.introjected_regulation = max;
    submission.external_regulation = max;

    let breakdown = aggregate(&validator.validate(&submission).expect("within scale"));

    // Artistic: three maxed answers plus Arts and communication, Creative, Writing, Acting.
    assert_eq!(
        breakdown.scores.get(Dimension::Artistic),
        3 * u64::from(u32::MAX) + 4
    );
    assert_eq!(breakdown.scores.total(), expected_total(&submission));
    assert_eq!(
        crate::workflows::recommendation::selector::select(&breakdown.scores).primary,
        Dimension::Artistic
    );
}
