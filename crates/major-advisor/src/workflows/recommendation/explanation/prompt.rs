//! Few-shot prompt for the explanation paragraph.
//!
//! The prompt restates the scoring method from the live tables, walks through one worked
//! example computed by the same code that scores real requests, and hands the generator the
//! facts already decided for this student so its prose cannot drift from them.

use std::fmt::Write as _;

use super::super::aggregator::{aggregate, ScoreBreakdown};
use super::super::domain::{
    Dimension, MajorSelection, MotivationalCategory, QuestionnaireResponse,
    QuestionnaireSubmission, SignalKind,
};
use super::super::selector::{select, tie_break_order, PRIMARY_PICKS, SECONDARY_PICKS};
use super::super::tables::{motivation_dimensions, MajorCatalog, ScoringTables};
use super::super::validation::{LikertScale, QuestionnaireValidator, QuestionnaireViolation};

/// Sample questionnaire used as the few-shot example.
pub fn worked_example_submission() -> QuestionnaireSubmission {
    QuestionnaireSubmission {
        interest_fields: vec![
            "Arts and communication".to_string(),
            "Human and public service".to_string(),
        ],
        qualities: vec![
            "Compassionate and caring".to_string(),
            "Creative".to_string(),
            "Outgoing".to_string(),
        ],
        free_time_activities: vec![
            "Writing".to_string(),
            "Acting".to_string(),
            "Volunteering".to_string(),
        ],
        intrinsic_motivation: 5,
        identified_regulation: 4,
        introjected_regulation: 2,
        integrated_regulation: 3,
        amotivation: 1,
        external_regulation: 2,
    }
}

/// Renders generation prompts; the worked example is scored once at construction.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    method: String,
    worked_example: String,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, QuestionnaireViolation> {
        let submission = worked_example_submission();
        let response = QuestionnaireValidator::with_scale(LikertScale::new(0, 5))
            .validate(&submission)?;
        let breakdown = aggregate(&response);
        let selection = select(&breakdown.scores);

        Ok(Self {
            method: render_method(),
            worked_example: render_worked_example(&response, &breakdown, &selection),
        })
    }

    /// Student answers are rendered from the validated response, so labels appear once each in
    /// their canonical spelling and the prompt stays bounded by the vocabulary.
    pub fn render(&self, response: &QuestionnaireResponse, selection: &MajorSelection) -> String {
        let mut prompt = String::new();
        prompt.push_str(
            "You are an expert career-counselor bot. Your task is to recommend university majors \
             from a student's questionnaire and explain why they fit.\n\n",
        );
        prompt.push_str(&self.method);
        prompt.push_str("\n---\nWorked Example\n\n");
        prompt.push_str(&self.worked_example);
        prompt.push_str(
            "\n---\nNow process the actual student responses below and generate the recommendation.\n\n",
        );
        prompt.push_str(&render_responses(response));
        prompt.push('\n');
        prompt.push_str(&render_facts(selection));
        let _ = write!(
            prompt,
            "\nReturn one paragraph that begins exactly with \"{}\" followed by a long, insightful \
             explanation of why these majors fit.\n\
             Do not use asterisks or any other emphasis markup in your reply.\n\
             Address the student directly as \"you\"; never refer to them as \"this student\".\n",
            selection.headline()
        );
        prompt
    }
}

fn letters(dimensions: &[Dimension]) -> String {
    if dimensions.is_empty() {
        return "(no categories)".to_string();
    }
    dimensions
        .iter()
        .map(|dimension| format!("{} ({})", dimension.label(), dimension.letter()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_method() -> String {
    let mut out = String::new();

    out.push_str("1. Map motivational responses (6 Likert values) into RIASEC scores:\n");
    for category in MotivationalCategory::ALL {
        let _ = writeln!(
            out,
            "   - {} => {}",
            category.title(),
            letters(motivation_dimensions(category))
        );
    }
    out.push_str("   For each category, add the raw Likert value to every listed letter.\n\n");

    out.push_str("2. Map check-box responses (each +1 point) to RIASEC:\n");
    for kind in SignalKind::ALL {
        let _ = writeln!(out, "   - {}:", kind.title());
        for (label, dimensions) in ScoringTables::rows(kind) {
            let mapped = dimensions
                .iter()
                .map(|dimension| dimension.letter().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "     {label} => {mapped}");
        }
    }

    out.push_str("\n3. Sum all points for each of R, I, A, S, E, C.\n\n");

    let _ = writeln!(
        out,
        "4. Choose the top 2 RIASEC letters. Equal scores are ordered {}.",
        tie_break_order()
    );
    out.push_str("   Majors per letter, in priority order:\n");
    for dimension in Dimension::ALL {
        let _ = writeln!(
            out,
            "   {} => {}",
            dimension.letter(),
            MajorCatalog::majors(dimension).join(", ")
        );
    }
    let _ = writeln!(
        out,
        "   Take the first {PRIMARY_PICKS} majors of the highest-scoring letter and the first \
         {SECONDARY_PICKS} of the second, skipping any major already chosen."
    );

    out.push_str("\n5. Output the result as a single paragraph.\n");
    out
}

fn render_responses(response: &QuestionnaireResponse) -> String {
    let mut out = String::from("Student Responses\n");
    for kind in SignalKind::ALL {
        let labels = response
            .labels(kind)
            .keys()
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "{}: {labels}", kind.title());
    }
    out.push_str("Motivational Responses:\n");
    for category in MotivationalCategory::ALL {
        let _ = writeln!(
            out,
            "- {}: {}",
            category.title(),
            response.likert(category)
        );
    }
    out
}

fn render_facts(selection: &MajorSelection) -> String {
    let mut out = String::from("Computed Results (already final, do not recompute)\n");
    let _ = writeln!(
        out,
        "Final scores: {}",
        selection.scores.ranked_summary(&selection.ranking)
    );
    let _ = writeln!(
        out,
        "Top two letters: {} ({}), {} ({})",
        selection.primary.letter(),
        selection.primary.label(),
        selection.secondary.letter(),
        selection.secondary.label()
    );
    let _ = writeln!(out, "{}", selection.headline());
    out
}

fn render_worked_example(
    response: &QuestionnaireResponse,
    breakdown: &ScoreBreakdown,
    selection: &MajorSelection,
) -> String {
    let mut out = render_responses(response);

    out.push_str("\nComputation\n");
    for rank in &selection.ranking {
        let terms = breakdown
            .contributions
            .iter()
            .filter(|contribution| contribution.dimensions.contains(&rank.dimension))
            .map(|contribution| format!("{} ({})", contribution.points, contribution.label))
            .collect::<Vec<_>>();
        let terms = if terms.is_empty() {
            "0".to_string()
        } else {
            terms.join(" + ")
        };
        let _ = writeln!(
            out,
            "{} += {} => {} total = {}",
            rank.dimension.letter(),
            terms,
            rank.dimension.letter(),
            rank.score
        );
    }

    out.push('\n');
    out.push_str(&render_facts(selection));
    let _ = write!(
        out,
        "\nOutput Paragraph:\n{}\nYou show exceptionally strong {} tendencies. Your imaginative \
         side, from choosing creative qualities to spending your free time writing and acting, \
         aligns naturally with careers in the arts, design, and storytelling. Your {} tendencies, \
         visible in your compassion and your enjoyment of volunteering, make you well-suited to \
         fields like psychology and nursing, where empathy and communication are key. Together, \
         your creativity and your care for others point toward a fulfilling path that blends \
         expression with human connection.\n",
        selection.headline(),
        selection.primary.label(),
        selection.secondary.label()
    );
    out
}
