use crate::infra::{llama_service, load_submission};
use clap::Args;
use major_advisor::config::AppConfig;
use major_advisor::error::AppError;
use major_advisor::telemetry;
use major_advisor::workflows::recommendation::{
    aggregate, select, ContributionSource, MajorSelection, QuestionnaireValidator,
    RecommendationError, ScoreBreakdown, ScoringTables, SignalKind,
};
use serde_json::json;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// Questionnaire submission as a JSON file
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: InputArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let submission = load_submission(&args.input)?;
    let response = QuestionnaireValidator::from_config(&config.questionnaire)
        .validate(&submission)
        .map_err(RecommendationError::from)?;
    let breakdown = aggregate(&response);
    let selection = select(&breakdown.scores);

    if args.json {
        let payload = json!({
            "selection": selection,
            "contributions": breakdown.contributions,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", render_assessment(&breakdown, &selection));
    }
    Ok(())
}

pub(crate) async fn run_recommend(args: InputArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    let submission = load_submission(&args.input)?;
    let service = llama_service(&config)?;
    let result = service.recommend(&submission).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.explanation);
    }
    Ok(())
}

pub(crate) fn run_vocabulary() {
    print!("{}", render_vocabulary());
}

pub(crate) fn render_assessment(breakdown: &ScoreBreakdown, selection: &MajorSelection) -> String {
    let mut out = String::from("RIASEC assessment\n");
    let _ = writeln!(
        out,
        "Scores: {}",
        selection.scores.ranked_summary(&selection.ranking)
    );
    let _ = writeln!(
        out,
        "Top letters: {} ({}) then {} ({})",
        selection.primary,
        selection.primary.label(),
        selection.secondary,
        selection.secondary.label()
    );
    let _ = writeln!(out, "{}", selection.headline());

    out.push_str("Contributions:\n");
    for contribution in &breakdown.contributions {
        let question = match contribution.source {
            ContributionSource::Checkbox(kind) => kind.title(),
            ContributionSource::Motivation(category) => category.title(),
        };
        let letters = contribution
            .dimensions
            .iter()
            .map(|dimension| dimension.letter().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "  - {question}: {} -> +{} to {letters}",
            contribution.label, contribution.points
        );
    }
    out
}

pub(crate) fn render_vocabulary() -> String {
    let mut out = String::new();
    for kind in SignalKind::ALL {
        let _ = writeln!(out, "{} ({})", kind.title(), kind.field());
        for label in ScoringTables::vocabulary(kind) {
            let _ = writeln!(out, "  - {label}");
        }
    }
    out
}
