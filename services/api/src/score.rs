use clap::Args;
use std::fs;
use std::path::PathBuf;
use volunteer_match::error::AppError;
use volunteer_match::matching::{calculate_match_score, ScoreRequest, ScoreResponse};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding `{ "volunteer": ..., "opportunity": ... }`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Pretty-print the JSON result
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.input)?;
    let rendered = score_document(&raw, args.pretty)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn score_document(raw: &str, pretty: bool) -> Result<String, AppError> {
    let request: ScoreRequest = serde_json::from_str(raw)?;
    let result = calculate_match_score(&request.volunteer, &request.opportunity);
    let response = ScoreResponse {
        label: result.label(),
        result,
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(rendered)
}
