//! `relharmony judge`: Parse a judge response into scores.

use super::Context;
use crate::{input, output};
use relharmony_judge::{JudgeOutcome, parse_judge_response};
use std::path::Path;

pub async fn run(ctx: &Context, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = input::read_input(path).await?;
    let evaluation = parse_judge_response(&text);

    output::print_one(ctx.json, &evaluation, |e| {
        let status = match &e.outcome {
            JudgeOutcome::Parsed => "parsed".to_string(),
            JudgeOutcome::NoScores => "no scores found".to_string(),
            JudgeOutcome::Malformed(reason) => format!("malformed ({reason})"),
        };
        format!(
            "Data accuracy:  {}\nAnalysis depth: {}\nClarity:        {}\nTotal:          {}\nEvaluation:     {}\nStatus:         {status}",
            e.data_accuracy, e.analysis_depth, e.clarity, e.total, e.commentary
        )
    })
}
