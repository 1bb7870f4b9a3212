//! Judge-score parsing.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Commentary reported when a response could not be scored.
pub const FALLBACK_COMMENTARY: &str = "Could not parse evaluation";

const LABELS: [&str; 4] = ["Data accuracy", "Analysis depth", "Clarity", "TOTAL"];

/// Lower-cased fragments that mark a line as a score line.
const SCORE_LINE_MARKERS: [&str; 4] = ["data accuracy", "analysis depth", "clarity", "total"];

static SCORE_RES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    LABELS.map(|label| {
        Regex::new(&format!(r"(?i){label}\s*:\s*(\d+)")).expect("static regex must compile")
    })
});

static EVALUATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^evaluation\s*:\s*(.*)").expect("static regex must compile")
});

/// How a judge response was interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum JudgeOutcome {
    Parsed,
    /// None of the score labels appeared.
    NoScores,
    /// A score was present but unusable.
    Malformed(String),
}

/// Scores and commentary extracted from a judge response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeEvaluation {
    pub data_accuracy: u32,
    pub analysis_depth: u32,
    pub clarity: u32,
    pub total: u32,
    pub commentary: String,
    pub outcome: JudgeOutcome,
}

impl JudgeEvaluation {
    fn fallback(outcome: JudgeOutcome) -> Self {
        Self {
            data_accuracy: 0,
            analysis_depth: 0,
            clarity: 0,
            total: 0,
            commentary: FALLBACK_COMMENTARY.to_string(),
            outcome,
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.outcome == JudgeOutcome::Parsed
    }
}

/// Parse a judge response.
///
/// Each label is searched line by line, case-insensitively; the first
/// matching line wins and a missing label scores 0. A missing `TOTAL` is the
/// sum of the other three.
pub fn parse_judge_response(text: &str) -> JudgeEvaluation {
    match score(text) {
        Ok(evaluation) => {
            debug!(total = evaluation.total, "parsed judge response");
            evaluation
        }
        Err(outcome) => {
            warn!(?outcome, response = %text, "could not score judge response");
            JudgeEvaluation::fallback(outcome)
        }
    }
}

fn score(text: &str) -> Result<JudgeEvaluation, JudgeOutcome> {
    let captures = SCORE_RES.each_ref().map(|re| first_capture(text, re));
    if captures.iter().all(Option::is_none) {
        return Err(JudgeOutcome::NoScores);
    }
    let [accuracy, depth, clarity, total] = captures;

    let data_accuracy = parse_score(accuracy)?;
    let analysis_depth = parse_score(depth)?;
    let clarity = parse_score(clarity)?;
    let total = match total {
        Some(digits) => parse_score(Some(digits))?,
        None => data_accuracy
            .checked_add(analysis_depth)
            .and_then(|sum| sum.checked_add(clarity))
            .ok_or_else(|| JudgeOutcome::Malformed("score sum overflows".to_string()))?,
    };

    Ok(JudgeEvaluation {
        data_accuracy,
        analysis_depth,
        clarity,
        total,
        commentary: commentary(text),
        outcome: JudgeOutcome::Parsed,
    })
}

fn first_capture<'a>(text: &'a str, re: &Regex) -> Option<&'a str> {
    text.lines()
        .find_map(|line| re.captures(line).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

fn parse_score(digits: Option<&str>) -> Result<u32, JudgeOutcome> {
    match digits {
        None => Ok(0),
        Some(digits) => digits
            .parse()
            .map_err(|_| JudgeOutcome::Malformed(format!("score {digits} does not fit"))),
    }
}

/// The `Evaluation:` line, or every line that is not a score line.
fn commentary(text: &str) -> String {
    if let Some(found) = text
        .lines()
        .find_map(|line| EVALUATION_RE.captures(line).and_then(|c| c.get(1)))
    {
        return found.as_str().trim().to_string();
    }

    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            !SCORE_LINE_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
