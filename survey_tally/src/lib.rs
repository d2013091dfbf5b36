/*!
Tallying of course exit survey responses.

Each question of a survey is answered on a five-level scale (Excellent, Very Good,
Good, Satisfactory, Poor). This crate counts the answers of every question and
derives the share of positive answers (Excellent, Very Good or Good) over all the
respondents.

```
use survey_tally::*;

let questions = vec![QuestionResponses {
    label: "23EVS127.1".to_string(),
    responses: vec![
        Some("Excellent".to_string()),
        Some("Excellent".to_string()),
        Some("Good".to_string()),
        Some("Poor".to_string()),
    ],
}];
let summary = run_survey_stats(&questions, 4)?;
let q = &summary.questions[0];
assert_eq!(q.counts.get(Rating::Excellent), 2);
assert_eq!(q.positive, 3);
assert_eq!(q.percentage, 75.0);
# Ok::<(), TallyErrors>(())
```

See the [manual] for the details of the counting rules.
*/

pub mod builder;
mod config;
pub mod manual;

use log::{debug, info, warn};

pub use crate::config::*;

/// Runs the tally over all the questions.
///
/// Arguments:
/// * `questions` the answers, one column per question, in report order
/// * `total_respondents` the number of respondent rows of the survey. It is the
/// denominator of every percentage, even for questions that some respondents left blank.
pub fn run_survey_stats(
    questions: &[QuestionResponses],
    total_respondents: u64,
) -> Result<SurveySummary, TallyErrors> {
    info!(
        "run_survey_stats: Processing {:?} questions, {:?} respondents",
        questions.len(),
        total_respondents
    );
    if total_respondents == 0 {
        warn!("run_survey_stats: no respondents, all percentages are set to 0");
    }

    let mut res: Vec<QuestionSummary> = Vec::new();
    for q in questions.iter() {
        let num_responses = q.responses.len() as u64;
        if num_responses > total_respondents {
            return Err(TallyErrors::TooManyResponses {
                label: q.label.clone(),
                responses: num_responses,
                respondents: total_respondents,
            });
        }
        let summary = tally_question(q, total_respondents);
        debug!("run_survey_stats: summary: {:?}", summary);
        res.push(summary);
    }
    Ok(SurveySummary {
        total_respondents,
        questions: res,
    })
}

fn tally_question(q: &QuestionResponses, total_respondents: u64) -> QuestionSummary {
    let mut counts = RatingCounts::default();
    let mut unrecognized: u64 = 0;
    for r in q.responses.iter() {
        match r.as_deref().and_then(Rating::from_label) {
            Some(rating) => counts.increment(rating),
            None => unrecognized += 1,
        }
    }
    if unrecognized > 0 {
        debug!(
            "tally_question: {}: {} responses outside of the rating scale",
            q.label, unrecognized
        );
    }
    let positive = counts.positive();
    QuestionSummary {
        label: q.label.clone(),
        counts,
        positive,
        percentage: percentage(positive, total_respondents),
    }
}

/// 100 * count / total, rounded to 2 decimals. Defined as 0 when there is nobody.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_half_even((count as f64 / total as f64) * 100.0, 2)
}

/// Rounds a non-negative number to `decimals` digits, looking at its exact binary
/// value and sending ties to the even neighbour (15.625 gives 15.62).
fn round_half_even(x: f64, decimals: usize) -> f64 {
    // 1074 digits hold the full expansion of any f64.
    let exact = format!("{:.*}", 1074, x);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, rest) = frac_part.split_at(decimals.min(frac_part.len()));
    let mut scaled: u64 = int_part
        .chars()
        .chain(kept.chars())
        .filter_map(|c| c.to_digit(10))
        .fold(0, |acc, d| acc * 10 + d as u64);
    let mut rest_digits = rest.chars().filter_map(|c| c.to_digit(10));
    let round_up = match rest_digits.next() {
        Some(d) if d > 5 => true,
        Some(5) => rest_digits.any(|d| d != 0) || scaled % 2 == 1,
        _ => false,
    };
    if round_up {
        scaled += 1;
    }
    scaled as f64 / 10f64.powi(decimals as i32)
}
