pub use crate::config::*;

/// A builder for adding respondents one row at a time.
///
/// This is the natural shape when reading a spreadsheet: every row is one respondent,
/// every column one question.
///
/// ```
/// pub use survey_tally::builder::Builder;
/// # use survey_tally::TallyErrors;
///
/// let mut builder = Builder::new(&["Q.1".to_string(), "Q.2".to_string()]);
///
/// builder.add_response_row(&[Some("Good"), Some("Poor")])?;
/// builder.add_response_row(&[Some("Excellent"), None])?;
///
/// let summary = builder.summarize()?;
/// assert_eq!(summary.total_respondents, 2);
/// assert_eq!(summary.questions[1].positive, 0);
///
/// # Ok::<(), TallyErrors>(())
/// ```
pub struct Builder {
    pub(crate) _questions: Vec<QuestionResponses>,
    pub(crate) _respondents: u64,
}

impl Builder {
    pub fn new(question_labels: &[String]) -> Builder {
        Builder {
            _questions: question_labels
                .iter()
                .map(|label| QuestionResponses {
                    label: label.clone(),
                    responses: Vec::new(),
                })
                .collect(),
            _respondents: 0,
        }
    }

    /// Adds the answers of one respondent, one entry per question, in the order
    /// of the labels given to the builder.
    pub fn add_response_row(&mut self, answers: &[Option<&str>]) -> Result<(), TallyErrors> {
        if answers.len() != self._questions.len() {
            return Err(TallyErrors::RowWidthMismatch {
                expected: self._questions.len(),
                found: answers.len(),
            });
        }
        for (q, a) in self._questions.iter_mut().zip(answers.iter()) {
            q.responses.push(a.map(|s| s.to_string()));
        }
        self._respondents += 1;
        Ok(())
    }

    pub fn num_respondents(&self) -> u64 {
        self._respondents
    }

    pub fn summarize(&self) -> Result<SurveySummary, TallyErrors> {
        crate::run_survey_stats(&self._questions, self._respondents)
    }
}
