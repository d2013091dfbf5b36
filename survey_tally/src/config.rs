// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The rating categories recognized in a survey answer.
///
/// The labels are matched exactly (case-sensitive) against the text of a response.
/// Any other text is not a rating and is left out of the category counts.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Rating {
    Excellent,
    VeryGood,
    Good,
    Satisfactory,
    Poor,
}

impl Rating {
    /// All the ratings, in the order they are reported.
    pub const ALL: [Rating; 5] = [
        Rating::Excellent,
        Rating::VeryGood,
        Rating::Good,
        Rating::Satisfactory,
        Rating::Poor,
    ];

    /// The text of the rating as it appears in the responses.
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::VeryGood => "Very Good",
            Rating::Good => "Good",
            Rating::Satisfactory => "Satisfactory",
            Rating::Poor => "Poor",
        }
    }

    pub fn from_label(s: &str) -> Option<Rating> {
        Rating::ALL.iter().find(|r| r.label() == s).cloned()
    }

    /// Excellent, Very Good and Good are the positive responses (E+V+G).
    pub fn is_positive(&self) -> bool {
        matches!(self, Rating::Excellent | Rating::VeryGood | Rating::Good)
    }

    fn index(&self) -> usize {
        match self {
            Rating::Excellent => 0,
            Rating::VeryGood => 1,
            Rating::Good => 2,
            Rating::Satisfactory => 3,
            Rating::Poor => 4,
        }
    }
}

/// The answers to one question, one entry per respondent.
///
/// `None` stands for a cell that does not hold any text (blank, number, date...).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionResponses {
    pub label: String,
    pub responses: Vec<Option<String>>,
}

// ******** Output data structures *********

/// Number of responses for each rating category.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct RatingCounts([u64; 5]);

impl RatingCounts {
    pub fn get(&self, rating: Rating) -> u64 {
        self.0[rating.index()]
    }

    pub(crate) fn increment(&mut self, rating: Rating) {
        self.0[rating.index()] += 1;
    }

    /// Sum of all the recognized responses.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// The E+V+G composite.
    pub fn positive(&self) -> u64 {
        Rating::ALL
            .iter()
            .filter(|r| r.is_positive())
            .map(|r| self.get(*r))
            .sum()
    }
}

/// Statistics for one question
#[derive(PartialEq, Debug, Clone)]
pub struct QuestionSummary {
    pub label: String,
    pub counts: RatingCounts,
    pub positive: u64,
    /// In [0, 100], rounded to 2 decimals.
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct SurveySummary {
    pub total_respondents: u64,
    pub questions: Vec<QuestionSummary>,
}

/// Errors that prevent the tally from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    /// A question has more answers than there are respondents.
    TooManyResponses {
        label: String,
        responses: u64,
        respondents: u64,
    },
    /// A respondent row does not have one answer per question.
    RowWidthMismatch { expected: usize, found: usize },
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::TooManyResponses {
                label,
                responses,
                respondents,
            } => write!(
                f,
                "question {} has {} responses for {} respondents",
                label, responses, respondents
            ),
            TallyErrors::RowWidthMismatch { expected, found } => write!(
                f,
                "respondent row has {} answers, expected {}",
                found, expected
            ),
        }
    }
}
