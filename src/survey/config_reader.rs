use crate::survey::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_INSTITUTE_NAME: &str = "B.N.M. Institute of Technology, Bengaluru-70";
pub const DEFAULT_DEPARTMENT_NAME: &str = "Department of Chemistry";
pub const DEFAULT_REPORT_TITLE: &str = "Analysis of course exit survey";
pub const DEFAULT_SURVEY_START_MARKER: &str = "Question";
pub const DEFAULT_SURVEY_START_ROW: usize = 7;
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";

/// The settings of a report, as read from the optional JSON configuration file.
///
/// All the fields may be omitted, the accessors provide the default values.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "instituteName")]
    pub institute_name: Option<String>,
    #[serde(rename = "departmentName")]
    pub department_name: Option<String>,
    #[serde(rename = "reportTitle")]
    pub report_title: Option<String>,
    #[serde(rename = "surveyStartMarker")]
    pub survey_start_marker: Option<String>,
    #[serde(rename = "defaultSurveyStartRow")]
    pub default_survey_start_row: Option<usize>,
    #[serde(rename = "droppedColumns")]
    pub dropped_columns: Option<Vec<String>>,
}

impl ReportConfig {
    pub fn output_directory(&self) -> &str {
        self.output_directory
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_DIRECTORY)
    }

    pub fn institute_name(&self) -> &str {
        self.institute_name
            .as_deref()
            .unwrap_or(DEFAULT_INSTITUTE_NAME)
    }

    pub fn department_name(&self) -> &str {
        self.department_name
            .as_deref()
            .unwrap_or(DEFAULT_DEPARTMENT_NAME)
    }

    pub fn report_title(&self) -> &str {
        self.report_title.as_deref().unwrap_or(DEFAULT_REPORT_TITLE)
    }

    pub fn survey_start_marker(&self) -> &str {
        self.survey_start_marker
            .as_deref()
            .unwrap_or(DEFAULT_SURVEY_START_MARKER)
    }

    pub fn default_survey_start_row(&self) -> usize {
        self.default_survey_start_row
            .unwrap_or(DEFAULT_SURVEY_START_ROW)
    }

    /// The identifier columns removed before the tally.
    pub fn dropped_columns(&self) -> Vec<String> {
        match &self.dropped_columns {
            Some(cols) => cols.clone(),
            None => vec!["NAME".to_string(), "USN".to_string()],
        }
    }
}

pub fn read_config(path: String) -> ReportResult<ReportConfig> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Reads a reference summary, as produced by a previous run.
///
/// The location of the report is not part of the comparison and is removed.
pub fn read_summary(path: String) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let mut js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    if let Some(obj) = js.as_object_mut() {
        obj.remove("reportPath");
    }
    Ok(js)
}
