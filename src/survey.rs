use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_tally::builder::Builder;
use survey_tally::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::survey::config_reader::*;
use crate::survey::io_excel::{read_first_sheet, RawSheet};
use crate::survey::metadata::{extract_metadata, Metadata, MetadataField};
use crate::survey::report::{build_report, report_path};
use crate::survey::table_loader::load_survey_table;

pub mod config_reader;
pub mod io_common;
pub mod io_excel;
pub mod metadata;
pub mod report;
pub mod table_loader;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningSpreadsheet {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The spreadsheet {path} has no worksheet"))]
    EmptySpreadsheet { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error serializing the summary to JSON"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Could not create the output directory {path}"))]
    CreatingOutputDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Could not write the report {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error while tallying the responses"))]
    Tally { source: TallyErrors },
    #[snafu(display("Difference detected between the computed summary and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

/// The outcome of the analysis of one survey.
#[derive(PartialEq, Debug, Clone)]
pub struct Report {
    pub metadata: Metadata,
    pub summary: SurveySummary,
}

/// Runs the whole analysis on a sheet that is already loaded.
pub fn process_sheet(sheet: &RawSheet, config: &ReportConfig) -> ReportResult<Report> {
    let extracted = extract_metadata(sheet);
    debug!("process_sheet: extracted metadata: {:?}", extracted);
    let (table, metadata) = load_survey_table(sheet, extracted, config);

    let mut builder = Builder::new(table.question_labels());
    for answers in table.question_answers() {
        builder.add_response_row(&answers).context(TallySnafu {})?;
    }
    let summary = builder.summarize().context(TallySnafu {})?;
    Ok(Report { metadata, summary })
}

/// Reads the survey, writes the report document and returns the analysis with the
/// location of the document.
pub fn run_report(input_path: &str, config: &ReportConfig) -> ReportResult<(Report, PathBuf)> {
    let sheet = read_first_sheet(input_path)?;
    let report = process_sheet(&sheet, config)?;

    let out_dir = config.output_directory();
    fs::create_dir_all(out_dir).context(CreatingOutputDirSnafu { path: out_dir })?;
    let path = report_path(config, &report.metadata);
    if path.exists() {
        warn!("run_report: overwriting existing report {}", path.display());
    }
    build_report(&report.metadata, &report.summary, config).write(&path)?;
    Ok((report, path))
}

pub fn build_summary_js(report: &Report, report_path: Option<&Path>) -> JSValue {
    let m = &report.metadata;
    let questions: Vec<JSValue> = report
        .summary
        .questions
        .iter()
        .map(|q| {
            json!({
                "label": q.label,
                "excellent": q.counts.get(Rating::Excellent),
                "veryGood": q.counts.get(Rating::VeryGood),
                "good": q.counts.get(Rating::Good),
                "satisfactory": q.counts.get(Rating::Satisfactory),
                "poor": q.counts.get(Rating::Poor),
                "positive": q.positive,
                "percentage": q.percentage,
            })
        })
        .collect();
    let mut js = json!({
        "metadata": {
            "subjectCode": m.get(MetadataField::SubjectCode),
            "subjectName": m.get(MetadataField::SubjectName),
            "branch": m.get(MetadataField::Branch),
            "year": m.get(MetadataField::Year),
        },
        "totalStudents": report.summary.total_respondents,
        "questions": questions,
    });
    if let Some(p) = report_path {
        js["reportPath"] = json!(p.display().to_string());
    }
    js
}

fn summary_to_string(js: &JSValue) -> ReportResult<String> {
    serde_json::to_string_pretty(js).context(SerializingJsonSnafu {})
}

/// Entry point of the program.
///
/// Arguments:
/// * `input_path` the spreadsheet with the survey
/// * `config_path` an optional JSON file with the settings of the report
/// * `output_directory` if provided, overrides the output directory of the settings
/// * `out_path` where to write the JSON summary: a file, `stdout`, or nowhere
/// * `check_summary_path` a reference summary to compare the result against
pub fn run_survey(
    input_path: String,
    config_path: Option<String>,
    output_directory: Option<String>,
    out_path: Option<String>,
    check_summary_path: Option<String>,
) -> ReportResult<()> {
    let mut config = match config_path {
        Some(p) => read_config(p)?,
        None => ReportConfig::default(),
    };
    if output_directory.is_some() {
        config.output_directory = output_directory;
    }
    info!("config: {:?}", config);

    let (report, path) = run_report(&input_path, &config)?;
    info!(
        "Processed {} questions for {} students",
        report.summary.questions.len(),
        report.summary.total_respondents
    );

    let result_js = build_summary_js(&report, Some(&path));
    let pretty_js_stats = summary_to_string(&result_js)?;

    match out_path.as_deref() {
        Some("stdout") => {
            println!("{}", pretty_js_stats);
        }
        Some(p) => {
            fs::write(p, &pretty_js_stats).context(WritingReportSnafu { path: p })?;
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p.clone())?;
        let pretty_js_summary_ref = summary_to_string(&summary_ref)?;
        let pretty_js_computed = summary_to_string(&build_summary_js(&report, None))?;
        if pretty_js_summary_ref != pretty_js_computed {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_computed.as_str(),
                "\n",
            );
            return ReferenceMismatchSnafu { path: summary_p }.fail();
        }
        info!("The summary matches the reference {}", summary_p);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::DataType;

    fn s(x: &str) -> DataType {
        DataType::String(x.to_string())
    }

    fn survey_sheet() -> RawSheet {
        RawSheet::new(vec![
            vec![s("B.N.M. Institute of Technology")],
            vec![s("Subject Name: Environmental Studies"), DataType::Empty],
            vec![s("Subject Code: 23EVS127"), s("Branch: CSE")],
            vec![s("Year: 2023")],
            vec![],
            vec![s("Question 1"), s("USN"), s("NAME"), s("CO1")],
            vec![s("1"), s("1BG001"), s("A"), s("Excellent")],
            vec![s("2"), s("1BG002"), s("B"), s("Excellent")],
            vec![s("3"), s("1BG003"), s("C"), s("Good")],
            vec![s("4"), s("1BG004"), s("D"), s("Poor")],
        ])
    }

    #[test]
    fn end_to_end_summary() {
        let report = process_sheet(&survey_sheet(), &ReportConfig::default()).unwrap();
        assert_eq!(report.metadata.subject_code(), "23EVS127");
        assert_eq!(report.metadata.get(MetadataField::Branch), "CSE");
        assert_eq!(report.summary.total_respondents, 4);
        assert_eq!(report.summary.questions.len(), 1);
        let q = &report.summary.questions[0];
        assert_eq!(q.label, "23EVS127.1");
        assert_eq!(q.counts.get(Rating::Excellent), 2);
        assert_eq!(q.counts.get(Rating::VeryGood), 0);
        assert_eq!(q.counts.get(Rating::Good), 1);
        assert_eq!(q.counts.get(Rating::Satisfactory), 0);
        assert_eq!(q.counts.get(Rating::Poor), 1);
        assert_eq!(q.positive, 3);
        assert_eq!(q.percentage, 75.0);
    }

    #[test]
    fn no_metadata_summary() {
        let sheet = RawSheet::new(vec![
            vec![s("Sl"), s("Q1"), s("Q2")],
            vec![s("1"), s("Good"), s("N/A")],
            vec![s("2"), s("Satisfactory"), DataType::Float(3.0)],
        ]);
        let report = process_sheet(&sheet, &ReportConfig::default()).unwrap();
        assert_eq!(report.metadata, Metadata::unknown());
        let labels: Vec<&str> = report
            .summary
            .questions
            .iter()
            .map(|q| q.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Unknown.1", "Unknown.2"]);
        assert_eq!(report.summary.questions[0].percentage, 50.0);
        assert_eq!(report.summary.questions[1].counts.total(), 0);
        assert_eq!(report.summary.questions[1].percentage, 0.0);
    }

    #[test]
    fn blank_first_row_without_metadata() {
        let sheet = RawSheet::new(vec![
            vec![],
            vec![s("Sl"), s("Q1")],
            vec![s("1"), s("Good")],
            vec![s("2"), s("Poor")],
        ]);
        let report = process_sheet(&sheet, &ReportConfig::default()).unwrap();
        assert_eq!(report.metadata, Metadata::unknown());
        assert_eq!(report.summary.total_respondents, 2);
        let q = &report.summary.questions[0];
        assert_eq!(q.label, "Unknown.1");
        assert_eq!(q.positive, 1);
        assert_eq!(q.percentage, 50.0);
    }

    #[test]
    fn summary_serialization() {
        let report = process_sheet(&survey_sheet(), &ReportConfig::default()).unwrap();
        let text = summary_to_string(&build_summary_js(&report, None)).unwrap();
        let back: JSValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back["totalStudents"], json!(4));

        let source = serde_json::from_str::<JSValue>("{").unwrap_err();
        let err = ReportError::SerializingJson { source };
        assert_eq!(err.to_string(), "Error serializing the summary to JSON");
    }

    #[test]
    fn header_only_survey() {
        let sheet = RawSheet::new(vec![vec![s("Subject Code: X1")], vec![s("Question"), s("Q1")]]);
        let report = process_sheet(&sheet, &ReportConfig::default()).unwrap();
        assert_eq!(report.summary.total_respondents, 0);
        assert_eq!(report.summary.questions[0].label, "X1.1");
        assert_eq!(report.summary.questions[0].percentage, 0.0);
    }

    #[test]
    fn summary_json() {
        let report = process_sheet(&survey_sheet(), &ReportConfig::default()).unwrap();
        let js = build_summary_js(&report, None);
        assert_eq!(
            js,
            json!({
                "metadata": {
                    "subjectCode": "23EVS127",
                    "subjectName": "Environmental Studies",
                    "branch": "CSE",
                    "year": "2023",
                },
                "totalStudents": 4,
                "questions": [{
                    "label": "23EVS127.1",
                    "excellent": 2,
                    "veryGood": 0,
                    "good": 1,
                    "satisfactory": 0,
                    "poor": 1,
                    "positive": 3,
                    "percentage": 75.0,
                }],
            })
        );
        let js2 = build_summary_js(&report, Some(Path::new("out/23EVS127_analysis.docx")));
        assert_eq!(js2["reportPath"], json!("out/23EVS127_analysis.docx"));
    }

    #[test]
    fn missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = run_survey(
            dir.path().join("missing.xlsx").display().to_string(),
            None,
            Some(dir.path().display().to_string()),
            None,
            None,
        );
        assert!(res.is_err());
    }
}
