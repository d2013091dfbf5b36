use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{AlignmentType, Docx, Paragraph, Run, Style, StyleType, Table, TableCell, TableRow};
use survey_tally::{Rating, SurveySummary};

use crate::survey::config_reader::ReportConfig;
use crate::survey::metadata::{Metadata, MetadataField};
use crate::survey::*;

const BLACK: &str = "000000";
const HEADING_STYLE: &str = "Heading1";

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LineStyle {
    /// Centered, bold, heading 1
    Heading,
    /// Centered, bold
    Bold,
    Blank,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportLine {
    pub text: String,
    pub style: LineStyle,
}

/// The content of the report, before it is laid out in a document.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportDocument {
    pub lines: Vec<ReportLine>,
    /// The first row is the header of the table.
    pub table: Vec<Vec<String>>,
}

pub fn build_report(
    metadata: &Metadata,
    summary: &SurveySummary,
    config: &ReportConfig,
) -> ReportDocument {
    let line = |text: String, style: LineStyle| ReportLine { text, style };
    let course_info = format!(
        "Course Code: {}    Course: {}    Branch: {}    Year: {}",
        metadata.get(MetadataField::SubjectCode),
        metadata.get(MetadataField::SubjectName),
        metadata.get(MetadataField::Branch),
        metadata.get(MetadataField::Year)
    );
    let lines = vec![
        line(config.institute_name().to_string(), LineStyle::Heading),
        line(config.department_name().to_string(), LineStyle::Heading),
        line(config.report_title().to_string(), LineStyle::Bold),
        line(course_info, LineStyle::Bold),
        line(
            format!(
                "TOTAL NO OF STUDENTS TAKEN SURVEY= {}",
                summary.total_respondents
            ),
            LineStyle::Bold,
        ),
        line("".to_string(), LineStyle::Blank),
    ];

    let mut table: Vec<Vec<String>> = vec![vec![
        metadata.subject_code().to_string(),
        "EXCELLENT".to_string(),
        "VERY GOOD".to_string(),
        "GOOD".to_string(),
        "SATISFACTORY".to_string(),
        "POOR".to_string(),
        "E+V+G".to_string(),
        "%".to_string(),
    ]];
    for q in summary.questions.iter() {
        let mut row = vec![q.label.clone()];
        row.extend(Rating::ALL.iter().map(|r| q.counts.get(*r).to_string()));
        row.push(q.positive.to_string());
        if summary.total_respondents == 0 {
            row.push("0".to_string());
        } else {
            row.push(format_percentage(q.percentage));
        }
        table.push(row);
    }
    ReportDocument { lines, table }
}

/// Whole numbers keep one decimal (75.0), the others are printed as is (66.67).
pub fn format_percentage(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{:.1}", p)
    } else {
        format!("{}", p)
    }
}

/// `{code}_analysis.docx`, with the path separators of the code replaced.
pub fn report_file_name(subject_code: &str) -> String {
    let code: String = subject_code
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}_analysis.docx", code)
}

pub fn report_path(config: &ReportConfig, metadata: &Metadata) -> PathBuf {
    Path::new(config.output_directory()).join(report_file_name(metadata.subject_code()))
}

fn black_run(text: &str) -> Run {
    Run::new().add_text(text).color(BLACK)
}

fn centered_bold(text: &str) -> Paragraph {
    Paragraph::new()
        .add_run(black_run(text).bold())
        .align(AlignmentType::Center)
}

impl ReportDocument {
    pub fn to_docx(&self) -> Docx {
        let mut docx = Docx::new().add_style(
            Style::new(HEADING_STYLE, StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold()
                .color(BLACK),
        );
        for l in self.lines.iter() {
            let p = match l.style {
                LineStyle::Heading => centered_bold(&l.text).style(HEADING_STYLE),
                LineStyle::Bold => centered_bold(&l.text),
                LineStyle::Blank => Paragraph::new(),
            };
            docx = docx.add_paragraph(p);
        }
        let rows: Vec<TableRow> = self
            .table
            .iter()
            .map(|r| {
                TableRow::new(
                    r.iter()
                        .map(|c| TableCell::new().add_paragraph(Paragraph::new().add_run(black_run(c))))
                        .collect(),
                )
            })
            .collect();
        docx.add_table(Table::new(rows))
    }

    /// Writes the document, overwriting any existing file.
    pub fn write(&self, path: &Path) -> ReportResult<()> {
        let path_s = path.display().to_string();
        let file = File::create(path).context(WritingReportSnafu { path: path_s.clone() })?;
        self.to_docx()
            .build()
            .pack(file)
            .whatever_context(format!("Could not assemble the document {}", path_s))?;
        info!("Report written to {}", path_s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_tally::{run_survey_stats, QuestionResponses};

    fn summary() -> SurveySummary {
        let qs = vec![
            QuestionResponses {
                label: "23EVS127.1".to_string(),
                responses: ["Excellent", "Excellent", "Good", "Poor"]
                    .iter()
                    .map(|s| Some(s.to_string()))
                    .collect(),
            },
            QuestionResponses {
                label: "23EVS127.2".to_string(),
                responses: ["Very Good", "Satisfactory", "Satisfactory"]
                    .iter()
                    .map(|s| Some(s.to_string()))
                    .collect(),
            },
        ];
        run_survey_stats(&qs, 4).unwrap()
    }

    fn metadata() -> Metadata {
        let mut m = Metadata::default();
        m.insert(MetadataField::SubjectCode, "23EVS127".to_string());
        m.insert(MetadataField::SubjectName, "Environmental Studies".to_string());
        m.insert(MetadataField::Year, "2023".to_string());
        m
    }

    #[test]
    fn report_content() {
        let doc = build_report(&metadata(), &summary(), &ReportConfig::default());
        let texts: Vec<&str> = doc.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "B.N.M. Institute of Technology, Bengaluru-70",
                "Department of Chemistry",
                "Analysis of course exit survey",
                "Course Code: 23EVS127    Course: Environmental Studies    Branch: Unknown    Year: 2023",
                "TOTAL NO OF STUDENTS TAKEN SURVEY= 4",
                "",
            ]
        );
        assert_eq!(doc.lines[0].style, LineStyle::Heading);
        assert_eq!(doc.lines[2].style, LineStyle::Bold);
        assert_eq!(doc.lines[5].style, LineStyle::Blank);
        assert_eq!(
            doc.table,
            vec![
                vec!["23EVS127", "EXCELLENT", "VERY GOOD", "GOOD", "SATISFACTORY", "POOR", "E+V+G", "%"],
                vec!["23EVS127.1", "2", "0", "1", "0", "1", "3", "75.0"],
                vec!["23EVS127.2", "0", "1", "0", "2", "0", "1", "25.0"],
            ]
        );
    }

    #[test]
    fn percentages() {
        assert_eq!(format_percentage(75.0), "75.0");
        assert_eq!(format_percentage(66.67), "66.67");
        assert_eq!(format_percentage(0.0), "0.0");
        assert_eq!(format_percentage(100.0), "100.0");
        assert_eq!(format_percentage(12.5), "12.5");
    }

    #[test]
    fn report_without_respondents() {
        let qs = vec![QuestionResponses {
            label: "Unknown.1".to_string(),
            responses: Vec::new(),
        }];
        let empty = run_survey_stats(&qs, 0).unwrap();
        let doc = build_report(&Metadata::unknown(), &empty, &ReportConfig::default());
        assert_eq!(doc.lines[4].text, "TOTAL NO OF STUDENTS TAKEN SURVEY= 0");
        assert_eq!(
            doc.table[1],
            vec!["Unknown.1", "0", "0", "0", "0", "0", "0", "0"]
        );
    }

    #[test]
    fn file_names() {
        assert_eq!(report_file_name("23EVS127"), "23EVS127_analysis.docx");
        assert_eq!(report_file_name("Unknown"), "Unknown_analysis.docx");
        assert_eq!(report_file_name("CS/51\\A"), "CS_51_A_analysis.docx");
        let config = ReportConfig {
            output_directory: Some("reports".to_string()),
            ..Default::default()
        };
        assert_eq!(
            report_path(&config, &Metadata::unknown()),
            Path::new("reports").join("Unknown_analysis.docx")
        );
    }

    #[test]
    fn write_docx() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join(report_file_name("23EVS127"));
        let doc = build_report(&metadata(), &summary(), &ReportConfig::default());
        doc.write(&p).unwrap();
        // Written twice: the last writer wins.
        doc.write(&p).unwrap();
        let bytes = fs::read(&p).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn write_to_missing_directory() {
        let doc = build_report(&metadata(), &summary(), &ReportConfig::default());
        let res = doc.write(Path::new("/nonexistent/exitsurvey/X_analysis.docx"));
        assert!(matches!(res, Err(ReportError::WritingReport { .. })));
    }
}
