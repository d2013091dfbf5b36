use clap::Parser;

/// Analysis of course exit surveys: tallies the ratings of a spreadsheet and writes a Word report.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The spreadsheet containing the survey responses (xlsx, xls or ods). Only the first
    /// worksheet is read.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (file path, optional) A JSON file with the settings of the report: output directory, institute
    /// and department names, survey marker, identifier columns to drop.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, optional) The directory where the report is written. Setting this option overrides
    /// the directory that may be specified with the --config option.
    #[clap(long, value_parser)]
    pub output_directory: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the survey will be written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of a survey in JSON format. If provided,
    /// exitsurvey will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
