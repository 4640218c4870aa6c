//! Core data models for the XTM API surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::errors::{Result, XtmError};

/// LQA report granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LqaType {
    /// One report per target language
    Language,
    /// One report per file
    File,
}

impl LqaType {
    /// Literal value expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            LqaType::Language => "LANGUAGE",
            LqaType::File => "FILE",
        }
    }
}

impl fmt::Display for LqaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a file operation targets a single job or the whole project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileScope {
    /// Single job
    Job,
    /// Entire project
    Project,
}

impl FileScope {
    /// Literal value expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            FileScope::Job => "JOB",
            FileScope::Project => "PROJECT",
        }
    }
}

impl Default for FileScope {
    fn default() -> Self {
        FileScope::Job
    }
}

impl fmt::Display for FileScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target-file categories that can be force-fetched in a batch download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchTargetFileType {
    /// Files with no translatable content
    NoContent,
    /// Files XTM could not analyse
    NonAnalysable,
    /// Unsupported file formats
    NotSupported,
}

impl FetchTargetFileType {
    /// Literal value expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchTargetFileType::NoContent => "NO_CONTENT",
            FetchTargetFileType::NonAnalysable => "NON_ANALYSABLE",
            FetchTargetFileType::NotSupported => "NOT_SUPPORTED",
        }
    }
}

impl fmt::Display for FetchTargetFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a file-name filter string is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileNameFilterType {
    /// Name contains the filter string
    Contains,
    /// Name equals the filter string
    Equals,
    /// Name starts with the filter string
    StartsWith,
    /// Name ends with the filter string
    EndsWith,
}

impl FileNameFilterType {
    /// Literal value expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            FileNameFilterType::Contains => "CONTAINS",
            FileNameFilterType::Equals => "EQUALS",
            FileNameFilterType::StartsWith => "STARTS_WITH",
            FileNameFilterType::EndsWith => "ENDS_WITH",
        }
    }
}

impl fmt::Display for FileNameFilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output formats a project file can be generated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// Translated target file
    Target,
    /// XLIFF export
    Xliff,
    /// XLIFF without translator protection
    XliffNtp,
    /// QA report
    QaReport,
    /// HTML preview
    Html,
    /// HTML table view
    HtmlTable,
    /// PDF preview
    Pdf,
    /// PDF table view
    PdfTable,
    /// TIPP package
    Tipp,
    /// Extended HTML table view
    HtmlExtendedTable,
    /// HTML with colour highlighting
    HtmlColoured,
    /// HTML coloured by match rate
    HtmlColouredByMatchRate,
    /// Extended PDF table view
    PdfExtendedTable,
    /// PDF with colour highlighting
    PdfColoured,
    /// PDF coloured by XLIFF document status
    PdfColouredByXliffDocStatus,
    /// PDF coloured by match rate
    PdfColouredByMatchRate,
    /// Target coloured by match rate
    TargetColouredByMatchRate,
    /// Target coloured by XLIFF document status
    TargetColouredByXliffDocStatus,
    /// XLIFF:doc package
    XliffDoc,
    /// LQA report
    LqaReport,
    /// Extended LQA table report
    LqaExtendedTableReport,
    /// Pseudo-translated target
    TargetPseudo,
    /// Multi-sheet Excel export
    MultiExcel,
    /// Extended Excel table view
    ExcelExtendedTable,
}

impl FileType {
    /// Literal value expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Target => "TARGET",
            FileType::Xliff => "XLIFF",
            FileType::XliffNtp => "XLIFF_NTP",
            FileType::QaReport => "QA_REPORT",
            FileType::Html => "HTML",
            FileType::HtmlTable => "HTML_TABLE",
            FileType::Pdf => "PDF",
            FileType::PdfTable => "PDF_TABLE",
            FileType::Tipp => "TIPP",
            FileType::HtmlExtendedTable => "HTML_EXTENDED_TABLE",
            FileType::HtmlColoured => "HTML_COLOURED",
            FileType::HtmlColouredByMatchRate => "HTML_COLOURED_BY_MATCH_RATE",
            FileType::PdfExtendedTable => "PDF_EXTENDED_TABLE",
            FileType::PdfColoured => "PDF_COLOURED",
            FileType::PdfColouredByXliffDocStatus => "PDF_COLOURED_BY_XLIFF_DOC_STATUS",
            FileType::PdfColouredByMatchRate => "PDF_COLOURED_BY_MATCH_RATE",
            FileType::TargetColouredByMatchRate => "TARGET_COLOURED_BY_MATCH_RATE",
            FileType::TargetColouredByXliffDocStatus => "TARGET_COLOURED_BY_XLIFF_DOC_STATUS",
            FileType::XliffDoc => "XLIFF_DOC",
            FileType::LqaReport => "LQA_REPORT",
            FileType::LqaExtendedTableReport => "LQA_EXTENDED_TABLE_REPORT",
            FileType::TargetPseudo => "TARGET_PSEUDO",
            FileType::MultiExcel => "MULTI_EXCEL",
            FileType::ExcelExtendedTable => "EXCEL_EXTENDED_TABLE",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified API response: decoded JSON or a raw binary payload.
///
/// The split is decided solely by the response `Content-Type`; binary
/// payloads (ZIP archives, spreadsheets, XLIFF) are passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// JSON structure, passed through without schema validation
    Json(serde_json::Value),
    /// Raw octet-stream payload
    Binary(Vec<u8>),
}

impl ApiResponse {
    /// Unwrap the JSON variant
    pub fn into_json(self) -> Result<serde_json::Value> {
        match self {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Binary(_) => Err(XtmError::InvalidResponseError {
                message: "expected JSON response, received binary payload".to_string(),
            }),
        }
    }

    /// Unwrap the binary variant
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            ApiResponse::Binary(bytes) => Ok(bytes),
            ApiResponse::Json(_) => Err(XtmError::InvalidResponseError {
                message: "expected binary payload, received JSON response".to_string(),
            }),
        }
    }
}

/// Filters for listing LQA reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LqaFilter {
    /// Projects to report on
    pub project_ids: Vec<u64>,
    /// Restrict to these target languages
    pub target_languages: Option<Vec<String>>,
    /// Restrict to these evaluated users
    pub evaluee_ids: Option<Vec<u64>>,
    /// Restrict to these workflow steps
    pub workflow_step_ids: Option<Vec<u64>>,
    /// Restrict to these evaluators
    pub evaluator_ids: Option<Vec<u64>>,
    /// Report granularity
    pub lqa_type: Option<LqaType>,
}

impl LqaFilter {
    /// Filter covering the given projects, with no further restrictions
    pub fn new(project_ids: Vec<u64>) -> Self {
        Self {
            project_ids,
            target_languages: None,
            evaluee_ids: None,
            workflow_step_ids: None,
            evaluator_ids: None,
            lqa_type: None,
        }
    }

    /// Restrict to target languages
    pub fn with_target_languages(mut self, languages: Vec<String>) -> Self {
        self.target_languages = Some(languages);
        self
    }

    /// Restrict to evaluated users
    pub fn with_evaluee_ids(mut self, ids: Vec<u64>) -> Self {
        self.evaluee_ids = Some(ids);
        self
    }

    /// Restrict to workflow steps
    pub fn with_workflow_step_ids(mut self, ids: Vec<u64>) -> Self {
        self.workflow_step_ids = Some(ids);
        self
    }

    /// Restrict to evaluators
    pub fn with_evaluator_ids(mut self, ids: Vec<u64>) -> Self {
        self.evaluator_ids = Some(ids);
        self
    }

    /// Set the report granularity
    pub fn with_lqa_type(mut self, lqa_type: LqaType) -> Self {
        self.lqa_type = Some(lqa_type);
        self
    }
}

/// Filters for downloading LQA reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LqaDownloadFilter {
    /// Projects to report on
    pub project_ids: Vec<u64>,
    /// Previously generated report to fetch
    pub report_id: Option<u64>,
    /// Restrict to these target languages
    pub target_languages: Option<Vec<String>>,
    /// Restrict to these evaluated users
    pub evaluee_ids: Option<Vec<u64>>,
    /// Restrict to these workflow steps
    pub workflow_step_ids: Option<Vec<u64>>,
    /// Restrict to these evaluators
    pub evaluator_ids: Option<Vec<u64>>,
    /// Report granularity
    pub lqa_type: Option<LqaType>,
    /// Only evaluations completed at or after this instant
    pub complete_date_from: Option<DateTime<Utc>>,
    /// Only evaluations completed at or before this instant
    pub complete_date_to: Option<DateTime<Utc>>,
}

impl LqaDownloadFilter {
    /// Filter covering the given projects, with no further restrictions
    pub fn new(project_ids: Vec<u64>) -> Self {
        Self {
            project_ids,
            report_id: None,
            target_languages: None,
            evaluee_ids: None,
            workflow_step_ids: None,
            evaluator_ids: None,
            lqa_type: None,
            complete_date_from: None,
            complete_date_to: None,
        }
    }

    /// Fetch a previously generated report
    pub fn with_report_id(mut self, report_id: u64) -> Self {
        self.report_id = Some(report_id);
        self
    }

    /// Restrict to target languages
    pub fn with_target_languages(mut self, languages: Vec<String>) -> Self {
        self.target_languages = Some(languages);
        self
    }

    /// Restrict to evaluated users
    pub fn with_evaluee_ids(mut self, ids: Vec<u64>) -> Self {
        self.evaluee_ids = Some(ids);
        self
    }

    /// Restrict to workflow steps
    pub fn with_workflow_step_ids(mut self, ids: Vec<u64>) -> Self {
        self.workflow_step_ids = Some(ids);
        self
    }

    /// Restrict to evaluators
    pub fn with_evaluator_ids(mut self, ids: Vec<u64>) -> Self {
        self.evaluator_ids = Some(ids);
        self
    }

    /// Set the report granularity
    pub fn with_lqa_type(mut self, lqa_type: LqaType) -> Self {
        self.lqa_type = Some(lqa_type);
        self
    }

    /// Only evaluations completed at or after this instant
    pub fn with_complete_date_from(mut self, from: DateTime<Utc>) -> Self {
        self.complete_date_from = Some(from);
        self
    }

    /// Only evaluations completed at or before this instant
    pub fn with_complete_date_to(mut self, to: DateTime<Utc>) -> Self {
        self.complete_date_to = Some(to);
        self
    }
}

/// Filters for listing users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Restrict to these usernames
    pub usernames: Option<Vec<String>>,
    /// Restrict to these user ids
    pub ids: Option<Vec<u64>>,
    /// Include address data in the response
    pub fetch_address: Option<bool>,
}

impl UserFilter {
    /// Unrestricted filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to usernames
    pub fn with_usernames(mut self, usernames: Vec<String>) -> Self {
        self.usernames = Some(usernames);
        self
    }

    /// Restrict to user ids
    pub fn with_ids(mut self, ids: Vec<u64>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Include address data in the response
    pub fn with_fetch_address(mut self, fetch_address: bool) -> Self {
        self.fetch_address = Some(fetch_address);
        self
    }
}

/// Filters for batch file downloads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDownloadFilter {
    /// Also fetch these otherwise-skipped target file categories
    pub fetch_target_file_types: Option<Vec<FetchTargetFileType>>,
    /// Restrict to these file ids
    pub file_ids: Option<Vec<u64>>,
    /// File-name filter string
    pub file_name_filter: Option<String>,
    /// How the file-name filter string is matched
    pub file_name_filter_type: Option<FileNameFilterType>,
    /// Restrict to these jobs
    pub job_ids: Option<Vec<u64>>,
    /// Restrict to these target languages
    pub target_languages: Option<Vec<String>>,
}

impl FileDownloadFilter {
    /// Unrestricted filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Also fetch these otherwise-skipped target file categories
    pub fn with_fetch_target_file_types(mut self, types: Vec<FetchTargetFileType>) -> Self {
        self.fetch_target_file_types = Some(types);
        self
    }

    /// Restrict to file ids
    pub fn with_file_ids(mut self, ids: Vec<u64>) -> Self {
        self.file_ids = Some(ids);
        self
    }

    /// Match file names against a filter string
    pub fn with_file_name_filter(
        mut self,
        filter: impl Into<String>,
        filter_type: FileNameFilterType,
    ) -> Self {
        self.file_name_filter = Some(filter.into());
        self.file_name_filter_type = Some(filter_type);
        self
    }

    /// Restrict to jobs
    pub fn with_job_ids(mut self, ids: Vec<u64>) -> Self {
        self.job_ids = Some(ids);
        self
    }

    /// Restrict to target languages
    pub fn with_target_languages(mut self, languages: Vec<String>) -> Self {
        self.target_languages = Some(languages);
        self
    }
}
