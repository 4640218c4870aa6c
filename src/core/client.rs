//! Async session over the XTM Cloud project-manager REST API

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::core::config::XtmConfig;
use crate::core::errors::{Result, XtmError};
use crate::core::models::{
    ApiResponse, FileDownloadFilter, FileScope, FileType, LqaDownloadFilter, LqaFilter, UserFilter,
};
use crate::core::params::{datetime_param, QueryParams};
use crate::core::transport::{ReqMethod, Transport};

/// Terminal status of an asynchronous file-generation job
const STATUS_FINISHED: &str = "FINISHED";

/// Cost-assignment policy sent with every cost-generation request
const COST_ASSIGNMENT_TYPE: &str = "AUTOMATIC";

/// Attempt budget used by [`XtmClient::wait_for_file_completion`] callers
/// that have no reason to pick their own
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 10;

/// Authenticated session against one XTM instance.
///
/// The bearer token is obtained once at construction and reused for the
/// lifetime of the session. A token that expires server-side surfaces as an
/// [`XtmError::ApiError`] on the next call; re-authenticating means building
/// a fresh client. Intended for sequential use by a single caller.
#[derive(Debug, Clone)]
pub struct XtmClient {
    /// Request envelope shared by every operation
    transport: Transport,
    /// Root of the REST API, without a trailing slash
    base_url: String,
    /// Bearer token obtained during [`XtmClient::connect`]
    token: String,
}

impl XtmClient {
    /// Exchange the configured credentials for a token and open a session.
    ///
    /// https://www.xtm-cloud.com/rest-api/#tag/Authentication
    pub async fn connect(config: XtmConfig) -> Result<Self> {
        config.validate()?;

        let transport = Transport::new(Duration::from_millis(config.timeout_ms))?;

        let url = format!("{}/auth/token", config.base_url);
        let body = json!({
            "client": config.client_name,
            "password": config.password,
            "userId": config.user_id,
        });

        let response = transport
            .send(&url, ReqMethod::Post, None, Some(&body), &[])
            .await?;
        let token = response
            .into_json()?
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| XtmError::MissingFieldError {
                field: "token".to_string(),
            })?
            .to_string();

        info!("Authenticated with XTM as user {}", config.user_id);

        Ok(Self {
            transport,
            base_url: config.base_url,
            token,
        })
    }

    /// Open a session configured from environment variables
    pub async fn from_env() -> Result<Self> {
        Self::connect(XtmConfig::from_env()?).await
    }

    /// One request with the session token attached
    async fn call(
        &self,
        url: String,
        method: ReqMethod,
        body: Option<&Value>,
        params: &QueryParams,
    ) -> Result<ApiResponse> {
        self.transport
            .send(&url, method, Some(&self.token), body, params.as_pairs())
            .await
    }

    /// Fetch one project.
    ///
    /// https://www.xtm-cloud.com/rest-api/#tag/Projects/operation/getProject
    pub async fn get_project(&self, project_id: u64) -> Result<Value> {
        let url = format!("{}/projects/{}", self.base_url, project_id);
        self.call(url, ReqMethod::Get, None, &QueryParams::new())
            .await?
            .into_json()
    }

    /// List LQA reports matching the filter.
    ///
    /// https://www.xtm-cloud.com/rest-api/#tag/Project-LQA/operation/getLqa
    pub async fn get_project_lqa(&self, filter: &LqaFilter) -> Result<Value> {
        let url = format!("{}/projects/lqa", self.base_url);
        let params = QueryParams::new()
            .list("projectIds", Some(&filter.project_ids))
            .list("targetLanguages", filter.target_languages.as_deref())
            .list("evalueeIds", filter.evaluee_ids.as_deref())
            .list("workflowStepIds", filter.workflow_step_ids.as_deref())
            .list("evaluatorIds", filter.evaluator_ids.as_deref())
            .scalar("type", filter.lqa_type.map(|t| t.as_str()));

        self.call(url, ReqMethod::Get, None, &params)
            .await?
            .into_json()
    }

    /// Download LQA reports matching the filter.
    ///
    /// The response is JSON while the report is still being generated and a
    /// binary spreadsheet once it is ready, so the classified
    /// [`ApiResponse`] is handed to the caller as-is.
    ///
    /// https://www.xtm-cloud.com/rest-api/#tag/Project-LQA/operation/downloadLqa
    pub async fn download_project_lqa(&self, filter: &LqaDownloadFilter) -> Result<ApiResponse> {
        let url = format!("{}/projects/lqa/download", self.base_url);
        let params = QueryParams::new()
            .scalar("reportID", filter.report_id)
            .list("projectIds", Some(&filter.project_ids))
            .list("targetLanguages", filter.target_languages.as_deref())
            .list("evalueeIds", filter.evaluee_ids.as_deref())
            .list("evaluatorIds", filter.evaluator_ids.as_deref())
            .list("workflowStepIds", filter.workflow_step_ids.as_deref())
            .scalar(
                "completeDateFrom",
                filter.complete_date_from.as_ref().map(datetime_param),
            )
            .scalar(
                "completeDateTo",
                filter.complete_date_to.as_ref().map(datetime_param),
            )
            .scalar("type", filter.lqa_type.map(|t| t.as_str()));

        self.call(url, ReqMethod::Get, None, &params).await
    }

    /// List users matching the filter
    pub async fn get_users(&self, filter: &UserFilter) -> Result<Value> {
        let url = format!("{}/users", self.base_url);
        let params = QueryParams::new()
            .list("usernames", filter.usernames.as_deref())
            .list("ids", filter.ids.as_deref())
            .scalar("fetchAddress", filter.fetch_address);

        self.call(url, ReqMethod::Get, None, &params)
            .await?
            .into_json()
    }

    /// Request generation of project files in the given output format.
    ///
    /// https://www.xtm-cloud.com/rest-api/#tag/Project-files/operation/generateFiles
    pub async fn generate_files(
        &self,
        project_id: u64,
        file_type: FileType,
        job_ids: Option<&[u64]>,
        target_language: Option<&str>,
    ) -> Result<Value> {
        let url = format!("{}/projects/{}/files/generate", self.base_url, project_id);
        let params = QueryParams::new()
            .scalar("fileType", Some(file_type.as_str()))
            .list("jobIds", job_ids)
            .scalar("targetLanguage", target_language);

        self.call(url, ReqMethod::Post, None, &params)
            .await?
            .into_json()
    }

    /// Fetch the generation status of one file.
    ///
    /// https://www.xtm-cloud.com/rest-api/#tag/Project-files/operation/fileStatus
    pub async fn get_file_status(
        &self,
        file_id: u64,
        project_id: u64,
        file_scope: FileScope,
    ) -> Result<Value> {
        let url = format!(
            "{}/projects/{}/files/{}/status",
            self.base_url, project_id, file_id
        );
        let params = QueryParams::new().scalar("fileScope", Some(file_scope.as_str()));

        self.call(url, ReqMethod::Get, None, &params)
            .await?
            .into_json()
    }

    /// Download one generated file (xlsx, xliff, ...)
    pub async fn download_file(
        &self,
        project_id: u64,
        file_id: u64,
        file_scope: FileScope,
    ) -> Result<Vec<u8>> {
        let url = format!(
            "{}/projects/{}/files/{}/download",
            self.base_url, project_id, file_id
        );
        let params = QueryParams::new().scalar("fileScope", Some(file_scope.as_str()));

        self.call(url, ReqMethod::Get, None, &params)
            .await?
            .into_bytes()
    }

    /// Download the files matching the filter as one ZIP archive.
    ///
    /// https://www.xtm-cloud.com/rest-api/#tag/Project-files/operation/downloadFiles
    pub async fn download_files(
        &self,
        project_id: u64,
        file_type: FileType,
        file_scope: FileScope,
        filter: &FileDownloadFilter,
    ) -> Result<Vec<u8>> {
        let url = format!("{}/projects/{}/files/download", self.base_url, project_id);
        let params = QueryParams::new()
            .list(
                "fetchTargetFileTypes",
                filter.fetch_target_file_types.as_deref(),
            )
            .list("fileIds", filter.file_ids.as_deref())
            .scalar("fileNameFilter", filter.file_name_filter.as_deref())
            .scalar(
                "fileNameFilterType",
                filter.file_name_filter_type.map(|t| t.as_str()),
            )
            .scalar("fileScope", Some(file_scope.as_str()))
            .scalar("fileType", Some(file_type.as_str()))
            .list("jobIds", filter.job_ids.as_deref())
            .list("targetLanguages", filter.target_languages.as_deref());

        self.call(url, ReqMethod::Get, None, &params)
            .await?
            .into_bytes()
    }

    /// Poll a file-generation job until it reports `FINISHED`.
    ///
    /// Issues up to `max_attempts` status calls back to back; the first
    /// response whose `status` field is `FINISHED` is returned and no
    /// further attempt is made. Exhausting the budget is an
    /// [`XtmError::ApiError`] naming the attempt count. Attempts are not
    /// spaced out; the caller owns any pacing between calls.
    pub async fn wait_for_file_completion(
        &self,
        file_id: u64,
        project_id: u64,
        file_scope: FileScope,
        max_attempts: u32,
    ) -> Result<Value> {
        for attempt in 1..=max_attempts {
            let response = self
                .get_file_status(file_id, project_id, file_scope)
                .await?;

            if response.get("status").and_then(Value::as_str) == Some(STATUS_FINISHED) {
                debug!("File {} finished on attempt {}", file_id, attempt);
                return Ok(response);
            }
        }

        Err(XtmError::api_reason(format!(
            "File status did not reach '{}' after {} attempts.",
            STATUS_FINISHED, max_attempts
        )))
    }

    /// Fetch metrics for every target language of a project.
    ///
    /// https://www.xtm-cloud.com/rest-api/#tag/Project-metrics
    pub async fn get_project_metrics(&self, project_id: u64) -> Result<Value> {
        let url = format!("{}/projects/{}/metrics", self.base_url, project_id);
        self.call(url, ReqMethod::Get, None, &QueryParams::new())
            .await?
            .into_json()
    }

    /// Download the metrics report of a project as a binary spreadsheet
    pub async fn download_metrics_report(&self, project_id: u64) -> Result<Vec<u8>> {
        let url = format!("{}/projects/{}/metrics/download", self.base_url, project_id);
        self.call(url, ReqMethod::Get, None, &QueryParams::new())
            .await?
            .into_bytes()
    }

    /// Fetch the custom-field definitions configured account-wide
    pub async fn get_custom_fields(&self) -> Result<Value> {
        let url = format!("{}/projects/custom-fields", self.base_url);
        self.call(url, ReqMethod::Get, None, &QueryParams::new())
            .await?
            .into_json()
    }

    /// Fetch the custom-field values of one project
    pub async fn get_project_custom_fields(&self, project_id: u64) -> Result<Value> {
        let url = format!("{}/projects/{}/custom-fields", self.base_url, project_id);
        self.call(url, ReqMethod::Get, None, &QueryParams::new())
            .await?
            .into_json()
    }

    /// Trigger cost generation for a project.
    ///
    /// Costs are always generated with automatic assignment; the API offers
    /// no other policy through this client.
    pub async fn generate_costs(&self, project_id: u64) -> Result<Value> {
        let url = format!("{}/projects/{}/costs/generate", self.base_url, project_id);
        let params =
            QueryParams::new().scalar("costAssignmentType", Some(COST_ASSIGNMENT_TYPE));

        self.call(url, ReqMethod::Post, None, &params)
            .await?
            .into_json()
    }
}
