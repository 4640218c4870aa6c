//! XTM Cloud REST API client
//!
//! This library provides an async client for the XTM Cloud
//! translation-management REST API: projects, LQA reports, generated-file
//! workflows, users, metrics, custom fields and costs. A session
//! authenticates once at construction and carries its bearer token on every
//! subsequent call.
//!
//! ```no_run
//! use xtm_client::{FileScope, FileType, XtmClient, XtmConfig};
//!
//! #[tokio::main]
//! async fn main() -> xtm_client::Result<()> {
//!     let client = XtmClient::connect(XtmConfig::new("my-client", 1234, "secret")).await?;
//!
//!     let project = client.get_project(42).await?;
//!     println!("project: {}", project["name"]);
//!
//!     let generated = client
//!         .generate_files(42, FileType::Xliff, None, Some("de_DE"))
//!         .await?;
//!     let file_id = generated["fileIds"][0].as_u64().unwrap();
//!
//!     client
//!         .wait_for_file_completion(file_id, 42, FileScope::Job, 10)
//!         .await?;
//!     let xliff = client.download_file(42, file_id, FileScope::Job).await?;
//!     println!("downloaded {} bytes", xliff.len());
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::{XtmClient, DEFAULT_MAX_POLL_ATTEMPTS},
    config::{XtmConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS},
    errors::{ErrorPayload, Result, XtmError},
    models::{
        ApiResponse, FetchTargetFileType, FileDownloadFilter, FileNameFilterType, FileScope,
        FileType, LqaDownloadFilter, LqaFilter, LqaType, UserFilter,
    },
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
