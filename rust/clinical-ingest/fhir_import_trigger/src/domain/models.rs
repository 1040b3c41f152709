//! Values that flow through the import dispatcher

use serde::Serialize;

/// The prefix used when no `WATCHED_PREFIX` was set at build time
pub const DEFAULT_WATCHED_PREFIX: &str = "incoming/fhir/";

/// Only objects created under this prefix start an import
pub const WATCHED_PREFIX: &str = match option_env!("WATCHED_PREFIX") {
    Some(prefix) => prefix,
    None => DEFAULT_WATCHED_PREFIX,
};

/// Marks jobs that were started by this trigger rather than by an operator
const JOB_LABEL_MARKER: &str = "auto-";

/// HealthLake rejects job names longer than this
const MAX_JOB_NAME_LEN: usize = 64;

/// A single object created notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    pub bucket_name: String,
    /// The decoded object key
    pub object_key: String,
}

/// What to import and how the job should be named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub source_location_uri: String,
    pub job_label: String,
}

impl ImportRequest {
    /// Derives the import for the folder that contains the notified object.
    /// `incoming/fhir/2025-04-29/patient_0.ndjson` in `bucket` imports `s3://bucket/incoming/fhir/2025-04-29/`
    /// as `auto-2025-04-29`.
    pub fn from_notification(notification: &ChangeNotification) -> Self {
        let bucket = notification.bucket_name.as_str();
        let folder = import_folder(&notification.object_key);

        // a root level folder is named after its bucket
        let deepest = folder
            .split('/')
            .rfind(|segment| !segment.is_empty())
            .unwrap_or(bucket);

        let job_label = format!("{JOB_LABEL_MARKER}{deepest}")
            .chars()
            .take(MAX_JOB_NAME_LEN)
            .collect();

        ImportRequest {
            source_location_uri: format!("s3://{bucket}/{folder}"),
            job_label,
        }
    }
}

/// The key without its final segment, keeping the trailing separator.
/// Empty when the key has no separator.
fn import_folder(object_key: &str) -> &str {
    match object_key.rfind('/') {
        Some(idx) => &object_key[..=idx],
        None => "",
    }
}

/// Where HealthLake writes the manifest and error log of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub s3_uri: String,
    pub kms_key_id: String,
}

/// The datastore every import is sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    pub datastore_id: String,
    pub data_access_role_arn: String,
    pub output: Option<OutputLocation>,
}

/// Every parameter of a single start import job call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartImportJobRequest {
    pub job_name: String,
    pub input_s3_uri: String,
    pub datastore_id: String,
    pub data_access_role_arn: String,
    pub output: Option<OutputLocation>,
}

impl StartImportJobRequest {
    pub fn new(import: ImportRequest, target: &ImportTarget) -> Self {
        StartImportJobRequest {
            job_name: import.job_label,
            input_s3_uri: import.source_location_uri,
            datastore_id: target.datastore_id.clone(),
            data_access_role_arn: target.data_access_role_arn.clone(),
            output: target.output.clone(),
        }
    }
}

/// Identifies a job the bulk import service accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportJobHandle {
    pub job_id: String,
}

/// The response of a single invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    /// ids of the jobs that were started, in the order their notifications were received
    pub started_jobs: Vec<String>,
}
