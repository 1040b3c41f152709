//! The lambda entry for S3 object created notifications

use lambda_runtime::{Error, LambdaEvent, tracing};
use serde::Deserialize;

use crate::domain::{
    models::{ChangeNotification, DispatchResult},
    ports::ImportDispatcher,
};

// see: https://docs.aws.amazon.com/AmazonS3/latest/userguide/notification-content-structure.html
// Only the fields we read are modeled. A record missing one of them fails the invocation.
#[derive(Debug, Deserialize)]
pub struct S3NotificationEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3NotificationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct S3NotificationRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: Bucket,
    pub object: Object,
}

#[derive(Debug, Deserialize)]
pub struct Bucket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Object {
    /// url encoded, spaces arrive as `+`
    pub key: String,
}

impl S3NotificationRecord {
    /// Returns `None` when the key does not decode to utf-8
    fn into_notification(self) -> Option<ChangeNotification> {
        let S3Entity { bucket, object } = self.s3;

        let object_key = match decode_object_key(&object.key) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(error=?e, key=%object.key, "unable to decode key");
                return None;
            }
        };

        Some(ChangeNotification {
            bucket_name: bucket.name,
            object_key,
        })
    }
}

fn decode_object_key(raw: &str) -> Result<String, std::string::FromUtf8Error> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map(|decoded| decoded.into_owned())
}

/// Processes the s3 event
#[tracing::instrument(skip_all)]
pub async fn handler<D>(
    dispatcher: &D,
    event: LambdaEvent<S3NotificationEvent>,
) -> Result<DispatchResult, Error>
where
    D: ImportDispatcher,
{
    let batch: Vec<ChangeNotification> = event
        .payload
        .records
        .into_iter()
        .filter_map(S3NotificationRecord::into_notification)
        .collect();

    let result = dispatcher.dispatch(batch).await;

    tracing::info!(started_jobs=?result.started_jobs, "processing complete");

    Ok(result)
}

#[cfg(test)]
mod tests {
    use lambda_runtime::Context;
    use serde_json::json;

    use crate::domain::{
        models::{ImportJobHandle, ImportTarget},
        ports::MockBulkImportStarter,
        services::ImportDispatcherImpl,
    };

    use super::*;

    fn s3_event(bucket: &str, key: &str) -> serde_json::Value {
        json!({
            "Records": [
                {
                    "eventVersion": "2.1",
                    "eventSource": "aws:s3",
                    "awsRegion": "us-east-1",
                    "eventName": "ObjectCreated:Put",
                    "s3": {
                        "s3SchemaVersion": "1.0",
                        "bucket": {
                            "name": bucket,
                            "arn": format!("arn:aws:s3:::{bucket}")
                        },
                        "object": {
                            "key": key,
                            "size": 1024,
                            "eTag": "0123456789abcdef0123456789abcdef"
                        }
                    }
                }
            ]
        })
    }

    fn dispatcher(starter: MockBulkImportStarter) -> ImportDispatcherImpl<MockBulkImportStarter> {
        ImportDispatcherImpl::new(
            starter,
            ImportTarget {
                datastore_id: "hl-demo-store".to_string(),
                data_access_role_arn: "arn:aws:iam::123456789012:role/HealthLakeAccessRole"
                    .to_string(),
                output: None,
            },
        )
        .with_watched_prefix("incoming/fhir/")
    }

    async fn invoke(
        dispatcher: &ImportDispatcherImpl<MockBulkImportStarter>,
        payload: serde_json::Value,
    ) -> serde_json::Value {
        let event: S3NotificationEvent = serde_json::from_value(payload).unwrap();
        let result = handler(dispatcher, LambdaEvent::new(event, Context::default()))
            .await
            .unwrap();
        serde_json::to_value(result).unwrap()
    }

    #[tokio::test]
    async fn starts_job_for_new_fhir_file() {
        let mut starter = MockBulkImportStarter::new();
        starter
            .expect_start_import_job()
            .withf(|req| {
                req.input_s3_uri == "s3://clinic-input-bucket/incoming/fhir/2025-04-29/"
                    && req.datastore_id == "hl-demo-store"
                    && req.data_access_role_arn
                        == "arn:aws:iam::123456789012:role/HealthLakeAccessRole"
            })
            .times(1)
            .returning(|_| {
                Box::pin(async move {
                    Ok(ImportJobHandle {
                        job_id: "test-job-123".to_string(),
                    })
                })
            });

        let out = invoke(
            &dispatcher(starter),
            s3_event(
                "clinic-input-bucket",
                "incoming/fhir/2025-04-29/patient_0.ndjson",
            ),
        )
        .await;

        assert_eq!(out, json!({ "startedJobs": ["test-job-123"] }));
    }

    #[tokio::test]
    async fn ignores_files_outside_the_prefix() {
        let mut starter = MockBulkImportStarter::new();
        starter.expect_start_import_job().never();

        let out = invoke(
            &dispatcher(starter),
            s3_event("clinic-input-bucket", "other/2025-04-29/patient_0.ndjson"),
        )
        .await;

        assert_eq!(out, json!({ "startedJobs": [] }));
    }

    #[tokio::test]
    async fn missing_records_is_an_empty_batch() {
        let mut starter = MockBulkImportStarter::new();
        starter.expect_start_import_job().never();

        let out = invoke(&dispatcher(starter), json!({})).await;

        assert_eq!(out, json!({ "startedJobs": [] }));
    }

    #[tokio::test]
    async fn decodes_url_encoded_keys() {
        let mut starter = MockBulkImportStarter::new();
        starter
            .expect_start_import_job()
            .withf(|req| {
                req.input_s3_uri == "s3://clinic-input-bucket/incoming/fhir/site a/2025 04/"
                    && req.job_name == "auto-2025 04"
            })
            .times(1)
            .returning(|_| {
                Box::pin(async move {
                    Ok(ImportJobHandle {
                        job_id: "job-encoded".to_string(),
                    })
                })
            });

        let out = invoke(
            &dispatcher(starter),
            s3_event(
                "clinic-input-bucket",
                "incoming/fhir/site+a/2025%2004/patient_0.ndjson",
            ),
        )
        .await;

        assert_eq!(out, json!({ "startedJobs": ["job-encoded"] }));
    }

    #[test]
    fn record_without_key_is_rejected() {
        let payload = json!({
            "Records": [
                { "s3": { "bucket": { "name": "clinic-input-bucket" }, "object": {} } }
            ]
        });

        let err = serde_json::from_value::<S3NotificationEvent>(payload).unwrap_err();

        assert!(err.to_string().contains("missing field `key`"));
    }

    #[test]
    fn record_without_bucket_is_rejected() {
        let payload = json!({
            "Records": [
                { "s3": { "object": { "key": "incoming/fhir/a/1.ndjson" } } }
            ]
        });

        assert!(serde_json::from_value::<S3NotificationEvent>(payload).is_err());
    }

    #[test]
    fn undecodable_key_is_skipped() {
        let record = S3NotificationRecord {
            s3: S3Entity {
                bucket: Bucket {
                    name: "clinic-input-bucket".to_string(),
                },
                object: Object {
                    key: "incoming/fhir/%FF/1.ndjson".to_string(),
                },
            },
        };

        assert_eq!(record.into_notification(), None);
    }
}
