//! The concrete import dispatcher

use lambda_runtime::tracing;

use crate::domain::{
    models::{
        ChangeNotification, DispatchResult, ImportRequest, ImportTarget, StartImportJobRequest,
        WATCHED_PREFIX,
    },
    ports::{BulkImportStarter, ImportDispatcher},
};


/// concrete struct which implements [ImportDispatcher]
pub struct ImportDispatcherImpl<S> {
    starter: S,
    target: ImportTarget,
    watched_prefix: String,
}

impl<S> ImportDispatcherImpl<S>
where
    S: BulkImportStarter,
{
    /// create a dispatcher watching [WATCHED_PREFIX]
    pub fn new(starter: S, target: ImportTarget) -> Self {
        ImportDispatcherImpl {
            starter,
            target,
            watched_prefix: WATCHED_PREFIX.to_string(),
        }
    }

    /// replace the watched prefix
    pub fn with_watched_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.watched_prefix = prefix.into();
        self
    }

    pub fn watched_prefix(&self) -> &str {
        &self.watched_prefix
    }
}

impl<S> ImportDispatcher for ImportDispatcherImpl<S>
where
    S: BulkImportStarter,
{
    #[tracing::instrument(skip_all, fields(record_count = batch.len()))]
    async fn dispatch(&self, batch: Vec<ChangeNotification>) -> DispatchResult {
        tracing::info!("received {} record(s)", batch.len());

        let mut started_jobs = Vec::new();

        for notification in batch {
            if !notification.object_key.starts_with(&self.watched_prefix) {
                tracing::info!(key=%notification.object_key, "skipping object (prefix mismatch)");
                continue;
            }

            let import = ImportRequest::from_notification(&notification);
            let source_location_uri = import.source_location_uri.clone();

            tracing::info!(%source_location_uri, job_label=%import.job_label, "starting bulk import");

            match self
                .starter
                .start_import_job(StartImportJobRequest::new(import, &self.target))
                .await
            {
                Ok(handle) => {
                    tracing::info!(job_id=%handle.job_id, %source_location_uri, "started import job");
                    started_jobs.push(handle.job_id);
                }
                Err(err) => {
                    tracing::error!(error=?err, %source_location_uri, "import failed");
                }
            }
        }

        DispatchResult { started_jobs }
    }
}
