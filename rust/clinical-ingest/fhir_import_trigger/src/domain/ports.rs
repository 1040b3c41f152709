//! The ports the import dispatcher depends on and exposes

use thiserror::Error;

use crate::domain::models::{
    ChangeNotification, DispatchResult, ImportJobHandle, StartImportJobRequest,
};

/// The bulk import service refused or could not process a request
#[derive(Debug, Error)]
#[error(transparent)]
pub struct BulkImportErr(#[from] anyhow::Error);

/// Something that can start a bulk import job
#[cfg_attr(test, mockall::automock)]
pub trait BulkImportStarter: Send + Sync + 'static {
    /// start the import described by the request, returning as soon as the job is accepted
    fn start_import_job(
        &self,
        request: StartImportJobRequest,
    ) -> impl Future<Output = Result<ImportJobHandle, BulkImportErr>> + Send;
}

/// Turns a batch of notifications into started import jobs
pub trait ImportDispatcher: Send + Sync + 'static {
    /// processes the batch in order. A failure to start one job never fails the batch
    fn dispatch(
        &self,
        batch: Vec<ChangeNotification>,
    ) -> impl Future<Output = DispatchResult> + Send;
}
