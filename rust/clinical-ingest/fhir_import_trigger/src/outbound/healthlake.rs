//! [BulkImportStarter] backed by AWS HealthLake

use healthlake_client::{HealthLake, ImportOutputLocation};

use crate::domain::{
    models::{ImportJobHandle, StartImportJobRequest},
    ports::{BulkImportErr, BulkImportStarter},
};

impl BulkImportStarter for HealthLake {
    async fn start_import_job(
        &self,
        request: StartImportJobRequest,
    ) -> Result<ImportJobHandle, BulkImportErr> {
        let output = request.output.map(|output| ImportOutputLocation {
            s3_uri: output.s3_uri,
            kms_key_id: output.kms_key_id,
        });

        let job_id = self
            .start_fhir_import_job(
                &request.job_name,
                &request.input_s3_uri,
                &request.datastore_id,
                &request.data_access_role_arn,
                output.as_ref(),
            )
            .await?;

        Ok(ImportJobHandle { job_id })
    }
}
