mod start_import;

pub use start_import::ImportOutputLocation;

#[derive(Clone, Debug)]
pub struct HealthLake {
    /// Inner HealthLake client
    inner: aws_sdk_healthlake::Client,
}

impl HealthLake {
    pub fn new(inner: aws_sdk_healthlake::Client) -> Self {
        Self { inner }
    }

    /// Starts a FHIR bulk import of everything under `input_s3_uri` into the datastore.
    /// Returns the id of the started job; it does not wait for the job to finish.
    #[tracing::instrument(skip(self))]
    pub async fn start_fhir_import_job(
        &self,
        job_name: &str,
        input_s3_uri: &str,
        datastore_id: &str,
        data_access_role_arn: &str,
        output: Option<&ImportOutputLocation>,
    ) -> anyhow::Result<String> {
        start_import::start_fhir_import_job(
            &self.inner,
            job_name,
            input_s3_uri,
            datastore_id,
            data_access_role_arn,
            output,
        )
        .await
    }
}
