use anyhow::Context;
use aws_sdk_healthlake::types::{InputDataConfig, OutputDataConfig, S3Configuration};

/// Where HealthLake writes the manifest and error log of an import job
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOutputLocation {
    pub s3_uri: String,
    pub kms_key_id: String,
}

impl ImportOutputLocation {
    pub(crate) fn to_output_data_config(&self) -> anyhow::Result<OutputDataConfig> {
        let s3_configuration = S3Configuration::builder()
            .s3_uri(&self.s3_uri)
            .kms_key_id(&self.kms_key_id)
            .build()
            .context("unable to build s3 output configuration")?;

        Ok(OutputDataConfig::S3Configuration(s3_configuration))
    }
}

#[tracing::instrument(skip(client))]
pub(crate) async fn start_fhir_import_job(
    client: &aws_sdk_healthlake::Client,
    job_name: &str,
    input_s3_uri: &str,
    datastore_id: &str,
    data_access_role_arn: &str,
    output: Option<&ImportOutputLocation>,
) -> anyhow::Result<String> {
    let job_output_data_config = output
        .map(ImportOutputLocation::to_output_data_config)
        .transpose()?;

    let response = client
        .start_fhir_import_job()
        .job_name(job_name)
        .input_data_config(InputDataConfig::S3Uri(input_s3_uri.to_string()))
        .set_job_output_data_config(job_output_data_config)
        .datastore_id(datastore_id)
        .data_access_role_arn(data_access_role_arn)
        .send()
        .await
        .context("unable to start fhir import job")?;

    tracing::debug!(job_status=?response.job_status(), "fhir import job submitted");

    Ok(response.job_id().to_string())
}
