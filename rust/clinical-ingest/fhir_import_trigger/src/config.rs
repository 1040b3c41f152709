use thiserror::Error;

use crate::domain::models::{ImportTarget, OutputLocation};

const HL_STORE_ID: &str = "HL_STORE_ID";
const HL_ROLE_ARN: &str = "HL_ROLE_ARN";
const HL_OUTPUT_S3_URI: &str = "HL_OUTPUT_S3_URI";
const HL_OUTPUT_KMS_KEY_ID: &str = "HL_OUTPUT_KMS_KEY_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigErr {
    #[error("{0} must be provided")]
    Missing(&'static str),
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("{provided} was provided without {missing}")]
    IncompleteOutput {
        provided: &'static str,
        missing: &'static str,
    },
}

/// The configuration parameters for the lambda, read once at cold start.
#[derive(Debug, Clone)]
pub struct Config {
    /// The HealthLake datastore every import is sent to
    pub datastore_id: String,

    /// The role HealthLake assumes to read the import source
    pub data_access_role_arn: String,

    /// Where HealthLake writes job output. Set through `HL_OUTPUT_S3_URI` and `HL_OUTPUT_KMS_KEY_ID`
    pub output: Option<OutputLocation>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| match lookup(name) {
            None => Err(ConfigErr::Missing(name)),
            Some(value) if value.trim().is_empty() => Err(ConfigErr::Blank(name)),
            Some(value) => Ok(value),
        };
        let optional = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());

        let datastore_id = required(HL_STORE_ID)?;
        let data_access_role_arn = required(HL_ROLE_ARN)?;

        let output = match (optional(HL_OUTPUT_S3_URI), optional(HL_OUTPUT_KMS_KEY_ID)) {
            (Some(s3_uri), Some(kms_key_id)) => Some(OutputLocation { s3_uri, kms_key_id }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigErr::IncompleteOutput {
                    provided: HL_OUTPUT_S3_URI,
                    missing: HL_OUTPUT_KMS_KEY_ID,
                });
            }
            (None, Some(_)) => {
                return Err(ConfigErr::IncompleteOutput {
                    provided: HL_OUTPUT_KMS_KEY_ID,
                    missing: HL_OUTPUT_S3_URI,
                });
            }
        };

        Ok(Config {
            datastore_id,
            data_access_role_arn,
            output,
        })
    }

    pub fn import_target(&self) -> ImportTarget {
        ImportTarget {
            datastore_id: self.datastore_id.clone(),
            data_access_role_arn: self.data_access_role_arn.clone(),
            output: self.output.clone(),
        }
    }
}
