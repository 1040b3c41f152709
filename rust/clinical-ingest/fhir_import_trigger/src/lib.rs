//! Starts a HealthLake FHIR bulk import whenever a file lands under the watched S3 prefix

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
