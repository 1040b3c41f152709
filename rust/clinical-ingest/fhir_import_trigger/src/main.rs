#![recursion_limit = "256"]

use std::sync::Arc;

use anyhow::Context;
use aws_config::{BehaviorVersion, Region, meta::region::RegionProviderChain};
use fhir_import_trigger::{
    config::Config,
    domain::services::ImportDispatcherImpl,
    inbound::lambda::{S3NotificationEvent, handler},
};
use healthlake_client::HealthLake;
use ingest_entrypoint::IngestEntrypoint;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};

#[tokio::main]
async fn main() -> Result<(), Error> {
    IngestEntrypoint::default().init();
    tracing::info!("initiating lambda");

    let config = Config::from_env().context("import target configuration must be provided")?;

    tracing::trace!("initialized config");

    let region_provider = RegionProviderChain::default_provider().or_else(Region::new("us-east-1"));
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;
    let healthlake = HealthLake::new(aws_sdk_healthlake::Client::new(&aws_config));

    tracing::trace!("initialized healthlake client");

    let dispatcher = Arc::new(ImportDispatcherImpl::new(healthlake, config.import_target()));

    tracing::info!(watched_prefix = dispatcher.watched_prefix(), "ready");

    let func = service_fn(move |event: LambdaEvent<S3NotificationEvent>| {
        let dispatcher = dispatcher.clone();
        async move { handler(dispatcher.as_ref(), event).await }
    });

    run(func).await
}
