use std::time::Duration;

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::{TonicExporterBuilder, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::Config;
use opentelemetry_sdk::{runtime, Resource};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Sets up the global subscriber. Without an OTLP endpoint only the console is logged to.
pub(crate) fn init_telemetry(endpoint: &Option<String>, console: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("INFO"));
    let registry = Registry::default().with(filter);

    let Some(endpoint) = endpoint else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        return Ok(());
    };

    let service_resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
        KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
    ]);

    let tracer_provider = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(build_tonic_exporter(endpoint))
        .with_trace_config(Config::default().with_resource(service_resource.clone()))
        .install_batch(runtime::Tokio)
        .context("Failed to install tracer")?;
    let tracer = tracer_provider.tracer(env!("CARGO_PKG_NAME"));
    global::set_tracer_provider(tracer_provider);

    let meter = opentelemetry_otlp::new_pipeline()
        .metrics(runtime::Tokio)
        .with_exporter(build_tonic_exporter(endpoint))
        .with_resource(service_resource)
        .build()
        .context("Failed to install meter")?;

    global::set_text_map_propagator(TraceContextPropagator::new());
    let registry = registry
        .with(OpenTelemetryLayer::new(tracer))
        .with(MetricsLayer::new(meter));

    if console {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry.init();
    }
    Ok(())
}

fn build_tonic_exporter(endpoint: &str) -> TonicExporterBuilder {
    opentelemetry_otlp::new_exporter()
        .tonic()
        .with_timeout(Duration::from_secs(15))
        .with_endpoint(endpoint)
}

pub(crate) fn shutdown_telemetry() {
    global::shutdown_tracer_provider();
}
