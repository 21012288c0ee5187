use opentelemetry::global;
use opentelemetry::sdk::propagation::BaggagePropagator;
use opentelemetry::sdk::propagation::TextMapCompositePropagator;
use opentelemetry::sdk::propagation::TraceContextPropagator;
use opentelemetry::sdk::trace;
use opentelemetry::sdk::Resource;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

/// Used when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVES: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global subscriber: JSON logs to stdout and, unless
/// `SKIP_OTLP_EXPORTER` is set, spans exported over OTLP.
pub fn config_telemetry(service_name: &'static str) {
    // Needed to forward ordinary log statements to our tracing subscriber.
    tracing_log::LogTracer::init().expect("Failed to initialize log tracer");

    let subscriber = Registry::default().with(env_filter()).with(
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_thread_names(true),
    );

    let skip_otlp = std::env::var("SKIP_OTLP_EXPORTER").is_ok();
    let otel_layer = (!skip_otlp).then(|| {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_env())
            .with_trace_config(trace::config().with_resource(Resource::new(vec![
                KeyValue::new("service.name", service_name),
            ])))
            .install_batch(opentelemetry::runtime::Tokio)
            .expect("Failed to initialize otlp tracer.");
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing::subscriber::set_global_default(subscriber.with(otel_layer))
        .expect("Failed to install `tracing` subscriber");

    if skip_otlp {
        tracing::info!(service_name, "Skipping OTLP exporter");
    }

    let composite_propagator = TextMapCompositePropagator::new(vec![
        Box::new(BaggagePropagator::new()),
        Box::new(TraceContextPropagator::new()),
    ]);
    global::set_text_map_propagator(composite_propagator);
}

pub fn shutdown_global_tracer_provider() {
    global::shutdown_tracer_provider();
}
