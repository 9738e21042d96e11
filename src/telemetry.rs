//! Log setup and the Prometheus registry behind `/metrics`.

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,sqlx=warn";

lazy_static! {
    static ref QUIZ_QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions handed out by the quiz",
        &["category"]
    )
    .expect("quiz counter registered once");
}

/// Counts one quiz question, labelled by category id or `all`.
pub fn record_quiz_question(category: Option<i64>) {
    let label = category.map_or_else(|| "all".to_owned(), |id| id.to_string());
    QUIZ_QUESTIONS_SERVED
        .with_label_values(&[label.as_str()])
        .inc();
}

/// Text exposition of every registered metric, with its content type.
pub fn render_metrics() -> prometheus::Result<(String, Vec<u8>)> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buf)?;
    Ok((encoder.format_type().to_owned(), buf))
}

fn span_events_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// `LOG_LEVEL` takes an `EnvFilter` directive; `INCLUDE_SPAN_EVENTS=true`
/// also logs span enter and exit. Safe to call more than once.
pub fn init_tracing() {
    let mut fmt_layer = fmt::layer();
    if span_events_enabled(std::env::var("INCLUDE_SPAN_EVENTS").ok().as_deref()) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
