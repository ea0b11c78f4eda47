use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::terminal::logging::RekonFormatter;
use crate::terminal::print::PRINT_TARGET;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the level picked from `-v`/`-q`. Terminal output on
/// the print target is never filtered out.
pub fn init_logging(verbose: u8, quiet: u8) {
    let level: &str = match (quiet, verbose) {
        (q, _) if q > 0 => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };
    let directives: String = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    let filter: EnvFilter = EnvFilter::new(format!(
        "{directives},hyper_util=warn,rustls=warn,{PRINT_TARGET}=info"
    ));

    let indicatif_layer = IndicatifLayer::new();
    let fmt_layer = fmt::layer()
        .event_format(RekonFormatter)
        .with_writer(indicatif_layer.get_stderr_writer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .init();
}

/// Turns a `pb_show` span into a bar counting `total` finished items.
pub fn start_progress(span: &Span, total: usize, msg: &str) {
    let style: ProgressStyle = ProgressStyle::with_template(
        "{spinner:.blue} {msg} {bar:24.cyan/bright_black} {pos}/{len} {elapsed:.dim}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .tick_strings(TICKS)
    .progress_chars("█▓░");

    span.pb_set_style(&style);
    span.pb_set_length(total as u64);
    span.pb_set_message(msg);
    span.pb_start();
}

pub fn advance(span: &Span) {
    span.pb_inc(1);
}
