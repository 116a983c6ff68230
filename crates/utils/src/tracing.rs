// Copyright 2023-2025 Hashkit Team

use crate::env::boolean_env_flag_set;

/// Environment flag that turns on span close events in the fmt layer.
pub const TRACE_SPANS_FLAG: &str = "HASHKIT_TRACE_SPANS";

/// Installs a global `tracing` subscriber filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing() {
	use tracing_subscriber::{
		fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
	};

	let span_events = if boolean_env_flag_set(TRACE_SPANS_FLAG) {
		FmtSpan::CLOSE
	} else {
		FmtSpan::NONE
	};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_span_events(span_events))
		.try_init();
}
