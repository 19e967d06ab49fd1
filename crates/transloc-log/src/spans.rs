//! Span helpers for fallback reads.

use std::fmt::Display;
use tracing::{debug_span, info_span, Span};

/// Span covering one translated read of `locale`.
pub fn read_span(locale: impl Display) -> Span {
    info_span!("read", locale = %locale, resolved = tracing::field::Empty)
}

/// Span covering chain resolution for `requested`.
pub fn chain_span(requested: impl Display, len: usize) -> Span {
    debug_span!("chain", requested = %requested, len)
}

/// Record the locale a read resolved to on the current span.
pub fn record_resolved(locale: impl Display) {
    Span::current().record("resolved", tracing::field::display(locale));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and log its duration.
    pub fn finish(self) -> std::time::Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_us = %duration.as_micros(),
            "operation completed"
        );
        duration
    }
}

/// Time a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    fn with_subscriber<F>(f: F)
    where
        F: FnOnce(),
    {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_read_span_records_resolved_locale() {
        with_subscriber(|| {
            let span = read_span("en-US");
            let _guard = span.enter();
            assert_eq!(span.metadata().map(|m| m.name()), Some("read"));

            chain_span("en-US", 3).in_scope(|| tracing::debug!("expanding"));

            record_resolved("de-DE");
            tracing::info!("resolved");
        });
    }

    #[test]
    fn test_chain_span_is_debug_level() {
        with_subscriber(|| {
            let span = chain_span("pt-BR", 2);
            assert_eq!(span.metadata().map(|m| *m.level()), Some(tracing::Level::DEBUG));
        });
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.finish() >= std::time::Duration::from_millis(5));
    }

    #[test]
    fn test_timed_macro() {
        with_subscriber(|| {
            let result = crate::timed!("macro_test", 40 + 2);
            assert_eq!(result, 42);
        });
    }
}
