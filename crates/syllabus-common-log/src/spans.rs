//! Span helpers for tree operations.

use std::future::Future;
use std::time::Duration;
use tracing::{info_span, Instrument, Span};

/// Span for a renumber pass over one directory.
pub fn pass_span(scope: &str, path: &str) -> Span {
    info_span!("renumber", scope = %scope, path = %path)
}

/// Span for scaffolding one topic.
pub fn topic_span(module: &str, topic: &str) -> Span {
    info_span!("topic", module = %module, topic = %topic)
}

/// Span for a whole adherence pass.
pub fn adherence_span(root: &str) -> Span {
    info_span!("adherence", root = %root, error = tracing::field::Empty)
}

/// Instrument a future with a span.
pub fn instrument_future<F: Future>(future: F, span: Span) -> impl Future<Output = F::Output> {
    future.instrument(span)
}

/// Record an error on the current span.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", tracing::field::display(error));
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

    /// Complete the timer and record duration.
    pub fn finish(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    fn with_subscriber<F>(f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_nested_pass_spans() {
        with_subscriber(|| {
            let adherence = adherence_span("/tmp/course");
            let _outer = adherence.enter();

            let pass = pass_span("module", "/tmp/course/modules");
            let _inner = pass.enter();

            tracing::info!(renamed = 2, "nested operation");
        });
    }

    #[test]
    fn test_error_recorded_on_adherence_span() {
        with_subscriber(|| {
            let span = adherence_span("/tmp/course");
            let _guard = span.enter();

            let error = std::io::Error::new(std::io::ErrorKind::NotFound, "modules missing");
            record_error(&error);
        });
    }

    #[tokio::test]
    async fn test_topic_span_propagates_across_await() {
        let span = topic_span("Arrays", "Traversal");

        let future = async {
            tracing::info!("writing files");
            let inner = async {
                tracing::info!("writing quiz");
            };
            instrument_future(inner, pass_span("topic", "/tmp/modules/001-Arrays")).await;
        };

        instrument_future(future, span).await;
    }

    #[test]
    fn test_timer_reports_elapsed() {
        let timer = Timer::start("sleep");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.finish() >= Duration::from_millis(5));
    }
}
