//! Progress reporting.

/// Receives pipeline progress at fixed checkpoints (10, 30, 50, 70, 90, 100).
///
/// Any `Fn(u8, &str)` closure is a sink:
///
/// ```
/// use page_profiler::ProgressSink;
///
/// let sink = |percent: u8, message: &str| println!("{percent:>3}% {message}");
/// sink.on_progress(10, "Connecting");
/// ```
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, percent: u8, message: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(u8, &str) + Send + Sync,
{
    fn on_progress(&self, percent: u8, message: &str) {
        self(percent, message)
    }
}

/// Ignores all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_progress(&self, _percent: u8, _message: &str) {}
}

/// Forwards progress to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_progress(&self, percent: u8, message: &str) {
        log::info!("[{:>3}%] {}", percent, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink_receives_calls() {
        let seen = Mutex::new(Vec::new());
        let sink = |percent: u8, message: &str| {
            seen.lock().unwrap().push((percent, message.to_string()));
        };
        sink.on_progress(10, "a");
        sink.on_progress(100, "b");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(10, "a".to_string()), (100, "b".to_string())]
        );
    }

    #[test]
    fn test_noop_sink() {
        NoopProgress.on_progress(50, "ignored");
    }
}
