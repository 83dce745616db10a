use std::io::{self, Write};
use std::sync::Arc;

use axum::{extract::Request, http::Method};
use chrono::{DateTime, SecondsFormat, Utc};

use super::{Flow, Interceptor};

type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// Writes `[<timestamp>] <METHOD> <path?query>` for every request, then continues.
#[derive(Clone)]
pub struct RequestLogger {
    sink: Sink,
}

impl RequestLogger {
    /// Log lines go to stdout, one per request.
    pub fn stdout() -> Self {
        Self::with_sink(|line| {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{line}");
        })
    }

    pub fn with_sink<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self { sink: Arc::new(sink) }
    }
}

impl Interceptor for RequestLogger {
    fn name(&self) -> &'static str {
        "request_log"
    }

    fn intercept(&self, req: &Request) -> Flow {
        let uri = req.uri();
        let target = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
        let line = format_request_line(Utc::now(), req.method(), target);
        (self.sink)(&line);
        Flow::Continue
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_request_line(at: DateTime<Utc>, method: &Method, target: &str) -> String {
    format!("[{}] {} {}", at.to_rfc3339_opts(SecondsFormat::Millis, true), method, target)
}
