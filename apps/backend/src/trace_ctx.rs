//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; `AppError::error_response` reads it so
//! the Problem Details body and the `x-trace-id` header always agree.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const UNKNOWN: &str = "unknown";

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_outside_scope() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn scoped_value_visible_and_restored() {
        let out = with_trace_id("outer".to_string(), async {
            assert_eq!(trace_id(), "outer");
            let inner = with_trace_id("inner".to_string(), async { trace_id() }).await;
            assert_eq!(trace_id(), "outer");
            inner
        })
        .await;

        assert_eq!(out, "inner");
        assert_eq!(trace_id(), "unknown");
    }
}
