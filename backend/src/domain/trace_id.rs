//! Request-scoped trace identifier.
//!
//! Every request is stamped with a `TraceId` so log lines and error payloads
//! produced while serving it can be correlated. The identifier lives in
//! task-local storage rather than being threaded through every signature.
//!
//! Task-locals do not cross `tokio::spawn` boundaries. Wrap spawned work in
//! [`TraceId::scope`] when the identifier must follow it.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

task_local! {
    /// Holds the trace identifier of the request being served.
    pub(crate) static TRACE_ID: TraceId;
}

/// Correlation identifier that follows a request through the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    /// Mints a fresh random identifier.
    #[must_use]
    #[rustfmt::skip]
    pub(crate) fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Wraps an existing UUID, typically one carried in from a caller.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The identifier of the request in scope, if any.
    ///
    /// Returns `None` outside a [`TraceId::scope`] region, for example on
    /// background tasks that were spawned without one.
    #[must_use]
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { TRACE_ID.try_with(|id| *id).ok() }

    /// Borrows the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Runs `fut` with `trace_id` installed as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id = TraceId::from_uuid(uuid::Uuid::nil());
    /// let seen = TraceId::scope(trace_id, async move { TraceId::current() }).await;
    /// assert_eq!(seen, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn generate_yields_distinct_identifiers() {
        assert_ne!(TraceId::generate(), TraceId::generate());
    }

    #[tokio::test]
    async fn current_reflects_the_enclosing_scope() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async move { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_without_a_scope() {
        assert!(TraceId::current().is_none());
    }

    #[test]
    fn parses_and_displays_the_same_text() {
        let text = Uuid::nil().to_string();
        let trace_id: TraceId = text.parse().expect("parse uuid");
        assert_eq!(trace_id.to_string(), text);
    }

    #[test]
    fn rejects_text_that_is_not_a_uuid() {
        assert!("not-a-uuid".parse::<TraceId>().is_err());
    }

    #[test]
    fn from_uuid_exposes_the_wrapped_value() {
        let uuid = Uuid::new_v4();
        assert_eq!(TraceId::from_uuid(uuid).as_uuid(), &uuid);
    }
}
