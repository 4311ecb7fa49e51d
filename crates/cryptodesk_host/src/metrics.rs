//! Feature-usage metrics reporting contracts and adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`MetricsSink`].
pub type MetricsFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One reported metric, as forwarded to the metrics backend.
pub enum MetricEvent {
    /// A user touched an enabled feature for the first time in this session.
    FeatureUsage {
        /// Feature flag name.
        flag: String,
        /// Reporting user.
        user_id: String,
    },
    /// A feature reported an error.
    FeatureError {
        /// Feature flag name.
        flag: String,
        /// Error message.
        message: String,
        /// Reporting user.
        user_id: String,
    },
}

/// Host service that forwards feature metrics to the backend.
pub trait MetricsSink {
    /// Records first use of `flag` by `user_id`.
    fn track_feature_usage<'a>(
        &'a self,
        flag: &'a str,
        user_id: &'a str,
    ) -> MetricsFuture<'a, Result<(), String>>;

    /// Records an error raised while `flag` was active for `user_id`.
    fn track_error<'a>(
        &'a self,
        flag: &'a str,
        message: &'a str,
        user_id: &'a str,
    ) -> MetricsFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Metrics sink that drops everything.
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn track_feature_usage<'a>(
        &'a self,
        _flag: &'a str,
        _user_id: &'a str,
    ) -> MetricsFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn track_error<'a>(
        &'a self,
        _flag: &'a str,
        _message: &'a str,
        _user_id: &'a str,
    ) -> MetricsFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Metrics sink that records events in arrival order. Clones share the same log.
pub struct MemoryMetricsSink {
    events: Rc<RefCell<Vec<MetricEvent>>>,
}

impl MemoryMetricsSink {
    /// Returns a copy of every recorded event.
    pub fn events(&self) -> Vec<MetricEvent> {
        self.events.borrow().clone()
    }
}

impl MetricsSink for MemoryMetricsSink {
    fn track_feature_usage<'a>(
        &'a self,
        flag: &'a str,
        user_id: &'a str,
    ) -> MetricsFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.events.borrow_mut().push(MetricEvent::FeatureUsage {
                flag: flag.to_string(),
                user_id: user_id.to_string(),
            });
            Ok(())
        })
    }

    fn track_error<'a>(
        &'a self,
        flag: &'a str,
        message: &'a str,
        user_id: &'a str,
    ) -> MetricsFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.events.borrow_mut().push(MetricEvent::FeatureError {
                flag: flag.to_string(),
                message: message.to_string(),
                user_id: user_id.to_string(),
            });
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemoryMetricsSink::default();
        let sink_obj: &dyn MetricsSink = &sink;

        block_on(sink_obj.track_feature_usage("REWARDS", "user-1")).expect("usage");
        block_on(sink_obj.track_error("REWARDS", "claim failed", "user-1")).expect("error");

        assert_eq!(
            sink.events(),
            vec![
                MetricEvent::FeatureUsage {
                    flag: "REWARDS".to_string(),
                    user_id: "user-1".to_string(),
                },
                MetricEvent::FeatureError {
                    flag: "REWARDS".to_string(),
                    message: "claim failed".to_string(),
                    user_id: "user-1".to_string(),
                },
            ]
        );
    }

    #[test]
    fn metric_event_wire_shape_is_tagged() {
        let value = serde_json::to_value(MetricEvent::FeatureUsage {
            flag: "SENTINEL".to_string(),
            user_id: "u".to_string(),
        })
        .expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"kind": "feature_usage", "flag": "SENTINEL", "user_id": "u"})
        );
    }
}
