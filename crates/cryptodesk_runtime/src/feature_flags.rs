//! Feature flags with environment defaults, persisted overrides, and first-use metrics.

use std::collections::{BTreeMap, HashSet};

use cryptodesk_host::MetricsSink;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::events::{SubscriptionId, Subscribers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureFlag {
    Sentinel,
    AlphaCalendar,
    Rewards,
    BetaTesting,
}

impl FeatureFlag {
    pub const ALL: [Self; 4] = [
        Self::Sentinel,
        Self::AlphaCalendar,
        Self::Rewards,
        Self::BetaTesting,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sentinel => "SENTINEL",
            Self::AlphaCalendar => "ALPHA_CALENDAR",
            Self::Rewards => "REWARDS",
            Self::BetaTesting => "BETA_TESTING",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == raw)
    }

    /// Environment variable that switches the flag on when set to `true`.
    pub fn env_var(self) -> String {
        format!("ENABLE_{}", self.name())
    }
}

/// Current value of every known flag.
pub type FlagSnapshot = BTreeMap<FeatureFlag, bool>;

#[derive(Debug)]
pub struct FeatureFlags {
    flags: FlagSnapshot,
    reported: HashSet<(FeatureFlag, String)>,
    subscribers: Subscribers<FlagSnapshot>,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            flags: FeatureFlag::ALL.into_iter().map(|f| (f, false)).collect(),
            reported: HashSet::new(),
            subscribers: Subscribers::default(),
        }
    }
}

impl FeatureFlags {
    /// Builds the flag set: everything off, then `ENABLE_<FLAG>=true` from `env`, then the
    /// persisted overrides on top. Unknown persisted keys are ignored.
    pub fn initialize(
        env: impl Fn(&str) -> Option<String>,
        persisted: Option<&BTreeMap<String, bool>>,
    ) -> Self {
        let mut flags = Self::default();
        for flag in FeatureFlag::ALL {
            let enabled = env(&flag.env_var()).is_some_and(|v| v == "true");
            flags.flags.insert(flag, enabled);
        }
        for (name, enabled) in persisted.into_iter().flatten() {
            match FeatureFlag::from_name(name) {
                Some(flag) => {
                    flags.flags.insert(flag, *enabled);
                }
                None => warn!(flag = %name, "ignoring unknown persisted feature flag"),
            }
        }
        flags
    }

    /// Flag values keyed by name, as persisted.
    pub fn persisted_form(&self) -> BTreeMap<String, bool> {
        self.flags
            .iter()
            .map(|(flag, enabled)| (flag.name().to_string(), *enabled))
            .collect()
    }

    /// Reads a flag without reporting usage.
    pub fn enabled(&self, flag: FeatureFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    /// Reads a flag and reports the first use by `user_id` of an enabled flag to `metrics`.
    pub async fn is_enabled(
        &mut self,
        flag: FeatureFlag,
        user_id: Option<&str>,
        metrics: &dyn MetricsSink,
    ) -> bool {
        let enabled = self.enabled(flag);
        if let Some(user_id) = user_id.filter(|_| enabled) {
            if self.reported.insert((flag, user_id.to_string())) {
                if let Err(err) = metrics.track_feature_usage(flag.name(), user_id).await {
                    warn!(flag = flag.name(), "feature usage report failed: {err}");
                }
            }
        }
        enabled
    }

    pub fn enable(&mut self, flag: FeatureFlag) -> bool {
        self.set(flag, true)
    }

    pub fn disable(&mut self, flag: FeatureFlag) -> bool {
        self.set(flag, false)
    }

    /// Returns `true` and notifies subscribers when the value changed.
    fn set(&mut self, flag: FeatureFlag, enabled: bool) -> bool {
        let previous = self.flags.insert(flag, enabled);
        if previous == Some(enabled) {
            return false;
        }
        info!(flag = flag.name(), enabled, "feature flag changed");
        self.subscribers.notify(&self.flags);
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FlagSnapshot) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Forwards a feature error to `metrics`. Anonymous errors are dropped.
    pub async fn track_error(
        &self,
        flag: FeatureFlag,
        message: &str,
        user_id: Option<&str>,
        metrics: &dyn MetricsSink,
    ) {
        let Some(user_id) = user_id else {
            return;
        };
        if let Err(err) = metrics.track_error(flag.name(), message, user_id).await {
            warn!(flag = flag.name(), "feature error report failed: {err}");
        }
    }
}
