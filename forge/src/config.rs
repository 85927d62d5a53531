//! Registry-wide defaults

use std::time::Duration;

use tokio::runtime::Handle;

/// Default quiet period before a debounced change notification fires
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Environment variable overriding the debounce delay, in milliseconds
pub const DEBOUNCE_ENV_VAR: &str = "EXPORT_FORGE_DEBOUNCE_MS";

/// What a successful write does to notify the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// No notification
    Silent,
    /// Notify synchronously from `write`
    Immediate,
    /// Coalesce writes and notify once after the quiet period
    Debounced(Duration),
}

/// Notification style used by `on_set` when no explicit policy is given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifyMode {
    /// No notification
    Silent,
    /// Notify synchronously
    Immediate,
    /// Notify after the debounce delay
    #[default]
    Debounced,
}

/// Defaults applied by a `PropertyRegistry`
#[derive(Debug, Clone, Default)]
pub struct ForgeConfig {
    notify_mode:    NotifyMode,
    debounce_delay: Option<Duration>,
    runtime:        Option<Handle>,
}

impl ForgeConfig {
    /// Config with the built-in defaults (debounced, 250 ms)
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Set the notification style used by `on_set`
    #[must_use]
    pub const fn with_notify_mode(mut self, mode: NotifyMode) -> Self {
        self.notify_mode = mode;
        self
    }

    /// Set the debounce delay explicitly
    #[must_use]
    pub const fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = Some(delay);
        self
    }

    /// Run debounce timers on this tokio runtime
    #[must_use]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Notification style used by `on_set`
    #[must_use]
    pub const fn notify_mode(&self) -> NotifyMode { self.notify_mode }

    /// Runtime configured for debounce timers, if any
    #[must_use]
    pub const fn runtime(&self) -> Option<&Handle> { self.runtime.as_ref() }

    /// Get the effective debounce delay, checking the environment variable first
    ///
    /// Priority order:
    /// 1. `EXPORT_FORGE_DEBOUNCE_MS` environment variable (highest priority)
    /// 2. Explicitly set delay via `with_debounce_delay()`
    /// 3. Default delay (250 ms)
    #[must_use]
    pub fn effective_debounce_delay(&self) -> (Duration, String) {
        let env_delay = debounce_delay_from_env();

        let final_delay = env_delay.unwrap_or_else(|| {
            self.debounce_delay
                .unwrap_or(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
        });

        (final_delay, delay_source(env_delay, self.debounce_delay))
    }

    /// Policy applied by `on_set`
    #[must_use]
    pub fn default_notify_policy(&self) -> NotifyPolicy {
        match self.notify_mode {
            NotifyMode::Silent => NotifyPolicy::Silent,
            NotifyMode::Immediate => NotifyPolicy::Immediate,
            NotifyMode::Debounced => NotifyPolicy::Debounced(self.effective_debounce_delay().0),
        }
    }
}

fn delay_source(env_delay: Option<Duration>, explicit: Option<Duration>) -> String {
    match (env_delay, explicit) {
        (Some(_), Some(explicit)) => {
            format!("environment override from explicit {}ms", explicit.as_millis())
        },
        (Some(_), None) => format!("environment override from default {DEFAULT_DEBOUNCE_MS}ms"),
        (None, Some(_)) => "explicit".to_string(),
        (None, None) => "default".to_string(),
    }
}

fn debounce_delay_from_env() -> Option<Duration> {
    std::env::var(DEBOUNCE_ENV_VAR)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_policy_follows_mode() {
        let silent = ForgeConfig::new().with_notify_mode(NotifyMode::Silent);
        assert_eq!(silent.default_notify_policy(), NotifyPolicy::Silent);

        let immediate = ForgeConfig::new().with_notify_mode(NotifyMode::Immediate);
        assert_eq!(immediate.default_notify_policy(), NotifyPolicy::Immediate);
    }

    #[test]
    fn test_debounce_delay_sources() {
        // The environment override wins over everything below
        if std::env::var(DEBOUNCE_ENV_VAR).is_ok() {
            return;
        }

        let (delay, source) = ForgeConfig::new().effective_debounce_delay();
        assert_eq!(delay, Duration::from_millis(DEFAULT_DEBOUNCE_MS));
        assert_eq!(source, "default");

        let (delay, source) = ForgeConfig::new()
            .with_debounce_delay(Duration::from_millis(40))
            .effective_debounce_delay();
        assert_eq!(delay, Duration::from_millis(40));
        assert_eq!(source, "explicit");
    }

    #[test]
    fn test_environment_override_names_the_value_it_replaced() {
        let from_env = Some(Duration::from_millis(900));
        assert_eq!(
            delay_source(from_env, None),
            "environment override from default 250ms"
        );
        assert_eq!(
            delay_source(from_env, Some(Duration::from_millis(40))),
            "environment override from explicit 40ms"
        );
    }
}
