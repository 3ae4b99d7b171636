use anyhow::Context;
use sheets::ReportNames;
use std::str::FromStr;
use types::{BalanceParams, Columns};

/// Service settings, read from `SEATPLAN__*` environment variables.
#[derive(Clone, Debug)]
pub struct Settings {
    pub port: u16,
    pub body_limit: usize,
    pub request_timeout_secs: u64,
    /// Finished jobs remembered before the oldest is dropped.
    pub jobs_retained: usize,
    /// Used for requests that carry no `params` at all.
    pub defaults: BalanceParams,
    pub columns: Columns,
    pub names: ReportNames,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8080,
            body_limit: 2 * 1024 * 1024,
            request_timeout_secs: 30,
            jobs_retained: jobs::DEFAULT_RETAINED,
            defaults: BalanceParams::default(),
            columns: Columns::default(),
            names: ReportNames::default(),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {v:?}")),
        None => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let d = Self::default();
        let defaults = BalanceParams {
            max_per_room: parse_var(
                &lookup,
                "SEATPLAN__BALANCE__MAX_PER_ROOM",
                d.defaults.max_per_room,
            )?,
            max_per_class_in_room: parse_var(
                &lookup,
                "SEATPLAN__BALANCE__MAX_PER_CLASS_IN_ROOM",
                d.defaults.max_per_class_in_room,
            )?,
            attempts: parse_var(&lookup, "SEATPLAN__BALANCE__ATTEMPTS", d.defaults.attempts)?,
            seed: None,
        };
        Ok(Self {
            port: parse_var(&lookup, "SEATPLAN__SERVER__PORT", d.port)?,
            body_limit: parse_var(&lookup, "SEATPLAN__SERVER__BODY_LIMIT", d.body_limit)?,
            request_timeout_secs: parse_var(
                &lookup,
                "SEATPLAN__SERVER__REQUEST_TIMEOUT_SECS",
                d.request_timeout_secs,
            )?,
            jobs_retained: parse_var(&lookup, "SEATPLAN__JOBS__RETAINED", d.jobs_retained)?,
            defaults,
            ..d
        })
    }
}
