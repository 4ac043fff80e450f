//! Scoped environment overrides for configuration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

use daily_quota::config::ENV_PREFIX;

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Restores the touched variables and releases the environment lock on drop.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Clears every `DAILY_QUOTA_*` variable, then applies `settings`.
    ///
    /// Keys are given without the prefix, e.g. `("BACKEND", Some("sqlite"))`;
    /// `None` leaves the variable unset.
    pub fn isolated(settings: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let prefix = format!("{ENV_PREFIX}_");
        let mut keys: Vec<OsString> = env::vars_os()
            .map(|(key, _)| key)
            .filter(|key| key.to_string_lossy().starts_with(&prefix))
            .collect();
        keys.extend(settings.iter().map(|(key, _)| OsString::from(format!("{prefix}{key}"))));
        keys.sort();
        keys.dedup();

        let previous = keys
            .into_iter()
            .map(|key| {
                let value = env::var_os(&key);
                (key, value)
            })
            .collect::<Vec<_>>();

        for (key, _) in &previous {
            // SAFETY: ENV_MUTEX serialises environment mutation in this binary.
            unsafe { env::remove_var(key) };
        }
        for (key, value) in settings {
            if let Some(value) = value {
                // SAFETY: ENV_MUTEX serialises environment mutation in this binary.
                unsafe { env::set_var(format!("{prefix}{key}"), value) };
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            // SAFETY: the guard still holds ENV_MUTEX.
            unsafe {
                match value {
                    Some(previous) => env::set_var(&key, previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}
