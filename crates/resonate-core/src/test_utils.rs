//! Test utilities for tests that need environment variable isolation.
//!
//! `MODEL_ID` and `TASK` are process-wide, so every test that reads or writes
//! them must hold [`ENV_LOCK`] for its whole duration.

use std::env;
use std::sync::{Mutex, MutexGuard};

/// Shared lock to serialize tests that depend on environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Acquire [`ENV_LOCK`], ignoring poisoning left behind by a failed test.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// RAII guard that restores an environment variable to its original value on drop.
///
/// A variable that was unset before the guard was created is removed again.
///
/// # Example
///
/// ```ignore
/// let _lock = lock_env();
/// let _model = EnvVarGuard::set("MODEL_ID", "resonate/identity");
/// let _task = EnvVarGuard::set("TASK", "audio-to-audio");
/// // Original values restored (or removed) when the guards are dropped
/// ```
#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    previous: Option<String>,
}

impl EnvVarGuard {
    /// Set an environment variable and return a guard that will restore it.
    #[allow(unsafe_code)]
    pub fn set(key: &str, value: &str) -> Self {
        let previous = env::var(key).ok();
        unsafe {
            env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }

    /// Remove an environment variable and return a guard that will restore it.
    #[allow(unsafe_code)]
    pub fn unset(key: &str) -> Self {
        let previous = env::var(key).ok();
        unsafe {
            env::remove_var(key);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }

    /// Value the variable had before this guard touched it.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}

impl Drop for EnvVarGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        if let Some(ref value) = self.previous {
            unsafe {
                env::set_var(&self.key, value);
            }
        } else {
            unsafe {
                env::remove_var(&self.key);
            }
        }
    }
}
