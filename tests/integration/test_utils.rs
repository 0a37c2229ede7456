//! Shared test utilities for integration tests
//!
//! Configuration loading reads process-wide environment variables, so every
//! test that touches them goes through one mutex.

use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes environment variable access across tests.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        restore_var("HOME", self.home);
        restore_var("XDG_CONFIG_HOME", self.xdg_config_home);
    }
}

fn restore_var(key: &str, original: Option<String>) {
    match original {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir`.
///
/// The global config file then lives at `test_dir/loomwright/config.toml`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());

    let result = f();

    env_state.restore();

    result
}

/// Set one variable for the duration of `f`. Call inside [`with_xdg_env`]
/// so the mutex is already held.
pub fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let original = std::env::var(key).ok();
    std::env::set_var(key, value);
    let result = f();
    restore_var(key, original);
    result
}
