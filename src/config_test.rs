#![allow(clippy::float_cmp)]

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that touch process environment.
fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_lock`].
unsafe fn clear_studio_env() {
    unsafe {
        std::env::remove_var("STUDIO_BACKEND_URL");
        std::env::remove_var("STUDIO_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("STUDIO_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("STUDIO_GRID_COLS");
        std::env::remove_var("STUDIO_GRID_ROWS");
        std::env::remove_var("STUDIO_GRID_SPACING");
    }
}

#[test]
fn from_env_defaults() {
    let _env = env_lock();
    unsafe { clear_studio_env() };

    let cfg = StudioConfig::from_env().unwrap();
    assert_eq!(cfg, StudioConfig::default());
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(
        cfg.timeouts,
        BackendTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg.lattice_config(), LatticeConfig::default());
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_lock();
    unsafe {
        clear_studio_env();
        std::env::set_var("STUDIO_BACKEND_URL", "http://backend.test:8080/");
        std::env::set_var("STUDIO_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("STUDIO_CONNECT_TIMEOUT_SECS", "7");
        std::env::set_var("STUDIO_GRID_COLS", "11");
        std::env::set_var("STUDIO_GRID_ROWS", " 9 ");
        std::env::set_var("STUDIO_GRID_SPACING", "32.5");
    }

    let cfg = StudioConfig::from_env().unwrap();
    assert_eq!(cfg.backend_url, "http://backend.test:8080");
    assert_eq!(cfg.timeouts, BackendTimeouts { request_secs: 42, connect_secs: 7 });
    let lattice = cfg.lattice_config();
    assert_eq!(lattice.cols, 11);
    assert_eq!(lattice.rows, 9);
    assert_eq!(lattice.spacing, 32.5);

    unsafe { clear_studio_env() };
}

#[test]
fn from_env_malformed_timeout_errors() {
    let _env = env_lock();
    unsafe {
        clear_studio_env();
        std::env::set_var("STUDIO_REQUEST_TIMEOUT_SECS", "soon");
    }

    let err = StudioConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { key: "STUDIO_REQUEST_TIMEOUT_SECS", .. }));
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
    assert!(err.to_string().contains("soon"));

    unsafe { clear_studio_env() };
}

#[test]
fn from_env_negative_grid_size_errors() {
    let _env = env_lock();
    unsafe {
        clear_studio_env();
        std::env::set_var("STUDIO_GRID_COLS", "-3");
    }

    let err = StudioConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { key: "STUDIO_GRID_COLS", .. }));

    unsafe { clear_studio_env() };
}

#[test]
fn from_env_rejects_non_positive_spacing() {
    let _env = env_lock();
    unsafe {
        clear_studio_env();
        std::env::set_var("STUDIO_GRID_SPACING", "0");
    }

    let err = StudioConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { key: "STUDIO_GRID_SPACING", .. }));
    assert!(!err.retryable());

    unsafe { clear_studio_env() };
}
