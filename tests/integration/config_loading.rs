//! Layered configuration loading

use loomwright::cli::RunContext;
use loomwright::config::ConfigLoader;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::integration::{with_env_var, with_xdg_env};

fn write_global(config_home: &Path, contents: &str) {
    let dir = config_home.join("loomwright");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

fn write_workspace(workspace: &Path, name: &str, contents: &str) {
    let dir = workspace.join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_defaults_without_any_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.loom.min_frames, 8);
        assert_eq!(config.loom.min_treadles, 10);
        assert!(config.loom.compact);
        assert_eq!(config.logging.level, "warn");
    });
}

#[test]
fn test_global_file_is_read_from_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_global(test_dir.path(), "[loom]\nmin_frames = 16\n");

    with_xdg_env(&test_dir, || {
        let path = ConfigLoader::global_config_path().unwrap();
        assert_eq!(path, test_dir.path().join("loomwright").join("config.toml"));

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.loom.min_frames, 16);
        assert_eq!(config.loom.min_treadles, 10);
    });
}

#[test]
fn test_workspace_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_global(
        test_dir.path(),
        "[loom]\nmin_frames = 16\nmin_treadles = 20\n",
    );
    write_workspace(workspace.path(), "config.toml", "[loom]\nmin_frames = 4\n");

    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.loom.min_frames, 4);
        assert_eq!(config.loom.min_treadles, 20);
    });
}

#[test]
fn test_environment_file_overrides_base_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(workspace.path(), "config.toml", "[loom]\ncompact = true\n");
    write_workspace(workspace.path(), "studio.toml", "[loom]\ncompact = false\n");

    with_xdg_env(&test_dir, || {
        with_env_var("LOOMWRIGHT_ENV", "studio", || {
            let config = ConfigLoader::load(workspace.path()).unwrap();
            assert!(!config.loom.compact);
        });
    });
}

#[test]
fn test_env_var_overrides_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(workspace.path(), "config.toml", "[loom]\nmin_frames = 4\n");

    with_xdg_env(&test_dir, || {
        with_env_var("LOOMWRIGHT__LOOM__MIN_FRAMES", "12", || {
            let config = ConfigLoader::load(workspace.path()).unwrap();
            assert_eq!(config.loom.min_frames, 12);
        });
    });
}

#[test]
fn test_invalid_minimum_is_rejected_by_run_context() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(workspace.path(), "config.toml", "[loom]\nmin_treadles = 0\n");

    with_xdg_env(&test_dir, || {
        let result = RunContext::new(workspace.path().to_path_buf(), None);
        let err = result.err().unwrap();
        assert!(err.to_string().contains("min_treadles"));
    });
}

#[test]
fn test_explicit_file_skips_other_sources() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(workspace.path(), "config.toml", "[loom]\nmin_frames = 4\n");
    let explicit = test_dir.path().join("explicit.toml");
    fs::write(&explicit, "[loom]\nmin_treadles = 6\n").unwrap();

    with_xdg_env(&test_dir, || {
        let context = RunContext::new(workspace.path().to_path_buf(), Some(explicit.clone()))
            .unwrap();
        assert_eq!(context.config().loom.min_frames, 8);
        assert_eq!(context.config().loom.min_treadles, 6);
    });
}
