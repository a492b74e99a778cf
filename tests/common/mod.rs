#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::Command;

pub fn settings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// The `neri` binary with a private config dir and no inherited AI_* settings.
pub fn neri_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("neri").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("AI_PROVIDER")
        .env_remove("AI_BASE_URL")
        .env_remove("AI_API_KEY")
        .env_remove("AI_MODEL")
        .env_remove("RUST_LOG");
    cmd
}

/// Same isolation as [`neri_cmd`], as a plain process for tests that signal it.
pub fn neri_process(config_home: &Path) -> std::process::Command {
    let mut cmd = std::process::Command::cargo_bin("neri").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("AI_PROVIDER")
        .env_remove("AI_BASE_URL")
        .env_remove("AI_API_KEY")
        .env_remove("AI_MODEL")
        .env_remove("RUST_LOG");
    cmd
}
