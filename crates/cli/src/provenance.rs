use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a weld/generate invocation records next to its primary artifact.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub meshweld_version: &'static str,
    pub tag: Option<String>,
    pub command: &'static str,
    pub params: Value,
    pub stats: Value,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new(command: &'static str, tag: Option<String>, params: Value) -> Self {
        Self {
            code_rev: current_git_rev(),
            meshweld_version: meshweld::VERSION,
            tag,
            command,
            params,
            stats: Value::Null,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn input(mut self, path: &Path) -> Self {
        self.inputs.push(path.to_string_lossy().into_owned());
        self
    }

    pub fn output(mut self, path: &Path) -> Self {
        self.outputs.push(path.to_string_lossy().into_owned());
        self
    }

    pub fn with_stats(mut self, stats: Value) -> Self {
        self.stats = stats;
        self
    }
}

/// Write `<artifact>.provenance.json` next to `artifact`.
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, prov: &Provenance) -> Result<PathBuf> {
    let provenance_path = provenance_path(artifact.as_ref());
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    fs::write(&provenance_path, serde_json::to_vec_pretty(prov)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

/// Small JSON block describing the build (used by `report`).
pub fn build_report(tag: Option<String>) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "meshweld_version": meshweld::VERSION,
        "tag": tag,
        "default_tolerance": meshweld::cfg::DEFAULT_TOLERANCE,
        "grid_max_dim": meshweld::cfg::GRID_MAX_DIM,
    })
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}
