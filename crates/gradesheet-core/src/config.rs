//! Assignment-part configuration.
//!
//! Loaded once at start-up and handed by reference to every session.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One gradable part of an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPart {
    /// Display name, also used to select the part.
    #[serde(default = "default_part_name")]
    pub name: String,
    /// Blank rubric used when no save file exists yet.
    pub template: PathBuf,
    /// Report file name inside a student's directory.
    #[serde(default = "default_grade_file")]
    pub grade_file: String,
    /// Pattern describing the submission files for this part.
    #[serde(default = "default_filter")]
    pub submissions: String,
}

fn default_part_name() -> String {
    "[no name]".to_string()
}
fn default_grade_file() -> String {
    "grade.txt".to_string()
}
fn default_filter() -> String {
    "*.*".to_string()
}

/// Top-level gradesheet configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradesheetConfig {
    #[serde(default)]
    pub parts: Vec<AssignmentPart>,
}

impl GradesheetConfig {
    /// Look up a part by name, ignoring case.
    pub fn part(&self, name: &str) -> Option<&AssignmentPart> {
        self.parts
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Part names in file order.
    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GradesheetConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for part in &self.parts {
            if part.name.trim().is_empty() {
                anyhow::bail!(
                    "assignment part with template {} has an empty name",
                    part.template.display()
                );
            }
            if !seen.insert(part.name.to_ascii_lowercase()) {
                anyhow::bail!("duplicate assignment part: {}", part.name);
            }
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `$GRADESHEET_CONFIG`
/// 2. `gradesheet.toml` in the current directory
/// 3. `~/.config/gradesheet/config.toml`
pub fn load_config() -> Result<GradesheetConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradesheetConfig> {
    let explicit = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("GRADESHEET_CONFIG").map(PathBuf::from));

    let config_path = if let Some(p) = explicit {
        if p.exists() {
            Some(p)
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradesheet.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = GradesheetConfig::from_toml(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(
                path = %path.display(),
                parts = config.parts.len(),
                "loaded config"
            );
            Ok(config)
        }
        None => Ok(GradesheetConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradesheet"))
}
