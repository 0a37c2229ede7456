//! CLI route: single route table and run context. Dispatches to the loom
//! engine and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_check_text, format_loom_text, CheckReport};
use crate::config::{ConfigLoader, LoomSettings, LoomwrightConfig};
use crate::drawdown::{Drawdown, Grid};
use crate::error::LoomError;
use crate::loom::Loom;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self, LoomError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(LoomError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Runtime context for CLI execution: workspace and resolved configuration.
pub struct RunContext {
    config: LoomwrightConfig,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, LoomError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already-loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: LoomwrightConfig) -> Result<Self, LoomError> {
        config.ensure_valid()?;
        Ok(Self {
            config,
            workspace_root,
        })
    }

    pub fn config(&self) -> &LoomwrightConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Run one command and return what it prints.
    pub fn execute(&self, command: &Commands) -> Result<String, LoomError> {
        match command {
            Commands::Mechanize {
                draft,
                min_frames,
                min_treadles,
                no_compact,
                format,
            } => {
                let format = OutputFormat::parse(format)?;
                let grid = self.read_draft(draft)?;
                let settings = LoomSettings {
                    min_frames: min_frames.unwrap_or(self.config.loom.min_frames),
                    min_treadles: min_treadles.unwrap_or(self.config.loom.min_treadles),
                    compact: self.config.loom.compact && !no_compact,
                };
                settings.validate().map_err(LoomError::ConfigError)?;

                let mut loom = Loom::new(
                    grid.wefts(),
                    grid.warps(),
                    settings.min_frames,
                    settings.min_treadles,
                );
                loom.recompute_from_drawdown(&grid);
                if settings.compact {
                    loom.compact_all();
                }
                info!(
                    draft = %draft.display(),
                    num_frames = loom.num_frames(),
                    num_treadles = loom.num_treadles(),
                    "Mechanized drawdown"
                );

                match format {
                    OutputFormat::Text => Ok(format_loom_text(&loom)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&loom)?),
                }
            }
            Commands::Weave { loom } => {
                let loom = self.read_loom(loom)?;
                Ok(loom.derive_drawdown().to_string())
            }
            Commands::Check {
                draft,
                loom,
                format,
            } => {
                let format = OutputFormat::parse(format)?;
                let grid = self.read_draft(draft)?;
                let loom = self.read_loom(loom)?;
                let report = check(&grid, &loom)?;
                info!(
                    conflicts = report.conflicts.len(),
                    mismatches = report.mismatches.len(),
                    "Checked mechanization"
                );

                match format {
                    OutputFormat::Text => Ok(format_check_text(&report)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
                }
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    fn read_draft(&self, path: &Path) -> Result<Grid, LoomError> {
        let path = self.resolve(path);
        debug!(path = %path.display(), "Reading drawdown");
        Grid::parse(&std::fs::read_to_string(&path)?)
    }

    fn read_loom(&self, path: &Path) -> Result<Loom, LoomError> {
        let path = self.resolve(path);
        debug!(path = %path.display(), "Reading mechanization");
        let loom: Loom = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        loom.validate()?;
        Ok(loom)
    }
}

/// Conflicts plus cells where a set drawdown value differs from what the
/// mechanization weaves. Unset drawdown cells never mismatch.
fn check(grid: &Grid, loom: &Loom) -> Result<CheckReport, LoomError> {
    if grid.wefts() != loom.wefts() || grid.warps() != loom.warps() {
        return Err(LoomError::InvalidMechanization(format!(
            "drawdown is {} x {} but the mechanization is for {} x {}",
            grid.wefts(),
            grid.warps(),
            loom.wefts(),
            loom.warps()
        )));
    }

    let woven = loom.derive_drawdown();
    let mismatches = woven
        .diff(grid)
        .into_iter()
        .filter(|&(i, j)| grid.cell(i, j).is_some())
        .collect();

    Ok(CheckReport {
        conflicts: loom.conflicts(grid),
        mismatches,
    })
}
