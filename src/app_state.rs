use crate::analysis::{Analysis, AnalysisOptions, LogInput};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "dmgstat";

#[derive(Default)]
pub struct AppState {
    pub config: AppConfig,
    pub inputs: Vec<LogInput>,
    pub names: Option<String>,
    pub use_allowlist: bool,
    pub last_analysis: Option<Analysis>,
}

impl AppState {
    pub fn new() -> Self {
        let config: AppConfig = match confy::load(APP_NAME, None) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "could not load config, using defaults");
                AppConfig::default()
            }
        };
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let names = Some(config.allowlist.clone()).filter(|n| !n.trim().is_empty());
        Self {
            use_allowlist: config.use_allowlist,
            names,
            config,
            inputs: Vec::new(),
            last_analysis: None,
        }
    }

    pub fn add_inputs(&mut self, inputs: Vec<LogInput>) {
        self.inputs.extend(inputs);
        self.last_analysis = None;
    }

    pub fn clear_inputs(&mut self) {
        self.inputs.clear();
        self.last_analysis = None;
    }

    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            names: self.names.clone(),
            use_allowlist: self.use_allowlist,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub log_directory: String,
    /// Comma separated party names used when none are given on the command line.
    #[serde(default)]
    pub allowlist: String,
    #[serde(default = "default_use_allowlist")]
    pub use_allowlist: bool,
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_use_allowlist() -> bool {
    true
}

fn default_chart_width() -> usize {
    40
}

impl ::std::default::Default for AppConfig {
    fn default() -> Self {
        Self {
            log_directory: String::new(),
            allowlist: String::new(),
            use_allowlist: default_use_allowlist(),
            chart_width: default_chart_width(),
        }
    }
}
