// ⚙️ Pipeline configuration
// Defaults read from input/ and write to output/, relative to the working directory.
// A JSON file can override any subset of fields; CLI flags override the file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub bills_file: String,
    pub legislators_file: String,
    pub votes_file: String,
    pub vote_results_file: String,

    pub output_dir: PathBuf,
    pub bills_output: String,
    pub legislators_output: String,

    /// Single ASCII character used for both reading and writing
    pub delimiter: char,

    /// Check every reference before tallying
    pub strict: bool,

    /// Write BillCount rows instead of full Bill rows
    pub compact: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_dir: PathBuf::from("input"),
            bills_file: "bills.csv".to_string(),
            legislators_file: "legislators.csv".to_string(),
            votes_file: "votes.csv".to_string(),
            vote_results_file: "vote_results.csv".to_string(),
            output_dir: PathBuf::from("output"),
            bills_output: "bills.csv".to_string(),
            legislators_output: "legislators-support-oppose-count.csv".to_string(),
            delimiter: ',',
            strict: false,
            compact: false,
        }
    }
}

impl PipelineConfig {
    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: PipelineConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        config.delimiter_byte()?;
        Ok(config)
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            bail!(
                "Invalid delimiter {:?}: must be a single ASCII character other than a quote or line break",
                self.delimiter
            );
        }
        Ok(self.delimiter as u8)
    }

    pub fn bills_path(&self) -> PathBuf {
        self.input_dir.join(&self.bills_file)
    }

    pub fn legislators_path(&self) -> PathBuf {
        self.input_dir.join(&self.legislators_file)
    }

    pub fn votes_path(&self) -> PathBuf {
        self.input_dir.join(&self.votes_file)
    }

    pub fn vote_results_path(&self) -> PathBuf {
        self.input_dir.join(&self.vote_results_file)
    }

    pub fn bills_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.bills_output)
    }

    pub fn legislators_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.legislators_output)
    }
}
