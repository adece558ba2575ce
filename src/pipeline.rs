// 🔁 Pipeline - load → assign/tally → write
//
// One function per report plus run_all for both. Every step is fatal on
// error; outputs are only written after all passes succeeded.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::entities::{Bill, BillCount, Legislator, Registry, Vote, VoteResult};
use crate::export::write_records;
use crate::integrity::{self, DanglingReference, IntegrityReport};
use crate::parser::load_keyed;
use crate::schema::Record;
use crate::tally;

// ============================================================================
// RUN SUMMARY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub report: String,
    pub output: PathBuf,
    pub records_written: usize,
    pub unmatched_sponsors: usize,
    pub generated_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} report: {} record(s) written to {}",
            self.report,
            self.records_written,
            self.output.display()
        )
    }
}

// ============================================================================
// REPORTS
// ============================================================================

/// Bills annotated with sponsor name and support/opposition counts
pub fn run_bill_report(config: &PipelineConfig) -> Result<RunSummary> {
    let delimiter = config.delimiter_byte()?;

    let mut bills: Registry<Bill> = load(&config.bills_path(), delimiter)?;
    let legislators: Registry<Legislator> = load(&config.legislators_path(), delimiter)?;
    let vote_results: Registry<VoteResult> = load(&config.vote_results_path(), delimiter)?;
    let votes: Registry<Vote> = load(&config.votes_path(), delimiter)?;

    if config.strict {
        let mut dangling = integrity::check_vote_results(&vote_results, Some(&votes), None);
        dangling.extend(integrity::check_votes(&votes, &bills));
        strict_check(dangling)?;
    }

    let unmatched = tally_bills(&mut bills, &legislators, &votes, &vote_results)?;

    write_bill_report(config, &bills, unmatched, delimiter)
}

/// Legislators annotated with the number of bills they supported/opposed
pub fn run_legislator_report(config: &PipelineConfig) -> Result<RunSummary> {
    let delimiter = config.delimiter_byte()?;

    let mut legislators: Registry<Legislator> = load(&config.legislators_path(), delimiter)?;
    let vote_results: Registry<VoteResult> = load(&config.vote_results_path(), delimiter)?;

    if config.strict {
        strict_check(integrity::check_vote_results(&vote_results, None, Some(&legislators)))?;
    }

    tally::assign_legislator_vote_counts(&mut legislators, &vote_results)
        .context("Failed to tally legislator votes")?;

    write_legislator_report(config, &legislators, delimiter)
}

/// Both reports from a single load. Nothing is written unless every pass
/// succeeds.
pub fn run_all(config: &PipelineConfig) -> Result<Vec<RunSummary>> {
    let delimiter = config.delimiter_byte()?;

    let mut bills: Registry<Bill> = load(&config.bills_path(), delimiter)?;
    let mut legislators: Registry<Legislator> = load(&config.legislators_path(), delimiter)?;
    let vote_results: Registry<VoteResult> = load(&config.vote_results_path(), delimiter)?;
    let votes: Registry<Vote> = load(&config.votes_path(), delimiter)?;

    if config.strict {
        let mut dangling =
            integrity::check_vote_results(&vote_results, Some(&votes), Some(&legislators));
        dangling.extend(integrity::check_votes(&votes, &bills));
        strict_check(dangling)?;
    }

    // Sponsor names come from the legislators as loaded, before their tallies
    let unmatched = tally_bills(&mut bills, &legislators, &votes, &vote_results)?;
    tally::assign_legislator_vote_counts(&mut legislators, &vote_results)
        .context("Failed to tally legislator votes")?;

    Ok(vec![
        write_bill_report(config, &bills, unmatched, delimiter)?,
        write_legislator_report(config, &legislators, delimiter)?,
    ])
}

/// Load all four inputs and report every dangling reference
pub fn check_inputs(config: &PipelineConfig) -> Result<IntegrityReport> {
    let delimiter = config.delimiter_byte()?;

    let bills: Registry<Bill> = load(&config.bills_path(), delimiter)?;
    let legislators: Registry<Legislator> = load(&config.legislators_path(), delimiter)?;
    let vote_results: Registry<VoteResult> = load(&config.vote_results_path(), delimiter)?;
    let votes: Registry<Vote> = load(&config.votes_path(), delimiter)?;

    let mut dangling = integrity::check_vote_results(&vote_results, Some(&votes), Some(&legislators));
    dangling.extend(integrity::check_votes(&votes, &bills));

    let report = IntegrityReport {
        dangling,
        unmatched_sponsors: integrity::unmatched_sponsors(&bills, &legislators),
    };

    info!(
        dangling = report.dangling.len(),
        unmatched_sponsors = report.unmatched_sponsors.len(),
        "integrity check complete"
    );
    Ok(report)
}

// ============================================================================
// HELPERS
// ============================================================================

fn strict_check(dangling: Vec<DanglingReference>) -> Result<()> {
    let report = IntegrityReport {
        dangling,
        unmatched_sponsors: Vec::new(),
    };
    report.into_result().context("Strict reference check failed")?;
    Ok(())
}

/// Sponsor assignment followed by the bill tally; returns the unmatched sponsor count
fn tally_bills(
    bills: &mut Registry<Bill>,
    legislators: &Registry<Legislator>,
    votes: &Registry<Vote>,
    vote_results: &Registry<VoteResult>,
) -> Result<usize> {
    let unmatched = integrity::unmatched_sponsors(bills, legislators);
    if !unmatched.is_empty() {
        warn!(count = unmatched.len(), bills = ?unmatched, "bills with unknown sponsor");
    }

    // 1. Find primary sponsor
    tally::assign_bill_primary_sponsors(bills, legislators);

    // 2. Count supporters and opposers
    tally::assign_bill_vote_counts(bills, votes, vote_results)
        .context("Failed to tally bill votes")?;

    Ok(unmatched.len())
}

fn write_bill_report(
    config: &PipelineConfig,
    bills: &Registry<Bill>,
    unmatched_sponsors: usize,
    delimiter: u8,
) -> Result<RunSummary> {
    let output = config.bills_output_path();
    prepare_output(&output)?;
    let written = if config.compact {
        let rows: Vec<BillCount> = bills.values().map(BillCount::from).collect();
        write_records(&output, &rows, delimiter)
    } else {
        write_records(&output, bills.values(), delimiter)
    };
    let records_written =
        written.with_context(|| format!("Failed to write bill report to {}", output.display()))?;

    info!(path = %output.display(), records_written, "bill report complete");

    Ok(RunSummary {
        report: "bills".to_string(),
        output,
        records_written,
        unmatched_sponsors,
        generated_at: Utc::now(),
    })
}

fn write_legislator_report(
    config: &PipelineConfig,
    legislators: &Registry<Legislator>,
    delimiter: u8,
) -> Result<RunSummary> {
    let output = config.legislators_output_path();
    prepare_output(&output)?;
    let records_written = write_records(&output, legislators.values(), delimiter)
        .with_context(|| format!("Failed to write legislator report to {}", output.display()))?;

    info!(path = %output.display(), records_written, "legislator report complete");

    Ok(RunSummary {
        report: "legislators".to_string(),
        output,
        records_written,
        unmatched_sponsors: 0,
        generated_at: Utc::now(),
    })
}

fn load<T: Record>(path: &Path, delimiter: u8) -> Result<Registry<T>> {
    load_keyed::<T>(path, delimiter)
        .with_context(|| format!("Failed to load {} records from {}", T::KIND, path.display()))
}

fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
