// Legislative Tally - Core Library
// Loads bills, legislators, votes and vote results from delimited files,
// cross-references them and writes enriched reports.

pub mod attributes;     // Field descriptor table + primitive coercion
pub mod config;         // Pipeline paths, delimiter, strict/compact switches
pub mod entities;       // Legislator, Bill, Vote, VoteResult + Registry
pub mod error;          // RecordError, TallyError, IntegrityError
pub mod export;         // Record Writer
pub mod integrity;      // Eager referential checks (strict mode)
pub mod logging;        // tracing subscriber setup
pub mod parser;         // Record Loader
pub mod pipeline;       // load → assign/tally → write
pub mod schema;         // Record trait + schema validation
pub mod tally;          // Sponsor assignment + vote tallies

// Re-export commonly used types
pub use attributes::{FieldSpec, FieldType, FieldValue};
pub use config::PipelineConfig;
pub use entities::{
    Bill, BillCount, Legislator, RecordId, Registry, Vote, VoteResult, VoteType,
    UNKNOWN_SPONSOR,
};
pub use error::{IntegrityError, RecordError, TallyError};
pub use export::write_records;
pub use integrity::{DanglingReference, IntegrityReport};
pub use parser::{load_keyed, load_records, DEFAULT_DELIMITER};
pub use pipeline::{check_inputs, run_all, run_bill_report, run_legislator_report, RunSummary};
pub use schema::{Record, Row};
pub use tally::{
    assign_bill_primary_sponsors, assign_bill_vote_counts, assign_legislator_vote_counts,
};
