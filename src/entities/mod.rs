// Entity Models
// Legislators, bills, votes and vote results, all keyed by an integer id.
//
// Each entity has:
// - A static field table (see `schema::Record`) used by the loader
// - Derived fields with defaults, filled in by the tally passes
// - Serde serialization in declaration order, used by the writer

pub mod bill;
pub mod legislator;
pub mod registry;
pub mod vote;

/// Identifier shared by all record types
pub type RecordId = i64;

pub use bill::{Bill, BillCount, UNKNOWN_SPONSOR};
pub use legislator::Legislator;
pub use registry::Registry;
pub use vote::{Vote, VoteResult, VoteType};
