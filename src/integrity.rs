// ✅ Referential Integrity - eager reference checks
//
// The tally passes fail on the first missing reference. Strict runs call
// these checks first so every dangling reference is reported at once.
// Unmatched bill sponsors are informational and never fail a run.

use serde::Serialize;
use std::fmt;

use crate::entities::{Bill, Legislator, RecordId, Registry, Vote, VoteResult};
use crate::error::IntegrityError;

// ============================================================================
// DANGLING REFERENCE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub from_entity: &'static str,
    pub from_id: RecordId,
    pub field: &'static str,
    pub target_entity: &'static str,
    pub target_id: RecordId,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{} -> missing {} {}",
            self.from_entity, self.from_id, self.field, self.target_entity, self.target_id
        )
    }
}

// ============================================================================
// INTEGRITY REPORT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub dangling: Vec<DanglingReference>,
    pub unmatched_sponsors: Vec<RecordId>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Integrity: {} dangling reference(s), {} bill(s) with unknown sponsor",
            self.dangling.len(),
            self.unmatched_sponsors.len()
        )
    }

    /// Turn dangling references into an error, keeping the report otherwise
    pub fn into_result(self) -> Result<Self, IntegrityError> {
        if self.is_clean() {
            return Ok(self);
        }

        let details = self
            .dangling
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        Err(IntegrityError {
            count: self.dangling.len(),
            details,
        })
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// Check vote results against whichever targets are loaded
pub fn check_vote_results(
    vote_results: &Registry<VoteResult>,
    votes: Option<&Registry<Vote>>,
    legislators: Option<&Registry<Legislator>>,
) -> Vec<DanglingReference> {
    let mut dangling = Vec::new();

    for result in vote_results.values() {
        if let Some(votes) = votes {
            if !votes.contains(result.vote_id) {
                dangling.push(DanglingReference {
                    from_entity: "VoteResult",
                    from_id: result.id,
                    field: "vote_id",
                    target_entity: "Vote",
                    target_id: result.vote_id,
                });
            }
        }

        if let Some(legislators) = legislators {
            if !legislators.contains(result.legislator_id) {
                dangling.push(DanglingReference {
                    from_entity: "VoteResult",
                    from_id: result.id,
                    field: "legislator_id",
                    target_entity: "Legislator",
                    target_id: result.legislator_id,
                });
            }
        }
    }

    dangling
}

pub fn check_votes(votes: &Registry<Vote>, bills: &Registry<Bill>) -> Vec<DanglingReference> {
    votes
        .values()
        .filter(|vote| !bills.contains(vote.bill_id))
        .map(|vote| DanglingReference {
            from_entity: "Vote",
            from_id: vote.id,
            field: "bill_id",
            target_entity: "Bill",
            target_id: vote.bill_id,
        })
        .collect()
}

/// Bills whose sponsor_id matches no legislator
pub fn unmatched_sponsors(bills: &Registry<Bill>, legislators: &Registry<Legislator>) -> Vec<RecordId> {
    bills
        .values()
        .filter(|bill| !legislators.contains(bill.sponsor_id))
        .map(|bill| bill.id)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
