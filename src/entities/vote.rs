// 🗳️ Vote + VoteResult Entities
// A Vote is one roll call on one bill; a VoteResult is one legislator's
// choice within a Vote.

use serde::{Serialize, Serializer};

use super::RecordId;
use crate::attributes::{FieldSpec, FieldType};
use crate::error::RecordError;
use crate::schema::{Record, Row};

// ============================================================================
// VOTE TYPE
// ============================================================================

/// Encoded in CSV as its integer code.
///
/// Codes other than 1 and 2 are kept as `Unrecognized` so new vote kinds
/// load fine; the tallies skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteType {
    For,
    Against,
    Unrecognized(i64),
}

impl VoteType {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => VoteType::For,
            2 => VoteType::Against,
            other => VoteType::Unrecognized(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            VoteType::For => 1,
            VoteType::Against => 2,
            VoteType::Unrecognized(code) => *code,
        }
    }
}

impl Serialize for VoteType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

// ============================================================================
// VOTE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub id: RecordId,
    pub bill_id: RecordId,
}

impl Vote {
    pub fn new(id: RecordId, bill_id: RecordId) -> Self {
        Vote { id, bill_id }
    }
}

impl Record for Vote {
    const KIND: &'static str = "Vote";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldType::Integer),
        FieldSpec::required("bill_id", FieldType::Integer),
    ];

    fn from_row(row: &Row) -> Result<Self, RecordError> {
        Ok(Vote {
            id: row.integer("id")?,
            bill_id: row.integer("bill_id")?,
        })
    }
}

// ============================================================================
// VOTE RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteResult {
    pub id: RecordId,
    pub legislator_id: RecordId,
    pub vote_id: RecordId,
    pub vote_type: VoteType,
}

impl VoteResult {
    pub fn new(id: RecordId, legislator_id: RecordId, vote_id: RecordId, vote_type: VoteType) -> Self {
        VoteResult {
            id,
            legislator_id,
            vote_id,
            vote_type,
        }
    }
}

impl Record for VoteResult {
    const KIND: &'static str = "VoteResult";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldType::Integer),
        FieldSpec::required("legislator_id", FieldType::Integer),
        FieldSpec::required("vote_id", FieldType::Integer),
        FieldSpec::required("vote_type", FieldType::Enumeration("vote_type")),
    ];

    fn from_row(row: &Row) -> Result<Self, RecordError> {
        Ok(VoteResult {
            id: row.integer("id")?,
            legislator_id: row.integer("legislator_id")?,
            vote_id: row.integer("vote_id")?,
            vote_type: VoteType::from_code(row.code("vote_type")?),
        })
    }
}
