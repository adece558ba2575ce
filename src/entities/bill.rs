// 📜 Bill Entity
// A legislative proposal. Sponsor name and vote counts are derived fields
// filled in by the tally passes.

use serde::Serialize;

use super::legislator::count;
use super::RecordId;
use crate::attributes::{FieldSpec, FieldType};
use crate::error::RecordError;
use crate::schema::{Record, Row};

/// Sponsor name when `sponsor_id` matches no legislator
pub const UNKNOWN_SPONSOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    pub id: RecordId,
    pub title: String,
    pub sponsor_id: RecordId,
    pub primary_sponsor: String,
    pub supporter_count: u64,
    pub opposer_count: u64,
}

impl Bill {
    pub fn new(id: RecordId, title: impl Into<String>, sponsor_id: RecordId) -> Self {
        Bill {
            id,
            title: title.into(),
            sponsor_id,
            primary_sponsor: UNKNOWN_SPONSOR.to_string(),
            supporter_count: 0,
            opposer_count: 0,
        }
    }

    pub fn has_known_sponsor(&self) -> bool {
        self.primary_sponsor != UNKNOWN_SPONSOR
    }
}

impl Record for Bill {
    const KIND: &'static str = "Bill";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldType::Integer),
        FieldSpec::required("title", FieldType::Text),
        FieldSpec::required("sponsor_id", FieldType::Integer),
        FieldSpec::optional("primary_sponsor", FieldType::Text),
        FieldSpec::optional("supporter_count", FieldType::Integer),
        FieldSpec::optional("opposer_count", FieldType::Integer),
    ];

    fn from_row(row: &Row) -> Result<Self, RecordError> {
        Ok(Bill {
            id: row.integer("id")?,
            title: row.text("title")?,
            sponsor_id: row.integer("sponsor_id")?,
            primary_sponsor: row.text_or("primary_sponsor", UNKNOWN_SPONSOR),
            supporter_count: count(row, "supporter_count")?,
            opposer_count: count(row, "opposer_count")?,
        })
    }
}

// ============================================================================
// COMPACT REPORT SHAPE
// ============================================================================

/// Bill report row without the raw sponsor id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillCount {
    pub id: RecordId,
    pub title: String,
    pub supporter_count: u64,
    pub opposer_count: u64,
    pub primary_sponsor: String,
}

impl From<&Bill> for BillCount {
    fn from(bill: &Bill) -> Self {
        BillCount {
            id: bill.id,
            title: bill.title.clone(),
            supporter_count: bill.supporter_count,
            opposer_count: bill.opposer_count,
            primary_sponsor: bill.primary_sponsor.clone(),
        }
    }
}
