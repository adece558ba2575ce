// 🧑‍⚖️ Legislator Entity
// A voting member. The two counters are filled in by the legislator tally.

use serde::Serialize;

use super::RecordId;
use crate::attributes::{FieldSpec, FieldType};
use crate::error::RecordError;
use crate::schema::{Record, Row};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legislator {
    pub id: RecordId,
    pub name: String,
    pub num_supported_bills: u64,
    pub num_opposed_bills: u64,
}

impl Legislator {
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Legislator {
            id,
            name: name.into(),
            num_supported_bills: 0,
            num_opposed_bills: 0,
        }
    }
}

impl Record for Legislator {
    const KIND: &'static str = "Legislator";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldType::Integer),
        FieldSpec::required("name", FieldType::Text),
        FieldSpec::optional("num_supported_bills", FieldType::Integer),
        FieldSpec::optional("num_opposed_bills", FieldType::Integer),
    ];

    fn from_row(row: &Row) -> Result<Self, RecordError> {
        Ok(Legislator {
            id: row.integer("id")?,
            name: row.text("name")?,
            num_supported_bills: count(row, "num_supported_bills")?,
            num_opposed_bills: count(row, "num_opposed_bills")?,
        })
    }
}

/// Optional non-negative counter column, 0 when absent
pub(crate) fn count(row: &Row, field: &str) -> Result<u64, RecordError> {
    let value = row.integer_or(field, 0);
    u64::try_from(value).map_err(|_| RecordError::FieldConversion {
        line: 0,
        field: field.to_string(),
        target: "non-negative integer".to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::FieldValue;

    #[test]
    fn test_legislator_defaults() {
        let legislator = Legislator::new(1, "Alice");

        assert_eq!(legislator.name, "Alice");
        assert_eq!(legislator.num_supported_bills, 0);
        assert_eq!(legislator.num_opposed_bills, 0);
    }

    #[test]
    fn test_legislator_from_row() {
        let mut row = Row::new(Legislator::KIND);
        row.insert("id", FieldValue::Integer(904789));
        row.insert("name", FieldValue::Text("Rep. Don Bacon (R-NE-2)".to_string()));

        let legislator = Legislator::from_row(&row).unwrap();
        assert_eq!(legislator, Legislator::new(904789, "Rep. Don Bacon (R-NE-2)"));
    }

    #[test]
    fn test_negative_counter_is_rejected() {
        let mut row = Row::new(Legislator::KIND);
        row.insert("id", FieldValue::Integer(1));
        row.insert("name", FieldValue::Text("Alice".to_string()));
        row.insert("num_opposed_bills", FieldValue::Integer(-1));

        let err = Legislator::from_row(&row).unwrap_err();
        assert!(matches!(err, RecordError::FieldConversion { ref field, .. } if field == "num_opposed_bills"));
    }
}
