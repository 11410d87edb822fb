//! The student record entity

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single student data row.
///
/// `id` is assigned by the caller and is the primary key. Every other field
/// is free-form text. Decoding fills absent fields with their zero value, so
/// `{}` is a valid (if empty) record. Table columns use the JSON names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Record {
    pub id: i64,

    #[serde(rename = "name")]
    #[sqlx(rename = "name")]
    pub first_name: String,

    #[serde(rename = "lname")]
    #[sqlx(rename = "lname")]
    pub last_name: String,

    #[serde(rename = "nostudent")]
    #[sqlx(rename = "nostudent")]
    pub student_number: String,

    pub group: String,

    pub branch: String,
}

impl Record {
    /// Replace the id, keeping every other field.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_wire_field_names() {
        let record = Record {
            id: 1,
            first_name: "Ana".into(),
            last_name: "Li".into(),
            student_number: "S100".into(),
            group: "A".into(),
            branch: "CS".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Ana",
                "lname": "Li",
                "nostudent": "S100",
                "group": "A",
                "branch": "CS"
            })
        );
    }

    #[test]
    fn missing_fields_decode_to_zero_values() {
        let record: Record = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(record.first_name, "Ana");
        assert!(record.branch.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record: Record = serde_json::from_str(r#"{"id":7,"extra":true}"#).unwrap();
        assert_eq!(record.id, 7);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"id":"seven"}"#).is_err());
    }
}
