use std::fmt;

use thiserror::Error;

use crate::domain::entity::DoseDateError;
use crate::domain::repository::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Patient,
    Vaccine,
    Dose,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patient",
            EntityKind::Vaccine => "vaccine",
            EntityKind::Dose => "dose",
        }
    }
}

/// レスポンスのメッセージに使う表示名。
impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Patient => "Patient",
            EntityKind::Vaccine => "Vaccine",
            EntityKind::Dose => "Dose",
        })
    }
}

/// リクエスト単位のエラー。いずれの場合もストアは変更されない。
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl RecordError {
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        RecordError::NotFound { entity, id }
    }
}

impl From<StorageError> for RecordError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ForeignKeyViolation(msg) => RecordError::ConstraintViolation(msg),
            StorageError::Unavailable(msg) => RecordError::StorageUnavailable(msg),
        }
    }
}

impl From<DoseDateError> for RecordError {
    fn from(err: DoseDateError) -> Self {
        RecordError::MalformedInput(format!("dose_date: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = RecordError::not_found(EntityKind::Vaccine, 12);
        assert_eq!(err.to_string(), "Vaccine not found: 12");
    }

    #[test]
    fn test_from_storage_error() {
        let err: RecordError = StorageError::ForeignKeyViolation("fk".to_string()).into();
        assert!(matches!(err, RecordError::ConstraintViolation(msg) if msg == "fk"));

        let err: RecordError = StorageError::Unavailable("down".to_string()).into();
        assert!(matches!(err, RecordError::StorageUnavailable(msg) if msg == "down"));
    }

    #[test]
    fn test_from_dose_date_error() {
        let err: RecordError = DoseDateError("x".to_string()).into();
        match err {
            RecordError::MalformedInput(msg) => {
                assert_eq!(msg, "dose_date: invalid isoformat string: 'x'");
            }
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Patient.to_string(), "Patient");
        assert_eq!(EntityKind::Vaccine.to_string(), "Vaccine");
        assert_eq!(EntityKind::Dose.to_string(), "Dose");
    }

    #[test]
    fn test_entity_kind_as_str() {
        assert_eq!(EntityKind::Patient.as_str(), "patient");
        assert_eq!(EntityKind::Vaccine.as_str(), "vaccine");
        assert_eq!(EntityKind::Dose.as_str(), "dose");
    }
}
