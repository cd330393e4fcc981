// Conversions between unsigned aggregate counters and INTEGER columns

use crate::domain::repositories::RepositoryError;

pub(crate) fn to_column(field: &str, value: u32) -> Result<i32, RepositoryError> {
    i32::try_from(value)
        .map_err(|_| RepositoryError::InvalidRecord(format!("{} out of range: {}", field, value)))
}

pub(crate) fn to_counter(field: &str, value: i32) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::InvalidRecord(format!("{} is negative: {}", field, value)))
}
