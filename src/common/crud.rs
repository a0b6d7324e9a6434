//! Row-level helpers shared by the resource handlers.

use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::not_found;
use axum::http::StatusCode;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Iterable, PrimaryKeyTrait};

/// Loads one row by its integer primary key, 404 when it does not exist.
pub async fn find_or_404<E, C>(db: &C, id: i32, resource: &str) -> BusinessResult<E::Model>
where
    C: ConnectionTrait,
    E: EntityTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| e.to_business_error(resource))?
        .ok_or_else(|| not_found!(resource, id))
}

pub async fn delete_or_404<E, C>(db: &C, id: i32, resource: &str) -> BusinessResult<StatusCode>
where
    C: ConnectionTrait,
    E: EntityTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let result = E::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| e.to_business_error(resource))?;

    if result.rows_affected == 0 {
        return Err(not_found!(resource, id));
    }
    tracing::info!(resource, id, "Deleted row");
    Ok(StatusCode::NO_CONTENT)
}

/// Marks every loaded column as changed so an update writes the merged row back.
pub fn mark_all_changed<A>(mut active: A) -> A
where
    A: ActiveModelTrait,
{
    for column in <A::Entity as EntityTrait>::Column::iter() {
        if let Some(value) = active.get(column).into_value() {
            active.set(column, value);
        }
    }
    active
}

/// Rejects blank strings for a required text field.
pub fn require_text(field: &str, value: &str) -> BusinessResult<()> {
    if value.trim().is_empty() {
        return Err(crate::validation_error!(field, "must not be empty"));
    }
    Ok(())
}

pub fn require_in_range(
    field: &str,
    value: i32,
    range: std::ops::RangeInclusive<i32>,
) -> BusinessResult<()> {
    if !range.contains(&value) {
        return Err(crate::validation_error!(
            field,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            )
        ));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: i32) -> BusinessResult<()> {
    if value < 0 {
        return Err(crate::validation_error!(field, "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::errors::BusinessError;

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("name", "Bogie").is_ok());
        assert!(matches!(
            require_text("name", "   "),
            Err(BusinessError::ValidationError { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_range_checks() {
        assert!(require_in_range("progress", 100, 0..=100).is_ok());
        assert!(require_in_range("progress", 101, 0..=100).is_err());
        assert!(require_in_range("progress", -1, 0..=100).is_err());
        assert!(require_non_negative("quantity", 0).is_ok());
        assert!(require_non_negative("quantity", -3).is_err());
    }
}
