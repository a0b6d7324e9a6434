use super::department::{BackingTable, Department};
use super::frontend_code::CodeError;
use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{ConnectionTrait, DbErr};
use thiserror::Error;

/// Single-row probe against one department table.
#[async_trait]
pub trait PrimaryKeyLookup: Send + Sync {
    async fn find_primary_key_by_numeric_id(
        &self,
        table: BackingTable,
        numeric_id: u64,
    ) -> Result<Option<i32>, DbErr>;
}

/// Lookup over any sea-orm connection, including an open transaction.
pub struct SeaOrmLookup<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> SeaOrmLookup<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c, C> PrimaryKeyLookup for SeaOrmLookup<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_primary_key_by_numeric_id(
        &self,
        table: BackingTable,
        numeric_id: u64,
    ) -> Result<Option<i32>, DbErr> {
        // Primary keys are 32-bit, so a larger number cannot match any row
        let Ok(id) = i32::try_from(numeric_id) else {
            return Ok(None);
        };

        let statement = Query::select()
            .column(Alias::new(table.primary_key))
            .from(Alias::new(table.table))
            .and_where(Expr::col(Alias::new(table.primary_key)).eq(id))
            .limit(1)
            .to_owned();

        let backend = self.conn.get_database_backend();
        let row = self.conn.query_one(backend.build(&statement)).await?;

        row.map(|row| row.try_get::<i32>("", table.primary_key))
            .transpose()
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Code(#[from] CodeError),
    #[error("storage error while resolving frontend code: {0}")]
    Storage(#[from] DbErr),
}

/// A recognised department and, when the row exists, its primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub department: Department,
    pub primary_key: Option<i32>,
}

/// Maps `prefix` to its department and probes that department's table.
///
/// The numeric id is used directly as the primary key of the backing table,
/// not as a separate display sequence. A missing row is a valid miss
/// (`primary_key: None`), not an error.
pub async fn resolve<L>(
    lookup: &L,
    prefix: &str,
    numeric_id: u64,
) -> Result<Resolution, ResolveError>
where
    L: PrimaryKeyLookup + ?Sized,
{
    let department = Department::from_prefix(prefix)?;
    let primary_key = lookup
        .find_primary_key_by_numeric_id(department.backing_table(), numeric_id)
        .await?;

    Ok(Resolution {
        department,
        primary_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_helpers::setup_test_db;
    use crate::services::test_support::FakeLookup;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set};

    #[tokio::test]
    async fn test_resolve_found_row() {
        let lookup = FakeLookup::default().with_row(Department::Overhaul, 12);

        let resolution = resolve(&lookup, "OVH", 12).await.unwrap();
        assert_eq!(
            resolution,
            Resolution {
                department: Department::Overhaul,
                primary_key: Some(12),
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_row_is_not_an_error() {
        let lookup = FakeLookup::default().with_row(Department::Overhaul, 12);

        let resolution = resolve(&lookup, "ovh", 13).await.unwrap();
        assert_eq!(resolution.department, Department::Overhaul);
        assert_eq!(resolution.primary_key, None);
    }

    #[tokio::test]
    async fn test_resolve_unknown_prefix() {
        let lookup = FakeLookup::default();

        let err = resolve(&lookup, "XYZ", 3).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Code(CodeError::UnknownDepartment(prefix)) if prefix == "XYZ"
        ));
        assert_eq!(lookup.probe_count(), 0, "unknown prefixes must not hit storage");
    }

    #[tokio::test]
    async fn test_resolve_propagates_storage_faults() {
        let lookup = FakeLookup::failing();

        let err = resolve(&lookup, "PRD", 1).await.unwrap_err();
        assert!(matches!(err, ResolveError::Storage(_)));
    }

    #[tokio::test]
    async fn test_sea_orm_lookup_probes_primary_key() {
        let db = setup_test_db().await;
        let run = crate::production::models::ActiveModel {
            name: Set("Radio Lokomotif".to_string()),
            target: Set(10),
            completed: Set(4),
            status: Set("Berjalan".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let lookup = SeaOrmLookup::new(&db);
        let table = Department::Production.backing_table();
        let found_id = u64::try_from(run.produksi_id).unwrap();

        assert_eq!(
            lookup
                .find_primary_key_by_numeric_id(table, found_id)
                .await
                .unwrap(),
            Some(run.produksi_id)
        );
        assert_eq!(
            lookup
                .find_primary_key_by_numeric_id(table, found_id + 100)
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            lookup
                .find_primary_key_by_numeric_id(table, u64::MAX)
                .await
                .unwrap(),
            None
        );
    }
}
