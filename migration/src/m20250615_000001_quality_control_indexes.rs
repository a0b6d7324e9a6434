use super::m20250601_000001_create_maintenance_schema::QualityControl;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, QualityControl); 6] = [
    ("idx_quality_control_department", QualityControl::Department),
    ("idx_quality_control_batch_code", QualityControl::BatchCode),
    ("idx_quality_control_produksi_id", QualityControl::ProduksiId),
    ("idx_quality_control_overhaul_id", QualityControl::OverhaulId),
    ("idx_quality_control_rekayasa_id", QualityControl::RekayasaId),
    ("idx_quality_control_inventory_id", QualityControl::InventoryId),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(QualityControl::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(QualityControl::Table)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
