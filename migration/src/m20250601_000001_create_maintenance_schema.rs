use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn created_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)] // One table definition per department
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Production runs
        manager
            .create_table(
                Table::create()
                    .table(Produksi::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Produksi::ProduksiId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Produksi::Name).string().not_null())
                    .col(ColumnDef::new(Produksi::Target).integer().not_null().default(0))
                    .col(ColumnDef::new(Produksi::Completed).integer().not_null().default(0))
                    .col(ColumnDef::new(Produksi::Status).string().not_null())
                    .col(ColumnDef::new(Produksi::StartDate).date())
                    .col(ColumnDef::new(Produksi::EndDate).date())
                    .col(ColumnDef::new(Produksi::Personnel).json())
                    .col(ColumnDef::new(Produksi::Materials).json())
                    .col(created_at(Produksi::CreatedAt))
                    .col(created_at(Produksi::LastUpdated))
                    .to_owned(),
            )
            .await?;

        // Overhaul jobs
        manager
            .create_table(
                Table::create()
                    .table(Overhaul::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Overhaul::OverhaulId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Overhaul::Name).string().not_null())
                    .col(ColumnDef::new(Overhaul::Location).string())
                    .col(ColumnDef::new(Overhaul::Status).string().not_null())
                    .col(ColumnDef::new(Overhaul::Estimate).date())
                    .col(ColumnDef::new(Overhaul::Progress).integer().not_null().default(0))
                    .col(created_at(Overhaul::CreatedAt))
                    .col(created_at(Overhaul::LastUpdated))
                    .to_owned(),
            )
            .await?;

        // Engineering projects
        manager
            .create_table(
                Table::create()
                    .table(Rekayasa::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rekayasa::RekayasaId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rekayasa::Name).string().not_null())
                    .col(ColumnDef::new(Rekayasa::Status).string().not_null())
                    .col(ColumnDef::new(Rekayasa::Team).json())
                    .col(ColumnDef::new(Rekayasa::Deadline).date())
                    .col(ColumnDef::new(Rekayasa::Progress).integer().not_null().default(0))
                    .col(created_at(Rekayasa::CreatedAt))
                    .col(created_at(Rekayasa::LastUpdated))
                    .to_owned(),
            )
            .await?;

        // Inventory items, also the link target for calibration QC codes
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inventory::InventoryId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inventory::Name).string().not_null())
                    .col(ColumnDef::new(Inventory::Quantity).integer().not_null().default(0))
                    .col(ColumnDef::new(Inventory::Location).string())
                    .col(ColumnDef::new(Inventory::Status).string())
                    .col(
                        ColumnDef::new(Inventory::ItemCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(created_at(Inventory::CreatedAt))
                    .col(created_at(Inventory::LastUpdated))
                    .to_owned(),
            )
            .await?;

        // Calibration schedule
        manager
            .create_table(
                Table::create()
                    .table(Calibration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Calibration::CalibrationId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Calibration::ToolName).string().not_null())
                    .col(ColumnDef::new(Calibration::Status).string().not_null())
                    .col(
                        ColumnDef::new(Calibration::ProgressStep)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Calibration::DueDate).date())
                    .col(created_at(Calibration::CreatedAt))
                    .col(created_at(Calibration::LastUpdated))
                    .to_owned(),
            )
            .await?;

        // Quality control entries with one optional link per department
        manager
            .create_table(
                Table::create()
                    .table(QualityControl::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QualityControl::QcId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QualityControl::ProductName).string().not_null())
                    .col(ColumnDef::new(QualityControl::BatchCode).string().not_null())
                    .col(ColumnDef::new(QualityControl::Status).string().not_null())
                    .col(
                        ColumnDef::new(QualityControl::TestedCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(QualityControl::PassedCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(QualityControl::QcDate).date().not_null())
                    .col(ColumnDef::new(QualityControl::Department).string().not_null())
                    .col(ColumnDef::new(QualityControl::ProduksiId).integer())
                    .col(ColumnDef::new(QualityControl::OverhaulId).integer())
                    .col(ColumnDef::new(QualityControl::RekayasaId).integer())
                    .col(ColumnDef::new(QualityControl::InventoryId).integer())
                    .col(created_at(QualityControl::CreatedAt))
                    .col(created_at(QualityControl::LastUpdated))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quality_control_produksi_id")
                            .from(QualityControl::Table, QualityControl::ProduksiId)
                            .to(Produksi::Table, Produksi::ProduksiId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quality_control_overhaul_id")
                            .from(QualityControl::Table, QualityControl::OverhaulId)
                            .to(Overhaul::Table, Overhaul::OverhaulId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quality_control_rekayasa_id")
                            .from(QualityControl::Table, QualityControl::RekayasaId)
                            .to(Rekayasa::Table, Rekayasa::RekayasaId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quality_control_inventory_id")
                            .from(QualityControl::Table, QualityControl::InventoryId)
                            .to(Inventory::Table, Inventory::InventoryId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(QualityControl::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Calibration::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rekayasa::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Overhaul::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Produksi::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Produksi {
    Table,
    ProduksiId,
    Name,
    Target,
    Completed,
    Status,
    StartDate,
    EndDate,
    Personnel,
    Materials,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Overhaul {
    Table,
    OverhaulId,
    Name,
    Location,
    Status,
    Estimate,
    Progress,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Rekayasa {
    Table,
    RekayasaId,
    Name,
    Status,
    Team,
    Deadline,
    Progress,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    InventoryId,
    Name,
    Quantity,
    Location,
    Status,
    ItemCode,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Calibration {
    Table,
    CalibrationId,
    ToolName,
    Status,
    ProgressStep,
    DueDate,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
pub(crate) enum QualityControl {
    Table,
    QcId,
    ProductName,
    BatchCode,
    Status,
    TestedCount,
    PassedCount,
    QcDate,
    Department,
    ProduksiId,
    OverhaulId,
    RekayasaId,
    InventoryId,
    CreatedAt,
    LastUpdated,
}
