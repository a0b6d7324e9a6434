use crate::common::crud::{require_non_negative, require_text};
use crate::common::errors::BusinessResult;
use crate::services::department::Department;
use crate::services::frontend_code::encode;
use crate::services::linking_service::{DepartmentLinks, LinkReport};
use crate::services::pass_rate::pass_rate;
use crate::validation_error;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display-code prefix for entries whose stored department is not a known one
pub const FALLBACK_PREFIX: &str = "QC";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "quality_control")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub qc_id: i32,
    pub product_name: String,
    pub batch_code: String,
    pub status: String,
    pub tested_count: i32,
    pub passed_count: i32,
    pub qc_date: NaiveDate,
    pub department: String,
    pub produksi_id: Option<i32>,
    pub overhaul_id: Option<i32>,
    pub rekayasa_id: Option<i32>,
    pub inventory_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::production::models::Entity",
        from = "Column::ProduksiId",
        to = "crate::production::models::Column::ProduksiId",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Production,
    #[sea_orm(
        belongs_to = "crate::overhaul::models::Entity",
        from = "Column::OverhaulId",
        to = "crate::overhaul::models::Column::OverhaulId",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Overhaul,
    #[sea_orm(
        belongs_to = "crate::engineering::models::Entity",
        from = "Column::RekayasaId",
        to = "crate::engineering::models::Column::RekayasaId",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Engineering,
    #[sea_orm(
        belongs_to = "crate::inventory::models::Entity",
        from = "Column::InventoryId",
        to = "crate::inventory::models::Column::InventoryId",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Inventory,
}

impl Related<crate::production::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Production.def()
    }
}

impl Related<crate::overhaul::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Overhaul.def()
    }
}

impl Related<crate::engineering::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Engineering.def()
    }
}

impl Related<crate::inventory::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert {
            self.created_at = Set(now);
        }
        self.last_updated = Set(now);
        Ok(self)
    }
}

impl Model {
    pub fn links(&self) -> DepartmentLinks {
        DepartmentLinks {
            produksi_id: self.produksi_id,
            overhaul_id: self.overhaul_id,
            rekayasa_id: self.rekayasa_id,
            inventory_id: self.inventory_id,
        }
    }

    /// The entry's own code, e.g. `OVH-12`, or `QC-12` for an unknown department
    pub fn display_code(&self) -> String {
        let qc_id = u64::try_from(self.qc_id).unwrap_or_default();
        match Department::from_name(&self.department) {
            Some(department) => encode(department, qc_id),
            None => format!("{FALLBACK_PREFIX}-{qc_id}"),
        }
    }

    pub fn pass_rate(&self) -> u64 {
        pass_rate(
            u32::try_from(self.tested_count).unwrap_or_default(),
            u32::try_from(self.passed_count).unwrap_or_default(),
        )
    }
}

/// Request body for create and update. Updates replace every business field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct QualityControlInput {
    /// Frontend code of the department row this entry inspects, e.g. `PRD-7`
    #[serde(rename = "id")]
    pub frontend_code: Option<String>,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub batch: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tested: i64,
    #[serde(default)]
    pub passed: i64,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub department: String,
}

/// Business fields that passed validation, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub product_name: String,
    pub batch_code: String,
    pub status: String,
    pub tested_count: i32,
    pub passed_count: i32,
    pub qc_date: NaiveDate,
    pub department: Department,
}

fn count(field: &str, value: i64) -> BusinessResult<i32> {
    let value = i32::try_from(value)
        .map_err(|_| validation_error!(field, format!("{value} is out of range")))?;
    require_non_negative(field, value)?;
    Ok(value)
}

impl QualityControlInput {
    /// Checks the entry's own fields. Runs before any linking is attempted.
    pub fn validate(&self) -> BusinessResult<ValidatedEntry> {
        require_text("product", &self.product)?;
        require_text("batch", &self.batch)?;
        require_text("status", &self.status)?;

        let tested_count = count("tested", self.tested)?;
        let passed_count = count("passed", self.passed)?;
        if passed_count > tested_count {
            return Err(validation_error!(
                "passed",
                format!("{passed_count} passed exceeds {tested_count} tested")
            ));
        }

        let qc_date = self
            .date
            .ok_or_else(|| validation_error!("date", "is required"))?;

        let department = Department::from_name(&self.department).ok_or_else(|| {
            validation_error!(
                "department",
                format!(
                    "'{}' is not one of {}",
                    self.department,
                    Department::ALL.map(Department::name).join(", ")
                )
            )
        })?;

        Ok(ValidatedEntry {
            product_name: self.product.clone(),
            batch_code: self.batch.clone(),
            status: self.status.clone(),
            tested_count,
            passed_count,
            qc_date,
            department,
        })
    }

    pub fn frontend_code(&self) -> Option<&str> {
        self.frontend_code.as_deref()
    }
}

impl ValidatedEntry {
    /// Writes the business fields and the resolved links onto `active`
    pub fn apply(self, active: &mut ActiveModel, links: DepartmentLinks) {
        active.product_name = Set(self.product_name);
        active.batch_code = Set(self.batch_code);
        active.status = Set(self.status);
        active.tested_count = Set(self.tested_count);
        active.passed_count = Set(self.passed_count);
        active.qc_date = Set(self.qc_date);
        active.department = Set(self.department.name().to_string());
        active.produksi_id = Set(links.produksi_id);
        active.overhaul_id = Set(links.overhaul_id);
        active.rekayasa_id = Set(links.rekayasa_id);
        active.inventory_id = Set(links.inventory_id);
    }
}

/// Quality-control entry as exchanged with the web UI
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QualityControlEntry {
    /// Display code of this entry
    pub id: String,
    pub qc_id: i32,
    pub product: String,
    pub batch: String,
    pub status: String,
    pub tested: i32,
    pub passed: i32,
    pub date: NaiveDate,
    pub department: String,
    #[serde(rename = "passRate")]
    pub pass_rate: u64,
    pub produksi_id: Option<i32>,
    pub overhaul_id: Option<i32>,
    pub rekayasa_id: Option<i32>,
    pub inventory_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    /// Outcome of resolving the submitted frontend code; only on writes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkReport>,
}

impl From<Model> for QualityControlEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.display_code(),
            pass_rate: model.pass_rate(),
            qc_id: model.qc_id,
            product: model.product_name,
            batch: model.batch_code,
            status: model.status,
            tested: model.tested_count,
            passed: model.passed_count,
            date: model.qc_date,
            department: model.department,
            produksi_id: model.produksi_id,
            overhaul_id: model.overhaul_id,
            rekayasa_id: model.rekayasa_id,
            inventory_id: model.inventory_id,
            created_at: model.created_at,
            last_updated: model.last_updated,
            link: None,
        }
    }
}

impl QualityControlEntry {
    #[must_use]
    pub fn with_link(mut self, report: LinkReport) -> Self {
        self.link = Some(report);
        self
    }
}
