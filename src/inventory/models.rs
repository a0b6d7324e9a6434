use crate::common::crud::{require_non_negative, require_text};
use crate::common::errors::BusinessResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stocked item. Calibration QC entries link here through `KAL-` codes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "inventory")]
#[schema(as = InventoryItem)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub inventory_id: i32,
    pub name: String,
    pub quantity: i32,
    pub location: Option<String>,
    pub status: Option<String>,
    #[sea_orm(unique)]
    pub item_code: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::quality_control::models::Entity")]
    QualityControl,
}

impl Related<crate::quality_control::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityControl.def()
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

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InventoryItemCreate {
    pub name: String,
    #[serde(default)]
    pub quantity: i32,
    pub location: Option<String>,
    pub status: Option<String>,
    pub item_code: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub status: Option<Option<String>>,
    pub item_code: Option<String>,
}

fn validate(name: &str, item_code: &str, quantity: i32) -> BusinessResult<()> {
    require_text("name", name)?;
    require_text("item_code", item_code)?;
    require_non_negative("quantity", quantity)
}

impl Model {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(&self.name, &self.item_code, self.quantity)
    }
}

impl InventoryItemCreate {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(&self.name, &self.item_code, self.quantity)
    }
}

impl From<InventoryItemCreate> for ActiveModel {
    fn from(create: InventoryItemCreate) -> Self {
        ActiveModel {
            name: Set(create.name),
            quantity: Set(create.quantity),
            location: Set(create.location),
            status: Set(create.status),
            item_code: Set(create.item_code),
            ..Default::default()
        }
    }
}

impl InventoryItemUpdate {
    pub fn merge_into(self, mut model: Model) -> Model {
        if let Some(name) = self.name {
            model.name = name;
        }
        if let Some(quantity) = self.quantity {
            model.quantity = quantity;
        }
        if let Some(location) = self.location {
            model.location = location;
        }
        if let Some(status) = self.status {
            model.status = status;
        }
        if let Some(item_code) = self.item_code {
            model.item_code = item_code;
        }
        model
    }
}
