use crate::common::crud::{require_non_negative, require_text};
use crate::common::errors::BusinessResult;
use crate::validation_error;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A production run of one product, tracked against a unit target.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "produksi")]
#[schema(as = ProductionRun)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub produksi_id: i32,
    pub name: String,
    pub target: i32,
    pub completed: i32,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// NIPs of assigned staff
    #[schema(value_type = Option<Vec<String>>)]
    pub personnel: Option<Json>,
    #[schema(value_type = Option<Object>)]
    pub materials: Option<Json>,
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
pub struct ProductionRunCreate {
    pub name: String,
    #[serde(default)]
    pub target: i32,
    #[serde(default)]
    pub completed: i32,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub personnel: Option<Vec<String>>,
    #[schema(value_type = Option<Object>)]
    pub materials: Option<Json>,
}

/// Partial update; nullable fields accept an explicit `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductionRunUpdate {
    pub name: Option<String>,
    pub target: Option<i32>,
    pub completed: Option<i32>,
    pub status: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub personnel: Option<Option<Vec<String>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<Object>)]
    pub materials: Option<Option<Json>>,
}

fn personnel_json(personnel: Vec<String>) -> Json {
    Json::from(personnel)
}

fn validate(
    name: &str,
    status: &str,
    target: i32,
    completed: i32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> BusinessResult<()> {
    require_text("name", name)?;
    require_text("status", status)?;
    require_non_negative("target", target)?;
    require_non_negative("completed", completed)?;
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(validation_error!("end_date", "must not be before start_date"));
        }
    }
    Ok(())
}

impl Model {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(
            &self.name,
            &self.status,
            self.target,
            self.completed,
            self.start_date,
            self.end_date,
        )
    }
}

impl ProductionRunCreate {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(
            &self.name,
            &self.status,
            self.target,
            self.completed,
            self.start_date,
            self.end_date,
        )
    }
}

impl From<ProductionRunCreate> for ActiveModel {
    fn from(create: ProductionRunCreate) -> Self {
        ActiveModel {
            name: Set(create.name),
            target: Set(create.target),
            completed: Set(create.completed),
            status: Set(create.status),
            start_date: Set(create.start_date),
            end_date: Set(create.end_date),
            personnel: Set(create.personnel.map(personnel_json)),
            materials: Set(create.materials),
            ..Default::default()
        }
    }
}

impl ProductionRunUpdate {
    pub fn merge_into(self, mut model: Model) -> Model {
        if let Some(name) = self.name {
            model.name = name;
        }
        if let Some(target) = self.target {
            model.target = target;
        }
        if let Some(completed) = self.completed {
            model.completed = completed;
        }
        if let Some(status) = self.status {
            model.status = status;
        }
        if let Some(start_date) = self.start_date {
            model.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            model.end_date = end_date;
        }
        if let Some(personnel) = self.personnel {
            model.personnel = personnel.map(personnel_json);
        }
        if let Some(materials) = self.materials {
            model.materials = materials;
        }
        model
    }
}
