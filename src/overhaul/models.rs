use crate::common::crud::{require_in_range, require_text};
use crate::common::errors::BusinessResult;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "overhaul")]
#[schema(as = OverhaulJob)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub overhaul_id: i32,
    pub name: String,
    /// Workshop or depot where the job runs
    pub location: Option<String>,
    pub status: String,
    /// Expected completion date
    pub estimate: Option<NaiveDate>,
    /// Percent complete, 0-100
    pub progress: i32,
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
pub struct OverhaulJobCreate {
    pub name: String,
    pub location: Option<String>,
    pub status: String,
    pub estimate: Option<NaiveDate>,
    #[serde(default)]
    pub progress: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OverhaulJobUpdate {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub estimate: Option<Option<NaiveDate>>,
    pub progress: Option<i32>,
}

fn validate(name: &str, status: &str, progress: i32) -> BusinessResult<()> {
    require_text("name", name)?;
    require_text("status", status)?;
    require_in_range("progress", progress, 0..=100)
}

impl Model {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(&self.name, &self.status, self.progress)
    }
}

impl OverhaulJobCreate {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(&self.name, &self.status, self.progress)
    }
}

impl From<OverhaulJobCreate> for ActiveModel {
    fn from(create: OverhaulJobCreate) -> Self {
        ActiveModel {
            name: Set(create.name),
            location: Set(create.location),
            status: Set(create.status),
            estimate: Set(create.estimate),
            progress: Set(create.progress),
            ..Default::default()
        }
    }
}

impl OverhaulJobUpdate {
    pub fn merge_into(self, mut model: Model) -> Model {
        if let Some(name) = self.name {
            model.name = name;
        }
        if let Some(location) = self.location {
            model.location = location;
        }
        if let Some(status) = self.status {
            model.status = status;
        }
        if let Some(estimate) = self.estimate {
            model.estimate = estimate;
        }
        if let Some(progress) = self.progress {
            model.progress = progress;
        }
        model
    }
}
