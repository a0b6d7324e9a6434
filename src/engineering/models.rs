use crate::common::crud::{require_in_range, require_text};
use crate::common::errors::BusinessResult;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An engineering (rekayasa) project.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "rekayasa")]
#[schema(as = EngineeringProject)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rekayasa_id: i32,
    pub name: String,
    pub status: String,
    #[schema(value_type = Option<Vec<String>>)]
    pub team: Option<Json>,
    pub deadline: Option<NaiveDate>,
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

impl Model {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(&self.name, &self.status, self.progress)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EngineeringProjectCreate {
    pub name: String,
    pub status: String,
    pub team: Option<Vec<String>>,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub progress: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EngineeringProjectUpdate {
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub team: Option<Option<Vec<String>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub deadline: Option<Option<NaiveDate>>,
    pub progress: Option<i32>,
}

fn validate(name: &str, status: &str, progress: i32) -> BusinessResult<()> {
    require_text("name", name)?;
    require_text("status", status)?;
    require_in_range("progress", progress, 0..=100)
}

impl EngineeringProjectCreate {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(&self.name, &self.status, self.progress)
    }
}

impl From<EngineeringProjectCreate> for ActiveModel {
    fn from(create: EngineeringProjectCreate) -> Self {
        ActiveModel {
            name: Set(create.name),
            status: Set(create.status),
            team: Set(create.team.map(Json::from)),
            deadline: Set(create.deadline),
            progress: Set(create.progress),
            ..Default::default()
        }
    }
}

impl EngineeringProjectUpdate {
    pub fn merge_into(self, mut model: Model) -> Model {
        if let Some(name) = self.name {
            model.name = name;
        }
        if let Some(status) = self.status {
            model.status = status;
        }
        if let Some(team) = self.team {
            model.team = team.map(Json::from);
        }
        if let Some(deadline) = self.deadline {
            model.deadline = deadline;
        }
        if let Some(progress) = self.progress {
            model.progress = progress;
        }
        model
    }
}
