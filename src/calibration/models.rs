use crate::common::crud::{require_in_range, require_text};
use crate::common::errors::BusinessResult;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Steps of the calibration workflow, from request (0) to certificate issued (5)
pub const PROGRESS_STEPS: std::ops::RangeInclusive<i32> = 0..=5;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "calibration")]
#[schema(as = CalibrationRecord)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub calibration_id: i32,
    pub tool_name: String,
    pub status: String,
    pub progress_step: i32,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

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
pub struct CalibrationRecordCreate {
    pub tool_name: String,
    pub status: String,
    #[serde(default)]
    pub progress_step: i32,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CalibrationRecordUpdate {
    pub tool_name: Option<String>,
    pub status: Option<String>,
    pub progress_step: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub due_date: Option<Option<NaiveDate>>,
}

fn validate(tool_name: &str, status: &str, progress_step: i32) -> BusinessResult<()> {
    require_text("tool_name", tool_name)?;
    require_text("status", status)?;
    require_in_range("progress_step", progress_step, PROGRESS_STEPS)
}

impl Model {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(&self.tool_name, &self.status, self.progress_step)
    }
}

impl CalibrationRecordCreate {
    pub fn validate(&self) -> BusinessResult<()> {
        validate(&self.tool_name, &self.status, self.progress_step)
    }
}

impl From<CalibrationRecordCreate> for ActiveModel {
    fn from(create: CalibrationRecordCreate) -> Self {
        ActiveModel {
            tool_name: Set(create.tool_name),
            status: Set(create.status),
            progress_step: Set(create.progress_step),
            due_date: Set(create.due_date),
            ..Default::default()
        }
    }
}

impl CalibrationRecordUpdate {
    pub fn merge_into(self, mut model: Model) -> Model {
        if let Some(tool_name) = self.tool_name {
            model.tool_name = tool_name;
        }
        if let Some(status) = self.status {
            model.status = status;
        }
        if let Some(progress_step) = self.progress_step {
            model.progress_step = progress_step;
        }
        if let Some(due_date) = self.due_date {
            model.due_date = due_date;
        }
        model
    }
}
