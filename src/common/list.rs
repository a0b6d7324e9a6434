//! react-admin style list parameters shared by every resource router.
//!
//! `filter`, `range` and `sort` arrive as JSON-encoded query strings, and
//! list responses carry a `Content-Range` header with the total row count.

use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::validation_error;
use axum::http::{HeaderMap, HeaderValue, header};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: u64 = 25;
pub const MAX_PAGE_SIZE: u64 = 1000;

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// JSON object of column equality filters, e.g. `{"status":"Lulus"}`
    pub filter: Option<String>,
    /// Inclusive row range, e.g. `[0,24]`
    pub range: Option<String>,
    /// Column and direction, e.g. `["qc_date","DESC"]`
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn offset_and_limit(&self) -> BusinessResult<(u64, u64)> {
        let Some(range) = &self.range else {
            return Ok((0, DEFAULT_PAGE_SIZE));
        };
        let (start, end): (u64, u64) = serde_json::from_str(range)
            .map_err(|_| validation_error!("range", "expected [start,end]"))?;
        let span = end
            .checked_sub(start)
            .ok_or_else(|| validation_error!("range", "end must not be before start"))?;
        let limit = span
            .checked_add(1)
            .ok_or_else(|| validation_error!("range", "range is too large"))?;
        Ok((start, limit.min(MAX_PAGE_SIZE)))
    }

    pub fn order<C>(&self, default_column: C) -> BusinessResult<(C, Order)>
    where
        C: ColumnTrait + FromStr,
    {
        let Some(sort) = &self.sort else {
            return Ok((default_column, Order::Asc));
        };
        let (column, direction): (String, String) = serde_json::from_str(sort)
            .map_err(|_| validation_error!("sort", "expected [\"column\",\"ASC|DESC\"]"))?;
        let column = C::from_str(&column)
            .map_err(|_| validation_error!("sort", format!("unknown column '{column}'")))?;
        let order = if direction.eq_ignore_ascii_case("desc") {
            Order::Desc
        } else if direction.eq_ignore_ascii_case("asc") {
            Order::Asc
        } else {
            return Err(validation_error!(
                "sort",
                format!("unknown direction '{direction}'")
            ));
        };
        Ok((column, order))
    }

    pub fn condition<C>(&self) -> BusinessResult<Condition>
    where
        C: ColumnTrait + FromStr,
    {
        let Some(filter) = &self.filter else {
            return Ok(Condition::all());
        };
        let filters: Map<String, Value> = serde_json::from_str(filter)
            .map_err(|_| validation_error!("filter", "expected a JSON object"))?;

        let mut condition = Condition::all();
        for (key, value) in filters {
            let column = C::from_str(&key)
                .map_err(|_| validation_error!("filter", format!("unknown column '{key}'")))?;
            condition = condition.add(match value {
                Value::Null => column.is_null(),
                Value::Bool(flag) => column.eq(flag),
                Value::String(text) => column.eq(text),
                Value::Number(number) => match number.as_i64() {
                    Some(int) => column.eq(int),
                    None => column.eq(number.as_f64().unwrap_or_default()),
                },
                Value::Array(_) | Value::Object(_) => {
                    return Err(validation_error!(
                        "filter",
                        format!("unsupported value for '{key}'")
                    ));
                }
            });
        }
        Ok(condition)
    }
}

/// One page of rows plus what is needed to build `Content-Range`
#[derive(Debug)]
pub struct Page<M> {
    pub items: Vec<M>,
    pub start: u64,
    pub total: u64,
}

impl<M> Page<M> {
    pub fn content_range(&self, resource: &str) -> HeaderMap {
        let end = self.start + (self.items.len() as u64).saturating_sub(1);
        let mut headers = HeaderMap::new();
        if let Ok(value) =
            HeaderValue::from_str(&format!("{resource} {}-{end}/{}", self.start, self.total))
        {
            headers.insert(header::CONTENT_RANGE, value);
        }
        headers
    }

    pub fn map<T>(self, f: impl FnMut(M) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            start: self.start,
            total: self.total,
        }
    }
}

pub async fn fetch_page<E, C>(
    db: &C,
    query: &ListQuery,
    default_order: E::Column,
    context: &str,
) -> BusinessResult<Page<E::Model>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Column: FromStr,
    E::Model: Sync + 'static,
{
    let condition = query.condition::<E::Column>()?;
    let (order_column, order_direction) = query.order(default_order)?;
    let (offset, limit) = query.offset_and_limit()?;

    let total = E::find()
        .filter(condition.clone())
        .count(db)
        .await
        .map_err(|e| e.to_business_error(context))?;

    let items = E::find()
        .filter(condition)
        .order_by(order_column, order_direction)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| e.to_business_error(context))?;

    Ok(Page {
        items,
        start: offset,
        total,
    })
}
