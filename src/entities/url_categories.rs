use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

/// 网址分类实体
/// 说明:
/// - urls 为 jsonb 数组，内嵌该分类的全部网址条目（见 models::UrlEntry）
/// - 网址条目的增删改均为对该数组的读-改-写
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "url_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub sort_order: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[sea_orm(column_type = "JsonBinary")]
    pub urls: JsonValue,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
