use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 抽奖历史实体
/// 说明:
/// - wheel_name 冗余存储轮盘名称快照，轮盘改名或删除后仍可回溯
/// - wheel_config_id 仅在写入时校验存在，不建外键
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "lottery_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub wheel_config_id: String,
    pub wheel_name: String,
    /// 抽中的选项
    #[sea_orm(column_name = "result", column_type = "Text")]
    pub outcome: String,
    pub operated_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
