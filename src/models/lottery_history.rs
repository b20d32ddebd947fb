use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::lottery_history_entity as history;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateLotteryRecordRequest {
    pub wheel_config_id: Option<String>,
    /// 缺省时使用轮盘当前名称
    pub wheel_name: Option<String>,
    #[schema(example = "火锅")]
    pub result: Option<String>,
}

/// 抽奖历史查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LotteryHistoryQuery {
    pub limit: Option<String>,
    pub wheel_config_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LotteryRecordResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub wheel_config_id: String,
    pub wheel_name: String,
    pub result: String,
    pub operated_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<history::Model> for LotteryRecordResponse {
    fn from(m: history::Model) -> Self {
        LotteryRecordResponse {
            id: m.id,
            wheel_config_id: m.wheel_config_id,
            wheel_name: m.wheel_name,
            result: m.outcome,
            operated_by: m.operated_by,
            created_at: m.created_at,
        }
    }
}
