use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use super::LotteryRecordResponse;
use crate::entities::wheel_config_entity as wheels;

/// 新建 / 编辑轮盘
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WheelConfigRequest {
    #[schema(example = "今晚吃什么")]
    pub name: Option<String>,
    /// 2~12 个互不重复的非空字符串
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub options: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WheelConfigResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub options: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<wheels::Model> for WheelConfigResponse {
    fn from(m: wheels::Model) -> Self {
        let options = m.option_list();
        WheelConfigResponse {
            id: m.id,
            name: m.name,
            options,
            created_by: m.created_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// 服务端抽奖结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WheelSpinResponse {
    /// 抽中的选项下标
    pub index: usize,
    pub result: String,
    /// 轮盘最终顺时针旋转角度（含 5 整圈）
    pub rotation_degrees: f64,
    /// 动画时长（毫秒）
    pub duration_ms: u64,
    pub record: LotteryRecordResponse,
}
