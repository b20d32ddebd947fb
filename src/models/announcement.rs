use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::announcement_entity as announcements;

/// 发布 / 编辑公告
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AnnouncementRequest {
    #[schema(example = "停水通知")]
    pub title: Option<String>,
    #[schema(example = "明天上午 9 点到 12 点停水")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnnouncementResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<announcements::Model> for AnnouncementResponse {
    fn from(m: announcements::Model) -> Self {
        AnnouncementResponse {
            id: m.id,
            title: m.title,
            content: m.content,
            created_by: m.created_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
