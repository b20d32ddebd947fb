use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 统一响应包装：`{ success, data, message, error }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// 无返回数据的成功响应（更新 / 删除）
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }
}

/// `?id=` 查询参数
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// `?limit=` 查询参数
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ListQuery {
    pub limit: Option<String>,
}
