use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 添加 / 编辑网址
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UrlRequest {
    #[schema(example = "教务系统")]
    pub name: Option<String>,
    #[schema(example = "jwc.example.edu.cn")]
    pub url: Option<String>,
}

/// `?categoryId=&urlId=` 查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UrlQuery {
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    #[serde(rename = "urlId")]
    pub url_id: Option<String>,
}
