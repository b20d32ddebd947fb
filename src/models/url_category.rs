use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::entities::url_category_entity as categories;
use crate::error::AppResult;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUrlCategoryRequest {
    #[schema(example = "学习")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUrlCategoryRequest {
    pub name: Option<String>,
    /// 数字或数字字符串；null 或无法解析时按 0 写入，缺省时不修改
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub sort_order: Option<JsonValue>,
}

/// 字段出现即为 Some，包括显式 null
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<JsonValue>, D::Error> {
    JsonValue::deserialize(d).map(Some)
}

/// 分类内嵌的网址条目（存储于 url_categories.urls）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UrlEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub sort_order: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UrlCategoryResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub sort_order: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub urls: Vec<UrlEntry>,
}

/// 解析 jsonb 中的网址数组；null 视为空数组
pub fn decode_url_entries(urls: &JsonValue) -> AppResult<Vec<UrlEntry>> {
    if urls.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(urls.clone())?)
}

pub fn encode_url_entries(entries: &[UrlEntry]) -> AppResult<JsonValue> {
    Ok(serde_json::to_value(entries)?)
}

impl TryFrom<categories::Model> for UrlCategoryResponse {
    type Error = crate::error::AppError;

    fn try_from(m: categories::Model) -> Result<Self, Self::Error> {
        let urls = decode_url_entries(&m.urls)?;
        Ok(UrlCategoryResponse {
            id: m.id,
            name: m.name,
            sort_order: m.sort_order,
            created_by: m.created_by,
            created_at: m.created_at,
            urls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_order_null_is_present() {
        let req: UpdateUrlCategoryRequest =
            serde_json::from_value(json!({"name": "a", "sort_order": null})).unwrap();
        assert_eq!(req.sort_order, Some(JsonValue::Null));
        assert_eq!(crate::utils::parse_sort_order(&JsonValue::Null), 0);

        let req: UpdateUrlCategoryRequest = serde_json::from_value(json!({"name": "a"})).unwrap();
        assert_eq!(req.sort_order, None);

        let req: UpdateUrlCategoryRequest =
            serde_json::from_value(json!({"sort_order": "3"})).unwrap();
        assert_eq!(req.sort_order, Some(json!("3")));
    }

    #[test]
    fn test_decode_null_urls() {
        assert!(decode_url_entries(&JsonValue::Null).unwrap().is_empty());
        assert!(decode_url_entries(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_decode_stored_urls() {
        let stored = json!([
            {
                "_id": "u1",
                "name": "教务",
                "url": "https://jw.example.com",
                "created_by": "小明",
                "created_at": "2025-09-01T08:00:00Z"
            },
            {
                "_id": "u2",
                "name": "图书馆",
                "url": "https://lib.example.com",
                "sort_order": 2,
                "created_by": "小红",
                "created_at": "2025-09-02T08:00:00Z"
            }
        ]);

        let entries = decode_url_entries(&stored).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "u1");
        assert_eq!(entries[0].sort_order, 0);
        assert_eq!(entries[1].name, "图书馆");
        assert_eq!(entries[1].sort_order, 2);

        let encoded = encode_url_entries(&entries).unwrap();
        assert_eq!(encoded[1]["_id"], "u2");
    }

    #[test]
    fn test_decode_rejects_malformed_urls() {
        assert!(decode_url_entries(&json!({"not": "an array"})).is_err());
    }
}
