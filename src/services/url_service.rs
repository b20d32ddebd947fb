use crate::entities::url_category_entity as categories;
use crate::error::{AppError, AppResult, Resource, ValidationError};
use crate::models::{UrlEntry, UrlQuery, UrlRequest, decode_url_entries, encode_url_entries};
use crate::services::require_user;
use crate::utils::{normalize_url, require_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

/// 分类内嵌网址的增删改
///
/// 网址条目存放在分类文档的 urls 数组中，每次修改都在事务内
/// 锁定分类行后读-改-写整个数组，保证并发写入不会互相覆盖。
#[derive(Clone)]
pub struct UrlService {
    pool: DatabaseConnection,
}

impl UrlService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        query: &UrlQuery,
        request: UrlRequest,
        user: Option<&str>,
    ) -> AppResult<UrlEntry> {
        let category_id =
            require_text(query.category_id.as_deref(), ValidationError::CategoryIdRequired)?;
        let (name, url) = Self::validate_fields(&request)?;
        let user = require_user(user)?;
        let url = normalize_url(&url)?;

        let entry = UrlEntry {
            id: Uuid::new_v4().to_string(),
            name,
            url,
            sort_order: 0,
            created_by: user.to_string(),
            created_at: Utc::now(),
        };

        let pushed = entry.clone();
        self.modify_entries(&category_id, move |entries| {
            append_entry(entries, pushed);
            Ok(())
        })
        .await?;

        log::info!("Url {} added to category {} by {}", entry.id, category_id, user);
        Ok(entry)
    }

    /// 原位替换名称与链接，保留 id、位置、创建信息
    pub async fn update(
        &self,
        query: &UrlQuery,
        request: UrlRequest,
        user: Option<&str>,
    ) -> AppResult<()> {
        let (category_id, url_id) = Self::require_ids(query)?;
        let (name, url) = Self::validate_fields(&request)?;
        require_user(user)?;
        let url = normalize_url(&url)?;

        self.modify_entries(&category_id, |entries| {
            replace_entry(entries, &url_id, name, url)
        })
        .await
    }

    pub async fn delete(&self, query: &UrlQuery, user: Option<&str>) -> AppResult<()> {
        let (category_id, url_id) = Self::require_ids(query)?;
        let user = require_user(user)?;

        self.modify_entries(&category_id, |entries| remove_entry(entries, &url_id))
            .await?;

        log::info!("Url {url_id} removed from category {category_id} by {user}");
        Ok(())
    }

    fn require_ids(query: &UrlQuery) -> AppResult<(String, String)> {
        let category_id =
            require_text(query.category_id.as_deref(), ValidationError::CategoryIdRequired)?;
        let url_id = require_text(query.url_id.as_deref(), ValidationError::UrlIdRequired)?;
        Ok((category_id, url_id))
    }

    fn validate_fields(request: &UrlRequest) -> AppResult<(String, String)> {
        let name = require_text(request.name.as_deref(), ValidationError::UrlNameRequired)?;
        let url = require_text(request.url.as_deref(), ValidationError::UrlRequired)?;
        Ok((name, url))
    }

    /// 锁定分类行，对 urls 数组执行 `f` 后写回；`f` 返回错误时整体回滚
    async fn modify_entries<F>(&self, category_id: &str, f: F) -> AppResult<()>
    where
        F: FnOnce(&mut Vec<UrlEntry>) -> AppResult<()>,
    {
        let txn = self.pool.begin().await?;

        let category = categories::Entity::find_by_id(category_id.to_string())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound(Resource::Category))?;

        let mut entries = decode_url_entries(&category.urls)?;
        f(&mut entries)?;

        let mut am = category.into_active_model();
        am.urls = Set(encode_url_entries(&entries)?);
        am.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}

pub(crate) fn append_entry(entries: &mut Vec<UrlEntry>, entry: UrlEntry) {
    entries.push(entry);
}

/// 原位替换名称与链接，其余字段不动
pub(crate) fn replace_entry(
    entries: &mut [UrlEntry],
    url_id: &str,
    name: String,
    url: String,
) -> AppResult<()> {
    let entry = entries
        .iter_mut()
        .find(|e| e.id == url_id)
        .ok_or(AppError::NotFound(Resource::Url))?;
    entry.name = name;
    entry.url = url;
    Ok(())
}

/// 删除指定网址，其余条目保持原有顺序
pub(crate) fn remove_entry(entries: &mut Vec<UrlEntry>, url_id: &str) -> AppResult<()> {
    let before = entries.len();
    entries.retain(|e| e.id != url_id);
    if entries.len() == before {
        return Err(AppError::NotFound(Resource::Url));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DatabaseConnection;

    fn service() -> UrlService {
        UrlService::new(DatabaseConnection::Disconnected)
    }

    fn query(category: Option<&str>, url: Option<&str>) -> UrlQuery {
        UrlQuery {
            category_id: category.map(str::to_string),
            url_id: url.map(str::to_string),
        }
    }

    fn request(name: Option<&str>, url: Option<&str>) -> UrlRequest {
        UrlRequest {
            name: name.map(str::to_string),
            url: url.map(str::to_string),
        }
    }

    #[actix_web::test]
    async fn test_create_validation_order() {
        let svc = service();

        let err = svc
            .create(&query(None, None), request(None, None), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(ValidationError::CategoryIdRequired)
        ));

        let err = svc
            .create(&query(Some("c1"), None), request(Some("教务"), None), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(ValidationError::UrlRequired)
        ));

        // 用户缺失先于网址格式检查
        let err = svc
            .create(&query(Some("c1"), None), request(Some("x"), Some("hello")), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserRequired));

        let err = svc
            .create(
                &query(Some("c1"), None),
                request(Some("x"), Some("hello")),
                Some("小明"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(ValidationError::InvalidUrl)
        ));
    }

    #[actix_web::test]
    async fn test_update_and_delete_require_url_id() {
        let svc = service();

        let err = svc
            .update(&query(Some("c1"), None), request(Some("a"), Some("a.com")), Some("u"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(ValidationError::UrlIdRequired)
        ));

        let err = svc
            .delete(&query(Some("c1"), Some("u1")), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserRequired));
    }

    fn entry(id: &str, name: &str) -> UrlEntry {
        UrlEntry {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("https://{id}.example.com"),
            sort_order: 0,
            created_by: "小红".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_append_entry_goes_last() {
        let mut entries = vec![entry("a", "教务")];
        append_entry(&mut entries, entry("b", "图书馆"));
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_replace_entry_keeps_position_and_creator() {
        let mut entries = vec![entry("a", "教务"), entry("b", "图书馆"), entry("c", "食堂")];
        let original = entries[1].clone();

        replace_entry(
            &mut entries,
            "b",
            "新图书馆".to_string(),
            "https://lib.example.com".to_string(),
        )
        .unwrap();

        let updated = &entries[1];
        assert_eq!(updated.id, "b");
        assert_eq!(updated.name, "新图书馆");
        assert_eq!(updated.url, "https://lib.example.com");
        assert_eq!(updated.created_by, original.created_by);
        assert_eq!(updated.created_at, original.created_at);
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_remove_entry_keeps_order() {
        let mut entries = vec![entry("a", "1"), entry("b", "2"), entry("c", "3")];
        remove_entry(&mut entries, "b").unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_missing_url_is_not_found() {
        let mut entries = vec![entry("a", "1")];

        let err = replace_entry(&mut entries, "zz", "x".into(), "x.com".into()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(Resource::Url)));
        assert_eq!(err.user_message(), "网址不存在");

        let err = remove_entry(&mut entries, "zz").unwrap_err();
        assert!(matches!(err, AppError::NotFound(Resource::Url)));
        assert_eq!(entries.len(), 1);
    }
}
