use crate::entities::url_category_entity as categories;
use crate::error::{AppResult, Resource, ValidationError};
use crate::models::{CreateUrlCategoryRequest, UpdateUrlCategoryRequest, UrlCategoryResponse};
use crate::services::{ensure_found, require_user};
use crate::utils::{parse_sort_order, require_text};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::json;
use uuid::Uuid;

#[derive(Clone)]
pub struct UrlCategoryService {
    pool: DatabaseConnection,
}

impl UrlCategoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 全部分类（含内嵌网址），按 sort_order、创建时间升序
    pub async fn list(&self) -> AppResult<Vec<UrlCategoryResponse>> {
        let list = categories::Entity::find()
            .order_by_asc(categories::Column::SortOrder)
            .order_by_asc(categories::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        list.into_iter().map(UrlCategoryResponse::try_from).collect()
    }

    pub async fn create(
        &self,
        request: CreateUrlCategoryRequest,
        user: Option<&str>,
    ) -> AppResult<UrlCategoryResponse> {
        let name = require_text(request.name.as_deref(), ValidationError::CategoryNameRequired)?;
        let user = require_user(user)?;

        let created = categories::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            sort_order: Set(0),
            created_by: Set(user.to_string()),
            created_at: Set(Utc::now()),
            urls: Set(json!([])),
        }
        .insert(&self.pool)
        .await?;

        log::info!("Url category {} created by {}", created.id, user);
        created.try_into()
    }

    pub async fn update(
        &self,
        id: Option<&str>,
        request: UpdateUrlCategoryRequest,
        user: Option<&str>,
    ) -> AppResult<()> {
        let id = require_text(id, ValidationError::CategoryIdRequired)?;
        let name = require_text(request.name.as_deref(), ValidationError::CategoryNameRequired)?;
        require_user(user)?;

        let mut update = categories::Entity::update_many()
            .col_expr(categories::Column::Name, Expr::value(name));
        if let Some(sort_order) = &request.sort_order {
            update = update.col_expr(
                categories::Column::SortOrder,
                Expr::value(parse_sort_order(sort_order)),
            );
        }

        let result = update
            .filter(categories::Column::Id.eq(id.as_str()))
            .exec(&self.pool)
            .await?;

        ensure_found(result.rows_affected, Resource::Category)?;
        Ok(())
    }

    /// 删除分类，内嵌网址一并删除
    pub async fn delete(&self, id: Option<&str>, user: Option<&str>) -> AppResult<()> {
        let id = require_text(id, ValidationError::CategoryIdRequired)?;
        let user = require_user(user)?;

        let result = categories::Entity::delete_by_id(id.clone())
            .exec(&self.pool)
            .await?;

        ensure_found(result.rows_affected, Resource::Category)?;
        log::info!("Url category {id} deleted by {user}");
        Ok(())
    }
}
