use crate::config::ListingConfig;
use crate::entities::announcement_entity as announcements;
use crate::error::{AppResult, Resource, ValidationError};
use crate::models::{AnnouncementRequest, AnnouncementResponse};
use crate::services::{ensure_found, require_user};
use crate::utils::{LimitParams, require_text, validate_announcement};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct AnnouncementService {
    pool: DatabaseConnection,
    listing: ListingConfig,
}

impl AnnouncementService {
    pub fn new(pool: DatabaseConnection, listing: ListingConfig) -> Self {
        Self { pool, listing }
    }

    /// 最新公告在前
    pub async fn list(&self, params: &LimitParams) -> AppResult<Vec<AnnouncementResponse>> {
        let list = announcements::Entity::find()
            .order_by_desc(announcements::Column::CreatedAt)
            .limit(params.get_limit(&self.listing))
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        request: AnnouncementRequest,
        user: Option<&str>,
    ) -> AppResult<AnnouncementResponse> {
        let (title, content) =
            validate_announcement(request.title.as_deref(), request.content.as_deref())?;
        let user = require_user(user)?;

        let now = Utc::now();
        let created = announcements::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(title),
            content: Set(content),
            created_by: Set(user.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.pool)
        .await?;

        log::info!("Announcement {} published by {}", created.id, user);
        Ok(created.into())
    }

    pub async fn update(
        &self,
        id: Option<&str>,
        request: AnnouncementRequest,
        user: Option<&str>,
    ) -> AppResult<()> {
        let id = require_text(id, ValidationError::AnnouncementIdRequired)?;
        let (title, content) =
            validate_announcement(request.title.as_deref(), request.content.as_deref())?;
        require_user(user)?;

        let result = announcements::Entity::update_many()
            .col_expr(announcements::Column::Title, Expr::value(title))
            .col_expr(announcements::Column::Content, Expr::value(content))
            .col_expr(announcements::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(announcements::Column::Id.eq(id.as_str()))
            .exec(&self.pool)
            .await?;

        ensure_found(result.rows_affected, Resource::Announcement)?;
        Ok(())
    }

    pub async fn delete(&self, id: Option<&str>, user: Option<&str>) -> AppResult<()> {
        let id = require_text(id, ValidationError::AnnouncementIdRequired)?;
        let user = require_user(user)?;

        let result = announcements::Entity::delete_by_id(id.clone())
            .exec(&self.pool)
            .await?;

        ensure_found(result.rows_affected, Resource::Announcement)?;
        log::info!("Announcement {id} deleted by {user}");
        Ok(())
    }
}
