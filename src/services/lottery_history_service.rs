use crate::config::ListingConfig;
use crate::entities::{lottery_history_entity as history, wheel_config_entity as wheels};
use crate::error::{AppError, AppResult, Resource, ValidationError};
use crate::models::{CreateLotteryRecordRequest, LotteryHistoryQuery, LotteryRecordResponse};
use crate::services::require_user;
use crate::utils::{LimitParams, require_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct LotteryHistoryService {
    pool: DatabaseConnection,
    listing: ListingConfig,
}

impl LotteryHistoryService {
    pub fn new(pool: DatabaseConnection, listing: ListingConfig) -> Self {
        Self { pool, listing }
    }

    /// 抽奖历史（倒序），可按轮盘筛选
    pub async fn list(&self, query: &LotteryHistoryQuery) -> AppResult<Vec<LotteryRecordResponse>> {
        let limit = LimitParams::new(query.limit.as_deref()).get_limit(&self.listing);

        let mut select = history::Entity::find();
        if let Some(wheel_id) = query
            .wheel_config_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            select = select.filter(history::Column::WheelConfigId.eq(wheel_id));
        }

        let list = select
            .order_by_desc(history::Column::CreatedAt)
            .limit(limit)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 保存一次（前端）抽奖结果
    pub async fn create(
        &self,
        request: CreateLotteryRecordRequest,
        user: Option<&str>,
    ) -> AppResult<LotteryRecordResponse> {
        let wheel_id = require_text(
            request.wheel_config_id.as_deref(),
            ValidationError::WheelConfigIdRequired,
        )?;
        let outcome = require_text(request.result.as_deref(), ValidationError::ResultRequired)?;
        let user = require_user(user)?;

        let wheel = wheels::Entity::find_by_id(wheel_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::NotFound(Resource::WheelConfig))?;

        let wheel_name = request
            .wheel_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        self.record(&wheel, wheel_name, &outcome, user).await
    }

    /// 写入抽奖记录；wheel_name 缺省时取轮盘当前名称
    pub(crate) async fn record(
        &self,
        wheel: &wheels::Model,
        wheel_name: Option<&str>,
        outcome: &str,
        operated_by: &str,
    ) -> AppResult<LotteryRecordResponse> {
        let created = history::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            wheel_config_id: Set(wheel.id.clone()),
            wheel_name: Set(wheel_name.unwrap_or(&wheel.name).to_string()),
            outcome: Set(outcome.to_string()),
            operated_by: Set(operated_by.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Lottery on wheel {} by {}: {}",
            created.wheel_config_id,
            created.operated_by,
            created.outcome
        );
        Ok(created.into())
    }
}
