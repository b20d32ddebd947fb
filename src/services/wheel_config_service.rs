use crate::entities::wheel_config_entity as wheels;
use crate::error::{AppError, AppResult, Resource, ValidationError};
use crate::models::{WheelConfigRequest, WheelConfigResponse, WheelSpinResponse};
use crate::services::{LotteryHistoryService, ensure_found, require_user};
use crate::utils::wheel::SPIN_DURATION_MS;
use crate::utils::{check_option_count, clean_options, require_text, spin};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Clone)]
pub struct WheelConfigService {
    pool: DatabaseConnection,
    history_service: LotteryHistoryService,
}

impl WheelConfigService {
    pub fn new(pool: DatabaseConnection, history_service: LotteryHistoryService) -> Self {
        Self {
            pool,
            history_service,
        }
    }

    /// 轮盘列表（最新创建在前）
    pub async fn list(&self) -> AppResult<Vec<WheelConfigResponse>> {
        let list = wheels::Entity::find()
            .order_by_desc(wheels::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        request: WheelConfigRequest,
        user: Option<&str>,
    ) -> AppResult<WheelConfigResponse> {
        let (name, options, user) = Self::validate(&request, user)?;

        let now = Utc::now();
        let created = wheels::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            options: Set(JsonValue::from(options)),
            created_by: Set(user.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.pool)
        .await?;

        log::info!("Wheel {} created by {}", created.id, user);
        Ok(created.into())
    }

    pub async fn update(
        &self,
        id: Option<&str>,
        request: WheelConfigRequest,
        user: Option<&str>,
    ) -> AppResult<()> {
        let id = require_text(id, ValidationError::WheelIdRequired)?;
        let (name, options, _) = Self::validate(&request, user)?;

        let result = wheels::Entity::update_many()
            .col_expr(wheels::Column::Name, Expr::value(name))
            .col_expr(wheels::Column::Options, Expr::value(JsonValue::from(options)))
            .col_expr(wheels::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(wheels::Column::Id.eq(id.as_str()))
            .exec(&self.pool)
            .await?;

        ensure_found(result.rows_affected, Resource::WheelConfig)?;
        Ok(())
    }

    /// 删除轮盘，已有抽奖历史保留
    pub async fn delete(&self, id: Option<&str>, user: Option<&str>) -> AppResult<()> {
        let id = require_text(id, ValidationError::WheelIdRequired)?;
        let user = require_user(user)?;

        let result = wheels::Entity::delete_by_id(id.clone())
            .exec(&self.pool)
            .await?;

        ensure_found(result.rows_affected, Resource::WheelConfig)?;
        log::info!("Wheel {id} deleted by {user}");
        Ok(())
    }

    /// 服务端抽奖:
    /// 1. 读取轮盘选项
    /// 2. 均匀随机选中一个下标并计算旋转角度
    /// 3. 写入抽奖历史
    pub async fn spin(&self, id: Option<&str>, user: Option<&str>) -> AppResult<WheelSpinResponse> {
        let id = require_text(id, ValidationError::WheelIdRequired)?;
        let user = require_user(user)?;

        let wheel = wheels::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::NotFound(Resource::WheelConfig))?;

        let options = wheel.option_list();
        let outcome = {
            let mut rng = rand::rng();
            spin(&options, &mut rng)
        }
        .ok_or(AppError::ValidationError(ValidationError::TooFewValidOptions))?;

        let record = self
            .history_service
            .record(&wheel, None, &outcome.result, user)
            .await?;

        Ok(WheelSpinResponse {
            index: outcome.index,
            result: outcome.result,
            rotation_degrees: outcome.rotation_degrees,
            duration_ms: SPIN_DURATION_MS,
            record,
        })
    }

    /// 校验顺序：名称 -> 选项数量 -> 用户 -> 有效选项 -> 重复
    fn validate<'a>(
        request: &WheelConfigRequest,
        user: Option<&'a str>,
    ) -> AppResult<(String, Vec<String>, &'a str)> {
        let name = require_text(request.name.as_deref(), ValidationError::WheelNameRequired)?;
        let raw = check_option_count(request.options.as_ref())?;
        let user = require_user(user)?;
        let options = clean_options(raw)?;
        Ok((name, options, user))
    }
}
