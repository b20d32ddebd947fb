use crate::entities::user_entity as users;
use crate::error::AppResult;
use crate::models::{LoginOutcome, LoginRequest};
use crate::utils::validate_nickname;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 昵称登录：已存在则刷新 updated_at，否则注册新用户
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginOutcome> {
        let nickname = validate_nickname(request.nickname.as_deref())?;

        if let Some(user) = self.touch_existing(&nickname).await? {
            return Ok(LoginOutcome {
                user: user.into(),
                created: false,
            });
        }

        let now = Utc::now();
        let inserted = users::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            nickname: Set(nickname.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.pool)
        .await;

        match inserted {
            Ok(user) => {
                log::info!("Registered new user: {}", user.nickname);
                Ok(LoginOutcome {
                    user: user.into(),
                    created: true,
                })
            }
            Err(e) => {
                // 并发登录同一昵称时唯一索引冲突，按已存在用户处理
                match self.touch_existing(&nickname).await? {
                    Some(user) => Ok(LoginOutcome {
                        user: user.into(),
                        created: false,
                    }),
                    None => Err(e.into()),
                }
            }
        }
    }

    async fn touch_existing(&self, nickname: &str) -> AppResult<Option<users::Model>> {
        let Some(existing) = users::Entity::find()
            .filter(users::Column::Nickname.eq(nickname))
            .one(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let mut am = existing.into_active_model();
        am.updated_at = Set(Utc::now());
        let updated = am.update(&self.pool).await?;
        Ok(Some(updated))
    }
}
