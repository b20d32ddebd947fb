use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::user_entity as users;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "小明")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(m: users::Model) -> Self {
        UserResponse {
            id: m.id,
            nickname: m.nickname,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// 登录结果：是否为首次登录（新建用户）
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserResponse,
    pub created: bool,
}

impl LoginOutcome {
    pub fn message(&self) -> &'static str {
        if self.created { "注册并登录成功" } else { "登录成功" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(created: bool) -> LoginOutcome {
        let now = Utc::now();
        LoginOutcome {
            user: UserResponse {
                id: "u1".to_string(),
                nickname: "小明".to_string(),
                created_at: now,
                updated_at: now,
            },
            created,
        }
    }

    #[test]
    fn test_login_message() {
        assert_eq!(outcome(true).message(), "注册并登录成功");
        assert_eq!(outcome(false).message(), "登录成功");
    }
}
