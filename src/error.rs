use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 字段校验失败。Display 为英文描述，`message()` 为前端展示的中文提示。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Nickname is required")]
    NicknameRequired,
    #[error("Nickname too long")]
    NicknameTooLong,
    #[error("Announcement ID is required")]
    AnnouncementIdRequired,
    #[error("Title is required")]
    TitleRequired,
    #[error("Content is required")]
    ContentRequired,
    #[error("Title too long")]
    TitleTooLong,
    #[error("Content too long")]
    ContentTooLong,
    #[error("Category ID is required")]
    CategoryIdRequired,
    #[error("Category name is required")]
    CategoryNameRequired,
    #[error("URL ID is required")]
    UrlIdRequired,
    #[error("URL name is required")]
    UrlNameRequired,
    #[error("URL is required")]
    UrlRequired,
    #[error("Invalid URL format")]
    InvalidUrl,
    #[error("Wheel ID is required")]
    WheelIdRequired,
    #[error("Wheel name is required")]
    WheelNameRequired,
    #[error("At least 2 options required")]
    TooFewOptions,
    #[error("Too many options")]
    TooManyOptions,
    #[error("At least 2 valid options required")]
    TooFewValidOptions,
    #[error("Duplicate options not allowed")]
    DuplicateOptions,
    #[error("Wheel config ID is required")]
    WheelConfigIdRequired,
    #[error("Lottery result is required")]
    ResultRequired,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::NicknameRequired => "昵称不能为空",
            ValidationError::NicknameTooLong => "昵称不能超过20个字符",
            ValidationError::AnnouncementIdRequired => "公告ID不能为空",
            ValidationError::TitleRequired => "公告标题不能为空",
            ValidationError::ContentRequired => "公告内容不能为空",
            ValidationError::TitleTooLong => "标题不能超过100个字符",
            ValidationError::ContentTooLong => "内容不能超过1000个字符",
            ValidationError::CategoryIdRequired => "分类ID不能为空",
            ValidationError::CategoryNameRequired => "分类名称不能为空",
            ValidationError::UrlIdRequired => "网址ID不能为空",
            ValidationError::UrlNameRequired => "网址名称不能为空",
            ValidationError::UrlRequired => "网址链接不能为空",
            ValidationError::InvalidUrl => "请输入有效的网址",
            ValidationError::WheelIdRequired => "轮盘ID不能为空",
            ValidationError::WheelNameRequired => "轮盘名称不能为空",
            ValidationError::TooFewOptions => "至少需要2个选项",
            ValidationError::TooManyOptions => "选项不能超过12个",
            ValidationError::TooFewValidOptions => "至少需要2个有效选项",
            ValidationError::DuplicateOptions => "选项不能重复",
            ValidationError::WheelConfigIdRequired => "轮盘配置ID不能为空",
            ValidationError::ResultRequired => "抽奖结果不能为空",
        }
    }
}

/// 不存在的文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Announcement,
    Category,
    Url,
    WheelConfig,
}

impl Resource {
    pub fn message(&self) -> &'static str {
        match self {
            Resource::Announcement => "公告不存在",
            Resource::Category => "分类不存在",
            Resource::Url => "网址不存在",
            Resource::WheelConfig => "轮盘配置不存在",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Announcement => write!(f, "Announcement not found"),
            Resource::Category => write!(f, "Category not found"),
            Resource::Url => write!(f, "URL not found"),
            Resource::WheelConfig => write!(f, "Wheel config not found"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("User nickname is required")]
    UserRequired,

    #[error("{0}")]
    NotFound(Resource),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// 前端 toast 展示的中文提示
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::ValidationError(v) => v.message(),
            AppError::UserRequired => "用户信息缺失",
            AppError::NotFound(r) => r.message(),
            AppError::BadRequest(_) => "请求格式错误",
            AppError::MethodNotAllowed => "不支持的请求方法",
            _ => "服务器错误",
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::UserRequired => "USER_REQUIRED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UserRequired => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // 内部错误不向外暴露细节
        let detail = match self {
            AppError::ValidationError(v) => {
                log::warn!("Validation error: {v}");
                v.to_string()
            }
            AppError::UserRequired => {
                log::warn!("Request without user nickname");
                self.to_string()
            }
            AppError::NotFound(r) => r.to_string(),
            AppError::BadRequest(msg) => {
                log::warn!("Bad request: {msg}");
                msg.clone()
            }
            AppError::MethodNotAllowed => self.to_string(),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            _ => {
                log::error!("Internal error: {self}");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": self.user_message(),
            "error": {
                "code": self.error_code(),
                "message": detail
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::from(ValidationError::TitleRequired).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::UserRequired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::NotFound(Resource::Url).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::from(sea_orm::DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_validation_error_body() {
        let resp = AppError::from(ValidationError::NicknameTooLong).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "昵称不能超过20个字符");
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(value["error"]["message"], "Nickname too long");
    }

    #[actix_web::test]
    async fn test_database_error_is_masked() {
        let resp = AppError::from(sea_orm::DbErr::Custom("password=hunter2".into()))
            .error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("hunter2"));
        assert!(text.contains("服务器错误"));
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(Resource::Category.message(), "分类不存在");
        assert_eq!(Resource::WheelConfig.to_string(), "Wheel config not found");
    }
}
