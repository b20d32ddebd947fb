pub mod announcement_service;
pub mod lottery_history_service;
pub mod url_category_service;
pub mod url_service;
pub mod user_service;
pub mod wheel_config_service;

pub use announcement_service::AnnouncementService;
pub use lottery_history_service::LotteryHistoryService;
pub use url_category_service::UrlCategoryService;
pub use url_service::UrlService;
pub use user_service::UserService;
pub use wheel_config_service::WheelConfigService;

use crate::error::{AppError, AppResult, Resource};

/// 写操作要求请求头携带用户昵称（在字段校验之后检查）
pub(crate) fn require_user(user: Option<&str>) -> AppResult<&str> {
    user.filter(|u| !u.trim().is_empty())
        .ok_or(AppError::UserRequired)
}

/// 按 id 更新或删除未命中任何行时返回 404
pub(crate) fn ensure_found(rows_affected: u64, resource: Resource) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(resource));
    }
    Ok(())
}
