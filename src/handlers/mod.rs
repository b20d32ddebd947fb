pub mod announcement;
pub mod health;
pub mod lottery_history;
pub mod url;
pub mod url_category;
pub mod user;
pub mod wheel_config;

pub use announcement::announcement_config;
pub use health::health_config;
pub use lottery_history::lottery_history_config;
pub use url::url_config;
pub use url_category::url_category_config;
pub use user::user_config;
pub use wheel_config::wheel_config_config;

use crate::error::AppError;
use crate::models::ApiResponse;
use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;

/// 资源上未注册的请求方法
pub async fn method_not_allowed() -> HttpResponse {
    AppError::MethodNotAllowed.error_response()
}

/// 列表查询的成功响应
pub fn list_response<T: Serialize>(list: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success_with_message(list, "获取成功"))
}

/// JSON 请求体解析失败统一返回 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// 挂载全部 `/api/v1` 接口
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(user_config)
        .configure(announcement_config)
        .configure(url_category_config)
        .configure(url_config)
        .configure(wheel_config_config)
        .configure(lottery_history_config);
}

/// 基于未连接数据库的测试应用；只能走到不访问数据库的分支
#[cfg(test)]
macro_rules! init_test_app {
    () => {{
        use crate::services::*;
        use actix_web::{App, test, web};

        let pool = sea_orm::DatabaseConnection::Disconnected;
        let listing = crate::config::ListingConfig::default();
        let history_service = LotteryHistoryService::new(pool.clone(), listing);

        test::init_service(
            App::new()
                .wrap(crate::middlewares::NicknameMiddleware)
                .app_data(crate::handlers::json_config())
                .app_data(crate::handlers::query_config())
                .app_data(web::Data::new(UserService::new(pool.clone())))
                .app_data(web::Data::new(AnnouncementService::new(pool.clone(), listing)))
                .app_data(web::Data::new(UrlCategoryService::new(pool.clone())))
                .app_data(web::Data::new(UrlService::new(pool.clone())))
                .app_data(web::Data::new(WheelConfigService::new(
                    pool.clone(),
                    history_service.clone(),
                )))
                .app_data(web::Data::new(history_service))
                .app_data(web::Data::new(pool))
                .configure(crate::handlers::health_config)
                .service(web::scope("/api/v1").configure(crate::handlers::api_config)),
        )
        .await
    }};
}

#[cfg(test)]
pub(crate) use init_test_app;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use serde_json::Value;

    #[actix_web::test]
    async fn test_list_response_carries_message() {
        let resp = list_response(vec!["a", "b"]);
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "获取成功");
        assert_eq!(value["data"][1], "b");
    }

    #[actix_web::test]
    async fn test_empty_list_keeps_data_field() {
        let resp = list_response(Vec::<String>::new());
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["data"], serde_json::json!([]));
    }
}
