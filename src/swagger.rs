use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::login,
        handlers::announcement::list_announcements,
        handlers::announcement::create_announcement,
        handlers::announcement::update_announcement,
        handlers::announcement::delete_announcement,
        handlers::url_category::list_url_categories,
        handlers::url_category::create_url_category,
        handlers::url_category::update_url_category,
        handlers::url_category::delete_url_category,
        handlers::url::create_url,
        handlers::url::update_url,
        handlers::url::delete_url,
        handlers::wheel_config::list_wheel_configs,
        handlers::wheel_config::create_wheel_config,
        handlers::wheel_config::update_wheel_config,
        handlers::wheel_config::delete_wheel_config,
        handlers::wheel_config::spin_wheel,
        handlers::lottery_history::list_lottery_history,
        handlers::lottery_history::create_lottery_record,
    ),
    components(
        schemas(
            LoginRequest,
            UserResponse,
            AnnouncementRequest,
            AnnouncementResponse,
            CreateUrlCategoryRequest,
            UpdateUrlCategoryRequest,
            UrlCategoryResponse,
            UrlEntry,
            UrlRequest,
            WheelConfigRequest,
            WheelConfigResponse,
            WheelSpinResponse,
            CreateLotteryRecordRequest,
            LotteryRecordResponse,
            ApiError,
        )
    ),
    tags(
        (name = "user", description = "Nickname login"),
        (name = "announcement", description = "Dorm announcements"),
        (name = "url", description = "URL categories and bookmarks"),
        (name = "lottery", description = "Wheel configs and lottery history"),
    ),
    info(
        title = "Dorm Backend API",
        version = "1.0.0",
        description = "Dorm utility REST API documentation. Write operations identify the caller via the percent-encoded X-User-Nickname header."
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_resources() {
        let doc = ApiDoc::openapi();
        for path in [
            "/users",
            "/announcements",
            "/url-categories",
            "/urls",
            "/wheel-configs",
            "/wheel-configs/spin",
            "/lottery-history",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
