use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::UserService;

#[utoipa::path(
    post,
    path = "/users",
    tag = "user",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功 / 注册并登录成功", body = UserResponse),
        (status = 400, description = "昵称为空或过长", body = ApiError)
    )
)]
pub async fn login(
    user_service: web::Data<UserService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match user_service.login(request.into_inner()).await {
        Ok(outcome) => {
            let message = outcome.message();
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(outcome.user, message)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::post().to(login))
            .default_service(web::to(super::method_not_allowed)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_login_validates_nickname() {
        let app = crate::handlers::init_test_app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "nickname": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "昵称不能为空");

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "nickname": "一二三四五六七八九十一二三四五六七八九十一" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "Nickname too long");
    }

    #[actix_web::test]
    async fn test_users_rejects_get() {
        let app = crate::handlers::init_test_app!();
        let req = test::TestRequest::get().uri("/api/v1/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "不支持的请求方法");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = crate::handlers::init_test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{nickname")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "请求格式错误");
    }
}
