use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::get_user_from_request;
use crate::models::*;
use crate::services::WheelConfigService;

#[utoipa::path(
    get,
    path = "/wheel-configs",
    tag = "lottery",
    responses(
        (status = 200, description = "轮盘列表（最新在前）", body = [WheelConfigResponse])
    )
)]
pub async fn list_wheel_configs(
    wheel_service: web::Data<WheelConfigService>,
) -> Result<HttpResponse> {
    match wheel_service.list().await {
        Ok(list) => Ok(super::list_response(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wheel-configs",
    tag = "lottery",
    request_body = WheelConfigRequest,
    params(
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "轮盘创建成功", body = WheelConfigResponse),
        (status = 400, description = "名称或选项不合法", body = ApiError),
        (status = 401, description = "用户信息缺失", body = ApiError)
    )
)]
pub async fn create_wheel_config(
    wheel_service: web::Data<WheelConfigService>,
    req: HttpRequest,
    request: web::Json<WheelConfigRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match wheel_service
        .create(request.into_inner(), user.as_deref())
        .await
    {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            created,
            "轮盘创建成功",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/wheel-configs",
    tag = "lottery",
    request_body = WheelConfigRequest,
    params(
        ("id" = String, Query, description = "轮盘ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "轮盘更新成功"),
        (status = 404, description = "轮盘配置不存在", body = ApiError)
    )
)]
pub async fn update_wheel_config(
    wheel_service: web::Data<WheelConfigService>,
    req: HttpRequest,
    query: web::Query<IdQuery>,
    request: web::Json<WheelConfigRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match wheel_service
        .update(query.id.as_deref(), request.into_inner(), user.as_deref())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message_only("轮盘更新成功"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/wheel-configs",
    tag = "lottery",
    params(
        ("id" = String, Query, description = "轮盘ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "轮盘删除成功，历史记录保留"),
        (status = 404, description = "轮盘配置不存在", body = ApiError)
    )
)]
pub async fn delete_wheel_config(
    wheel_service: web::Data<WheelConfigService>,
    req: HttpRequest,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match wheel_service
        .delete(query.id.as_deref(), user.as_deref())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message_only("轮盘删除成功"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wheel-configs/spin",
    tag = "lottery",
    params(
        ("id" = String, Query, description = "轮盘ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "抽奖成功，已写入历史", body = WheelSpinResponse),
        (status = 404, description = "轮盘配置不存在", body = ApiError)
    )
)]
pub async fn spin_wheel(
    wheel_service: web::Data<WheelConfigService>,
    req: HttpRequest,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match wheel_service.spin(query.id.as_deref(), user.as_deref()).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            outcome,
            "抽奖成功",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn wheel_config_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/wheel-configs")
            .route(web::get().to(list_wheel_configs))
            .route(web::post().to(create_wheel_config))
            .route(web::put().to(update_wheel_config))
            .route(web::delete().to(delete_wheel_config))
            .default_service(web::to(super::method_not_allowed)),
    )
    .service(
        web::resource("/wheel-configs/spin")
            .route(web::post().to(spin_wheel))
            .default_service(web::to(super::method_not_allowed)),
    );
}

#[cfg(test)]
mod tests {
    use crate::middlewares::NICKNAME_HEADER;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    async fn post_wheel(options: Value, user: Option<&str>) -> (StatusCode, Value) {
        let app = crate::handlers::init_test_app!();
        let mut req = test::TestRequest::post()
            .uri("/api/v1/wheel-configs")
            .set_json(json!({ "name": "今晚吃什么", "options": options }));
        if let Some(user) = user {
            req = req.insert_header((NICKNAME_HEADER, user));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_option_rules() {
        let (status, body) = post_wheel(json!(["火锅"]), Some("bob")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "至少需要2个选项");

        let thirteen: Vec<String> = (0..13).map(|i| format!("选项{i}")).collect();
        let (_, body) = post_wheel(json!(thirteen), Some("bob")).await;
        assert_eq!(body["message"], "选项不能超过12个");

        // 数量校验先于用户校验
        let (status, _) = post_wheel(json!(["火锅", " "]), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, body) = post_wheel(json!(["火锅", " "]), Some("bob")).await;
        assert_eq!(body["message"], "至少需要2个有效选项");

        let (_, body) = post_wheel(json!(["火锅", " 火锅 "]), Some("bob")).await;
        assert_eq!(body["message"], "选项不能重复");
    }

    #[actix_web::test]
    async fn test_spin_requires_id_and_user() {
        let app = crate::handlers::init_test_app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/wheel-configs/spin")
            .insert_header((NICKNAME_HEADER, "bob"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "轮盘ID不能为空");

        let req = test::TestRequest::post()
            .uri("/api/v1/wheel-configs/spin?id=w1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/wheel-configs/spin?id=w1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
