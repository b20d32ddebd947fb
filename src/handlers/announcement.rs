use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::get_user_from_request;
use crate::models::*;
use crate::services::AnnouncementService;
use crate::utils::LimitParams;

#[utoipa::path(
    get,
    path = "/announcements",
    tag = "announcement",
    params(
        ("limit" = Option<String>, Query, description = "返回条数，默认 50，最大 200")
    ),
    responses(
        (status = 200, description = "获取成功", body = [AnnouncementResponse])
    )
)]
pub async fn list_announcements(
    announcement_service: web::Data<AnnouncementService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let params = LimitParams::new(query.limit.as_deref());

    match announcement_service.list(&params).await {
        Ok(list) => Ok(super::list_response(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/announcements",
    tag = "announcement",
    request_body = AnnouncementRequest,
    params(
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "公告发布成功", body = AnnouncementResponse),
        (status = 400, description = "参数错误", body = ApiError),
        (status = 401, description = "用户信息缺失", body = ApiError)
    )
)]
pub async fn create_announcement(
    announcement_service: web::Data<AnnouncementService>,
    req: HttpRequest,
    request: web::Json<AnnouncementRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match announcement_service
        .create(request.into_inner(), user.as_deref())
        .await
    {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            created,
            "公告发布成功",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/announcements",
    tag = "announcement",
    request_body = AnnouncementRequest,
    params(
        ("id" = String, Query, description = "公告ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "公告更新成功"),
        (status = 400, description = "参数错误", body = ApiError),
        (status = 404, description = "公告不存在", body = ApiError)
    )
)]
pub async fn update_announcement(
    announcement_service: web::Data<AnnouncementService>,
    req: HttpRequest,
    query: web::Query<IdQuery>,
    request: web::Json<AnnouncementRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match announcement_service
        .update(query.id.as_deref(), request.into_inner(), user.as_deref())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message_only("公告更新成功"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/announcements",
    tag = "announcement",
    params(
        ("id" = String, Query, description = "公告ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "公告删除成功"),
        (status = 404, description = "公告不存在", body = ApiError)
    )
)]
pub async fn delete_announcement(
    announcement_service: web::Data<AnnouncementService>,
    req: HttpRequest,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match announcement_service
        .delete(query.id.as_deref(), user.as_deref())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message_only("公告删除成功"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn announcement_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/announcements")
            .route(web::get().to(list_announcements))
            .route(web::post().to(create_announcement))
            .route(web::put().to(update_announcement))
            .route(web::delete().to(delete_announcement))
            .default_service(web::to(super::method_not_allowed)),
    );
}

#[cfg(test)]
mod tests {
    use crate::middlewares::NICKNAME_HEADER;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_create_validates_before_user() {
        let app = crate::handlers::init_test_app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/announcements")
            .set_json(json!({ "title": "停水通知" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "公告内容不能为空");

        let req = test::TestRequest::post()
            .uri("/api/v1/announcements")
            .set_json(json!({ "title": "停水通知", "content": "明早 8 点停水" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "USER_REQUIRED");
    }

    #[actix_web::test]
    async fn test_update_requires_id() {
        let app = crate::handlers::init_test_app!();
        let req = test::TestRequest::put()
            .uri("/api/v1/announcements")
            .insert_header((NICKNAME_HEADER, "bob"))
            .set_json(json!({ "title": "t", "content": "c" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "公告ID不能为空");
    }

    #[actix_web::test]
    async fn test_patch_not_allowed() {
        let app = crate::handlers::init_test_app!();
        let req = test::TestRequest::patch()
            .uri("/api/v1/announcements")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
