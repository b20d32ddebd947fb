use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::get_user_from_request;
use crate::models::*;
use crate::services::UrlService;

#[utoipa::path(
    post,
    path = "/urls",
    tag = "url",
    request_body = UrlRequest,
    params(
        ("categoryId" = String, Query, description = "分类ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "网址添加成功", body = UrlEntry),
        (status = 400, description = "参数错误或网址无效", body = ApiError),
        (status = 404, description = "分类不存在", body = ApiError)
    )
)]
pub async fn create_url(
    url_service: web::Data<UrlService>,
    req: HttpRequest,
    query: web::Query<UrlQuery>,
    request: web::Json<UrlRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match url_service
        .create(&query, request.into_inner(), user.as_deref())
        .await
    {
        Ok(entry) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            entry,
            "网址添加成功",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/urls",
    tag = "url",
    request_body = UrlRequest,
    params(
        ("categoryId" = String, Query, description = "分类ID"),
        ("urlId" = String, Query, description = "网址ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "网址更新成功"),
        (status = 404, description = "分类或网址不存在", body = ApiError)
    )
)]
pub async fn update_url(
    url_service: web::Data<UrlService>,
    req: HttpRequest,
    query: web::Query<UrlQuery>,
    request: web::Json<UrlRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match url_service
        .update(&query, request.into_inner(), user.as_deref())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message_only("网址更新成功"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/urls",
    tag = "url",
    params(
        ("categoryId" = String, Query, description = "分类ID"),
        ("urlId" = String, Query, description = "网址ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "网址删除成功"),
        (status = 404, description = "分类或网址不存在", body = ApiError)
    )
)]
pub async fn delete_url(
    url_service: web::Data<UrlService>,
    req: HttpRequest,
    query: web::Query<UrlQuery>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match url_service.delete(&query, user.as_deref()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message_only("网址删除成功"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn url_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/urls")
            .route(web::post().to(create_url))
            .route(web::put().to(update_url))
            .route(web::delete().to(delete_url))
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
    async fn test_create_rejects_invalid_url() {
        let app = crate::handlers::init_test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/urls?categoryId=c1")
            .insert_header((NICKNAME_HEADER, "%E5%B0%8F%E6%98%8E"))
            .set_json(json!({ "name": "教务", "url": "教务 系统" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "请输入有效的网址");
        assert_eq!(body["error"]["message"], "Invalid URL format");
    }

    #[actix_web::test]
    async fn test_update_requires_url_id() {
        let app = crate::handlers::init_test_app!();
        let req = test::TestRequest::put()
            .uri("/api/v1/urls?categoryId=c1")
            .insert_header((NICKNAME_HEADER, "bob"))
            .set_json(json!({ "name": "教务", "url": "jwc.example.edu.cn" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "网址ID不能为空");
    }

    #[actix_web::test]
    async fn test_get_not_allowed() {
        let app = crate::handlers::init_test_app!();
        let req = test::TestRequest::get().uri("/api/v1/urls").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
