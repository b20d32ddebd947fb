use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::get_user_from_request;
use crate::models::*;
use crate::services::UrlCategoryService;

#[utoipa::path(
    get,
    path = "/url-categories",
    tag = "url",
    responses(
        (status = 200, description = "分类及其网址", body = [UrlCategoryResponse])
    )
)]
pub async fn list_url_categories(
    category_service: web::Data<UrlCategoryService>,
) -> Result<HttpResponse> {
    match category_service.list().await {
        Ok(list) => Ok(super::list_response(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/url-categories",
    tag = "url",
    request_body = CreateUrlCategoryRequest,
    params(
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "分类创建成功", body = UrlCategoryResponse),
        (status = 400, description = "分类名称不能为空", body = ApiError),
        (status = 401, description = "用户信息缺失", body = ApiError)
    )
)]
pub async fn create_url_category(
    category_service: web::Data<UrlCategoryService>,
    req: HttpRequest,
    request: web::Json<CreateUrlCategoryRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match category_service
        .create(request.into_inner(), user.as_deref())
        .await
    {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            created,
            "分类创建成功",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/url-categories",
    tag = "url",
    request_body = UpdateUrlCategoryRequest,
    params(
        ("id" = String, Query, description = "分类ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "分类更新成功"),
        (status = 404, description = "分类不存在", body = ApiError)
    )
)]
pub async fn update_url_category(
    category_service: web::Data<UrlCategoryService>,
    req: HttpRequest,
    query: web::Query<IdQuery>,
    request: web::Json<UpdateUrlCategoryRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match category_service
        .update(query.id.as_deref(), request.into_inner(), user.as_deref())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message_only("分类更新成功"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/url-categories",
    tag = "url",
    params(
        ("id" = String, Query, description = "分类ID"),
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "分类删除成功（连同其下网址）"),
        (status = 404, description = "分类不存在", body = ApiError)
    )
)]
pub async fn delete_url_category(
    category_service: web::Data<UrlCategoryService>,
    req: HttpRequest,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match category_service
        .delete(query.id.as_deref(), user.as_deref())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message_only("分类删除成功"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn url_category_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/url-categories")
            .route(web::get().to(list_url_categories))
            .route(web::post().to(create_url_category))
            .route(web::put().to(update_url_category))
            .route(web::delete().to(delete_url_category))
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
    async fn test_create_requires_name_then_user() {
        let app = crate::handlers::init_test_app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/url-categories")
            .insert_header((NICKNAME_HEADER, "bob"))
            .set_json(json!({ "name": "  " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "分类名称不能为空");

        let req = test::TestRequest::post()
            .uri("/api/v1/url-categories")
            .set_json(json!({ "name": "学习" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_delete_requires_id() {
        let app = crate::handlers::init_test_app!();
        let req = test::TestRequest::delete()
            .uri("/api/v1/url-categories?id=")
            .insert_header((NICKNAME_HEADER, "bob"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "分类ID不能为空");
    }
}
