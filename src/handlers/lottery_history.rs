use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::get_user_from_request;
use crate::models::*;
use crate::services::LotteryHistoryService;

#[utoipa::path(
    get,
    path = "/lottery-history",
    tag = "lottery",
    params(
        ("limit" = Option<String>, Query, description = "返回条数，默认 50，最大 200"),
        ("wheel_config_id" = Option<String>, Query, description = "按轮盘筛选")
    ),
    responses(
        (status = 200, description = "抽奖历史（最新在前）", body = [LotteryRecordResponse])
    )
)]
pub async fn list_lottery_history(
    history_service: web::Data<LotteryHistoryService>,
    query: web::Query<LotteryHistoryQuery>,
) -> Result<HttpResponse> {
    match history_service.list(&query).await {
        Ok(list) => Ok(super::list_response(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/lottery-history",
    tag = "lottery",
    request_body = CreateLotteryRecordRequest,
    params(
        ("X-User-Nickname" = String, Header, description = "URL 编码的用户昵称")
    ),
    responses(
        (status = 200, description = "抽奖记录保存成功", body = LotteryRecordResponse),
        (status = 400, description = "参数错误", body = ApiError),
        (status = 404, description = "轮盘配置不存在", body = ApiError)
    )
)]
pub async fn create_lottery_record(
    history_service: web::Data<LotteryHistoryService>,
    req: HttpRequest,
    request: web::Json<CreateLotteryRecordRequest>,
) -> Result<HttpResponse> {
    let user = get_user_from_request(&req);

    match history_service
        .create(request.into_inner(), user.as_deref())
        .await
    {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            record,
            "抽奖记录保存成功",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn lottery_history_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/lottery-history")
            .route(web::get().to(list_lottery_history))
            .route(web::post().to(create_lottery_record))
            .default_service(web::to(super::method_not_allowed)),
    );
}
