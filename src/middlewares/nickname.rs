use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

pub const NICKNAME_HEADER: &str = "X-User-Nickname";

/// 当前请求的用户昵称（已解码、去除首尾空白）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

/// 解析 `X-User-Nickname`，写入请求扩展。
/// 只做身份识别不做拦截，是否必须登录由各业务接口自行判断。
pub struct NicknameMiddleware;

impl<S, B> Transform<S, ServiceRequest> for NicknameMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = NicknameMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(NicknameMiddlewareService { service }))
    }
}

pub struct NicknameMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for NicknameMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            return Box::pin(self.service.call(req));
        }

        let nickname = req
            .headers()
            .get(NICKNAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(decode_nickname);

        if let Some(nickname) = nickname {
            req.extensions_mut().insert(CurrentUser(nickname));
        }

        Box::pin(self.service.call(req))
    }
}

/// 百分号解码后去除空白；解码失败或为空视为未登录
pub fn decode_nickname(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;
    let trimmed = decoded.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 用于获取当前用户昵称的辅助函数
pub fn get_user_from_request(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<CurrentUser>().map(|u| u.0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{TestRequest, call_and_read_body, init_service};
    use actix_web::{App, HttpResponse, web};

    async fn echo(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(get_user_from_request(&req).unwrap_or_else(|| "-".into()))
    }

    #[test]
    fn test_decode_nickname() {
        assert_eq!(decode_nickname("%E5%B0%8F%E6%98%8E").as_deref(), Some("小明"));
        assert_eq!(decode_nickname("%20bob%20").as_deref(), Some("bob"));
        assert_eq!(decode_nickname("%20%20"), None);
        // 非法 UTF-8
        assert_eq!(decode_nickname("%FF%FE"), None);
    }

    #[actix_web::test]
    async fn test_middleware_sets_current_user() {
        let app = init_service(
            App::new()
                .wrap(NicknameMiddleware)
                .route("/", web::get().to(echo)),
        )
        .await;

        let req = TestRequest::get()
            .uri("/")
            .insert_header((NICKNAME_HEADER, "%E5%B0%8F%E7%BA%A2"))
            .to_request();
        let body = call_and_read_body(&app, req).await;
        assert_eq!(&body[..], "小红".as_bytes());

        let req = TestRequest::get().uri("/").to_request();
        let body = call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"-");
    }
}
