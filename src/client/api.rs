use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};
use thiserror::Error;

use crate::middlewares::NICKNAME_HEADER;
use crate::models::*;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("网络连接失败，请检查网络后重试: {0}")]
    Http(#[from] reqwest::Error),

    /// 服务端返回 success: false
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("服务器返回了无效的响应格式")]
    InvalidResponse,

    /// 本地校验失败
    #[error("{0}")]
    Validation(String),

    #[error("会话文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

/// 后端接口封装；设置昵称后写操作自动携带 `X-User-Nickname`
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    nickname: Option<String>,
}

impl ApiClient {
    /// base_url 形如 `http://localhost:8080/api/v1`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            nickname: None,
        }
    }

    pub fn with_user(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn set_user(&mut self, nickname: Option<String>) {
        self.nickname = nickname;
    }

    pub fn user(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&JsonValue>,
    ) -> ClientResult<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(nickname) = &self.nickname {
            builder = builder.header(NICKNAME_HEADER, urlencoding::encode(nickname).into_owned());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        unwrap_envelope(status, &text)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&JsonValue>,
    ) -> ClientResult<T> {
        self.request(method, path, query, body)
            .await?
            .ok_or(ClientError::InvalidResponse)
    }

    /// 无返回数据的写操作
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&JsonValue>,
    ) -> ClientResult<()> {
        self.request::<JsonValue>(method, path, query, body)
            .await
            .map(|_| ())
    }

    // 用户

    pub async fn login_user(&self, nickname: &str) -> ClientResult<UserResponse> {
        let body = json!({ "nickname": nickname });
        self.fetch(Method::POST, "/users", &[], Some(&body)).await
    }

    // 网址分类

    pub async fn get_url_categories(&self) -> ClientResult<Vec<UrlCategoryResponse>> {
        self.fetch(Method::GET, "/url-categories", &[], None).await
    }

    pub async fn create_url_category(&self, name: &str) -> ClientResult<UrlCategoryResponse> {
        let body = json!({ "name": name });
        self.fetch(Method::POST, "/url-categories", &[], Some(&body))
            .await
    }

    pub async fn update_url_category(
        &self,
        id: &str,
        name: &str,
        sort_order: Option<i32>,
    ) -> ClientResult<()> {
        let mut body = json!({ "name": name });
        if let Some(order) = sort_order {
            body["sort_order"] = json!(order);
        }
        self.execute(Method::PUT, "/url-categories", &[("id", id)], Some(&body))
            .await
    }

    pub async fn delete_url_category(&self, id: &str) -> ClientResult<()> {
        self.execute(Method::DELETE, "/url-categories", &[("id", id)], None)
            .await
    }

    // 网址

    pub async fn create_url(
        &self,
        category_id: &str,
        name: &str,
        url: &str,
    ) -> ClientResult<UrlEntry> {
        let body = json!({ "name": name, "url": url });
        self.fetch(
            Method::POST,
            "/urls",
            &[("categoryId", category_id)],
            Some(&body),
        )
        .await
    }

    pub async fn update_url(
        &self,
        category_id: &str,
        url_id: &str,
        name: &str,
        url: &str,
    ) -> ClientResult<()> {
        let body = json!({ "name": name, "url": url });
        self.execute(
            Method::PUT,
            "/urls",
            &[("categoryId", category_id), ("urlId", url_id)],
            Some(&body),
        )
        .await
    }

    pub async fn delete_url(&self, category_id: &str, url_id: &str) -> ClientResult<()> {
        self.execute(
            Method::DELETE,
            "/urls",
            &[("categoryId", category_id), ("urlId", url_id)],
            None,
        )
        .await
    }

    // 公告

    pub async fn get_announcements(
        &self,
        limit: Option<u64>,
    ) -> ClientResult<Vec<AnnouncementResponse>> {
        let limit = limit.map(|l| l.to_string());
        let query: Vec<(&str, &str)> = limit.iter().map(|l| ("limit", l.as_str())).collect();
        self.fetch(Method::GET, "/announcements", &query, None).await
    }

    pub async fn create_announcement(
        &self,
        title: &str,
        content: &str,
    ) -> ClientResult<AnnouncementResponse> {
        let body = json!({ "title": title, "content": content });
        self.fetch(Method::POST, "/announcements", &[], Some(&body))
            .await
    }

    pub async fn update_announcement(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> ClientResult<()> {
        let body = json!({ "title": title, "content": content });
        self.execute(Method::PUT, "/announcements", &[("id", id)], Some(&body))
            .await
    }

    pub async fn delete_announcement(&self, id: &str) -> ClientResult<()> {
        self.execute(Method::DELETE, "/announcements", &[("id", id)], None)
            .await
    }

    // 轮盘

    pub async fn get_wheel_configs(&self) -> ClientResult<Vec<WheelConfigResponse>> {
        self.fetch(Method::GET, "/wheel-configs", &[], None).await
    }

    pub async fn create_wheel_config(
        &self,
        name: &str,
        options: &[String],
    ) -> ClientResult<WheelConfigResponse> {
        let body = json!({ "name": name, "options": options });
        self.fetch(Method::POST, "/wheel-configs", &[], Some(&body))
            .await
    }

    pub async fn update_wheel_config(
        &self,
        id: &str,
        name: &str,
        options: &[String],
    ) -> ClientResult<()> {
        let body = json!({ "name": name, "options": options });
        self.execute(Method::PUT, "/wheel-configs", &[("id", id)], Some(&body))
            .await
    }

    pub async fn delete_wheel_config(&self, id: &str) -> ClientResult<()> {
        self.execute(Method::DELETE, "/wheel-configs", &[("id", id)], None)
            .await
    }

    /// 由服务端抽奖并记录
    pub async fn spin_wheel(&self, id: &str) -> ClientResult<WheelSpinResponse> {
        self.fetch(Method::POST, "/wheel-configs/spin", &[("id", id)], None)
            .await
    }

    // 抽奖历史

    pub async fn get_lottery_history(
        &self,
        limit: Option<u64>,
        wheel_config_id: Option<&str>,
    ) -> ClientResult<Vec<LotteryRecordResponse>> {
        let limit = limit.map(|l| l.to_string());
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(limit) = &limit {
            query.push(("limit", limit));
        }
        if let Some(wheel_id) = wheel_config_id {
            query.push(("wheel_config_id", wheel_id));
        }
        self.fetch(Method::GET, "/lottery-history", &query, None)
            .await
    }

    pub async fn create_lottery_record(
        &self,
        wheel_config_id: &str,
        wheel_name: &str,
        result: &str,
    ) -> ClientResult<LotteryRecordResponse> {
        let body = json!({
            "wheel_config_id": wheel_config_id,
            "wheel_name": wheel_name,
            "result": result,
        });
        self.fetch(Method::POST, "/lottery-history", &[], Some(&body))
            .await
    }
}

/// 解析统一响应包装，`success: false` 转为错误
pub fn unwrap_envelope<T: DeserializeOwned>(status: StatusCode, text: &str) -> ClientResult<Option<T>> {
    let envelope: ApiResponse<T> =
        serde_json::from_str(text).map_err(|_| ClientError::InvalidResponse)?;

    if !envelope.success {
        let message = envelope
            .message
            .or_else(|| envelope.error.map(|e| e.message))
            .unwrap_or_else(|| "操作失败".to_string());
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_success() {
        let data: Option<Vec<String>> = unwrap_envelope(
            StatusCode::OK,
            r#"{"success":true,"data":["a","b"],"message":"获取成功"}"#,
        )
        .unwrap();
        assert_eq!(data, Some(vec!["a".to_string(), "b".to_string()]));

        let none: Option<JsonValue> =
            unwrap_envelope(StatusCode::OK, r#"{"success":true,"message":"公告删除成功"}"#).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_unwrap_failure_uses_message() {
        let err = unwrap_envelope::<JsonValue>(
            StatusCode::NOT_FOUND,
            r#"{"success":false,"message":"公告不存在","error":{"code":"NOT_FOUND","message":"Announcement not found"}}"#,
        )
        .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "公告不存在");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unwrap_failure_falls_back_to_error_detail() {
        let err = unwrap_envelope::<JsonValue>(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"error":{"code":"BAD_REQUEST","message":"bad"}}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "bad");
    }

    #[test]
    fn test_unwrap_rejects_non_json() {
        let err = unwrap_envelope::<JsonValue>(StatusCode::BAD_GATEWAY, "<html>").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/v1/").with_user("小明");
        assert_eq!(client.base_url, "http://localhost:8080/api/v1");
        assert_eq!(client.user(), Some("小明"));
    }
}
