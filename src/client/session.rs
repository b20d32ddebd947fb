use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::api::{ApiClient, ClientError, ClientResult};
use crate::utils::MAX_NICKNAME_LENGTH;

/// 本地保存的登录状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub nickname: String,
    pub login_time: DateTime<Utc>,
}

/// 以 JSON 文件保存当前用户
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 文件不存在或内容损坏时视为未登录
    pub fn current_user(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("Ignoring corrupt session file {}: {e}", self.path.display());
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_string(session)?)?;
        Ok(())
    }

    pub fn logout(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// 本地校验昵称 -> 调用登录接口 -> 保存会话，并让 client 之后携带该昵称
    pub async fn login(&self, api: &mut ApiClient, nickname: &str) -> ClientResult<Session> {
        let nickname = check_nickname(nickname)?;
        let user = api.login_user(&nickname).await?;

        let session = Session {
            nickname: user.nickname,
            login_time: Utc::now(),
        };
        self.save(&session)?;
        api.set_user(Some(session.nickname.clone()));
        Ok(session)
    }
}

fn check_nickname(nickname: &str) -> ClientResult<String> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(ClientError::Validation("请输入昵称".to_string()));
    }
    if nickname.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(ClientError::Validation("昵称不能超过20个字符".to_string()));
    }
    Ok(nickname.to_string())
}
