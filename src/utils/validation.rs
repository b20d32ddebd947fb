//! 请求字段校验。服务端处理器与 `client` 共用同一套规则。

use crate::error::ValidationError;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const MAX_NICKNAME_LENGTH: usize = 20;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_CONTENT_LENGTH: usize = 1000;
pub const MIN_WHEEL_OPTIONS: usize = 2;
pub const MAX_WHEEL_OPTIONS: usize = 12;

static IPV4_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+$").expect("static regex must compile")
});

/// 去除首尾空白后非空则返回
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 必填文本字段，返回去除首尾空白后的值
pub fn require_text(value: Option<&str>, missing: ValidationError) -> Result<String, ValidationError> {
    non_blank(value).map(str::to_string).ok_or(missing)
}

/// 校验登录昵称（1~20 个字符）
pub fn validate_nickname(nickname: Option<&str>) -> Result<String, ValidationError> {
    let nickname = require_text(nickname, ValidationError::NicknameRequired)?;
    if nickname.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(ValidationError::NicknameTooLong);
    }
    Ok(nickname)
}

/// 校验公告标题与内容，顺序：标题必填 -> 内容必填 -> 标题长度 -> 内容长度
pub fn validate_announcement(
    title: Option<&str>,
    content: Option<&str>,
) -> Result<(String, String), ValidationError> {
    let title = require_text(title, ValidationError::TitleRequired)?;
    let content = require_text(content, ValidationError::ContentRequired)?;

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(ValidationError::ContentTooLong);
    }

    Ok((title, content))
}

fn contains_chinese(value: &str) -> bool {
    value.chars().any(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}

/// 宽松的网址校验：只拒绝明显的纯文本，缺少协议时补全 `https://`
pub fn normalize_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::UrlRequired);
    }

    let has_protocol = url.starts_with("http://") || url.starts_with("https://");
    let has_space = url.contains(' ');
    let has_basic_format =
        url.contains('.') || url.contains(':') || url.contains('/') || has_protocol;

    // 包含空格或中文且没有协议，视为纯文本
    if (has_space || contains_chinese(url)) && !has_protocol {
        return Err(ValidationError::InvalidUrl);
    }

    if !has_basic_format && !url.contains("localhost") && !IPV4_LITERAL.is_match(url) {
        return Err(ValidationError::InvalidUrl);
    }

    if has_protocol {
        Ok(url.to_string())
    } else {
        Ok(format!("https://{url}"))
    }
}

/// 校验原始选项数量（过滤前）：必须是 2~12 项的数组
pub fn check_option_count(options: Option<&JsonValue>) -> Result<&[JsonValue], ValidationError> {
    let items = options
        .and_then(JsonValue::as_array)
        .ok_or(ValidationError::TooFewOptions)?;

    if items.len() < MIN_WHEEL_OPTIONS {
        return Err(ValidationError::TooFewOptions);
    }
    if items.len() > MAX_WHEEL_OPTIONS {
        return Err(ValidationError::TooManyOptions);
    }
    Ok(items.as_slice())
}

/// 过滤出非空字符串选项并去重校验
pub fn clean_options(items: &[JsonValue]) -> Result<Vec<String>, ValidationError> {
    let valid: Vec<String> = items
        .iter()
        .filter_map(JsonValue::as_str)
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect();

    if valid.len() < MIN_WHEEL_OPTIONS {
        return Err(ValidationError::TooFewValidOptions);
    }

    let mut seen = HashSet::with_capacity(valid.len());
    if !valid.iter().all(|option| seen.insert(option.as_str())) {
        return Err(ValidationError::DuplicateOptions);
    }

    Ok(valid)
}
