//! 列表条数与宽松整数解析

use crate::config::ListingConfig;
use serde_json::Value as JsonValue;

#[derive(Debug, Default)]
pub struct LimitParams {
    /// 原样保存，非数字时回退默认值
    pub limit: Option<String>,
}

impl LimitParams {
    pub fn new(limit: Option<&str>) -> Self {
        Self {
            limit: limit.map(str::to_string),
        }
    }

    /// 缺失、非数字或 <= 0 时使用默认值；结果不超过上限
    pub fn get_limit(&self, cfg: &ListingConfig) -> u64 {
        let limit = match self.limit.as_deref().and_then(parse_leading_int) {
            Some(n) if n > 0 => n as u64,
            _ => cfg.default_limit,
        };
        limit.min(cfg.max_limit)
    }
}

/// 解析字符串开头的整数（允许前导空白与正负号），如 "12abc" -> 12
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|n| n.saturating_mul(sign))
}

/// 分类排序值：数字或数字字符串取整数部分，其它一律为 0
pub fn parse_sort_order(value: &JsonValue) -> i32 {
    let n = match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        JsonValue::String(s) => parse_leading_int(s),
        _ => None,
    };
    n.map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_limit_params() {
        let cfg = ListingConfig::default();
        assert_eq!(LimitParams::new(Some("10")).get_limit(&cfg), 10);
        assert_eq!(LimitParams::new(None).get_limit(&cfg), 50);
        assert_eq!(LimitParams::new(Some("abc")).get_limit(&cfg), 50);
        assert_eq!(LimitParams::new(Some("0")).get_limit(&cfg), 50);
        assert_eq!(LimitParams::new(Some("-3")).get_limit(&cfg), 50);
        assert_eq!(LimitParams::new(Some("5000")).get_limit(&cfg), 200);
    }

    #[test]
    fn test_default_limit_respects_max() {
        let cfg = ListingConfig {
            default_limit: 500,
            max_limit: 200,
        };
        assert_eq!(LimitParams::new(None).get_limit(&cfg), 200);
        assert_eq!(LimitParams::new(Some("abc")).get_limit(&cfg), 200);
        assert_eq!(LimitParams::new(Some("20")).get_limit(&cfg), 20);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("  -7"), Some(-7));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!(parse_sort_order(&json!(3)), 3);
        assert_eq!(parse_sort_order(&json!(3.9)), 3);
        assert_eq!(parse_sort_order(&json!("8")), 8);
        assert_eq!(parse_sort_order(&json!("top")), 0);
        assert_eq!(parse_sort_order(&json!(true)), 0);
        assert_eq!(parse_sort_order(&json!(1_i64 << 40)), i32::MAX);
    }
}
