use chrono::{DateTime, Local, Utc};

/// 相对时间："刚刚" / "N分钟前" / "N小时前" / "N天前"，超过一周显示日期
pub fn format_relative(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(time);

    if diff.num_minutes() < 1 {
        "刚刚".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}分钟前", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}小时前", diff.num_hours())
    } else if diff.num_days() < 7 {
        format!("{}天前", diff.num_days())
    } else {
        time.with_timezone(&Local).format("%Y/%-m/%-d").to_string()
    }
}

/// 按字符截断，超出部分以 "..." 代替
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_relative() {
        let now = Utc::now();
        assert_eq!(format_relative(now - Duration::seconds(30), now), "刚刚");
        assert_eq!(format_relative(now + Duration::seconds(30), now), "刚刚");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5分钟前");
        assert_eq!(format_relative(now - Duration::minutes(59), now), "59分钟前");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3小时前");
        assert_eq!(format_relative(now - Duration::days(6), now), "6天前");

        let old = now - Duration::days(30);
        let expected = old.with_timezone(&Local).format("%Y/%-m/%-d").to_string();
        assert_eq!(format_relative(old, now), expected);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("停水通知", 10), "停水通知");
        assert_eq!(truncate_text("停水通知", 4), "停水通知");
        assert_eq!(truncate_text("明早八点停水请提前储水", 4), "明早八点...");
        assert_eq!(truncate_text("", 0), "");
    }
}
