/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fresh opaque identity for a zone, placement block or seat.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Normalised form of a zone name used for per-event uniqueness.
///
/// Names are compared trimmed and case-insensitively, so `" Platea "` and
/// `"platea"` collide.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_key_trims_and_lowercases() {
        assert_eq!(name_key("  Platea Alta "), "platea alta");
        assert_eq!(name_key("VIP"), name_key("vip"));
    }

    #[test]
    fn test_new_id_is_unique_and_dashless() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(!a.contains('-'));
        assert_eq!(a.len(), 32);
    }
}
