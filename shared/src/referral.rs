use chrono::{Datelike, Utc};

/// Served when a user's own record cannot be located.
pub const DEFAULT_REFERRAL_CODE: &str = "default2025";

/// Lowercased first name token joined with the next calendar year, e.g.
/// "Sarah Johnson" becomes "sarah2026" during 2025. Derived exactly once at
/// account creation and never recomputed afterwards.
pub fn generate_referral_code(name: &str) -> String {
    let base = name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    format!("{base}{}", Utc::now().year() + 1)
}
