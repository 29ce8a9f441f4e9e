// User-facing authentication messages
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const EMAIL_ALREADY_REGISTERED: &str =
    "This email is already registered. Please sign in instead.";
pub const PASSWORD_TOO_WEAK: &str = "Password should be at least 6 characters";
pub const INVALID_EMAIL_ADDRESS: &str = "Please enter a valid email address";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
pub const AUTH_FAILED: &str = "Authentication failed";

// Generic upstream failure message; detail stays in the logs
pub const UPSTREAM_UNAVAILABLE: &str = "Service temporarily unavailable";
