use std::time::Duration;

// === Dashboard ===
/// Maximum number of cards shown on the dashboard after filtering and sorting.
pub const DISPLAY_CAP: usize = 2;

// === Status messages ===
/// How long a transient success message stays visible.
pub const STATUS_DISPLAY_WINDOW: Duration = Duration::from_secs(2);

// === Remote API ===
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// === Thumbnails ===
pub const THUMBNAIL_URL_PREFIX: &str = "https://img.youtube.com/vi/";
pub const THUMBNAIL_URL_SUFFIX: &str = "/hqdefault.jpg";
pub const PLACEHOLDER_THUMBNAIL_URL: &str = "https://via.placeholder.com/150";

// === Credentials ===
pub const DEFAULT_KEYRING_SERVICE: &str = "dev.tubedeck.Tubedeck";
pub const KEYRING_TOKEN_ACCOUNT: &str = "access_token";
