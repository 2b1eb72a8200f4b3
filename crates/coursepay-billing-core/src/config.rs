//! Billing configuration

use std::time::Duration;

use coursepay_types::CourseId;

/// Default Konnect API base URL
pub const DEFAULT_KONNECT_BASE_URL: &str = "https://api.konnect.network";

/// Konnect integration configuration
#[derive(Clone)]
pub struct KonnectConfig {
    /// Konnect API key, sent as `x-api-key`
    pub api_key: String,
    /// Konnect API base URL
    pub base_url: String,
    /// Wallet that receives the payments
    pub receiver_wallet_id: String,
    /// Currency token sent with each payment
    pub currency: String,
    /// Minutes before an unpaid payment expires
    pub lifespan_minutes: u32,
    /// Timeout for outbound Konnect calls
    pub timeout: Duration,
    /// Public base URL of this service, used for the webhook callback
    pub app_base_url: String,
    /// Frontend base URL, used for success and fail redirects
    pub frontend_url: String,
}

impl KonnectConfig {
    /// Create a new config with default currency, lifespan and base URL
    pub fn new(
        api_key: impl Into<String>,
        receiver_wallet_id: impl Into<String>,
        app_base_url: impl Into<String>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_KONNECT_BASE_URL.to_string(),
            receiver_wallet_id: receiver_wallet_id.into(),
            currency: "TND".to_string(),
            lifespan_minutes: 30,
            timeout: Duration::from_secs(15),
            app_base_url: app_base_url.into(),
            frontend_url: frontend_url.into(),
        }
    }

    /// Override the Konnect API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override currency token
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Override payment lifespan
    pub fn with_lifespan_minutes(mut self, minutes: u32) -> Self {
        self.lifespan_minutes = minutes;
        self
    }

    /// Override outbound request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of a Konnect API endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url.trim_end_matches('/'))
    }

    /// Webhook Konnect calls once a payment changes state
    pub fn webhook_url(&self) -> String {
        format!(
            "{}/api/payments/webhook",
            self.app_base_url.trim_end_matches('/')
        )
    }

    /// Where the buyer lands after paying
    pub fn success_url(&self, course_id: CourseId) -> String {
        format!(
            "{}/course-progress/{course_id}",
            self.frontend_url.trim_end_matches('/')
        )
    }

    /// Where the buyer lands after a failed payment
    pub fn fail_url(&self, course_id: CourseId) -> String {
        format!(
            "{}/course-detail/{course_id}",
            self.frontend_url.trim_end_matches('/')
        )
    }
}

impl std::fmt::Debug for KonnectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KonnectConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("receiver_wallet_id", &self.receiver_wallet_id)
            .field("currency", &self.currency)
            .field("lifespan_minutes", &self.lifespan_minutes)
            .field("timeout", &self.timeout)
            .field("app_base_url", &self.app_base_url)
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}
