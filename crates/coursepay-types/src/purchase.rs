//! Purchase types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Course, CourseId, StatusParseError, UserId};

/// Unique purchase identifier
///
/// Also sent to the payment provider as the order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(pub Uuid);

impl PurchaseId {
    /// Create a new random purchase ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a purchase ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for PurchaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PurchaseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Purchase status
///
/// The only transition is `Pending` to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    /// Checkout started, payment not confirmed
    Pending,
    /// Provider confirmed the payment
    Completed,
}

impl PurchaseStatus {
    /// Database representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PurchaseStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

/// One user's payment attempt for one course
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Purchase ID
    pub id: PurchaseId,
    /// Course being bought
    pub course_id: CourseId,
    /// Buyer
    pub user_id: UserId,
    /// Amount in currency units (TND)
    pub amount: Decimal,
    /// Purchase status
    pub status: PurchaseStatus,
    /// Provider payment reference, set once checkout succeeds
    pub payment_id: Option<String>,
    /// When the purchase was created
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

/// Purchase with its course expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseWithCourse {
    /// The purchase
    #[serde(flatten)]
    pub purchase: Purchase,
    /// The purchased course, if it still exists
    pub course: Option<Course>,
}
