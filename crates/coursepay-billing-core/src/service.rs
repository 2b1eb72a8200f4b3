//! Purchase service
//!
//! Course checkout, Konnect payment confirmation and purchase queries.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use coursepay_db::{
    CourseRepository, CreatePurchase, LectureRepository, PurchaseRepository, Repositories,
    UserRepository,
};
use coursepay_types::{
    from_millimes, Course, CourseDetail, CourseId, Lecture, Purchase, PurchaseId, PurchaseStatus,
    PurchaseWithCourse, User, UserId,
};

use crate::config::KonnectConfig;
use crate::error::BillingError;
use crate::konnect::KonnectProvider;
use crate::payment::{InitPaymentRequest, PaymentStatus};
use crate::provider::PaymentProvider;

/// Repository handles used by the purchase service
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub lectures: Arc<dyn LectureRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
}

impl From<Repositories> for Stores {
    fn from(repos: Repositories) -> Self {
        Self {
            users: Arc::new(repos.users),
            courses: Arc::new(repos.courses),
            lectures: Arc::new(repos.lectures),
            purchases: Arc::new(repos.purchases),
        }
    }
}

/// Started checkout
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Pending purchase created for this checkout
    pub purchase_id: PurchaseId,
    /// Konnect payment page
    pub url: String,
    /// Konnect payment reference, if returned
    pub payment_ref: Option<String>,
}

/// What a webhook delivery did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Purchase moved to completed and access was granted
    Completed,
    /// Purchase was already completed; nothing re-applied
    AlreadyCompleted,
    /// Provider does not report the payment as completed
    NotCompleted,
}

impl WebhookOutcome {
    /// Metric label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::AlreadyCompleted => "already_completed",
            Self::NotCompleted => "not_completed",
        }
    }
}

/// Course plus whether the caller has bought it
#[derive(Debug, Clone, Serialize)]
pub struct CourseWithStatus {
    pub course: CourseDetail,
    pub purchased: bool,
}

/// Purchase service
pub struct PurchaseService {
    stores: Stores,
    provider: Arc<dyn PaymentProvider>,
    config: KonnectConfig,
}

impl PurchaseService {
    /// Create a purchase service backed by PostgreSQL and Konnect
    pub fn new(repos: Repositories, config: KonnectConfig) -> Result<Self, BillingError> {
        let provider = KonnectProvider::new(config.clone())?;
        Ok(Self::with_provider(repos.into(), Arc::new(provider), config))
    }

    /// Create a purchase service from explicit stores and provider
    pub fn with_provider(
        stores: Stores,
        provider: Arc<dyn PaymentProvider>,
        config: KonnectConfig,
    ) -> Self {
        Self {
            stores,
            provider,
            config,
        }
    }

    /// Start a Konnect checkout for `course_id` on behalf of `user_id`.
    ///
    /// The pending purchase is stored before Konnect is called. When Konnect
    /// returns no payment URL the purchase stays pending without a payment
    /// reference and `MissingPaymentUrl` is returned.
    #[instrument(skip(self), fields(user_id = %user_id, course_id = %course_id))]
    pub async fn create_checkout(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<CheckoutSession, BillingError> {
        let course = self
            .load_course(course_id)
            .await?
            .ok_or(BillingError::CourseNotFound)?;

        let purchase_id = PurchaseId::new();
        let mut request = InitPaymentRequest::for_purchase(&self.config, &course, purchase_id)?;

        if let Some(user) = self.load_user(user_id).await? {
            request = request.with_buyer(&user);
        } else {
            debug!("Buyer has no user record, skipping contact prefill");
        }

        self.stores
            .purchases
            .create(CreatePurchase {
                id: purchase_id.0,
                course_id: course.id.0,
                user_id: user_id.0,
                amount: course.price,
            })
            .await?;

        let response = self.provider.init_payment(&request).await?;

        let Some(url) = response.pay_url.filter(|u| !u.is_empty()) else {
            warn!(purchase_id = %purchase_id, "Konnect returned no payment url");
            return Err(BillingError::MissingPaymentUrl);
        };

        match response.payment_ref.as_deref() {
            Some(payment_ref) => {
                self.stores
                    .purchases
                    .set_payment_id(purchase_id.0, payment_ref)
                    .await?;
            }
            None => warn!(purchase_id = %purchase_id, "Konnect returned no payment reference"),
        }

        info!(purchase_id = %purchase_id, "Checkout session created");

        Ok(CheckoutSession {
            purchase_id,
            url,
            payment_ref: response.payment_ref,
        })
    }

    /// Apply a Konnect payment notification.
    ///
    /// The payment is re-read from Konnect; the notification itself carries
    /// nothing but the reference. The stored amount always follows Konnect.
    /// Completion effects apply once: a purchase that is already completed
    /// is left as is.
    #[instrument(skip(self))]
    pub async fn process_webhook(&self, payment_ref: &str) -> Result<WebhookOutcome, BillingError> {
        let payment = self.provider.get_payment(payment_ref).await?;

        let purchase_id = payment
            .order_id
            .as_deref()
            .and_then(|id| PurchaseId::parse(id).ok())
            .ok_or_else(|| {
                warn!(order_id = ?payment.order_id, "Konnect payment has no usable order id");
                BillingError::PurchaseNotFound
            })?;

        let purchase = self
            .find_purchase(purchase_id)
            .await?
            .ok_or(BillingError::PurchaseNotFound)?;

        if let Some(millimes) = payment.amount.filter(|m| *m != 0) {
            let amount = from_millimes(millimes);
            if amount != purchase.amount {
                self.stores
                    .purchases
                    .update_amount(purchase_id.0, amount)
                    .await?;
                debug!(purchase_id = %purchase_id, amount = %amount, "Purchase amount synced");
            }
        }

        if payment.status != PaymentStatus::Completed {
            debug!(purchase_id = %purchase_id, status = ?payment.status, "Payment not completed");
            return Ok(WebhookOutcome::NotCompleted);
        }

        if purchase.status == PurchaseStatus::Completed {
            debug!(purchase_id = %purchase_id, "Purchase already completed");
            return Ok(WebhookOutcome::AlreadyCompleted);
        }

        // A concurrent delivery may have completed it since the read above
        if !self.stores.purchases.complete(purchase_id.0).await? {
            return Ok(WebhookOutcome::AlreadyCompleted);
        }

        info!(
            purchase_id = %purchase_id,
            course_id = %purchase.course_id,
            user_id = %purchase.user_id,
            "Purchase completed, course unlocked"
        );

        Ok(WebhookOutcome::Completed)
    }

    /// Course with creator and lectures, plus whether `user_id` has any
    /// purchase of it
    #[instrument(skip(self), fields(user_id = %user_id, course_id = %course_id))]
    pub async fn course_detail(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<CourseWithStatus, BillingError> {
        let course = self
            .load_course(course_id)
            .await?
            .ok_or(BillingError::CourseNotFound)?;

        let creator = self.load_user(course.creator_id).await?.map(|u| u.profile());

        let lectures: Vec<Lecture> = self
            .stores
            .lectures
            .find_by_course_id(course_id.0)
            .await?
            .into_iter()
            .map(Lecture::from)
            .collect();

        let purchased = self
            .stores
            .purchases
            .exists_for_user_and_course(user_id.0, course_id.0)
            .await?;

        Ok(CourseWithStatus {
            course: CourseDetail::new(course, creator, lectures),
            purchased,
        })
    }

    /// Every completed purchase with its course
    #[instrument(skip(self))]
    pub async fn purchased_courses(&self) -> Result<Vec<PurchaseWithCourse>, BillingError> {
        let rows = self.stores.purchases.find_completed().await?;

        let mut courses: HashMap<Uuid, Option<Course>> = HashMap::new();
        let mut result = Vec::with_capacity(rows.len());

        for row in rows {
            let purchase = Purchase::try_from(row)?;
            let course = match courses.get(&purchase.course_id.0) {
                Some(cached) => cached.clone(),
                None => {
                    let loaded = self.load_course(purchase.course_id).await?;
                    courses.insert(purchase.course_id.0, loaded.clone());
                    loaded
                }
            };
            result.push(PurchaseWithCourse { purchase, course });
        }

        debug!(count = result.len(), "Listed completed purchases");
        Ok(result)
    }

    async fn load_course(&self, course_id: CourseId) -> Result<Option<Course>, BillingError> {
        let Some(row) = self.stores.courses.find_by_id(course_id.0).await? else {
            return Ok(None);
        };

        let lecture_ids = self
            .stores
            .lectures
            .find_by_course_id(course_id.0)
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();
        let students = self
            .stores
            .courses
            .enrolled_student_ids(course_id.0)
            .await?;

        Ok(Some(row.into_course(lecture_ids, students)))
    }

    async fn load_user(&self, user_id: UserId) -> Result<Option<User>, BillingError> {
        let Some(row) = self.stores.users.find_by_id(user_id.0).await? else {
            return Ok(None);
        };
        let enrolled = self.stores.users.enrolled_course_ids(user_id.0).await?;
        Ok(Some(row.into_user(enrolled)))
    }

    async fn find_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, BillingError> {
        self.stores
            .purchases
            .find_by_id(id.0)
            .await?
            .map(Purchase::try_from)
            .transpose()
            .map_err(BillingError::from)
    }
}
