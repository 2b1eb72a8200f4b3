//! PostgreSQL purchase repository implementation

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::PurchaseRow;
use crate::repo::{CreatePurchase, PurchaseRepository};

/// PostgreSQL purchase repository
#[derive(Clone)]
pub struct PgPurchaseRepository {
    pool: PgPool,
}

impl PgPurchaseRepository {
    /// Create a new purchase repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseRepository for PgPurchaseRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PurchaseRow>> {
        let purchase = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT id, course_id, user_id, amount, status, payment_id,
                   created_at, updated_at
            FROM purchases
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(purchase)
    }

    async fn exists_for_user_and_course(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> DbResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM purchases WHERE user_id = $1 AND course_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_completed(&self) -> DbResult<Vec<PurchaseRow>> {
        let purchases = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT id, course_id, user_id, amount, status, payment_id,
                   created_at, updated_at
            FROM purchases
            WHERE status = 'completed'
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    async fn create(&self, purchase: CreatePurchase) -> DbResult<PurchaseRow> {
        let row = sqlx::query_as::<_, PurchaseRow>(
            r#"
            INSERT INTO purchases (id, course_id, user_id, amount, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING id, course_id, user_id, amount, status, payment_id,
                      created_at, updated_at
            "#,
        )
        .bind(purchase.id)
        .bind(purchase.course_id)
        .bind(purchase.user_id)
        .bind(purchase.amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn set_payment_id(&self, id: Uuid, payment_id: &str) -> DbResult<()> {
        sqlx::query("UPDATE purchases SET payment_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(payment_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_amount(&self, id: Uuid, amount: Decimal) -> DbResult<()> {
        sqlx::query("UPDATE purchases SET amount = $1, updated_at = NOW() WHERE id = $2")
            .bind(amount)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn complete(&self, id: Uuid) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Row lock via UPDATE serializes concurrent deliveries for one purchase
        let transitioned: Option<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            UPDATE purchases
            SET status = 'completed', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING course_id, user_id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((course_id, user_id)) = transitioned else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("UPDATE lectures SET is_preview_free = TRUE WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO enrollments (user_id, course_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, course_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(purchase_id = %id, course_id = %course_id, user_id = %user_id, "Purchase completed");
        Ok(true)
    }
}
