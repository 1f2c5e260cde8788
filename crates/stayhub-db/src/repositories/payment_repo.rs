//! Payment and invoice repository implementation
//!
//! One payment and one invoice per booking; both are looked up and
//! updated through the booking id. `paid_at` is stamped by the database
//! when a payment moves to Paid.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use stayhub_core::{
    models::{Invoice, Payment, PaymentStatus},
    traits::PaymentRepository,
    AppError, AppResult,
};
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of PaymentRepository
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new payment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    #[instrument(skip(self, payment), fields(booking_id = %payment.booking_id))]
    async fn create_payment(&self, payment: &Payment) -> AppResult<()> {
        debug!("Creating payment for booking {}", payment.booking_id);

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, booking_id, amount, status, provider, reference,
                paid_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.id)
        .bind(payment.booking_id)
        .bind(payment.amount)
        .bind(payment.status.to_string())
        .bind(&payment.provider)
        .bind(&payment.reference)
        .bind(payment.paid_at)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error creating payment for booking {}: {}",
                payment.booking_id, e
            );
            AppError::Database(format!("Failed to create payment: {}", e))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_payment_by_booking_id(&self, booking_id: Uuid) -> AppResult<Option<Payment>> {
        debug!("Finding payment for booking: {}", booking_id);

        let result = sqlx::query_as::<sqlx::Postgres, PaymentRow>(
            r#"
            SELECT id, booking_id, amount, status, provider, reference,
                   paid_at, created_at
            FROM payments
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error finding payment for booking {}: {}",
                booking_id, e
            );
            AppError::Database(format!("Failed to find payment: {}", e))
        })?;

        result.map(Payment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn update_payment_status(
        &self,
        booking_id: Uuid,
        status: PaymentStatus,
        provider: Option<&str>,
        reference: Option<&str>,
    ) -> AppResult<Payment> {
        debug!("Updating payment for booking {} to {}", booking_id, status);

        let row = sqlx::query_as::<sqlx::Postgres, PaymentRow>(
            r#"
            UPDATE payments
            SET status = $2,
                provider = COALESCE($3, provider),
                reference = COALESCE($4, reference),
                paid_at = CASE WHEN $2 = 'Paid' THEN NOW() ELSE paid_at END
            WHERE booking_id = $1
            RETURNING id, booking_id, amount, status, provider, reference,
                      paid_at, created_at
            "#,
        )
        .bind(booking_id)
        .bind(status.to_string())
        .bind(provider)
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error updating payment for booking {}: {}",
                booking_id, e
            );
            AppError::Database(format!("Failed to update payment status: {}", e))
        })?;

        row.ok_or_else(|| AppError::PaymentNotFound(booking_id.to_string()))?
            .try_into()
    }

    #[instrument(skip(self, invoice), fields(booking_id = %invoice.booking_id))]
    async fn create_invoice(&self, invoice: &Invoice) -> AppResult<()> {
        debug!(
            "Creating invoice {} for booking {}",
            invoice.invoice_number, invoice.booking_id
        );

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, booking_id, invoice_number, amount, status, issued_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(invoice.id)
        .bind(invoice.booking_id)
        .bind(&invoice.invoice_number)
        .bind(invoice.amount)
        .bind(invoice.status.to_string())
        .bind(invoice.issued_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error creating invoice for booking {}: {}",
                invoice.booking_id, e
            );
            AppError::Database(format!("Failed to create invoice: {}", e))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_invoice_by_booking_id(&self, booking_id: Uuid) -> AppResult<Option<Invoice>> {
        debug!("Finding invoice for booking: {}", booking_id);

        let result = sqlx::query_as::<sqlx::Postgres, InvoiceRow>(
            r#"
            SELECT id, booking_id, invoice_number, amount, status, issued_at
            FROM invoices
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error finding invoice for booking {}: {}",
                booking_id, e
            );
            AppError::Database(format!("Failed to find invoice: {}", e))
        })?;

        result.map(Invoice::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn update_invoice_status(
        &self,
        booking_id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Invoice> {
        debug!("Updating invoice for booking {} to {}", booking_id, status);

        let row = sqlx::query_as::<sqlx::Postgres, InvoiceRow>(
            r#"
            UPDATE invoices
            SET status = $2
            WHERE booking_id = $1
            RETURNING id, booking_id, invoice_number, amount, status, issued_at
            "#,
        )
        .bind(booking_id)
        .bind(status.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error updating invoice for booking {}: {}",
                booking_id, e
            );
            AppError::Database(format!("Failed to update invoice status: {}", e))
        })?;

        row.ok_or_else(|| AppError::InvoiceNotFound(booking_id.to_string()))?
            .try_into()
    }
}

/// Row struct for payments
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    booking_id: Uuid,
    amount: Decimal,
    status: String,
    provider: Option<String>,
    reference: Option<String>,
    paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = AppError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status = PaymentStatus::from_str(&row.status).ok_or_else(|| {
            AppError::Database(format!(
                "Payment {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;
        Ok(Self {
            id: row.id,
            booking_id: row.booking_id,
            amount: row.amount,
            status,
            provider: row.provider,
            reference: row.reference,
            paid_at: row.paid_at,
            created_at: row.created_at,
        })
    }
}

/// Row struct for invoices
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    booking_id: Uuid,
    invoice_number: String,
    amount: Decimal,
    status: String,
    issued_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = AppError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let status = PaymentStatus::from_str(&row.status).ok_or_else(|| {
            AppError::Database(format!(
                "Invoice {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;
        Ok(Self {
            id: row.id,
            booking_id: row.booking_id,
            invoice_number: row.invoice_number,
            amount: row.amount,
            status,
            issued_at: row.issued_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_row_with_unknown_status_is_an_error() {
        let row = PaymentRow {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            amount: Decimal::from(100000),
            status: "Settled".to_string(),
            provider: None,
            reference: None,
            paid_at: None,
            created_at: Utc::now(),
        };
        let err = Payment::try_from(row).unwrap_err();
        assert!(matches!(err, AppError::Database(msg) if msg.contains("Settled")));
    }

    #[test]
    fn test_invoice_row_converts_known_status() {
        let row = InvoiceRow {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            invoice_number: "INV-2026-0001".to_string(),
            amount: Decimal::from(100000),
            status: "Paid".to_string(),
            issued_at: Utc::now(),
        };
        let invoice = Invoice::try_from(row).unwrap();
        assert_eq!(invoice.status, PaymentStatus::Paid);
    }
}
