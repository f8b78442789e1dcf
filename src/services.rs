//! Boundaries to services the app does not own: device location, toasts,
//! payments and the contact-request channel. Only stub implementations
//! live here.

use serde::Serialize;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::Coordinates;

pub trait GeolocationProvider {
    async fn current_position(&self) -> Result<Coordinates, ServiceError>;
}

/// Fire-and-forget user messages.
pub trait ToastSink {
    fn show(&self, title: &str, description: &str);
}

pub trait PaymentGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, ServiceError>;
}

pub trait ContactRequester {
    async fn notify(&self, professional_id: u32) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    /// Plan id for subscriptions, cause id for donations.
    pub reference: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub transaction_id: Uuid,
    pub reference: String,
    pub amount: f64,
}

pub struct FixedLocation(pub Coordinates);

impl GeolocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, ServiceError> {
        Ok(self.0)
    }
}

pub struct UnavailableLocation(pub String);

impl GeolocationProvider for UnavailableLocation {
    async fn current_position(&self) -> Result<Coordinates, ServiceError> {
        Err(ServiceError::LocationUnavailable(self.0.clone()))
    }
}

/// Prints toasts to stdout.
pub struct ConsoleToasts;

impl ToastSink for ConsoleToasts {
    fn show(&self, title: &str, description: &str) {
        tracing::info!(title, description, "toast");
        println!("[{title}] {description}");
    }
}

pub struct StubPaymentGateway {
    decline_reason: Option<String>,
}

impl StubPaymentGateway {
    pub fn approving() -> Self {
        Self {
            decline_reason: None,
        }
    }

    pub fn declining(reason: impl Into<String>) -> Self {
        Self {
            decline_reason: Some(reason.into()),
        }
    }
}

impl PaymentGateway for StubPaymentGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, ServiceError> {
        if let Some(reason) = &self.decline_reason {
            tracing::warn!(
                reference = %request.reference,
                reason = reason.as_str(),
                "payment declined"
            );
            return Err(ServiceError::PaymentDeclined(reason.clone()));
        }

        let receipt = PaymentReceipt {
            transaction_id: Uuid::new_v4(),
            reference: request.reference.clone(),
            amount: request.amount,
        };
        tracing::info!(
            reference = %receipt.reference,
            amount = receipt.amount,
            transaction = %receipt.transaction_id,
            "payment approved"
        );
        Ok(receipt)
    }
}

/// Logs the request instead of delivering it to the professional.
pub struct LoggingContactRequester;

impl ContactRequester for LoggingContactRequester {
    async fn notify(&self, professional_id: u32) -> Result<(), ServiceError> {
        tracing::info!(professional_id, "contact request forwarded");
        Ok(())
    }
}
