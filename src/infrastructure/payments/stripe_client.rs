use anyhow::anyhow;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::error;
use uuid::Uuid;

use crate::application::interfaces::payments::PaymentGateway;
use crate::domain::error::AppError;
use crate::domain::value_objects::enums::recurring_intervals::RecurringInterval;

type HmacSha256 = Hmac<Sha256>;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Minimal Stripe client built on reqwest.
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    webhook_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    pub id: String,
    pub created: i64,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripePrice {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentLink {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
    pub created: Option<i64>,
    pub livemode: Option<bool>,
    pub data: StripeEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

/// Input for price creation; the currency is forwarded as-is and omitted
/// when absent, so a missing currency is rejected by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePriceModel {
    pub currency: Option<String>,
    pub unit_amount: i32,
    pub interval: RecurringInterval,
    pub product_name: String,
    pub post_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorDetails,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetails {
    #[serde(rename = "type")]
    type_: Option<String>,
    code: Option<String>,
    message: Option<String>,
    param: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeCustomerList {
    data: Vec<StripeCustomer>,
}

impl StripeClient {
    pub fn new(secret_key: String, webhook_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            webhook_secret,
        }
    }

    async fn ensure_success(
        resp: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response, AppError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let request_id = resp
            .headers()
            .get("request-id")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let details = serde_json::from_str::<StripeErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error);

        error!(
            status = %status,
            stripe_request_id = ?request_id,
            stripe_error_type = ?details.as_ref().and_then(|d| d.type_.as_deref()),
            stripe_error_code = ?details.as_ref().and_then(|d| d.code.as_deref()),
            stripe_error_param = ?details.as_ref().and_then(|d| d.param.as_deref()),
            response_body = %body,
            context = %context,
            "stripe api request failed"
        );

        match details {
            Some(details) => Err(AppError::PaymentProvider {
                message: details.message.unwrap_or_else(|| {
                    format!("Stripe API request failed: {context} (status {status})")
                }),
            }),
            None => Err(AppError::Internal(anyhow!(
                "Stripe API request failed: {} (status {}, request_id={:?})",
                context,
                status,
                request_id
            ))),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    /// Creates a Stripe customer. https://stripe.com/docs/api/customers/create
    async fn create_customer(
        &self,
        name: String,
        email: String,
    ) -> Result<StripeCustomer, AppError> {
        let body = [("name", name), ("email", email)];

        let resp = self
            .http
            .post(format!("{STRIPE_API_BASE}/customers"))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&body)
            .send()
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        let resp = Self::ensure_success(resp, "create customer").await?;

        let customer: StripeCustomer = resp
            .json()
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        Ok(customer)
    }

    /// Looks up a customer through the list endpoint, first match wins.
    async fn find_customer_by_email(&self, email: String) -> Result<StripeCustomer, AppError> {
        let resp = self
            .http
            .get(format!("{STRIPE_API_BASE}/customers"))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .query(&[("email", email.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        let resp = Self::ensure_success(resp, "find customer").await?;

        let list: StripeCustomerList = resp
            .json()
            .await
            .map_err(|err| AppError::Internal(err.into()))?;

        list.data
            .into_iter()
            .next()
            .ok_or(AppError::CustomerNotFound)
    }

    /// Creates a price with an inline product. https://stripe.com/docs/api/prices/create
    async fn create_price(&self, price: CreatePriceModel) -> Result<StripePrice, AppError> {
        let mut body: Vec<(String, String)> = vec![
            ("unit_amount".to_string(), price.unit_amount.to_string()),
            (
                "recurring[interval]".to_string(),
                price.interval.to_string(),
            ),
            ("product_data[name]".to_string(), price.product_name.clone()),
            (
                "product_data[metadata][postId]".to_string(),
                price.post_id.to_string(),
            ),
        ];

        if let Some(currency) = price.currency.clone() {
            body.push(("currency".to_string(), currency));
        }

        let resp = self
            .http
            .post(format!("{STRIPE_API_BASE}/prices"))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&body)
            .send()
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        let resp = Self::ensure_success(resp, "create price").await?;

        let parsed: StripePrice = resp
            .json()
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        Ok(parsed)
    }

    /// Creates a payment link for a single line item.
    /// https://stripe.com/docs/api/payment-link/create
    async fn create_payment_link(
        &self,
        price_id: String,
        quantity: i32,
        post_id: Uuid,
    ) -> Result<StripePaymentLink, AppError> {
        let body = [
            ("line_items[0][price]".to_string(), price_id),
            ("line_items[0][quantity]".to_string(), quantity.to_string()),
            ("metadata[postId]".to_string(), post_id.to_string()),
        ];

        let resp = self
            .http
            .post(format!("{STRIPE_API_BASE}/payment_links"))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&body)
            .send()
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        let resp = Self::ensure_success(resp, "create payment link").await?;

        let parsed: StripePaymentLink = resp
            .json()
            .await
            .map_err(|err| AppError::Internal(err.into()))?;
        Ok(parsed)
    }

    /// Verifies the webhook signature. https://stripe.com/docs/webhooks/signatures
    fn verify_webhook_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, AppError> {
        let mut timestamp: Option<String> = None;
        let mut signature: Option<String> = None;

        for part in signature_header.split(',') {
            if let Some(rest) = part.strip_prefix("t=") {
                timestamp = Some(rest.to_string());
            } else if let Some(rest) = part.strip_prefix("v1=") {
                signature = Some(rest.to_string());
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| AppError::Internal(anyhow!("missing timestamp in stripe-signature")))?;
        let signature = signature
            .ok_or_else(|| AppError::Internal(anyhow!("missing v1 in stripe-signature")))?;

        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
        let mut mac = HmacSha256::new_from_slice(self.webhook_secret.as_bytes())
            .map_err(|err| AppError::Internal(err.into()))?;
        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();
        let provided = hex::decode(signature).map_err(|err| AppError::Internal(err.into()))?;

        if expected[..] != provided[..] {
            return Err(AppError::Internal(anyhow!("invalid webhook signature")));
        }

        let event: StripeEvent =
            serde_json::from_slice(payload).map_err(|err| AppError::Internal(err.into()))?;
        Ok(event)
    }
}
