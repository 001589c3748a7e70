use crate::errors::AppError;
use crate::models::{BookingRequest, BookingResponse};
use chrono::Utc;
use reqwest::header::ACCEPT;
use std::time::Duration;

/// Client for the external booking API.
///
/// Unlike the joke client there is no fallback: any failure, including a
/// response without a body, is returned to the caller.
#[derive(Clone)]
pub struct BookingClient {
    client: reqwest::Client,
    base_url: String,
}

impl BookingClient {
    /// Creates a new `BookingClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the booking API; requests go to `{base_url}/booking`.
    /// * `timeout` - Request timeout applied to every call.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create booking client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a booking for the given name.
    ///
    /// # Returns
    ///
    /// * `Result<i32, AppError>` - The booking id assigned by the booking API.
    pub async fn create_booking(&self, name: &str) -> Result<i32, AppError> {
        let url = format!("{}/booking", self.base_url);
        tracing::info!("Creating booking for {}: {}", name, url);

        let body = BookingRequest::for_student(name, Utc::now().date_naive());

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Booking request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Booking API returned error {}: {}", status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "Booking API returned {}: {}",
                status, error_text
            )));
        }

        let text = response.text().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to read booking response: {}", e))
        })?;

        let booking = parse_booking_response(&text)?;

        tracing::info!(
            "✓ Booking {} created for {}",
            booking.booking_id,
            booking.booking.firstname
        );
        Ok(booking.booking_id)
    }
}

/// Decodes a booking API body. An empty body or JSON `null` is an error.
pub fn parse_booking_response(text: &str) -> Result<BookingResponse, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::ExternalApiError(
            "Booking API returned an empty response".to_string(),
        ));
    }

    let parsed: Option<BookingResponse> = serde_json::from_str(text).map_err(|e| {
        AppError::ExternalApiError(format!("Failed to parse booking response: {}", e))
    })?;

    parsed.ok_or_else(|| {
        AppError::ExternalApiError("Booking API returned a null response".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BookingClient::new(
            "https://restful-booker.herokuapp.com/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://restful-booker.herokuapp.com");
    }

    #[test]
    fn empty_and_null_bodies_are_errors() {
        assert!(matches!(
            parse_booking_response(""),
            Err(AppError::ExternalApiError(_))
        ));
        assert!(matches!(
            parse_booking_response("null"),
            Err(AppError::ExternalApiError(_))
        ));
        assert!(matches!(
            parse_booking_response("{\"booking\": {}}"),
            Err(AppError::ExternalApiError(_))
        ));
    }

    #[test]
    fn reads_outer_booking_id() {
        let body = r#"{
            "bookingid": 12,
            "booking": {
                "firstname": "Ivan",
                "lastname": "",
                "totalprice": 0,
                "depositpaid": false,
                "bookingdates": { "checkin": "2024-05-01", "checkout": "2024-05-01" },
                "additionalneeds": ""
            }
        }"#;
        let booking = parse_booking_response(body).unwrap();
        assert_eq!(booking.booking_id, 12);
        assert_eq!(booking.booking.firstname, "Ivan");
    }
}
