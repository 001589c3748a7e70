use crate::errors::AppError;
use crate::models::JokeResponse;
use std::time::Duration;

/// Joke handed out whenever the joke API is down or unreachable.
pub const DEFAULT_JOKE: &str = "Случайная шутка";

/// Client for the external joke API.
///
/// Server errors (5xx) and transport failures are absorbed and answered with
/// [`DEFAULT_JOKE`]. Every other failure is returned to the caller.
#[derive(Clone)]
pub struct JokeClient {
    client: reqwest::Client,
    url: String,
}

impl JokeClient {
    /// Creates a new `JokeClient`.
    ///
    /// # Arguments
    ///
    /// * `url` - Full URL of the random-joke endpoint.
    /// * `timeout` - Request timeout applied to every call.
    pub fn new(url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create joke client: {}", e))
            })?;

        Ok(Self { client, url })
    }

    pub fn fallback() -> JokeResponse {
        JokeResponse {
            value: DEFAULT_JOKE.to_string(),
        }
    }

    /// Fetches a random joke.
    ///
    /// # Returns
    ///
    /// * `Result<JokeResponse, AppError>` - The joke, the fallback joke, or a client-side error.
    pub async fn get_joke(&self) -> Result<JokeResponse, AppError> {
        tracing::info!("Fetching random joke: {}", self.url);

        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Joke API unreachable, using default joke: {}", e);
                return Ok(Self::fallback());
            }
        };

        let status = response.status();
        if status.is_server_error() {
            tracing::warn!("Joke API returned {}, using default joke", status);
            return Ok(Self::fallback());
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Joke API returned error {}: {}", status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "Joke API returned {}: {}",
                status, error_text
            )));
        }

        let joke: JokeResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse joke response: {}", e))
        })?;

        tracing::debug!("Received joke: {}", joke.value);
        Ok(joke)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = JokeClient::new(
            "https://api.chucknorris.io/jokes/random".to_string(),
            Duration::from_secs(5),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn fallback_is_the_default_joke() {
        assert_eq!(JokeClient::fallback().value, DEFAULT_JOKE);
    }
}
