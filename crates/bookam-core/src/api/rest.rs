//! HTTP client for the bookAM REST backend.

use log::{debug, warn};
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Serialize};

use super::{ApiResponse, BookingApi, Endpoint};
use crate::{
    error::{BookingError, Result},
    models::{Booking, Bus, Route, Session, User},
    params::{
        ConfirmAccount, CreateBooking, CreateBus, CreateRoute, Id, Login, Register, SearchRoutes,
        UpdateBooking, UpdateBus, UpdateRoute,
    },
};

/// JSON-over-HTTP client.
///
/// No retries and no timeout beyond the reqwest defaults: a failed call is
/// reported once and the caller decides what to do.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl RestClient {
    /// Client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| BookingError::Configuration {
            message: format!("Invalid API URL '{base_url}': {e}"),
        })?;
        // Relative joins keep the last path segment only with a trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            token: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> Result<Url> {
        self.base_url
            .join(&endpoint.path())
            .map_err(|e| BookingError::Configuration {
                message: format!("Cannot build URL for {endpoint}: {e}"),
            })
    }

    /// Sends one request and unwraps the envelope.
    async fn call<T, B, Q>(&self, endpoint: Endpoint, body: Option<&B>, query: Option<&Q>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let url = self.url(endpoint)?;
        debug!("{} {}", endpoint.method(), url);

        let mut request = self.client.request(endpoint.method(), url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        } else if !endpoint.is_public() {
            debug!("Calling {endpoint} without a session");
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                warn!("{endpoint} failed with {status}");
                let failure = ApiResponse::<T>::failure(
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string(),
                );
                return failure.into_result(Some(status.as_u16()));
            }
        };
        if !envelope.success {
            warn!(
                "{endpoint} refused: {}",
                envelope.error.as_deref().unwrap_or("no reason given")
            );
        }
        envelope.into_result(Some(status.as_u16()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        self.call::<T, (), ()>(endpoint, None, None).await
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T> {
        self.call::<T, B, ()>(endpoint, Some(body), None).await
    }
}

impl BookingApi for RestClient {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn login(&self, params: &Login) -> Result<Session> {
        self.send(Endpoint::Login, params).await
    }

    async fn register(&self, params: &Register) -> Result<User> {
        self.send(Endpoint::Register, params).await
    }

    async fn confirm_account(&self, params: &ConfirmAccount) -> Result<User> {
        self.send(Endpoint::ConfirmAccount, params).await
    }

    async fn create_booking(&self, params: &CreateBooking) -> Result<Booking> {
        self.send(Endpoint::CreateBooking, params).await
    }

    async fn update_booking(&self, params: &UpdateBooking) -> Result<Booking> {
        params.validate()?;
        self.send(Endpoint::UpdateBooking, params).await
    }

    async fn delete_booking(&self, id: u64) -> Result<()> {
        self.send(Endpoint::DeleteBooking, &Id { id }).await
    }

    async fn get_booking(&self, id: u64) -> Result<Booking> {
        self.call::<_, (), _>(Endpoint::GetBooking, None, Some(&Id { id }))
            .await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.get(Endpoint::ListBookings).await
    }

    async fn create_bus(&self, params: &CreateBus) -> Result<Bus> {
        self.send(Endpoint::CreateBus, params).await
    }

    async fn update_bus(&self, params: &UpdateBus) -> Result<Bus> {
        self.send(Endpoint::UpdateBus, params).await
    }

    async fn delete_bus(&self, id: u64) -> Result<()> {
        self.send(Endpoint::DeleteBus, &Id { id }).await
    }

    async fn list_buses(&self) -> Result<Vec<Bus>> {
        self.get(Endpoint::ListBuses).await
    }

    async fn get_bus(&self, id: u64) -> Result<Bus> {
        self.get(Endpoint::GetBus(id)).await
    }

    async fn create_route(&self, params: &CreateRoute) -> Result<Route> {
        self.send(Endpoint::CreateRoute, params).await
    }

    async fn update_route(&self, params: &UpdateRoute) -> Result<Route> {
        self.send(Endpoint::UpdateRoute, params).await
    }

    async fn delete_route(&self, id: u64) -> Result<()> {
        self.send(Endpoint::DeleteRoute, &Id { id }).await
    }

    async fn list_routes(&self) -> Result<Vec<Route>> {
        self.get(Endpoint::ListRoutes).await
    }

    async fn search_routes(&self, params: &SearchRoutes) -> Result<Vec<Route>> {
        self.call::<_, (), _>(Endpoint::SearchRoutes, None, Some(params))
            .await
    }

    async fn get_route(&self, id: u64) -> Result<Route> {
        self.get(Endpoint::GetRoute(id)).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.get(Endpoint::ListUsers).await
    }

    async fn delete_user(&self, id: u64) -> Result<()> {
        self.send(Endpoint::DeleteUser, &Id { id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = RestClient::new("https://api.bookam.ng/v1").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.bookam.ng/v1/");
        assert_eq!(
            client.url(Endpoint::ListBuses).unwrap().as_str(),
            "https://api.bookam.ng/v1/bus/getAll"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            RestClient::new("not a url"),
            Err(BookingError::Configuration { .. })
        ));
    }

    #[test]
    fn test_token_handling() {
        let mut client = RestClient::new("http://localhost:4000").unwrap();
        assert_eq!(client.token(), None);
        client.set_token(Some("abc".into()));
        assert_eq!(client.token(), Some("abc"));
    }
}
