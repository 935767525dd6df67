use crate::api::endpoints::Endpoints;
use crate::api::envelope::{Envelope, decode, error_for};
use crate::api::transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
use crate::api::{HolidazeApi, Page, VenueQuery};
use crate::config::Config;
use crate::core::models::{
    ApiKey, AuthUser, Booking, BookingDraft, LoginRequest, Profile, ProfileUpdate,
    RegisterRequest, Venue, VenueDraft,
};
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

pub const API_KEY_HEADER: &str = "X-Noroff-API-Key";

pub struct HttpClient {
    endpoints: Endpoints,
    api_key: Option<String>,
    transport: Box<dyn Transport>,
    logger: Logger,
}

impl HttpClient {
    pub fn new(
        endpoints: Endpoints,
        api_key: Option<String>,
        transport: Box<dyn Transport>,
        logger: Logger,
    ) -> Self {
        Self {
            endpoints,
            api_key,
            transport,
            logger,
        }
    }

    /// Client over the real network, configured from `config`.
    pub fn from_config(config: &Config, logger: Logger) -> Result<Self> {
        let endpoints = Endpoints::new(config.api_base_url())?;
        let transport = ReqwestTransport::new(config.request_timeout_secs())?;
        Ok(Self::new(
            endpoints,
            config.api_key().map(str::to_string),
            Box::new(transport),
            logger,
        ))
    }

    fn send(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        if let Some(key) = &self.api_key {
            headers.push((API_KEY_HEADER.to_string(), key.clone()));
        }

        self.logger
            .info(format!("{method} {}", url.path()), LogTarget::FileOnly);
        let response = self.transport.send(HttpRequest {
            method,
            url: url.clone(),
            headers,
            body,
        });

        match response {
            Ok(resp) if resp.is_success() => Ok(resp),
            Ok(resp) => {
                let err = error_for(&resp);
                self.logger
                    .warn(format!("{method} {} failed: {err}", url.path()), LogTarget::FileOnly);
                Err(err)
            }
            Err(err) => {
                self.logger
                    .error(format!("{method} {} failed: {err}", url.path()), LogTarget::FileOnly);
                Err(err)
            }
        }
    }

    fn get<T: DeserializeOwned>(&self, url: Url, token: Option<&str>) -> Result<Envelope<T>> {
        let resp = self.send(Method::Get, url, token, None)?;
        decode(&resp)
    }

    fn write<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_string(body)?;
        let resp = self.send(method, url, token, Some(body))?;
        Ok(decode::<T>(&resp)?.data)
    }

    fn delete(&self, url: Url, token: &str) -> Result<()> {
        self.send(Method::Delete, url, Some(token), None).map(|_| ())
    }

    fn page<T: DeserializeOwned>(&self, url: Url) -> Result<Page<T>> {
        let envelope = self.get::<Vec<T>>(url, None)?;
        Ok(Page {
            items: envelope.data,
            meta: envelope.meta,
        })
    }
}

impl HolidazeApi for HttpClient {
    fn register(&self, request: &RegisterRequest) -> Result<Profile> {
        self.write(Method::Post, self.endpoints.register(), None, request)
    }

    fn login(&self, request: &LoginRequest) -> Result<AuthUser> {
        self.write(Method::Post, self.endpoints.login(), None, request)
    }

    fn create_api_key(&self, token: &str, name: &str) -> Result<ApiKey> {
        self.write(
            Method::Post,
            self.endpoints.create_api_key(),
            Some(token),
            &json!({ "name": name }),
        )
    }

    fn venues(&self, query: &VenueQuery) -> Result<Page<Venue>> {
        self.page(self.endpoints.venues(query))
    }

    fn search_venues(&self, text: &str, query: &VenueQuery) -> Result<Page<Venue>> {
        self.page(self.endpoints.search_venues(text, query))
    }

    fn venue(&self, id: &str) -> Result<Venue> {
        Ok(self.get(self.endpoints.venue(id), None)?.data)
    }

    fn create_venue(&self, token: &str, draft: &VenueDraft) -> Result<Venue> {
        self.write(
            Method::Post,
            self.endpoints.venue_collection(),
            Some(token),
            draft,
        )
    }

    fn update_venue(&self, token: &str, id: &str, draft: &VenueDraft) -> Result<Venue> {
        self.write(Method::Put, self.endpoints.venue_item(id), Some(token), draft)
    }

    fn delete_venue(&self, token: &str, id: &str) -> Result<()> {
        self.delete(self.endpoints.venue_item(id), token)
    }

    fn create_booking(&self, token: &str, draft: &BookingDraft) -> Result<Booking> {
        self.write(
            Method::Post,
            self.endpoints.booking_collection(),
            Some(token),
            draft,
        )
    }

    fn delete_booking(&self, token: &str, id: &str) -> Result<()> {
        self.delete(self.endpoints.booking_item(id), token)
    }

    fn profile_bookings(&self, token: &str, name: &str) -> Result<Vec<Booking>> {
        Ok(self
            .get(self.endpoints.profile_bookings(name), Some(token))?
            .data)
    }

    fn profile_venues(&self, token: &str, name: &str) -> Result<Vec<Venue>> {
        Ok(self.get(self.endpoints.profile_venues(name), Some(token))?.data)
    }

    fn update_profile(&self, token: &str, name: &str, update: &ProfileUpdate) -> Result<Profile> {
        self.write(Method::Put, self.endpoints.profile(name), Some(token), update)
    }
}
