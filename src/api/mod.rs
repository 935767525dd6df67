//! Typed client for the Holidaze REST API.
//!
//! Every endpoint goes through `HolidazeApi`; the HTTP implementation maps
//! all transport and status failures onto `errors::Error`, so callers never
//! see raw response shapes.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod transport;

use crate::core::models::{
    ApiKey, AuthUser, Booking, BookingDraft, LoginRequest, Profile, ProfileUpdate,
    RegisterRequest, Venue, VenueDraft,
};
use crate::core::types::SortOrder;
use crate::errors::Result;

pub use client::HttpClient;
pub use envelope::PageMeta;

#[derive(Debug, Clone, PartialEq)]
pub struct VenueQuery {
    pub limit: u32,
    pub page: u32,
    pub sort: Option<String>,
    pub sort_order: SortOrder,
    pub with_owner: bool,
    pub with_bookings: bool,
}

impl Default for VenueQuery {
    /// Newest venues first, owner expanded.
    fn default() -> Self {
        Self {
            limit: 20,
            page: 1,
            sort: Some("created".into()),
            sort_order: SortOrder::Desc,
            with_owner: true,
            with_bookings: false,
        }
    }
}

impl VenueQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

pub trait HolidazeApi {
    fn register(&self, request: &RegisterRequest) -> Result<Profile>;
    fn login(&self, request: &LoginRequest) -> Result<AuthUser>;
    fn create_api_key(&self, token: &str, name: &str) -> Result<ApiKey>;

    fn venues(&self, query: &VenueQuery) -> Result<Page<Venue>>;
    fn search_venues(&self, text: &str, query: &VenueQuery) -> Result<Page<Venue>>;
    /// Venue with owner and bookings embedded.
    fn venue(&self, id: &str) -> Result<Venue>;
    fn create_venue(&self, token: &str, draft: &VenueDraft) -> Result<Venue>;
    fn update_venue(&self, token: &str, id: &str, draft: &VenueDraft) -> Result<Venue>;
    fn delete_venue(&self, token: &str, id: &str) -> Result<()>;

    fn create_booking(&self, token: &str, draft: &BookingDraft) -> Result<Booking>;
    fn delete_booking(&self, token: &str, id: &str) -> Result<()>;

    fn profile_bookings(&self, token: &str, name: &str) -> Result<Vec<Booking>>;
    fn profile_venues(&self, token: &str, name: &str) -> Result<Vec<Venue>>;
    fn update_profile(&self, token: &str, name: &str, update: &ProfileUpdate) -> Result<Profile>;
}
