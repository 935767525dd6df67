use crate::api::VenueQuery;
use crate::errors::{Error, Result};
use reqwest::Url;

/// The one table of API routes. Ids and names are pushed as path segments so
/// they are always percent-encoded.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base.trim().trim_end_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", base, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("API base URL '{}' cannot hold paths.", base)));
        }
        Ok(Self { base })
    }

    fn url(&self, segments: &[&str], params: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    fn listing_params(query: &VenueQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", query.limit.to_string()),
            ("page", query.page.to_string()),
        ];
        if let Some(sort) = &query.sort {
            params.push(("sort", sort.clone()));
            params.push(("sortOrder", query.sort_order.to_string()));
        }
        if query.with_owner {
            params.push(("_owner", "true".into()));
        }
        if query.with_bookings {
            params.push(("_bookings", "true".into()));
        }
        params
    }

    pub fn register(&self) -> Url {
        self.url(&["auth", "register"], &[])
    }

    pub fn login(&self) -> Url {
        self.url(&["auth", "login"], &[("_holidaze", "true".into())])
    }

    pub fn create_api_key(&self) -> Url {
        self.url(&["auth", "create-api-key"], &[])
    }

    pub fn venues(&self, query: &VenueQuery) -> Url {
        self.url(&["holidaze", "venues"], &Self::listing_params(query))
    }

    pub fn search_venues(&self, text: &str, query: &VenueQuery) -> Url {
        let mut params = vec![("q", text.trim().to_string())];
        params.extend(Self::listing_params(query));
        self.url(&["holidaze", "venues", "search"], &params)
    }

    /// Single venue, with owner and bookings expanded.
    pub fn venue(&self, id: &str) -> Url {
        self.url(
            &["holidaze", "venues", id],
            &[("_owner", "true".into()), ("_bookings", "true".into())],
        )
    }

    pub fn venue_collection(&self) -> Url {
        self.url(&["holidaze", "venues"], &[])
    }

    pub fn venue_item(&self, id: &str) -> Url {
        self.url(&["holidaze", "venues", id], &[])
    }

    pub fn booking_collection(&self) -> Url {
        self.url(&["holidaze", "bookings"], &[])
    }

    pub fn booking_item(&self, id: &str) -> Url {
        self.url(&["holidaze", "bookings", id], &[])
    }

    pub fn profile(&self, name: &str) -> Url {
        self.url(&["holidaze", "profiles", name], &[])
    }

    pub fn profile_bookings(&self, name: &str) -> Url {
        self.url(
            &["holidaze", "profiles", name, "bookings"],
            &[("_venue", "true".into())],
        )
    }

    pub fn profile_venues(&self, name: &str) -> Url {
        self.url(
            &["holidaze", "profiles", name, "venues"],
            &[("_bookings", "true".into())],
        )
    }
}
