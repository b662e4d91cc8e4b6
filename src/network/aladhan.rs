//! Monthly prayer-time provider client (AlAdhan API).
//!
//! The provider is treated as opaque: it returns one entry per day of the
//! requested month, each carrying a dual-calendar date stamp and raw timing
//! strings. No astronomy happens on this side of the wire.

use serde::Deserialize;

use crate::clock::MiqatError;
use crate::network::geo::{Coordinates, ZipResolver};
use crate::types::{CalendarSystem, MonthQuery, ProviderDay};

const DEFAULT_BASE: &str = "https://api.aladhan.com";
const USER_AGENT: &str = concat!("miqat/", env!("CARGO_PKG_VERSION"));

/// Calculation method code sent to the provider (ISNA).
const CALCULATION_METHOD: u8 = 2;

#[derive(Debug, Deserialize)]
struct AladhanResponse {
    data: Vec<ProviderDay>,
}

/// Client for the monthly timings endpoints.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    http: reqwest::Client,
    base: String,
}

impl AladhanClient {
    /// # Errors
    /// Returns `Network` if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, MiqatError> {
        Self::with_base(DEFAULT_BASE)
    }

    /// Uses an alternate endpoint, e.g. a stub server under test.
    pub fn with_base(base: impl Into<String>) -> Result<Self, MiqatError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MiqatError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base: base.into(),
        })
    }

    /// Fetches one month of daily timings for a coordinate.
    ///
    /// The calendar system selects between the civil-month and lunar-month
    /// endpoint variants.
    ///
    /// # Errors
    /// `Provider` on a non-success response, `Network` on transport or
    /// decode failure.
    pub async fn fetch_month(
        &self,
        coords: Coordinates,
        query: &MonthQuery,
    ) -> Result<Vec<ProviderDay>, MiqatError> {
        let endpoint = match query.calendar {
            CalendarSystem::Gregorian => "calendar",
            CalendarSystem::Hijri => "hijriCalendar",
        };
        let url = format!("{}/v1/{}/{}/{}", self.base, endpoint, query.year, query.month);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.lat.to_string()),
                ("longitude", coords.lon.to_string()),
                ("method", CALCULATION_METHOD.to_string()),
                ("school", query.school.provider_code().to_string()),
            ])
            .send()
            .await
            .map_err(|e| MiqatError::network(format!("Provider request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(MiqatError::provider(format!(
                "Provider returned status {}",
                response.status()
            )));
        }

        let data: AladhanResponse = response
            .json()
            .await
            .map_err(|e| MiqatError::network(format!("Failed to parse provider response: {}", e)))?;

        Ok(data.data)
    }
}

/// Resolves a postal code and fetches its month in one step.
///
/// # Errors
/// Propagates resolver and provider errors unchanged; a failure yields a
/// single error state for the whole month.
pub async fn fetch_month_by_zip(
    resolver: &ZipResolver,
    client: &AladhanClient,
    query: &MonthQuery,
) -> Result<Vec<ProviderDay>, MiqatError> {
    let coords = resolver.resolve(&query.zip).await?;
    client.fetch_month(coords, query).await
}
