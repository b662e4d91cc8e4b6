//! Postal-code geocoding via the Zippopotam API.

use serde::{Deserialize, Serialize};

use crate::clock::MiqatError;

/// Geographic coordinates of a resolved postal code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

const DEFAULT_BASE: &str = "https://api.zippopotam.us/us";
const USER_AGENT: &str = concat!("miqat/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ZippopotamResponse {
    places: Vec<ZippopotamPlace>,
}

// Zippopotam reports coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct ZippopotamPlace {
    latitude: String,
    longitude: String,
}

/// Resolves US postal codes to coordinates.
#[derive(Debug, Clone)]
pub struct ZipResolver {
    http: reqwest::Client,
    base: String,
}

impl ZipResolver {
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

    /// Resolves a postal code.
    ///
    /// # Errors
    /// `ZipNotFound` on a non-success response or an empty place list;
    /// `Network` on transport or decode failure.
    pub async fn resolve(&self, zip: &str) -> Result<Coordinates, MiqatError> {
        let url = format!("{}/{}", self.base, zip);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MiqatError::network(format!("Zip lookup failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(MiqatError::ZipNotFound {
                zip: zip.to_string(),
            });
        }

        let data: ZippopotamResponse = response
            .json()
            .await
            .map_err(|e| MiqatError::network(format!("Failed to parse zip response: {}", e)))?;

        let place = data.places.first().ok_or_else(|| MiqatError::ZipNotFound {
            zip: zip.to_string(),
        })?;

        let lat = place
            .latitude
            .parse()
            .map_err(|_| MiqatError::network("Malformed latitude in zip response"))?;
        let lon = place
            .longitude
            .parse()
            .map_err(|_| MiqatError::network("Malformed longitude in zip response"))?;

        Ok(Coordinates { lat, lon })
    }
}
