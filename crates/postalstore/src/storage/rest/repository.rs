//! Remote table API repository implementation.
//!
//! Implements the repository trait from `postalstore_core::storage` against
//! a PostgREST-style table endpoint over HTTP.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;

use postalstore_core::postal::{Location, NewPostalCode, PostalCode, PostalCodeUpdate};
use postalstore_core::storage::{PostalCodeRepository, RepositoryError, Result};

use super::conversions::{LocationRow, PostalCodeRow};
use super::error::{is_no_rows, map_error_response, map_request_error, parse_error_body, ErrorTarget};

/// `Accept` value asking the table API for exactly one object instead of an
/// array. A zero-row result then comes back as the "no rows" error signal.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Remote table API repository.
///
/// Stateless between calls: every operation is one HTTP round trip against
/// the `postal_codes` table.
#[derive(Debug, Clone)]
pub struct RestRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestRepository {
    /// Creates a repository against the given table API root
    /// (e.g. `https://store.example.com/rest/v1`).
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if url::Url::parse(base_url).is_err() {
            return Err(RepositoryError::InvalidData(format!(
                "invalid store URL: {base_url}"
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key,
        })
    }

    /// Builds a `postal_codes` table URL with the given query parameters.
    fn table_url(&self, query: &[(&str, String)]) -> String {
        let mut url = format!("{}/postal_codes", self.base_url);
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// Starts a request with the store's auth headers applied.
    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key)
                .header(AUTHORIZATION, format!("Bearer {key}"));
        }
        request
    }

    /// Reads a response expected to carry an array of postal code rows.
    async fn expect_rows(
        &self,
        response: reqwest::Response,
        target: ErrorTarget<'_>,
    ) -> Result<Vec<PostalCodeRow>> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_request_error)?;
        if !(200..300).contains(&status) {
            return Err(map_error_response(status, &body, target));
        }
        serde_json::from_str(&body).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    /// Seeds a location via the `locations` table and returns it with its
    /// store-assigned ID.
    ///
    /// Locations are owned by the store operator; the repository contract
    /// only reads them. This helper exists for bootstrapping and tests.
    pub async fn insert_location(&self, name: &str, region: Option<&str>) -> Result<Location> {
        let url = format!("{}/locations", self.base_url);
        let payload = serde_json::json!({ "name": name, "region": region });
        let response = self
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_request_error)?;
        if !(200..300).contains(&status) {
            return Err(map_error_response(status, &body, ErrorTarget::Collection));
        }
        let rows: Vec<LocationRow> = serde_json::from_str(&body)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| RepositoryError::QueryFailed("insert returned no rows".to_string()))
    }
}

/// Resolves a single-object lookup response.
///
/// A success body carries exactly one row. The "no rows" signal resolves as
/// an absent result; any other failure surfaces as an error.
fn single_lookup_result(status: u16, body: &str, code: &str) -> Result<Option<PostalCode>> {
    if (200..300).contains(&status) {
        let row: PostalCodeRow =
            serde_json::from_str(body).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        return Ok(Some(row.into()));
    }

    // A missed lookup by code is an expected outcome, not an error.
    if is_no_rows(&parse_error_body(body)) {
        return Ok(None);
    }
    Err(map_error_response(status, body, ErrorTarget::Row(code)))
}

#[async_trait]
impl PostalCodeRepository for RestRepository {
    async fn get_postal_codes(&self) -> Result<Vec<PostalCode>> {
        let url = self.table_url(&[
            ("select", "*,locations(*)".to_string()),
            ("order", "code.asc".to_string()),
        ]);
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(map_request_error)?;

        let rows = self.expect_rows(response, ErrorTarget::Collection).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_postal_codes_by_location(&self, location_id: i64) -> Result<Vec<PostalCode>> {
        let url = self.table_url(&[
            ("select", "*".to_string()),
            ("location_id", format!("eq.{location_id}")),
            ("order", "code.asc".to_string()),
        ]);
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(map_request_error)?;

        let rows = self.expect_rows(response, ErrorTarget::Collection).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_postal_code(&self, code: &str) -> Result<Option<PostalCode>> {
        let url = self.table_url(&[
            ("select", "*,locations(*)".to_string()),
            ("code", format!("eq.{code}")),
        ]);
        let response = self
            .request(Method::GET, &url)
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_request_error)?;
        single_lookup_result(status, &body, code)
    }

    async fn create_postal_code(&self, postal_code: &NewPostalCode) -> Result<PostalCode> {
        let url = self.table_url(&[]);
        let response = self
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(postal_code)
            .send()
            .await
            .map_err(map_request_error)?;

        let rows = self
            .expect_rows(response, ErrorTarget::Insert(&postal_code.code))
            .await?;
        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| RepositoryError::QueryFailed("insert returned no rows".to_string()))
    }

    async fn update_postal_code(&self, id: i64, changes: &PostalCodeUpdate) -> Result<PostalCode> {
        let url = self.table_url(&[("id", format!("eq.{id}"))]);
        let response = self
            .request(Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await
            .map_err(map_request_error)?;

        let rows = self
            .expect_rows(response, ErrorTarget::Row(&id.to_string()))
            .await?;
        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "PostalCode",
                id: id.to_string(),
            })
    }

    async fn delete_postal_code(&self, id: i64) -> Result<bool> {
        let url = self.table_url(&[("id", format!("eq.{id}"))]);
        let response = self
            .request(Method::DELETE, &url)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(map_request_error)?;

        let rows = self
            .expect_rows(response, ErrorTarget::Row(&id.to_string()))
            .await?;
        if rows.is_empty() {
            return Err(RepositoryError::NotFound {
                entity_type: "PostalCode",
                id: id.to_string(),
            });
        }
        Ok(true)
    }
}
