//! Firestore REST client: service-account token exchange and document
//! upserts.
//!
//! Authentication follows the standard service-account flow: an RS256
//! JWT assertion signed with the key's private key is exchanged at the
//! token endpoint for a short-lived access token, which is cached and
//! refreshed shortly before expiry. Writes are `PATCH` calls without an
//! update mask, which gives create-or-replace semantics for the full
//! document.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use menuport_types::{MenuItem, StoreError};

use crate::credentials::ServiceAccountKey;
use crate::store::DocumentStore;

const FIRESTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before their reported expiry.
const TOKEN_EXPIRY_SKEW_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Error body returned by the Firestore REST API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Authenticated client for one Firestore collection.
///
/// Construction performs the first token exchange: an unusable or
/// unauthorized key is fatal at startup, before any row is processed.
pub struct FirestoreStore {
    http: reqwest::blocking::Client,
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    collection: String,
    base_url: String,
    token: Option<CachedToken>,
}

impl FirestoreStore {
    /// Build an authenticated client for `collection`.
    pub fn connect(
        key: ServiceAccountKey,
        collection: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("unusable private key: {e}")))?;
        let http = reqwest::blocking::Client::builder()
            .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let mut store = Self {
            http,
            key,
            signing_key,
            collection: collection.into(),
            base_url: FIRESTORE_BASE_URL.to_string(),
            token: None,
        };
        store.token = Some(store.fetch_token()?);

        tracing::info!(
            project = store.key.project_id,
            collection = store.collection,
            client = store.key.client_email,
            "Firestore client authenticated"
        );
        Ok(store)
    }

    /// Exchange a signed JWT assertion for an access token.
    fn fetch_token(&self) -> Result<CachedToken, StoreError> {
        let now = Utc::now();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: FIRESTORE_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        if !self.key.private_key_id.is_empty() {
            header.kid = Some(self.key.private_key_id.clone());
        }
        let assertion = jsonwebtoken::encode(&header, &claims, &self.signing_key)
            .map_err(|e| StoreError::Auth(format!("failed to sign token assertion: {e}")))?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StoreError::Auth(format!(
                "token exchange failed with HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| StoreError::Auth(format!("malformed token response: {e}")))?;
        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }

    /// Current access token, refreshed when within the expiry skew.
    fn token(&mut self) -> Result<String, StoreError> {
        let refresh_at = Utc::now() + Duration::seconds(TOKEN_EXPIRY_SKEW_SECS);
        match &self.token {
            Some(cached) if refresh_at < cached.expires_at => Ok(cached.access_token.clone()),
            _ => {
                let fresh = self.fetch_token()?;
                let access_token = fresh.access_token.clone();
                self.token = Some(fresh);
                Ok(access_token)
            }
        }
    }

    fn collection_url(&self) -> String {
        documents_url(&self.base_url, &self.key.project_id, &self.collection)
    }

    fn rejection(response: reqwest::blocking::Response) -> StoreError {
        let status = response.status().as_u16();
        let message = match response.json::<ApiErrorResponse>() {
            Ok(body) => body.error.message,
            Err(_) => "no error detail in response".to_string(),
        };
        StoreError::Rejected { status, message }
    }
}

impl DocumentStore for FirestoreStore {
    fn upsert(&mut self, doc_id: &str, item: &MenuItem) -> Result<(), StoreError> {
        let token = self.token()?;
        let url = format!("{}/{}", self.collection_url(), doc_id);

        let response = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&encode_fields(item))
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(response))
        }
    }

    fn healthcheck(&mut self) -> Result<(), StoreError> {
        let token = self.token()?;
        let url = format!("{}?pageSize=1", self.collection_url());

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(response))
        }
    }
}

fn documents_url(base_url: &str, project_id: &str, collection: &str) -> String {
    format!("{base_url}/projects/{project_id}/databases/(default)/documents/{collection}")
}

/// Encode a document as Firestore typed values.
///
/// Per the REST wire format, `integerValue` is carried as a string and
/// `doubleValue` as a JSON number.
fn encode_fields(item: &MenuItem) -> serde_json::Value {
    serde_json::json!({
        "fields": {
            "category": { "stringValue": item.category },
            "dishName": { "stringValue": item.dish_name },
            "protein": { "doubleValue": item.protein },
            "fat": { "doubleValue": item.fat },
            "carbohydrates": { "doubleValue": item.carbohydrates },
            "totalCalories": { "doubleValue": item.total_calories },
            "imageUrl": { "stringValue": item.image_url },
            "status": { "stringValue": item.status },
            "displayOrder": { "integerValue": item.display_order.to_string() },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuItem {
        MenuItem {
            category: "Soup".to_string(),
            dish_name: "Miso".to_string(),
            protein: 2.0,
            fat: 1.0,
            carbohydrates: 3.0,
            total_calories: 40.0,
            image_url: "/a.png".to_string(),
            status: "available".to_string(),
            display_order: 1,
        }
    }

    #[test]
    fn documents_url_targets_the_default_database() {
        let url = documents_url("https://firestore.googleapis.com/v1", "menu-app", "menuItems");
        assert_eq!(
            url,
            "https://firestore.googleapis.com/v1/projects/menu-app/databases/(default)/documents/menuItems"
        );
    }

    #[test]
    fn encode_fields_uses_firestore_typed_values() {
        let value = encode_fields(&sample());
        let fields = &value["fields"];

        assert_eq!(fields["category"]["stringValue"], "Soup");
        assert_eq!(fields["dishName"]["stringValue"], "Miso");
        assert_eq!(fields["protein"]["doubleValue"], 2.0);
        assert_eq!(fields["totalCalories"]["doubleValue"], 40.0);
        // integerValue travels as a string on the wire
        assert_eq!(fields["displayOrder"]["integerValue"], "1");
        assert_eq!(fields.as_object().unwrap().len(), 9);
    }

    #[test]
    fn encode_fields_keeps_fractional_doubles() {
        let mut item = sample();
        item.fat = 0.5;
        let value = encode_fields(&item);
        assert_eq!(value["fields"]["fat"]["doubleValue"], 0.5);
    }
}
