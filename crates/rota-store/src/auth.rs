//! OAuth authorization against the task store.
//!
//! Installed-application flow: client credentials are read from a file on
//! disk, the acquired token is cached in a second file between runs, and a
//! cached token is refreshed when it nears expiry. The interactive part
//! (visiting the authorization URL and pasting the code back) is driven by
//! the binary; this module only builds the URL and performs the exchanges.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use rota_core::constants::STORE_OAUTH_SCOPE;

use crate::error::{StoreError, StoreResult};

/// Seconds before nominal expiry at which a token is treated as expired,
/// absorbing clock skew and request latency.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// OAuth client credentials file, installed-application shape.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsFile {
    pub installed: InstalledCredentials,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstalledCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub redirect_uris: Vec<String>,
}

impl InstalledCredentials {
    /// First registered redirect URI.
    fn redirect_uri(&self) -> StoreResult<&str> {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .ok_or_else(|| StoreError::Auth("credentials file has no redirect URIs".to_owned()))
    }
}

/// Cached token as stored on disk between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Absolute expiry instant, computed from the grant's `expires_in` at
    /// acquisition time.
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// Whether the access token should be refreshed before use.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now + TimeDelta::seconds(EXPIRY_MARGIN_SECONDS) >= expiry,
            None => false,
        }
    }
}

/// Token endpoint response shape.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_stored(self, now: DateTime<Utc>, previous_refresh: Option<String>) -> StoredToken {
        StoredToken {
            access_token: self.access_token,
            // Refresh grants omit the refresh token; keep the one we have.
            refresh_token: self.refresh_token.or(previous_refresh),
            expiry: self.expires_in.map(|seconds| now + TimeDelta::seconds(seconds)),
        }
    }
}

/// Acquires and renews access tokens, caching them on disk.
#[derive(Debug, Clone)]
pub struct Authorizer {
    http: reqwest::Client,
    credentials: InstalledCredentials,
    token_path: PathBuf,
}

impl Authorizer {
    /// ## Summary
    /// Reads the client credentials file and prepares an authorizer that
    /// caches tokens at `token_path`.
    ///
    /// ## Errors
    /// Fails if the credentials file cannot be read or parsed.
    pub async fn from_files(
        credentials_path: impl AsRef<Path>,
        token_path: impl Into<PathBuf>,
    ) -> StoreResult<Self> {
        let bytes = tokio::fs::read(credentials_path.as_ref()).await?;
        let file: CredentialsFile = serde_json::from_slice(&bytes)?;
        Ok(Self {
            http: reqwest::Client::new(),
            credentials: file.installed,
            token_path: token_path.into(),
        })
    }

    /// ## Summary
    /// Builds the URL the user visits to grant access.
    ///
    /// ## Errors
    /// Fails if the credentials carry no redirect URI or an unparseable
    /// authorization endpoint.
    pub fn authorization_url(&self) -> StoreResult<String> {
        let redirect_uri = self.credentials.redirect_uri()?;
        let url = reqwest::Url::parse_with_params(
            &self.credentials.auth_uri,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", STORE_OAUTH_SCOPE),
                ("access_type", "offline"),
            ],
        )
        .map_err(|e| StoreError::Auth(format!("invalid authorization endpoint: {e}")))?;
        Ok(url.into())
    }

    /// Whether a cached token exists. An unreadable or unparseable cache
    /// counts as absent, prompting re-authorization rather than failing.
    pub async fn is_authorized(&self) -> bool {
        matches!(self.read_cache().await, Ok(Some(_)))
    }

    /// ## Summary
    /// Returns a live access token: the cached one if still valid, a
    /// refreshed one when expired.
    ///
    /// ## Errors
    /// Fails if no token is cached, the cached token is expired without a
    /// refresh token, or the refresh grant is rejected.
    pub async fn access_token(&self) -> StoreResult<String> {
        let Some(token) = self.read_cache().await? else {
            return Err(StoreError::Auth(
                "no cached token; interactive authorization required".to_owned(),
            ));
        };

        if token.is_expired(Utc::now()) {
            let Some(refresh_token) = token.refresh_token.clone() else {
                return Err(StoreError::Auth(
                    "cached token is expired and has no refresh token".to_owned(),
                ));
            };
            tracing::debug!("Cached token expired, refreshing");
            let renewed = self.refresh(&refresh_token).await?;
            return Ok(renewed.access_token);
        }

        Ok(token.access_token)
    }

    /// ## Summary
    /// Exchanges an interactive authorization code for a token and caches
    /// it for later program executions.
    ///
    /// ## Errors
    /// Fails if the exchange is rejected or the cache cannot be written.
    pub async fn exchange_code(&self, code: &str) -> StoreResult<StoredToken> {
        let redirect_uri = self.credentials.redirect_uri()?.to_owned();
        let response = self
            .token_request(&[
                ("code", code),
                ("client_id", &self.credentials.client_id),
                ("client_secret", &self.credentials.client_secret),
                ("redirect_uri", &redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .await?;
        let token = response.into_stored(Utc::now(), None);
        self.write_cache(&token).await?;
        tracing::info!(path = %self.token_path.display(), "Token stored");
        Ok(token)
    }

    /// Renews an expired access token and updates the cache.
    async fn refresh(&self, refresh_token: &str) -> StoreResult<StoredToken> {
        let response = self
            .token_request(&[
                ("refresh_token", refresh_token),
                ("client_id", &self.credentials.client_id),
                ("client_secret", &self.credentials.client_secret),
                ("grant_type", "refresh_token"),
            ])
            .await?;
        let token = response.into_stored(Utc::now(), Some(refresh_token.to_owned()));
        self.write_cache(&token).await?;
        Ok(token)
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> StoreResult<TokenResponse> {
        let response = self
            .http
            .post(&self.credentials.token_uri)
            .form(params)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<TokenResponse>().await?)
    }

    async fn read_cache(&self) -> StoreResult<Option<StoredToken>> {
        let bytes = match tokio::fs::read(&self.token_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.token_path.display(),
                    "Token cache is unreadable, treating as absent");
                Ok(None)
            }
        }
    }

    async fn write_cache(&self, token: &StoredToken) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(token)?;
        tokio::fs::write(&self.token_path, bytes).await?;
        Ok(())
    }
}
