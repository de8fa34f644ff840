//! Exchange of an OAuth access token for storage credentials.

use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use hubic_http::{HttpExecutor, HttpRequest};
use hubic_transfer::StorageError;

pub const HUBIC_API_URL: &str = "https://api.hubic.com";
pub const AUTHORIZATION_URL: &str = "https://api.hubic.com/oauth/auth/";

pub const CLIENT_ID: &str = "api_hubic_0caV8Zn0vrTS8nLYu7W6wVMvYyuIkuPc";
pub const REDIRECT_URI: &str = "https://www.syncany.org/oauth/";
pub const SCOPE: &str = "account.r,credentials.r,getAllLinks.r,links.drw";

const CREDENTIALS_PATH: &str = "1.0/account/credentials";

/// Storage endpoint and token handed out for an access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub endpoint: String,
}

/// Ask the account API for storage credentials.
pub fn fetch_credentials(
    executor: &dyn HttpExecutor,
    api_base: &str,
    access_token: &str,
) -> Result<Credentials, StorageError> {
    let url = format!("{}/{}", api_base.trim_end_matches('/'), CREDENTIALS_PATH);
    let operation = "fetch storage credentials";

    let request = HttpRequest::get(url)
        .with_header("Authorization", format!("Bearer {}", access_token))
        .json();
    let response = executor
        .execute(&request)
        .map_err(|e| StorageError::transport(operation, e))?;

    match response.status {
        200 => {}
        401 => {
            warn!("access token rejected");
            return Err(StorageError::AuthenticationExpired);
        }
        status => return Err(StorageError::unexpected_status(operation, status)),
    }

    let body = response
        .json()
        .ok_or_else(|| StorageError::decode("credentials response is not JSON"))?;
    let credentials = Credentials::deserialize(body)
        .map_err(|e| StorageError::decode(format!("invalid credentials response: {}", e)))?;

    debug!(endpoint = %credentials.endpoint, "received storage credentials");
    Ok(credentials)
}

/// Random `state` value for an authorization request.
pub fn new_state() -> String {
    format!("RandomString_{}", Uuid::new_v4())
}

/// Page where the user grants access and receives an access token.
pub fn authorization_url(state: &str) -> String {
    let mut url = match Url::parse(AUTHORIZATION_URL) {
        Ok(url) => url,
        Err(_) => return AUTHORIZATION_URL.to_string(),
    };
    url.query_pairs_mut()
        .append_pair("client_id", CLIENT_ID)
        .append_pair("redirect_uri", REDIRECT_URI)
        .append_pair("scope", SCOPE)
        .append_pair("response_type", "token")
        .append_pair("state", state);
    url.into()
}
