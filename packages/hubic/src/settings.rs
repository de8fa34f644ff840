//! Connection settings for the Hubic backend.

use std::sync::Arc;

use tracing::info;

use hubic_http::{HttpExecutor, ReqwestExecutor};
use hubic_transfer::{
    PropertyDescriptor, PropertyVisitor, StorageError, TransferManager, TransferSettings,
};

use crate::client::HubicClient;
use crate::credentials::{authorization_url, fetch_credentials, new_state, HUBIC_API_URL};
use crate::manager::HubicTransferManager;

pub const SETTINGS_TYPE: &str = "hubic";

pub const ACCESS_TOKEN: &str = "accessToken";
pub const TOKEN: &str = "token";
pub const ENDPOINT: &str = "endpoint";

/// Storage token and endpoint, plus what is needed to obtain them.
///
/// The access token itself is never kept: setting it exchanges it for
/// credentials right away.
pub struct HubicTransferSettings {
    token: Option<String>,
    endpoint: Option<String>,
    api_base: String,
    executor: Option<Arc<dyn HttpExecutor>>,
}

impl Default for HubicTransferSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl HubicTransferSettings {
    pub fn new() -> Self {
        Self {
            token: None,
            endpoint: None,
            api_base: HUBIC_API_URL.to_string(),
            executor: None,
        }
    }

    /// Send every request, credentials exchange included, through `executor`.
    pub fn with_executor(mut self, executor: Arc<dyn HttpExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_credentials(mut self, token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn executor(&self) -> Result<Arc<dyn HttpExecutor>, StorageError> {
        match &self.executor {
            Some(executor) => Ok(Arc::clone(executor)),
            None => {
                let executor = ReqwestExecutor::new()
                    .map_err(|e| StorageError::transport("create HTTP client", e))?;
                Ok(Arc::new(executor))
            }
        }
    }

    /// Replace token and endpoint with the credentials issued for
    /// `access_token`.
    pub fn set_access_token(&mut self, access_token: &str) -> Result<(), StorageError> {
        let executor = self.executor()?;
        let credentials = fetch_credentials(executor.as_ref(), &self.api_base, access_token)?;

        info!(endpoint = %credentials.endpoint, "storage credentials updated");
        self.token = Some(credentials.token);
        self.endpoint = Some(credentials.endpoint);
        Ok(())
    }

    fn access_token_property() -> PropertyDescriptor {
        PropertyDescriptor {
            id: ACCESS_TOKEN,
            description: format!(
                "Access token (open {} to get one)",
                authorization_url(&new_state())
            ),
            required: true,
            sensitive: true,
            persisted: false,
            prompted: true,
        }
    }

    fn token_property() -> PropertyDescriptor {
        PropertyDescriptor {
            id: TOKEN,
            description: "Storage token".to_string(),
            required: true,
            sensitive: true,
            persisted: true,
            prompted: false,
        }
    }

    fn endpoint_property() -> PropertyDescriptor {
        PropertyDescriptor {
            id: ENDPOINT,
            description: "Storage endpoint".to_string(),
            required: true,
            sensitive: false,
            persisted: true,
            prompted: false,
        }
    }
}

impl TransferSettings for HubicTransferSettings {
    fn settings_type(&self) -> &str {
        SETTINGS_TYPE
    }

    fn visit_properties(&mut self, visitor: &mut dyn PropertyVisitor) -> Result<(), StorageError> {
        if let Some(access_token) = visitor.string_property(&Self::access_token_property(), None) {
            self.set_access_token(&access_token)?;
        }

        if let Some(token) = visitor.string_property(&Self::token_property(), self.token.as_deref()) {
            self.token = Some(token);
        }

        if let Some(endpoint) =
            visitor.string_property(&Self::endpoint_property(), self.endpoint.as_deref())
        {
            self.endpoint = Some(endpoint);
        }

        Ok(())
    }

    fn create_transfer_manager(&self) -> Result<Box<dyn TransferManager>, StorageError> {
        let (Some(token), Some(endpoint)) = (&self.token, &self.endpoint) else {
            return Err(StorageError::MissingCredentials);
        };

        let client = HubicClient::with_executor(self.executor()?, endpoint, token.as_str())
            .map_err(|e| StorageError::transport("create storage client", e))?;
        Ok(Box::new(HubicTransferManager::with_client(client)))
    }
}
