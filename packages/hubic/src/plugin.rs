use hubic_transfer::{TransferPlugin, TransferSettings};

use crate::settings::HubicTransferSettings;

pub const PLUGIN_ID: &str = "hubic";
pub const PLUGIN_NAME: &str = "Hubic";

/// Registers the Hubic backend with a host.
#[derive(Debug, Default, Clone, Copy)]
pub struct HubicTransferPlugin;

impl HubicTransferPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl TransferPlugin for HubicTransferPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn create_empty_settings(&self) -> Box<dyn TransferSettings> {
        Box::new(HubicTransferSettings::new())
    }
}
