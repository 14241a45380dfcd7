//! Suite context
//!
//! Explicitly constructed configuration + client bundle passed into
//! every suite. No process-wide singletons: parallel runners each build
//! their own context from their own configuration.

use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiResult;
use storecheck_common::{logging, SuiteConfig};

pub struct SuiteContext {
    pub config: SuiteConfig,
    pub client: ApiClient,
}

impl SuiteContext {
    pub fn new(config: SuiteConfig) -> ApiResult<Self> {
        let client = ApiClient::new(config.common.base_url.clone())?;
        Ok(Self { config, client })
    }

    /// Build from the workspace configuration file
    pub fn from_default_config() -> ApiResult<Self> {
        Self::new(SuiteConfig::load_default()?)
    }

    /// Install console + per-area file logging for this test binary
    pub fn init_logging(&self, log_file: &Path) -> ApiResult<()> {
        logging::init(Some(log_file))?;
        Ok(())
    }

    /// Probe whether the backend answers at all. Any HTTP status counts
    /// as reachable; only a transport failure means the server is gone.
    pub async fn backend_reachable(&self) -> bool {
        let probe = ApiRequest::get(&self.config.end_points.products_endpoint)
            .timeout(Duration::from_secs(2));
        match self.client.send(probe).await {
            Ok(_) => true,
            Err(err) => {
                warn!(
                    "backend not reachable at {}: {}",
                    self.client.base_url(),
                    err
                );
                false
            }
        }
    }
}
