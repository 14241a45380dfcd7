#![allow(dead_code)]

//! Shared helpers for the API suites

use axum::Router;
use storecheck_e2e::SuiteContext;
use tokio::task::JoinHandle;

/// Which per-area log file a suite writes to
#[derive(Debug, Clone, Copy)]
pub enum Area {
    Products,
    Users,
    Authentication,
}

/// Build a context from the workspace configuration and check that the
/// backend answers. Returns `None` (with a skip notice) when no backend
/// is reachable, so `cargo test` stays meaningful without one.
/// Configuration problems are fatal, not skippable.
pub async fn live_context(area: Area) -> Option<SuiteContext> {
    let ctx = SuiteContext::from_default_config()
        .unwrap_or_else(|err| panic!("suite configuration failed to load: {}", err));

    let log_file = match area {
        Area::Products => ctx.config.logger.logs_product_path.clone(),
        Area::Users => ctx.config.logger.logs_user_path.clone(),
        Area::Authentication => ctx.config.logger.logs_authentication_path.clone(),
    };
    let _ = ctx.init_logging(&log_file);

    if !ctx.backend_reachable().await {
        eprintln!(
            "skipping live suite: backend not reachable at {}",
            ctx.client.base_url()
        );
        return None;
    }
    Some(ctx)
}

/// An in-process stub backend for the executor and fixture contract
/// suites. The task is aborted on drop.
pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });
        Self {
            base_url: format!("http://{}/", addr),
            handle,
        }
    }

    /// A context whose client points at this stub
    pub fn context(&self) -> SuiteContext {
        let mut config = storecheck_common::SuiteConfig::default();
        config.common.base_url = self.base_url.clone();
        SuiteContext::new(config).expect("stub context")
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
