use crate::config::{EmailSettings, ProviderKind, Settings};
use crate::domain::ApiKey;
use crate::providers::{EmailProvider, OutboxProvider, ResendProvider};
use crate::relay::{RateLimiter, RelayConfig, RelayService};
use crate::{Error, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
    relay_config: RelayConfig,
    limiter: Arc<RateLimiter>,
    provider: Option<Arc<dyn EmailProvider>>,
}

impl Application {
    #[instrument]
    pub async fn new() -> Result<Self> {
        Self::from_settings(Settings::new()?)
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let relay_config = RelayConfig::from_settings(&settings.relay)?;
        let limiter = Arc::new(RateLimiter::from_settings(&settings.rate_limit));
        let provider = build_provider(&settings.email)?;

        Ok(Self {
            settings,
            relay_config,
            limiter,
            provider,
        })
    }

    /// The relay router with its middleware stack
    pub fn router(&self) -> Router {
        RelayService::new(
            self.relay_config.clone(),
            Arc::clone(&self.limiter),
            self.provider.clone(),
        )
        .into_router()
    }

    #[instrument(skip(self))]
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.settings.bind_address()).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let address: SocketAddr = listener.local_addr()?;
        let pruner = self.limiter.spawn_pruner();

        info!(
            %address,
            path = %self.relay_config.path,
            form_path = %self.relay_config.form_path,
            provider = self.provider.as_ref().map(|p| p.id().to_string()).as_deref().unwrap_or("none"),
            "Contact relay listening"
        );

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await;
        pruner.abort();

        info!("Contact relay stopped");
        result.map_err(Error::from)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }
}

fn build_provider(email: &EmailSettings) -> Result<Option<Arc<dyn EmailProvider>>> {
    match email.provider {
        ProviderKind::Outbox => {
            warn!("using the in-memory outbox, e-mails will not be delivered");
            Ok(Some(Arc::new(OutboxProvider::new())))
        }
        ProviderKind::Resend => {
            let Some(raw) = email.api_key.clone() else {
                warn!("e-mail API key is not configured, submissions will fail until it is set");
                return Ok(None);
            };
            let api_key = ApiKey::try_new(raw)
                .map_err(|e| Error::invalid_setting("email.api_key", e.to_string()))?;
            let provider = ResendProvider::new(api_key, &email.api_base_url, email.timeout())?;
            Ok(Some(Arc::new(provider)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
