use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::debug;

use crate::errors::StartupError;
use crate::middleware::default_chain;
use crate::routes::{self, AppState};
use service::storage::UserStore;

/// Router with the seeded store and the default interceptor chain.
pub fn build_app() -> Router {
    let state = AppState::new(UserStore::with_seed());
    routes::build_router(state, default_chain())
}

/// The two lines printed once the listener is bound.
pub fn startup_banner(port: u16) -> [String; 2] {
    [
        format!("🚀 API rodando na porta {port}"),
        "📝 Logs serão exibidos abaixo para cada requisição:".to_string(),
    ]
}

/// Bind `addr`, announce, and serve `app` until the listener fails.
pub async fn serve(addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    let local = listener.local_addr()?;
    debug!(addr = %local, "listener bound");
    for line in startup_banner(local.port()) {
        println!("{line}");
    }
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server.
///
/// Expects `.env` and the tracing subscriber to be set up by the caller.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let addr = cfg.server.bind_addr()?;
    serve(addr, build_app()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_the_port() {
        let [first, second] = startup_banner(3000);
        assert_eq!(first, "🚀 API rodando na porta 3000");
        assert_eq!(second, "📝 Logs serão exibidos abaixo para cada requisição:");
    }
}
