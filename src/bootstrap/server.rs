use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use crate::config::app::{AppConfig, LaunchArgs, ProcessEnv};
use crate::tunnel::{NgrokTunnel, Tunnel};

/// Wildcard bind that opts the process into tunnel exposure.
const ALL_INTERFACES: &str = "0.0.0.0";

pub async fn init_server(args: LaunchArgs) -> anyhow::Result<()> {
    // Exhausting every port strategy is a startup precondition violation,
    // so this error is allowed to abort the process.
    let mut config = AppConfig::from_args(&args, &ProcessEnv)?;

    export_webhook_url(&config);

    expose_through_tunnel(&mut config, &NgrokTunnel::default()).await;

    // Build the router
    let addr: SocketAddr = format!("{}:{}", config.listen, config.api_port)
        .parse()
        .with_context(|| format!("invalid listen address {:?}", config.listen))?;
    let app = crate::routes::routes(Arc::new(config));

    // Start the server
    tracing::info!("API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Queue workers read the webhook target straight from the environment.
fn export_webhook_url(config: &AppConfig) {
    // SAFETY: called from the single-threaded startup sequence, before the
    // runtime spawns anything that reads the environment.
    unsafe { std::env::set_var("WEBHOOK_URL", &config.webhook_url) };
}

/// When bound to all interfaces, try to publish the port through the tunnel
/// and adopt its public URL as the artifact base. Tunnel failure is logged
/// and otherwise ignored; the locally resolved base stays in effect.
async fn expose_through_tunnel(config: &mut AppConfig, tunnel: &impl Tunnel) {
    if config.listen != ALL_INTERFACES {
        return;
    }

    match tunnel.expose(config.api_port).await {
        Ok(public_url) => {
            tracing::info!("public API URL: {public_url}");
            config.static_server_base = public_url.to_string().trim_end_matches('/').to_string();
        }
        Err(err) => {
            tracing::warn!("failed to open tunnel, keeping {}: {err:#}", config.static_server_base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    struct FixedTunnel(&'static str);

    impl Tunnel for FixedTunnel {
        async fn expose(&self, _port: u16) -> anyhow::Result<Url> {
            Ok(Url::parse(self.0)?)
        }
    }

    struct FailingTunnel;

    impl Tunnel for FailingTunnel {
        async fn expose(&self, _port: u16) -> anyhow::Result<Url> {
            anyhow::bail!("no agent")
        }
    }

    fn config(listen: &str) -> AppConfig {
        AppConfig {
            api_key: None,
            webhook_url: "http://hooks.internal/done".into(),
            api_port: 8000,
            static_server_base: "http://example.com:8000".into(),
            listen: listen.into(),
        }
    }

    #[tokio::test]
    async fn tunnel_failure_keeps_the_resolved_base() {
        let mut config = config(ALL_INTERFACES);
        expose_through_tunnel(&mut config, &FailingTunnel).await;
        assert_eq!(config.static_server_base, "http://example.com:8000");
    }

    #[tokio::test]
    async fn tunnel_success_replaces_the_base() {
        let mut config = config(ALL_INTERFACES);
        expose_through_tunnel(&mut config, &FixedTunnel("https://aaaa.ngrok.io")).await;
        assert_eq!(config.static_server_base, "https://aaaa.ngrok.io");
    }

    #[tokio::test]
    async fn loopback_bind_never_tunnels() {
        let mut config = config("127.0.0.1");
        // FixedTunnel would flip the base if it were consulted.
        expose_through_tunnel(&mut config, &FixedTunnel("https://aaaa.ngrok.io")).await;
        assert_eq!(config.static_server_base, "http://example.com:8000");
    }

    #[test]
    fn webhook_url_is_exported_verbatim() {
        let config = config("127.0.0.1");
        export_webhook_url(&config);
        assert_eq!(
            std::env::var("WEBHOOK_URL").as_deref(),
            Ok("http://hooks.internal/done")
        );
    }
}
