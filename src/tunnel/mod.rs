use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use url::Url;

/// A capability that publishes a locally bound port under a public URL.
/// Absence or failure of the capability must never abort startup; callers
/// log and keep their locally resolved base URL.
pub trait Tunnel {
    fn expose(&self, port: u16) -> impl std::future::Future<Output = anyhow::Result<Url>> + Send;
}

/// Drives a local ngrok agent: spawns the binary, then reads the public URL
/// back from the agent's inspection API. The agent picks up NGROK_AUTHTOKEN
/// from the environment on its own.
pub struct NgrokTunnel {
    agent_api: String,
    spawn_agent: bool,
    attempts: u32,
    delay: Duration,
}

impl Default for NgrokTunnel {
    fn default() -> Self {
        NgrokTunnel {
            agent_api: "http://127.0.0.1:4040".into(),
            spawn_agent: true,
            attempts: 20,
            delay: Duration::from_millis(250),
        }
    }
}

#[derive(serde::Deserialize)]
struct TunnelList {
    tunnels: Vec<AgentTunnel>,
}

#[derive(serde::Deserialize)]
struct AgentTunnel {
    public_url: String,
    proto: String,
    config: AgentTunnelConfig,
}

#[derive(serde::Deserialize)]
struct AgentTunnelConfig {
    addr: String,
}

impl NgrokTunnel {
    /// Talk to an agent that is already running, e.g. a mock in tests.
    pub fn attached_to(agent_api: impl Into<String>) -> Self {
        NgrokTunnel {
            agent_api: agent_api.into(),
            spawn_agent: false,
            attempts: 3,
            delay: Duration::from_millis(10),
        }
    }

    async fn discover_public_url(
        &self,
        client: &reqwest::Client,
        port: u16,
    ) -> anyhow::Result<Option<Url>> {
        let list: TunnelList = client
            .get(format!("{}/api/tunnels", self.agent_api))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let suffix = format!(":{port}");
        for tunnel in list.tunnels {
            if tunnel.proto == "https" && tunnel.config.addr.ends_with(&suffix) {
                let url = Url::parse(&tunnel.public_url)
                    .with_context(|| format!("agent reported bad URL {:?}", tunnel.public_url))?;
                return Ok(Some(url));
            }
        }

        Ok(None)
    }
}

impl Tunnel for NgrokTunnel {
    async fn expose(&self, port: u16) -> anyhow::Result<Url> {
        if self.spawn_agent {
            // The child is deliberately not awaited or killed; the agent has
            // to outlive this function and dies with the process.
            tokio::process::Command::new("ngrok")
                .args(["http", &port.to_string()])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .context("could not start the ngrok agent (is the binary on PATH?)")?;
        }

        let client = reqwest::Client::new();

        for _ in 0..self.attempts {
            match self.discover_public_url(&client, port).await {
                Ok(Some(url)) => return Ok(url),
                Ok(None) => {}
                Err(err) => tracing::debug!("ngrok agent not ready yet: {err:#}"),
            }

            tokio::time::sleep(self.delay).await;
        }

        anyhow::bail!("ngrok agent never reported an https tunnel for port {port}")
    }
}
