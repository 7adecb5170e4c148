use clap::Parser;

/// Environment variable that pins the API port outright.
pub const API_PORT_VAR: &str = "API_PORT";
/// Port of the companion UI server, used as the last fallback anchor.
pub const COMPANION_PORT_VAR: &str = "GRADIO_SERVER_PORT";

#[derive(Parser, Debug, Clone)]
#[command(name = "easel", about = "API server for the easel generation backend")]
pub struct LaunchArgs {
    /// API key required by the secured route groups. Empty leaves them open.
    #[arg(long, default_value = "")]
    pub apikey: String,

    /// Forwarded verbatim to workers through the WEBHOOK_URL variable.
    #[arg(long, default_value = "")]
    pub webhook_url: String,

    /// Public host for artifact URLs, with or without a scheme.
    #[arg(long, default_value = "127.0.0.1")]
    pub base_url: String,

    /// Address the HTTP server binds to.
    #[arg(long, default_value = "127.0.0.1")]
    pub listen: String,

    /// Port of the companion UI server; the API then serves on port + 1.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Read access to the process environment, swappable in tests.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Debug, thiserror::Error)]
#[error(
    "no usable API port: set API_PORT, pass --port, or run next to a UI server exporting GRADIO_SERVER_PORT"
)]
pub struct ResolvePortError;

/// Resolved once at startup and shared as axum state afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub webhook_url: String,
    pub api_port: u16,
    pub static_server_base: String,
    pub listen: String,
}

impl AppConfig {
    pub fn from_args(args: &LaunchArgs, env: &impl EnvSource) -> Result<Self, ResolvePortError> {
        let api_port = resolve_port(args.port, env)?;

        Ok(AppConfig {
            api_key: (!args.apikey.is_empty()).then(|| args.apikey.clone()),
            webhook_url: args.webhook_url.clone(),
            api_port,
            static_server_base: resolve_static_base(&args.base_url, api_port),
            listen: args.listen.clone(),
        })
    }
}

/// Ordered port resolution, first hit wins. Every strategy that fails to
/// produce an integer falls through to the next one.
pub fn resolve_port(arg_port: Option<u16>, env: &impl EnvSource) -> Result<u16, ResolvePortError> {
    let from_env = || -> Option<u16> { env.var(API_PORT_VAR)?.trim().parse().ok() };
    let from_arg = || -> Option<u16> { arg_port?.checked_add(1) };
    let from_companion = || -> Option<u16> {
        env.var(COMPANION_PORT_VAR)?
            .trim()
            .parse::<u16>()
            .ok()?
            .checked_add(1)
    };

    let strategies: [&dyn Fn() -> Option<u16>; 3] = [&from_env, &from_arg, &from_companion];

    strategies
        .iter()
        .find_map(|strategy| strategy())
        .ok_or(ResolvePortError)
}

/// A base URL that already carries a scheme is taken verbatim; a bare host
/// gets `http://` and the resolved port.
pub fn resolve_static_base(base_url: &str, port: u16) -> String {
    if base_url.contains("://") {
        base_url.to_string()
    } else {
        format!("http://{base_url}:{port}")
    }
}
