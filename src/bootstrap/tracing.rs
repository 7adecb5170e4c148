use tracing_subscriber::EnvFilter;

pub async fn init_tracing() {
    // `RUST_LOG` wins when set; otherwise keep our own crate at info.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("easel=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
