pub async fn init_env() {
    // A missing .env file is fine; deployments usually pass the environment
    // directly. Anything else (unreadable file, bad syntax) is worth a line
    // on stderr since tracing is not up yet.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("failed to load .env: {err}");
        }
    }
}
