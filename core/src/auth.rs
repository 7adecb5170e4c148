use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// A guard that decides whether a presented credential header grants access.
///
/// Route groups attach an implementation as a request extension; the
/// middleware pulls it back out, so the same middleware works for any
/// credential scheme.
pub trait KeyGuard {
    /// Name of the request header carrying the credential.
    fn header_name(&self) -> &'static str;

    /// Check the presented credential. `None` means the header was absent
    /// or not valid UTF-8.
    fn verify(&self, presented: Option<&str>) -> Result<(), StatusCode>;
}

#[tracing::instrument(level = "debug", skip(request, next))]
pub async fn key_auth_middleware<G>(request: Request, next: Next) -> Result<Response, StatusCode>
where
    G: KeyGuard + Send + Sync + 'static,
{
    {
        let Some(guard) = request.extensions().get::<G>() else {
            tracing::error!("no KeyGuard Extension available");

            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        };

        let presented = request
            .headers()
            .get(guard.header_name())
            .and_then(|value| value.to_str().ok());

        guard.verify(presented)?;
    }

    Ok(next.run(request).await)
}
