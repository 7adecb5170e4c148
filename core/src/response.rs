use axum::{response::IntoResponse, http::StatusCode, Json};

/// Response envelope shared by the route groups. `T` is the success body,
/// `E` the error body.
#[derive(utoipa::IntoResponses)]
pub enum ApiResponse<T, E>
where T: serde::Serialize + utoipa::ToSchema,
      E: serde::Serialize + utoipa::ToSchema
{
    #[response(status = 200, description = "Ok")]
    Ok(T),

    #[response(status = 400, description = "Bad request")]
    BadRequest(E),

    #[response(status = 401, description = "Unauthorized")]
    Unauthorized(E),
}

impl<T, E> IntoResponse for ApiResponse<T, E>
where T: serde::Serialize + utoipa::ToSchema,
      E: serde::Serialize + utoipa::ToSchema
{
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::Ok(data) => (StatusCode::OK, Json(data)).into_response(),
            Self::BadRequest(error) => (StatusCode::BAD_REQUEST, Json(error)).into_response(),
            Self::Unauthorized(error) => (StatusCode::UNAUTHORIZED, Json(error)).into_response(),
        }
    }
}
