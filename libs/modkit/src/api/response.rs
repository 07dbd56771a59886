use axum::{http::StatusCode, response::IntoResponse, Json};

/// 201 Created + JSON
pub fn created_json<T: serde::Serialize>(value: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(value))
}

/// 204 No Content
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            created_json("x").into_response().status(),
            StatusCode::CREATED
        );
        assert_eq!(no_content().into_response().status(), StatusCode::NO_CONTENT);
    }
}
