use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::ErrorCode)
    ),
    info(
        title = "ShareIt API",
        version = "0.1.0",
        description = "Lend and borrow things: users, items, bookings and item requests. \
                       The caller is identified by the X-Sharer-User-Id header."
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc),
        (path = "/items", api = domain_items::handlers::ApiDoc),
        (path = "/bookings", api = domain_bookings::handlers::ApiDoc),
        (path = "/requests", api = domain_requests::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_domain_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for prefix in ["/users", "/items", "/bookings", "/requests"] {
            assert!(
                paths.iter().any(|p| p.starts_with(prefix)),
                "no documented path under {}: {:?}",
                prefix,
                paths
            );
        }
        assert!(paths.iter().any(|p| p.as_str() == "/bookings/owner"));
    }
}
