//! Handles GET /health

pub async fn handle_health() -> &'static str {
    "ok"
}
