use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page front end. All rendering happens client-side against `/api/v1/analyze`.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
