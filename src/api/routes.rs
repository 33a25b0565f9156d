use axum::{
    extract::State,
    response::Html,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::models::HeadlinesPage;
use crate::api::render::render_headlines;
use crate::error::Result;
use crate::months::MonthCursor;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(headlines_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn headlines_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let start_time = std::time::Instant::now();
    let start = state.config.start;
    let end = MonthCursor::today();

    let headlines = state
        .scraper
        .scrape_range(start, end, state.config.max_pages_per_month)
        .await
        .inspect_err(|e| error!(error = %e, elapsed = ?start_time.elapsed(), "Scrape failed"))?;

    info!(
        count = headlines.len(),
        %start,
        %end,
        elapsed = ?start_time.elapsed(),
        "Scrape complete"
    );

    let page = HeadlinesPage {
        site_name: state.scraper.site().name.clone(),
        start,
        end,
        headlines,
    };

    Ok(Html(render_headlines(&page)))
}
