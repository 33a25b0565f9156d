use serde::Serialize;
use crate::months::MonthCursor;
use crate::scraper::Headline;

/// Everything the headline page shows.
#[derive(Debug, Serialize)]
pub struct HeadlinesPage {
    pub site_name: String,
    pub start: MonthCursor,
    pub end: MonthCursor,
    pub headlines: Vec<Headline>,
}

impl HeadlinesPage {
    pub fn title(&self) -> String {
        format!("{} Headlines - {} to {}", self.site_name, self.start.short_label(), self.end)
    }
}
