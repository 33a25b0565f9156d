use html_escape::{encode_double_quoted_attribute, encode_text};
use crate::api::models::HeadlinesPage;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; background: #fff; color: #000; padding: 2rem; }
a { color: black; text-decoration: none; display: block; margin-bottom: 1rem; }
a:hover { text-decoration: underline; }";

/// Render the headline listing as a standalone HTML document.
pub fn render_headlines(page: &HeadlinesPage) -> String {
    let title = encode_text(&page.title()).into_owned();

    // Rough guess: ~150 bytes per anchor plus the header
    let mut html = String::with_capacity(1024 + page.headlines.len() * 150);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str(&format!("<style>\n{}\n</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", title));
    html.push_str(&format!("<p>Total articles: {}</p>\n", page.headlines.len()));

    for headline in &page.headlines {
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>\n",
            encode_double_quoted_attribute(&headline.link),
            encode_text(&headline.title),
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}
