use chrono::Local;
use sf_core::{Article, DateFormatStyle};
use sf_store::ItemDetail;

fn display_title(article: &Article) -> &str {
    match article.title_or_default() {
        "" => "(untitled)",
        title => title,
    }
}

pub fn article_line(index: usize, article: &Article) -> String {
    format!(
        "{:>3}. {}  [{}]",
        index + 1,
        display_title(article),
        article.formatted_date(DateFormatStyle::ShortDateTime, &Local)
    )
}

/// Detail view; `image_bytes` is the size of the loaded cover image, if any.
pub fn detail_block(detail: &ItemDetail, image_bytes: Option<usize>) -> String {
    let item = detail.item();
    let mut lines = vec![display_title(item).to_string()];

    let authors = detail.authors_line();
    if !authors.is_empty() {
        lines.push(authors);
    }
    lines.push(detail.date_line(DateFormatStyle::DayMonthYearTime));
    lines.push(String::new());
    lines.push(item.summary_or_default().to_string());

    if let Some(bytes) = image_bytes {
        lines.push(format!("🖼  cover image: {} bytes", bytes));
    }
    if let Some(url) = detail.full_article_url() {
        lines.push(format!("Read more: {}", url));
    }

    lines.join("\n")
}
