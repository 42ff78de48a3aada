use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::query::exists;

// Exact class attribute: a disabled "Previous" item must not end the walk.
static DISABLED: LazyLock<Selector> = LazyLock::new(|| Selector::parse(r#"li[class="pagination--disabled"]"#).unwrap());
static NEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li.pagination__next").unwrap());

/// Last page unless a next marker exists and no disabled marker does.
pub fn is_last_page(document: &Html) -> bool {
    exists(document, &DISABLED) || !exists(document, &NEXT)
}
