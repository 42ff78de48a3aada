use scraper::{ElementRef, Html, Selector};

/// Trimmed text of the first descendant matching `selector`, if any.
pub fn first_text(node: ElementRef<'_>, selector: &Selector) -> Option<String> {
    node.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Attribute value from the first direct child element named `tag` that carries it.
pub fn child_attr(node: ElementRef<'_>, tag: &str, attr: &str) -> Option<String> {
    node.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == tag)
        .find_map(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
}

pub fn exists(document: &Html, selector: &Selector) -> bool {
    document.select(selector).next().is_some()
}
