/// Genre identifiers accepted by the radio episode index.
pub const ALLOWED_CATEGORIES: &[&str] = &[
    "arts",
    "cbbc",
    "cbeebies",
    "comedy",
    "documentaries",
    "drama-and-soaps",
    "entertainment",
    "films",
    "food",
    "history",
    "lifestyle",
    "music",
    "news",
    "science-and-nature",
    "sport",
    "audio-described",
    "signed",
    "northern-ireland",
    "scotland",
    "wales",
];

pub fn is_allowed(category: &str) -> bool {
    ALLOWED_CATEGORIES.contains(&category)
}

/// Usage text shown for a missing or unknown category.
pub fn usage() -> String {
    format!(
        "Usage: nitroradical <category name>\nAllowed categories:\n{}",
        ALLOWED_CATEGORIES.join(", ")
    )
}
