//! Dashboard projection: filter, sort, cap. Pure functions only.

use feruca::{Collator, Locale, Tailoring};
use std::cmp::Ordering;

use crate::constants::DISPLAY_CAP;
use crate::models::{SortOrder, Video, ViewState};

/// Videos to show on the dashboard for the given view state.
pub fn project(videos: &[Video], view: &ViewState) -> Vec<Video> {
    project_with_cap(videos, &view.search_text, view.sort_order, DISPLAY_CAP)
}

pub fn project_with_cap(
    videos: &[Video],
    search_text: &str,
    sort_order: SortOrder,
    cap: usize,
) -> Vec<Video> {
    let needle = search_text.to_lowercase();
    let mut visible: Vec<&Video> = videos
        .iter()
        .filter(|video| title_matches(&video.title, &needle))
        .collect();

    let mut collator = title_collator();
    visible.sort_by(|a, b| match sort_order {
        SortOrder::Ascending => collator.collate(a.title.as_str(), b.title.as_str()),
        SortOrder::Descending => collator.collate(b.title.as_str(), a.title.as_str()),
    });

    visible.into_iter().take(cap).cloned().collect()
}

/// `needle` must already be lowercased.
fn title_matches(title: &str, needle: &str) -> bool {
    needle.is_empty() || title.to_lowercase().contains(needle)
}

/// Dictionary-style title order (Unicode collation, root locale).
///
/// Accents and case only matter between titles that are otherwise equal
/// ("apple" < "Éclair" < "Zebra", "a" < "A"); identical collation keys fall
/// back to the raw bytes so the order is total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    title_collator().collate(a, b)
}

// Spaces and punctuation keep their weight, so "cat tricks" < "cats".
fn title_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}
