//! Sidebar navigation and the scroll-tracking rule that picks which item is
//! highlighted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    /// Section element id, without the leading `#`.
    pub anchor: &'static str,
}

pub const NAV_ITEMS: [NavItem; 8] = [
    NavItem { label: "בית", anchor: "home" },
    NavItem { label: "מידע עלי", anchor: "about" },
    NavItem { label: "דוגמאות סרטונים", anchor: "videos" },
    NavItem { label: "דוגמאות שורטס", anchor: "shorts" },
    NavItem { label: "תקשורת", anchor: "contact" },
    NavItem { label: "חוקים", anchor: "rules" },
    NavItem { label: "קורסים", anchor: "courses" },
    NavItem { label: "תשלום", anchor: "payment" },
];

/// Below this scroll offset the page counts as being at the top.
pub const TOP_THRESHOLD_PX: f64 = 80.0;

/// Probe line position as a fraction of the viewport height. A fixed pixel
/// offset made short sections flicker past without ever becoming active.
pub const PROBE_FRACTION: f64 = 0.35;

/// Layout of one rendered section.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionBox {
    pub anchor: String,
    /// Offset from the top of the document.
    pub offset_top: f64,
    /// Viewport-relative edges.
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub sections: Vec<SectionBox>,
}

/// Label of the nav item to highlight for the given layout.
pub fn active_section(snapshot: &ScrollSnapshot) -> &'static str {
    let home = NAV_ITEMS[0].label;

    let mut sections: Vec<(&'static str, &SectionBox)> = snapshot
        .sections
        .iter()
        .filter_map(|s| {
            NAV_ITEMS
                .iter()
                .find(|item| item.anchor == s.anchor)
                .map(|item| (item.label, s))
        })
        .collect();
    sections.sort_by(|a, b| a.1.offset_top.total_cmp(&b.1.offset_top));

    if sections.is_empty() || snapshot.scroll_y < TOP_THRESHOLD_PX {
        return home;
    }

    let probe = snapshot.viewport_height * PROBE_FRACTION;

    if let Some((label, _)) = sections
        .iter()
        .find(|(_, s)| s.top <= probe && s.bottom >= probe)
    {
        return *label;
    }

    // Nothing straddles the probe: take the closest section above it.
    let mut best = sections[0].0;
    let mut best_top = f64::NEG_INFINITY;
    for (label, s) in &sections {
        if s.top <= probe && s.top > best_top {
            best_top = s.top;
            best = *label;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(anchor: &str, offset_top: f64, scroll_y: f64, height: f64) -> SectionBox {
        let top = offset_top - scroll_y;
        SectionBox { anchor: anchor.to_string(), offset_top, top, bottom: top + height }
    }

    fn snapshot(scroll_y: f64, sections: Vec<SectionBox>) -> ScrollSnapshot {
        ScrollSnapshot { scroll_y, viewport_height: 1000.0, sections }
    }

    #[test]
    fn test_top_of_page_is_home() {
        let s = snapshot(40.0, vec![section("videos", 0.0, 40.0, 2000.0)]);
        assert_eq!(active_section(&s), "בית");
    }

    #[test]
    fn test_no_sections_is_home() {
        assert_eq!(active_section(&snapshot(900.0, vec![])), "בית");
    }

    #[test]
    fn test_section_containing_probe_wins() {
        // probe at 350px; scrolled to 1000
        let scroll = 1000.0;
        let s = snapshot(
            scroll,
            vec![
                section("home", 0.0, scroll, 800.0),
                section("about", 800.0, scroll, 400.0),
                section("videos", 1200.0, scroll, 600.0),
            ],
        );
        assert_eq!(active_section(&s), "דוגמאות סרטונים");
    }

    #[test]
    fn test_short_section_in_gap_picks_last_above_probe() {
        // Sections with gaps: nothing contains the probe line.
        let scroll = 1000.0;
        let s = snapshot(
            scroll,
            vec![
                section("videos", 900.0, scroll, 100.0),
                section("shorts", 1200.0, scroll, 100.0),
                section("contact", 1500.0, scroll, 100.0),
            ],
        );
        // shorts top = 200 (<= 350), contact top = 500 (> 350)
        assert_eq!(active_section(&s), "דוגמאות שורטס");
    }

    #[test]
    fn test_unsorted_input_and_unknown_anchors() {
        let scroll = 1000.0;
        let s = snapshot(
            scroll,
            vec![
                section("payment", 3000.0, scroll, 500.0),
                section("footer", 1100.0, scroll, 900.0),
                section("rules", 1250.0, scroll, 300.0),
            ],
        );
        assert_eq!(active_section(&s), "חוקים");
    }

    #[test]
    fn test_everything_below_probe_falls_back_to_first() {
        let scroll = 100.0;
        let s = snapshot(
            scroll,
            vec![
                section("courses", 2000.0, scroll, 100.0),
                section("contact", 1500.0, scroll, 100.0),
            ],
        );
        assert_eq!(active_section(&s), "תקשורת");
    }
}
