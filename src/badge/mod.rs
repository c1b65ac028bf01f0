//! Badge rendering: turns a ranked track list into a self-contained SVG document.
//!
//! Layout of a badge, top to bottom: a header with the title and the ranking window,
//! then one row per track (rank circle, linked title, artists, popularity bar).
//! Bar lengths decay with rank; they are not derived from play counts.

pub mod size;
pub mod svg;
pub mod theme;

use chrono::{DateTime, Utc};

use crate::clients::entities::Track;
use size::SizeClass;
use svg::{SvgBuilder, TextStyle, truncate};
use theme::Theme;

pub use svg::escape_xml;

pub const TITLE: &str = "Top Spotify Tracks";

pub const HEADER_HEIGHT: u32 = 100;
pub const ROW_HEIGHT: u32 = 36;
pub const ROW_GAP: u32 = 12;
pub const FOOTER_MARGIN: u32 = 36;

const PADDING_SIDE: u32 = 24;
const CARD_INSET: u32 = 8;
const RANK_RADIUS: u32 = 11;
const BAR_HEIGHT: u32 = 8;

const WEIGHT_STEP: f64 = 0.12;
const MIN_WEIGHT: f64 = 0.30;

/// What the subtitle line says: ranking window and when the badge was generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub window: String,
    pub generated_at: DateTime<Utc>,
}

impl Header {
    pub fn new(window: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Header {
            window: window.into(),
            generated_at,
        }
    }

    pub fn subtitle(&self) -> String {
        format!(
            "{} · Updated {}",
            window_label(&self.window),
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

/// Human readable name of a ranking window. Unknown values are shown as given.
pub fn window_label(window: &str) -> &str {
    match window {
        "short_term" => "Last 4 weeks",
        "medium_term" => "Last 6 months",
        "long_term" => "Last year",
        other => other,
    }
}

/// Bar length factor for the 0-based `rank`: 1.0, 0.88, 0.76, ... never below 0.30.
pub fn bar_weight(rank: usize) -> f64 {
    (1.0 - rank as f64 * WEIGHT_STEP).max(MIN_WEIGHT)
}

pub fn bar_length(max_bar_width: u32, rank: usize) -> u32 {
    (f64::from(max_bar_width) * bar_weight(rank)).floor() as u32
}

pub fn canvas_height(rows: usize) -> u32 {
    HEADER_HEIGHT + rows as u32 * (ROW_HEIGHT + ROW_GAP) + FOOTER_MARGIN
}

/// Render `tracks` in the given order. Pure apart from the timestamp carried by `header`.
pub fn render(tracks: &[Track], theme: &Theme, size: SizeClass, header: &Header) -> String {
    let colors = &theme.palette;
    let width = size.width();
    let height = canvas_height(tracks.len());
    let max_bar = size.max_bar_width();
    let max_chars = size.max_title_chars();

    let mut svg = SvgBuilder::new(width, height);
    svg.rect(0, 0, width, height, 16, &colors.background, None);
    svg.rect(
        CARD_INSET,
        CARD_INSET,
        width - 2 * CARD_INSET,
        height - 2 * CARD_INSET,
        14,
        &colors.card,
        Some(colors.bar_track.as_str()),
    );
    svg.text(
        PADDING_SIDE,
        40,
        TextStyle {
            size: 20,
            fill: &colors.title,
            weight: Some(600),
            middle: false,
        },
        TITLE,
    );
    svg.text(
        PADDING_SIDE,
        64,
        TextStyle {
            size: 13,
            fill: &colors.subtitle,
            ..Default::default()
        },
        &header.subtitle(),
    );

    let text_x = PADDING_SIDE + 32;
    let mut y = HEADER_HEIGHT;
    for (i, track) in tracks.iter().enumerate() {
        let rank_x = PADDING_SIDE + 12;
        svg.circle(rank_x, y - 10, RANK_RADIUS, &colors.accent);
        svg.text(
            rank_x,
            y - 6,
            TextStyle {
                size: 12,
                fill: &colors.background,
                weight: Some(700),
                middle: true,
            },
            &(i + 1).to_string(),
        );

        // Lines that would run past the card are cut; shorter ones render unchanged.
        svg.link_text(
            &track.url,
            text_x,
            y,
            TextStyle {
                size: 14,
                fill: &colors.body_text,
                weight: Some(600),
                middle: false,
            },
            &truncate(&track.name, max_chars),
        );
        svg.text(
            text_x,
            y + 18,
            TextStyle {
                size: 12,
                fill: &colors.subtitle,
                ..Default::default()
            },
            &truncate(&track.artist_line(), max_chars),
        );

        let bar_y = y + 24;
        svg.rect(text_x, bar_y, max_bar, BAR_HEIGHT, 4, &colors.bar_track, None);
        svg.rect(
            text_x,
            bar_y,
            bar_length(max_bar, i),
            BAR_HEIGHT,
            4,
            &colors.accent,
            None,
        );

        y += ROW_HEIGHT + ROW_GAP;
    }

    svg.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::theme::{Palette, ThemeRegistry};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn header() -> Header {
        Header::new("short_term", Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap())
    }

    fn blue() -> Theme {
        ThemeRegistry::builtin().resolve("blue").unwrap()
    }

    #[test]
    fn test_window_labels() {
        assert_eq!(window_label("short_term"), "Last 4 weeks");
        assert_eq!(window_label("medium_term"), "Last 6 months");
        assert_eq!(window_label("long_term"), "Last year");
        assert_eq!(window_label("all_time"), "all_time");
    }

    #[test]
    fn test_subtitle_format() {
        assert_eq!(header().subtitle(), "Last 4 weeks · Updated 2024-03-09 07:05 UTC");
    }

    #[test]
    fn test_height_is_affine_in_rows() {
        assert_eq!(canvas_height(0), 136);
        for rows in 1..20 {
            assert_eq!(canvas_height(rows) - canvas_height(rows - 1), ROW_HEIGHT + ROW_GAP);
        }
    }

    #[test]
    fn test_weights_decay_then_clamp() {
        let expected = [1.00, 0.88, 0.76, 0.64, 0.52, 0.40, 0.30, 0.30];
        for (rank, want) in expected.iter().enumerate() {
            assert!((bar_weight(rank) - want).abs() < 1e-9, "rank {rank}");
        }
        assert!((bar_weight(7) - MIN_WEIGHT).abs() < f64::EPSILON);
        assert!((bar_weight(100) - MIN_WEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_list_renders_header_only() {
        let out = render(&[], &blue(), SizeClass::Medium, &header());
        assert!(out.contains(r#"height="136""#));
        assert!(out.contains(TITLE));
        assert!(!out.contains("<circle"));
        assert!(out.ends_with("</svg>"));
    }

    #[test]
    fn test_header_uses_palette() {
        let theme = Theme {
            name: "synthetic".into(),
            palette: Palette {
                background: "#000001".into(),
                card: "#000002".into(),
                title: "#000003".into(),
                subtitle: "#000004".into(),
                body_text: "#000005".into(),
                accent: "#000006".into(),
                bar_track: "#000007".into(),
            },
        };
        let tracks = [Track::new("T", &["A"], "https://t")];
        let out = render(&tracks, &theme, SizeClass::Small, &header());
        assert!(out.contains(r##"fill="#000003" font-weight="600">Top Spotify Tracks</text>"##));
        assert!(out.contains(r##"stroke="#000007""##));
        assert!(out.contains(r##"<circle cx="36" cy="90" r="11" fill="#000006"/>"##));
        assert!(out.contains(r##"fill="#000001" font-weight="700">1</text>"##));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let name = "x".repeat(100);
        let tracks = [Track::new(name.clone(), &["A"], "https://t")];
        let out = render(&tracks, &blue(), SizeClass::Small, &header());
        assert!(!out.contains(&name));
        assert!(out.contains(&format!(">{}…</text>", "x".repeat(49))));
    }

    #[test]
    fn test_titles_that_fit_are_untouched() {
        let name = "y".repeat(80);
        let tracks = [Track::new(name.clone(), &["A"], "https://t")];
        let medium = render(&tracks, &blue(), SizeClass::Medium, &header());
        assert!(medium.contains(&format!(">{name}</text>")));
        assert!(!medium.contains('…'));
        let small = render(&tracks, &blue(), SizeClass::Small, &header());
        assert!(small.contains(&format!(">{}…</text>", "y".repeat(49))));
    }
}
