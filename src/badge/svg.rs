//! Minimal SVG element writer for badges.

const FONT_STACK: &str = "-apple-system,BlinkMacSystemFont,Segoe UI,Roboto,Ubuntu,Helvetica Neue,Arial,Noto Sans,sans-serif";

/// Text attributes that vary between the elements of a badge.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TextStyle<'a> {
    pub size: u32,
    pub fill: &'a str,
    pub weight: Option<u32>,
    pub middle: bool,
}

/// Accumulates SVG elements and produces the final document.
pub(crate) struct SvgBuilder {
    elements: Vec<String>,
    width: u32,
    height: u32,
}

impl SvgBuilder {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(crate) fn build(self) -> String {
        let mut parts = Vec::with_capacity(self.elements.len() + 3);
        parts.push(format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="Spotify Top Tracks">"#,
            w = self.width,
            h = self.height
        ));
        parts.push(format!(
            "<style><![CDATA[text{{font-family:{FONT_STACK}}}]]></style>"
        ));
        parts.extend(self.elements);
        parts.push("</svg>".to_string());
        parts.join("\n")
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn rect(
        &mut self,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        rx: u32,
        fill: &str,
        stroke: Option<&str>,
    ) {
        let position = if x == 0 && y == 0 {
            String::new()
        } else {
            format!(r#"x="{x}" y="{y}" "#)
        };
        let stroke = stroke
            .map(|s| format!(r#" stroke="{s}""#))
            .unwrap_or_default();
        self.elements.push(format!(
            r#"<rect {position}width="{w}" height="{h}" rx="{rx}" fill="{fill}"{stroke}/>"#
        ));
    }

    pub(crate) fn circle(&mut self, cx: u32, cy: u32, r: u32, fill: &str) {
        self.elements.push(format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#
        ));
    }

    pub(crate) fn text(&mut self, x: u32, y: u32, style: TextStyle<'_>, content: &str) {
        let element = text_element(x, y, style, content);
        self.elements.push(element);
    }

    /// Text wrapped in a hyperlink that opens in a new browsing context.
    pub(crate) fn link_text(
        &mut self,
        href: &str,
        x: u32,
        y: u32,
        style: TextStyle<'_>,
        content: &str,
    ) {
        self.elements.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_xml(href),
            text_element(x, y, style, content)
        ));
    }
}

fn text_element(x: u32, y: u32, style: TextStyle<'_>, content: &str) -> String {
    let anchor = if style.middle {
        r#" text-anchor="middle""#
    } else {
        ""
    };
    let weight = style
        .weight
        .map(|w| format!(r#" font-weight="{w}""#))
        .unwrap_or_default();
    format!(
        r#"<text x="{x}" y="{y}"{anchor} font-size="{}" fill="{}"{weight}>{}</text>"#,
        style.size,
        style.fill,
        escape_xml(content)
    )
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Cut `s` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
