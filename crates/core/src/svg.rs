//! SVG backend: converts a [`Figure`] into a standalone SVG document.

use std::fmt::Write as _;

use phasestack_protocol::{RenderCommand, TextAlign, ThemeToken};

use crate::palette::Palette;
use crate::views::Figure;

/// Render a figure as an SVG document string.
///
/// The viewBox and size are the figure's fixed pixel dimensions; palette
/// slots resolve through `palette`.
pub fn render_svg(figure: &Figure, palette: &Palette) -> String {
    let Figure {
        width,
        height,
        commands,
        ..
    } = figure;
    let mut svg = String::with_capacity(commands.len() * 160 + 256);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:DejaVu Sans,Helvetica,Arial,sans-serif">"#,
    );
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, palette),
    );

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
            } => {
                if !rect.is_finite() {
                    continue;
                }
                let fill = resolve_color(*color, palette);
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(border) = border_color {
                    let _ = write!(
                        svg,
                        r#" stroke="{}" stroke-width="2""#,
                        resolve_color(*border, palette)
                    );
                }
                match label {
                    Some(label) => {
                        let _ = write!(svg, "><title>{}</title></rect>", escape_xml(label));
                    }
                    None => svg.push_str("/>"),
                }
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, palette);
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                );
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{}" font-size="{font_size}" text-anchor="{anchor}">{}</text>"#,
                    position.x,
                    position.y,
                    resolve_color(*color, palette),
                    escape_xml(text),
                );
            }
            RenderCommand::BeginGroup { id, label } => {
                let _ = write!(svg, r#"<g id="{}""#, escape_xml(id));
                if let Some(label) = label {
                    let _ = write!(svg, r#" aria-label="{}""#, escape_xml(label));
                }
                svg.push('>');
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_color(token: ThemeToken, palette: &Palette) -> String {
    if let Some(color) = palette.resolve(token) {
        return color.hex();
    }
    match token {
        ThemeToken::Background => "#ffffff",
        ThemeToken::TextPrimary | ThemeToken::AxisLine => "#000000",
        ThemeToken::TextSecondary => "#555555",
        ThemeToken::LegendBorder => "#cccccc",
        ThemeToken::Slot(_) => "#808080",
    }
    .to_string()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
