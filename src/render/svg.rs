use std::fmt::Write as _;

use crate::scene::{Gradient, Paint, SceneNode, SceneSpec, Style, TextAnchor};

/// Serialize a scene to a standalone SVG document. Output is a pure function of the scene.
pub fn scene_to_svg(scene: &SceneSpec) -> String {
    let vp = scene.viewport;
    let mut out = String::with_capacity(64 * 1024);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" width="{}" height="{}""#,
        vp.view_box(),
        num(vp.width),
        num(vp.height),
    );
    if scene.placeholder {
        out.push_str(r#" data-placeholder="true""#);
    }
    out.push_str(">\n");

    if !scene.defs.is_empty() {
        out.push_str("<defs>\n");
        for g in &scene.defs {
            write_gradient(&mut out, g);
        }
        out.push_str("</defs>\n");
    }
    for node in &scene.children {
        write_node(&mut out, node, 0);
    }
    out.push_str("</svg>\n");
    out
}

fn write_gradient(out: &mut String, g: &Gradient) {
    let (open, close, stops) = match g {
        Gradient::Vertical { id, stops } => (
            format!(
                r#"<linearGradient id="{}" x1="0" y1="0" x2="0" y2="1">"#,
                escape(id)
            ),
            "</linearGradient>",
            stops,
        ),
        Gradient::Radial {
            id,
            cx,
            cy,
            r,
            stops,
        } => (
            format!(
                r#"<radialGradient id="{}" cx="{}" cy="{}" r="{}">"#,
                escape(id),
                num(*cx),
                num(*cy),
                num(*r)
            ),
            "</radialGradient>",
            stops,
        ),
    };
    out.push_str(&open);
    out.push('\n');
    for s in stops {
        let _ = writeln!(
            out,
            r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
            num(s.offset),
            s.color,
            num(s.alpha)
        );
    }
    out.push_str(close);
    out.push('\n');
}

fn write_node(out: &mut String, node: &SceneNode, depth: usize) {
    for _ in 0..depth {
        out.push(' ');
    }
    match node {
        SceneNode::Group { id, children } => {
            let _ = writeln!(out, r#"<g id="{}">"#, escape(id));
            for c in children {
                write_node(out, c, depth + 1);
            }
            for _ in 0..depth {
                out.push(' ');
            }
            out.push_str("</g>\n");
        }
        SceneNode::Rect {
            x,
            y,
            width,
            height,
            style,
        } => {
            let _ = writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
                num(*x),
                num(*y),
                num(*width),
                num(*height),
                style_attrs(style)
            );
        }
        SceneNode::Path { path, style } => {
            let _ = writeln!(
                out,
                r#"<path d="{}"{}/>"#,
                path.to_svg(),
                style_attrs(style)
            );
        }
        SceneNode::Circle {
            center,
            radius,
            style,
        } => {
            let _ = writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
                num(center.x),
                num(center.y),
                num(*radius),
                style_attrs(style)
            );
        }
        SceneNode::Line { from, to, style } => {
            let _ = writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y),
                style_attrs(style)
            );
        }
        SceneNode::Text {
            at,
            content,
            size,
            anchor,
            style,
        } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}" text-anchor="{}"{}>{}</text>"#,
                num(at.x),
                num(at.y),
                num(*size),
                anchor,
                style_attrs(style),
                escape(content)
            );
        }
    }
}

fn style_attrs(style: &Style) -> String {
    let mut s = String::new();
    write_paint(&mut s, "fill", &style.fill);
    if !matches!(style.stroke, Paint::None) {
        write_paint(&mut s, "stroke", &style.stroke);
        let _ = write!(
            s,
            r#" stroke-width="{}" stroke-linecap="round""#,
            num(style.stroke_width)
        );
    }
    if style.opacity < 1.0 {
        let _ = write!(s, r#" opacity="{}""#, num(style.opacity.max(0.0)));
    }
    s
}

fn write_paint(out: &mut String, attr: &str, paint: &Paint) {
    match paint {
        Paint::None => {
            let _ = write!(out, r#" {attr}="none""#);
        }
        Paint::Solid(c) => {
            let _ = write!(out, r#" {attr}="{c}""#);
        }
        Paint::Translucent(c, a) => {
            let _ = write!(
                out,
                r#" {attr}="{c}" {attr}-opacity="{}""#,
                num(a.clamp(0.0, 1.0))
            );
        }
        Paint::Gradient(id) => {
            let _ = write!(out, r#" {attr}="url(#{})""#, escape(id));
        }
    }
}

/// Fixed three-decimal formatting with trailing zeros trimmed; `-0` prints as `0`.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_owned(),
        _ => s.to_owned(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
