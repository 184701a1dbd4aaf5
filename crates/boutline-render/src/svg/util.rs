pub const DEFAULT_BACKGROUND: &str = "#111111";

/// Attribute number formatting: integral values print without a fraction, `-0` becomes `0`.
pub(super) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

/// Path coordinates, rounded half-up to 3 fractional digits with trailing zeros trimmed.
pub(super) fn fmt_path(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }

    let mut r = (v * 1000.0 + 0.5).floor() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }

    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

pub(super) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(super) fn escape_attr(text: &str) -> String {
    escape_xml(text)
}
