//! Terminal output to HTML.
//!
//! SGR colour and bold codes become `<span class="term-fgN">` wrappers, every
//! other escape sequence is dropped, and text content is HTML-escaped.

use regex::Regex;
use std::sync::OnceLock;

fn escape_sequence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\x1b\[([0-9;?]*)([A-Za-z])|\x1b[()][A-Za-z0-9]|\x1b.").expect("static regex")
    })
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

fn is_styled(code: u32) -> bool {
    matches!(code, 1 | 30..=37 | 90..=97)
}

/// Render raw stderr bytes as safe HTML.
pub fn render_terminal(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let mut out = String::with_capacity(text.len());
    let mut open = 0usize;
    let mut last = 0usize;

    for caps in escape_sequence().captures_iter(&text) {
        let Some(m) = caps.get(0) else { continue };
        push_escaped(&mut out, &text[last..m.start()]);
        last = m.end();

        if caps.get(2).map(|c| c.as_str()) != Some("m") {
            continue;
        }
        let params = caps.get(1).map(|p| p.as_str()).unwrap_or("");
        for code in params.split(';') {
            let code: u32 = if code.is_empty() {
                0
            } else {
                match code.parse() {
                    Ok(c) => c,
                    Err(_) => continue,
                }
            };
            if code == 0 {
                for _ in 0..open {
                    out.push_str("</span>");
                }
                open = 0;
            } else if is_styled(code) {
                out.push_str(&format!("<span class=\"term-fg{}\">", code));
                open += 1;
            }
        }
    }
    push_escaped(&mut out, &text[last..]);
    for _ in 0..open {
        out.push_str("</span>");
    }
    out
}
