pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverses the entities markup engines emit for plain text, including
/// numeric references. Anything else that starts with `&` is kept as is.
pub fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let decoded = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
        ]
        .iter()
        .find_map(|(entity, ch)| tail.strip_prefix(*entity).map(|stripped| (*ch, stripped)))
        .or_else(|| numeric_reference(tail));
        match decoded {
            Some((ch, stripped)) => {
                out.push(ch);
                rest = stripped;
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes `&#NN;` or `&#xHH;` at the start of `text`.
fn numeric_reference(text: &str) -> Option<(char, &str)> {
    let body = text.strip_prefix("&#")?;
    let end = body.find(';')?;
    let (digits, radix) = match body[..end].strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (&body[..end], 10),
    };
    if digits.is_empty() || digits.len() > 7 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(digits, radix).ok()?;
    char::from_u32(code).map(|ch| (ch, &body[end + 1..]))
}
