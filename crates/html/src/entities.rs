/// Decode the character references a server-rendered template realistically contains.
///
/// Named references: `&amp;` `&lt;` `&gt;` `&quot;` `&apos;` `&nbsp;`.
/// Numeric references (`&#39;`, `&#x27;`) must be `;`-terminated and name a Unicode scalar value.
/// Anything else is passed through verbatim.
pub(crate) fn decode_entities(s: &str) -> String {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_one(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
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

// Longest reference we accept: `&#x10FFFF;`.
const MAX_REFERENCE_LEN: usize = 10;

fn decode_one(tail: &str) -> Option<(char, usize)> {
    let window = &tail.as_bytes()[..tail.len().min(MAX_REFERENCE_LEN)];
    let semi = memchr::memchr(b';', window)?;
    let body = &tail[1..semi];
    let consumed = semi + 1;

    let named = match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    };
    if let Some(ch) = named {
        return Some((ch, consumed));
    }

    let digits = body.strip_prefix('#')?;
    let value = match digits.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse::<u32>().ok()?
        }
        None => return None,
    };
    char::from_u32(value).map(|ch| (ch, consumed))
}

#[cfg(test)]
mod tests {
    use super::decode_entities;

    #[test]
    fn decodes_named_references() {
        assert_eq!(
            decode_entities("&lt;b&gt; &amp; &quot;x&quot; &apos;y&apos;"),
            "<b> & \"x\" 'y'"
        );
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("&#123;&#x7D;"), "{}");
        assert_eq!(decode_entities("&#X1F600;"), "\u{1F600}");
    }

    #[test]
    fn leaves_unknown_or_unterminated_references() {
        assert_eq!(decode_entities("a &copy; b"), "a &copy; b");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&#12"), "&#12");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn rejects_surrogates_and_out_of_range_scalars() {
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#1114112;"), "&#1114112;");
    }

    #[test]
    fn keeps_utf8_around_references() {
        assert_eq!(decode_entities("café &amp; thé"), "café & thé");
    }
}
