use std::sync::LazyLock;

use regex::Regex;

const DATA_URI_TEXT_PREFIX: &str = "data:text/plain;charset=utf-8,";

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("newline pattern is valid"));

/// Parse the editable URL list: one URL per line, blank lines and surrounding
/// whitespace ignored.
pub fn parse_url_list(text: &str) -> Vec<String> {
    NEWLINE_RUNS
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn render_url_list(urls: &[String]) -> String {
    urls.join("\n")
}

/// Wrap plain text in a `data:` URI, escaping it the way
/// `encodeURIComponent` does.
pub fn text_data_uri(text: &str) -> String {
    let mut out = String::with_capacity(DATA_URI_TEXT_PREFIX.len() + text.len() * 3);
    out.push_str(DATA_URI_TEXT_PREFIX);
    for b in text.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => {
                out.push('%');
                out.push(HEX_UPPER[(b >> 4) as usize] as char);
                out.push(HEX_UPPER[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}

/// Inverse of [`text_data_uri`] for any percent-encoded `data:` URI whose
/// media type is text. Returns `None` for base64 payloads, non-text media
/// types and payloads that do not decode to UTF-8. Stray `%` sequences that
/// are not valid escapes are kept literally.
pub fn decode_text_data_uri(uri: &str) -> Option<String> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let media_type = meta.split(';').next().unwrap_or_default();
    if meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        return None;
    }
    if !media_type.is_empty() && !media_type.to_ascii_lowercase().starts_with("text/") {
        return None;
    }

    urlencoding::decode(payload).ok().map(|text| text.into_owned())
}

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Clean a download filename so it names a single file inside the download
/// directory it is joined onto.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// `name (n).ext` for the n-th collision, like browsers do.
pub fn numbered_filename(filename: &str, n: u32) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, n, ext),
        _ => format!("{} ({})", filename, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list() {
        let text = "  https://a.com \n\n\nhttps://b.com\n   \n https://c.com";
        assert_eq!(
            parse_url_list(text),
            vec!["https://a.com", "https://b.com", "https://c.com"]
        );
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert!(parse_url_list("  \n\n ").is_empty());
        assert!(parse_url_list("").is_empty());
    }

    #[test]
    fn test_parse_handles_crlf() {
        assert_eq!(parse_url_list("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_render_url_list() {
        let urls = vec!["https://a.com".to_string(), "https://b.com".to_string()];
        assert_eq!(render_url_list(&urls), "https://a.com\nhttps://b.com");
        assert_eq!(render_url_list(&[]), "");
    }

    #[test]
    fn test_data_uri_matches_encode_uri_component() {
        assert_eq!(
            text_data_uri("Doe, J. (2020)."),
            "data:text/plain;charset=utf-8,Doe%2C%20J.%20(2020)."
        );
        assert_eq!(
            text_data_uri("a+b=c&d\n"),
            "data:text/plain;charset=utf-8,a%2Bb%3Dc%26d%0A"
        );
        assert_eq!(text_data_uri("é"), "data:text/plain;charset=utf-8,%C3%A9");
    }

    #[test]
    fn test_decode_data_uri() {
        let text = "Source 1: https://a.com/?q=1&r=2\nIn-text: (Doe, 2020) ✓";
        assert_eq!(decode_text_data_uri(&text_data_uri(text)).as_deref(), Some(text));
        assert_eq!(decode_text_data_uri("data:,plain").as_deref(), Some("plain"));
        assert_eq!(decode_text_data_uri("data:text/plain;base64,SGk="), None);
        assert_eq!(decode_text_data_uri("data:image/png,abc"), None);
        assert_eq!(decode_text_data_uri("data:text/plain,%FF%FE"), None);
        assert_eq!(
            decode_text_data_uri("data:text/plain,100%25%20done").as_deref(),
            Some("100% done")
        );
        assert_eq!(decode_text_data_uri("https://a.com"), None);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test/file.txt"), "test_file.txt");
        assert_eq!(sanitize_filename("citations.txt"), "citations.txt");

        let dir = std::path::Path::new("/downloads");
        let joined = dir.join(sanitize_filename("../notes\\citations.txt"));
        assert_eq!(joined.parent(), Some(dir));
    }

    #[test]
    fn test_numbered_filename() {
        assert_eq!(numbered_filename("citations.txt", 1), "citations (1).txt");
        assert_eq!(numbered_filename("notes", 2), "notes (2)");
        assert_eq!(numbered_filename(".hidden", 3), ".hidden (3)");
    }
}
