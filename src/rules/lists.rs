/// Parse a comma-separated extension list into lower-cased, dot-prefixed
/// extensions, in input order.
///
/// Blank segments are dropped; duplicates are kept.
pub fn parse_extensions(s: &str) -> Vec<String> {
    s.split(',')
        .map(|segment| segment.trim().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            }
        })
        .collect()
}

/// Parse a comma-separated exclusion list into trimmed patterns, in input
/// order. Case is preserved.
pub fn parse_exclusions(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions() {
        let cases: &[(&str, &[&str])] = &[
            ("jpg,png,gif", &[".jpg", ".png", ".gif"]),
            (".jpg,.png,.gif", &[".jpg", ".png", ".gif"]),
            (" JPG , .Png , Gif ", &[".jpg", ".png", ".gif"]),
            ("jpg,,png", &[".jpg", ".png"]),
            ("", &[]),
            ("   ", &[]),
            (" , ,, ", &[]),
            ("..jpg, .tar.gz, txt ", &["..jpg", ".tar.gz", ".txt"]),
            ("jpg,JPG", &[".jpg", ".jpg"]),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_extensions(input), *expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_exclusions() {
        let cases: &[(&str, &[&str])] = &[
            ("node_modules,vendor,temp", &["node_modules", "vendor", "temp"]),
            (
                " node_modules , Vendor , TEMP ",
                &["node_modules", "Vendor", "TEMP"],
            ),
            ("a,,b", &["a", "b"]),
            ("", &[]),
            ("   ", &[]),
            ("src/gen, *.bak", &["src/gen", "*.bak"]),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_exclusions(input), *expected, "input: {input:?}");
        }
    }
}
