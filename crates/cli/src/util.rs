use std::path::Path;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::exit_codes::{EXIT_ERROR, EXIT_USAGE};
use crate::CliError;

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
/// Uses Unicode display width so CJK/emoji alignment stays correct.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .next()
            .filter(|ch| unicode_width::UnicodeWidthChar::width(*ch).unwrap_or(0) <= width)
            .map(String::from)
            .unwrap_or_default();
    }

    // Stop at width - 2 to leave room for ".."
    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            end_byte = i;
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw > width {
        truncate_display(s, width)
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        CliError::new(EXIT_USAGE, format!("cannot read {}: {e}", path.display()))
    })
}

/// Pretty JSON for stdout or `--output`.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))
}

pub(crate) fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot write {}: {e}", path.display())))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_display("Kerala Spice Exports", 10), "Kerala S..");
        assert_eq!(truncate_display("short", 10), "short");
        assert_eq!(truncate_display("abc", 2), "a");
    }

    #[test]
    fn truncate_wide_chars() {
        // each CJK char is 2 columns
        assert_eq!(truncate_display("香料贸易公司", 7), "香料..");
    }

    #[test]
    fn pad_right_fills_and_cuts() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("Gewürz", 8), "Gewürz  ");
        assert_eq!(pad_right("abcdefgh", 5), "abc..");
    }
}
