//! Offset to line/column conversion for one source file.

use gotree_core::errors::{ConvertError, Location};

/// Line-start index over a file's source text.
///
/// Lines are `\n` terminated. Columns count Unicode scalar values and skip
/// carriage returns, so a `\r\n` file reports the same columns as its `\n`
/// twin.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<usize>,
    len: usize,
    ends_with_cr: bool,
    has_carriage_return: bool,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = Vec::with_capacity(bytes.len() / 32 + 1);
        line_starts.push(0);
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: bytes.len(),
            ends_with_cr: bytes.last() == Some(&b'\r'),
            has_carriage_return: bytes.contains(&b'\r'),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_carriage_return(&self) -> bool {
        self.has_carriage_return
    }

    /// 1-based line and 0-based column of `offset`.
    ///
    /// End of file directly after a line terminator is the start of the
    /// following, empty line.
    pub fn position(&self, source: &str, offset: usize) -> Option<(usize, usize)> {
        if offset > self.len {
            return None;
        }
        if offset > 0 && offset == self.len && self.ends_with_cr {
            return Some((self.line_index(offset) + 2, 0));
        }
        let line = self.line_index(offset);
        let start = self.line_starts[line];
        let column = source.as_bytes()[start..offset]
            .iter()
            .filter(|&&b| b != b'\r' && (b & 0xC0) != 0x80)
            .count();
        Some((line + 1, column))
    }

    /// Same as [`position`](Self::position) but reports an out-of-range
    /// offset as an internal-consistency error for `file`.
    pub fn checked_position(
        &self,
        source: &str,
        file: &str,
        offset: usize,
    ) -> Result<(usize, usize), ConvertError> {
        self.position(source, offset)
            .ok_or_else(|| ConvertError::InvalidOffset {
                location: self.location(source, file, offset, offset),
            })
    }

    /// End offset of a token of text `expected` starting at `offset`, plus the
    /// text to compare the source against.
    ///
    /// The scanner strips carriage returns from raw strings and comments, so
    /// when the file contains any, the span is widened until it covers as
    /// many non-`\r` bytes as `expected` holds, and the widened source slice
    /// becomes the expected text.
    pub fn end_offset_for<'s>(
        &self,
        source: &'s str,
        offset: usize,
        expected: &'s str,
    ) -> (usize, &'s str) {
        let end = offset + expected.len();
        if !self.has_carriage_return {
            return (end, expected);
        }
        let bytes = source.as_bytes();
        let mut remaining = expected.len();
        let mut computed = offset;
        while remaining > 0 && computed < bytes.len() {
            if bytes[computed] != b'\r' {
                remaining -= 1;
            }
            computed += 1;
        }
        if computed != end {
            match source.get(offset..computed) {
                Some(widened) => (computed, widened),
                None => (end, expected),
            }
        } else {
            (end, expected)
        }
    }

    /// Error location for the span `offset..end_offset` of `file`.
    pub fn location(&self, source: &str, file: &str, offset: usize, end_offset: usize) -> Location {
        let location = Location::new(file, offset, end_offset);
        match self.position(source, offset) {
            Some((line, column)) => location.with_line_column(line, column + 1),
            None => location,
        }
    }

    fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_columns() {
        let src = "package p\n";
        let map = LineMap::new(src);
        assert_eq!(map.position(src, 0), Some((1, 0)));
        assert_eq!(map.position(src, 8), Some((1, 8)));
        assert_eq!(map.position(src, 9), Some((1, 9)));
    }

    #[test]
    fn test_eof_after_newline_is_next_line() {
        let src = "package p\n";
        let map = LineMap::new(src);
        assert_eq!(map.position(src, src.len()), Some((2, 0)));
    }

    #[test]
    fn test_eof_after_lone_carriage_return_is_next_line() {
        let src = "package p\r";
        let map = LineMap::new(src);
        assert_eq!(map.position(src, src.len()), Some((2, 0)));
    }

    #[test]
    fn test_eof_without_terminator_stays_on_line() {
        let src = "package p";
        let map = LineMap::new(src);
        assert_eq!(map.position(src, 9), Some((1, 9)));
    }

    #[test]
    fn test_columns_count_code_points() {
        let src = "s := \"é€\" + x";
        let map = LineMap::new(src);
        let plus = src.find('+').unwrap();
        assert_eq!(map.position(src, plus), Some((1, 10)));
    }

    #[test]
    fn test_carriage_return_is_invisible_to_columns() {
        let src = "a\r\nb := `x\ry`";
        let map = LineMap::new(src);
        let y = src.rfind('y').unwrap();
        assert_eq!(map.position(src, 3), Some((2, 0)));
        assert_eq!(map.position(src, y), Some((2, 7)));
    }

    #[test]
    fn test_offset_past_end_is_rejected() {
        let src = "package p";
        let map = LineMap::new(src);
        assert_eq!(map.position(src, 10), None);
        let err = map.checked_position(src, "p.go", 10).unwrap_err();
        assert!(err.to_string().starts_with("Invalid offset at offset 10:10 for file p.go"));
    }

    #[test]
    fn test_end_offset_widened_over_carriage_returns() {
        let src = "x := `a\r\nb`";
        let map = LineMap::new(src);
        let start = src.find('`').unwrap();
        let (end, text) = map.end_offset_for(src, start, "`a\nb`");
        assert_eq!(end, src.len());
        assert_eq!(text, "`a\r\nb`");
    }

    #[test]
    fn test_end_offset_unchanged_without_carriage_returns() {
        let src = "x := `a\nb`";
        let map = LineMap::new(src);
        let start = src.find('`').unwrap();
        assert_eq!(map.end_offset_for(src, start, "`a\nb`"), (src.len(), "`a\nb`"));
    }

    #[test]
    fn test_location_uses_one_based_column() {
        let src = "package p\nfunc f() {}\n";
        let map = LineMap::new(src);
        let location = map.location(src, "f.go", 15, 16);
        assert_eq!(location.to_string(), " at offset 15:16 for file f.go:2:6");
    }
}
