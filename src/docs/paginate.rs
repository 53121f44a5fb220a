//! Offset-based pagination over normalized documentation text.

use crate::error::{AppError, Result};

/// A character window into a larger text, with truncation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub content: String,
    pub start_index: usize,
    pub end_index: usize,
    pub total_length: usize,
    pub is_truncated: bool,
}

/// Slice `text` into the window `[start_index, start_index + max_length)`.
///
/// Indices count characters, not bytes. A `start_index` at or past the end of
/// the text yields an empty window with `is_truncated = false`. Negative
/// bounds are rejected rather than coerced.
pub fn paginate(text: &str, start_index: i64, max_length: i64) -> Result<Page> {
    if start_index < 0 {
        return Err(AppError::InvalidArgument(format!(
            "start_index must be non-negative, got {start_index}"
        )));
    }
    if max_length < 0 {
        return Err(AppError::InvalidArgument(format!(
            "max_length must be non-negative, got {max_length}"
        )));
    }

    let start = start_index as usize;
    let max = max_length as usize;
    let total_length = text.chars().count();

    if start >= total_length {
        return Ok(Page {
            content: String::new(),
            start_index: start,
            end_index: total_length,
            total_length,
            is_truncated: false,
        });
    }

    let end_index = start.saturating_add(max).min(total_length);
    let content: String = text.chars().skip(start).take(end_index - start).collect();

    Ok(Page {
        content,
        start_index: start,
        end_index,
        total_length,
        is_truncated: end_index < total_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_arithmetic() {
        let page = paginate("abcdefghij", 2, 5).unwrap();

        assert_eq!(page.content, "cdefg");
        assert_eq!(page.end_index - page.start_index, page.content.chars().count());
        assert_eq!(page.end_index, 7);
        assert_eq!(page.total_length, 10);
        assert!(page.is_truncated);
    }

    #[test]
    fn test_window_reaching_end_is_not_truncated() {
        let page = paginate("abcdefghij", 5, 100).unwrap();

        assert_eq!(page.content, "fghij");
        assert_eq!(page.end_index, 10);
        assert!(!page.is_truncated);
    }

    #[test]
    fn test_start_at_total_length_yields_empty_window() {
        let page = paginate("abc", 3, 10).unwrap();

        assert_eq!(page.content, "");
        assert_eq!(page.end_index, 3);
        assert!(!page.is_truncated);
    }

    #[test]
    fn test_start_past_end_yields_empty_window() {
        let page = paginate("abc", 100, 10).unwrap();

        assert_eq!(page.content, "");
        assert_eq!(page.end_index, 3);
        assert_eq!(page.total_length, 3);
        assert!(!page.is_truncated);
    }

    #[test]
    fn test_zero_max_length() {
        let page = paginate("abc", 0, 0).unwrap();

        assert_eq!(page.content, "");
        assert_eq!(page.start_index, 0);
        assert_eq!(page.end_index, 0);
        assert!(page.is_truncated);
    }

    #[test]
    fn test_negative_start_index_rejected() {
        let result = paginate("abc", -1, 10);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_negative_max_length_rejected() {
        let result = paginate("abc", 0, -5);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Multi-byte characters must not split or inflate the window.
        let page = paginate("héllo wörld", 1, 4).unwrap();

        assert_eq!(page.content, "éllo");
        assert_eq!(page.total_length, 11);
        assert!(page.is_truncated);
    }

    #[test]
    fn test_full_window_round_trip() {
        let text = "some normalized markdown";
        let page = paginate(text, 0, text.len() as i64).unwrap();

        assert_eq!(page.content, text);
        assert!(!page.is_truncated);
    }
}
