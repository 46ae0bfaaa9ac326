use crate::domain::model::{Markers, MarkerPolicy};
use crate::utils::error::{SpliceError, Result};
use chrono::NaiveDateTime;

/// `MM/DD/YYYY HH:MM:SS`, the format timestamp lines are rewritten with.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Line inserted between the payload and the remainder.
const SEPARATOR: &str = "\n";

pub fn format_timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// A target document cut into three contiguous borrowed segments.
///
/// `preamble`, `discard` and `remainder` concatenated give back the
/// document they were split from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    pub preamble: &'a [String],
    pub discard: &'a [String],
    pub remainder: &'a [String],
    /// Preamble indices of lines carrying the timestamp prefix.
    pub timestamp_lines: Vec<usize>,
    pub start_marker_found: bool,
    pub end_marker_found: bool,
}

/// Splits `document` around the start and end markers.
///
/// The preamble runs up to and including the first line equal to the start
/// marker (the whole document if there is none). The discard zone then runs
/// until a line equal to the end marker, but never swallows the final line,
/// which stays behind as the remainder when the end marker is missing.
pub fn split_document<'a>(document: &'a [String], markers: &Markers) -> SplitDocument<'a> {
    let mut preamble_len = document.len();
    let mut start_marker_found = false;
    let mut timestamp_lines = Vec::new();

    for (index, line) in document.iter().enumerate() {
        if *line == markers.start {
            preamble_len = index + 1;
            start_marker_found = true;
            break;
        }
        if line.starts_with(markers.timestamp_prefix.as_str()) {
            timestamp_lines.push(index);
        }
    }

    let (preamble, rest) = document.split_at(preamble_len);

    let mut discard_len = 0;
    while rest.len() - discard_len > 1 && rest[discard_len] != markers.end {
        discard_len += 1;
    }

    let (discard, remainder) = rest.split_at(discard_len);
    let end_marker_found = remainder.first().is_some_and(|line| *line == markers.end);

    SplitDocument {
        preamble,
        discard,
        remainder,
        timestamp_lines,
        start_marker_found,
        end_marker_found,
    }
}

impl SplitDocument<'_> {
    /// Rebuilds the document as preamble, payload, a separator line and remainder.
    pub fn assemble(&self, payload: &[String], timestamp_prefix: &str, stamp: &str) -> String {
        let capacity = [self.preamble, payload, self.remainder]
            .iter()
            .flat_map(|lines| lines.iter())
            .map(String::len)
            .sum::<usize>()
            + SEPARATOR.len()
            + stamp.len() * self.timestamp_lines.len();
        let mut out = String::with_capacity(capacity);

        let mut stamped = self.timestamp_lines.iter().peekable();
        for (index, line) in self.preamble.iter().enumerate() {
            if stamped.next_if_eq(&&index).is_some() {
                out.push_str(&rewrite_timestamp(line, timestamp_prefix, stamp));
            } else {
                out.push_str(line);
            }
        }

        for line in payload {
            out.push_str(line);
        }
        out.push_str(SEPARATOR);
        for line in self.remainder {
            out.push_str(line);
        }

        out
    }
}

fn rewrite_timestamp(line: &str, prefix: &str, stamp: &str) -> String {
    let terminator = if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    };
    let gap = if prefix.ends_with(char::is_whitespace) { "" } else { " " };
    format!("{}{}{}{}", prefix, gap, stamp, terminator)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceStats {
    pub preamble_lines: usize,
    pub discarded_lines: usize,
    pub remainder_lines: usize,
    pub timestamps_rewritten: usize,
    pub start_marker_found: bool,
    pub end_marker_found: bool,
}

#[derive(Debug, Clone)]
pub struct Spliced {
    pub text: String,
    pub stats: SpliceStats,
}

/// Replaces the marked region of `document` with `payload`.
pub fn splice(
    document: &[String],
    payload: &[String],
    markers: &Markers,
    policy: MarkerPolicy,
    stamp: &str,
) -> Result<Spliced> {
    let split = split_document(document, markers);

    if !split.start_marker_found {
        match policy {
            MarkerPolicy::Strict => {
                return Err(SpliceError::MarkerNotFound {
                    marker: markers.start.clone(),
                });
            }
            MarkerPolicy::AllowMissingStart => tracing::warn!(
                "start marker {:?} not found, appending new code after the whole document",
                markers.start.trim_end()
            ),
        }
    } else if !split.end_marker_found {
        tracing::warn!(
            "end marker {:?} not found, keeping only the last line after the new code",
            markers.end.trim_end()
        );
    }

    tracing::debug!(
        preamble = split.preamble.len(),
        discarded = split.discard.len(),
        remainder = split.remainder.len(),
        "document split"
    );

    let text = split.assemble(payload, &markers.timestamp_prefix, stamp);
    let stats = SpliceStats {
        preamble_lines: split.preamble.len(),
        discarded_lines: split.discard.len(),
        remainder_lines: split.remainder.len(),
        timestamps_rewritten: split.timestamp_lines.len(),
        start_marker_found: split.start_marker_found,
        end_marker_found: split.end_marker_found,
    };

    Ok(Spliced { text, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn markers() -> Markers {
        Markers::new("START", "END", "Build Date/Time:")
    }

    #[test]
    fn test_format_timestamp() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(format_timestamp(now), "01/02/2024 03:04:05");
    }

    #[test]
    fn test_splice_replaces_marked_region() {
        let document = lines(&[
            "A\n",
            "Build Date/Time: old\n",
            "START\n",
            "OLD1\n",
            "OLD2\n",
            "END\n",
            "B\n",
        ]);
        let payload = lines(&["NEW1\n", "NEW2\n"]);

        let spliced = splice(
            &document,
            &payload,
            &markers(),
            MarkerPolicy::Strict,
            "01/02/2024 03:04:05",
        )
        .unwrap();

        assert_eq!(
            spliced.text,
            "A\nBuild Date/Time: 01/02/2024 03:04:05\nSTART\nNEW1\nNEW2\n\nEND\nB\n"
        );
        assert!(!spliced.text.contains("OLD"));
        assert_eq!(
            spliced.stats,
            SpliceStats {
                preamble_lines: 3,
                discarded_lines: 2,
                remainder_lines: 2,
                timestamps_rewritten: 1,
                start_marker_found: true,
                end_marker_found: true,
            }
        );
    }

    #[test]
    fn test_split_segments_concatenate_to_document() {
        let document = lines(&["x\n", "START\n", "a\n", "b\n", "END\n", "y\n", "z"]);
        let split = split_document(&document, &markers());

        let rejoined: Vec<String> = split
            .preamble
            .iter()
            .chain(split.discard)
            .chain(split.remainder)
            .cloned()
            .collect();
        assert_eq!(rejoined, document);
        assert_eq!(split.preamble, &document[..2]);
        assert_eq!(split.discard, &document[2..4]);
        assert_eq!(split.remainder, &document[4..]);
    }

    #[test]
    fn test_missing_end_marker_keeps_last_line() {
        let document = lines(&["START\n", "old1\n", "old2\n", "tail\n"]);
        let split = split_document(&document, &markers());

        assert!(split.start_marker_found);
        assert!(!split.end_marker_found);
        assert_eq!(split.discard, &document[1..3]);
        assert_eq!(split.remainder, &document[3..]);
    }

    #[test]
    fn test_single_line_document_is_never_discarded() {
        let document = lines(&["only\n"]);
        let split = split_document(&document, &Markers::new("nomatch", "END", "TS:"));

        // no start marker, so the sole line is the preamble
        assert_eq!(split.preamble, &document[..]);
        assert!(split.remainder.is_empty());

        let document = lines(&["START\n", "only\n"]);
        let split = split_document(&document, &markers());
        assert!(split.discard.is_empty());
        assert_eq!(split.remainder, &document[1..]);
    }

    #[test]
    fn test_end_marker_as_last_line() {
        let document = lines(&["START\n", "old\n", "END\n"]);
        let split = split_document(&document, &markers());
        assert_eq!(split.discard, &document[1..2]);
        assert_eq!(split.remainder, &document[2..]);
        assert!(split.end_marker_found);
    }

    #[test]
    fn test_start_marker_as_last_line() {
        let document = lines(&["head\n", "START\n"]);
        let spliced = splice(
            &document,
            &lines(&["NEW\n"]),
            &markers(),
            MarkerPolicy::Strict,
            "now",
        )
        .unwrap();
        assert_eq!(spliced.text, "head\nSTART\nNEW\n\n");
        assert_eq!(spliced.stats.remainder_lines, 0);
    }

    #[test]
    fn test_missing_start_marker_is_error_by_default() {
        let document = lines(&["A\n", "END\n"]);
        let err = splice(&document, &[], &markers(), MarkerPolicy::Strict, "now").unwrap_err();
        assert!(matches!(err, SpliceError::MarkerNotFound { ref marker } if marker == "START\n"));
    }

    #[test]
    fn test_missing_start_marker_appends_when_allowed() {
        let document = lines(&["A\n", "Build Date/Time: old\n", "END\n"]);
        let spliced = splice(
            &document,
            &lines(&["NEW\n"]),
            &markers(),
            MarkerPolicy::AllowMissingStart,
            "now",
        )
        .unwrap();
        assert_eq!(spliced.text, "A\nBuild Date/Time: now\nEND\nNEW\n\n");
        assert_eq!(spliced.stats.discarded_lines, 0);
        assert_eq!(spliced.stats.remainder_lines, 0);
    }

    #[test]
    fn test_exact_match_only() {
        let document = lines(&[" START\n", "START \n", "START\n", "x\n", "END \n", "END\n"]);
        let split = split_document(&document, &markers());
        assert_eq!(split.preamble.len(), 3);
        assert_eq!(split.discard, &document[3..5]);
        assert_eq!(split.remainder, &document[5..]);
    }

    #[test]
    fn test_timestamp_rewrite_only_inside_preamble() {
        let document = lines(&[
            "Build Date/Time: a\r\n",
            "START\n",
            "Build Date/Time: b\n",
            "END\n",
            "Build Date/Time: c\n",
        ]);
        let spliced = splice(&document, &[], &markers(), MarkerPolicy::Strict, "T").unwrap();
        assert_eq!(
            spliced.text,
            "Build Date/Time: T\r\nSTART\n\nEND\nBuild Date/Time: c\n"
        );
    }

    #[test]
    fn test_start_marker_with_timestamp_prefix_is_not_rewritten() {
        let markers = Markers::new("<script type>(()=>{", "})();</script>", "<script");
        let document = lines(&["<script type>(()=>{\n", "old\n", "})();</script>\n"]);
        let spliced = splice(&document, &[], &markers, MarkerPolicy::Strict, "T").unwrap();
        assert_eq!(spliced.text, "<script type>(()=>{\n\n})();</script>\n");
        assert_eq!(spliced.stats.timestamps_rewritten, 0);
    }

    #[test]
    fn test_prefix_with_trailing_space_gets_no_extra_gap() {
        assert_eq!(rewrite_timestamp("Built: x\n", "Built: ", "T"), "Built: T\n");
        assert_eq!(rewrite_timestamp("Built:x", "Built:", "T"), "Built: T");
    }

    #[test]
    fn test_resplicing_keeps_markers() {
        let document = lines(&["A\n", "START\n", "OLD\n", "END\n", "B\n"]);
        let payload = lines(&["NEW1\n", "NEW2\n"]);

        let first = splice(&document, &payload, &markers(), MarkerPolicy::Strict, "1").unwrap();
        let reread: Vec<String> = first.text.split_inclusive('\n').map(String::from).collect();
        let second = splice(&reread, &payload, &markers(), MarkerPolicy::Strict, "2").unwrap();

        assert_eq!(first.text, second.text);
        assert!(second.stats.start_marker_found && second.stats.end_marker_found);
    }
}
