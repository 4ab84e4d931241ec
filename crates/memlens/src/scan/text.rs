use regex::bytes::{Regex, RegexBuilder};
use tracing::{debug, warn};

use super::matches::{Collector, MatchSet};
use super::{ScanOptions, Scanner};
use crate::error::{Error, Result};
use crate::memory::string_to_latin1;

impl<B: AsRef<[u8]>> Scanner<'_, '_, B> {
    /// Find every address where the run starting there equals `target` exactly.
    ///
    /// Candidates come from a byte scan for the first character and are then
    /// confirmed against the whole run. A run that reaches the end of the
    /// buffer without a terminator ends there. An empty target, or one with
    /// characters that do not fit in a byte, matches nothing.
    pub fn search_string(&self, target: &str) -> MatchSet {
        let needle = match string_to_latin1(target) {
            Ok(bytes) if !bytes.is_empty() => bytes,
            _ => {
                debug!("String search for {:?} cannot match", target);
                return MatchSet::default();
            }
        };

        // The limit applies to confirmed matches only
        let prefilter = Scanner::with_options(
            self.view,
            ScanOptions {
                cancel: self.options.cancel,
                limit: None,
            },
        );
        let candidates = prefilter.search_u8(needle[0]);

        let mut collector = Collector::new(&self.options);
        if candidates.is_cancelled() {
            collector.mark_cancelled();
        }
        for &address in &candidates {
            if collector.interrupted() {
                break;
            }
            if self.view.run_at(address) == needle.as_slice() && collector.push(address) {
                break;
            }
        }

        let matches = collector.finish();
        debug!(
            "String search for {:?}: {} candidate(s), {} match(es)",
            target,
            candidates.len(),
            matches.len()
        );
        matches
    }

    /// Regex search over every run in the buffer, recovering from a bad pattern.
    ///
    /// An invalid pattern is logged and yields an empty set. Use
    /// [`try_search_string_regex`](Self::try_search_string_regex) to get the
    /// error instead.
    pub fn search_string_regex(&self, pattern: &str) -> MatchSet {
        match self.try_search_string_regex(pattern) {
            Ok(matches) => matches,
            Err(e) => {
                warn!("{}", e);
                MatchSet::default()
            }
        }
    }

    /// Regex search over every run in the buffer.
    ///
    /// The pattern is compiled with [`compile_pattern`].
    pub fn try_search_string_regex(&self, pattern: &str) -> Result<MatchSet> {
        let regex = compile_pattern(pattern)?;
        Ok(self.search_regex(&regex))
    }

    /// Run `regex` against each run and report the address of every match start.
    ///
    /// Matches within a run are non-overlapping, leftmost-first. Zero bytes
    /// between runs are skipped one at a time; after a run the scan resumes
    /// just past its terminator. Match offsets are byte offsets into the run,
    /// which are also character offsets.
    pub fn search_regex(&self, regex: &Regex) -> MatchSet {
        let bytes = self.view.as_bytes();
        let mut collector = Collector::new(&self.options);
        let mut address = 0;
        let mut runs = 0usize;

        'runs: while address < bytes.len() {
            if collector.interrupted() {
                break;
            }
            if bytes[address] == 0 {
                address += 1;
                continue;
            }

            let run = self.view.run_at(address);
            for m in regex.find_iter(run) {
                if collector.push(address + m.start()) {
                    break 'runs;
                }
            }

            runs += 1;
            address += run.len() + 1;
        }

        let matches = collector.finish();
        debug!(
            "Regex search for {:?}: {} run(s), {} match(es)",
            regex.as_str(),
            runs,
            matches.len()
        );
        matches
    }
}

/// Compile a pattern for matching one-byte-per-character runs.
///
/// Unicode mode is off, so `\w`, `\d`, `\s`, `\b` and case folding only know
/// ASCII, and `.` matches any byte but `\n`. Pattern characters in
/// U+0080..=U+00FF match the byte with that value. Characters above U+00FF can
/// never occur in a run and are rejected.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let invalid = |reason: String| Error::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    };

    let mut translated = String::with_capacity(pattern.len());
    let mut escaped = false;
    for c in pattern.chars() {
        match u32::from(c) {
            0x80..=0xFF if !escaped => {
                translated.push_str(&format!("\\x{:02X}", u32::from(c)));
            }
            0x100.. => {
                return Err(invalid(format!(
                    "character {:?} does not fit in a single byte",
                    c
                )));
            }
            _ => translated.push(c),
        }
        escaped = c == '\\' && !escaped;
    }

    RegexBuilder::new(&translated)
        .unicode(false)
        .build()
        .map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;
    use crate::memory::MemoryView;

    fn strings(parts: &[&str]) -> MemoryView<Vec<u8>> {
        let len: usize = parts.iter().map(|p| p.len() + 1).sum();
        let mut view = MemoryView::new(vec![0u8; len]);
        let mut address = 0;
        for part in parts {
            view.write_string(address, part).unwrap();
            address += part.len() + 1;
        }
        view
    }

    #[test]
    fn test_search_string_exact() {
        let view = strings(&["cat", "car"]);
        let matches = Scanner::new(&view).search_string("car");
        assert_eq!(matches.addresses(), &[4]);
    }

    #[test]
    fn test_search_string_rejects_prefix() {
        let view = strings(&["card", "car"]);
        assert_eq!(Scanner::new(&view).search_string("car").into_vec(), vec![5]);
    }

    #[test]
    fn test_search_string_suffix_of_run() {
        // The run starting at "car" inside "scar" is also "car"
        let view = strings(&["scar"]);
        assert_eq!(Scanner::new(&view).search_string("car").into_vec(), vec![1]);
    }

    #[test]
    fn test_search_string_unterminated_tail() {
        let view = MemoryView::new(b"xx\0abc".to_vec());
        assert_eq!(Scanner::new(&view).search_string("abc").into_vec(), vec![3]);
    }

    #[test]
    fn test_search_string_unmatchable() {
        let view = strings(&["abc"]);
        let scanner = Scanner::new(&view);
        assert!(scanner.search_string("").is_empty());
        assert!(scanner.search_string("\u{3042}").is_empty());
        assert!(scanner.search_string("zzz").is_empty());
    }

    #[test]
    fn test_search_string_limit() {
        let view = strings(&["ab", "ab", "ab"]);
        let options = ScanOptions::default().limit(2);
        let matches = Scanner::with_options(&view, options).search_string("ab");
        assert_eq!(matches.addresses(), &[0, 3]);
        assert!(matches.is_truncated());
    }

    #[test]
    fn test_search_string_cancelled() {
        let view = strings(&["ab", "ab"]);
        let cancel = AtomicBool::new(true);
        let options = ScanOptions::default().cancel(&cancel);
        let matches = Scanner::with_options(&view, options).search_string("ab");
        assert!(matches.is_empty());
        assert!(matches.is_cancelled());
    }

    #[test]
    fn test_search_regex_digits() {
        let view = strings(&["foo123", "bar456"]);
        let matches = Scanner::new(&view).search_string_regex("[0-9]+");
        assert_eq!(matches.addresses(), &[3, 10]);
    }

    #[test]
    fn test_search_regex_multiple_in_run() {
        let mut view = MemoryView::new(vec![0u8; 24]);
        view.write_string(5, "a1b22c333").unwrap();
        let matches = Scanner::new(&view).search_string_regex(r"\d+");
        assert_eq!(matches.addresses(), &[6, 8, 11]);
    }

    #[test]
    fn test_search_regex_offsets_after_high_bytes() {
        let mut view = MemoryView::new(vec![0u8; 16]);
        view.write_bytes(2, &[0xE9, 0xFF, b'4', b'2', 0]).unwrap();
        let matches = Scanner::new(&view).search_string_regex("42");
        assert_eq!(matches.addresses(), &[4]);
    }

    #[test]
    fn test_search_regex_anchors_per_run() {
        let view = strings(&["abc", "abd"]);
        let matches = Scanner::new(&view).search_string_regex("^ab");
        assert_eq!(matches.addresses(), &[0, 4]);
    }

    #[test]
    fn test_search_regex_unterminated_tail() {
        let view = MemoryView::new(b"\0\0key=1".to_vec());
        let matches = Scanner::new(&view).search_string_regex("=");
        assert_eq!(matches.addresses(), &[5]);
    }

    #[test]
    fn test_search_regex_invalid_pattern() {
        let view = strings(&["foo"]);
        let scanner = Scanner::new(&view);
        assert!(scanner.search_string_regex("(").is_empty());

        let err = scanner.try_search_string_regex("(").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_search_regex_limit() {
        let view = strings(&["a1", "b2", "c3"]);
        let options = ScanOptions::default().limit(2);
        let matches = Scanner::with_options(&view, options).search_string_regex(r"\d");
        assert_eq!(matches.addresses(), &[1, 4]);
        assert!(matches.is_truncated());
    }

    #[test]
    fn test_search_regex_limit_equal_to_matches() {
        let view = MemoryView::new(b"a1\0".to_vec());
        let options = ScanOptions::default().limit(1);
        let matches = Scanner::with_options(&view, options).search_string_regex(r"\d");
        assert_eq!(matches.addresses(), &[1]);
        assert!(matches.is_complete());
    }

    #[test]
    fn test_search_regex_word_classes_are_ascii() {
        let view = MemoryView::new(vec![0xE9, b'a', b'b', 0]);
        let scanner = Scanner::new(&view);
        assert_eq!(scanner.search_string_regex(r"\w+").addresses(), &[1]);
        assert_eq!(scanner.search_string_regex(r"\bab").addresses(), &[1]);
        assert_eq!(scanner.search_string_regex(r"(?i)AB").addresses(), &[1]);
    }

    #[test]
    fn test_search_regex_space_is_ascii() {
        // 0x85 and 0xA0 are whitespace in Unicode
        let view = MemoryView::new(vec![b'x', 0x85, 0xA0, b' ', b'y', 0]);
        let matches = Scanner::new(&view).search_string_regex(r"\s");
        assert_eq!(matches.addresses(), &[3]);
    }

    #[test]
    fn test_search_regex_high_byte_literal() {
        let mut view = MemoryView::new(vec![0u8; 12]);
        view.write_string(1, "caf\u{e9}").unwrap();
        view.write_string(6, "x\u{e9}").unwrap();
        let scanner = Scanner::new(&view);
        assert_eq!(scanner.search_string_regex("\u{e9}").addresses(), &[4, 7]);
        assert_eq!(scanner.search_string_regex("[\u{e0}-\u{ff}]").addresses(), &[4, 7]);
        assert_eq!(scanner.search_string_regex(r"caf\xE9").addresses(), &[1]);
        assert_eq!(scanner.search_string_regex("f.").addresses(), &[3]);
    }

    #[test]
    fn test_compile_pattern_rejects_wide_characters() {
        let err = compile_pattern("\u{3042}").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));

        let view = strings(&["abc"]);
        assert!(Scanner::new(&view).search_string_regex("a\u{3042}").is_empty());
    }
}
