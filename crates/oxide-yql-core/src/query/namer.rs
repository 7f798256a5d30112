//! Generated parameter names.

use std::collections::HashSet;

/// Prefix of every generated parameter name.
pub const PARAM_PREFIX: &str = "$jp";

/// Hands out `$jp1`, `$jp2`, ... for one parse.
///
/// Names that already occur anywhere in the source text are skipped, so a
/// generated name never collides with something the caller wrote. The
/// source is scanned once up front: every `$jp` followed by digits marks
/// each digit prefix as taken, since `$jp12` contains `$jp1`.
#[derive(Debug)]
pub struct ParamNamer {
    taken: HashSet<usize>,
    next: usize,
}

impl ParamNamer {
    /// Creates a namer for the given source text.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut taken = HashSet::new();
        for (at, _) in source.match_indices(PARAM_PREFIX) {
            let digits = &bytes[at + PARAM_PREFIX.len()..];
            // Generated names have no leading zero.
            if digits.first() == Some(&b'0') {
                continue;
            }
            let mut value: usize = 0;
            for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
                let Some(next) = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(usize::from(b - b'0')))
                else {
                    break;
                };
                value = next;
                taken.insert(value);
            }
        }
        Self { taken, next: 1 }
    }

    /// Returns the next free name.
    pub fn next_name(&mut self) -> String {
        while self.taken.contains(&self.next) {
            self.next += 1;
        }
        let name = format!("{PARAM_PREFIX}{}", self.next);
        self.next += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_names() {
        let mut namer = ParamNamer::new("SELECT ?, ?");
        assert_eq!(namer.next_name(), "$jp1");
        assert_eq!(namer.next_name(), "$jp2");
    }

    #[test]
    fn test_skips_names_in_source() {
        let mut namer = ParamNamer::new("SELECT $jp1, $jp3, ?");
        assert_eq!(namer.next_name(), "$jp2");
        assert_eq!(namer.next_name(), "$jp4");
    }

    #[test]
    fn test_substring_collision_is_skipped() {
        // "$jp1" is a substring of "$jp12".
        let mut namer = ParamNamer::new("SELECT $jp12, ?");
        assert_eq!(namer.next_name(), "$jp2");
    }

    #[test]
    fn test_every_digit_prefix_is_taken() {
        let mut namer = ParamNamer::new("SELECT $jp123, $jp2x, ?");
        assert_eq!(namer.next_name(), "$jp3");
        assert_eq!(namer.next_name(), "$jp4");
        assert_eq!(namer.next_name(), "$jp5");
        assert_eq!(namer.next_name(), "$jp6");
    }

    #[test]
    fn test_leading_zero_blocks_nothing() {
        let mut namer = ParamNamer::new("SELECT $jp01, $jp, ?");
        assert_eq!(namer.next_name(), "$jp1");
    }

    #[test]
    fn test_long_digit_run() {
        let source = format!("SELECT $jp1{}, ?", "9".repeat(64));
        let mut namer = ParamNamer::new(&source);
        assert_eq!(namer.next_name(), "$jp2");
    }
}
