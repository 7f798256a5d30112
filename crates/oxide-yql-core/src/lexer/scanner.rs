//! Cursor helpers that skip over literals and comments.
//!
//! Every `skip_*` function takes the whole input and the index of the
//! character that opens the region, and returns the index of the last byte
//! that still belongs to it. Unterminated regions run to the end of input,
//! in which case the returned index is `sql.len() - 1`. Contents are never
//! interpreted.

/// Returns the index of the last byte of `sql` (or 0 for empty input).
const fn last_index(sql: &[u8]) -> usize {
    sql.len().saturating_sub(1)
}

/// Skips a single-quoted literal starting at `start`.
///
/// A backslash escapes the following byte unconditionally, including another
/// backslash or the quote itself.
#[must_use]
pub fn skip_single_quotes(sql: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < sql.len() {
        match sql[pos] {
            b'\\' => pos += 2,
            b'\'' => return pos,
            _ => pos += 1,
        }
    }
    last_index(sql)
}

/// Skips a double-quoted literal starting at `start`. No escapes.
#[must_use]
pub fn skip_double_quotes(sql: &[u8], start: usize) -> usize {
    skip_until(sql, start, b'"')
}

/// Skips a backtick-quoted identifier starting at `start`. No escapes.
#[must_use]
pub fn skip_backticks(sql: &[u8], start: usize) -> usize {
    skip_until(sql, start, b'`')
}

fn skip_until(sql: &[u8], start: usize, close: u8) -> usize {
    sql.iter()
        .skip(start + 1)
        .position(|&b| b == close)
        .map_or_else(|| last_index(sql), |offset| start + 1 + offset)
}

/// Returns true if a `--` line comment starts at `pos`.
#[must_use]
pub fn is_line_comment(sql: &[u8], pos: usize) -> bool {
    sql.get(pos) == Some(&b'-') && sql.get(pos + 1) == Some(&b'-')
}

/// Returns true if a `/*` block comment starts at `pos`.
#[must_use]
pub fn is_block_comment(sql: &[u8], pos: usize) -> bool {
    sql.get(pos) == Some(&b'/') && sql.get(pos + 1) == Some(&b'*')
}

/// Skips a `--` line comment starting at `start`.
///
/// The terminating CR or LF is not part of the comment.
#[must_use]
pub fn skip_line_comment(sql: &[u8], start: usize) -> usize {
    sql.iter()
        .skip(start + 2)
        .position(|&b| b == b'\n' || b == b'\r')
        .map_or_else(|| last_index(sql), |offset| start + 1 + offset)
}

/// Skips a `/* */` block comment starting at `start`.
///
/// Comments nest: every `/*` opens a level and every `*/` closes one.
#[must_use]
pub fn skip_block_comment(sql: &[u8], start: usize) -> usize {
    let mut depth = 1usize;
    let mut pos = start + 2;
    while pos < sql.len() {
        if is_block_comment(sql, pos) {
            depth += 1;
            pos += 2;
        } else if sql[pos] == b'*' && sql.get(pos + 1) == Some(&b'/') {
            depth -= 1;
            if depth == 0 {
                return pos + 1;
            }
            pos += 2;
        } else {
            pos += 1;
        }
    }
    last_index(sql)
}

/// Skips whitespace and comments from `pos`, returning the index of the
/// first significant byte, or `sql.len()` if there is none.
#[must_use]
pub fn skip_whitespace_and_comments(sql: &[u8], mut pos: usize) -> usize {
    while pos < sql.len() {
        if sql[pos].is_ascii_whitespace() {
            pos += 1;
        } else if is_line_comment(sql, pos) {
            pos = skip_line_comment(sql, pos) + 1;
        } else if is_block_comment(sql, pos) {
            pos = skip_block_comment(sql, pos) + 1;
        } else {
            break;
        }
    }
    pos
}

/// Returns true if `b` can start an identifier.
///
/// Any non-ASCII byte counts as an identifier byte, so a multi-byte
/// character never splits an identifier and never lets its ASCII tail be
/// read as a keyword.
#[must_use]
pub const fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || !b.is_ascii()
}

/// Returns true if `b` can continue an identifier.
#[must_use]
pub const fn is_identifier_part(b: u8) -> bool {
    is_identifier_start(b) || b.is_ascii_digit()
}

/// Returns the end (exclusive) of the identifier starting at `start`.
#[must_use]
pub fn identifier_end(sql: &[u8], start: usize) -> usize {
    sql.iter()
        .skip(start + 1)
        .position(|&b| !is_identifier_part(b))
        .map_or(sql.len(), |offset| start + 1 + offset)
}
