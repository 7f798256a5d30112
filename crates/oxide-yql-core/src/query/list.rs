//! Look-ahead recognition of placeholder lists.
//!
//! `IN (?, ?, ...)`, `IN ((?, ?), (?, ?), ...)` and `JDBC_TABLE(?, ...)` are
//! collapsed into a single list parameter. The scans never touch the output:
//! they either return the whole region or `None`, in which case the caller
//! resumes right after the keyword and the placeholders are rewritten one by
//! one.

use crate::lexer::scanner::skip_whitespace_and_comments;

/// A parenthesized region made only of placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRegion {
    /// Index of the opening `(`.
    pub open: usize,
    /// Index just past the closing `)`.
    pub end: usize,
    /// Number of list items.
    pub list_size: usize,
    /// Members per item, 1 for flat lists.
    pub tuple_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Param,
    OpenParen,
    CloseParen,
    Comma,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    /// Just after the outer `(`.
    Open { tuples: bool },
    FlatItem { count: usize },
    FlatComma { count: usize },
    TupleOpen { count: usize, width: Option<usize> },
    TupleItem { count: usize, width: Option<usize>, arity: usize },
    TupleComma { count: usize, width: Option<usize>, arity: usize },
    TupleClose { count: usize, width: usize },
    TupleSeparator { count: usize, width: usize },
    Done { list_size: usize, tuple_size: usize },
}

impl ListState {
    fn next(self, token: Token) -> Option<Self> {
        use ListState as S;
        use Token as T;

        let state = match (self, token) {
            (S::Open { .. }, T::Param) => S::FlatItem { count: 1 },
            (S::Open { tuples: true }, T::OpenParen) => S::TupleOpen {
                count: 0,
                width: None,
            },
            (S::FlatItem { count }, T::Comma) => S::FlatComma { count },
            (S::FlatItem { count }, T::CloseParen) => S::Done {
                list_size: count,
                tuple_size: 1,
            },
            (S::FlatComma { count }, T::Param) => S::FlatItem { count: count + 1 },
            (S::TupleOpen { count, width }, T::Param) => S::TupleItem {
                count,
                width,
                arity: 1,
            },
            (S::TupleItem { count, width, arity }, T::Comma) => {
                S::TupleComma { count, width, arity }
            }
            (S::TupleItem { count, width, arity }, T::CloseParen) => {
                if width.is_some_and(|w| w != arity) {
                    return None;
                }
                S::TupleClose {
                    count: count + 1,
                    width: arity,
                }
            }
            (S::TupleComma { count, width, arity }, T::Param) => S::TupleItem {
                count,
                width,
                arity: arity + 1,
            },
            (S::TupleClose { count, width }, T::Comma) => S::TupleSeparator { count, width },
            (S::TupleClose { count, width }, T::CloseParen) => S::Done {
                list_size: count,
                tuple_size: width,
            },
            (S::TupleSeparator { count, width }, T::OpenParen) => S::TupleOpen {
                count,
                width: Some(width),
            },
            _ => return None,
        };
        Some(state)
    }
}

/// Reads the next significant token at or after `pos`.
fn next_token(sql: &[u8], pos: usize) -> (Token, usize) {
    let pos = skip_whitespace_and_comments(sql, pos);
    let token = match sql.get(pos) {
        Some(b'?') if sql.get(pos + 1) == Some(&b'?') => Token::Other,
        Some(b'?') => Token::Param,
        Some(b'(') => Token::OpenParen,
        Some(b')') => Token::CloseParen,
        Some(b',') => Token::Comma,
        _ => Token::Other,
    };
    (token, pos)
}

fn parse_list(sql: &[u8], from: usize, tuples: bool) -> Option<ListRegion> {
    let (token, open) = next_token(sql, from);
    if token != Token::OpenParen {
        return None;
    }
    let mut state = ListState::Open { tuples };
    let mut pos = open + 1;
    loop {
        let (token, at) = next_token(sql, pos);
        state = state.next(token)?;
        pos = at + 1;
        if let ListState::Done {
            list_size,
            tuple_size,
        } = state
        {
            return Some(ListRegion {
                open,
                end: pos,
                list_size,
                tuple_size,
            });
        }
    }
}

/// Recognizes the list following an `IN` keyword that ends at `from`.
#[must_use]
pub fn parse_in_list(sql: &[u8], from: usize) -> Option<ListRegion> {
    parse_list(sql, from, true)
}

/// Recognizes the argument list following a `JDBC_TABLE` keyword that ends
/// at `from`. Only flat lists are accepted.
#[must_use]
pub fn parse_table_list(sql: &[u8], from: usize) -> Option<ListRegion> {
    parse_list(sql, from, false)
}
