//! Character-level scanning and keyword recognition.
//!
//! Nothing here builds tokens: the classifier walks the raw bytes itself and
//! only asks this module to jump over quoted regions and comments, or to
//! compare an identifier against a keyword.

pub mod keyword;
pub mod scanner;
mod span;

pub use keyword::Keyword;
pub use span::Span;
