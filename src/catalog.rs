//! The static, process-wide token pattern table.
//!
//! Patterns are written once, in 8-bit text, and widened to whatever
//! [`crate::width::CharWidth`] the scanner is instantiated over — see
//! [`crate::regex::compile`]. The table is compiled lazily on first use and
//! is immutable and safe to share across threads afterward.
//!
//! Order matters: the scanner tries categories in this exact order and
//! keeps the first match (see `scanner.rs`), so more specific patterns must
//! precede more general ones that would otherwise shadow them — `FLOAT`
//! before `INTEGER` (so `"1.5"` isn't lexed as `INTEGER("1")` followed by a
//! stray `.`), `BOOLEAN` before `IDENTIFIER` (so `"true"` isn't lexed as a
//! plain identifier).

use crate::regex::{compile, Nfa};
use crate::token::Category;
use crate::width::CharWidth;
use std::sync::OnceLock;

/// `(category, pattern)` pairs in scan order. `ASSIGN` is `':'` — chosen
/// and fixed here as the one canonical assignment operator.
const TABLE: &[(Category, &str)] = &[
    (Category::SEPARATOR, "','"),
    (Category::END_SEQ, "'}'"),
    (Category::BEG_SEQ, "'{'"),
    (Category::ASSIGN, "':'"),
    (Category::BOOLEAN, "'true'|'false'"),
    (Category::COMMENT, "'//' {'\n'}$"),
    (Category::FLOAT, "{'-'|'+'}? d+ '.' d+ 'f'?"),
    (Category::INTEGER, "{'-'|'+'}? d+"),
    (Category::CHAR, "q^q"),
    (Category::STRING, "QQ$"),
    (Category::IDENTIFIER, "a {a|d}*"),
    (Category::EMPTY, "_+"),
];

fn build<U: CharWidth>() -> Vec<(Category, Nfa<U>)> {
    TABLE
        .iter()
        .map(|&(category, pattern)| {
            let nfa = compile::<U>(pattern).expect("built-in token patterns must compile");
            (category, nfa)
        })
        .collect()
}

/// Per-width table access. There are only three instantiations in this
/// crate (`u8`/`u16`/`u32`), so a small trait with one `OnceLock` per width
/// is simpler than trying to key a single registry by `TypeId`.
pub trait Catalog: CharWidth {
    fn table() -> &'static [(Category, Nfa<Self>)];
}

impl Catalog for u8 {
    fn table() -> &'static [(Category, Nfa<u8>)] {
        static TABLE: OnceLock<Vec<(Category, Nfa<u8>)>> = OnceLock::new();
        TABLE.get_or_init(build)
    }
}

impl Catalog for u16 {
    fn table() -> &'static [(Category, Nfa<u16>)] {
        static TABLE: OnceLock<Vec<(Category, Nfa<u16>)>> = OnceLock::new();
        TABLE.get_or_init(build)
    }
}

impl Catalog for u32 {
    fn table() -> &'static [(Category, Nfa<u32>)] {
        static TABLE: OnceLock<Vec<(Category, Nfa<u32>)>> = OnceLock::new();
        TABLE.get_or_init(build)
    }
}

/// The compiled `(category, pattern)` table for width `U`, in scan order.
pub fn table<U: Catalog>() -> &'static [(Category, Nfa<U>)] {
    U::table()
}
