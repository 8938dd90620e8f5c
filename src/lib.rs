//! `sdata` is a small, human-writable structured-data format, and the full
//! pipeline that translates between its textual form and an in-memory
//! tree: a pattern-based lexical scanner whose token classes are themselves
//! defined by a custom regular-expression mini-language compiled to
//! non-deterministic finite automata; a recursive-descent parser producing
//! a typed [`node::Node`] tree; and a configurable text [`emit::emit`]
//! that round-trips the tree back to source.
//!
//! ## Usage
//!
//! ```rust
//! use sdata::emit::EmitConfig;
//!
//! fn main() {
//!     let source = b"tetris {\n  window {\n    width: 1920,\n    height: 1080,\n    title: \"Tetris game\",\n    fullscreen: false\n  },\n  controls {\n    left: 'a',\n    right: 'd',\n    confirm: 'e',\n    pause: 'p'\n  }\n}";
//!
//!     let tree = sdata::parse::parse::<u8>(source).unwrap();
//!     assert_eq!(tree.get("window.width").and_then(sdata::node::Node::as_int), Some(1920));
//!     assert_eq!(tree.get("window.fullscreen").and_then(sdata::node::Node::as_bool), Some(false));
//!
//!     // PRETTY is the canonical form: parsing then re-emitting a tree
//!     // already in canonical form reproduces it byte-for-byte.
//!     let emitted = sdata::emit::emit::<u8>(&tree, &EmitConfig::pretty()).unwrap();
//!     assert_eq!(emitted, source.to_vec());
//! }
//! ```
//!
//! ## File format
//!
//! A node is either `ident { members }`, `ident : scalar`, or (only at the
//! top level) an anonymous `{ members }`. Members are comma-separated;
//! whitespace outside string literals is insignificant. Strings are `"…"`,
//! characters `'c'`, booleans `true`/`false`, integers `[+-]?[0-9]+`,
//! floats `[+-]?[0-9]+\.[0-9]+f?`.
//!
//! Example:
//!
//! ```text
//! tetris {
//!   window {
//!     width: 1920,
//!     height: 1080,
//!     title: "Tetris game",
//!     fullscreen: false
//!   },
//!   controls {
//!     left: 'a',
//!     right: 'd',
//!     confirm: 'e',
//!     pause: 'p'
//!   }
//! }
//! ```
//!
//! Duplicate identifiers within a sequence are permitted and preserved in
//! order; an anonymous root is only legal at the top level (never nested,
//! since every sequence member must start with an identifier).
//!
//! ## The regex mini-language
//!
//! The scanner's token categories are themselves defined in a tiny
//! regex dialect compiled once, at process start, into an [`regex::Nfa`]
//! per category (see [`catalog`]). The dialect has no anchors, capture
//! groups or back-references; see [`regex::compile`] for the full grammar
//! (character classes, literals, subsequences, alternation, quantifiers).
//!
//! ## Character widths
//!
//! The pipeline is generic over the width of one input unit —
//! [`width::CharWidth`] is implemented for `u8`, `u16` and `u32`, matching
//! the three fixed-width Unicode encodings. The regex dialect is always
//! written as 8-bit ASCII text; matching against a wider buffer widens each
//! class member and literal byte at compile time. String payloads carry
//! their native width through to the node tree untouched.
//!
//! ## Operations
//!
//! This library supports:
//!
//! * [Compiling](regex::compile) the regex mini-language to an [`regex::Nfa`]
//!   and [running](regex::Nfa::run) it against a buffer of any supported width
//! * [Scanning](scanner::Scanner) a source buffer into a stream of categorized
//!   [tokens](token::Token)
//! * [Parsing](parse::parse) a source buffer into a [`node::Node`] tree
//! * [Emitting](emit::emit) a tree back to text under a configurable
//!   [style](emit::EmitConfig)
//! * [Reading and writing](io) source files as a thin collaborator around
//!   `parse`/`emit`
//! * Minimal [dotted-path lookup](node::Node::get) into a parsed tree

pub mod catalog;
pub mod emit;
pub mod error;
pub mod io;
pub mod loc;
pub mod node;
pub mod parse;
pub mod regex;
pub mod scanner;
pub mod token;
pub mod width;
