//! Pattern string -> [`Nfa`] compilation.
//!
//! ## Grammar
//!
//! Patterns are themselves plain 8-bit ASCII text; whitespace between
//! tokens is insignificant.
//!
//! - Character classes (single letters naming a set): `_` blank
//!   (whitespace), `a` alpha + underscore, `o` punctuation, `d`/`n` digits,
//!   `Q` double quote, `q` single quote.
//! - `^` any single input unit.
//! - `'…'` a literal run of characters, concatenated. Inner `'` is not
//!   escapable — it terminates the literal.
//! - `{ … }` a subsequence: the inner pattern, compiled recursively,
//!   treated as one operand for a following quantifier.
//! - `A | B` alternation.
//! - Postfix quantifiers on the most recently built operand: `?`
//!   (zero-or-one), `*` (zero-or-more), `+` (one-or-more), `$` (until-any:
//!   skip arbitrary input until the operand matches).
//!
//! ## Compilation strategy
//!
//! A stack of partial automata. Operands (classes, literals, subsequences)
//! push a new automaton; quantifiers and alternation pop operand(s) and
//! push the combined result. At the end, any remaining stack entries are
//! concatenated left to right by merging each into the previous one's
//! current leaves.

use super::{Nfa, NfaState};
use crate::error::{Error, ErrorKind, Result};
use crate::width::CharWidth;

const BLANK: &str = "\n\t\x0b\x08\x0c ";
const ALPHA: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_";
const OPERATOR: &str = "!#$%&()*+,-./:;<=>?@[\\]^`{|}~";
const DIGIT: &str = "0123456789";

fn character_class(letter: char) -> Option<&'static str> {
    match letter {
        '_' => Some(BLANK),
        'a' => Some(ALPHA),
        'o' => Some(OPERATOR),
        'd' | 'n' => Some(DIGIT),
        'Q' => Some("\""),
        'q' => Some("'"),
        _ => None,
    }
}

/// Compiles `pattern` into an [`Nfa`] over input units of width `U`.
///
/// `pattern` is always 8-bit text; class members and literal characters are
/// widened to `U` via [`CharWidth::from_ascii`].
pub fn compile<U: CharWidth>(pattern: &str) -> Result<Nfa<U>> {
    Compiler::new(pattern).parse()
}

struct Compiler<'p> {
    pattern: &'p str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'p> Compiler<'p> {
    fn new(pattern: &'p str) -> Self {
        Compiler {
            pattern,
            chars: pattern.char_indices().collect(),
            pos: 0,
        }
    }

    fn parse<U: CharWidth>(mut self) -> Result<Nfa<U>> {
        let mut stack: Vec<Nfa<U>> = Vec::new();

        while self.pos < self.chars.len() {
            self.parse_token(&mut stack)?;
        }

        if stack.is_empty() {
            return Ok(Nfa::empty());
        }

        let mut iter = stack.into_iter();
        let mut result = iter.next().unwrap();
        for next in iter {
            let leaves: Vec<usize> = result.leaves(0).into_iter().collect();
            result.merge(&next, leaves);
        }
        Ok(result)
    }

    fn current(&self) -> char {
        self.chars[self.pos].1
    }

    fn err(&self, kind_for: impl FnOnce(String) -> ErrorKind) -> Error {
        Error::new(kind_for(self.pattern.to_string()))
    }

    fn parse_token<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let c = self.current();

        if c.is_whitespace() {
            self.pos += 1;
            return Ok(());
        }

        match c {
            '_' | 'a' | 'o' | 'd' | 'n' | 'Q' | 'q' => self.parse_character_class(stack),
            '^' => self.parse_any(stack),
            '\'' => self.parse_literal(stack),
            '{' => self.parse_subsequence(stack),
            '?' => self.parse_quest(stack),
            '*' => self.parse_kleene(stack),
            '+' => self.parse_plus(stack),
            '$' => self.parse_until(stack),
            '|' => self.parse_alternative(stack),
            '}' => Err(self.err(|p| ErrorKind::UnexpectedSubsequenceEnd { pattern: p })),
            other => Err(self.err(|p| ErrorKind::UnrecognizedPatternToken {
                pattern: p,
                token: other,
            })),
        }
    }

    fn parse_character_class<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let class = character_class(self.current()).expect("caller matched a known class letter");
        let mut nfa = Nfa::empty();
        let root = nfa.node_create(NfaState::Epsilon, []);
        for byte in class.bytes() {
            nfa.node_create(NfaState::Char(U::from_ascii(byte)), [root]);
        }
        stack.push(nfa);
        self.pos += 1;
        Ok(())
    }

    fn parse_any<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let mut nfa = Nfa::empty();
        nfa.node_create(NfaState::Any, []);
        stack.push(nfa);
        self.pos += 1;
        Ok(())
    }

    fn parse_literal<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let start = self.pos;
        let mut end = None;
        let mut i = self.pos + 1;
        while i < self.chars.len() {
            if self.chars[i].1 == '\'' {
                end = Some(i);
                break;
            }
            i += 1;
        }
        let Some(end) = end else {
            return Err(self.err(|p| ErrorKind::UnterminatedLiteral { pattern: p }));
        };

        let mut nfa = Nfa::empty();
        let mut previous: Option<usize> = None;
        for &(_, ch) in &self.chars[start + 1..end] {
            let mut buf = [0u8; 4];
            let bytes = ch.encode_utf8(&mut buf).as_bytes();
            for &byte in bytes {
                let id = nfa.node_create(NfaState::Char(U::from_ascii(byte)), previous);
                previous = Some(id);
            }
        }
        stack.push(nfa);
        self.pos = end + 1;
        Ok(())
    }

    fn parse_subsequence<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let start = self.pos;
        let mut depth = 1usize;
        let mut i = self.pos + 1;
        let mut end = None;
        while i < self.chars.len() {
            match self.chars[i].1 {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        let Some(end) = end else {
            return Err(self.err(|p| ErrorKind::UnterminatedSubsequence { pattern: p }));
        };

        let inner: String = self.chars[start + 1..end].iter().map(|&(_, c)| c).collect();
        let nfa = Compiler::new(&inner).parse::<U>().map_err(|inner_err| {
            // Re-wrap so the outer pattern is what's reported, not the inner subsequence's.
            Error::new(rewrap_with_outer_pattern(inner_err.kind(), self.pattern))
        })?;
        stack.push(nfa);
        self.pos = end + 1;
        Ok(())
    }

    fn parse_quest<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let operand = stack
            .pop()
            .ok_or_else(|| self.err(|p| ErrorKind::MissingQuantifiable { pattern: p }))?;

        let mut sequence = Nfa::empty();
        let root = sequence.node_create(NfaState::Epsilon, []);
        sequence.merge(&operand, [root]);
        sequence.node_create(NfaState::Epsilon, [root]);
        stack.push(sequence);
        self.pos += 1;
        Ok(())
    }

    fn parse_kleene<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let operand = stack
            .pop()
            .ok_or_else(|| self.err(|p| ErrorKind::MissingQuantifiable { pattern: p }))?;

        let mut sequence = Nfa::empty();
        let root = sequence.node_create(NfaState::Epsilon, []);
        let op_root = sequence.merge(&operand, [root]);
        sequence.node_create(NfaState::Epsilon, [root]);

        let op_leaves: Vec<usize> = sequence.leaves(op_root).into_iter().collect();
        for leaf in op_leaves {
            sequence.node_connect(leaf, root);
        }
        stack.push(sequence);
        self.pos += 1;
        Ok(())
    }

    fn parse_plus<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let operand = stack
            .last_mut()
            .ok_or_else(|| self.err(|p| ErrorKind::MissingQuantifiable { pattern: p }))?;
        if operand.is_empty() {
            return Err(self.err(|p| ErrorKind::MissingQuantifiable { pattern: p }));
        }
        let leaves: Vec<usize> = operand.leaves(0).into_iter().collect();
        operand.node_create(NfaState::Epsilon, leaves);
        let epsilon_id = operand.len() - 1;
        operand.node_connect(epsilon_id, 0);
        self.pos += 1;
        Ok(())
    }

    fn parse_until<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        let operand = stack
            .pop()
            .ok_or_else(|| self.err(|p| ErrorKind::MissingQuantifiable { pattern: p }))?;

        let mut sequence = Nfa::empty();
        let root = sequence.node_create(NfaState::Epsilon, []);
        sequence.merge(&operand, [root]);
        sequence.node_create(NfaState::Any, [root, root]);
        let any_id = sequence.len() - 1;
        sequence.node_connect(any_id, root);
        stack.push(sequence);
        self.pos += 1;
        Ok(())
    }

    fn parse_alternative<U: CharWidth>(&mut self, stack: &mut Vec<Nfa<U>>) -> Result<()> {
        self.pos += 1;
        if self.pos >= self.chars.len() {
            return Err(self.err(|p| ErrorKind::MissingAlternative { pattern: p }));
        }
        self.parse_token(stack)?;

        let second = stack
            .pop()
            .ok_or_else(|| self.err(|p| ErrorKind::MissingAlternative { pattern: p }))?;
        let first = stack
            .pop()
            .ok_or_else(|| self.err(|p| ErrorKind::MissingAlternative { pattern: p }))?;

        let mut sequence = Nfa::empty();
        let root = sequence.node_create(NfaState::Epsilon, []);
        sequence.merge(&first, [root]);
        sequence.merge(&second, [root]);
        stack.push(sequence);
        Ok(())
    }
}

fn rewrap_with_outer_pattern(kind: &ErrorKind, outer_pattern: &str) -> ErrorKind {
    let pattern = outer_pattern.to_string();
    match kind.clone() {
        ErrorKind::UnterminatedLiteral { .. } => ErrorKind::UnterminatedLiteral { pattern },
        ErrorKind::UnterminatedSubsequence { .. } => ErrorKind::UnterminatedSubsequence { pattern },
        ErrorKind::UnexpectedSubsequenceEnd { .. } => {
            ErrorKind::UnexpectedSubsequenceEnd { pattern }
        }
        ErrorKind::MissingQuantifiable { .. } => ErrorKind::MissingQuantifiable { pattern },
        ErrorKind::MissingAlternative { .. } => ErrorKind::MissingAlternative { pattern },
        ErrorKind::UnrecognizedPatternToken { token, .. } => {
            ErrorKind::UnrecognizedPatternToken { pattern, token }
        }
        other => other,
    }
}
