//! Serializing a [`Node`] tree back to text, under a style configuration.

use crate::error::{Error, ErrorKind, Result};
use crate::node::{Node, Value, WidthPayload};
use crate::width::CharWidth;

/// A dense bitset of formatting choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style(u16);

impl Style {
    pub const BREAK_BEFORE_BRACES: Style = Style(1 << 0);
    pub const SPACE_BEFORE_BRACES: Style = Style(1 << 1);
    pub const BREAK_AFTER_BRACES: Style = Style(1 << 2);
    pub const SPACE_AFTER_BRACES: Style = Style(1 << 3);
    pub const SPACE_BEFORE_ASSIGN: Style = Style(1 << 4);
    pub const SPACE_AFTER_ASSIGN: Style = Style(1 << 5);
    pub const BREAK_AFTER_SEPARATOR: Style = Style(1 << 6);
    pub const SPACE_AFTER_SEPARATOR: Style = Style(1 << 7);
    pub const BREAK_ANONYMOUS_BRACES: Style = Style(1 << 8);

    pub const NONE: Style = Style(0);

    pub fn contains(self, flag: Style) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl std::ops::BitOr for Style {
    type Output = Style;
    fn bitor(self, rhs: Style) -> Style {
        Style(self.0 | rhs.0)
    }
}

/// `(indent_string, style)`. Two presets are provided: [`EmitConfig::PRETTY`]
/// (the canonical round-trip form) and [`EmitConfig::INLINE`].
#[derive(Debug, Clone)]
pub struct EmitConfig {
    pub indent: String,
    pub style: Style,
}

impl EmitConfig {
    /// Multi-line, 2-space indent. This is the canonical form: for any
    /// parsed tree `t`, `parse(emit(t, PRETTY)) == t`, and for any source
    /// `s` already in canonical form, `emit(parse(s), PRETTY) == s`.
    pub fn pretty() -> Self {
        EmitConfig {
            indent: "  ".to_string(),
            style: Style::BREAK_AFTER_BRACES
                | Style::SPACE_BEFORE_BRACES
                | Style::SPACE_AFTER_ASSIGN
                | Style::BREAK_AFTER_SEPARATOR
                | Style::BREAK_ANONYMOUS_BRACES,
        }
    }

    /// Single-line, space-separated.
    pub fn inline() -> Self {
        EmitConfig {
            indent: String::new(),
            style: Style::SPACE_BEFORE_BRACES
                | Style::SPACE_AFTER_BRACES
                | Style::SPACE_AFTER_ASSIGN
                | Style::SPACE_AFTER_SEPARATOR,
        }
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        EmitConfig::pretty()
    }
}

/// Emits `node` as text under `config`.
pub fn emit<U: WidthPayload>(node: &Node, config: &EmitConfig) -> Result<Vec<U>> {
    let mut out = Vec::new();
    write_node(&mut out, node, config, 0)?;
    Ok(out)
}

/// `f32::to_string` omits the fractional part for whole numbers (`1080.0`
/// renders as `"1080"`), which the grammar's `[+-]?[0-9]+\.[0-9]+f?` can't
/// re-lex as `FLOAT` — it would round-trip back as an `INTEGER` node. Force
/// at least one fractional digit so `parse(emit(t)) == t` holds for every
/// float, not just non-integral ones.
fn format_float(v: f32) -> String {
    let s = v.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

fn push_str<U: CharWidth>(out: &mut Vec<U>, s: &str) {
    for byte in s.bytes() {
        out.push(U::from_ascii(byte));
    }
}

fn write_node<U: WidthPayload>(
    out: &mut Vec<U>,
    node: &Node,
    config: &EmitConfig,
    depth: usize,
) -> Result<()> {
    push_str(out, node.identifier());

    match node.value() {
        Value::Sequence(members) => write_sequence(out, node, members, config, depth),
        _ => write_scalar(out, node, config),
    }
}

fn write_sequence<U: WidthPayload>(
    out: &mut Vec<U>,
    node: &Node,
    members: &[Node],
    config: &EmitConfig,
    depth: usize,
) -> Result<()> {
    let anonymous = node.is_anonymous();
    let member_depth = if anonymous { depth } else { depth + 1 };

    if !anonymous {
        if config.style.contains(Style::BREAK_BEFORE_BRACES) {
            push_str(out, "\n");
        }
        if config.style.contains(Style::SPACE_BEFORE_BRACES) {
            push_str(out, " ");
        }
    }

    push_str(out, "{");

    if anonymous && config.style.contains(Style::BREAK_ANONYMOUS_BRACES) {
        push_str(out, "\n");
    }
    if config.style.contains(Style::BREAK_AFTER_BRACES) {
        push_str(out, "\n");
    }
    if config.style.contains(Style::SPACE_AFTER_BRACES) {
        push_str(out, " ");
    }

    for (i, member) in members.iter().enumerate() {
        if !anonymous {
            for _ in 0..member_depth {
                push_str(out, &config.indent);
            }
        }

        write_node(out, member, config, member_depth)?;

        if i + 1 != members.len() {
            push_str(out, ",");
        }

        if config.style.contains(Style::SPACE_AFTER_SEPARATOR) {
            push_str(out, " ");
        }
        if config.style.contains(Style::BREAK_AFTER_SEPARATOR) {
            push_str(out, "\n");
        }
    }

    if !anonymous {
        for _ in 0..depth {
            push_str(out, &config.indent);
        }
    } else if config.style.contains(Style::BREAK_ANONYMOUS_BRACES) {
        push_str(out, "\n");
    }

    push_str(out, "}");
    Ok(())
}

fn write_scalar<U: WidthPayload>(
    out: &mut Vec<U>,
    node: &Node,
    config: &EmitConfig,
) -> Result<()> {
    if config.style.contains(Style::SPACE_BEFORE_ASSIGN) {
        push_str(out, " ");
    }
    push_str(out, ":");
    if config.style.contains(Style::SPACE_AFTER_ASSIGN) {
        push_str(out, " ");
    }

    match node.value() {
        Value::Int(v) => push_str(out, &v.to_string()),
        Value::Float(v) => push_str(out, &format_float(*v)),
        Value::Bool(v) => push_str(out, if *v { "true" } else { "false" }),
        Value::String8(_) | Value::String16(_) | Value::String32(_) => {
            let content = U::as_string(node.value()).expect("checked above");
            out.push(U::from_ascii(b'"'));
            out.extend_from_slice(content);
            out.push(U::from_ascii(b'"'));
        }
        Value::Char8(_) | Value::Char16(_) | Value::Char32(_) => {
            let unit = U::as_char(node.value()).expect("checked above");
            out.push(U::from_ascii(b'\''));
            out.push(unit);
            out.push(U::from_ascii(b'\''));
        }
        Value::Nil => {
            return Err(Error::new(ErrorKind::NilNotEmittable {
                identifier: node.identifier().to_string(),
            }))
        }
        Value::Sequence(_) => unreachable!("write_scalar only called for non-sequence nodes"),
    }

    Ok(())
}
