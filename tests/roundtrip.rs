//! End-to-end scenarios and proptest invariants, run against the public API
//! only, kept as a separate integration test file alongside the per-module
//! `#[cfg(test)]` units in `src/`.

use proptest::prelude::*;
use rand::seq::SliceRandom;
use sdata::emit::{emit, EmitConfig};
use sdata::error::ErrorKind;
use sdata::node::{Node, Value};
use sdata::parse::parse;
use sdata::regex::compile;
use sdata::scanner::Scanner;
use sdata::token::Category;

// --- Scenario A: round-trip of a game config ---

const GAME_CONFIG: &[u8] = b"tetris {\n  window {\n    width: 1920,\n    height: 1080,\n    title: \"Tetris game\",\n    fullscreen: false\n  },\n  controls {\n    left: 'a',\n    right: 'd',\n    confirm: 'e',\n    pause: 'p'\n  }\n}";

#[test]
fn scenario_a_game_config_round_trips_byte_for_byte() {
    let tree = parse::<u8>(GAME_CONFIG).unwrap();
    assert_eq!(tree.identifier(), "tetris");
    assert_eq!(tree.get("window.width").and_then(Node::as_int), Some(1920));
    assert_eq!(tree.get("window.fullscreen").and_then(Node::as_bool), Some(false));
    match tree.get("controls.left").unwrap().value() {
        Value::Char8(c) => assert_eq!(*c, b'a'),
        other => panic!("expected Char8, got {other:?}"),
    }

    let emitted = emit::<u8>(&tree, &EmitConfig::pretty()).unwrap();
    assert_eq!(emitted, GAME_CONFIG.to_vec());
}

// --- Scenario B: anonymous root, 16-bit-wide strings ---

fn string16(s: &str) -> Value {
    Value::String16(s.encode_utf16().collect())
}

fn dialog(locale: &str, title: &str, prompt: &str, accept: &str, refuse: &str) -> Node {
    Node::new(
        locale,
        Value::Sequence(vec![Node::new(
            "game_over_dialog",
            Value::Sequence(vec![
                Node::new("title", string16(title)),
                Node::new("play_again_prompt", string16(prompt)),
                Node::new("play_again_accept", string16(accept)),
                Node::new("play_again_refuse", string16(refuse)),
            ]),
        )]),
    )
}

#[test]
fn scenario_b_anonymous_root_with_wide_strings_round_trips() {
    let tree = Node::new(
        "",
        Value::Sequence(vec![
            dialog("en_US", "Game Over", "Play again?", "Yes", "No"),
            dialog("fr_FR", "Partie terminée", "Rejouer ?", "Oui", "Non"),
            dialog("es_ES", "Juego terminado", "¿Jugar de nuevo?", "Sí", "No"),
            dialog("zh_CN", "游戏结束", "再玩一次?", "是", "否"),
        ]),
    );
    assert!(tree.is_anonymous());

    let emitted = emit::<u16>(&tree, &EmitConfig::pretty()).unwrap();
    let reparsed = parse::<u16>(&emitted).unwrap();
    assert_eq!(tree, reparsed);
    assert!(reparsed.is_anonymous());

    let title = reparsed.get("fr_FR.game_over_dialog.title").unwrap();
    match title.value() {
        Value::String16(units) => {
            assert_eq!(String::from_utf16(units).unwrap(), "Partie terminée");
        }
        other => panic!("expected String16, got {other:?}"),
    }

    // Re-emitting the reparsed tree reproduces the exact same text: the
    // canonical form is a fixed point.
    let re_emitted = emit::<u16>(&reparsed, &EmitConfig::pretty()).unwrap();
    assert_eq!(emitted, re_emitted);
}

// --- Scenario C: integer overflow ---

#[test]
fn scenario_c_integer_overflow_reports_location() {
    let err = parse::<u8>(b"n: 9999999999").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::IntegerOverflow);
    assert!(err.render().contains("9999999999"));
}

// --- Scenario D: scanner failure ---

#[test]
fn scenario_d_scanner_failure_at_unrecognized_byte() {
    let err = parse::<u8>(b"a: @").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnrecognizedToken);
}

// --- Scenario E: regex subsequence error bubbles with the outer pattern ---

#[test]
fn scenario_e_subsequence_error_reports_outer_pattern() {
    let err = compile::<u8>("{ 'hello").unwrap_err();
    match err.kind() {
        ErrorKind::UnterminatedLiteral { pattern } | ErrorKind::UnterminatedSubsequence { pattern } => {
            assert_eq!(pattern, "{ 'hello");
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

// --- Scenario F: duplicate identifiers preserved ---

#[test]
fn scenario_f_duplicate_identifiers_round_trip_in_order() {
    let tree = parse::<u8>(b"r { x: 1, x: 2 }").unwrap();
    let members = tree.children().unwrap();
    assert_eq!(members[0].as_int(), Some(1));
    assert_eq!(members[1].as_int(), Some(2));

    let emitted = emit::<u8>(&tree, &EmitConfig::pretty()).unwrap();
    let reparsed = parse::<u8>(&emitted).unwrap();
    assert_eq!(tree, reparsed);
}

// --- Invariant 1: regex matching is deterministic ---

proptest! {
    #[test]
    fn invariant_regex_match_is_deterministic(s in "[a-zA-Z0-9_]{0,16}") {
        let nfa = compile::<u8>("a {a|d}*").unwrap();
        let once = nfa.run(s.as_bytes());
        let twice = nfa.run(s.as_bytes());
        prop_assert_eq!(once, twice);
    }
}

// --- Invariant 6: whitespace between tokens is semantically invisible ---

#[derive(Clone, Debug)]
enum Tok {
    Ident(String),
    BegSeq,
    EndSeq,
    Assign,
    Sep,
    Int(i32),
}

fn render(tok: &Tok) -> String {
    match tok {
        Tok::Ident(s) => s.clone(),
        Tok::BegSeq => "{".to_string(),
        Tok::EndSeq => "}".to_string(),
        Tok::Assign => ":".to_string(),
        Tok::Sep => ",".to_string(),
        Tok::Int(v) => v.to_string(),
    }
}

fn tok_strategy() -> impl Strategy<Value = Tok> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,5}".prop_map(Tok::Ident),
        Just(Tok::BegSeq),
        Just(Tok::EndSeq),
        Just(Tok::Assign),
        Just(Tok::Sep),
        any::<i16>().prop_map(|v| Tok::Int(v as i32)),
    ]
}

fn build_source(tokens: &[Tok], mut glue: impl FnMut() -> &'static str) -> Vec<u8> {
    let mut out = String::new();
    for (i, tok) in tokens.iter().enumerate() {
        if i > 0 {
            out.push_str(glue());
        }
        out.push_str(&render(tok));
    }
    out.into_bytes()
}

fn categories_of(source: &[u8]) -> Vec<Category> {
    let mut scanner: Scanner<u8> = Scanner::new(source);
    let mut out = Vec::new();
    loop {
        let token = scanner.tokenize().unwrap();
        if token.category() == Category::EOF {
            break;
        }
        out.push(token.category());
    }
    out
}

const WHITESPACE_VARIANTS: &[&str] = &[" ", "  ", "\t", "\n", " \n\t ", "\t \n"];

proptest! {
    #[test]
    fn invariant_whitespace_between_tokens_is_invisible(toks in prop::collection::vec(tok_strategy(), 1..16)) {
        let baseline = build_source(&toks, || " ");

        let mut rng = rand::thread_rng();
        let spaced = build_source(&toks, || *WHITESPACE_VARIANTS.choose(&mut rng).unwrap());

        prop_assert_eq!(categories_of(&baseline), categories_of(&spaced));
    }
}

// --- Invariant 7: overflow rejection ---

proptest! {
    #[test]
    fn invariant_integer_overflow_is_always_rejected(offset in 1i64..1_000_000_000) {
        let value = i32::MAX as i64 + offset;
        let source = format!("n: {value}");
        let err = parse::<u8>(source.as_bytes()).unwrap_err();
        prop_assert_eq!(err.kind(), &ErrorKind::IntegerOverflow);
    }

    #[test]
    fn invariant_float_overflow_is_always_rejected(extra_digits in 38usize..80) {
        let source = format!("n: 1{}.0", "0".repeat(extra_digits));
        let err = parse::<u8>(source.as_bytes());
        prop_assert!(err.is_err());
        if let Err(err) = err {
            prop_assert_eq!(err.kind(), &ErrorKind::FloatOverflow);
        }
    }
}
