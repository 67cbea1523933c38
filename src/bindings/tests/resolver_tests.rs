//! Resolver state-machine tests: sequence completion, the abort key,
//! exclusive-capture symmetry, and modifier-mask matching at depth.

use crate::bindings::resolver::{KeyPressResolver, KeyboardCapture, Resolution};
use crate::bindings::sequence::parse_sequence;
use crate::bindings::trie::KeyTrie;
use crate::core::types::{Command, CommandKind, KeyEvent, KeySym, Modifiers};

/// Counting capture stub; the counters must stay balanced.
#[derive(Default)]
struct CountingCapture {
    acquired: usize,
    released: usize,
}

impl KeyboardCapture for CountingCapture {
    fn acquire(&mut self) {
        self.acquired += 1;
    }
    fn release(&mut self) {
        self.released += 1;
    }
}

fn test_trie() -> KeyTrie {
    let mut trie = KeyTrie::new();
    let close = Command::new(CommandKind::CloseWindow, Vec::new());
    let create = Command::new(CommandKind::CreateAnchor, Vec::new());
    trie.insert(&parse_sequence("Ctrl+U, C").unwrap(), close);
    trie.insert(&parse_sequence("Ctrl+U, Shift+N").unwrap(), create.clone());
    trie.insert(&parse_sequence("Mod1+N").unwrap(), create);
    trie
}

fn resolver() -> KeyPressResolver {
    KeyPressResolver::new(KeySym::new("escape"))
}

#[test]
fn test_single_chord_dispatches_from_idle() {
    let trie = test_trie();
    let mut resolver = resolver();
    let mut capture = CountingCapture::default();

    let outcome = resolver.handle_key(&trie, &KeyEvent::new("n", Modifiers::MOD1), &mut capture);
    assert_eq!(
        outcome,
        Resolution::Dispatched(Command::new(CommandKind::CreateAnchor, Vec::new()))
    );
    // A single-chord match never takes capture.
    assert_eq!(capture.acquired, 0);
    assert!(!resolver.capture_held());
}

#[test]
fn test_two_chord_sequence_dispatches_and_returns_to_idle() {
    let trie = test_trie();
    let mut resolver = resolver();
    let mut capture = CountingCapture::default();

    let first = resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut capture);
    assert_eq!(first, Resolution::Pending);
    assert!(resolver.awaiting_continuation());
    assert_eq!((capture.acquired, capture.released), (1, 0));

    let second = resolver.handle_key(&trie, &KeyEvent::new("c", Modifiers::empty()), &mut capture);
    assert_eq!(
        second,
        Resolution::Dispatched(Command::new(CommandKind::CloseWindow, Vec::new()))
    );
    assert!(!resolver.awaiting_continuation());
    assert_eq!((capture.acquired, capture.released), (1, 1));
}

#[test]
fn test_abort_key_returns_to_idle_without_dispatch() {
    let trie = test_trie();
    let mut resolver = resolver();
    let mut capture = CountingCapture::default();

    resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut capture);
    let outcome = resolver.handle_key(
        &trie,
        &KeyEvent::new("escape", Modifiers::empty()),
        &mut capture,
    );
    assert_eq!(outcome, Resolution::Aborted);
    assert!(!resolver.awaiting_continuation());
    assert!(!resolver.capture_held());
    assert_eq!((capture.acquired, capture.released), (1, 1));
}

#[test]
fn test_unmatched_continuation_aborts() {
    let trie = test_trie();
    let mut resolver = resolver();
    let mut capture = CountingCapture::default();

    resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut capture);
    let outcome = resolver.handle_key(&trie, &KeyEvent::new("x", Modifiers::empty()), &mut capture);
    assert_eq!(outcome, Resolution::Aborted);
    assert_eq!((capture.acquired, capture.released), (1, 1));
}

#[test]
fn test_unbound_key_in_idle_is_nonfatal() {
    let trie = test_trie();
    let mut resolver = resolver();

    let outcome = resolver.handle_key(&trie, &KeyEvent::new("z", Modifiers::empty()), &mut ());
    assert_eq!(outcome, Resolution::Unbound);
    assert!(!resolver.awaiting_continuation());
}

#[test]
fn test_inherited_modifiers_tolerated_at_depth() {
    let trie = test_trie();
    let mut resolver = resolver();

    // Ctrl still held from the first chord must not disqualify the plain-C
    // continuation; Control is inherited there.
    resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut ());
    let outcome = resolver.handle_key(&trie, &KeyEvent::new("c", Modifiers::CONTROL), &mut ());
    assert_eq!(
        outcome,
        Resolution::Dispatched(Command::new(CommandKind::CloseWindow, Vec::new()))
    );
}

#[test]
fn test_unrelated_extra_modifier_disqualifies() {
    let trie = test_trie();
    let mut resolver = resolver();

    resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut ());
    // Mod1 is neither required nor inherited on the C child.
    let outcome = resolver.handle_key(&trie, &KeyEvent::new("c", Modifiers::MOD1), &mut ());
    assert_eq!(outcome, Resolution::Aborted);
}

#[test]
fn test_required_modifier_match_at_depth() {
    let trie = test_trie();
    let mut resolver = resolver();

    resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut ());
    let outcome = resolver.handle_key(&trie, &KeyEvent::new("n", Modifiers::SHIFT), &mut ());
    assert_eq!(
        outcome,
        Resolution::Dispatched(Command::new(CommandKind::CreateAnchor, Vec::new()))
    );
}

#[test]
fn test_missing_required_modifier_disqualifies() {
    let trie = test_trie();
    let mut resolver = resolver();

    resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut ());
    // Shift+N is registered, bare N is not.
    let outcome = resolver.handle_key(&trie, &KeyEvent::new("n", Modifiers::empty()), &mut ());
    assert_eq!(outcome, Resolution::Aborted);
}

#[test]
fn test_idle_match_is_exact_on_mask() {
    let trie = test_trie();
    let mut resolver = resolver();

    // Root lookup is keyed by the exact pair, so extra modifiers miss.
    let outcome = resolver.handle_key(
        &trie,
        &KeyEvent::new("u", Modifiers::CONTROL | Modifiers::SHIFT),
        &mut (),
    );
    assert_eq!(outcome, Resolution::Unbound);
}

#[test]
fn test_reset_releases_capture_and_state() {
    let trie = test_trie();
    let mut resolver = resolver();
    let mut capture = CountingCapture::default();

    resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut capture);
    assert!(resolver.capture_held());

    resolver.reset(&mut capture);
    assert!(!resolver.awaiting_continuation());
    assert!(!resolver.capture_held());
    assert_eq!((capture.acquired, capture.released), (1, 1));

    // Reset from IDLE must not release again.
    resolver.reset(&mut capture);
    assert_eq!((capture.acquired, capture.released), (1, 1));
}

#[test]
fn test_three_chord_sequence_stays_pending_in_between() {
    let mut trie = KeyTrie::new();
    trie.insert(
        &parse_sequence("Ctrl+U, Shift+N, M").unwrap(),
        Command::new(CommandKind::SwitchWindow, vec!["next".to_string()]),
    );
    let mut resolver = resolver();
    let mut capture = CountingCapture::default();

    assert_eq!(
        resolver.handle_key(&trie, &KeyEvent::new("u", Modifiers::CONTROL), &mut capture),
        Resolution::Pending
    );
    assert_eq!(
        resolver.handle_key(&trie, &KeyEvent::new("n", Modifiers::SHIFT), &mut capture),
        Resolution::Pending
    );
    // Capture was acquired once, on entering the sequence.
    assert_eq!(capture.acquired, 1);

    let outcome = resolver.handle_key(&trie, &KeyEvent::new("m", Modifiers::empty()), &mut capture);
    assert_eq!(
        outcome,
        Resolution::Dispatched(Command::new(
            CommandKind::SwitchWindow,
            vec!["next".to_string()]
        ))
    );
    assert_eq!((capture.acquired, capture.released), (1, 1));
}
