//! Event sequences a real host delivers, checked against the frames sent
//!
//! This tests:
//! - Sentinel boundary deletions
//! - Echo suppression with synchronously firing surfaces
//! - IME and spellcheck sessions through composition signals
//! - Forced composition aborts
//! - Line breaks and the duplicate Enter platform quirk
//! - Paste/copy arbitration

use imebridge_input::{
    dispatch, AbortTrigger, ClipboardPayload, CompositionState, EditingSurface, EngineOptions,
    EventDisposition, HostEvent, InputEngine, MemoryClipboard, MemorySurface, Message, Outbound, Platform,
    RecordingChannel, Snapshot, TargetId, SENTINEL_PADDING,
};

type Engine = InputEngine<MemorySurface, RecordingChannel>;

fn engine() -> Engine {
    InputEngine::new(
        MemorySurface::new(),
        RecordingChannel::new(),
        EngineOptions::default(),
    )
}

fn engine_with(surface: MemorySurface, options: EngineOptions) -> Engine {
    InputEngine::new(surface, RecordingChannel::new(), options)
}

fn type_text(engine: &mut Engine, text: &str) {
    let raw = engine.surface_mut().insert(text);
    engine.on_raw_change(&raw);
}

const T: TargetId = TargetId::MAIN;

#[test]
fn test_backspace_on_empty_surface() {
    let mut engine = engine();

    let raw = engine.surface_mut().backspace();
    engine.on_raw_change(&raw);
    let raw = engine.surface_mut().backspace();
    engine.on_raw_change(&raw);

    // One message per keystroke, never merged
    assert_eq!(
        engine.channel().frames(),
        vec![
            "removetextcontext id=0 before=1 after=0",
            "removetextcontext id=0 before=1 after=0",
        ]
    );
    assert_eq!(engine.surface().content(), SENTINEL_PADDING);
    assert_eq!(engine.surface().caret(), 1);
}

#[test]
fn test_backspace_within_typed_word_is_a_diff() {
    let mut engine = engine();
    type_text(&mut engine, "cat");
    engine.channel_mut().take();

    let raw = engine.surface_mut().backspace();
    engine.on_raw_change(&raw);
    let raw = engine.surface_mut().backspace();
    engine.on_raw_change(&raw);

    assert_eq!(
        engine.channel().messages(),
        vec![Message::remove_before(T, 1), Message::remove_before(T, 1)]
    );
    assert_eq!(engine.snapshot(), &Snapshot::from("c"));
}

#[test]
fn test_echoing_surface_never_produces_diff_messages() {
    let mut engine = engine_with(MemorySurface::with_echo(), EngineOptions::default());
    assert!(engine.channel().is_empty());

    type_text(&mut engine, "x\ny");

    // The Enter reset echoes synchronously; nothing extra is sent for it
    assert_eq!(
        engine.channel().messages(),
        vec![
            Message::composition_input(T, "x"),
            Message::composition_commit(T, "x"),
            Message::enter(T),
            Message::composition_input(T, "y"),
            Message::composition_commit(T, "y"),
        ]
    );
    assert_eq!(engine.surface().content(), SENTINEL_PADDING);
    assert!(engine.snapshot().is_empty());

    // Guard fully unwound: real input is processed again
    type_text(&mut engine, "z");
    assert_eq!(engine.channel().messages().len(), 7);
}

/// Surface that fires a burst of notifications per program write, some
/// of them missing one or both sentinels
#[derive(Default)]
struct BurstSurface {
    inner: MemorySurface,
}

impl EditingSurface for BurstSurface {
    fn write(&mut self, content: &str, caret: usize) -> Vec<String> {
        self.inner.write(content, caret);
        vec![
            self.inner.content(),
            " ".to_string(),
            "\u{a0}".to_string(),
            String::new(),
            "\u{a0}stale text ".to_string(),
        ]
    }

    fn focus(&mut self) {
        self.inner.focus();
    }

    fn blur(&mut self) {
        self.inner.blur();
    }

    fn select_all(&mut self) {
        self.inner.select_all();
    }
}

#[test]
fn test_reset_ignores_every_notification_in_a_burst() {
    let mut engine = InputEngine::new(
        BurstSurface::default(),
        RecordingChannel::new(),
        EngineOptions::default(),
    );
    assert!(engine.channel().is_empty());

    engine.reset();
    engine.on_key_up("Home");
    assert!(engine.channel().is_empty());
    assert!(engine.snapshot().is_empty());

    let raw = engine.surface_mut().inner.insert("a\nb");
    engine.on_raw_change(&raw);
    assert_eq!(
        engine.channel().messages(),
        vec![
            Message::composition_input(T, "a"),
            Message::composition_commit(T, "a"),
            Message::enter(T),
            Message::composition_input(T, "b"),
            Message::composition_commit(T, "b"),
        ]
    );
    assert!(engine.snapshot().is_empty());

    // Guard fully unwound after the bursts
    let raw = engine.surface_mut().inner.backspace();
    engine.on_raw_change(&raw);
    assert_eq!(engine.channel().messages().len(), 6);
}

#[test]
fn test_ime_session_replaces_provisional_text() {
    let mut engine = engine();

    engine.on_composition_start();
    assert_eq!(engine.composition_state(), CompositionState::Composing);

    let raw = engine.surface_mut().insert("n");
    engine.on_composition_update(&raw);
    let raw = engine.surface_mut().insert("i");
    engine.on_composition_update(&raw);
    let raw = engine.surface_mut().replace_before_caret(2, "你");
    engine.on_composition_end(&raw);

    assert_eq!(engine.composition_state(), CompositionState::Idle);
    assert_eq!(
        engine.channel().messages(),
        vec![
            Message::composition_input(T, "n"),
            Message::composition_commit(T, "n"),
            Message::composition_input(T, "i"),
            Message::composition_commit(T, "i"),
            Message::remove_before(T, 2),
            Message::composition_input(T, "你"),
            Message::composition_commit(T, "你"),
        ]
    );
}

#[test]
fn test_spellcheck_rewrite_of_earlier_word() {
    let mut engine = engine();
    type_text(&mut engine, "teh cat");
    engine.channel_mut().take();

    // Spellchecker swaps the whole content in one update
    let raw = engine.surface_mut().replace_before_caret(7, "the cat");
    engine.on_composition_update(&raw);

    assert_eq!(
        engine.channel().messages(),
        vec![
            Message::remove_before(T, 6),
            Message::composition_input(T, "he cat"),
            Message::composition_commit(T, "he cat"),
        ]
    );
}

#[test]
fn test_pointer_down_aborts_without_commit() {
    let mut engine = engine();

    engine.on_composition_start();
    let raw = engine.surface_mut().insert("ab");
    engine.on_composition_update(&raw);
    engine.channel_mut().take();

    engine.on_abort(AbortTrigger::PointerDown);

    assert_eq!(engine.composition_state(), CompositionState::Idle);
    assert!(engine.channel().is_empty());
    assert_eq!(engine.surface().content(), SENTINEL_PADDING);

    // Fresh content is diffed against an empty snapshot
    type_text(&mut engine, "c");
    assert_eq!(
        engine.channel().messages(),
        vec![
            Message::composition_input(T, "c"),
            Message::composition_commit(T, "c"),
        ]
    );
}

#[test]
fn test_blur_resets_only_while_composing() {
    let mut engine = engine();
    type_text(&mut engine, "ab");
    let writes = engine.surface().write_count();

    engine.on_blur();
    assert_eq!(engine.surface().write_count(), writes);
    assert_eq!(engine.snapshot(), &Snapshot::from("ab"));

    engine.on_composition_start();
    engine.on_blur();
    assert_eq!(engine.surface().write_count(), writes + 1);
    assert_eq!(engine.composition_state(), CompositionState::Idle);
}

#[test]
fn test_enter_key_and_reset() {
    let mut engine = engine();
    type_text(&mut engine, "hi");
    engine.channel_mut().take();

    type_text(&mut engine, "\n");

    assert_eq!(
        engine.channel().frames(),
        vec!["key type=input char=13 key=1280\n"]
    );
    assert_eq!(engine.surface().content(), SENTINEL_PADDING);
    assert!(engine.snapshot().is_empty());
}

#[test]
fn test_gecko_drops_lone_line_break() {
    let options = EngineOptions {
        quirks: Platform::Gecko.quirks(),
        ..EngineOptions::default()
    };
    let mut engine = engine_with(MemorySurface::new(), options);

    type_text(&mut engine, "\n");
    assert!(engine.channel().is_empty());

    // The break stays in the snapshot; the next key diffs past it
    type_text(&mut engine, "a");
    assert_eq!(
        engine.channel().messages(),
        vec![
            Message::composition_input(T, "a"),
            Message::composition_commit(T, "a"),
        ]
    );
}

#[test]
fn test_secondary_window_frames_carry_target() {
    let options = EngineOptions {
        target: TargetId(3),
        ..EngineOptions::default()
    };
    let mut engine = engine_with(MemorySurface::new(), options);

    type_text(&mut engine, "ok\n");
    let raw = engine.surface_mut().backspace();
    engine.on_raw_change(&raw);

    assert_eq!(
        engine.channel().frames(),
        vec![
            "textinput id=3 type=input text=ok",
            "textinput id=3 type=end text=ok",
            "windowkey id=3 type=input char=13 key=1280\n",
            "removetextcontext id=3 before=1 after=0",
        ]
    );
}

#[test]
fn test_utf16_surrogate_input() {
    let mut engine = engine();
    engine.on_raw_change_utf16(&[0x00A0, 0xD83D, 0xDE00, 0x0020]);

    assert_eq!(
        engine.channel().frames(),
        vec![
            "textinput id=0 type=input text=%F0%9F%98%80",
            "textinput id=0 type=end text=%F0%9F%98%80",
        ]
    );
    assert_eq!(engine.snapshot().len(), 1);
}

#[test]
fn test_paste_of_own_copy_uses_remote_clipboard() {
    let mut engine = engine();
    let mut clipboard = MemoryClipboard::new();

    engine.on_copy("Quarterly report", &mut clipboard);
    engine.channel_mut().take();
    let writes = engine.surface().write_count();

    let payload = ClipboardPayload::plain("Quarterly report").with_item("text/html", "<b>Q</b>");
    let disposition = engine.on_paste(payload);

    assert_eq!(disposition, EventDisposition::PreventDefault);
    assert_eq!(engine.channel().frames(), vec!["uno .uno:Paste"]);
    assert_eq!(engine.channel().transfers(), 0);
    assert_eq!(engine.surface().write_count(), writes);
}

#[test]
fn test_external_paste_is_transferred_and_aborts_composition() {
    let mut engine = engine();
    engine.on_composition_start();
    let raw = engine.surface_mut().insert("x");
    engine.on_composition_update(&raw);
    engine.channel_mut().take();

    let payload = ClipboardPayload::plain("from elsewhere").with_item("text/rtf", "{\\rtf1}");
    engine.on_paste(payload.clone());

    assert_eq!(
        engine.channel().sent(),
        &[Outbound::DocumentTransfer {
            target: T,
            payload
        }]
    );
    assert_eq!(engine.composition_state(), CompositionState::Idle);
    assert_eq!(engine.surface().content(), SENTINEL_PADDING);
    assert!(engine.snapshot().is_empty());
}

#[test]
fn test_replayed_host_events() {
    let script = r#"[
        { "type": "input", "raw": "\u00a0h " },
        { "type": "input", "raw": "\u00a0hi " },
        { "type": "key_up", "key": "ArrowLeft" },
        { "type": "input", "raw": " " },
        { "type": "copy", "selection": "hi" },
        { "type": "paste", "payload": { "plainText": "hi" } }
    ]"#;
    let events: Vec<HostEvent> = serde_json::from_str(script).unwrap();

    let mut engine = engine();
    let mut clipboard = MemoryClipboard::new();
    for event in events {
        dispatch(&mut engine, event, &mut clipboard);
    }

    assert_eq!(
        engine.channel().frames(),
        vec![
            "textinput id=0 type=input text=h",
            "textinput id=0 type=end text=h",
            "textinput id=0 type=input text=i",
            "textinput id=0 type=end text=i",
            "removetextcontext id=0 before=1 after=0",
            "uno .uno:Copy",
            "uno .uno:Paste",
        ]
    );
    assert_eq!(clipboard.text(), Some("hi"));
}
