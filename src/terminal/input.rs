use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How long the input thread blocks before it looks at the cancel flag again
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// What the player asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Confirm,
    Quit,
    /// The display needs a resync
    Resize,
    Pause,
}

/// Shared flag telling both threads to wind down
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(_, _) => Some(InputEvent::Resize),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Left => Some(InputEvent::MoveLeft),
        KeyCode::Right => Some(InputEvent::MoveRight),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('c') if ctrl => Some(InputEvent::Quit),
        KeyCode::Char('l') if ctrl => Some(InputEvent::Resize),
        KeyCode::Char('p') | KeyCode::Char('P') if !ctrl => Some(InputEvent::Pause),
        _ => None,
    }
}

/// Reads terminal events until [InputEvent::Quit], cancellation or a closed channel.
pub fn spawn_input_thread(sender: Sender<InputEvent>, cancel: CancelToken) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || input_loop(sender, cancel))
}

fn input_loop(sender: Sender<InputEvent>, cancel: CancelToken) {
    while !cancel.is_cancelled() {
        match event::poll(POLL_TIMEOUT) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                log::warn!("terminal event poll failed: {e}");
                break;
            }
        }
        let input = match event::read() {
            Ok(e) => translate(&e),
            Err(e) => {
                log::warn!("terminal event read failed: {e}");
                break;
            }
        };
        let Some(input) = input else { continue };
        if sender.send(input).is_err() {
            break;
        }
        if input == InputEvent::Quit {
            cancel.cancel();
        }
    }
    log::debug!("input thread finished");
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[rstest]
    #[case(key(KeyCode::Left, KeyModifiers::NONE), Some(InputEvent::MoveLeft))]
    #[case(key(KeyCode::Right, KeyModifiers::NONE), Some(InputEvent::MoveRight))]
    #[case(key(KeyCode::Enter, KeyModifiers::NONE), Some(InputEvent::Confirm))]
    #[case(key(KeyCode::Esc, KeyModifiers::NONE), Some(InputEvent::Quit))]
    #[case(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(InputEvent::Quit))]
    #[case(key(KeyCode::Char('l'), KeyModifiers::CONTROL), Some(InputEvent::Resize))]
    #[case(key(KeyCode::Char('p'), KeyModifiers::NONE), Some(InputEvent::Pause))]
    #[case(key(KeyCode::Char('c'), KeyModifiers::NONE), None)]
    #[case(key(KeyCode::Up, KeyModifiers::NONE), None)]
    #[case(Event::Resize(80, 24), Some(InputEvent::Resize))]
    #[case(Event::FocusLost, None)]
    fn keys_are_mapped(#[case] event: Event, #[case] expected: Option<InputEvent>) {
        assert_eq!(translate(&event), expected);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(&Event::Key(release)), None);
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }
}
