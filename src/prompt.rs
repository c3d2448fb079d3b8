/// Blocking dialogs: avatar selection, game over and win.
///
/// Each prompt draws over the current screen and waits on the input
/// channel for an answer, the way the start menu always has.

use std::io::Write;
use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color;

use bug_crossing::engine::{Modal, ModalChoice, Phase};
use bug_crossing::entities::Avatar;

use crate::display::draw_dialog;

pub enum AvatarChoice {
    /// `None` keeps the current avatar.
    Pick(Option<Avatar>),
    Quit,
}

/// Wait for the next key press.  `None` means the input thread is gone.
fn next_key(rx: &mpsc::Receiver<Event>) -> Option<KeyEvent> {
    loop {
        match rx.recv() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return Some(key),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

/// Throw away key presses that arrived before the dialog went up, so a key
/// still held from play cannot answer it.
fn drain_pending(rx: &mpsc::Receiver<Event>) {
    while rx.try_recv().is_ok() {}
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn choose_avatar<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    current: Avatar,
) -> std::io::Result<AvatarChoice> {
    drain_pending(rx);

    let mut lines = vec![
        ("Select a Player".to_string(), Color::Cyan),
        (String::new(), Color::White),
    ];
    for (i, avatar) in Avatar::ALL.iter().enumerate() {
        let color = if *avatar == current { Color::Yellow } else { Color::White };
        lines.push((format!("[{}] {}", i + 1, avatar.label()), color));
    }
    lines.push((String::new(), Color::White));
    lines.push(("ENTER : Keep current   Q : Quit".to_string(), Color::DarkGrey));
    draw_dialog(out, &lines)?;

    loop {
        let Some(key) = next_key(rx) else {
            return Ok(AvatarChoice::Quit);
        };
        if is_quit(&key) || key.code == KeyCode::Esc {
            return Ok(AvatarChoice::Quit);
        }
        match key.code {
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                return Ok(AvatarChoice::Pick(Some(Avatar::ALL[index])));
            }
            KeyCode::Enter => return Ok(AvatarChoice::Pick(None)),
            _ => {}
        }
    }
}

/// Ask whatever the paused engine is waiting on.  `None` means quit.
pub fn ask<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    phase: Phase,
) -> std::io::Result<Option<ModalChoice>> {
    drain_pending(rx);

    match phase {
        Phase::GameOver => {
            draw_dialog(
                out,
                &[
                    ("Game Over!".to_string(), Color::Red),
                    ("Another game?".to_string(), Color::White),
                    (String::new(), Color::White),
                    ("Y / ENTER : Yes   N / ESC : No".to_string(), Color::DarkGrey),
                ],
            )?;
            loop {
                let Some(key) = next_key(rx) else {
                    return Ok(None);
                };
                if is_quit(&key) {
                    return Ok(None);
                }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                        return Ok(Some(ModalChoice::Confirm));
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        return Ok(Some(ModalChoice::Cancel));
                    }
                    _ => {}
                }
            }
        }
        Phase::Paused(Modal::Won) => {
            draw_dialog(
                out,
                &[
                    ("You won the game!".to_string(), Color::Green),
                    ("You are a Winner.".to_string(), Color::White),
                    (String::new(), Color::White),
                    ("ENTER / SPACE : Play again".to_string(), Color::DarkGrey),
                ],
            )?;
            loop {
                let Some(key) = next_key(rx) else {
                    return Ok(None);
                };
                if is_quit(&key) {
                    return Ok(None);
                }
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc) {
                    return Ok(Some(ModalChoice::Confirm));
                }
            }
        }
        _ => Ok(Some(ModalChoice::Confirm)),
    }
}
