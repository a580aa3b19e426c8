use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Pause,
    Reset,
    Turn(Direction),
}

/// Key bindings read from the `[controls]` table of the configuration file
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Controls {
    pub(crate) up: KeyBinding,
    pub(crate) down: KeyBinding,
    pub(crate) left: KeyBinding,
    pub(crate) right: KeyBinding,
    pub(crate) forward: KeyBinding,
    pub(crate) backward: KeyBinding,
    pub(crate) pause: KeyBinding,
    pub(crate) reset: KeyBinding,
    pub(crate) quit: KeyBinding,
}

impl Controls {
    /// Map a key press to a command.  Ctrl-C always quits.  When a key is
    /// bound more than once, quit wins over pause, pause over reset, and
    /// reset over movement.
    pub(crate) fn command_for(&self, ev: KeyEvent) -> Option<Command> {
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !(KeyModifiers::NONE | KeyModifiers::SHIFT).contains(ev.modifiers) {
            return None;
        }
        [
            (self.quit, Command::Quit),
            (self.pause, Command::Pause),
            (self.reset, Command::Reset),
            (self.up, Command::Turn(Direction::Up)),
            (self.down, Command::Turn(Direction::Down)),
            (self.left, Command::Turn(Direction::Left)),
            (self.right, Command::Turn(Direction::Right)),
            (self.forward, Command::Turn(Direction::Forward)),
            (self.backward, Command::Turn(Direction::Backward)),
        ]
        .into_iter()
        .find_map(|(binding, cmd)| (binding.0 == ev.code).then_some(cmd))
    }
}

impl Default for Controls {
    fn default() -> Controls {
        Controls {
            up: KeyBinding(KeyCode::Up),
            down: KeyBinding(KeyCode::Down),
            left: KeyBinding(KeyCode::Left),
            right: KeyBinding(KeyCode::Right),
            forward: KeyBinding(KeyCode::Char('w')),
            backward: KeyBinding(KeyCode::Char('s')),
            pause: KeyBinding(KeyCode::Char('p')),
            reset: KeyBinding(KeyCode::Char('r')),
            quit: KeyBinding(KeyCode::Char('q')),
        }
    }
}

/// A single key, named in configuration files either by the character it
/// types or by a name like "Up" or "F5"
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "String")]
pub(crate) struct KeyBinding(KeyCode);

static NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Space", KeyCode::Char(' ')),
    ("Enter", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Escape", KeyCode::Esc),
    ("Tab", KeyCode::Tab),
    ("Backspace", KeyCode::Backspace),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Insert", KeyCode::Insert),
    ("Delete", KeyCode::Delete),
];

impl FromStr for KeyBinding {
    type Err = KeyNameError;

    fn from_str(s: &str) -> Result<KeyBinding, KeyNameError> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyBinding(KeyCode::Char(c)));
        }
        if let Some(&(_, code)) = NAMED_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
        {
            return Ok(KeyBinding(code));
        }
        s.strip_prefix(['F', 'f'])
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(|n| KeyBinding(KeyCode::F(n)))
            .ok_or_else(|| KeyNameError(s.to_owned()))
    }
}

impl TryFrom<String> for KeyBinding {
    type Error = KeyNameError;

    fn try_from(s: String) -> Result<KeyBinding, KeyNameError> {
        s.parse()
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            KeyCode::Char(' ') => f.pad("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "F{n}"),
            KeyCode::Up => f.pad("↑"),
            KeyCode::Down => f.pad("↓"),
            KeyCode::Left => f.pad("←"),
            KeyCode::Right => f.pad("→"),
            code => match NAMED_KEYS.iter().find(|&&(_, c)| c == code) {
                Some((name, _)) => f.pad(name),
                None => write!(f, "{code:?}"),
            },
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown key name {0:?}")]
pub(crate) struct KeyNameError(String);
