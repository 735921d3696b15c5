//! Application model for the interactive table
//!
//! Elm-style: discrete input events arrive as [`Msg`] values, `update`
//! performs a pure state transition and returns an [`Action`] for the
//! terminal runner to execute. No I/O happens here.

use crate::types::SortKey;
use crate::view::ViewState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Spinner animation frames, advanced on each tick while loading
pub const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Input events fed to the model
#[derive(Debug, Clone)]
pub enum Msg {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
}

/// Side effect requested by a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Echo the selected row's name in the status line
    Echo(String),
}

/// Interactive table state
pub struct App {
    pub view: ViewState,
    /// Row cursor within the visible window
    pub selected: usize,
    /// Whether the table accepts row navigation
    pub focused: bool,
    /// Loading flag driving the spinner; never set in the current flow
    /// (the fetch completes before the event loop starts), kept wired for
    /// the tick animation.
    pub loading: bool,
    pub spinner_frame: usize,
    pub size: (u16, u16),
}

impl App {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            selected: 0,
            focused: true,
            loading: false,
            spinner_frame: 0,
            size: (0, 0),
        }
    }

    /// Applies one message and returns the side effect to run
    pub fn update(&mut self, msg: Msg) -> Action {
        match msg {
            Msg::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            Msg::Key(_) => Action::None,
            Msg::Tick => {
                if self.loading {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                }
                Action::None
            }
            Msg::Resize(w, h) => {
                self.size = (w, h);
                Action::None
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Esc => {
                self.focused = !self.focused;
                Action::None
            }
            KeyCode::Enter => match self.view.visible().get(self.selected) {
                Some((_, record)) => Action::Echo(format!("Selected: {}", record.name)),
                None => Action::None,
            },
            KeyCode::Right => {
                self.view.next_page();
                self.clamp_selection();
                Action::None
            }
            KeyCode::Left => {
                self.view.prev_page();
                self.clamp_selection();
                Action::None
            }
            KeyCode::Up if self.focused => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down if self.focused => {
                if self.selected + 1 < self.view.window().len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Char(c) => {
                if let Some(key) = sort_key_for(c) {
                    self.view.toggle_sort(key);
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Keeps the cursor inside the (possibly shorter) new window
    fn clamp_selection(&mut self) {
        let len = self.view.window().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Single-key sort triggers, one per sortable column
fn sort_key_for(c: char) -> Option<SortKey> {
    match c {
        'r' => Some(SortKey::Rank),
        'n' => Some(SortKey::Name),
        'p' => Some(SortKey::Price),
        '1' => Some(SortKey::Change1h),
        '2' => Some(SortKey::Change24h),
        '7' => Some(SortKey::Change7d),
        'm' => Some(SortKey::MarketCap),
        'a' => Some(SortKey::Volume),
        't' => Some(SortKey::TotalSupply),
        _ => None,
    }
}
