// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app, or
// into local ViewState changes (tab switching, cursor movement, filtering,
// prompt editing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use golfdraft_core::protocol::{TabId, UserCommand};

use super::{InputMode, TierCursor, ViewState};

/// Longest team count the prompt accepts.
const MAX_COUNT_DIGITS: usize = 3;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app, `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match view_state.input_mode {
        InputMode::Normal => handle_normal_mode(key_event, view_state),
        InputMode::Filter => handle_filter_mode(key_event, view_state),
        InputMode::TeamCount { .. } => handle_team_count(key_event, view_state),
        InputMode::RenameTeam { .. } => handle_rename(key_event, view_state),
    }
}

fn handle_normal_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('1') => view_state.active_tab = TabId::Tiers,
        KeyCode::Char('2') => view_state.active_tab = TabId::Outside,
        KeyCode::Char('3') => view_state.active_tab = TabId::Teams,
        KeyCode::Tab => view_state.active_tab = view_state.active_tab.next(),
        KeyCode::BackTab => view_state.active_tab = view_state.active_tab.prev(),

        KeyCode::Up | KeyCode::Char('k') => move_vertical(view_state, -1),
        KeyCode::Down | KeyCode::Char('j') => move_vertical(view_state, 1),
        KeyCode::Left | KeyCode::Char('h') => move_tier(view_state, -1),
        KeyCode::Right | KeyCode::Char('l') => move_tier(view_state, 1),

        KeyCode::Enter => return pick_under_cursor(view_state),

        KeyCode::Char('/') => {
            view_state.active_tab = TabId::Outside;
            view_state.input_mode = InputMode::Filter;
        }
        KeyCode::Esc => {
            view_state.filter_text.clear();
            view_state.notice = None;
            view_state.clamp_cursors();
        }

        KeyCode::Char('e') if view_state.active_tab == TabId::Teams => {
            let index = view_state.team_cursor;
            let current = view_state
                .snapshot
                .as_deref()
                .and_then(|s| s.teams().get(index))
                .map(|t| t.name.clone());
            if let Some(buffer) = current {
                view_state.input_mode = InputMode::RenameTeam { index, buffer };
            }
        }
        KeyCode::Char('s') => {
            view_state.input_mode = InputMode::TeamCount {
                buffer: String::new(),
            };
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => view_state.confirm_quit = true,

        _ => {}
    }
    None
}

/// In quit confirmation mode `y`/`q` confirm, `n`/Esc cancel, and every
/// other key is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Enter keeps the filter, Esc clears it. Editing the filter moves the
/// cursor back to the top of the list.
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            view_state.filter_text.clear();
            view_state.outside_cursor = 0;
        }
        KeyCode::Enter => view_state.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            view_state.filter_text.pop();
            view_state.outside_cursor = 0;
        }
        KeyCode::Char(c) => {
            view_state.filter_text.push(c);
            view_state.outside_cursor = 0;
        }
        KeyCode::Up => move_vertical(view_state, -1),
        KeyCode::Down => move_vertical(view_state, 1),
        _ => {}
    }
    None
}

fn handle_team_count(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let InputMode::TeamCount { buffer } = &mut view_state.input_mode else {
        return None;
    };
    match key_event.code {
        KeyCode::Char(c) if c.is_ascii_digit() && buffer.len() < MAX_COUNT_DIGITS => {
            buffer.push(c);
            None
        }
        KeyCode::Backspace => {
            buffer.pop();
            None
        }
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Enter => {
            // Out-of-range counts are coerced by the app.
            let team_count = buffer.parse().unwrap_or(0);
            view_state.input_mode = InputMode::Normal;
            view_state.active_tab = TabId::Tiers;
            view_state.tier_cursor = TierCursor::default();
            view_state.outside_cursor = 0;
            view_state.team_cursor = 0;
            Some(UserCommand::SetupDraft { team_count })
        }
        _ => None,
    }
}

fn handle_rename(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let InputMode::RenameTeam { index, buffer } = &mut view_state.input_mode else {
        return None;
    };
    match key_event.code {
        KeyCode::Char(c) => {
            buffer.push(c);
            None
        }
        KeyCode::Backspace => {
            buffer.pop();
            None
        }
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Enter => {
            let cmd = UserCommand::RenameTeam {
                index: *index,
                name: std::mem::take(buffer),
            };
            view_state.input_mode = InputMode::Normal;
            Some(cmd)
        }
        _ => None,
    }
}

/// Pick the golfer under the cursor of the active tab. Ineligible golfers
/// are still sent; the app reports why they were refused.
fn pick_under_cursor(view_state: &ViewState) -> Option<UserCommand> {
    let candidate = match view_state.active_tab {
        TabId::Tiers => view_state.tier_selection().cloned(),
        TabId::Outside => view_state.outside_selection(),
        TabId::Teams => None,
    }?;
    Some(UserCommand::Pick {
        candidate_id: candidate.id,
    })
}

fn move_vertical(view_state: &mut ViewState, delta: isize) {
    match view_state.active_tab {
        TabId::Tiers => {
            view_state.tier_cursor.row = view_state.tier_cursor.row.saturating_add_signed(delta);
        }
        TabId::Outside => {
            view_state.outside_cursor = view_state.outside_cursor.saturating_add_signed(delta);
        }
        TabId::Teams => {
            view_state.team_cursor = view_state.team_cursor.saturating_add_signed(delta);
        }
    }
    view_state.clamp_cursors();
}

fn move_tier(view_state: &mut ViewState, delta: isize) {
    if view_state.active_tab != TabId::Tiers {
        return;
    }
    view_state.tier_cursor.tier = view_state.tier_cursor.tier.saturating_add_signed(delta);
    view_state.clamp_cursors();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
