//! Window-manager transitions: open/focus collapsing, stacking order, and
//! geometry updates.
//!
//! Windows are session-scoped. Closing removes the record entirely and the
//! whole set is discarded on login/logout, so the monotonic z-index counter is
//! never compacted.

use crate::model::{AppId, AppWindow, ShellState, WindowId};

/// Horizontal/vertical step between cascaded new windows, in px.
const CASCADE_STEP: i32 = 30;
/// Number of cascade slots before placement wraps around.
const CASCADE_SLOTS: u64 = 5;

/// Opens a window for `app_id`, or surfaces the existing one.
///
/// A non-minimized window for the app is raised; a minimized one is restored
/// and raised. Only when neither exists is a new window created, cascaded by a
/// rotating offset so consecutive windows do not overlap exactly.
pub fn open_or_focus(state: &mut ShellState, app_id: AppId, title: &str, emoji: &str) -> WindowId {
    if let Some(id) = state
        .windows
        .iter()
        .find(|w| w.app_id == app_id && !w.minimized)
        .map(|w| w.id)
    {
        raise(state, id);
        return id;
    }
    if let Some(id) = state
        .windows
        .iter()
        .find(|w| w.app_id == app_id && w.minimized)
        .map(|w| w.id)
    {
        focus(state, id);
        return id;
    }

    state.window_cascade = state.window_cascade.wrapping_add(1);
    let offset = (state.window_cascade % CASCADE_SLOTS) as i32 * CASCADE_STEP;
    let (width, height) = app_id.default_size();
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    let z_index = state.max_z_index() + 1;
    state.windows.push(AppWindow {
        id,
        app_id,
        title: title.to_string(),
        emoji: emoji.to_string(),
        minimized: false,
        maximized: false,
        z_index,
        x: 80 + offset,
        y: 40 + offset,
        width,
        height,
    });
    id
}

/// Removes a window entirely. Idempotent.
pub fn close(state: &mut ShellState, window_id: WindowId) {
    state.windows.retain(|w| w.id != window_id);
}

/// Minimizes a window, keeping its z-index and geometry.
pub fn minimize(state: &mut ShellState, window_id: WindowId) {
    if let Some(window) = find_mut(state, window_id) {
        window.minimized = true;
    }
}

/// Flips a window's maximized flag. Maximized windows render full-viewport;
/// their stored geometry is left untouched for restore.
pub fn toggle_maximize(state: &mut ShellState, window_id: WindowId) {
    if let Some(window) = find_mut(state, window_id) {
        window.maximized = !window.maximized;
    }
}

/// Unminimizes a window and raises it to the top of the stack.
pub fn focus(state: &mut ShellState, window_id: WindowId) {
    let top = state.max_z_index() + 1;
    if let Some(window) = find_mut(state, window_id) {
        window.minimized = false;
        window.z_index = top;
    }
}

/// Moves a window. Ignored while maximized.
pub fn reposition(state: &mut ShellState, window_id: WindowId, x: i32, y: i32) {
    if let Some(window) = find_mut(state, window_id) {
        if !window.maximized {
            window.x = x;
            window.y = y;
        }
    }
}

/// Resizes a window. Ignored while maximized.
pub fn resize(state: &mut ShellState, window_id: WindowId, width: i32, height: i32) {
    if let Some(window) = find_mut(state, window_id) {
        if !window.maximized {
            window.width = width;
            window.height = height;
        }
    }
}

fn raise(state: &mut ShellState, window_id: WindowId) {
    let top = state.max_z_index() + 1;
    if let Some(window) = find_mut(state, window_id) {
        window.z_index = top;
    }
}

fn find_mut(state: &mut ShellState, window_id: WindowId) -> Option<&mut AppWindow> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}
