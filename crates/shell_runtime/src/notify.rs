//! Transient toast queue and the session-scoped notification log.

use crate::model::{Notification, ShellState, Toast, ToastKind, TOAST_DURATION_MS};

/// Number of toasts kept at once; pushing beyond this drops the oldest.
pub const TOAST_WINDOW: usize = 3;
/// Maximum retained notification log entries, newest first.
pub const NOTIFICATION_CAP: usize = 50;

/// Appends a toast with the fixed lifetime, trimming the queue to the sliding
/// window. Expiry is scheduled by the caller through the returned id.
pub fn push_toast(state: &mut ShellState, kind: ToastKind, message: &str) -> u64 {
    let id = state.next_toast_id;
    state.next_toast_id = state.next_toast_id.saturating_add(1);
    while state.toasts.len() >= TOAST_WINDOW {
        state.toasts.remove(0);
    }
    state.toasts.push(Toast {
        id,
        kind,
        message: message.to_string(),
        duration_ms: TOAST_DURATION_MS,
    });
    id
}

/// Removes a toast by id. Idempotent; expiry timers are fire-and-forget, so a
/// toast dismissed early may be removed again when its timer fires.
pub fn remove_toast(state: &mut ShellState, toast_id: u64) {
    state.toasts.retain(|t| t.id != toast_id);
}

/// Prepends an unread notification, trimming the log to its cap.
pub fn push_notification(
    state: &mut ShellState,
    icon: &str,
    title: &str,
    description: &str,
    now_ms: u64,
) -> u64 {
    let id = state.next_notification_id;
    state.next_notification_id = state.next_notification_id.saturating_add(1);
    state.notifications.insert(
        0,
        Notification {
            id,
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            timestamp_ms: now_ms,
            read: false,
        },
    );
    state.notifications.truncate(NOTIFICATION_CAP);
    id
}

/// Empties the notification log.
pub fn clear_notifications(state: &mut ShellState) {
    state.notifications.clear();
}
