//! Frame decoding
//!
//! A frame is one line on the event socket:
//!
//! ```text
//! <kind>>><arg0>,<arg1>,...
//! ```
//!
//! Arguments are split on every comma. The protocol has no escaping, so a
//! window title containing a comma is cut at the first comma; that is how
//! Hyprland's wire format behaves and it is kept as is.
//!
//! Boolean fields are `true` only for the literal `"1"`. A frame whose kind
//! is unknown, that has no `>>` separator, or that lacks a string argument
//! its kind needs decodes to `None` and is dispatched nowhere.

use super::types::{Event, EventKind, ScreencastOwner};

/// Separator between the kind tag and its arguments
pub const FRAME_SEPARATOR: &str = ">>";

/// Split raw frame arguments, exposing typed accessors
struct Args<'a> {
    values: Vec<&'a str>,
}

impl<'a> Args<'a> {
    fn split(data: &'a str) -> Self {
        Self {
            values: data.trim().split(',').collect(),
        }
    }

    fn text(&self, index: usize) -> Option<String> {
        self.values.get(index).map(|value| value.to_string())
    }

    fn flag(&self, index: usize) -> bool {
        self.values.get(index).is_some_and(|value| *value == "1")
    }
}

/// Decode one frame into an event
///
/// # Example
///
/// ```ignore
/// let event = parse_frame("activewindow>>firefox,Mozilla Firefox");
/// assert_eq!(event.map(|e| e.kind()), Some(EventKind::ActiveWindow));
/// ```
pub fn parse_frame(frame: &str) -> Option<Event> {
    let (tag, data) = frame.split_once(FRAME_SEPARATOR)?;
    let kind = tag.trim().parse::<EventKind>().ok()?;
    decode(kind, data)
}

/// Decode the argument text of a frame whose kind is already known
pub fn decode(kind: EventKind, data: &str) -> Option<Event> {
    let args = Args::split(data);

    let decoder: fn(&Args) -> Option<Event> = match kind {
        EventKind::Workspace => workspace,
        EventKind::CreateWorkspace => create_workspace,
        EventKind::DestroyWorkspace => destroy_workspace,
        EventKind::FocusedMon => focused_mon,
        EventKind::ActiveWindow => active_window,
        EventKind::ActiveWindowV2 => active_window_v2,
        EventKind::Fullscreen => fullscreen,
        EventKind::MonitorRemoved => monitor_removed,
        EventKind::MonitorAdded => monitor_added,
        EventKind::MoveWorkspace => move_workspace,
        EventKind::ActiveSpecial => active_special,
        EventKind::RenameWorkspace => rename_workspace,
        EventKind::ActiveLayout => active_layout,
        EventKind::OpenWindow => open_window,
        EventKind::CloseWindow => close_window,
        EventKind::MoveWindow => move_window,
        EventKind::OpenLayer => open_layer,
        EventKind::CloseLayer => close_layer,
        EventKind::Submap => submap,
        EventKind::ChangeFloatingMode => change_floating_mode,
        EventKind::Urgent => urgent,
        EventKind::Minimize => minimize,
        EventKind::Screencast => screencast,
        EventKind::WindowTitle => window_title,
        EventKind::IgnoreGroupLock => ignore_group_lock,
        EventKind::LockGroups => lock_groups,
    };

    decoder(&args)
}

fn workspace(args: &Args) -> Option<Event> {
    Some(Event::Workspace {
        workspace_name: args.text(0)?,
    })
}

fn create_workspace(args: &Args) -> Option<Event> {
    Some(Event::CreateWorkspace {
        workspace_name: args.text(0)?,
    })
}

fn destroy_workspace(args: &Args) -> Option<Event> {
    Some(Event::DestroyWorkspace {
        workspace_name: args.text(0)?,
    })
}

fn focused_mon(args: &Args) -> Option<Event> {
    Some(Event::FocusedMon {
        monitor_name: args.text(0)?,
        workspace_name: args.text(1)?,
    })
}

fn active_window(args: &Args) -> Option<Event> {
    Some(Event::ActiveWindow {
        window_class: args.text(0)?,
        window_title: args.text(1)?,
    })
}

fn active_window_v2(args: &Args) -> Option<Event> {
    Some(Event::ActiveWindowV2 {
        window_address: args.text(0)?,
    })
}

fn fullscreen(args: &Args) -> Option<Event> {
    Some(Event::Fullscreen {
        fullscreen: args.flag(0),
    })
}

fn monitor_removed(args: &Args) -> Option<Event> {
    Some(Event::MonitorRemoved {
        monitor_name: args.text(0)?,
    })
}

fn monitor_added(args: &Args) -> Option<Event> {
    Some(Event::MonitorAdded {
        monitor_name: args.text(0)?,
    })
}

fn move_workspace(args: &Args) -> Option<Event> {
    Some(Event::MoveWorkspace {
        workspace_name: args.text(0)?,
        monitor_name: args.text(1)?,
    })
}

fn active_special(args: &Args) -> Option<Event> {
    Some(Event::ActiveSpecial {
        workspace_name: args.text(0)?,
        monitor_name: args.text(1)?,
    })
}

fn rename_workspace(args: &Args) -> Option<Event> {
    Some(Event::RenameWorkspace {
        workspace_id: args.text(0)?,
        new_name: args.text(1)?,
    })
}

// Hyprland sends keyboard,<unused>,layout; index 1 is skipped on purpose.
fn active_layout(args: &Args) -> Option<Event> {
    Some(Event::ActiveLayout {
        keyboard_name: args.text(0)?,
        layout_name: args.text(2)?,
    })
}

fn open_window(args: &Args) -> Option<Event> {
    Some(Event::OpenWindow {
        window_address: args.text(0)?,
        workspace_name: args.text(1)?,
        window_class: args.text(2)?,
        window_title: args.text(3)?,
    })
}

fn close_window(args: &Args) -> Option<Event> {
    Some(Event::CloseWindow {
        window_address: args.text(0)?,
    })
}

fn move_window(args: &Args) -> Option<Event> {
    Some(Event::MoveWindow {
        window_address: args.text(0)?,
        workspace_name: args.text(1)?,
    })
}

fn open_layer(args: &Args) -> Option<Event> {
    Some(Event::OpenLayer {
        namespace: args.text(0)?,
    })
}

fn close_layer(args: &Args) -> Option<Event> {
    Some(Event::CloseLayer {
        namespace: args.text(0)?,
    })
}

fn submap(args: &Args) -> Option<Event> {
    Some(Event::Submap {
        submap: args.text(0)?,
    })
}

fn change_floating_mode(args: &Args) -> Option<Event> {
    Some(Event::ChangeFloatingMode {
        window_address: args.text(0)?,
        floating: args.flag(1),
    })
}

fn urgent(args: &Args) -> Option<Event> {
    Some(Event::Urgent {
        window_address: args.text(0)?,
    })
}

fn minimize(args: &Args) -> Option<Event> {
    Some(Event::Minimize {
        window_address: args.text(0)?,
        minimized: args.flag(1),
    })
}

fn screencast(args: &Args) -> Option<Event> {
    let owner = if args.values.get(1) == Some(&"0") {
        ScreencastOwner::Monitor
    } else {
        ScreencastOwner::Window
    };

    Some(Event::Screencast {
        state: args.flag(0),
        owner,
    })
}

fn window_title(args: &Args) -> Option<Event> {
    Some(Event::WindowTitle {
        window_address: args.text(0)?,
    })
}

fn ignore_group_lock(args: &Args) -> Option<Event> {
    Some(Event::IgnoreGroupLock {
        state: args.flag(0),
    })
}

fn lock_groups(args: &Args) -> Option<Event> {
    Some(Event::LockGroups {
        state: args.flag(0),
    })
}
