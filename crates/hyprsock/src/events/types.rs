//! Event kinds and decoded event records
//!
//! The kind set is closed: Hyprland's event socket emits a fixed list of
//! tags and each tag has a fixed argument layout. Tags we do not know are
//! not represented here at all; they decode to nothing.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Tag identifying what an event frame describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Workspace,
    CreateWorkspace,
    DestroyWorkspace,
    FocusedMon,
    ActiveWindow,
    ActiveWindowV2,
    Fullscreen,
    MonitorRemoved,
    MonitorAdded,
    MoveWorkspace,
    ActiveSpecial,
    RenameWorkspace,
    ActiveLayout,
    OpenWindow,
    CloseWindow,
    MoveWindow,
    OpenLayer,
    CloseLayer,
    Submap,
    ChangeFloatingMode,
    Urgent,
    Minimize,
    Screencast,
    WindowTitle,
    IgnoreGroupLock,
    LockGroups,
}

impl EventKind {
    /// Every kind, in wire-table order
    pub const ALL: [EventKind; 26] = [
        EventKind::Workspace,
        EventKind::CreateWorkspace,
        EventKind::DestroyWorkspace,
        EventKind::FocusedMon,
        EventKind::ActiveWindow,
        EventKind::ActiveWindowV2,
        EventKind::Fullscreen,
        EventKind::MonitorRemoved,
        EventKind::MonitorAdded,
        EventKind::MoveWorkspace,
        EventKind::ActiveSpecial,
        EventKind::RenameWorkspace,
        EventKind::ActiveLayout,
        EventKind::OpenWindow,
        EventKind::CloseWindow,
        EventKind::MoveWindow,
        EventKind::OpenLayer,
        EventKind::CloseLayer,
        EventKind::Submap,
        EventKind::ChangeFloatingMode,
        EventKind::Urgent,
        EventKind::Minimize,
        EventKind::Screencast,
        EventKind::WindowTitle,
        EventKind::IgnoreGroupLock,
        EventKind::LockGroups,
    ];

    /// The tag as it appears on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Workspace => "workspace",
            EventKind::CreateWorkspace => "createworkspace",
            EventKind::DestroyWorkspace => "destroyworkspace",
            EventKind::FocusedMon => "focusedmon",
            EventKind::ActiveWindow => "activewindow",
            EventKind::ActiveWindowV2 => "activewindowv2",
            EventKind::Fullscreen => "fullscreen",
            EventKind::MonitorRemoved => "monitorremoved",
            EventKind::MonitorAdded => "monitoradded",
            EventKind::MoveWorkspace => "moveworkspace",
            EventKind::ActiveSpecial => "activespecial",
            EventKind::RenameWorkspace => "renameworkspace",
            EventKind::ActiveLayout => "activelayout",
            EventKind::OpenWindow => "openwindow",
            EventKind::CloseWindow => "closewindow",
            EventKind::MoveWindow => "movewindow",
            EventKind::OpenLayer => "openlayer",
            EventKind::CloseLayer => "closelayer",
            EventKind::Submap => "submap",
            EventKind::ChangeFloatingMode => "changefloatingmode",
            EventKind::Urgent => "urgent",
            EventKind::Minimize => "minimize",
            EventKind::Screencast => "screencast",
            EventKind::WindowTitle => "windowtitle",
            EventKind::IgnoreGroupLock => "ignoregrouplock",
            EventKind::LockGroups => "lockgroups",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known event tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind(pub String);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// Who started a screencast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreencastOwner {
    Monitor,
    Window,
}

/// A decoded event with the named fields for its kind
///
/// Serializes as `{"event": "<tag>", "data": {...}}` with camelCase field
/// names, which is what `hyprsock listen` prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Event {
    Workspace {
        workspace_name: String,
    },
    CreateWorkspace {
        workspace_name: String,
    },
    DestroyWorkspace {
        workspace_name: String,
    },
    FocusedMon {
        monitor_name: String,
        workspace_name: String,
    },
    ActiveWindow {
        window_class: String,
        window_title: String,
    },
    ActiveWindowV2 {
        window_address: String,
    },
    Fullscreen {
        fullscreen: bool,
    },
    MonitorRemoved {
        monitor_name: String,
    },
    MonitorAdded {
        monitor_name: String,
    },
    MoveWorkspace {
        workspace_name: String,
        monitor_name: String,
    },
    ActiveSpecial {
        workspace_name: String,
        monitor_name: String,
    },
    RenameWorkspace {
        workspace_id: String,
        new_name: String,
    },
    ActiveLayout {
        keyboard_name: String,
        layout_name: String,
    },
    OpenWindow {
        window_address: String,
        workspace_name: String,
        window_class: String,
        window_title: String,
    },
    CloseWindow {
        window_address: String,
    },
    MoveWindow {
        window_address: String,
        workspace_name: String,
    },
    OpenLayer {
        namespace: String,
    },
    CloseLayer {
        namespace: String,
    },
    Submap {
        submap: String,
    },
    ChangeFloatingMode {
        window_address: String,
        floating: bool,
    },
    Urgent {
        window_address: String,
    },
    Minimize {
        window_address: String,
        minimized: bool,
    },
    Screencast {
        state: bool,
        owner: ScreencastOwner,
    },
    WindowTitle {
        window_address: String,
    },
    IgnoreGroupLock {
        state: bool,
    },
    LockGroups {
        state: bool,
    },
}

impl Event {
    /// The kind this event was decoded from
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Workspace { .. } => EventKind::Workspace,
            Event::CreateWorkspace { .. } => EventKind::CreateWorkspace,
            Event::DestroyWorkspace { .. } => EventKind::DestroyWorkspace,
            Event::FocusedMon { .. } => EventKind::FocusedMon,
            Event::ActiveWindow { .. } => EventKind::ActiveWindow,
            Event::ActiveWindowV2 { .. } => EventKind::ActiveWindowV2,
            Event::Fullscreen { .. } => EventKind::Fullscreen,
            Event::MonitorRemoved { .. } => EventKind::MonitorRemoved,
            Event::MonitorAdded { .. } => EventKind::MonitorAdded,
            Event::MoveWorkspace { .. } => EventKind::MoveWorkspace,
            Event::ActiveSpecial { .. } => EventKind::ActiveSpecial,
            Event::RenameWorkspace { .. } => EventKind::RenameWorkspace,
            Event::ActiveLayout { .. } => EventKind::ActiveLayout,
            Event::OpenWindow { .. } => EventKind::OpenWindow,
            Event::CloseWindow { .. } => EventKind::CloseWindow,
            Event::MoveWindow { .. } => EventKind::MoveWindow,
            Event::OpenLayer { .. } => EventKind::OpenLayer,
            Event::CloseLayer { .. } => EventKind::CloseLayer,
            Event::Submap { .. } => EventKind::Submap,
            Event::ChangeFloatingMode { .. } => EventKind::ChangeFloatingMode,
            Event::Urgent { .. } => EventKind::Urgent,
            Event::Minimize { .. } => EventKind::Minimize,
            Event::Screencast { .. } => EventKind::Screencast,
            Event::WindowTitle { .. } => EventKind::WindowTitle,
            Event::IgnoreGroupLock { .. } => EventKind::IgnoreGroupLock,
            Event::LockGroups { .. } => EventKind::LockGroups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_parses_from_its_tag() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "configreloaded".parse::<EventKind>().unwrap_err();
        assert_eq!(err, UnknownEventKind("configreloaded".to_string()));
        assert!("Workspace".parse::<EventKind>().is_err(), "tags are case sensitive");
    }

    #[test]
    fn test_kind_serializes_as_wire_tag() {
        for kind in EventKind::ALL {
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.as_str().to_string())
            );
        }
    }

    #[test]
    fn test_event_serializes_with_camel_case_fields() {
        let event = Event::ActiveWindow {
            window_class: "firefox".to_string(),
            window_title: "Mozilla Firefox".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"activewindow","data":{"windowClass":"firefox","windowTitle":"Mozilla Firefox"}}"#
        );
    }

    #[test]
    fn test_screencast_serialization() {
        let event = Event::Screencast {
            state: true,
            owner: ScreencastOwner::Monitor,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"screencast","data":{"state":true,"owner":"monitor"}}"#
        );
    }

    #[test]
    fn test_event_kind_matches_variant() {
        let event = Event::ActiveWindowV2 {
            window_address: "5632a0e4d1a0".to_string(),
        };
        assert_eq!(event.kind(), EventKind::ActiveWindowV2);
        assert_eq!(event.kind().to_string(), "activewindowv2");
    }
}
