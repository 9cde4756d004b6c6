//! Dispatcher builders
//!
//! [`Dispatch`] names one Hyprland dispatcher together with its argument.
//! Its `Display` form is the exact command text sent over the command
//! socket, so `Dispatch::Workspace { workspace: "2".into() }` becomes
//! `dispatch workspace 2`.
//!
//! Dispatchers missing from the catalogue can be sent with
//! [`Dispatch::Custom`].

use std::fmt;

use crate::command::{CommandChannel, CommandOptions};
use crate::HyprError;

// =============================================================================
// Argument Types
// =============================================================================

/// Direction argument; rendered as its first letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Left => "l",
            Direction::Right => "r",
            Direction::Up => "u",
            Direction::Down => "d",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    On,
    Off,
    Toggle,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::On => "on",
            Status::Off => "off",
            Status::Toggle => "toggle",
        })
    }
}

/// Argument of the group lock dispatchers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockMode {
    Lock,
    Unlock,
    Toggle,
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LockMode::Lock => "lock",
            LockMode::Unlock => "unlock",
            LockMode::Toggle => "toggle",
        })
    }
}

/// `Fullscreen` takes the whole screen, `Maximize` keeps gaps and bars
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FullscreenMode {
    #[default]
    Fullscreen,
    Maximize,
}

impl fmt::Display for FullscreenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FullscreenMode::Fullscreen => "0",
            FullscreenMode::Maximize => "1",
        })
    }
}

/// Corner of the active window, numbered the way Hyprland numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    BottomLeft = 0,
    BottomRight = 1,
    TopRight = 2,
    TopLeft = 3,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Which window `cyclenext` moves to; `None` in the dispatcher means next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleTarget {
    Prev,
    Tiled,
    Floating,
    PrevTiled,
}

impl fmt::Display for CycleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CycleTarget::Prev => "prev",
            CycleTarget::Tiled => "tiled",
            CycleTarget::Floating => "floating",
            CycleTarget::PrevTiled => "prev tiled",
        })
    }
}

/// Target of `changegroupactive`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupTarget {
    Backward,
    Forward,
    /// 1-based index within the group
    Index(u32),
}

impl fmt::Display for GroupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupTarget::Backward => f.write_str("b"),
            GroupTarget::Forward => f.write_str("f"),
            GroupTarget::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Target of `movewindow`: a neighbour in a direction or a monitor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveWindowTarget {
    Direction(Direction),
    Monitor(String),
}

impl fmt::Display for MoveWindowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveWindowTarget::Direction(direction) => write!(f, "{}", direction),
            MoveWindowTarget::Monitor(monitor) => write!(f, "mon:{}", monitor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZHeight {
    Top,
    Bottom,
}

impl fmt::Display for ZHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ZHeight::Top => "top",
            ZHeight::Bottom => "bottom",
        })
    }
}

/// Size or offset for the resize and move dispatchers
///
/// Values are kept as text so both pixels (`-10`) and percentages (`10%`)
/// can be expressed. Renders as `x y`, or `exact x y` when exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResizeParams {
    pub x: String,
    pub y: String,
    pub exact: bool,
}

impl ResizeParams {
    /// Relative to the current size or position
    pub fn relative(x: impl fmt::Display, y: impl fmt::Display) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            exact: false,
        }
    }

    /// Absolute size or position
    pub fn exact(x: impl fmt::Display, y: impl fmt::Display) -> Self {
        Self {
            exact: true,
            ..Self::relative(x, y)
        }
    }
}

impl fmt::Display for ResizeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exact {
            f.write_str("exact ")?;
        }
        write!(f, "{} {}", self.x, self.y)
    }
}

// =============================================================================
// Dispatchers
// =============================================================================

/// A Hyprland dispatcher invocation
///
/// Window and workspace selectors are passed through as Hyprland syntax
/// (`address:0x...`, `class:^(firefox)$`, `name:web`, `+1`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Run a shell command, optionally with window rules applied to it
    Exec { command: String, rules: Vec<String> },
    /// Run a shell command without rule support
    Execr { command: String },
    /// Close (not kill) the active window
    KillActive,
    CloseWindow { window: String },
    Workspace { workspace: String },
    MoveToWorkspace { workspace: String, window: Option<String> },
    /// Like `MoveToWorkspace` without following the window
    MoveToWorkspaceSilent { workspace: String, window: Option<String> },
    ToggleFloating { window: Option<String> },
    Fullscreen { mode: FullscreenMode },
    /// Toggle the internal fullscreen state without changing geometry
    FakeFullscreen,
    Dpms { status: Status, monitor: Option<String> },
    /// Show a floating window on every workspace
    Pin { window: Option<String> },
    MoveFocus { direction: Direction },
    MoveWindow { target: MoveWindowTarget },
    SwapWindow { direction: Direction },
    CenterWindow { respect_reserved: bool },
    ResizeActive { params: ResizeParams },
    MoveActive { params: ResizeParams },
    ResizeWindowPixel { params: ResizeParams, window: String },
    MoveWindowPixel { params: ResizeParams, window: String },
    CycleNext { target: Option<CycleTarget> },
    SwapNext { prev: bool },
    FocusWindow { window: String },
    FocusMonitor { monitor: String },
    SplitRatio { ratio: f64 },
    ToggleOpaque,
    MoveCursorToCorner { corner: Corner },
    MoveCursor { x: i32, y: i32 },
    RenameWorkspace { id: i32, name: String },
    /// Exit the compositor without confirmation
    Exit,
    ForceRendererReload,
    MoveCurrentWorkspaceToMonitor { monitor: String },
    MoveWorkspaceToMonitor { workspace: String, monitor: String },
    SwapActiveWorkspaces { first: String, second: String },
    /// Superseded by `AlterZOrder`
    BringActiveTop,
    AlterZOrder { height: ZHeight, window: Option<String> },
    ToggleSpecialWorkspace { name: Option<String> },
    FocusUrgentOrLast,
    ToggleGroup,
    ChangeGroupActive { target: GroupTarget },
    FocusCurrentOrLast,
    LockGroups { mode: LockMode },
    LockActiveGroup { mode: LockMode },
    MoveIntoGroup { direction: Direction },
    MoveOutOfGroup,
    MoveWindowOrGroup { direction: Direction },
    DenyWindowFromGroup { status: Status },
    SetIgnoreGroupLock { status: Status },
    /// Trigger a global shortcut through the GlobalShortcuts portal
    Global { name: String },
    /// Switch keybind submap; `reset` returns to the default one
    Submap { name: String },
    /// Any dispatcher by name
    Custom { name: String, arg: Option<String> },
}

impl Dispatch {
    /// The dispatcher name Hyprland knows
    pub fn name(&self) -> &str {
        match self {
            Dispatch::Exec { .. } => "exec",
            Dispatch::Execr { .. } => "execr",
            Dispatch::KillActive => "killactive",
            Dispatch::CloseWindow { .. } => "closewindow",
            Dispatch::Workspace { .. } => "workspace",
            Dispatch::MoveToWorkspace { .. } => "movetoworkspace",
            Dispatch::MoveToWorkspaceSilent { .. } => "movetoworkspacesilent",
            Dispatch::ToggleFloating { .. } => "togglefloating",
            Dispatch::Fullscreen { .. } => "fullscreen",
            Dispatch::FakeFullscreen => "fakefullscreen",
            Dispatch::Dpms { .. } => "dpms",
            Dispatch::Pin { .. } => "pin",
            Dispatch::MoveFocus { .. } => "movefocus",
            Dispatch::MoveWindow { .. } => "movewindow",
            Dispatch::SwapWindow { .. } => "swapwindow",
            Dispatch::CenterWindow { .. } => "centerwindow",
            Dispatch::ResizeActive { .. } => "resizeactive",
            Dispatch::MoveActive { .. } => "moveactive",
            Dispatch::ResizeWindowPixel { .. } => "resizewindowpixel",
            Dispatch::MoveWindowPixel { .. } => "movewindowpixel",
            Dispatch::CycleNext { .. } => "cyclenext",
            Dispatch::SwapNext { .. } => "swapnext",
            Dispatch::FocusWindow { .. } => "focuswindow",
            Dispatch::FocusMonitor { .. } => "focusmonitor",
            Dispatch::SplitRatio { .. } => "splitratio",
            Dispatch::ToggleOpaque => "toggleopaque",
            Dispatch::MoveCursorToCorner { .. } => "movecursortocorner",
            Dispatch::MoveCursor { .. } => "movecursor",
            Dispatch::RenameWorkspace { .. } => "renameworkspace",
            Dispatch::Exit => "exit",
            Dispatch::ForceRendererReload => "forcerendererreload",
            Dispatch::MoveCurrentWorkspaceToMonitor { .. } => "movecurrentworkspacetomonitor",
            Dispatch::MoveWorkspaceToMonitor { .. } => "moveworkspacetomonitor",
            Dispatch::SwapActiveWorkspaces { .. } => "swapactiveworkspaces",
            Dispatch::BringActiveTop => "bringactivetop",
            Dispatch::AlterZOrder { .. } => "alterzorder",
            Dispatch::ToggleSpecialWorkspace { .. } => "togglespecialworkspace",
            Dispatch::FocusUrgentOrLast => "focusurgentorlast",
            Dispatch::ToggleGroup => "togglegroup",
            Dispatch::ChangeGroupActive { .. } => "changegroupactive",
            Dispatch::FocusCurrentOrLast => "focuscurrentorlast",
            Dispatch::LockGroups { .. } => "lockgroups",
            Dispatch::LockActiveGroup { .. } => "lockactivegroup",
            Dispatch::MoveIntoGroup { .. } => "moveintogroup",
            Dispatch::MoveOutOfGroup => "moveoutofgroup",
            Dispatch::MoveWindowOrGroup { .. } => "movewindoworgroup",
            Dispatch::DenyWindowFromGroup { .. } => "denywindowfromgroup",
            Dispatch::SetIgnoreGroupLock { .. } => "setignoregrouplock",
            Dispatch::Global { .. } => "global",
            Dispatch::Submap { .. } => "submap",
            Dispatch::Custom { name, .. } => name.as_str(),
        }
    }

    /// The argument text, if the dispatcher takes one in this form
    pub fn arg(&self) -> Option<String> {
        let arg = match self {
            Dispatch::KillActive
            | Dispatch::FakeFullscreen
            | Dispatch::ToggleOpaque
            | Dispatch::Exit
            | Dispatch::ForceRendererReload
            | Dispatch::BringActiveTop
            | Dispatch::FocusUrgentOrLast
            | Dispatch::ToggleGroup
            | Dispatch::FocusCurrentOrLast
            | Dispatch::MoveOutOfGroup => return None,

            Dispatch::Exec { command, rules } if rules.is_empty() => command.clone(),
            Dispatch::Exec { command, rules } => format!("[{}] {}", rules.join(";"), command),
            Dispatch::Execr { command } => command.clone(),
            Dispatch::CloseWindow { window }
            | Dispatch::FocusWindow { window } => window.clone(),
            Dispatch::Workspace { workspace } => workspace.clone(),
            Dispatch::MoveToWorkspace { workspace, window }
            | Dispatch::MoveToWorkspaceSilent { workspace, window } => match window {
                Some(window) => format!("{},{}", workspace, window),
                None => workspace.clone(),
            },
            Dispatch::ToggleFloating { window } | Dispatch::Pin { window } => {
                return window.clone();
            }
            Dispatch::Fullscreen { mode } => mode.to_string(),
            Dispatch::Dpms { status, monitor } => match monitor {
                Some(monitor) => format!("{} {}", status, monitor),
                None => status.to_string(),
            },
            Dispatch::MoveFocus { direction }
            | Dispatch::SwapWindow { direction }
            | Dispatch::MoveIntoGroup { direction }
            | Dispatch::MoveWindowOrGroup { direction } => direction.to_string(),
            Dispatch::MoveWindow { target } => target.to_string(),
            Dispatch::CenterWindow { respect_reserved } => {
                String::from(if *respect_reserved { "1" } else { "0" })
            }
            Dispatch::ResizeActive { params } | Dispatch::MoveActive { params } => {
                params.to_string()
            }
            Dispatch::ResizeWindowPixel { params, window }
            | Dispatch::MoveWindowPixel { params, window } => format!("{},{}", params, window),
            Dispatch::CycleNext { target } => return target.map(|t| t.to_string()),
            Dispatch::SwapNext { prev } => return prev.then(|| "prev".to_string()),
            Dispatch::FocusMonitor { monitor }
            | Dispatch::MoveCurrentWorkspaceToMonitor { monitor } => monitor.clone(),
            Dispatch::SplitRatio { ratio } => ratio.to_string(),
            Dispatch::MoveCursorToCorner { corner } => corner.to_string(),
            Dispatch::MoveCursor { x, y } => format!("{} {}", x, y),
            Dispatch::RenameWorkspace { id, name } => format!("{} {}", id, name),
            Dispatch::MoveWorkspaceToMonitor { workspace, monitor } => {
                format!("{} {}", workspace, monitor)
            }
            Dispatch::SwapActiveWorkspaces { first, second } => format!("{} {}", first, second),
            Dispatch::AlterZOrder { height, window } => match window {
                Some(window) => format!("{},{}", height, window),
                None => height.to_string(),
            },
            Dispatch::ToggleSpecialWorkspace { name } => return name.clone(),
            Dispatch::ChangeGroupActive { target } => target.to_string(),
            Dispatch::LockGroups { mode } | Dispatch::LockActiveGroup { mode } => mode.to_string(),
            Dispatch::DenyWindowFromGroup { status }
            | Dispatch::SetIgnoreGroupLock { status } => status.to_string(),
            Dispatch::Global { name } | Dispatch::Submap { name } => name.clone(),
            Dispatch::Custom { arg, .. } => return arg.clone(),
        };
        Some(arg)
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispatch {}", self.name())?;
        match self.arg() {
            Some(arg) if !arg.is_empty() => write!(f, " {}", arg),
            _ => Ok(()),
        }
    }
}

impl CommandChannel {
    /// Run a dispatcher, requiring Hyprland to answer `ok`
    ///
    /// # Errors
    ///
    /// Any error from [`send_command`](Self::send_command); an unknown
    /// dispatcher or bad argument comes back as `HyprError::CommandRejected`.
    pub async fn dispatch(&self, dispatch: &Dispatch) -> Result<(), HyprError> {
        self.send_command(&dispatch.to_string(), CommandOptions::default())
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeHyprland;

    fn render(dispatch: Dispatch) -> String {
        dispatch.to_string()
    }

    #[test]
    fn test_dispatcher_without_argument_has_no_trailing_space() {
        assert_eq!(render(Dispatch::KillActive), "dispatch killactive");
        assert_eq!(render(Dispatch::Exit), "dispatch exit");
        assert_eq!(render(Dispatch::ToggleFloating { window: None }), "dispatch togglefloating");
        assert_eq!(render(Dispatch::CycleNext { target: None }), "dispatch cyclenext");
    }

    #[test]
    fn test_exec_with_and_without_rules() {
        assert_eq!(
            render(Dispatch::Exec {
                command: "kitty".to_string(),
                rules: vec![],
            }),
            "dispatch exec kitty"
        );
        assert_eq!(
            render(Dispatch::Exec {
                command: "kitty".to_string(),
                rules: vec!["float".to_string(), "size 800 600".to_string()],
            }),
            "dispatch exec [float;size 800 600] kitty"
        );
    }

    #[test]
    fn test_workspace_moves() {
        assert_eq!(
            render(Dispatch::Workspace {
                workspace: "2".to_string()
            }),
            "dispatch workspace 2"
        );
        assert_eq!(
            render(Dispatch::MoveToWorkspace {
                workspace: "3".to_string(),
                window: Some("address:0x5632a0e4d1a0".to_string()),
            }),
            "dispatch movetoworkspace 3,address:0x5632a0e4d1a0"
        );
        assert_eq!(
            render(Dispatch::MoveToWorkspaceSilent {
                workspace: "special".to_string(),
                window: None,
            }),
            "dispatch movetoworkspacesilent special"
        );
        assert_eq!(
            render(Dispatch::MoveWorkspaceToMonitor {
                workspace: "2".to_string(),
                monitor: "DP-1".to_string(),
            }),
            "dispatch moveworkspacetomonitor 2 DP-1"
        );
    }

    #[test]
    fn test_directions_render_first_letter() {
        assert_eq!(
            render(Dispatch::MoveFocus {
                direction: Direction::Left
            }),
            "dispatch movefocus l"
        );
        assert_eq!(
            render(Dispatch::SwapWindow {
                direction: Direction::Down
            }),
            "dispatch swapwindow d"
        );
        assert_eq!(
            render(Dispatch::MoveWindow {
                target: MoveWindowTarget::Direction(Direction::Up)
            }),
            "dispatch movewindow u"
        );
        assert_eq!(
            render(Dispatch::MoveWindow {
                target: MoveWindowTarget::Monitor("HDMI-A-1".to_string())
            }),
            "dispatch movewindow mon:HDMI-A-1"
        );
    }

    #[test]
    fn test_resize_params() {
        assert_eq!(
            render(Dispatch::ResizeActive {
                params: ResizeParams::relative(10, -10)
            }),
            "dispatch resizeactive 10 -10"
        );
        assert_eq!(
            render(Dispatch::MoveActive {
                params: ResizeParams::exact("50%", "50%")
            }),
            "dispatch moveactive exact 50% 50%"
        );
        assert_eq!(
            render(Dispatch::ResizeWindowPixel {
                params: ResizeParams::exact(800, 600),
                window: "class:kitty".to_string(),
            }),
            "dispatch resizewindowpixel exact 800 600,class:kitty"
        );
    }

    #[test]
    fn test_numeric_arguments() {
        assert_eq!(
            render(Dispatch::Fullscreen {
                mode: FullscreenMode::Maximize
            }),
            "dispatch fullscreen 1"
        );
        assert_eq!(
            render(Dispatch::CenterWindow {
                respect_reserved: false
            }),
            "dispatch centerwindow 0"
        );
        assert_eq!(
            render(Dispatch::MoveCursorToCorner {
                corner: Corner::TopLeft
            }),
            "dispatch movecursortocorner 3"
        );
        assert_eq!(
            render(Dispatch::SplitRatio { ratio: -0.3 }),
            "dispatch splitratio -0.3"
        );
        assert_eq!(
            render(Dispatch::MoveCursor { x: 100, y: 200 }),
            "dispatch movecursor 100 200"
        );
        assert_eq!(
            render(Dispatch::RenameWorkspace {
                id: 4,
                name: "web".to_string()
            }),
            "dispatch renameworkspace 4 web"
        );
    }

    #[test]
    fn test_groups() {
        assert_eq!(
            render(Dispatch::ChangeGroupActive {
                target: GroupTarget::Forward
            }),
            "dispatch changegroupactive f"
        );
        assert_eq!(
            render(Dispatch::ChangeGroupActive {
                target: GroupTarget::Index(2)
            }),
            "dispatch changegroupactive 2"
        );
        assert_eq!(
            render(Dispatch::LockActiveGroup {
                mode: LockMode::Toggle
            }),
            "dispatch lockactivegroup toggle"
        );
        assert_eq!(
            render(Dispatch::SetIgnoreGroupLock { status: Status::On }),
            "dispatch setignoregrouplock on"
        );
    }

    #[test]
    fn test_optional_arguments() {
        assert_eq!(
            render(Dispatch::Dpms {
                status: Status::Off,
                monitor: Some("DP-1".to_string()),
            }),
            "dispatch dpms off DP-1"
        );
        assert_eq!(
            render(Dispatch::AlterZOrder {
                height: ZHeight::Top,
                window: None
            }),
            "dispatch alterzorder top"
        );
        assert_eq!(
            render(Dispatch::SwapNext { prev: true }),
            "dispatch swapnext prev"
        );
        assert_eq!(
            render(Dispatch::CycleNext {
                target: Some(CycleTarget::PrevTiled)
            }),
            "dispatch cyclenext prev tiled"
        );
    }

    #[test]
    fn test_custom_dispatcher() {
        assert_eq!(
            render(Dispatch::Custom {
                name: "layoutmsg".to_string(),
                arg: Some("orientationleft".to_string()),
            }),
            "dispatch layoutmsg orientationleft"
        );
        assert_eq!(
            render(Dispatch::Custom {
                name: "pass".to_string(),
                arg: Some(String::new()),
            }),
            "dispatch pass"
        );
    }

    #[tokio::test]
    async fn test_channel_dispatch_sends_command_text() {
        let hypr = FakeHyprland::new();
        let server = hypr.serve_commands(vec!["ok", "Invalid dispatcher"]);
        let channel = CommandChannel::new(hypr.config());

        channel
            .dispatch(&Dispatch::Submap {
                name: "reset".to_string(),
            })
            .await
            .unwrap();

        let err = channel
            .dispatch(&Dispatch::Custom {
                name: "nope".to_string(),
                arg: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.rejection(), Some("Invalid dispatcher"));

        assert_eq!(
            server.await.unwrap(),
            vec!["/dispatch submap reset", "/dispatch nope"]
        );
    }
}
