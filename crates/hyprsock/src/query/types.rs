//! Typed records for Hyprland's JSON query replies
//!
//! Records serialize with a stable camelCase schema. Where Hyprland's own
//! field name differs (`hasfullscreen`, `non_consuming`, `wl_socket`, ...)
//! the wire name is accepted as an alias when deserializing.
//!
//! Every record is `#[serde(default)]`: fields a given Hyprland build does
//! not send are left at their default instead of failing the whole reply.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Build information from `version`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Version {
    pub branch: String,
    pub commit: String,
    pub dirty: bool,
    #[serde(alias = "commit_message")]
    pub commit_message: String,
    pub tag: String,
    pub flags: Vec<String>,
}

/// Id and name pair used wherever a record points at a workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceRef {
    pub id: i64,
    pub name: String,
}

/// An output from `monitors`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Monitor {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub make: String,
    pub model: String,
    pub serial: String,
    pub width: i64,
    pub height: i64,
    pub refresh_rate: f64,
    pub x: i64,
    pub y: i64,
    pub active_workspace: WorkspaceRef,
    pub special_workspace: WorkspaceRef,
    /// Reserved area: left, top, right, bottom
    pub reserved: [i64; 4],
    pub scale: f64,
    pub transform: i64,
    pub focused: bool,
    pub dpms_status: bool,
    pub vrr: bool,
}

/// A workspace from `workspaces` or `activeworkspace`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub monitor: String,
    pub windows: u32,
    #[serde(alias = "hasfullscreen")]
    pub has_fullscreen: bool,
    /// Address of the last focused window
    #[serde(alias = "lastwindow")]
    pub last_window: String,
    #[serde(alias = "lastwindowtitle")]
    pub last_window_title: String,
}

/// A window from `clients` or `activewindow`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Client {
    pub address: String,
    pub mapped: bool,
    pub hidden: bool,
    pub at: [i64; 2],
    pub size: [i64; 2],
    pub workspace: WorkspaceRef,
    pub floating: bool,
    /// Monitor id, `-1` while unmapped
    pub monitor: i64,
    pub class: String,
    pub title: String,
    pub initial_class: String,
    pub initial_title: String,
    pub pid: i64,
    pub xwayland: bool,
    pub pinned: bool,
    pub fullscreen: bool,
    pub fullscreen_mode: i64,
    pub fake_fullscreen: bool,
    /// Addresses of the windows in this window's group
    pub grouped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swallowing: Option<String>,
}

/// A registered keybind from `binds`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bind {
    pub locked: bool,
    pub mouse: bool,
    pub release: bool,
    pub repeat: bool,
    #[serde(alias = "non_consuming")]
    pub non_consuming: bool,
    pub modmask: u32,
    pub submap: String,
    pub key: String,
    pub keycode: i64,
    pub dispatcher: String,
    pub arg: String,
}

/// One layer surface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSurface {
    pub address: String,
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
    pub namespace: String,
}

/// Layer surfaces of one monitor, keyed by level (`"0"` background to `"3"` overlay)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorLayers {
    pub levels: BTreeMap<String, Vec<LayerSurface>>,
}

/// Reply of `layers`, keyed by monitor name
pub type Layers = BTreeMap<String, MonitorLayers>;

/// Value of a config option from `getoption`
///
/// Hyprland fills the slot matching the option's type and leaves the others
/// at a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionValue {
    pub option: String,
    pub int: i64,
    pub float: f64,
    #[serde(rename = "str")]
    pub string: String,
    pub data: String,
    #[serde(rename = "set")]
    pub explicitly_set: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorPos {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    pub name: String,
    pub overridden: bool,
    pub bezier: String,
    pub enabled: bool,
    pub speed: f64,
    pub style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bezier {
    pub name: String,
}

/// Reply of `animations`
///
/// Hyprland sends `[animations, beziers]`; this names the two halves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub animations: Vec<Animation>,
    pub beziers: Vec<Bezier>,
}

impl From<(Vec<Animation>, Vec<Bezier>)> for AnimationConfig {
    fn from((animations, beziers): (Vec<Animation>, Vec<Bezier>)) -> Self {
        Self {
            animations,
            beziers,
        }
    }
}

/// A running compositor from `instances`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Instance {
    /// Instance signature, usable with `SocketConfig::with_signature`
    pub instance: String,
    pub time: i64,
    pub pid: i64,
    #[serde(alias = "wl_socket")]
    pub wl_socket: String,
}
