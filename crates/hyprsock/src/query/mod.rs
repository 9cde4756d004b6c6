//! Typed queries over the command channel
//!
//! Each query sends the `hyprctl` command name with the JSON flag, skips the
//! `ok` check (the reply is the data itself) and decodes the JSON into the
//! records in [`types`].

pub mod types;

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::command::{CommandChannel, CommandOptions};
use crate::HyprError;
use types::{
    Animation, AnimationConfig, Bezier, Bind, Client, CursorPos, Instance, Layers, Monitor,
    OptionValue, Version, Workspace,
};

impl CommandChannel {
    /// Send `command` with the JSON flag and decode the reply as `T`
    ///
    /// # Errors
    ///
    /// Returns any error from [`send_command`](Self::send_command), or
    /// `HyprError::DeserializeFailed` if the reply is not valid JSON for `T`
    /// (Hyprland answers unknown queries with plain text).
    pub async fn query<T: DeserializeOwned>(&self, command: &str) -> Result<T, HyprError> {
        let reply = self.send_command(command, CommandOptions::json()).await?;
        trace!(command, "Decoding Hyprland query reply");
        serde_json::from_str(&reply).map_err(HyprError::DeserializeFailed)
    }

    /// Hyprland build information
    pub async fn get_version(&self) -> Result<Version, HyprError> {
        self.query("version").await
    }

    /// Active outputs
    pub async fn get_monitors(&self) -> Result<Vec<Monitor>, HyprError> {
        self.query("monitors").await
    }

    pub async fn get_workspaces(&self) -> Result<Vec<Workspace>, HyprError> {
        self.query("workspaces").await
    }

    pub async fn get_active_workspace(&self) -> Result<Workspace, HyprError> {
        self.query("activeworkspace").await
    }

    /// All windows
    pub async fn get_clients(&self) -> Result<Vec<Client>, HyprError> {
        self.query("clients").await
    }

    /// The focused window
    ///
    /// Returns `Ok(None)` when nothing is focused; Hyprland answers `{}`
    /// in that case.
    pub async fn get_active_window(&self) -> Result<Option<Client>, HyprError> {
        let client: Client = self.query("activewindow").await?;
        Ok((!client.address.is_empty()).then_some(client))
    }

    pub async fn get_binds(&self) -> Result<Vec<Bind>, HyprError> {
        self.query("binds").await
    }

    /// Layer surfaces per monitor and level
    pub async fn get_layers(&self) -> Result<Layers, HyprError> {
        self.query("layers").await
    }

    /// The current random splash text
    ///
    /// Sent without the JSON flag; the reply is returned verbatim.
    pub async fn get_splash(&self) -> Result<String, HyprError> {
        self.send_command("splash", CommandOptions::raw()).await
    }

    /// Current value of one config option, e.g. `general:border_size`
    pub async fn get_option(&self, name: &str) -> Result<OptionValue, HyprError> {
        self.query(&format!("getoption {}", name)).await
    }

    /// Cursor position in global layout coordinates
    pub async fn get_cursor_pos(&self) -> Result<CursorPos, HyprError> {
        self.query("cursorpos").await
    }

    pub async fn get_animations(&self) -> Result<AnimationConfig, HyprError> {
        let pair: (Vec<Animation>, Vec<Bezier>) = self.query("animations").await?;
        Ok(pair.into())
    }

    /// Every running Hyprland instance, not only the configured one
    pub async fn get_instances(&self) -> Result<Vec<Instance>, HyprError> {
        self.query("instances").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeHyprland;

    #[tokio::test]
    async fn test_workspaces_query() {
        let hypr = FakeHyprland::new();
        let server = hypr.serve_commands(vec![
            r#"[{"id":1,"name":"1","monitor":"DP-1","windows":2,"hasfullscreen":false,"lastwindow":"0xa","lastwindowtitle":"kitty"},
               {"id":2,"name":"web","monitor":"DP-1","windows":1,"hasfullscreen":true,"lastwindow":"0xb","lastwindowtitle":"Firefox"}]"#,
        ]);

        let channel = CommandChannel::new(hypr.config());
        let workspaces = channel.get_workspaces().await.unwrap();

        assert_eq!(workspaces.len(), 2);
        assert_eq!(workspaces[1].name, "web");
        assert!(workspaces[1].has_fullscreen);
        assert_eq!(server.await.unwrap(), vec!["j/workspaces"]);
    }

    #[tokio::test]
    async fn test_active_window_none_when_unfocused() {
        let hypr = FakeHyprland::new();
        let server = hypr.serve_commands(vec![
            "{}",
            r#"{"address":"0x5632a0e4d1a0","class":"kitty","title":"~"}"#,
        ]);

        let channel = CommandChannel::new(hypr.config());
        assert_eq!(channel.get_active_window().await.unwrap(), None);

        let window = channel.get_active_window().await.unwrap().unwrap();
        assert_eq!(window.class, "kitty");

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_animations_pair_is_reshaped() {
        let hypr = FakeHyprland::new();
        let server = hypr.serve_commands(vec![
            r#"[[{"name":"windows","overridden":true,"bezier":"ease","enabled":true,"speed":4.0,"style":"slide"}],
                [{"name":"ease"},{"name":"linear"}]]"#,
        ]);

        let channel = CommandChannel::new(hypr.config());
        let config = channel.get_animations().await.unwrap();

        assert_eq!(config.animations.len(), 1);
        assert_eq!(config.animations[0].style, "slide");
        assert_eq!(
            config.beziers.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
            vec!["ease", "linear"]
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_get_option_and_splash_requests() {
        let hypr = FakeHyprland::new();
        let server = hypr.serve_commands(vec![
            r#"{"option":"general:border_size","int":2,"float":0.0,"str":"","data":"","set":true}"#,
            "Hyprland is a dynamic tiling compositor",
        ]);

        let channel = CommandChannel::new(hypr.config());
        let option = channel.get_option("general:border_size").await.unwrap();
        assert_eq!(option.int, 2);
        assert!(option.explicitly_set);

        let splash = channel.get_splash().await.unwrap();
        assert_eq!(splash, "Hyprland is a dynamic tiling compositor");

        assert_eq!(
            server.await.unwrap(),
            vec!["j/getoption general:border_size", "/splash"]
        );
    }

    #[tokio::test]
    async fn test_plain_text_reply_is_deserialize_error() {
        let hypr = FakeHyprland::new();
        let server = hypr.serve_commands(vec!["unknown request"]);

        let channel = CommandChannel::new(hypr.config());
        let err = channel.get_cursor_pos().await.unwrap_err();

        assert!(
            matches!(err, HyprError::DeserializeFailed(_)),
            "Expected DeserializeFailed, got: {:?}",
            err
        );
        assert!(!err.is_connection_error());
        server.await.unwrap();
    }
}
