//! Interfaces to the external collaborators the core drives.
//!
//! The core never owns render or audio objects; it forwards opaque
//! handles and primitive values through these traits. Null
//! implementations back headless runs and tests.

use crate::entity::MeshHandle;

/// Rendering side effects triggered by script commands.
pub trait RenderSurface: Send + Sync {
    /// Sets the material opacity of an entity's renderable.
    fn set_material_alpha(&self, mesh: MeshHandle, alpha: f64);

    /// Sets the opacity of the ocean plane material.
    fn set_ocean_alpha(&self, alpha: f64);

    /// Registers a renderable with the shadow generator.
    fn attach_shadow_caster(&self, mesh: MeshHandle);

    /// Enables or disables a renderable entirely.
    fn set_mesh_enabled(&self, mesh: MeshHandle, enabled: bool);

    /// Sets a renderable's visibility factor.
    fn set_mesh_visibility(&self, mesh: MeshHandle, visibility: f64);
}

/// Audio playback driven by `music`/`stopmusic` and consumption cues.
pub trait AudioSurface: Send + Sync {
    /// Loads and starts the given music track.
    fn load_track(&self, path: &str, volume: f64);

    /// Adjusts the music volume.
    fn set_volume(&self, volume: f64);

    /// Pauses the current track and rewinds it.
    fn pause(&self);

    /// Plays a short one-shot effect (eating, drinking).
    fn play_effect(&self, name: &str);
}

/// 2D overlay notifications.
pub trait HudSurface: Send + Sync {
    /// Announces a found item with a pickup effect.
    fn item_found(&self, item_type: i64, amount: i64);
}

/// Signals consumed by the hosting shell.
pub trait HostSignal: Send + Sync {
    /// Requests session termination. The shell owns the menu flow that
    /// follows.
    fn quit(&self);
}

/// Renderer that swallows every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRender;

impl RenderSurface for NullRender {
    fn set_material_alpha(&self, _mesh: MeshHandle, _alpha: f64) {}
    fn set_ocean_alpha(&self, _alpha: f64) {}
    fn attach_shadow_caster(&self, _mesh: MeshHandle) {}
    fn set_mesh_enabled(&self, _mesh: MeshHandle, _enabled: bool) {}
    fn set_mesh_visibility(&self, _mesh: MeshHandle, _visibility: f64) {}
}

/// Audio sink that swallows every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSurface for NullAudio {
    fn load_track(&self, _path: &str, _volume: f64) {}
    fn set_volume(&self, _volume: f64) {}
    fn pause(&self) {}
    fn play_effect(&self, _name: &str) {}
}

/// Overlay that swallows every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHud;

impl HudSurface for NullHud {
    fn item_found(&self, _item_type: i64, _amount: i64) {}
}

/// Host that ignores termination requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl HostSignal for NullHost {
    fn quit(&self) {}
}
