//! Core modules for the Stranded II fan remake, rewritten in Rust.
//!
//! The crate owns the world model (entities, player, clock, climate)
//! and the script command interpreter that drives it.  Rendering, audio
//! playback and the hosting shell stay outside: the core reaches them
//! through the narrow traits in [`surface`], which keeps the code
//! testable and easy to embed in headless tools.

pub mod clock;
pub mod command;
pub mod entity;
pub mod environment;
pub mod error;
pub mod map;
pub mod player;
pub mod scripting;
pub mod session;
pub mod surface;
pub mod value;

pub use clock::{ClockDriver, WorldClock, MINUTES_PER_DAY};
pub use command::{CommandError, CommandSpec, Dispatcher};
pub use entity::{Entity, EntityClass, EntityRef, EntityStore, MeshHandle, StateFlag};
pub use environment::{Climate, EnvironmentState, Weather};
pub use error::WorldError;
pub use map::{EntityDef, MapDefinition};
pub use player::PlayerState;
pub use scripting::ScriptHost;
pub use session::{Menu, Session, Settings};
pub use surface::{
    AudioSurface, HostSignal, HudSurface, NullAudio, NullHost, NullHud, NullRender, RenderSurface,
};
pub use value::Value;
