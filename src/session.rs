use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::clock::WorldClock;
use crate::entity::EntityStore;
use crate::environment::EnvironmentState;
use crate::player::PlayerState;
use crate::value::Value;

/// Which surface the hosting shell currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Menu {
    Main,
    Game,
}

/// Host-configured runtime settings exposed to scripts via `getsetting`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub xres: u32,
    pub yres: u32,
    pub depth: u32,
    pub debug: bool,
    pub view_range: f64,
    pub gore: bool,
    pub command_line: String,
    pub version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            xres: 1280,
            yres: 720,
            depth: 32,
            debug: false,
            view_range: 2000.0,
            gore: false,
            command_line: String::new(),
            version: "0.0.1".to_string(),
        }
    }
}

/// One running game world: the four state stores plus session-local
/// bookkeeping (menu flag, script variables, settings, ready gate).
///
/// Cloning shares everything; separate `Session::new` calls produce
/// fully isolated worlds, so tests and multiple shells can run in
/// parallel.
#[derive(Debug)]
pub struct Session {
    entities: EntityStore,
    player: PlayerState,
    clock: WorldClock,
    environment: EnvironmentState,
    menu: Arc<RwLock<Menu>>,
    variables: Arc<RwLock<BTreeMap<String, Value>>>,
    settings: Arc<RwLock<Settings>>,
    ready: Arc<AtomicBool>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            entities: EntityStore::new(),
            player: PlayerState::new(),
            clock: WorldClock::new(),
            environment: EnvironmentState::new(),
            menu: Arc::new(RwLock::new(Menu::Main)),
            variables: Arc::new(RwLock::new(BTreeMap::new())),
            settings: Arc::new(RwLock::new(Settings::default())),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            entities: self.entities.clone(),
            player: self.player.clone(),
            clock: self.clock.clone(),
            environment: self.environment.clone(),
            menu: Arc::clone(&self.menu),
            variables: Arc::clone(&self.variables),
            settings: Arc::clone(&self.settings),
            ready: Arc::clone(&self.ready),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    pub fn environment(&self) -> &EnvironmentState {
        &self.environment
    }

    pub fn menu(&self) -> Menu {
        *self.menu.read()
    }

    /// The single-island start flow: main menu hands over to the game.
    pub fn enter_game(&self) {
        *self.menu.write() = Menu::Game;
    }

    /// The save-options/quit flow: back to the main menu.
    pub fn return_to_main(&self) {
        *self.menu.write() = Menu::Main;
    }

    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn update_settings(&self, updater: impl FnOnce(&mut Settings)) {
        updater(&mut self.settings.write());
    }

    pub fn set_variable(&self, name: &str, value: Value) {
        self.variables.write().insert(name.to_string(), value);
    }

    pub fn variable(&self, name: &str) -> Option<Value> {
        self.variables.read().get(name).cloned()
    }

    /// Drops a script variable; unknown names are ignored.
    pub fn free_variable(&self, name: &str) {
        self.variables.write().remove(name);
    }

    pub fn variable_count(&self) -> usize {
        self.variables.read().len()
    }

    /// Latches the one-shot world-ready gate once asset loading
    /// finishes. The gate never un-latches.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_isolated() {
        let a = Session::new();
        let b = Session::new();
        a.player().consume(5.0, 0.0, 0.0, 0.0);
        assert_eq!(a.player().vitals().energy, 5.0);
        assert_eq!(b.player().vitals().energy, 0.0);
    }

    #[test]
    fn clones_share_state() {
        let session = Session::new();
        let shared = session.clone();
        session.set_variable("found_raft", Value::Int(1));
        assert_eq!(shared.variable("found_raft"), Some(Value::Int(1)));
        shared.free_variable("found_raft");
        assert_eq!(session.variable("found_raft"), None);
    }

    #[test]
    fn menu_transitions_between_main_and_game() {
        let session = Session::new();
        assert_eq!(session.menu(), Menu::Main);
        session.enter_game();
        assert_eq!(session.menu(), Menu::Game);
        session.return_to_main();
        assert_eq!(session.menu(), Menu::Main);
    }

    #[test]
    fn ready_gate_latches_once() {
        let session = Session::new();
        assert!(!session.is_ready());
        session.mark_ready();
        assert!(session.is_ready());
        session.mark_ready();
        assert!(session.is_ready());
    }
}
