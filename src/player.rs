use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Player vitals. Deltas are applied without clamping; scripts rely on
/// the values going negative or arbitrarily high.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vitals {
    pub energy: f64,
    pub hunger: f64,
    pub thirst: f64,
    pub exhaustion: f64,
}

/// One stack of an item type in the player inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_type: i64,
    pub amount: i64,
}

/// Learnable skill with a display description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub description: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpParams {
    pub time: f64,
    pub factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirSupply {
    pub available: f64,
    pub maximum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlayerData {
    vitals: Vitals,
    items: Vec<InventoryItem>,
    skills: BTreeMap<String, Skill>,
    weapon: i64,
    ammo: i64,
    jump: JumpParams,
    air: AirSupply,
    show_compass: bool,
    sleeping: bool,
    speed: f64,
    max_weight: f64,
    damage: f64,
}

impl Default for PlayerData {
    fn default() -> Self {
        let mut skills = BTreeMap::new();
        for (name, description) in [
            ("digging", "Graben"),
            ("fishing", "Angeln"),
            ("hunting", "Jagen"),
            ("planting", "Anpflanzen"),
            ("lumbering", "Holzfällen"),
        ] {
            skills.insert(
                name.to_string(),
                Skill {
                    description: description.to_string(),
                    value: 0.0,
                },
            );
        }
        Self {
            vitals: Vitals::default(),
            items: Vec::new(),
            skills,
            weapon: -1,
            ammo: -1,
            jump: JumpParams {
                time: 1.7,
                factor: 1.0,
            },
            air: AirSupply {
                available: 30.0,
                maximum: 30.0,
            },
            show_compass: true,
            sleeping: false,
            speed: 1.7,
            max_weight: 25000.0,
            damage: 3.0,
        }
    }
}

/// Shared player state for one session. Cloning shares the state.
#[derive(Debug)]
pub struct PlayerState {
    inner: Arc<RwLock<PlayerData>>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PlayerData::default())),
        }
    }
}

impl Clone for PlayerState {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the deltas to the four vitals, unconditionally.
    pub fn consume(&self, energy: f64, hunger: f64, thirst: f64, exhaustion: f64) {
        let mut guard = self.inner.write();
        guard.vitals.energy += energy;
        guard.vitals.hunger += hunger;
        guard.vitals.thirst += thirst;
        guard.vitals.exhaustion += exhaustion;
    }

    pub fn vitals(&self) -> Vitals {
        self.inner.read().vitals
    }

    /// Adds `amount` of the item type, stacking onto an existing entry.
    pub fn find_item(&self, item_type: i64, amount: i64) {
        let mut guard = self.inner.write();
        if let Some(item) = guard
            .items
            .iter_mut()
            .find(|item| item.item_type == item_type)
        {
            item.amount += amount;
        } else {
            guard.items.push(InventoryItem { item_type, amount });
        }
    }

    pub fn item_amount(&self, item_type: i64) -> i64 {
        self.inner
            .read()
            .items
            .iter()
            .find(|item| item.item_type == item_type)
            .map(|item| item.amount)
            .unwrap_or(0)
    }

    pub fn items(&self) -> Vec<InventoryItem> {
        self.inner.read().items.clone()
    }

    /// Upserts a skill, replacing value and description.
    pub fn set_skill(&self, name: &str, value: f64, description: &str) {
        self.inner.write().skills.insert(
            name.to_string(),
            Skill {
                description: description.to_string(),
                value,
            },
        );
    }

    /// Adds to an existing skill value, or starts the skill at `delta`.
    /// The description is replaced either way.
    pub fn inc_skill(&self, name: &str, delta: f64, description: &str) {
        let current = self.skill(name).map(|skill| skill.value).unwrap_or(0.0);
        self.set_skill(name, current + delta, description);
    }

    /// Removes the skill; missing skills are ignored.
    pub fn free_skill(&self, name: &str) {
        self.inner.write().skills.remove(name);
    }

    pub fn got_skill(&self, name: &str) -> bool {
        self.inner.read().skills.contains_key(name)
    }

    /// Value of the skill, or -1 when the player never learned it.
    pub fn skill_value(&self, name: &str) -> f64 {
        self.skill(name).map(|skill| skill.value).unwrap_or(-1.0)
    }

    /// Replaces the description of an existing skill.
    pub fn rename_skill(&self, name: &str, description: &str) {
        let mut guard = self.inner.write();
        if let Some(skill) = guard.skills.get_mut(name) {
            skill.description = description.to_string();
        }
    }

    pub fn skill(&self, name: &str) -> Option<Skill> {
        self.inner.read().skills.get(name).cloned()
    }

    pub fn skills(&self) -> BTreeMap<String, Skill> {
        self.inner.read().skills.clone()
    }

    pub fn weapon(&self) -> i64 {
        self.inner.read().weapon
    }

    pub fn set_weapon(&self, weapon: i64) {
        self.inner.write().weapon = weapon;
    }

    pub fn ammo(&self) -> i64 {
        self.inner.read().ammo
    }

    pub fn set_ammo(&self, ammo: i64) {
        self.inner.write().ammo = ammo;
    }

    pub fn jump(&self) -> JumpParams {
        self.inner.read().jump
    }

    pub fn set_jump_time(&self, time: f64) {
        self.inner.write().jump.time = time;
    }

    pub fn set_jump_factor(&self, factor: f64) {
        self.inner.write().jump.factor = factor;
    }

    pub fn air(&self) -> AirSupply {
        self.inner.read().air
    }

    pub fn set_air(&self, available: f64) {
        self.inner.write().air.available = available;
    }

    pub fn show_compass(&self) -> bool {
        self.inner.read().show_compass
    }

    pub fn set_show_compass(&self, show: bool) {
        self.inner.write().show_compass = show;
    }

    pub fn sleeping(&self) -> bool {
        self.inner.read().sleeping
    }

    pub fn set_sleeping(&self, sleeping: bool) {
        self.inner.write().sleeping = sleeping;
    }

    pub fn speed(&self) -> f64 {
        self.inner.read().speed
    }

    pub fn set_speed(&self, speed: f64) {
        self.inner.write().speed = speed;
    }

    pub fn max_weight(&self) -> f64 {
        self.inner.read().max_weight
    }

    pub fn set_max_weight(&self, max_weight: f64) {
        self.inner.write().max_weight = max_weight;
    }

    pub fn damage(&self) -> f64 {
        self.inner.read().damage
    }

    pub fn set_damage(&self, damage: f64) {
        self.inner.write().damage = damage;
    }
}
