use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Addressing class of a world entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Object,
    Unit,
    Item,
    Info,
}

impl EntityClass {
    /// Decodes the raw class tag used by scripts.
    pub fn from_raw(raw: i64) -> Result<Self, WorldError> {
        match raw {
            0 => Ok(Self::Object),
            1 => Ok(Self::Unit),
            2 => Ok(Self::Item),
            3 => Ok(Self::Info),
            other => Err(WorldError::UnknownClass(other)),
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            Self::Object => 0,
            Self::Unit => 1,
            Self::Item => 2,
            Self::Info => 3,
        }
    }

    /// Name of the map collection holding entities of this class.
    pub fn collection_name(self) -> &'static str {
        match self {
            Self::Object => "objects",
            Self::Unit => "units",
            Self::Item => "items",
            Self::Info => "infos",
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Unit => "unit",
            Self::Item => "item",
            Self::Info => "info",
        };
        f.write_str(name)
    }
}

/// Status condition applied to an entity.
///
/// Raw values match the original data files, gaps included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateFlag {
    Bleeding,
    Intoxication,
    Pus,
    Fire,
    EternalFire,
    Frostbite,
    Fracture,
    ElectricShock,
    Bloodlust,
    Dizzy,
    Wet,
    Fuddle,
    Healing,
    Invulnerability,
    Tame,
    Action,
    Flare,
    Smoke,
    Light,
    Particles,
    BuildingSite,
    Link,
    SpeedModification,
    AiStick,
}

impl StateFlag {
    pub fn from_raw(raw: i64) -> Result<Self, WorldError> {
        let flag = match raw {
            1 => Self::Bleeding,
            2 => Self::Intoxication,
            3 => Self::Pus,
            4 => Self::Fire,
            5 => Self::EternalFire,
            6 => Self::Frostbite,
            7 => Self::Fracture,
            8 => Self::ElectricShock,
            9 => Self::Bloodlust,
            10 => Self::Dizzy,
            11 => Self::Wet,
            12 => Self::Fuddle,
            16 => Self::Healing,
            17 => Self::Invulnerability,
            18 => Self::Tame,
            21 => Self::Action,
            22 => Self::Flare,
            23 => Self::Smoke,
            24 => Self::Light,
            25 => Self::Particles,
            52 => Self::BuildingSite,
            53 => Self::Link,
            54 => Self::SpeedModification,
            60 => Self::AiStick,
            other => return Err(WorldError::UnknownState(other)),
        };
        Ok(flag)
    }

    pub fn raw(self) -> i64 {
        match self {
            Self::Bleeding => 1,
            Self::Intoxication => 2,
            Self::Pus => 3,
            Self::Fire => 4,
            Self::EternalFire => 5,
            Self::Frostbite => 6,
            Self::Fracture => 7,
            Self::ElectricShock => 8,
            Self::Bloodlust => 9,
            Self::Dizzy => 10,
            Self::Wet => 11,
            Self::Fuddle => 12,
            Self::Healing => 16,
            Self::Invulnerability => 17,
            Self::Tame => 18,
            Self::Action => 21,
            Self::Flare => 22,
            Self::Smoke => 23,
            Self::Light => 24,
            Self::Particles => 25,
            Self::BuildingSite => 52,
            Self::Link => 53,
            Self::SpeedModification => 54,
            Self::AiStick => 60,
        }
    }
}

/// (class, id) address of a world entity. Ids are unique per class only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub class: EntityClass,
    pub id: i64,
}

impl EntityRef {
    pub const fn new(class: EntityClass, id: i64) -> Self {
        Self { class, id }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.class, self.id)
    }
}

/// Opaque, non-owning handle into a renderable owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Live instance of a map entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub class: EntityClass,
    /// Definition/type id; `alterobject` rewrites it in place.
    pub entity_type: i64,
    pub health: f64,
    pub states: Vec<StateFlag>,
    pub mesh: Option<MeshHandle>,
}

impl Entity {
    pub fn new(class: EntityClass, id: i64) -> Self {
        Self {
            id,
            class,
            entity_type: 0,
            health: 0.0,
            states: Vec::new(),
            mesh: None,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.class, self.id)
    }

    pub fn has_state(&self, flag: StateFlag) -> bool {
        self.states.contains(&flag)
    }
}

#[derive(Debug, Default)]
struct Collections {
    objects: Vec<Entity>,
    units: Vec<Entity>,
    items: Vec<Entity>,
    infos: Vec<Entity>,
}

impl Collections {
    fn collection(&self, class: EntityClass) -> &Vec<Entity> {
        match class {
            EntityClass::Object => &self.objects,
            EntityClass::Unit => &self.units,
            EntityClass::Item => &self.items,
            EntityClass::Info => &self.infos,
        }
    }

    fn collection_mut(&mut self, class: EntityClass) -> &mut Vec<Entity> {
        match class {
            EntityClass::Object => &mut self.objects,
            EntityClass::Unit => &mut self.units,
            EntityClass::Item => &mut self.items,
            EntityClass::Info => &mut self.infos,
        }
    }
}

/// Shared store of all addressable map entities.
///
/// Cloning shares the underlying collections, mirroring how the session
/// hands the same store to the dispatcher and the scripting host.
#[derive(Debug, Default)]
pub struct EntityStore {
    inner: Arc<RwLock<Collections>>,
}

impl Clone for EntityStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity to its class collection.
    pub fn insert(&self, entity: Entity) {
        let mut guard = self.inner.write();
        guard.collection_mut(entity.class).push(entity);
    }

    /// Resolves an entity address to a snapshot of the entity.
    ///
    /// Resolution is a linear scan of the class collection; a miss is an
    /// explicit `EntityNotFound`, never a silent null.
    pub fn lookup(&self, entity_ref: EntityRef) -> Result<Entity, WorldError> {
        let guard = self.inner.read();
        guard
            .collection(entity_ref.class)
            .iter()
            .find(|entity| entity.id == entity_ref.id)
            .cloned()
            .ok_or(WorldError::EntityNotFound {
                class: entity_ref.class,
                id: entity_ref.id,
            })
    }

    /// Applies a mutation to the addressed entity.
    pub fn update<F, R>(&self, entity_ref: EntityRef, updater: F) -> Result<R, WorldError>
    where
        F: FnOnce(&mut Entity) -> R,
    {
        let mut guard = self.inner.write();
        let entity = guard
            .collection_mut(entity_ref.class)
            .iter_mut()
            .find(|entity| entity.id == entity_ref.id)
            .ok_or(WorldError::EntityNotFound {
                class: entity_ref.class,
                id: entity_ref.id,
            })?;
        Ok(updater(entity))
    }

    /// Idempotent insert into the entity's state set.
    pub fn add_state(&self, entity_ref: EntityRef, flag: StateFlag) -> Result<(), WorldError> {
        self.update(entity_ref, |entity| {
            if !entity.states.contains(&flag) {
                entity.states.push(flag);
            }
        })
    }

    /// Counts entities carrying the flag across objects, units and items.
    /// Infos never carry visible states and are excluded.
    pub fn count_by_state(&self, flag: StateFlag) -> usize {
        let guard = self.inner.read();
        guard
            .objects
            .iter()
            .chain(guard.units.iter())
            .chain(guard.items.iter())
            .filter(|entity| entity.states.contains(&flag))
            .count()
    }

    /// Records the renderable delivered by the asset loader.
    pub fn attach_mesh(
        &self,
        entity_ref: EntityRef,
        mesh: MeshHandle,
    ) -> Result<(), WorldError> {
        self.update(entity_ref, |entity| entity.mesh = Some(mesh))
    }

    pub fn count(&self, class: EntityClass) -> usize {
        self.inner.read().collection(class).len()
    }

    pub fn total(&self) -> usize {
        let guard = self.inner.read();
        guard.objects.len() + guard.units.len() + guard.items.len() + guard.infos.len()
    }

    /// Snapshot of one class collection, in insertion order.
    pub fn all(&self, class: EntityClass) -> Vec<Entity> {
        self.inner.read().collection(class).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: i64) -> Entity {
        Entity::new(EntityClass::Unit, id)
    }

    #[test]
    fn lookup_finds_by_class_and_id() {
        let store = EntityStore::new();
        store.insert(unit(1));
        store.insert(Entity::new(EntityClass::Item, 1));

        let found = store.lookup(EntityRef::new(EntityClass::Unit, 1)).unwrap();
        assert_eq!(found.class, EntityClass::Unit);
        assert_eq!(found.id, 1);
    }

    #[test]
    fn lookup_miss_is_entity_not_found() {
        let store = EntityStore::new();
        let err = store
            .lookup(EntityRef::new(EntityClass::Unit, 9999))
            .unwrap_err();
        assert_eq!(
            err,
            WorldError::EntityNotFound {
                class: EntityClass::Unit,
                id: 9999
            }
        );
    }

    #[test]
    fn add_state_is_idempotent() {
        let store = EntityStore::new();
        store.insert(unit(7));
        let addr = EntityRef::new(EntityClass::Unit, 7);
        store.add_state(addr, StateFlag::Fire).unwrap();
        store.add_state(addr, StateFlag::Fire).unwrap();
        assert_eq!(store.lookup(addr).unwrap().states, vec![StateFlag::Fire]);
        assert_eq!(store.count_by_state(StateFlag::Fire), 1);
    }

    #[test]
    fn count_by_state_skips_infos() {
        let store = EntityStore::new();
        let mut info = Entity::new(EntityClass::Info, 1);
        info.states.push(StateFlag::Wet);
        store.insert(info);
        let mut object = Entity::new(EntityClass::Object, 1);
        object.states.push(StateFlag::Wet);
        store.insert(object);
        assert_eq!(store.count_by_state(StateFlag::Wet), 1);
    }

    #[test]
    fn raw_round_trips() {
        for raw in [0, 1, 2, 3] {
            assert_eq!(EntityClass::from_raw(raw).unwrap().raw(), raw);
        }
        assert!(EntityClass::from_raw(4).is_err());
        for raw in [1, 12, 16, 25, 52, 60] {
            assert_eq!(StateFlag::from_raw(raw).unwrap().raw(), raw);
        }
        assert!(StateFlag::from_raw(13).is_err());
    }
}
