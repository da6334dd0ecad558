//! Owner of every live entity.
//!
//! Entities live in a generational arena, so an [`EntityId`] held across a
//! despawn never aliases a newer entity. Each slot carries the set of
//! collections the entity belongs to; despawning drops it from all of them at
//! once.

use bitflags::bitflags;
use slotmap::{SlotMap, new_key_type};

use crate::entities::Entity;

new_key_type! {
    pub struct EntityId;
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Groups: u8 {
        const UPDATABLE = 1 << 0;
        const DRAWABLE = 1 << 1;
        const ASTEROIDS = 1 << 2;
        const SHOTS = 1 << 3;
    }
}

struct Slot {
    entity: Entity,
    groups: Groups,
}

#[derive(Default)]
pub struct Registry {
    slots: SlotMap<EntityId, Slot>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity to the collections its kind belongs to.
    pub fn spawn(&mut self, entity: impl Into<Entity>) -> EntityId {
        let entity = entity.into();
        let groups = entity.groups();
        self.slots.insert(Slot { entity, groups })
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.slots.remove(id).map(|slot| slot.entity)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id).map(|slot| &slot.entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id).map(|slot| &mut slot.entity)
    }

    pub fn groups(&self, id: EntityId) -> Groups {
        self.slots.get(id).map_or(Groups::empty(), |slot| slot.groups)
    }

    pub fn in_group(&self, group: Groups) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.slots
            .iter()
            .filter(move |(_, slot)| slot.groups.contains(group))
            .map(|(id, slot)| (id, &slot.entity))
    }

    /// Ids in `group` right now. Iterate this when the pass itself spawns or
    /// despawns: entities added later are not visited, removed ones must be
    /// skipped via [`Registry::get`].
    pub fn ids_in(&self, group: Groups) -> Vec<EntityId> {
        self.in_group(group).map(|(id, _)| id).collect()
    }

    pub fn count(&self, group: Groups) -> usize {
        self.in_group(group).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
