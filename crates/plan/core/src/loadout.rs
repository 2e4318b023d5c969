//! Equipment slots and per-step loadouts.
//!
//! Equipment slots are the only point of mutual exclusion between resources.
//! A [`Loadout`] is built fresh every step: the job's own requirements go in
//! first, then the equipment of bound resources, then default equipment that
//! only fills whatever is still free.

use bitflags::bitflags;

use crate::names::Item;

bitflags! {
    /// A set of equipment slots.
    ///
    /// Single-bit values name one slot; combinations describe the slots an
    /// item may be worn in (e.g. any accessory slot).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(
        feature = "serde",
        derive(serde::Serialize, serde::Deserialize),
        serde(transparent)
    )]
    pub struct SlotSet: u16 {
        const HAT      = 1 << 0;
        const BACK     = 1 << 1;
        const SHIRT    = 1 << 2;
        const WEAPON   = 1 << 3;
        const OFF_HAND = 1 << 4;
        const PANTS    = 1 << 5;
        const ACC1     = 1 << 6;
        const ACC2     = 1 << 7;
        const ACC3     = 1 << 8;
        const FAMILIAR = 1 << 9;

        const ACCESSORY = Self::ACC1.bits() | Self::ACC2.bits() | Self::ACC3.bits();
    }
}

impl SlotSet {
    /// Every single slot, in placement order.
    pub const SLOTS: [SlotSet; 10] = [
        SlotSet::HAT,
        SlotSet::BACK,
        SlotSet::SHIRT,
        SlotSet::WEAPON,
        SlotSet::OFF_HAND,
        SlotSet::PANTS,
        SlotSet::ACC1,
        SlotSet::ACC2,
        SlotSet::ACC3,
        SlotSet::FAMILIAR,
    ];

    /// Iterates the single slots contained in this set, in placement order.
    pub fn slots(self) -> impl Iterator<Item = SlotSet> {
        Self::SLOTS.into_iter().filter(move |slot| self.contains(*slot))
    }
}

/// An item and the slots it may be worn in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipRequirement {
    pub item: Item,
    pub slots: SlotSet,
}

impl EquipRequirement {
    pub fn new(item: impl Into<Item>, slots: SlotSet) -> Self {
        Self {
            item: item.into(),
            slots,
        }
    }
}

/// Equipment and state a job wants before its effect runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Outfit {
    pub equip: Vec<EquipRequirement>,
    /// Slots default equipment must leave alone.
    pub avoid: SlotSet,
    /// Status effects to apply.
    pub effects: Vec<String>,
}

impl Outfit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equip(mut self, item: impl Into<Item>, slots: SlotSet) -> Self {
        self.equip.push(EquipRequirement::new(item, slots));
        self
    }

    pub fn with_avoid(mut self, slots: SlotSet) -> Self {
        self.avoid |= slots;
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effects.push(effect.into());
        self
    }
}

/// Equipment committed for the current step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    placed: Vec<(SlotSet, Item)>,
    avoid: SlotSet,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slots that currently hold an item.
    pub fn occupied(&self) -> SlotSet {
        self.placed
            .iter()
            .fold(SlotSet::empty(), |acc, (slot, _)| acc | *slot)
    }

    /// Marks slots as off-limits for default equipment.
    pub fn avoid(&mut self, slots: SlotSet) {
        self.avoid |= slots;
    }

    pub fn avoided(&self) -> SlotSet {
        self.avoid
    }

    /// The item committed to a single slot, if any.
    pub fn item_in(&self, slot: SlotSet) -> Option<&Item> {
        self.placed
            .iter()
            .find(|(placed, _)| *placed == slot)
            .map(|(_, item)| item)
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.placed.iter().any(|(_, placed)| placed == item)
    }

    /// Iterates committed `(slot, item)` pairs in commit order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotSet, &Item)> {
        self.placed.iter().map(|(slot, item)| (*slot, item))
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Finds the slot a requirement would use, without committing it.
    ///
    /// A slot already holding the same item is reused; otherwise the first
    /// free acceptable slot in placement order is chosen.
    pub fn fit(&self, requirement: &EquipRequirement) -> Option<SlotSet> {
        if let Some((slot, _)) = self
            .placed
            .iter()
            .find(|(slot, item)| *item == requirement.item && requirement.slots.contains(*slot))
        {
            return Some(*slot);
        }

        let occupied = self.occupied();
        requirement.slots.slots().find(|slot| !occupied.contains(*slot))
    }

    /// Commits a requirement, returning the slot used.
    ///
    /// # Errors
    ///
    /// Returns the requested slot set if every acceptable slot is already
    /// committed to a different item. Nothing is ever displaced.
    pub fn place(&mut self, requirement: &EquipRequirement) -> Result<SlotSet, SlotSet> {
        let slot = self.fit(requirement).ok_or(requirement.slots)?;
        if self.item_in(slot).is_none() {
            self.placed.push((slot, requirement.item.clone()));
        }
        Ok(slot)
    }

    /// Commits a default-equipment rule if a free, non-avoided slot exists.
    ///
    /// Returns true if the item was placed.
    pub fn fill_default(&mut self, requirement: &EquipRequirement) -> bool {
        if self.contains(&requirement.item) {
            return false;
        }
        let occupied = self.occupied() | self.avoid;
        match requirement.slots.slots().find(|slot| !occupied.contains(*slot)) {
            Some(slot) => {
                self.placed.push((slot, requirement.item.clone()));
                true
            }
            None => false,
        }
    }
}
