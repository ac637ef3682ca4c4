//! Dirty-region computation
//!
//! The screen is split into six fixed slots. Comparing two display states
//! yields the set of slots whose contents changed; an empty set means the
//! tick can be skipped without touching the bus.

use super::display::DisplayState;

/// Fixed UI slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    Location,
    /// Weather text and temperature share one region
    Weather,
    Hour,
    Minute,
    Second,
    /// Date and weekday share one region
    Date,
}

impl Slot {
    /// All slots in repaint order
    pub const ALL: [Slot; 6] = [
        Slot::Location,
        Slot::Weather,
        Slot::Hour,
        Slot::Minute,
        Slot::Second,
        Slot::Date,
    ];

    /// Position in [`Slot::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Slot::Location => 0,
            Slot::Weather => 1,
            Slot::Hour => 2,
            Slot::Minute => 3,
            Slot::Second => 4,
            Slot::Date => 5,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Set of slots needing repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtySet(u8);

impl DirtySet {
    /// No slots
    pub const EMPTY: Self = Self(0);

    /// Every slot (full refresh)
    pub const fn all() -> Self {
        Self(0b0011_1111)
    }

    /// Slots whose contents differ between `prev` and `next`
    pub fn between(prev: &DisplayState, next: &DisplayState) -> Self {
        let mut set = Self::EMPTY;

        if prev.location != next.location {
            set.insert(Slot::Location);
        }
        if prev.weather != next.weather || prev.temperature != next.temperature {
            set.insert(Slot::Weather);
        }
        if prev.hour != next.hour {
            set.insert(Slot::Hour);
        }
        if prev.minute != next.minute {
            set.insert(Slot::Minute);
        }
        if prev.second != next.second {
            set.insert(Slot::Second);
        }
        if prev.date() != next.date() || prev.weekday_label() != next.weekday_label() {
            set.insert(Slot::Date);
        }

        set
    }

    pub fn insert(&mut self, slot: Slot) {
        self.0 |= slot.bit();
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.0 & slot.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Dirty slots in repaint order
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        Slot::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<Slot> for DirtySet {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}
