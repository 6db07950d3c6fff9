//! Monotonic identifier allocation shared by every entity family.

use garden_guardian_core::{CoinId, PestId, PickupId, PowerId, ProjectileId};

/// Hands out identifiers that stay unique for the lifetime of the process.
///
/// A single counter backs every family so an id never repeats, even across
/// entity kinds. The allocator survives world resets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn bump(&mut self) -> u32 {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        value
    }

    pub(crate) fn pest(&mut self) -> PestId {
        PestId::new(self.bump())
    }

    pub(crate) fn projectile(&mut self) -> ProjectileId {
        ProjectileId::new(self.bump())
    }

    pub(crate) fn coin(&mut self) -> CoinId {
        CoinId::new(self.bump())
    }

    pub(crate) fn pickup(&mut self) -> PickupId {
        PickupId::new(self.bump())
    }

    pub(crate) fn power(&mut self) -> PowerId {
        PowerId::new(self.bump())
    }
}

#[cfg(test)]
mod tests {
    use super::IdAllocator;

    #[test]
    fn identifiers_never_repeat_across_families() {
        let mut ids = IdAllocator::default();
        let pest = ids.pest().get();
        let projectile = ids.projectile().get();
        let coin = ids.coin().get();
        let pickup = ids.pickup().get();
        let power = ids.power().get();
        assert_eq!([pest, projectile, coin, pickup, power], [0, 1, 2, 3, 4]);
    }
}
