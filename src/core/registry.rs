//! Colour pair allocation
//!
//! Terminals address colours through a small table of numbered pairs. The
//! registry maps each live `Palette` to exactly one pair id and each id to
//! exactly one palette:
//!
//! ```text
//! id 0      Default/Default, created with the registry, never released
//! id 1..=N  allocated lowest-free-first, N = driver pair limit
//! ```
//!
//! Every acquire of a live palette counts as one more holder of its slot;
//! the pair is unbound only when the last holder releases it.
//!
//! The registry holds no driver; every operation that has to touch the
//! terminal borrows one. It is not synchronized: callers sharing it across
//! threads must wrap it in a single lock.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, warn};

use super::colour::Palette;
use super::driver::Driver;
use super::error::{Error, ReleaseRefusal, Result};

/// A palette bound to a colour pair id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColourSlot {
    id: u16,
    palette: Palette,
    freeable: bool,
}

impl ColourSlot {
    /// Pair 0, the terminal's default colours
    pub const fn default_slot() -> Self {
        Self {
            id: 0,
            palette: Palette::DEFAULT,
            freeable: false,
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn is_freeable(&self) -> bool {
        self.freeable
    }
}

impl Default for ColourSlot {
    fn default() -> Self {
        Self::default_slot()
    }
}

impl fmt::Display for ColourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pair: {}, palette: ({})", self.id, self.palette)
    }
}

/// Palette to pair id mapping bounded by the driver's pair limit
#[derive(Debug)]
pub struct ColourSlotRegistry {
    max_pairs: u16,
    by_id: BTreeMap<u16, ColourSlot>,
    by_palette: HashMap<Palette, u16>,
    /// Outstanding acquires per freeable id
    holders: HashMap<u16, usize>,
}

impl ColourSlotRegistry {
    /// Create a registry allowing `max_pairs` pairs besides pair 0
    pub fn new(max_pairs: u16) -> Self {
        let default = ColourSlot::default_slot();
        let mut by_id = BTreeMap::new();
        let mut by_palette = HashMap::new();
        by_id.insert(default.id, default);
        by_palette.insert(default.palette, default.id);

        Self {
            max_pairs,
            by_id,
            by_palette,
            holders: HashMap::new(),
        }
    }

    /// Get the slot for `palette`, binding a new pair if it has none.
    ///
    /// The returned slot can later be released.
    pub fn acquire<D: Driver + ?Sized>(
        &mut self,
        driver: &mut D,
        palette: Palette,
    ) -> Result<ColourSlot> {
        self.acquire_slot(driver, palette, true)
    }

    /// Like `acquire`, but a newly bound slot can never be released
    pub fn acquire_pinned<D: Driver + ?Sized>(
        &mut self,
        driver: &mut D,
        palette: Palette,
    ) -> Result<ColourSlot> {
        self.acquire_slot(driver, palette, false)
    }

    fn acquire_slot<D: Driver + ?Sized>(
        &mut self,
        driver: &mut D,
        palette: Palette,
        freeable: bool,
    ) -> Result<ColourSlot> {
        if let Some(slot) = self.find(palette) {
            if let Some(count) = self.holders.get_mut(&slot.id) {
                *count += 1;
            }
            return Ok(slot);
        }

        let id = self
            .next_free_id()
            .ok_or(Error::ResourceExhausted { max: self.max_pairs })?;

        driver
            .bind_colour_pair(id, palette.foreground.code(), palette.background.code())
            .map_err(|source| {
                warn!("Driver refused to bind pair {} to {}: {}", id, palette, source);
                Error::AllocationFailed {
                    id,
                    palette,
                    source,
                }
            })?;

        let slot = ColourSlot {
            id,
            palette,
            freeable,
        };
        self.by_id.insert(id, slot);
        self.by_palette.insert(palette, id);
        if freeable {
            self.holders.insert(id, 1);
        }
        debug!("Bound {}", slot);

        Ok(slot)
    }

    /// Drop one hold on a slot; the last release returns its id to the free pool
    pub fn release<D: Driver + ?Sized>(&mut self, driver: &mut D, slot: ColourSlot) -> Result<()> {
        let refuse = |reason| Error::InvalidRelease {
            id: slot.id,
            reason,
        };

        if slot.id == 0 {
            return Err(refuse(ReleaseRefusal::Reserved));
        }
        let live = match self.by_id.get(&slot.id) {
            Some(live) if live.palette == slot.palette => *live,
            _ => return Err(refuse(ReleaseRefusal::NotLive)),
        };
        if !live.freeable {
            return Err(refuse(ReleaseRefusal::Pinned));
        }

        let held = self.holders(live.id);
        if held > 1 {
            self.holders.insert(live.id, held - 1);
            debug!("Released one of {} holds on {}", held, live);
            return Ok(());
        }

        driver.unbind_colour_pair(live.id).map_err(|source| {
            warn!("Driver refused to unbind {}: {}", live, source);
            Error::ReleaseFailed {
                id: live.id,
                palette: live.palette,
                source,
            }
        })?;

        self.by_id.remove(&live.id);
        self.by_palette.remove(&live.palette);
        self.holders.remove(&live.id);
        debug!("Released {}", live);

        Ok(())
    }

    /// Slot currently bound to `id`
    pub fn lookup(&self, id: u16) -> Result<ColourSlot> {
        self.by_id.get(&id).copied().ok_or(Error::NotDefined(id))
    }

    /// Live slot for `palette`, if any
    pub fn find(&self, palette: Palette) -> Option<ColourSlot> {
        self.by_palette.get(&palette).map(|id| self.by_id[id])
    }

    /// Drop every mapping except pair 0 and unbind the pairs.
    ///
    /// All mappings are dropped even when the driver refuses an unbind; the
    /// first refusal is reported.
    pub fn reset_all<D: Driver + ?Sized>(&mut self, driver: &mut D) -> Result<()> {
        let mut first_error = None;

        for slot in self.by_id.values().filter(|s| s.id != 0) {
            if let Err(source) = driver.unbind_colour_pair(slot.id) {
                warn!("Driver refused to unbind {} during reset: {}", slot, source);
                if first_error.is_none() {
                    first_error = Some(Error::ReleaseFailed {
                        id: slot.id,
                        palette: slot.palette,
                        source,
                    });
                }
            }
        }

        self.by_id.retain(|id, _| *id == 0);
        self.by_palette.retain(|_, id| *id == 0);
        self.holders.clear();
        debug!("Colour pairs reset");

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Outstanding acquires of the freeable slot bound to `id`, 0 otherwise
    pub fn holders(&self, id: u16) -> usize {
        self.holders.get(&id).copied().unwrap_or(0)
    }

    /// Live slots in id order, pair 0 first
    pub fn live(&self) -> impl Iterator<Item = &ColourSlot> {
        self.by_id.values()
    }

    /// Number of live slots, pair 0 included
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Always false: pair 0 is always live
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Pairs available besides pair 0
    pub fn capacity(&self) -> u16 {
        self.max_pairs
    }

    pub fn contains(&self, id: u16) -> bool {
        self.by_id.contains_key(&id)
    }

    fn next_free_id(&self) -> Option<u16> {
        // Keys are sorted, so the first gap in 1.. is the lowest free id.
        let mut candidate: u16 = 1;
        for id in self.by_id.keys().filter(|id| **id != 0) {
            if *id != candidate {
                break;
            }
            candidate = candidate.checked_add(1)?;
        }
        (candidate <= self.max_pairs).then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::core::cell::RawCell;
    use crate::core::colour::{Colour, Rgb};
    use crate::core::driver::{Capabilities, HeadlessDriver};

    fn palette(fg: Colour, bg: Colour) -> Palette {
        Palette::new(fg, bg)
    }

    /// Driver whose binds and unbinds can be made to fail
    #[derive(Default)]
    struct FlakyDriver {
        refuse_bind: bool,
        refuse_unbind: bool,
        binds: usize,
    }

    impl Driver for FlakyDriver {
        fn capabilities(&self) -> Capabilities {
            Capabilities {
                lines: 24,
                columns: 80,
                colours: 256,
                max_colour_pairs: 8,
                supports_colour: true,
                can_change_colour: false,
            }
        }

        fn bind_colour_pair(&mut self, _id: u16, _fg: i16, _bg: i16) -> io::Result<()> {
            self.binds += 1;
            if self.refuse_bind {
                return Err(io::Error::new(io::ErrorKind::Other, "init_pair failed"));
            }
            Ok(())
        }

        fn unbind_colour_pair(&mut self, _id: u16) -> io::Result<()> {
            if self.refuse_unbind {
                return Err(io::Error::new(io::ErrorKind::Other, "free_pair failed"));
            }
            Ok(())
        }

        fn define_colour(&mut self, _code: i16, _rgb: Rgb) -> io::Result<()> {
            Ok(())
        }

        fn move_cursor(&mut self, _col: u16, _row: u16) -> io::Result<()> {
            Ok(())
        }

        fn write_cell(&mut self, _cell: RawCell) -> io::Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_acquire_is_idempotent() {
        let mut driver = FlakyDriver::default();
        let mut registry = ColourSlotRegistry::new(8);
        let p = palette(Colour::Yellow, Colour::Blue);

        let first = registry.acquire(&mut driver, p).unwrap();
        let second = registry.acquire(&mut driver, p).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.id(), 1);
        assert_eq!(driver.binds, 1);
        assert_eq!(registry.holders(first.id()), 2);
    }

    #[test]
    fn test_shared_slot_survives_first_release() {
        let mut driver = HeadlessDriver::new(80, 24);
        let mut registry = ColourSlotRegistry::new(8);
        let shared = palette(Colour::Yellow, Colour::Blue);

        let widget_a = registry.acquire(&mut driver, shared).unwrap();
        let widget_b = registry.acquire(&mut driver, shared).unwrap();
        assert_eq!(widget_a, widget_b);

        registry.release(&mut driver, widget_a).unwrap();
        assert_eq!(registry.lookup(widget_b.id()).unwrap(), widget_b);
        assert_eq!(driver.pair(widget_b.id()), Some((3, 4)));
        assert_eq!(registry.holders(widget_b.id()), 1);

        // The id stays taken while widget_b holds it
        let other = registry
            .acquire(&mut driver, palette(Colour::Red, Colour::Green))
            .unwrap();
        assert_ne!(other.id(), widget_b.id());

        registry.release(&mut driver, widget_b).unwrap();
        assert!(!registry.contains(widget_b.id()));
        assert_eq!(driver.pair(widget_b.id()), None);
        assert_eq!(registry.holders(widget_b.id()), 0);
        assert!(matches!(
            registry.release(&mut driver, widget_b),
            Err(Error::InvalidRelease {
                reason: ReleaseRefusal::NotLive,
                ..
            })
        ));
    }

    #[test]
    fn test_default_palette_is_pair_zero() {
        let mut driver = FlakyDriver::default();
        let mut registry = ColourSlotRegistry::new(8);
        registry
            .acquire(&mut driver, palette(Colour::Red, Colour::Black))
            .unwrap();

        let slot = registry.acquire(&mut driver, Palette::DEFAULT).unwrap();
        assert_eq!(slot.id(), 0);
        assert!(!slot.is_freeable());
        assert_eq!(driver.binds, 1);

        assert!(matches!(
            registry.release(&mut driver, slot),
            Err(Error::InvalidRelease {
                id: 0,
                reason: ReleaseRefusal::Reserved
            })
        ));
        assert!(registry.contains(0));
    }

    #[test]
    fn test_release_and_reuse_scenario() {
        let mut driver = HeadlessDriver::new(80, 24);
        let mut registry = ColourSlotRegistry::new(16);

        let yellow_blue = registry
            .acquire(&mut driver, palette(Colour::Yellow, Colour::Blue))
            .unwrap();
        assert_eq!(yellow_blue.id(), 1);
        let red_blue = registry
            .acquire(&mut driver, palette(Colour::Red, Colour::Blue))
            .unwrap();
        assert_eq!(red_blue.id(), 2);

        registry.release(&mut driver, yellow_blue).unwrap();
        assert_eq!(driver.pair(1), None);

        let green_black = registry
            .acquire(&mut driver, palette(Colour::Green, Colour::Black))
            .unwrap();
        assert_eq!(green_black.id(), 1);
        assert_eq!(driver.pair(1), Some((2, 0)));

        let again = registry
            .acquire(&mut driver, palette(Colour::Yellow, Colour::Blue))
            .unwrap();
        assert_eq!(again.id(), 3);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_exhaustion_boundary() {
        let mut driver = HeadlessDriver::with_pair_limit(80, 24, 3);
        let mut registry = ColourSlotRegistry::new(3);

        for code in 0..3u8 {
            let slot = registry
                .acquire(&mut driver, palette(Colour::user_defined(code), Colour::Black))
                .unwrap();
            assert_eq!(slot.id(), code as u16 + 1);
        }

        let result = registry.acquire(&mut driver, palette(Colour::White, Colour::Black));
        assert!(matches!(result, Err(Error::ResourceExhausted { max: 3 })));

        // Exhaustion leaves existing mappings reachable
        let existing = registry
            .acquire(&mut driver, palette(Colour::user_defined(1), Colour::Black))
            .unwrap();
        assert_eq!(existing.id(), 2);
    }

    #[test]
    fn test_zero_capacity_still_serves_default() {
        let mut driver = HeadlessDriver::with_pair_limit(80, 24, 0);
        let mut registry = ColourSlotRegistry::new(0);
        assert_eq!(registry.acquire(&mut driver, Palette::DEFAULT).unwrap().id(), 0);
        assert!(matches!(
            registry.acquire(&mut driver, palette(Colour::Red, Colour::Default)),
            Err(Error::ResourceExhausted { max: 0 })
        ));
    }

    #[test]
    fn test_driver_bind_failure() {
        let mut driver = FlakyDriver {
            refuse_bind: true,
            ..Default::default()
        };
        let mut registry = ColourSlotRegistry::new(8);
        let p = palette(Colour::Cyan, Colour::Magenta);

        match registry.acquire(&mut driver, p) {
            Err(Error::AllocationFailed { id, palette, .. }) => {
                assert_eq!(id, 1);
                assert_eq!(palette, p);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(registry.find(p).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_release_rejections() {
        let mut driver = HeadlessDriver::new(80, 24);
        let mut registry = ColourSlotRegistry::new(8);

        let pinned = registry
            .acquire_pinned(&mut driver, palette(Colour::White, Colour::Red))
            .unwrap();
        assert!(!pinned.is_freeable());
        assert!(matches!(
            registry.release(&mut driver, pinned),
            Err(Error::InvalidRelease {
                reason: ReleaseRefusal::Pinned,
                ..
            })
        ));

        let slot = registry
            .acquire(&mut driver, palette(Colour::Black, Colour::White))
            .unwrap();
        registry.release(&mut driver, slot).unwrap();
        assert!(matches!(
            registry.release(&mut driver, slot),
            Err(Error::InvalidRelease {
                reason: ReleaseRefusal::NotLive,
                ..
            })
        ));

        // A stale slot must not release the palette that now owns its id
        let reused = registry
            .acquire(&mut driver, palette(Colour::Green, Colour::Green))
            .unwrap();
        assert_eq!(reused.id(), slot.id());
        assert!(registry.release(&mut driver, slot).is_err());
        assert!(registry.contains(reused.id()));
    }

    #[test]
    fn test_release_driver_failure_keeps_mapping() {
        let mut driver = FlakyDriver::default();
        let mut registry = ColourSlotRegistry::new(8);
        let slot = registry
            .acquire(&mut driver, palette(Colour::Blue, Colour::Yellow))
            .unwrap();

        driver.refuse_unbind = true;
        assert!(matches!(
            registry.release(&mut driver, slot),
            Err(Error::ReleaseFailed { id: 1, .. })
        ));
        assert_eq!(registry.lookup(1).unwrap(), slot);
    }

    #[test]
    fn test_lookup() {
        let mut driver = HeadlessDriver::new(80, 24);
        let mut registry = ColourSlotRegistry::new(8);
        assert_eq!(registry.lookup(0).unwrap(), ColourSlot::default_slot());
        assert!(matches!(registry.lookup(5), Err(Error::NotDefined(5))));

        let slot = registry
            .acquire(&mut driver, palette(Colour::Magenta, Colour::Default))
            .unwrap();
        assert_eq!(registry.lookup(slot.id()).unwrap(), slot);
    }

    #[test]
    fn test_reset_all() {
        let mut driver = HeadlessDriver::new(80, 24);
        let mut registry = ColourSlotRegistry::new(8);
        registry
            .acquire(&mut driver, palette(Colour::Red, Colour::Black))
            .unwrap();
        registry
            .acquire_pinned(&mut driver, palette(Colour::Green, Colour::Black))
            .unwrap();

        registry.reset_all(&mut driver).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(driver.bound_pairs(), 0);
        assert_eq!(
            registry
                .acquire(&mut driver, palette(Colour::Blue, Colour::Black))
                .unwrap()
                .id(),
            1
        );
    }

    #[test]
    fn test_reset_all_reports_refusal_but_clears() {
        let mut driver = FlakyDriver::default();
        let mut registry = ColourSlotRegistry::new(8);
        registry
            .acquire(&mut driver, palette(Colour::Red, Colour::Black))
            .unwrap();

        driver.refuse_unbind = true;
        assert!(registry.reset_all(&mut driver).is_err());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_live_in_id_order() {
        let mut driver = HeadlessDriver::new(80, 24);
        let mut registry = ColourSlotRegistry::new(8);
        for fg in [Colour::Red, Colour::Green, Colour::Blue] {
            registry.acquire(&mut driver, palette(fg, Colour::Black)).unwrap();
        }
        let ids: Vec<u16> = registry.live().map(|s| s.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(registry.capacity(), 8);
    }
}
