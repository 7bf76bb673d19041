//! Sealed configuration registry
//!
//! Weapon definitions and difficulty tiers are mutable while the game
//! initializes, then sealed exactly once after a startup grace period.
//! After sealing, every mutable accessor refuses (returns `None` / `false`)
//! instead of silently succeeding, so a late write attempt is observable
//! to the caller and a no-op to the data.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Shared handle to the registry. The game's init code populates it;
/// the sentry only seals it.
pub type SharedRegistry = Rc<RefCell<ConfigRegistry>>;

/// Stats for one weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    /// Damage per hit
    pub damage: u32,
    /// Shots per second
    pub fire_rate: f32,
    /// Projectile travel speed (units/sec)
    pub projectile_speed: f32,
    /// Shop cost in currency
    pub cost: u32,
}

/// Tuning for one difficulty level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    pub name: String,
    /// Enemy hit-point multiplier
    pub enemy_hp_mult: f32,
    /// Seconds between enemy spawns
    pub spawn_interval: f32,
    /// Currency reward multiplier
    pub reward_mult: f32,
}

/// Registry of startup-populated, seal-once configuration entries.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    weapons: Vec<WeaponSpec>,
    tiers: Vec<DifficultyTier>,
    sealed: bool,
}

impl ConfigRegistry {
    /// Empty, unsealed registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a weapon definition. Refused once sealed.
    pub fn add_weapon(&mut self, weapon: WeaponSpec) -> bool {
        if self.sealed {
            return false;
        }
        self.weapons.push(weapon);
        true
    }

    /// Add a difficulty tier. Refused once sealed.
    pub fn add_tier(&mut self, tier: DifficultyTier) -> bool {
        if self.sealed {
            return false;
        }
        self.tiers.push(tier);
        true
    }

    /// Mutable access to a weapon for startup tuning. `None` once sealed.
    pub fn weapon_mut(&mut self, index: usize) -> Option<&mut WeaponSpec> {
        if self.sealed {
            return None;
        }
        self.weapons.get_mut(index)
    }

    /// Mutable access to a tier for startup tuning. `None` once sealed.
    pub fn tier_mut(&mut self, index: usize) -> Option<&mut DifficultyTier> {
        if self.sealed {
            return None;
        }
        self.tiers.get_mut(index)
    }

    pub fn weapons(&self) -> &[WeaponSpec] {
        &self.weapons
    }

    pub fn tiers(&self) -> &[DifficultyTier] {
        &self.tiers
    }

    /// Whether any entries have been registered yet
    pub fn is_populated(&self) -> bool {
        !self.weapons.is_empty() || !self.tiers.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Seal the registry against further mutation.
    ///
    /// Returns `true` only on the call that actually seals. Repeated calls
    /// are safe no-ops, and sealing an empty registry is skipped: the guard
    /// may fire before the game has populated anything, and that cycle is
    /// an accepted gap rather than an error.
    pub fn seal(&mut self) -> bool {
        if self.sealed || !self.is_populated() {
            return false;
        }
        self.sealed = true;
        log::info!(
            "Config registry sealed ({} weapons, {} tiers)",
            self.weapons.len(),
            self.tiers.len()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_weapon(name: &str) -> WeaponSpec {
        WeaponSpec {
            name: name.to_string(),
            damage: 10,
            fire_rate: 2.0,
            projectile_speed: 300.0,
            cost: 100,
        }
    }

    fn sample_tier(name: &str) -> DifficultyTier {
        DifficultyTier {
            name: name.to_string(),
            enemy_hp_mult: 1.0,
            spawn_interval: 2.5,
            reward_mult: 1.0,
        }
    }

    #[test]
    fn test_mutable_before_seal() {
        let mut registry = ConfigRegistry::new();
        assert!(registry.add_weapon(sample_weapon("pistol")));
        assert!(registry.add_tier(sample_tier("normal")));

        registry.weapon_mut(0).unwrap().damage = 15;
        assert_eq!(registry.weapons()[0].damage, 15);
    }

    #[test]
    fn test_seal_rejects_mutation() {
        let mut registry = ConfigRegistry::new();
        registry.add_weapon(sample_weapon("pistol"));
        assert!(registry.seal());

        // All mutation paths refuse
        assert!(!registry.add_weapon(sample_weapon("rifle")));
        assert!(!registry.add_tier(sample_tier("hard")));
        assert!(registry.weapon_mut(0).is_none());

        // Reads still see the pre-seal values
        assert_eq!(registry.weapons().len(), 1);
        assert_eq!(registry.weapons()[0].damage, 10);
    }

    #[test]
    fn test_seal_is_idempotent() {
        let mut registry = ConfigRegistry::new();
        registry.add_weapon(sample_weapon("pistol"));
        assert!(registry.seal());
        assert!(!registry.seal());
        assert!(registry.is_sealed());
    }

    #[test]
    fn test_seal_before_population_is_noop() {
        let mut registry = ConfigRegistry::new();
        assert!(!registry.seal());
        assert!(!registry.is_sealed());

        // The game can still populate afterwards
        assert!(registry.add_weapon(sample_weapon("pistol")));
        assert!(registry.seal());
    }
}
