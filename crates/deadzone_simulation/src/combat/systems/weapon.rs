//! Weapon ticking system.

use bevy::prelude::*;

use crate::combat::{Loadout, WeaponReloaded};

/// Система: tick всех оружий (time_since_last_fire, timed reload)
///
/// Тикают все оружия в loadout, включая holstered.
pub fn tick_loadouts(
    time: Res<Time<Fixed>>,
    mut loadouts: Query<(Entity, &mut Loadout)>,
    mut reloaded: EventWriter<WeaponReloaded>,
) {
    let delta = time.delta_secs();

    for (owner, mut loadout) in loadouts.iter_mut() {
        loadout.tick(delta, |weapon| {
            reloaded.write(WeaponReloaded {
                owner,
                weapon: weapon.kind(),
                ammo: weapon.ammo(),
            });
        });
    }
}
