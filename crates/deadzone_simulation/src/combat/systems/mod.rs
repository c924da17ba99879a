//! Combat systems

pub mod damage;
pub mod weapon;

#[cfg(test)]
mod damage_tests;

// Re-export all systems
pub use damage::*;
pub use weapon::*;
