pub mod kennard_stone;

pub use kennard_stone::{KennardStone, SUBSET_ALL};
