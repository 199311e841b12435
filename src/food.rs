use rand::Rng;

use crate::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Common = 1,
    Uncommon = 2,
    Rare = 3,
    Golden = 4,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Common,
        FoodKind::Uncommon,
        FoodKind::Rare,
        FoodKind::Golden,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> FoodKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn score(self) -> u64 {
        self as u64 * 10
    }

    pub fn speed_bonus(self) -> f32 {
        self as u8 as f32 * 0.25
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub kind: FoodKind,
}
