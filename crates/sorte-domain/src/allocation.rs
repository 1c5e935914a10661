//! Prize position allocation.
//!
//! Every scratch card of a campaign is backed by one position. Positions are
//! laid out once at campaign creation: each prize name repeated by its
//! quantity, the rest left empty, then shuffled.

use rand::seq::SliceRandom;

/// A prize and how many positions carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeQuota {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("campaign needs at least one scratch card")]
    NoScratchCards,
    #[error("prize `{0}` needs a quantity of at least 1")]
    EmptyPrize(String),
    #[error("prizes need {prizes} positions but the campaign has only {total}")]
    TooManyPrizes { prizes: u64, total: u32 },
}

/// Total number of prize positions in `prizes`.
pub fn prize_total(prizes: &[PrizeQuota]) -> u64 {
    prizes.iter().map(|p| u64::from(p.quantity)).sum()
}

/// Lay out `total` slots in prize order, without shuffling.
pub fn layout_slots(
    prizes: &[PrizeQuota],
    total: u32,
) -> Result<Vec<Option<String>>, AllocationError> {
    if total == 0 {
        return Err(AllocationError::NoScratchCards);
    }
    if let Some(empty) = prizes.iter().find(|p| p.quantity == 0) {
        return Err(AllocationError::EmptyPrize(empty.name.clone()));
    }
    let prize_count = prize_total(prizes);
    if prize_count > u64::from(total) {
        return Err(AllocationError::TooManyPrizes {
            prizes: prize_count,
            total,
        });
    }

    let mut slots = Vec::with_capacity(total as usize);
    for prize in prizes {
        slots.extend((0..prize.quantity).map(|_| Some(prize.name.clone())));
    }
    slots.resize(total as usize, None);
    Ok(slots)
}

/// Lay out and shuffle the positions of a new campaign.
pub fn allocate_positions(
    prizes: &[PrizeQuota],
    total: u32,
) -> Result<Vec<Option<String>>, AllocationError> {
    let mut slots = layout_slots(prizes, total)?;
    slots.shuffle(&mut rand::rng());
    Ok(slots)
}
