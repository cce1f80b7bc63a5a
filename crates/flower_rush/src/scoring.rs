use bevy::prelude::*;

/// Tracks what the player has caught this round and how much of it the
/// impostor has stolen. The real artist's share is always derived, never
/// stored, so the two halves cannot drift apart.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreLedger {
    pub flowers_collected: u32,
    pub catfish_caught: u32,
    pub flowers_to_impostor: u32,
}

impl ScoreLedger {
    pub fn on_flower_caught(&mut self) {
        self.flowers_collected += 1;
    }

    /// Registers a catfish catch. A third of the current hoard (rounded
    /// down) moves to the impostor at this moment; later flowers are not
    /// taxed retroactively. Returns the penalty for display.
    pub fn on_catfish_caught(&mut self) -> u32 {
        self.catfish_caught += 1;
        let penalty = self.flowers_collected / 3;
        self.flowers_to_impostor += penalty;
        penalty
    }

    pub const fn flowers_to_real_artist(&self) -> u32 {
        self.flowers_collected - self.flowers_to_impostor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_after(flowers: u32, catfish: u32) -> ScoreLedger {
        let mut ledger = ScoreLedger::default();
        for _ in 0..flowers {
            ledger.on_flower_caught();
        }
        for _ in 0..catfish {
            ledger.on_catfish_caught();
        }
        ledger
    }

    #[test]
    fn flower_catches_accumulate() {
        let ledger = ledger_after(10, 0);
        assert_eq!(ledger.flowers_collected, 10);
        assert_eq!(ledger.flowers_to_real_artist(), 10);
        assert_eq!(ledger.flowers_to_impostor, 0);
    }

    #[test]
    fn catfish_penalty_is_a_third_of_the_hoard_at_capture_time() {
        let mut ledger = ledger_after(9, 0);
        let penalty = ledger.on_catfish_caught();
        assert_eq!(penalty, 3);
        assert_eq!(ledger.flowers_to_real_artist(), 6);
        assert_eq!(ledger.flowers_to_impostor, 3);
    }

    #[test]
    fn penalty_is_not_recomputed_retroactively() {
        let mut ledger = ledger_after(3, 0);
        ledger.on_catfish_caught();
        assert_eq!(ledger.flowers_to_impostor, 1);

        // Nine more flowers arrive after the capture, untaxed.
        for _ in 0..9 {
            ledger.on_flower_caught();
        }
        assert_eq!(ledger.flowers_to_impostor, 1);
        assert_eq!(ledger.flowers_to_real_artist(), 11);
    }

    #[test]
    fn penalty_sums_over_captures() {
        let mut ledger = ScoreLedger::default();
        let mut expected = 0;
        for flowers_between in [5, 4, 0] {
            for _ in 0..flowers_between {
                ledger.on_flower_caught();
            }
            expected += ledger.flowers_collected / 3;
            ledger.on_catfish_caught();
            assert_eq!(ledger.flowers_to_impostor, expected);
        }
    }

    #[test]
    fn impostor_share_never_exceeds_the_hoard() {
        for flowers in 0..20 {
            let ledger = ledger_after(flowers, 3);
            assert!(
                ledger.flowers_to_impostor <= ledger.flowers_collected,
                "invariant broke at {flowers} flowers: {ledger:?}"
            );
        }
    }
}
