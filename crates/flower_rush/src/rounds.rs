use bevy::prelude::*;
use bloom_helpers::SessionResult;

use crate::core::config::{CATFISH_LIMIT, MAX_EXTENSIONS, ROUND_SECONDS};
use crate::core::{FallingObject, GameState};
use crate::scoring::ScoreLedger;

/// Integer countdown for one round. Decremented once per elapsed second
/// by [`tick_round_clock`]; partial seconds accrue in the wrapping Bevy
/// timer, so pause/resume churn can neither lose nor double-count time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundClock {
    seconds_remaining: u32,
    expired: bool,
}

impl RoundClock {
    pub const fn new(seconds: u32) -> Self {
        Self {
            seconds_remaining: seconds,
            expired: false,
        }
    }

    /// Registers one elapsed second. Returns `true` exactly once, on the
    /// call that reaches zero.
    pub fn tick_second(&mut self) -> bool {
        if self.seconds_remaining == 0 {
            return false;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 && !self.expired {
            self.expired = true;
            return true;
        }
        false
    }

    pub const fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn reset(&mut self, seconds: u32) {
        self.seconds_remaining = seconds;
        self.expired = false;
    }
}

/// The 1 Hz cadence driving the round clock. Only ticked while the
/// Playing state is active, which is what makes pausing atomic.
#[derive(Resource)]
pub struct RoundTimer {
    pub cadence: Timer,
    pub clock: RoundClock,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self {
            cadence: Timer::from_seconds(1.0, TimerMode::Repeating),
            clock: RoundClock::new(ROUND_SECONDS),
        }
    }
}

impl RoundTimer {
    pub fn reset(&mut self) {
        self.cadence.reset();
        self.clock.reset(ROUND_SECONDS);
    }
}

/// Extension bookkeeping across rounds of one session.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSession {
    pub extensions_used: u32,
    pub round_number: u32,
}

impl Default for RoundSession {
    fn default() -> Self {
        Self {
            extensions_used: 0,
            round_number: 1,
        }
    }
}

impl RoundSession {
    pub const fn can_extend(&self) -> bool {
        self.extensions_used < MAX_EXTENSIONS
    }

    pub const fn extensions_remaining(&self) -> u32 {
        MAX_EXTENSIONS - self.extensions_used
    }
}

/// Why the round ended. Drives the extension carry-over rules.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    TimeExpired,
    CatfishLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Victory,
    ImpostorWin,
    ImpostorCapture,
}

/// Classifies the frozen ledger once, on entry to RoundOver. Ties go to
/// the impostor.
pub fn classify_outcome(ledger: &ScoreLedger) -> RoundOutcome {
    if ledger.catfish_caught >= CATFISH_LIMIT {
        RoundOutcome::ImpostorCapture
    } else if ledger.flowers_to_real_artist() > ledger.flowers_to_impostor {
        RoundOutcome::Victory
    } else {
        RoundOutcome::ImpostorWin
    }
}

/// Maps the frozen ledger to the result reported to the shell. An
/// impostor capture concedes the whole hoard.
pub fn session_result(ledger: &ScoreLedger) -> SessionResult {
    let flowers = u64::from(ledger.flowers_to_real_artist());
    let impostor = u64::from(ledger.flowers_to_impostor);
    match classify_outcome(ledger) {
        RoundOutcome::Victory => SessionResult::Victory { flowers, impostor },
        RoundOutcome::ImpostorWin => SessionResult::ImpostorWin { flowers, impostor },
        RoundOutcome::ImpostorCapture => SessionResult::ImpostorCapture {
            flowers: 0,
            impostor: u64::from(ledger.flowers_collected),
        },
    }
}

/// Carries the ledger into an extended round. A catfish-ended round
/// restarts with one catfish already against the player; everything
/// else carries over unchanged.
pub fn apply_extension(ledger: &mut ScoreLedger, cause: EndCause) {
    if cause == EndCause::CatfishLimit {
        ledger.catfish_caught = 1;
    }
}

/// Structured result of the round that just ended, rendered by the
/// RoundOver modal.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub outcome: RoundOutcome,
    pub flowers_collected: u32,
    pub flowers_to_real_artist: u32,
    pub flowers_to_impostor: u32,
    pub catfish_caught: u32,
    pub round_number: u32,
    pub extensions_remaining: u32,
}

/// Advances the round clock while playing. The repeating cadence timer
/// accrues real time; each completion feeds one integer second to the
/// clock.
pub fn tick_round_clock(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<RoundTimer>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    timer.cadence.tick(time.delta());
    for _ in 0..timer.cadence.times_finished_this_tick() {
        if timer.clock.tick_second() {
            commands.insert_resource(EndCause::TimeExpired);
            next_state.set(GameState::RoundOver);
        }
    }
}

/// Freezes the round on entry to RoundOver: every falling object is
/// despawned before the outcome is computed, so nothing can still land
/// and corrupt the report.
pub fn finalize_round(
    mut commands: Commands,
    objects: Query<Entity, With<FallingObject>>,
    ledger: Res<ScoreLedger>,
    session: Res<RoundSession>,
) {
    for entity in &objects {
        commands.entity(entity).despawn();
    }

    commands.insert_resource(RoundReport {
        outcome: classify_outcome(&ledger),
        flowers_collected: ledger.flowers_collected,
        flowers_to_real_artist: ledger.flowers_to_real_artist(),
        flowers_to_impostor: ledger.flowers_to_impostor,
        catfish_caught: ledger.catfish_caught,
        round_number: session.round_number,
        extensions_remaining: session.extensions_remaining(),
    });
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
    fn clock_decrements_exactly_min_of_k_and_remaining() {
        let mut clock = RoundClock::new(ROUND_SECONDS);
        for _ in 0..100 {
            clock.tick_second();
        }
        assert_eq!(clock.seconds_remaining(), 0, "never goes below zero");
    }

    #[test]
    fn clock_expires_exactly_once() {
        let mut clock = RoundClock::new(3);
        let fired: Vec<bool> = (0..5).map(|_| clock.tick_second()).collect();
        assert_eq!(fired, vec![false, false, true, false, false]);
    }

    #[test]
    fn clock_reset_rearms_expiry() {
        let mut clock = RoundClock::new(1);
        assert!(clock.tick_second());
        clock.reset(2);
        assert_eq!(clock.seconds_remaining(), 2);
        assert!(!clock.tick_second());
        assert!(clock.tick_second(), "expiry fires again after a reset");
    }

    #[test]
    fn empty_round_goes_to_the_impostor() {
        // Scenario: the clock runs out with nothing caught. Zero is not
        // greater than zero, so the tie falls to the impostor.
        let ledger = ledger_after(0, 0);
        assert_eq!(classify_outcome(&ledger), RoundOutcome::ImpostorWin);
    }

    #[test]
    fn clean_collection_is_a_victory() {
        let ledger = ledger_after(10, 0);
        assert_eq!(classify_outcome(&ledger), RoundOutcome::Victory);
        assert_eq!(
            session_result(&ledger),
            SessionResult::Victory {
                flowers: 10,
                impostor: 0
            }
        );
    }

    #[test]
    fn one_catfish_can_still_be_a_victory_but_three_never_are() {
        let mut ledger = ledger_after(9, 1);
        assert_eq!(ledger.flowers_to_real_artist(), 6);
        assert_eq!(ledger.flowers_to_impostor, 3);
        assert_eq!(classify_outcome(&ledger), RoundOutcome::Victory);

        ledger.on_catfish_caught();
        ledger.on_catfish_caught();
        assert_eq!(classify_outcome(&ledger), RoundOutcome::ImpostorCapture);
        assert_eq!(
            session_result(&ledger),
            SessionResult::ImpostorCapture {
                flowers: 0,
                impostor: 9
            }
        );
    }

    #[test]
    fn exact_tie_reports_as_impostor_win() {
        let ledger = ScoreLedger {
            flowers_collected: 4,
            catfish_caught: 1,
            flowers_to_impostor: 2,
        };
        assert_eq!(ledger.flowers_to_real_artist(), ledger.flowers_to_impostor);
        assert_eq!(classify_outcome(&ledger), RoundOutcome::ImpostorWin);
    }

    #[test]
    fn extension_after_catfish_capture_carries_one_catfish() {
        let mut ledger = ledger_after(6, 3);
        apply_extension(&mut ledger, EndCause::CatfishLimit);
        assert_eq!(ledger.catfish_caught, 1);
        assert_eq!(ledger.flowers_collected, 6, "flowers carry over");
    }

    #[test]
    fn extension_after_expiry_carries_everything() {
        let mut ledger = ledger_after(7, 2);
        let before = ledger;
        apply_extension(&mut ledger, EndCause::TimeExpired);
        assert_eq!(ledger, before);
    }

    #[test]
    fn extensions_run_out_after_three() {
        let mut session = RoundSession::default();
        for used in 0..MAX_EXTENSIONS {
            assert!(session.can_extend(), "extension {used} should be offered");
            session.extensions_used += 1;
        }
        assert!(!session.can_extend());
        assert_eq!(session.extensions_remaining(), 0);
    }
}
