use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications for the presentation layer, always delivered together with a fresh [`Snapshot`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The grid was replaced, redraw it.
    RoundChanged,
    /// The player found the target, play the feedback animation.
    CorrectTap,
    /// The countdown ran out, offer a restart.
    GameOver,
    Restarted,
}

pub type Listener = Box<dyn FnMut(GameEvent, &Snapshot)>;

struct LoopState<G, H> {
    session: Session,
    generator: G,
    timer: Option<H>,
}

impl<G: RoundGenerator, H> LoopState<G, H> {
    fn tick(&mut self) -> (TickOutcome, Option<H>) {
        let outcome = self.session.tick(&mut self.generator);
        let released = match outcome {
            TickOutcome::Expired => self.timer.take(),
            _ => None,
        };
        (outcome, released)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.session)
    }
}

const fn tick_events(outcome: TickOutcome) -> &'static [GameEvent] {
    use GameEvent::*;
    match outcome {
        TickOutcome::Ignored => &[],
        TickOutcome::Ticked => &[RoundChanged],
        TickOutcome::Expired => &[RoundChanged, GameOver],
    }
}

const fn tap_events(outcome: TapOutcome) -> &'static [GameEvent] {
    use GameEvent::*;
    match outcome {
        TapOutcome::Ignored => &[],
        TapOutcome::Hit => &[CorrectTap, RoundChanged],
        TapOutcome::Miss => &[RoundChanged],
    }
}

fn notify(listener: &RefCell<Listener>, events: &[GameEvent], snapshot: &Snapshot) {
    let mut listener = listener.borrow_mut();
    for &event in events {
        (*listener)(event, snapshot);
    }
}

/// A session wired to its countdown timer and to the presentation layer.
///
/// The timer callback only keeps weak references to the loop, and the timer handle lives inside the loop state, so
/// the timer is released whenever the game ends, restarts, stops or the loop is dropped.
pub struct GameLoop<S: TickScheduler, G> {
    state: Rc<RefCell<LoopState<G, S::Handle>>>,
    listener: Rc<RefCell<Listener>>,
    scheduler: S,
}

impl<S, G> GameLoop<S, G>
where
    S: TickScheduler,
    G: RoundGenerator + 'static,
{
    pub fn new(
        config: GameConfig,
        mut generator: G,
        scheduler: S,
        listener: impl FnMut(GameEvent, &Snapshot) + 'static,
    ) -> Self {
        let session = Session::new(config, &mut generator);
        let listener: Listener = Box::new(listener);
        Self {
            state: Rc::new(RefCell::new(LoopState {
                session,
                generator,
                timer: None,
            })),
            listener: Rc::new(RefCell::new(listener)),
            scheduler,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().snapshot()
    }

    pub fn is_ticking(&self) -> bool {
        self.state.borrow().timer.is_some()
    }

    /// Arms the countdown. Does nothing if it is already running or the game is over.
    pub fn start(&mut self) {
        {
            let state = self.state.borrow();
            if state.timer.is_some() || state.session.is_over() {
                return;
            }
        }

        let handle = self.arm_timer();
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.timer = Some(handle);
            state.snapshot()
        };
        log::debug!("countdown started, {} left", snapshot.time_left);
        notify(&self.listener, &[GameEvent::RoundChanged], &snapshot);
    }

    pub fn tap(&mut self, index: usize) -> TapOutcome {
        let (outcome, snapshot) = {
            let mut state = self.state.borrow_mut();
            let LoopState {
                session, generator, ..
            } = &mut *state;
            let outcome = session.tap(index, generator);
            (outcome, state.snapshot())
        };
        notify(&self.listener, tap_events(outcome), &snapshot);
        outcome
    }

    /// Starts a new game with a fresh countdown, keeping the high score.
    pub fn restart(&mut self) {
        self.stop();

        {
            let mut state = self.state.borrow_mut();
            let LoopState {
                session, generator, ..
            } = &mut *state;
            session.restart(generator);
        }

        let handle = self.arm_timer();
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.timer = Some(handle);
            state.snapshot()
        };
        notify(
            &self.listener,
            &[GameEvent::Restarted, GameEvent::RoundChanged],
            &snapshot,
        );
    }

    /// Releases the countdown timer without touching the session.
    pub fn stop(&mut self) {
        let handle = self.state.borrow_mut().timer.take();
        if let Some(handle) = handle {
            log::debug!("countdown released");
            self.scheduler.cancel(handle);
        }
    }

    fn arm_timer(&mut self) -> S::Handle {
        let period = self.state.borrow().session.config().tick_period;
        let state = Rc::downgrade(&self.state);
        let listener = Rc::downgrade(&self.listener);

        self.scheduler.schedule_periodic(
            period,
            Box::new(move || {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let (outcome, released, snapshot) = {
                    let mut state = state.borrow_mut();
                    let (outcome, released) = state.tick();
                    (outcome, released, state.snapshot())
                };
                drop(released);
                if let Some(listener) = listener.upgrade() {
                    notify(&listener, tick_events(outcome), &snapshot);
                }
            }),
        )
    }
}

impl<S: TickScheduler, G> Drop for GameLoop<S, G> {
    fn drop(&mut self) {
        let handle = match self.state.try_borrow_mut() {
            Ok(mut state) => state.timer.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::time::Duration;

    type Events = Rc<RefCell<Vec<GameEvent>>>;

    fn new_loop() -> (
        GameLoop<ManualScheduler, RandomRoundGenerator>,
        ManualScheduler,
        Events,
    ) {
        let scheduler = ManualScheduler::new();
        let events: Events = Default::default();
        let game = {
            let events = events.clone();
            GameLoop::new(
                GameConfig::default(),
                RandomRoundGenerator::new(2024),
                scheduler.clone(),
                move |event, _: &Snapshot| events.borrow_mut().push(event),
            )
        };
        (game, scheduler, events)
    }

    fn matching_index(snapshot: &Snapshot) -> usize {
        snapshot
            .cells
            .iter()
            .position(|&color| color == snapshot.target)
            .unwrap()
    }

    fn missing_index(snapshot: &Snapshot) -> usize {
        snapshot
            .cells
            .iter()
            .position(|&color| color != snapshot.target)
            .unwrap()
    }

    const FULL_GAME: Duration = Duration::from_secs(45);

    #[test]
    fn start_arms_a_single_timer() {
        let (mut game, scheduler, events) = new_loop();
        assert!(!game.is_ticking());

        game.start();
        game.start();

        assert!(game.is_ticking());
        assert_eq!(scheduler.active_timers(), 1);
        assert_eq!(*events.borrow(), [GameEvent::RoundChanged]);
    }

    #[test]
    fn timer_ticks_the_countdown() {
        let (mut game, scheduler, events) = new_loop();
        game.start();
        events.borrow_mut().clear();

        scheduler.advance(Duration::from_millis(3000));

        let snapshot = game.snapshot();
        assert_eq!(snapshot.time_left, 28);
        assert_eq!(snapshot.round_number, 3);
        assert_eq!(
            *events.borrow(),
            [GameEvent::RoundChanged, GameEvent::RoundChanged]
        );
    }

    #[test]
    fn countdown_expiry_releases_timer() {
        let (mut game, scheduler, events) = new_loop();
        game.start();

        scheduler.advance(FULL_GAME * 2);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.time_left, 0);
        assert!(snapshot.game_over);
        assert!(!game.is_ticking());
        assert_eq!(scheduler.active_timers(), 0);
        assert_eq!(events.borrow().last(), Some(&GameEvent::GameOver));
        assert_eq!(
            events
                .borrow()
                .iter()
                .filter(|&&e| e == GameEvent::GameOver)
                .count(),
            1
        );
    }

    #[test]
    fn taps_emit_feedback_and_redraw() {
        let (mut game, _scheduler, events) = new_loop();
        game.start();
        events.borrow_mut().clear();

        let hit = game.tap(matching_index(&game.snapshot()));
        let miss = game.tap(missing_index(&game.snapshot()));

        assert_eq!((hit, miss), (TapOutcome::Hit, TapOutcome::Miss));
        assert_eq!(
            *events.borrow(),
            [
                GameEvent::CorrectTap,
                GameEvent::RoundChanged,
                GameEvent::RoundChanged
            ]
        );
        assert_eq!(game.snapshot().score, 1);
    }

    #[test]
    fn taps_after_game_over_are_silent() {
        let (mut game, scheduler, events) = new_loop();
        game.start();
        scheduler.advance(FULL_GAME);
        events.borrow_mut().clear();
        let frozen = game.snapshot();

        assert_eq!(game.tap(matching_index(&frozen)), TapOutcome::Ignored);
        assert_eq!(scheduler.fire(), 0);
        assert_eq!(game.snapshot(), frozen);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn restart_rearms_timer_and_keeps_high_score() {
        let (mut game, scheduler, events) = new_loop();
        game.start();
        game.tap(matching_index(&game.snapshot()));
        scheduler.advance(FULL_GAME);
        events.borrow_mut().clear();

        game.restart();

        let snapshot = game.snapshot();
        assert_eq!(
            (snapshot.score, snapshot.high_score, snapshot.time_left),
            (0, 1, 30)
        );
        assert!(!snapshot.game_over);
        assert_eq!(scheduler.active_timers(), 1);
        assert_eq!(
            *events.borrow(),
            [GameEvent::Restarted, GameEvent::RoundChanged]
        );

        scheduler.advance(Duration::from_millis(1500));
        assert_eq!(game.snapshot().time_left, 29);
    }

    #[test]
    fn restart_while_running_replaces_timer() {
        let (mut game, scheduler, _events) = new_loop();
        game.start();
        scheduler.advance(Duration::from_millis(1500));

        game.restart();
        scheduler.advance(Duration::from_millis(1500));

        assert_eq!(scheduler.active_timers(), 1);
        assert_eq!(game.snapshot().time_left, 29);
    }

    #[test]
    fn stop_freezes_the_countdown() {
        let (mut game, scheduler, _events) = new_loop();
        game.start();

        game.stop();
        scheduler.advance(FULL_GAME);

        assert_eq!(game.snapshot().time_left, 30);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn dropping_the_loop_releases_timer() {
        let (mut game, scheduler, events) = new_loop();
        game.start();
        events.borrow_mut().clear();

        drop(game);

        assert_eq!(scheduler.active_timers(), 0);
        assert_eq!(scheduler.advance(FULL_GAME), 0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn classic_scenario_through_the_timer() {
        let (mut game, scheduler, _events) = new_loop();
        game.start();

        game.tap(matching_index(&game.snapshot()));
        let snapshot = game.snapshot();
        assert_eq!((snapshot.score, snapshot.high_score), (1, 1));

        game.tap(missing_index(&game.snapshot()));
        let after_miss = game.snapshot();
        assert_eq!((after_miss.score, after_miss.high_score), (1, 1));
        assert_eq!(after_miss.round_number, snapshot.round_number + 1);

        for _ in 0..30 {
            scheduler.advance(Duration::from_millis(1500));
        }
        assert_eq!(game.snapshot().time_left, 0);
        assert!(game.snapshot().game_over);

        game.restart();
        let snapshot = game.snapshot();
        assert_eq!(
            (snapshot.score, snapshot.time_left, snapshot.high_score),
            (0, 30, 1)
        );
        assert!(!snapshot.game_over);
    }
}
