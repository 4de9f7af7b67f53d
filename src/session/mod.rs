//! Round state machine for the frog-feeding game.
//!
//! A session owns one round at a time: a roster of hungry frogs, a menu of
//! foods, a countdown, and the food currently sitting on the tray. The player
//! reveals a food drawn from the remaining frogs' cravings and delivers it to
//! a frog before the timer runs out. Everything visual goes through the
//! [`Stage`] boundary so the rules stay runnable under plain `cargo test`.
//!
//! Reveals and deliveries suspend on stage animations. While either is in
//! flight its flag blocks the other operation, and an epoch counter lets a
//! resumed animation detect that its round has been superseded in the
//! meantime.

use std::cell::RefCell;
use std::collections::HashSet;
use std::future::Future;

pub mod roster;

/// Round length in whole seconds.
pub const ROUND_SECONDS: u32 = 60;

// --- Data model ---------------------------------------------------------------

/// A character with exactly one craving. Satisfied once fed the right food.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frog {
    pub id: &'static str,
    pub name: &'static str,
    /// Id of the one food this frog will accept.
    pub food: &'static str,
}

/// A deliverable good shown on the tray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Food {
    pub id: &'static str,
    pub label: &'static str,
    pub glyph: &'static str,
}

/// Message flavour for transient player feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Error,
}

/// Terminal report handed to the stage when a round ends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoundSummary {
    pub won: bool,
    pub fed: usize,
    pub roster: usize,
    pub mistakes: u32,
}

// --- Stage boundary -----------------------------------------------------------

/// Presentation collaborator. The session never touches the page directly;
/// it renders, animates, and announces through this trait only.
///
/// The two `play_*` methods are the round's suspension points. Implementations
/// resolve when the corresponding animation settles; a headless stage may
/// simply resolve immediately.
pub trait Stage {
    fn render_hud(&self, fed: usize, mistakes: u32, seconds_left: u32);
    fn show_message(&self, text: &str, tone: Tone);
    /// Mark a satisfied frog on screen.
    fn frog_fed(&self, frog: &Frog);
    fn round_started(&self);
    fn round_over(&self, summary: &RoundSummary);
    fn play_reveal(&self, food: Option<&'static Food>) -> impl Future<Output = ()>;
    fn play_delivery(&self, food: &'static Food, frog: &'static Frog) -> impl Future<Output = ()>;
}

// --- Session state ------------------------------------------------------------

/// One game session. Construct once, then [`begin`](Session::begin) resets it
/// for every fresh round; stale state from a superseded round is discarded
/// wholesale.
pub struct Session {
    roster: &'static [Frog],
    menu: &'static [Food],
    opening: &'static str,
    fed: HashSet<&'static str>,
    mistakes: u32,
    seconds_left: u32,
    revealed: Option<&'static str>,
    running: bool,
    revealing: bool,
    delivering: bool,
    epoch: u64,
}

impl Session {
    /// `opening` is the food forced onto the tray at round start so the first
    /// reveal never depends on the draw.
    pub fn new(roster: &'static [Frog], menu: &'static [Food], opening: &'static str) -> Self {
        Self {
            roster,
            menu,
            opening,
            fed: HashSet::new(),
            mistakes: 0,
            seconds_left: ROUND_SECONDS,
            revealed: None,
            running: false,
            revealing: false,
            delivering: false,
            epoch: 0,
        }
    }

    /// Reset for a fresh round. Returns `false` (and changes nothing) while a
    /// round is still running; restarting only makes sense from idle or a
    /// finished round.
    pub fn begin(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.epoch += 1;
        self.fed.clear();
        self.mistakes = 0;
        self.seconds_left = ROUND_SECONDS;
        self.revealed = None;
        self.revealing = false;
        self.delivering = false;
        self.running = true;
        true
    }

    fn finish(&mut self, won: bool) -> RoundSummary {
        self.running = false;
        self.revealing = false;
        self.delivering = false;
        RoundSummary {
            won,
            fed: self.fed.len(),
            roster: self.roster.len(),
            mistakes: self.mistakes,
        }
    }

    /// Desired foods of every frog still waiting. Duplicates stay in: a food
    /// craved by two hungry frogs is drawn twice as often, which keeps the
    /// tray stocked in proportion to remaining demand.
    pub fn candidate_foods(&self) -> Vec<&'static str> {
        self.roster
            .iter()
            .filter(|f| !self.fed.contains(f.id))
            .map(|f| f.food)
            .collect()
    }

    fn draw_candidate(&self) -> Option<&'static Food> {
        let candidates = self.candidate_foods();
        if candidates.is_empty() {
            return None;
        }
        self.food(candidates[rand_index(candidates.len())])
    }

    fn frog(&self, id: &str) -> Option<&'static Frog> {
        self.roster.iter().find(|f| f.id == id)
    }

    fn food(&self, id: &str) -> Option<&'static Food> {
        self.menu.iter().find(|f| f.id == id)
    }

    pub fn roster(&self) -> &'static [Frog] {
        self.roster
    }

    pub fn menu(&self) -> &'static [Food] {
        self.menu
    }

    pub fn opening(&self) -> &'static str {
        self.opening
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fed_count(&self) -> usize {
        self.fed.len()
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    /// Food currently on the tray, if any.
    pub fn revealed(&self) -> Option<&'static str> {
        self.revealed
    }
}

// --- Round operations ---------------------------------------------------------
//
// Operations take the session behind a `RefCell` and are careful to drop the
// borrow before every suspension point, so the countdown tick can interleave
// freely with an in-flight animation.

fn render_hud<S: Stage>(session: &RefCell<Session>, stage: &S) {
    let (fed, mistakes, left) = {
        let s = session.borrow();
        (s.fed.len(), s.mistakes, s.seconds_left)
    };
    stage.render_hud(fed, mistakes, left);
}

/// Start a round: reset state, then put the fixed opening food on the tray.
/// A no-op while a round is already running. The caller drives the countdown
/// by invoking [`tick`] once per elapsed second.
pub async fn start<S: Stage>(session: &RefCell<Session>, stage: &S) -> bool {
    if !session.borrow_mut().begin() {
        return false;
    }
    stage.round_started();
    render_hud(session, stage);
    stage.show_message("Feed the frogs.", Tone::Normal);
    let opening = session.borrow().opening();
    reveal(session, stage, Some(opening)).await;
    true
}

/// Player-facing "next food" action: guarded like [`reveal`], with a tray
/// message on top.
pub async fn roll<S: Stage>(session: &RefCell<Session>, stage: &S) {
    {
        let s = session.borrow();
        if !s.running || s.revealing || s.delivering {
            return;
        }
    }
    stage.show_message("The tray is open. Feed a frog.", Tone::Normal);
    reveal(session, stage, None).await;
}

/// Put the next food on the tray. With no `forced` id the pick is uniform
/// over the demand-weighted candidate list; an empty list (everyone fed)
/// clears the tray instead. Rejected silently while not running or while a
/// reveal or delivery is already in flight.
pub async fn reveal<S: Stage>(session: &RefCell<Session>, stage: &S, forced: Option<&str>) {
    let (epoch, food) = {
        let mut s = session.borrow_mut();
        if !s.running || s.revealing || s.delivering {
            return;
        }
        let food = match forced {
            Some(id) => match s.food(id) {
                Some(f) => Some(f),
                // Unknown id from outside; decline rather than show a blank.
                None => return,
            },
            None => s.draw_candidate(),
        };
        s.revealing = true;
        (s.epoch, food)
    };
    stage.play_reveal(food).await;
    let mut s = session.borrow_mut();
    if s.epoch != epoch {
        return;
    }
    s.revealing = false;
    if s.running {
        s.revealed = food.map(|f| f.id);
    }
}

enum Gate {
    Go {
        epoch: u64,
        frog: &'static Frog,
        food: &'static Food,
    },
    Message(&'static str),
    Ignore,
}

enum Outcome {
    Won(RoundSummary),
    Fed,
    Missed,
}

/// Attempt to feed `frog_id` the food on the tray. Precondition failures are
/// never fatal: they either decline silently or leave a message, and mutate
/// nothing. A valid attempt suspends on the flight animation and settles the
/// outcome afterwards, unless the round got superseded or ended meanwhile.
pub async fn deliver<S: Stage>(session: &RefCell<Session>, stage: &S, frog_id: &str) {
    let gate = {
        let mut s = session.borrow_mut();
        if !s.running || s.revealing || s.delivering {
            Gate::Ignore
        } else if let Some(food_id) = s.revealed {
            if s.fed.contains(frog_id) {
                Gate::Message("That frog is already full.")
            } else {
                match (s.frog(frog_id), s.food(food_id)) {
                    (Some(frog), Some(food)) => {
                        s.delivering = true;
                        Gate::Go {
                            epoch: s.epoch,
                            frog,
                            food,
                        }
                    }
                    _ => Gate::Ignore,
                }
            }
        } else {
            Gate::Message("Open the tray first, then pick a frog.")
        }
    };

    let (epoch, frog, food) = match gate {
        Gate::Ignore => return,
        Gate::Message(text) => {
            stage.show_message(text, Tone::Normal);
            return;
        }
        Gate::Go { epoch, frog, food } => (epoch, frog, food),
    };

    stage.show_message(
        &format!("{} flies over to {}...", food.label, frog.name),
        Tone::Normal,
    );
    stage.play_delivery(food, frog).await;

    let outcome = {
        let mut s = session.borrow_mut();
        if s.epoch != epoch {
            // A newer round owns the state now; this flight never happened.
            return;
        }
        s.delivering = false;
        if !s.running {
            return;
        }
        if frog.food == food.id {
            s.fed.insert(frog.id);
            if s.fed.len() == s.roster.len() {
                Outcome::Won(s.finish(true))
            } else {
                Outcome::Fed
            }
        } else {
            s.mistakes += 1;
            Outcome::Missed
        }
    };

    match outcome {
        Outcome::Won(summary) => {
            stage.frog_fed(frog);
            stage.show_message(
                &format!("{} got the {}. Lovely.", frog.name, food.label),
                Tone::Normal,
            );
            render_hud(session, stage);
            stage.round_over(&summary);
        }
        Outcome::Fed => {
            stage.frog_fed(frog);
            stage.show_message(
                &format!("{} got the {}. Lovely.", frog.name, food.label),
                Tone::Normal,
            );
            render_hud(session, stage);
            reveal(session, stage, None).await;
        }
        Outcome::Missed => {
            stage.show_message("The frog croaks back: blegh.", Tone::Error);
            render_hud(session, stage);
            reveal(session, stage, None).await;
        }
    }
}

/// One countdown step. Decrements the clock, refreshes the HUD, and declares
/// the timeout once the clock hits zero. Returns `false` when the round is
/// over so the caller can stop its timer. Never touches fed frogs or the
/// mistake count.
pub fn tick<S: Stage>(session: &RefCell<Session>, stage: &S) -> bool {
    let expired = {
        let mut s = session.borrow_mut();
        if !s.running {
            return false;
        }
        s.seconds_left = s.seconds_left.saturating_sub(1);
        s.seconds_left == 0
    };
    render_hud(session, stage);
    if expired {
        let summary = session.borrow_mut().finish(false);
        stage.round_over(&summary);
        return false;
    }
    true
}

// --- Randomness ---------------------------------------------------------------

#[cfg(feature = "rng")]
fn rand_index(len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let mut buf = [0u8; 4];
    if getrandom::getrandom(&mut buf).is_err() {
        return 0;
    }
    u32::from_le_bytes(buf) as usize % len
}

// Time-seeded linear transform fallback (not crypto secure, fine for a draw).
#[cfg(not(feature = "rng"))]
fn rand_index(len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    (now as u64 as usize)
        .wrapping_mul(1664525)
        .wrapping_add(1013904223)
        % len
}

// --- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::task::noop_waker;
    use std::task::{Context, Poll};

    static TEST_FROGS: &[Frog] = &[
        Frog {
            id: "a",
            name: "Frog A",
            food: "x",
        },
        Frog {
            id: "b",
            name: "Frog B",
            food: "y",
        },
    ];

    static TEST_FOODS: &[Food] = &[
        Food {
            id: "x",
            label: "Crumble",
            glyph: "X",
        },
        Food {
            id: "y",
            label: "Cocoa",
            glyph: "Y",
        },
    ];

    /// Records every stage call as a line; `play_delivery` optionally parks
    /// on a oneshot so tests can hold a flight open and poke the session
    /// while it is in the air.
    struct RecordingStage {
        calls: RefCell<Vec<String>>,
        delivery_gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl RecordingStage {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                delivery_gate: RefCell::new(None),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Stage for RecordingStage {
        fn render_hud(&self, fed: usize, mistakes: u32, seconds_left: u32) {
            self.calls
                .borrow_mut()
                .push(format!("hud {fed} {mistakes} {seconds_left}"));
        }

        fn show_message(&self, text: &str, tone: Tone) {
            self.calls.borrow_mut().push(format!("msg {tone:?} {text}"));
        }

        fn frog_fed(&self, frog: &Frog) {
            self.calls.borrow_mut().push(format!("fed {}", frog.id));
        }

        fn round_started(&self) {
            self.calls.borrow_mut().push("started".into());
        }

        fn round_over(&self, summary: &RoundSummary) {
            self.calls.borrow_mut().push(format!(
                "over won={} fed={} mistakes={}",
                summary.won, summary.fed, summary.mistakes
            ));
        }

        fn play_reveal(&self, food: Option<&'static Food>) -> impl Future<Output = ()> {
            self.calls.borrow_mut().push(match food {
                Some(f) => format!("reveal {}", f.id),
                None => "reveal none".into(),
            });
            async {}
        }

        fn play_delivery(&self, food: &'static Food, frog: &'static Frog) -> impl Future<Output = ()> {
            self.calls
                .borrow_mut()
                .push(format!("fly {} {}", food.id, frog.id));
            let gate = self.delivery_gate.borrow_mut().take();
            async move {
                if let Some(rx) = gate {
                    let _ = rx.await;
                }
            }
        }
    }

    fn test_session() -> RefCell<Session> {
        RefCell::new(Session::new(TEST_FROGS, TEST_FOODS, "x"))
    }

    #[test]
    fn begin_resets_and_declines_while_running() {
        let session = test_session();
        assert!(session.borrow_mut().begin());
        {
            let mut s = session.borrow_mut();
            s.fed.insert("a");
            s.mistakes = 3;
            s.seconds_left = 5;
            // Still running, so a second begin must change nothing.
            assert!(!s.begin());
            assert_eq!(s.fed.len(), 1);
            assert_eq!(s.mistakes, 3);
        }
        session.borrow_mut().running = false;
        assert!(session.borrow_mut().begin());
        let s = session.borrow();
        assert!(s.fed.is_empty());
        assert_eq!(s.mistakes, 0);
        assert_eq!(s.seconds_left, ROUND_SECONDS);
        assert_eq!(s.revealed, None);
    }

    #[test]
    fn scripted_round_is_won_with_no_reveal_afterwards() {
        let session = test_session();
        let stage = RecordingStage::new();
        assert!(block_on(start(&session, &stage)));
        assert_eq!(session.borrow().revealed(), Some("x"));

        block_on(deliver(&session, &stage, "a"));
        assert_eq!(session.borrow().fed_count(), 1);
        assert_eq!(session.borrow().mistakes(), 0);
        // Only "y" remains in demand, so the follow-up draw is forced.
        assert_eq!(session.borrow().revealed(), Some("y"));

        block_on(deliver(&session, &stage, "b"));
        let s = session.borrow();
        assert!(!s.is_running());
        assert_eq!(s.fed_count(), 2);
        assert_eq!(s.mistakes(), 0);

        let calls = stage.calls();
        let over = calls
            .iter()
            .position(|c| c.starts_with("over won=true"))
            .expect("round should end won");
        assert!(
            calls[over..].iter().all(|c| !c.starts_with("reveal")),
            "no reveal may follow the winning delivery: {calls:?}"
        );
    }

    #[test]
    fn wrong_frog_counts_a_mistake_and_keeps_running() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));
        block_on(deliver(&session, &stage, "b"));
        let s = session.borrow();
        assert_eq!(s.fed_count(), 0);
        assert_eq!(s.mistakes(), 1);
        assert!(s.is_running());
        assert!(
            stage
                .calls()
                .iter()
                .any(|c| c.starts_with("msg Error")),
            "mismatch must be announced with the error tone"
        );
    }

    #[test]
    fn deliver_without_reveal_mutates_nothing() {
        let session = test_session();
        let stage = RecordingStage::new();
        session.borrow_mut().begin();
        block_on(deliver(&session, &stage, "a"));
        let s = session.borrow();
        assert_eq!(s.fed_count(), 0);
        assert_eq!(s.mistakes(), 0);
        assert_eq!(s.seconds_left(), ROUND_SECONDS);
        assert_eq!(stage.calls().len(), 1);
        assert!(stage.calls()[0].starts_with("msg Normal Open the tray"));
    }

    #[test]
    fn deliver_to_full_frog_mutates_nothing() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));
        block_on(deliver(&session, &stage, "a"));
        let before = stage.calls().len();
        block_on(deliver(&session, &stage, "a"));
        let s = session.borrow();
        assert_eq!(s.fed_count(), 1);
        assert_eq!(s.mistakes(), 0);
        assert_eq!(stage.calls().len(), before + 1);
        assert!(stage.calls().last().unwrap().contains("already full"));
    }

    #[test]
    fn deliver_while_idle_is_silent() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(deliver(&session, &stage, "a"));
        assert!(stage.calls().is_empty());
        assert_eq!(session.borrow().fed_count(), 0);
    }

    #[test]
    fn deliver_unknown_frog_is_silent() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));
        let before = stage.calls().len();
        block_on(deliver(&session, &stage, "nobody"));
        assert_eq!(stage.calls().len(), before);
        assert_eq!(session.borrow().fed_count(), 0);
        assert_eq!(session.borrow().mistakes(), 0);
    }

    #[test]
    fn reveal_declines_while_another_operation_is_in_flight() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));
        session.borrow_mut().delivering = true;
        let before = stage.calls().len();
        block_on(reveal(&session, &stage, None));
        block_on(roll(&session, &stage));
        assert_eq!(stage.calls().len(), before);
    }

    #[test]
    fn candidates_are_weighted_by_remaining_demand() {
        static SHARED_FROGS: &[Frog] = &[
            Frog {
                id: "a",
                name: "Frog A",
                food: "x",
            },
            Frog {
                id: "b",
                name: "Frog B",
                food: "x",
            },
            Frog {
                id: "c",
                name: "Frog C",
                food: "y",
            },
        ];
        let mut s = Session::new(SHARED_FROGS, TEST_FOODS, "x");
        s.begin();
        let mut candidates = s.candidate_foods();
        candidates.sort_unstable();
        assert_eq!(candidates, vec!["x", "x", "y"]);
        s.fed.insert("a");
        assert_eq!(s.candidate_foods(), vec!["x", "y"]);
    }

    #[test]
    fn draw_never_picks_a_fed_frogs_food() {
        let session = test_session();
        session.borrow_mut().begin();
        session.borrow_mut().fed.insert("a");
        for _ in 0..50 {
            let drawn = session.borrow().draw_candidate();
            assert_eq!(drawn.map(|f| f.id), Some("y"));
        }
    }

    #[test]
    fn reveal_clears_the_tray_once_everyone_is_fed() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));
        {
            let mut s = session.borrow_mut();
            s.fed.insert("a");
            s.fed.insert("b");
        }
        block_on(reveal(&session, &stage, None));
        assert_eq!(session.borrow().revealed(), None);
        assert_eq!(stage.calls().last().unwrap(), "reveal none");
    }

    #[test]
    fn countdown_expiry_times_the_round_out() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));
        block_on(deliver(&session, &stage, "a"));
        for _ in 0..ROUND_SECONDS - 1 {
            assert!(tick(&session, &stage));
        }
        assert!(!tick(&session, &stage));
        let s = session.borrow();
        assert!(!s.is_running());
        assert_eq!(s.fed_count(), 1);
        assert!(
            stage
                .calls()
                .iter()
                .any(|c| c == "over won=false fed=1 mistakes=0"),
            "a strict subset at expiry is a timeout, not a win: {:?}",
            stage.calls()
        );
        drop(s);
        // Expired rounds ignore further ticks.
        assert!(!tick(&session, &stage));
    }

    #[test]
    fn tick_is_a_noop_while_idle() {
        let session = test_session();
        let stage = RecordingStage::new();
        assert!(!tick(&session, &stage));
        assert!(stage.calls().is_empty());
        assert_eq!(session.borrow().seconds_left(), ROUND_SECONDS);
    }

    #[test]
    fn delivery_resolving_after_a_new_start_is_ignored() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));

        let (tx, rx) = oneshot::channel();
        stage.delivery_gate.borrow_mut().replace(rx);
        let mut flight = Box::pin(deliver(&session, &stage, "a"));
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert!(flight.as_mut().poll(&mut cx).is_pending());
        assert!(session.borrow().delivering);

        // Time out the old round, then supersede it while the food is in the air.
        session.borrow_mut().seconds_left = 1;
        assert!(!tick(&session, &stage));
        block_on(start(&session, &stage));

        tx.send(()).unwrap();
        assert!(matches!(flight.as_mut().poll(&mut cx), Poll::Ready(())));
        let s = session.borrow();
        assert!(s.is_running());
        assert_eq!(s.fed_count(), 0);
        assert_eq!(s.mistakes(), 0);
        assert!(!s.delivering);
    }

    #[test]
    fn delivery_resolving_after_a_timeout_scores_nothing() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));

        let (tx, rx) = oneshot::channel();
        stage.delivery_gate.borrow_mut().replace(rx);
        let mut flight = Box::pin(deliver(&session, &stage, "a"));
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert!(flight.as_mut().poll(&mut cx).is_pending());

        session.borrow_mut().seconds_left = 1;
        assert!(!tick(&session, &stage));

        tx.send(()).unwrap();
        assert!(matches!(flight.as_mut().poll(&mut cx), Poll::Ready(())));
        let s = session.borrow();
        assert!(!s.is_running());
        assert_eq!(s.fed_count(), 0);
        assert_eq!(s.mistakes(), 0);
        assert!(!s.delivering);
    }

    #[test]
    fn forced_reveal_with_unknown_food_is_declined() {
        let session = test_session();
        let stage = RecordingStage::new();
        block_on(start(&session, &stage));
        let before = stage.calls().len();
        block_on(reveal(&session, &stage, Some("ambrosia")));
        assert_eq!(stage.calls().len(), before);
        assert_eq!(session.borrow().revealed(), Some("x"));
        assert!(!session.borrow().revealing);
    }
}
