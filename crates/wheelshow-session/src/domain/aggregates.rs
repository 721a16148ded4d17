//! Aggregate root for the Game Session context.
//!
//! `GamePhaseController` owns the session state and every collaborator
//! (catalog, ledger, board, wheel) and is the only place that mutates
//! them. Host commands arrive through [`GamePhaseController::handle`];
//! timers fire through [`GamePhaseController::advance_to`]. Neither ever
//! blocks, and both append to the uncommitted event buffer.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;
use wheelshow_board::domain::reveal::{RevealEngine, RevealNotice, TossUpReveal};
use wheelshow_core::clock::Clock;
use wheelshow_core::command::Command;
use wheelshow_core::error::GameError;
use wheelshow_core::event::EventMetadata;
use wheelshow_core::money::Money;
use wheelshow_core::rng::DeterministicRng;
use wheelshow_core::timer::{TimerId, Timers};
use wheelshow_puzzles::domain::catalog::{IssuedPuzzle, PuzzleCatalog};
use wheelshow_puzzles::domain::puzzle::{fold_letter, is_vowel};
use wheelshow_rules::domain::ledger::ScoreLedger;
use wheelshow_rules::domain::wheel::{SpinOutcome, Wedge, WheelResolver, WheelTick};

use super::commands::{CommandOutcome, HostCommand, IgnoreReason};
use super::config::GameConfig;
use super::events::{AudioCue, CueMode, GameEvent, GameEventKind};
use super::routing::route;
use super::state::{GamePhase, SessionState, Stage};
use super::turns::TurnScheduler;

#[derive(Debug, Clone, Copy)]
enum SessionTask {
    TossUpTick,
    TossUpResume,
    BonusClock,
}

#[derive(Debug, Clone, Copy)]
enum TimerSource {
    Board,
    Wheel,
    Session,
}

/// Number of consonants shown when a toss-up starts.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn pre_reveal_count(consonants: usize, ratio: f64) -> usize {
    if consonants == 0 {
        return 0;
    }
    let share = (consonants as f64 * ratio).floor().max(0.0) as usize;
    share.clamp(1, consonants)
}

/// The aggregate root for a game show session.
#[derive(Debug)]
pub struct GamePhaseController {
    config: GameConfig,
    catalog: PuzzleCatalog,
    ledger: ScoreLedger,
    turns: TurnScheduler,
    board: RevealEngine,
    wheel: WheelResolver,
    state: SessionState,
    stage: Stage,
    guessed: BTreeSet<char>,
    bonus_consonants: usize,
    bonus_vowels: usize,
    timers: Timers<SessionTask>,
    toss_up_tick: Option<TimerId>,
    toss_up_resume: Option<TimerId>,
    bonus_clock: Option<TimerId>,
    sequence: i64,
    at_ms: u64,
    occurred_at: DateTime<Utc>,
    uncommitted_events: Vec<GameEvent>,
}

impl GamePhaseController {
    /// Seats the players and opens the setup phase.
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyRoster` for no players,
    /// `GameError::EmptyWheel` for no wedges, or `GameError::Configuration`
    /// for an invalid configuration value.
    pub fn new<I, S>(
        config: GameConfig,
        catalog: PuzzleCatalog,
        names: I,
        clock: &dyn Clock,
    ) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        let ledger = ScoreLedger::new(names)?;
        let wheel = WheelResolver::new(config.wedges.clone(), config.wheel)?;
        let board = RevealEngine::new(config.reveal);
        let turns = TurnScheduler::new(ledger.len());
        let mut controller = Self {
            config,
            catalog,
            ledger,
            turns,
            board,
            wheel,
            state: SessionState::new(),
            stage: Stage::Idle,
            guessed: BTreeSet::new(),
            bonus_consonants: 0,
            bonus_vowels: 0,
            timers: Timers::new(),
            toss_up_tick: None,
            toss_up_resume: None,
            bonus_clock: None,
            sequence: 0,
            at_ms: 0,
            occurred_at: clock.now(),
            uncommitted_events: Vec::new(),
        };
        info!(
            players = controller.ledger.len(),
            puzzles = controller.catalog.len(),
            version_hash = controller.catalog.version_hash().unwrap_or("-"),
            "session opened"
        );
        let summary = controller.catalog.summary();
        let players = controller.ledger.players().iter().map(|p| p.name.clone()).collect();
        controller.emit(GameEventKind::SetupOpened { summary, players });
        controller.emit_phase();
        controller.cue(AudioCue::Theme, CueMode::Loop);
        Ok(controller)
    }

    /// The shared session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Where the controller is inside the current phase.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Player money.
    #[must_use]
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// The puzzle board.
    #[must_use]
    pub fn board(&self) -> &RevealEngine {
        &self.board
    }

    /// The wheel.
    #[must_use]
    pub fn wheel(&self) -> &WheelResolver {
        &self.wheel
    }

    /// The puzzle list.
    #[must_use]
    pub fn catalog(&self) -> &PuzzleCatalog {
        &self.catalog
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Events produced since the last drain.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[GameEvent] {
        &self.uncommitted_events
    }

    /// Drains the event buffer.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    /// Earliest pending timer across the board, the wheel, and the session.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.board.next_deadline(),
            self.wheel.next_deadline(),
            self.timers.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Fires every timer due at or before `now_ms`, earliest first.
    pub fn advance_to(&mut self, now_ms: u64, clock: &dyn Clock, rng: &mut dyn DeterministicRng) {
        while let Some((source, due)) = self.earliest_due(now_ms) {
            self.stamp(due, clock);
            match source {
                TimerSource::Board => self.on_board_due(due),
                TimerSource::Wheel => self.on_wheel_due(due),
                TimerSource::Session => self.on_session_due(due, rng),
            }
        }
    }

    /// Applies a host command at `now_ms`. Timers due by then fire first.
    /// A command that does not fit the current phase leaves the session
    /// unchanged and is reported as ignored.
    pub fn handle(
        &mut self,
        command: &HostCommand,
        now_ms: u64,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> CommandOutcome {
        self.advance_to(now_ms, clock, rng);
        self.stamp(now_ms, clock);
        let outcome = self.dispatch(command, now_ms, rng);
        if let CommandOutcome::Ignored(reason) = outcome {
            warn!(
                command = command.command_type(),
                ?reason,
                phase = ?self.state.phase,
                stage = ?self.stage,
                "command ignored"
            );
            self.emit(GameEventKind::CommandIgnored {
                command: command.command_type().to_owned(),
                reason,
            });
        }
        outcome
    }

    fn dispatch(
        &mut self,
        command: &HostCommand,
        now_ms: u64,
        rng: &mut dyn DeterministicRng,
    ) -> CommandOutcome {
        match command {
            HostCommand::AdvancePuzzle => self.advance_puzzle(now_ms),
            HostCommand::StartTossUp => self.start_toss_up(now_ms, rng),
            HostCommand::RequestSpin => self.request_spin(now_ms, rng),
            HostCommand::GuessLetter(letter) => self.guess_letter(*letter, now_ms),
            HostCommand::RequestSolve => self.request_solve(),
            HostCommand::AdjudicateSolve { correct, player } => {
                self.adjudicate(*correct, *player, now_ms)
            }
            HostCommand::SetTurn(player) => self.set_turn(*player),
            HostCommand::OverrideScore {
                player,
                round,
                total,
            } => self.override_score(*player, *round, *total),
            HostCommand::Directional(direction) => {
                match route(self.state.phase, self.stage, *direction) {
                    Some(routed) => {
                        debug!(?direction, command = routed.command_type(), "remote routed");
                        self.dispatch(&routed, now_ms, rng)
                    }
                    None => CommandOutcome::Ignored(IgnoreReason::NoRouteForInput),
                }
            }
        }
    }

    // --- puzzles ---

    fn advance_puzzle(&mut self, now_ms: u64) -> CommandOutcome {
        if self.state.phase != GamePhase::Setup && self.stage != Stage::RoundOver {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        }
        if self.state.phase == GamePhase::Setup {
            self.cue(AudioCue::Theme, CueMode::Stop);
        }
        if self.catalog.is_exhausted() {
            info!("every puzzle has been played");
            self.game_over();
            return CommandOutcome::Applied;
        }
        let issued = self.catalog.next();
        self.load_puzzle(&issued, now_ms);
        CommandOutcome::Applied
    }

    fn load_puzzle(&mut self, issued: &IssuedPuzzle, now_ms: u64) {
        self.cancel_session_timers();
        self.wheel.halt();
        self.guessed.clear();
        self.bonus_consonants = 0;
        self.bonus_vowels = 0;
        let phase = GamePhase::from(issued.puzzle.kind);
        self.state.phase = phase;
        self.state.puzzle_index = Some(issued.index);
        self.state.last_spin_value = None;
        self.board.load(Arc::clone(&issued.puzzle), now_ms);
        info!(
            index = issued.index,
            ?phase,
            category = %issued.puzzle.category,
            "puzzle drawn"
        );

        if phase != GamePhase::TossUp {
            self.state.round_number += 1;
        }
        self.emit_phase();
        self.cue(AudioCue::PuzzleReveal, CueMode::Play);
        self.emit_board();

        match phase {
            GamePhase::TossUp => {
                self.state.player_index = None;
                self.set_stage(Stage::TossUpAwaitingStart);
            }
            GamePhase::Main | GamePhase::FinalSpin => {
                if phase == GamePhase::Main {
                    self.ledger.reset_round();
                }
                self.ledger.clear_spins();
                self.turns.begin_round(&mut self.state);
                self.emit_scores();
                self.emit_turn();
                self.set_stage(Stage::AwaitingSpin);
            }
            GamePhase::BonusRound => {
                let contestant = self.ledger.leader().unwrap_or(0);
                self.turns.set_turn(&mut self.state, contestant);
                self.emit_contestant(contestant);
                self.emit_turn();
                self.cue(AudioCue::BonusChoose, CueMode::Play);
                let given = self.config.given_letters();
                self.board.reveal_letters_now(&given);
                self.guessed.extend(given);
                self.emit_board();
                self.set_stage(Stage::BonusChoosing);
                if self.bonus_choices_done() {
                    debug!("no bonus letters left to choose");
                    self.start_bonus_countdown(now_ms);
                }
            }
            GamePhase::Setup | GamePhase::GameOver => {}
        }
    }

    fn game_over(&mut self) {
        self.cancel_session_timers();
        self.wheel.halt();
        self.state.phase = GamePhase::GameOver;
        self.state.last_spin_value = None;
        self.emit_phase();
        self.set_stage(Stage::Idle);
        let standings = self.ledger.standings();
        info!(
            winner = standings.first().map_or("-", |s| s.name.as_str()),
            "game over"
        );
        self.emit(GameEventKind::GameOver { standings });
        self.cue(AudioCue::Theme, CueMode::Play);
    }

    // --- toss-up ---

    fn start_toss_up(&mut self, now_ms: u64, rng: &mut dyn DeterministicRng) -> CommandOutcome {
        if self.state.phase != GamePhase::TossUp || self.stage != Stage::TossUpAwaitingStart {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        }
        self.cue(AudioCue::TossUp, CueMode::Loop);
        let mut pool = self.board.hidden_consonants();
        let count = pre_reveal_count(pool.len(), self.config.toss_up.pre_reveal_ratio);
        let mut chosen = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(i) = rng.pick_index(pool.len()) else {
                break;
            };
            chosen.push(pool.remove(i));
        }
        let revealed = self.board.reveal_letters_now(&chosen);
        debug!(?chosen, revealed, "toss-up pre-reveal");
        self.emit_board();
        self.set_stage(Stage::TossUpRunning);
        self.toss_up_tick = Some(
            self.timers
                .schedule_at(now_ms + self.config.toss_up.tick_ms, SessionTask::TossUpTick),
        );
        CommandOutcome::Applied
    }

    // --- spinning ---

    fn request_spin(&mut self, now_ms: u64, rng: &mut dyn DeterministicRng) -> CommandOutcome {
        let phase = self.state.phase;
        if phase == GamePhase::FinalSpin && self.state.last_spin_value.is_some() {
            return CommandOutcome::Ignored(IgnoreReason::FinalSpinTaken);
        }
        if !matches!(phase, GamePhase::Main | GamePhase::FinalSpin)
            || self.stage != Stage::AwaitingSpin
        {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        }
        let Some(player) = self.state.player_index else {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        };
        if self.ledger.get(player).is_some_and(|p| p.has_spun) {
            return CommandOutcome::Ignored(IgnoreReason::AlreadySpun);
        }
        if !self.wheel.spin(now_ms, rng) {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        }
        self.ledger.set_spun(player, true);
        self.set_stage(Stage::Spinning);
        CommandOutcome::Applied
    }

    fn resolve_spin(&mut self, outcome: SpinOutcome) {
        let Some(player) = self.state.player_index else {
            return;
        };
        info!(player, index = outcome.index, wedge = ?outcome.wedge, "spin resolved");
        self.emit(GameEventKind::SpinResolved {
            player,
            index: outcome.index,
            wedge: outcome.wedge,
        });
        self.state.last_spin_value = None;
        match outcome.wedge {
            Wedge::Bankrupt => {
                self.ledger.set_bankrupt(player);
                self.cue(AudioCue::Bankrupt, CueMode::Play);
                self.emit_scores();
                self.pass_turn();
                self.set_stage(Stage::AwaitingSpin);
            }
            Wedge::LoseATurn => {
                self.cue(AudioCue::Incorrect, CueMode::Play);
                self.pass_turn();
                self.set_stage(Stage::AwaitingSpin);
            }
            Wedge::Cash(value) => {
                self.state.last_spin_value = Some(value);
                if self.state.phase == GamePhase::FinalSpin {
                    self.cue(AudioCue::SpeedUp, CueMode::Play);
                }
                self.set_stage(Stage::AwaitingLetter);
            }
        }
    }

    // --- letters ---

    fn guess_letter(&mut self, letter: char, now_ms: u64) -> CommandOutcome {
        match (self.state.phase, self.stage) {
            (GamePhase::Main | GamePhase::FinalSpin, Stage::AwaitingLetter) => {
                self.guess_in_round(letter, now_ms)
            }
            (GamePhase::BonusRound, Stage::BonusChoosing) => self.guess_in_bonus(letter, now_ms),
            _ => CommandOutcome::Ignored(IgnoreReason::WrongPhase),
        }
    }

    fn guess_in_round(&mut self, letter: char, now_ms: u64) -> CommandOutcome {
        let Some(letter) = fold_letter(letter) else {
            return CommandOutcome::Ignored(IgnoreReason::NotALetter);
        };
        let Some(player) = self.state.player_index else {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        };
        if self.is_used(letter) {
            return CommandOutcome::Ignored(IgnoreReason::LetterAlreadyUsed);
        }
        let vowel = is_vowel(letter);
        let cost = self.config.vowel_cost;
        if vowel && self.ledger.get(player).is_none_or(|p| p.round_score <= cost) {
            return CommandOutcome::Ignored(IgnoreReason::VowelUnaffordable);
        }

        self.guessed.insert(letter);
        let count = self.board.guess(letter, now_ms).count();
        let earned = match (count, vowel) {
            (0, _) => Money::ZERO,
            (_, true) => -cost,
            (_, false) => self.state.last_spin_value.unwrap_or(Money::ZERO) * count,
        };
        info!(player, %letter, count, %earned, "letter guessed");
        self.emit(GameEventKind::LetterGuessed {
            player,
            letter,
            count,
            earned,
        });
        if count == 0 {
            self.cue(AudioCue::Incorrect, CueMode::Play);
        } else {
            self.ledger.add_round_money(player, earned);
            self.emit_scores();
        }
        self.emit_board();
        self.pass_turn();
        if self.state.phase == GamePhase::Main {
            self.state.last_spin_value = None;
            self.set_stage(Stage::AwaitingSpin);
        }
        CommandOutcome::Applied
    }

    fn guess_in_bonus(&mut self, letter: char, now_ms: u64) -> CommandOutcome {
        let Some(letter) = fold_letter(letter) else {
            return CommandOutcome::Ignored(IgnoreReason::NotALetter);
        };
        if self.is_used(letter) {
            return CommandOutcome::Ignored(IgnoreReason::LetterAlreadyUsed);
        }
        let (consonant_quota, vowel_quota) = (self.config.bonus.consonants, self.config.bonus.vowels);
        let vowel = is_vowel(letter);
        if (vowel && self.bonus_vowels >= vowel_quota)
            || (!vowel && self.bonus_consonants >= consonant_quota)
        {
            return CommandOutcome::Ignored(IgnoreReason::BonusQuotaFull);
        }

        if vowel {
            self.bonus_vowels += 1;
        } else {
            self.bonus_consonants += 1;
        }
        self.guessed.insert(letter);
        let count = self.board.guess(letter, now_ms).count();
        let player = self.state.player_index.unwrap_or(0);
        info!(player, %letter, count, "bonus letter chosen");
        self.emit(GameEventKind::LetterGuessed {
            player,
            letter,
            count,
            earned: Money::ZERO,
        });
        self.emit_board();

        if self.bonus_choices_done() {
            self.start_bonus_countdown(now_ms);
        }
        CommandOutcome::Applied
    }

    /// Both quotas are met, or the alphabet has nothing left to fill them.
    fn bonus_choices_done(&self) -> bool {
        let open = |vowels: bool| ('A'..='Z').any(|c| is_vowel(c) == vowels && !self.is_used(c));
        (self.bonus_consonants >= self.config.bonus.consonants || !open(false))
            && (self.bonus_vowels >= self.config.bonus.vowels || !open(true))
    }

    fn start_bonus_countdown(&mut self, now_ms: u64) {
        self.cue(AudioCue::Countdown, CueMode::Play);
        self.bonus_clock = Some(
            self.timers
                .schedule_at(now_ms + self.config.bonus.countdown_ms, SessionTask::BonusClock),
        );
        self.set_stage(Stage::BonusCountdown);
    }

    fn is_used(&self, letter: char) -> bool {
        self.guessed.contains(&letter) || self.board.revealed_letters().contains(&letter)
    }

    // --- solving ---

    fn request_solve(&mut self) -> CommandOutcome {
        match (self.state.phase, self.stage) {
            (GamePhase::TossUp, Stage::TossUpRunning | Stage::TossUpResuming) => {
                self.cancel_session_timers();
                self.cue(AudioCue::LetterReveal, CueMode::Play);
                self.set_stage(Stage::TossUpBuzzed);
            }
            (GamePhase::Main | GamePhase::FinalSpin, Stage::AwaitingSpin | Stage::AwaitingLetter) => {
                self.board.update();
                self.emit_board();
                if self.state.phase == GamePhase::FinalSpin {
                    self.cue(AudioCue::LetterReveal, CueMode::Play);
                }
                self.set_stage(Stage::SolveAttempt);
            }
            _ => return CommandOutcome::Ignored(IgnoreReason::WrongPhase),
        }
        info!(player = ?self.state.player_index, "solve requested");
        self.emit(GameEventKind::SolveRequested {
            player: self.state.player_index,
        });
        CommandOutcome::Applied
    }

    fn adjudicate(&mut self, correct: bool, player: Option<usize>, now_ms: u64) -> CommandOutcome {
        let phase = self.state.phase;
        let judging = matches!(
            (phase, self.stage),
            (GamePhase::TossUp, Stage::TossUpBuzzed)
                | (GamePhase::Main | GamePhase::FinalSpin, Stage::SolveAttempt)
                | (GamePhase::BonusRound, Stage::BonusCountdown | Stage::BonusVerdict)
        );
        if !judging {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        }
        if let Some(seat) = player {
            if !self.turns.set_turn(&mut self.state, seat) {
                return CommandOutcome::Ignored(IgnoreReason::UnknownPlayer);
            }
            self.emit_turn();
        }
        let solver = self.state.player_index.unwrap_or(0);
        self.state.player_index = Some(solver);
        info!(solver, correct, ?phase, "solve adjudicated");

        match phase {
            GamePhase::TossUp => self.judge_toss_up(correct, solver, now_ms),
            GamePhase::BonusRound => self.judge_bonus(correct, solver),
            _ => self.judge_round(correct, solver),
        }
        CommandOutcome::Applied
    }

    fn judge_toss_up(&mut self, correct: bool, solver: usize, now_ms: u64) {
        if correct {
            self.cue(AudioCue::TossUp, CueMode::Stop);
            self.cue(AudioCue::TossupSolve, CueMode::Play);
            let prize = self.current_prize();
            self.ledger.add_round_money(solver, prize);
            self.close_round(solver, true);
        } else {
            self.cue(AudioCue::Incorrect, CueMode::Play);
            self.emit(GameEventKind::SolveRejected { player: solver });
            self.set_stage(Stage::TossUpResuming);
            self.toss_up_resume = Some(self.timers.schedule_at(
                now_ms + self.config.toss_up.resume_delay_ms,
                SessionTask::TossUpResume,
            ));
        }
    }

    fn judge_round(&mut self, correct: bool, solver: usize) {
        let final_spin = self.state.phase == GamePhase::FinalSpin;
        if correct {
            self.cue(AudioCue::PuzzleSolve, CueMode::Play);
            let reset = !final_spin || self.config.final_spin_closes_like_main;
            self.close_round(solver, reset);
            if final_spin {
                self.cue(AudioCue::SpeedUp, CueMode::Stop);
                if let Some(leader) = self.ledger.leader() {
                    self.emit_contestant(leader);
                }
            }
        } else {
            self.cue(AudioCue::Incorrect, CueMode::Play);
            self.emit(GameEventKind::SolveRejected { player: solver });
            self.pass_turn();
            if final_spin && self.state.last_spin_value.is_some() {
                self.set_stage(Stage::AwaitingLetter);
            } else {
                self.state.last_spin_value = None;
                self.set_stage(Stage::AwaitingSpin);
            }
        }
    }

    fn judge_bonus(&mut self, correct: bool, solver: usize) {
        self.cancel_session_timers();
        self.cue(AudioCue::Countdown, CueMode::Stop);
        self.board.reveal_all();
        if correct {
            self.cue(AudioCue::PuzzleSolve, CueMode::Play);
            let prize = self.current_prize();
            self.ledger.add_total_money(solver, prize);
            self.emit_solved(solver);
            self.emit_scores();
        } else {
            self.cue(AudioCue::Incorrect, CueMode::Play);
            self.emit(GameEventKind::SolveRejected { player: solver });
        }
        self.emit_board();
        self.game_over();
    }

    /// Banks the solver's round money and shows the whole puzzle.
    fn close_round(&mut self, solver: usize, reset_round: bool) {
        self.cancel_session_timers();
        self.ledger.commit_round(solver);
        self.board.reveal_all();
        self.emit_board();
        self.emit_solved(solver);
        if reset_round {
            self.ledger.reset_round();
        }
        self.emit_scores();
        self.state.last_spin_value = None;
        self.set_stage(Stage::RoundOver);
    }

    fn current_prize(&self) -> Money {
        self.state
            .puzzle_index
            .and_then(|index| self.catalog.prize_value(index))
            .unwrap_or(Money::ZERO)
    }

    // --- host overrides ---

    fn set_turn(&mut self, player: usize) -> CommandOutcome {
        if matches!(self.state.phase, GamePhase::Setup | GamePhase::GameOver) {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        }
        if !self.turns.set_turn(&mut self.state, player) {
            return CommandOutcome::Ignored(IgnoreReason::UnknownPlayer);
        }
        info!(player, "turn set by host");
        self.emit_turn();
        CommandOutcome::Applied
    }

    fn override_score(&mut self, player: usize, round: Money, total: Money) -> CommandOutcome {
        if matches!(self.state.phase, GamePhase::Setup | GamePhase::GameOver) {
            return CommandOutcome::Ignored(IgnoreReason::WrongPhase);
        }
        if !self.ledger.override_score(player, round, total) {
            return CommandOutcome::Ignored(IgnoreReason::UnknownPlayer);
        }
        info!(player, %round, %total, "score overridden");
        self.emit_scores();
        CommandOutcome::Applied
    }

    fn pass_turn(&mut self) {
        self.ledger.clear_spins();
        self.turns.advance(&mut self.state);
        self.emit_turn();
    }

    // --- timers ---

    fn earliest_due(&self, now_ms: u64) -> Option<(TimerSource, u64)> {
        [
            (TimerSource::Board, self.board.next_deadline()),
            (TimerSource::Wheel, self.wheel.next_deadline()),
            (TimerSource::Session, self.timers.next_deadline()),
        ]
        .into_iter()
        .filter_map(|(source, due)| due.filter(|d| *d <= now_ms).map(|d| (source, d)))
        .min_by_key(|(_, due)| *due)
    }

    fn on_board_due(&mut self, due_ms: u64) {
        let Some(notices) = self.board.fire_due(due_ms) else {
            return;
        };
        if notices.is_empty() {
            return;
        }
        if notices
            .iter()
            .any(|n| matches!(n, RevealNotice::MarkerPlaced(_)))
        {
            self.cue(AudioCue::LetterReveal, CueMode::Play);
        }
        self.emit_board();
    }

    fn on_wheel_due(&mut self, due_ms: u64) {
        match self.wheel.fire_due(due_ms) {
            Some(WheelTick::Moved { .. }) => self.emit_wheel(),
            Some(WheelTick::Stopped(outcome)) => {
                self.emit_wheel();
                self.resolve_spin(outcome);
            }
            None => {}
        }
    }

    fn on_session_due(&mut self, due_ms: u64, rng: &mut dyn DeterministicRng) {
        let Some(fired) = self.timers.pop_due(due_ms) else {
            return;
        };
        match fired.task {
            SessionTask::TossUpTick => {
                if self.toss_up_tick != Some(fired.id) || self.stage != Stage::TossUpRunning {
                    return;
                }
                self.toss_up_tick = None;
                match self.board.toss_up_tick(rng) {
                    TossUpReveal::Revealed { .. } => {
                        self.emit_board();
                        self.toss_up_tick = Some(self.timers.schedule_at(
                            fired.due_ms + self.config.toss_up.tick_ms,
                            SessionTask::TossUpTick,
                        ));
                    }
                    TossUpReveal::Exhausted => {
                        debug!("toss-up board exhausted; ticking stopped");
                    }
                }
            }
            SessionTask::TossUpResume => {
                if self.toss_up_resume != Some(fired.id) || self.stage != Stage::TossUpResuming {
                    return;
                }
                self.toss_up_resume = None;
                self.set_stage(Stage::TossUpRunning);
                self.toss_up_tick = Some(self.timers.schedule_at(
                    fired.due_ms + self.config.toss_up.tick_ms,
                    SessionTask::TossUpTick,
                ));
            }
            SessionTask::BonusClock => {
                if self.bonus_clock != Some(fired.id) || self.stage != Stage::BonusCountdown {
                    return;
                }
                self.bonus_clock = None;
                self.cue(AudioCue::Beep, CueMode::Play);
                self.set_stage(Stage::BonusVerdict);
            }
        }
    }

    fn cancel_session_timers(&mut self) {
        self.timers.cancel_all();
        self.toss_up_tick = None;
        self.toss_up_resume = None;
        self.bonus_clock = None;
    }

    // --- events ---

    fn stamp(&mut self, at_ms: u64, clock: &dyn Clock) {
        self.at_ms = at_ms;
        self.occurred_at = clock.now();
    }

    fn emit(&mut self, kind: GameEventKind) {
        self.sequence += 1;
        // TODO: event_id uses Uuid::new_v4(), so two replays of the same
        // seed differ in ids. Draw ids from DeterministicRng instead.
        let event = GameEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                sequence_number: self.sequence,
                at_ms: self.at_ms,
                occurred_at: self.occurred_at,
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    fn set_stage(&mut self, stage: Stage) {
        if self.stage != stage {
            debug!(from = ?self.stage, to = ?stage, "stage changed");
            self.stage = stage;
            self.emit(GameEventKind::StageChanged { stage });
        }
    }

    fn cue(&mut self, cue: AudioCue, mode: CueMode) {
        self.emit(GameEventKind::CuePlayed { cue, mode });
    }

    fn emit_phase(&mut self) {
        self.emit(GameEventKind::PhaseChanged {
            phase: self.state.phase,
            puzzle_index: self.state.puzzle_index,
            round_number: self.state.round_number,
            category: self.board.puzzle().map(|p| p.category.clone()),
        });
    }

    fn emit_board(&mut self) {
        let board = self.board.snapshot();
        self.emit(GameEventKind::BoardChanged { board });
    }

    fn emit_wheel(&mut self) {
        let wheel = self.wheel.snapshot();
        self.emit(GameEventKind::WheelMoved { wheel });
    }

    fn emit_scores(&mut self) {
        let players = self.ledger.players().to_vec();
        self.emit(GameEventKind::ScoresChanged { players });
    }

    fn emit_turn(&mut self) {
        let Some(player) = self.state.player_index else {
            return;
        };
        let name = self.player_name(player);
        self.emit(GameEventKind::TurnChanged { player, name });
    }

    fn emit_contestant(&mut self, player: usize) {
        let name = self.player_name(player);
        info!(player, %name, "bonus round contestant");
        self.emit(GameEventKind::BonusContestant { player, name });
    }

    fn emit_solved(&mut self, player: usize) {
        let name = self.player_name(player);
        let total_score = self.ledger.get(player).map_or(Money::ZERO, |p| p.total_score);
        info!(player, %name, %total_score, "puzzle solved");
        self.emit(GameEventKind::PuzzleSolved {
            player,
            name,
            total_score,
        });
    }

    fn player_name(&self, player: usize) -> String {
        self.ledger
            .get(player)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }
}
