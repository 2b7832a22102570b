use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Callbacks the host implements to drive everything outside the engine:
/// painting, victory dialog, loss video, returning to the menu.
pub trait GameHooks {
    /// Called after every change to the board, with a fresh projection.
    fn on_render(&mut self, _view: &BoardView) {}

    fn on_win(&mut self) {}

    /// A mine was hit; the loss sequence is ready to be scheduled.
    fn on_loss(&mut self) {}

    /// The round is gone, the host should show its pre-game screen.
    fn on_reset(&mut self) {}
}

impl GameHooks for () {}

/// Input already translated from pointer events into board coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Reveal.
    Primary(Coord2),
    /// Toggle flag.
    Secondary(Coord2),
    /// Reveal surrounding.
    Chord(Coord2),
}

/// Next loss-sequence step the host should run after `delay`, presenting `token`.
#[derive(Clone, Debug)]
pub struct ScheduledStep {
    pub token: CancellationToken,
    pub delay: Duration,
}

#[derive(Debug)]
struct Round {
    config: RoundConfig,
    session: GameSession,
    token: CancellationToken,
    loss: Option<LossSequence>,
}

/// Owns at most one round at a time and routes host input to it.
#[derive(Debug)]
pub struct GameController<H> {
    hooks: H,
    round: Option<Round>,
}

impl<H: GameHooks> GameController<H> {
    pub fn new(hooks: H) -> Self {
        Self { hooks, round: None }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.round.as_ref().map(|round| &round.session)
    }

    pub fn config(&self) -> Option<&RoundConfig> {
        self.round.as_ref().map(|round| &round.config)
    }

    pub fn view(&self) -> Option<BoardView> {
        self.round
            .as_ref()
            .map(|round| BoardView::from_session(&round.session, round.config.cell_size))
    }

    /// Starts a round on a randomly generated board.
    pub fn start_round(&mut self, config: RoundConfig, seed: u64) -> Result<()> {
        self.start_round_with(config, RandomBoardGenerator::new(seed))
    }

    /// Starts a round, discarding the current one. On error nothing changes.
    pub fn start_round_with(
        &mut self,
        config: RoundConfig,
        generator: impl BoardGenerator,
    ) -> Result<()> {
        config.validate().inspect_err(|err| {
            log::warn!("Rejected round configuration {:?}: {}", config, err);
        })?;
        let session = GameSession::generate(config.board_spec(), generator)?;
        if session.spec() != config.board_spec() {
            return Err(GameError::InvalidBoardShape);
        }

        self.abandon_round();
        log::info!(
            "Round started: {} ({}x{}, {} mines)",
            config.mode,
            session.board().cols(),
            session.board().rows(),
            session.board().mine_count()
        );
        self.round = Some(Round {
            config,
            session,
            token: CancellationToken::new(),
            loss: None,
        });
        self.render();
        Ok(())
    }

    /// Drops the current round and sends the host back to its pre-game screen.
    pub fn reset(&mut self) {
        self.abandon_round();
        self.hooks.on_reset();
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Result<bool> {
        Ok(match event {
            InputEvent::Primary(coords) => self.on_primary_activate(coords)?.has_update(),
            InputEvent::Secondary(coords) => self.on_secondary_activate(coords)?.has_update(),
            InputEvent::Chord(coords) => self.on_chord_activate(coords)?.has_update(),
        })
    }

    pub fn on_primary_activate(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let Some(round) = self.round.as_mut() else {
            return Ok(RevealOutcome::NoChange);
        };
        let outcome = round.session.reveal(coords)?;
        self.after_reveal(outcome);
        Ok(outcome)
    }

    pub fn on_secondary_activate(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let Some(round) = self.round.as_mut() else {
            return Ok(MarkOutcome::NoChange);
        };
        let outcome = round.session.toggle_flag(coords)?;
        if outcome.has_update() {
            self.render();
        }
        Ok(outcome)
    }

    pub fn on_chord_activate(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let Some(round) = self.round.as_mut() else {
            return Ok(RevealOutcome::NoChange);
        };
        let outcome = round.session.reveal_surrounding(coords)?;
        self.after_reveal(outcome);
        Ok(outcome)
    }

    /// The step the host should schedule next, if a loss sequence is running.
    pub fn next_loss_step(&self) -> Option<ScheduledStep> {
        let round = self.round.as_ref()?;
        let loss = round.loss.as_ref()?;
        (!loss.is_finished()).then(|| ScheduledStep {
            token: loss.token().clone(),
            delay: loss.delay(),
        })
    }

    /// Runs one scheduled loss-sequence step. Steps scheduled by an earlier round
    /// are refused without touching the current board. The final step resets the
    /// round.
    pub fn advance_loss_sequence(&mut self, token: &CancellationToken) -> LossStep {
        if token.is_cancelled() {
            log::debug!("Dropping loss step from a cancelled round");
            return LossStep::Cancelled;
        }
        let Some(round) = self.round.as_mut() else {
            return LossStep::Cancelled;
        };
        if !round.token.same_round(token) {
            log::debug!("Dropping loss step from another round");
            return LossStep::Cancelled;
        }
        let Some(loss) = round.loss.as_mut() else {
            return LossStep::Exhausted;
        };

        let step = loss.advance(&mut round.session);
        match step {
            LossStep::Detonated(_) => self.render(),
            LossStep::Finished(_) => {
                self.render();
                self.reset();
            }
            LossStep::Cancelled | LossStep::Exhausted => {}
        }
        step
    }

    fn after_reveal(&mut self, outcome: RevealOutcome) {
        if !outcome.has_update() {
            return;
        }
        self.render();

        match outcome {
            RevealOutcome::Won => self.hooks.on_win(),
            RevealOutcome::HitMine => {
                if let Some(round) = self.round.as_mut() {
                    round.loss = Some(LossSequence::new(
                        &round.session,
                        round.token.clone(),
                        round.config.timing.mine_reveal_delay(),
                    ));
                }
                self.hooks.on_loss();
            }
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }
    }

    fn render(&mut self) {
        if let Some(round) = &self.round {
            let view = BoardView::from_session(&round.session, round.config.cell_size);
            self.hooks.on_render(&view);
        }
    }

    fn abandon_round(&mut self) {
        if let Some(round) = self.round.take() {
            round.token.cancel();
            log::info!("Round ended with status {:?}", round.session.status());
        }
    }
}
