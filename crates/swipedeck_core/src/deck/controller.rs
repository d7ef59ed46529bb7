//! Deck interaction controller.
//!
//! # Responsibility
//! - Accept pointer and button input for one deck screen.
//! - Classify releases, resolve the captured item and notify the listener.
//! - Tell the presentation layer whether to snap back or animate an exit.
//!
//! # Invariants
//! - At most one interaction is active at a time.
//! - New input is ignored while an exit animation is pending, so an item can
//!   never be resolved twice.
//! - `DeckListener::on_complete` fires once per pass through the deck, and
//!   immediately for an empty deck.

use crate::config::{ConfigError, DeckConfig};
use crate::deck::error::{DeckError, DeckResult};
use crate::deck::state::{DeckState, Tally};
use crate::gesture::classifier::{classify_with_axes, DragSample};
use crate::model::action::{SwipeAction, SwipeDirection};
use crate::model::item::{DeckItem, ItemValidationError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use uuid::Uuid;

/// Identity of one deck session, used for log correlation.
pub type SessionId = Uuid;

/// Callbacks invoked with each resolved item.
pub trait DeckListener<T> {
    fn on_accept(&mut self, item: &T);
    fn on_reject(&mut self, item: &T);

    /// Only reachable on decks with skip enabled.
    fn on_skip(&mut self, _item: &T) {}

    /// Called once when the last item is resolved.
    fn on_complete(&mut self, _tally: &Tally) {}
}

/// Listener that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<T> DeckListener<T> for NoopListener {
    fn on_accept(&mut self, _item: &T) {}
    fn on_reject(&mut self, _item: &T) {}
}

/// Listener notification captured by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEvent {
    Accepted(String),
    Rejected(String),
    Skipped(String),
    Completed(Tally),
}

/// Listener that records item ids, for callers that drain events after each
/// call (FFI, CLI replay, tests).
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Vec<DeckEvent>,
}

impl RecordingListener {
    pub fn events(&self) -> &[DeckEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<DeckEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<T: DeckItem> DeckListener<T> for RecordingListener {
    fn on_accept(&mut self, item: &T) {
        self.events.push(DeckEvent::Accepted(item.item_id().to_string()));
    }

    fn on_reject(&mut self, item: &T) {
        self.events.push(DeckEvent::Rejected(item.item_id().to_string()));
    }

    fn on_skip(&mut self, item: &T) {
        self.events.push(DeckEvent::Skipped(item.item_id().to_string()));
    }

    fn on_complete(&mut self, tally: &Tally) {
        self.events.push(DeckEvent::Completed(*tally));
    }
}

/// Instruction for the presentation layer after one controller call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeckTransition {
    /// A drag interaction is now active on the current card.
    Started,
    /// Input was dropped: an exit is pending, another interaction is active,
    /// or there is no current card.
    Ignored,
    /// Gesture stayed below thresholds; animate back to neutral.
    SnapBack,
    /// The card at `index` was resolved; animate it off-screen, then call
    /// [`DeckController::complete_exit`] after `delay`.
    Exit {
        index: usize,
        action: SwipeAction,
        direction: SwipeDirection,
        delay: Duration,
    },
}

#[derive(Debug, Clone, Copy)]
struct Interaction {
    index: usize,
    dx: f64,
    dy: f64,
}

/// Deck construction errors.
#[derive(Debug)]
pub enum DeckSetupError {
    Items(ItemValidationError),
    Config(ConfigError),
}

impl Display for DeckSetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Items(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DeckSetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Items(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ItemValidationError> for DeckSetupError {
    fn from(value: ItemValidationError) -> Self {
        Self::Items(value)
    }
}

impl From<ConfigError> for DeckSetupError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Owns one deck session: state, config, listener and interaction state.
pub struct DeckController<T: DeckItem, L: DeckListener<T>> {
    session_id: SessionId,
    state: DeckState<T>,
    config: DeckConfig,
    listener: L,
    interaction: Option<Interaction>,
    pending_exit: Option<usize>,
    completion_notified: bool,
}

impl<T: DeckItem, L: DeckListener<T>> DeckController<T, L> {
    /// Loads `items` into a new session.
    ///
    /// # Errors
    /// - Returns an error when item ids are invalid or the config fails
    ///   validation.
    pub fn new(items: Vec<T>, config: DeckConfig, listener: L) -> Result<Self, DeckSetupError> {
        config.validate()?;
        let state = DeckState::new(items)?;
        let session_id = Uuid::new_v4();
        info!(
            "event=deck_open module=deck status=ok session={} items={} skip_enabled={}",
            session_id,
            state.len(),
            config.skip_enabled
        );
        let mut deck = Self {
            session_id,
            state,
            config,
            listener,
            interaction: None,
            pending_exit: None,
            completion_notified: false,
        };
        // An empty deck is complete as soon as it is loaded.
        deck.notify_if_complete();
        Ok(deck)
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn state(&self) -> &DeckState<T> {
        &self.state
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    pub fn current(&self) -> Option<&T> {
        self.state.current()
    }

    pub fn tally(&self) -> Tally {
        self.state.tally()
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted()
    }

    pub fn is_exit_pending(&self) -> bool {
        self.pending_exit.is_some()
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction.is_some()
    }

    /// Live `(dx, dy)` of the active drag, for rotation/opacity rendering.
    pub fn live_offset(&self) -> Option<(f64, f64)> {
        self.interaction.map(|active| (active.dx, active.dy))
    }

    /// Starts a drag on the current card.
    pub fn begin_interaction(&mut self) -> DeckTransition {
        if self.pending_exit.is_some() || self.interaction.is_some() || self.is_exhausted() {
            debug!(
                "event=deck_interaction module=deck status=ignored session={} cursor={} exit_pending={}",
                self.session_id,
                self.state.cursor(),
                self.pending_exit.is_some()
            );
            return DeckTransition::Ignored;
        }
        self.interaction = Some(Interaction {
            index: self.state.cursor(),
            dx: 0.0,
            dy: 0.0,
        });
        DeckTransition::Started
    }

    /// Records the total displacement since the drag started.
    ///
    /// # Errors
    /// - `NoActiveInteraction` when no drag is active.
    pub fn update_drag(&mut self, dx: f64, dy: f64) -> DeckResult<()> {
        let active = self
            .interaction
            .as_mut()
            .ok_or(DeckError::NoActiveInteraction)?;
        active.dx = dx;
        active.dy = dy;
        Ok(())
    }

    /// Ends the drag with the release velocity and applies the verdict.
    ///
    /// # Errors
    /// - `NoActiveInteraction` when no drag is active.
    /// - `StaleItem` when the captured card is no longer current.
    pub fn end_interaction(&mut self, vx: f64, vy: f64) -> DeckResult<DeckTransition> {
        let active = self
            .interaction
            .take()
            .ok_or(DeckError::NoActiveInteraction)?;
        let sample = DragSample::new(active.dx, active.dy, vx, vy);
        let action = classify_with_axes(sample, self.config.thresholds, self.config.axes());

        if !action.is_resolving() {
            debug!(
                "event=deck_snap_back module=deck status=ok session={} cursor={}",
                self.session_id,
                self.state.cursor()
            );
            return Ok(DeckTransition::SnapBack);
        }
        self.apply(active.index, action)
    }

    /// Applies a button press as a synthetic above-threshold gesture.
    ///
    /// # Errors
    /// - `ResolveWithNone` for `SwipeAction::None`.
    /// - `SkipDisabled` for `SkipUp` on a horizontal-only deck.
    pub fn press_button(&mut self, action: SwipeAction) -> DeckResult<DeckTransition> {
        if !action.is_resolving() {
            return Err(DeckError::ResolveWithNone);
        }
        if action == SwipeAction::SkipUp && !self.config.skip_enabled {
            return Err(DeckError::SkipDisabled);
        }
        if self.pending_exit.is_some() || self.interaction.is_some() || self.is_exhausted() {
            debug!(
                "event=deck_button module=deck status=ignored session={} action={} cursor={}",
                self.session_id,
                action.as_str(),
                self.state.cursor()
            );
            return Ok(DeckTransition::Ignored);
        }
        let index = self.state.cursor();
        self.apply(index, action)
    }

    /// Marks the exit animation as finished so new input is accepted.
    ///
    /// Returns `false` when no exit was pending.
    pub fn complete_exit(&mut self) -> bool {
        self.pending_exit.take().is_some()
    }

    /// Rewinds the deck and clears interaction and completion state.
    pub fn reset(&mut self) {
        self.state.reset();
        self.interaction = None;
        self.pending_exit = None;
        self.completion_notified = false;
        info!(
            "event=deck_reset module=deck status=ok session={} items={}",
            self.session_id,
            self.state.len()
        );
        self.notify_if_complete();
    }

    fn apply(&mut self, index: usize, action: SwipeAction) -> DeckResult<DeckTransition> {
        let Some(direction) = action.exit_direction() else {
            return Err(DeckError::ResolveWithNone);
        };

        let item = self.state.resolve_at(index, action)?;
        match action {
            SwipeAction::Accept => self.listener.on_accept(item),
            SwipeAction::Reject => self.listener.on_reject(item),
            SwipeAction::SkipUp => self.listener.on_skip(item),
            SwipeAction::None => {}
        }
        info!(
            "event=deck_resolve module=deck status=ok session={} item_id={} action={} cursor={}",
            self.session_id,
            item.item_id(),
            action.as_str(),
            index + 1
        );

        self.pending_exit = Some(index);
        self.notify_if_complete();

        Ok(DeckTransition::Exit {
            index,
            action,
            direction,
            delay: self.config.exit_delay(),
        })
    }

    fn notify_if_complete(&mut self) {
        if !self.state.is_exhausted() || self.completion_notified {
            return;
        }
        let tally = self.state.tally();
        self.completion_notified = true;
        self.listener.on_complete(&tally);
        info!(
            "event=deck_complete module=deck status=ok session={} accepted={} rejected={} skipped={}",
            self.session_id, tally.accepted, tally.rejected, tally.skipped
        );
    }
}
