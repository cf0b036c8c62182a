//! Generic finite-state machine with one timer per state
//!
//! States are plain enums. Behaviour lives in a static table of
//! [`Handlers`] owned by the context type, so the machine itself only keeps
//! the current and previous state plus the timers.

use std::fmt::Debug;

use super::timer::TickTimer;

/// A state identifier usable as a table index
pub trait FsmState: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    fn index(self) -> usize;
}

/// Enter/update/exit callbacks of one state
pub struct Handlers<C> {
    pub enter: fn(&mut C),
    pub update: fn(&mut C),
    pub exit: fn(&mut C),
}

impl<C> Handlers<C> {
    pub fn noop(_: &mut C) {}
}

/// Implemented by the type that owns a [`StateMachine`] and its handler table
pub trait FsmContext<S: FsmState>: Sized + 'static {
    fn fsm(&self) -> &StateMachine<S>;
    fn fsm_mut(&mut self) -> &mut StateMachine<S>;
    fn handlers(state: S) -> &'static Handlers<Self>;

    /// Called after the enter handler of the new state ran
    fn on_state_change(&mut self, _from: Option<S>, _to: S) {}
}

#[derive(Debug, Clone)]
pub struct StateMachine<S: FsmState> {
    name: String,
    current: Option<S>,
    previous: Option<S>,
    timers: Vec<TickTimer>,
}

impl<S: FsmState> StateMachine<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: None,
            previous: None,
            timers: S::ALL.iter().map(|s| TickTimer::new(format!("{s:?}"))).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current(&self) -> Option<S> {
        self.current
    }

    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    pub fn is(&self, state: S) -> bool {
        self.current == Some(state)
    }

    /// Timer of the current state
    ///
    /// # Panics
    ///
    /// When the machine has not been started yet.
    pub fn timer(&self) -> &TickTimer {
        &self.timers[self.current_index()]
    }

    pub fn timer_mut(&mut self) -> &mut TickTimer {
        let index = self.current_index();
        &mut self.timers[index]
    }

    pub fn timer_of(&self, state: S) -> &TickTimer {
        &self.timers[state.index()]
    }

    fn current_index(&self) -> usize {
        match self.current {
            Some(state) => state.index(),
            None => panic!("State machine '{}' has no current state", self.name),
        }
    }
}

/// Leave the current state (if any) and enter `next`
pub fn change_state<S: FsmState, C: FsmContext<S>>(ctx: &mut C, next: S) {
    let from = ctx.fsm().current;
    if let Some(current) = from {
        log::trace!("{}: exit {:?}", ctx.fsm().name, current);
        (C::handlers(current).exit)(ctx);
    }
    let fsm = ctx.fsm_mut();
    fsm.previous = from;
    fsm.current = Some(next);
    log::info!("{}: {:?} -> {:?}", fsm.name, from, next);
    (C::handlers(next).enter)(ctx);
    ctx.on_state_change(from, next);
}

/// Run the update handler of the current state. The state timer advances
/// only if the handler did not change the state.
pub fn update_state<S: FsmState, C: FsmContext<S>>(ctx: &mut C) {
    let Some(current) = ctx.fsm().current else {
        return;
    };
    (C::handlers(current).update)(ctx);
    if ctx.fsm().current == Some(current) {
        ctx.fsm_mut().timers[current.index()].advance();
    }
}

/// Go back to the state that was active before the current one
///
/// # Panics
///
/// When there is no previous state.
pub fn resume_previous_state<S: FsmState, C: FsmContext<S>>(ctx: &mut C) {
    let Some(previous) = ctx.fsm().previous else {
        panic!("State machine '{}' has no previous state to resume", ctx.fsm().name);
    };
    log::debug!("{}: resume {:?}", ctx.fsm().name, previous);
    change_state(ctx, previous);
}
