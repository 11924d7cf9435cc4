use gridpath_core::{Point, Role};

/// A role change the engine made to the grid during a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEvent {
    pub pos: Point,
    pub role: Role,
}

/// What the engine should do after notifying an observer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Continue,
    /// End the run now with [`SearchOutcome::Cancelled`](crate::SearchOutcome::Cancelled).
    Stop,
}

/// Receives every [`StepEvent`] of a run, typically to redraw.
///
/// The observer only ever sees events by value, so it cannot reach into
/// the engine's cost maps or frontier. Closures `FnMut(StepEvent) -> Flow`
/// implement this trait.
pub trait StepObserver {
    fn on_step(&mut self, event: StepEvent) -> Flow;
}

impl<F: FnMut(StepEvent) -> Flow> StepObserver for F {
    #[inline]
    fn on_step(&mut self, event: StepEvent) -> Flow {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    #[inline]
    fn on_step(&mut self, _event: StepEvent) -> Flow {
        Flow::Continue
    }
}

/// Observer that stores every event it sees.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<StepEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events that set `role`, in emission order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = Point> + '_ {
        self.events
            .iter()
            .filter(move |e| e.role == role)
            .map(|e| e.pos)
    }
}

impl StepObserver for EventLog {
    fn on_step(&mut self, event: StepEvent) -> Flow {
        self.events.push(event);
        Flow::Continue
    }
}
