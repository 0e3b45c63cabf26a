/// Whether the session is reading the event queue itself.
///
/// While `Suspended` a command handler holds the I/O context; events that
/// arrive stay queued and are read by the handler or, once the listener
/// resumes, by the session in their original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerState {
    #[default]
    Listening,
    Suspended,
}

impl ListenerState {
    pub fn suspend(&mut self) {
        debug_assert_eq!(*self, ListenerState::Listening, "listener suspended twice");
        *self = ListenerState::Suspended;
        tracing::trace!(target: "session.hook", "listener_suspended");
    }

    pub fn resume(&mut self) {
        *self = ListenerState::Listening;
        tracing::trace!(target: "session.hook", "listener_resumed");
    }

    pub fn is_listening(&self) -> bool {
        matches!(self, ListenerState::Listening)
    }
}
