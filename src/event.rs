use crossterm::event::Event;

/// Everything the event loop wakes up for from outside the bar itself.
#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
}
