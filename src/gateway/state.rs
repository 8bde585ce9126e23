use crate::explain::ChatBackend;
use crate::index::SearchIndex;

/// Handler dependencies, cloned into every request.
///
/// Both clients are cheap to clone and hold no request-visible mutable
/// state, so requests stay fully independent of each other.
#[derive(Clone)]
pub struct HandlerState<
    I: SearchIndex + Clone + Send + Sync + 'static,
    C: ChatBackend + Clone + Send + Sync + 'static,
> {
    pub index: I,
    pub chat: C,
}

impl<I, C> HandlerState<I, C>
where
    I: SearchIndex + Clone + Send + Sync + 'static,
    C: ChatBackend + Clone + Send + Sync + 'static,
{
    pub fn new(index: I, chat: C) -> Self {
        Self { index, chat }
    }
}
