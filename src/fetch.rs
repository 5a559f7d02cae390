//! Stale-response protection for fetches keyed on a changing value.

/// Identifies one request issued for `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub key: K,
    generation: u64,
}

/// Hands out tickets and remembers which one is current.
///
/// A result may only be applied if its ticket is still current: the key has
/// not moved on and no newer request for the same key was started.
#[derive(Debug, Clone)]
pub struct RequestTracker<K> {
    current: Option<Ticket<K>>,
    next_generation: u64,
}

impl<K> Default for RequestTracker<K> {
    fn default() -> Self {
        Self {
            current: None,
            next_generation: 1,
        }
    }
}

impl<K: Clone + PartialEq> RequestTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, key: K) -> Ticket<K> {
        let ticket = Ticket {
            key,
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.current = Some(ticket.clone());
        ticket
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.current.as_ref() == Some(ticket)
    }

    /// Consume the ticket if current; later results for it are ignored.
    pub fn finish(&mut self, ticket: &Ticket<K>) -> bool {
        if self.is_current(ticket) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref().map(|t| &t.key)
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Forget the in-flight request, e.g. when the owning view goes away.
    pub fn cancel(&mut self) {
        self.current = None;
    }
}
