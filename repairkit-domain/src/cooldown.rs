use repairkit_types::{ActorId, CooldownTrack};
use std::collections::HashMap;

/// Live cooldown expiries, one per actor and track, in epoch milliseconds.
///
/// Every read treats an expired record as absent and removes it, so scheduled pruning is only
/// an optimization.
#[derive(Debug, Clone, Default)]
pub struct CooldownBook {
    expiries: HashMap<(ActorId, CooldownTrack), i64>,
}

impl CooldownBook {
    /// Record a new expiry, replacing any previous one for the same actor and track.
    pub fn set(&mut self, actor: ActorId, track: CooldownTrack, expires_at_ms: i64) {
        self.expiries.insert((actor, track), expires_at_ms);
    }

    /// Milliseconds left at `now_ms`; expired records are dropped.
    pub fn remaining_ms(&mut self, actor: &ActorId, track: CooldownTrack, now_ms: i64) -> u64 {
        let key = (*actor, track);
        let Some(&expires_at) = self.expiries.get(&key) else {
            return 0;
        };

        if expires_at <= now_ms {
            self.expiries.remove(&key);
            return 0;
        }

        u64::try_from(expires_at - now_ms).unwrap_or(0)
    }

    pub fn expiry(&self, actor: &ActorId, track: CooldownTrack) -> Option<i64> {
        self.expiries.get(&(*actor, track)).copied()
    }

    /// Drop every record held by `actor`. Returns how many were removed.
    pub fn clear_actor(&mut self, actor: &ActorId) -> usize {
        let before = self.expiries.len();
        self.expiries.retain(|(owner, _), _| owner != actor);
        before - self.expiries.len()
    }

    /// Remove the record only if it still carries `expires_at_ms`.
    ///
    /// A prune scheduled for an older cooldown must not erase a newer one.
    pub fn prune(&mut self, actor: &ActorId, track: CooldownTrack, expires_at_ms: i64) -> bool {
        let key = (*actor, track);
        if self.expiries.get(&key) == Some(&expires_at_ms) {
            self.expiries.remove(&key);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_counts_down_and_expires_at_boundary() {
        let actor = ActorId::from_name("steve");
        let mut book = CooldownBook::default();
        book.set(actor, CooldownTrack::Hand, 10_000);

        assert_eq!(book.remaining_ms(&actor, CooldownTrack::Hand, 0), 10_000);
        assert_eq!(book.remaining_ms(&actor, CooldownTrack::Hand, 9_999), 1);
        assert_eq!(book.remaining_ms(&actor, CooldownTrack::Hand, 10_000), 0);
        assert!(book.is_empty());
    }

    #[test]
    fn tracks_are_independent() {
        let actor = ActorId::from_name("steve");
        let mut book = CooldownBook::default();
        book.set(actor, CooldownTrack::Hand, 1_000);
        book.set(actor, CooldownTrack::All, 5_000);

        assert_eq!(book.remaining_ms(&actor, CooldownTrack::Hand, 2_000), 0);
        assert_eq!(book.remaining_ms(&actor, CooldownTrack::All, 2_000), 3_000);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn set_overwrites_previous_expiry() {
        let actor = ActorId::from_name("steve");
        let mut book = CooldownBook::default();
        book.set(actor, CooldownTrack::Hand, 1_000);
        book.set(actor, CooldownTrack::Hand, 4_000);
        assert_eq!(book.expiry(&actor, CooldownTrack::Hand), Some(4_000));
    }

    #[test]
    fn stale_prune_keeps_newer_record() {
        let actor = ActorId::from_name("steve");
        let mut book = CooldownBook::default();
        book.set(actor, CooldownTrack::Hand, 1_000);
        book.set(actor, CooldownTrack::Hand, 4_000);

        assert!(!book.prune(&actor, CooldownTrack::Hand, 1_000));
        assert_eq!(book.expiry(&actor, CooldownTrack::Hand), Some(4_000));
        assert!(book.prune(&actor, CooldownTrack::Hand, 4_000));
        assert!(!book.prune(&actor, CooldownTrack::Hand, 4_000));
        assert!(book.is_empty());
    }

    #[test]
    fn clear_actor_only_touches_that_actor() {
        let steve = ActorId::from_name("steve");
        let alex = ActorId::from_name("alex");
        let mut book = CooldownBook::default();
        book.set(steve, CooldownTrack::Hand, 1_000);
        book.set(steve, CooldownTrack::All, 1_000);
        book.set(alex, CooldownTrack::Hand, 1_000);

        assert_eq!(book.clear_actor(&steve), 2);
        assert_eq!(book.len(), 1);
        assert_eq!(book.expiry(&alex, CooldownTrack::Hand), Some(1_000));
    }
}
