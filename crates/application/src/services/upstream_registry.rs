use super::ranking::{preferred_position, RankedOrder};
use arc_swap::ArcSwap;
use ferrous_relay_domain::ResolverAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable view of the registry: resolver order plus the preferred index.
///
/// Both fields always come from the same install, so a request that holds a
/// snapshot can walk it without further synchronisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySnapshot {
    order: Arc<[ResolverAddr]>,
    preferred: usize,
    version: u64,
}

impl RegistrySnapshot {
    pub fn order(&self) -> &[ResolverAddr] {
        &self.order
    }

    pub fn preferred_index(&self) -> usize {
        self.preferred
    }

    pub fn preferred(&self) -> Option<&ResolverAddr> {
        self.order.get(self.preferred)
    }

    /// Incremented on every successful install or promotion.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position(&self, server: &ResolverAddr) -> Option<usize> {
        self.order.iter().position(|s| s == server)
    }

    /// Index tried after `from` failed, wrapping around the order.
    pub fn next_index(&self, from: usize) -> usize {
        if self.order.is_empty() {
            return 0;
        }
        (from + 1) % self.order.len()
    }

    /// Preferred resolver first, then every other distinct resolver once, in order.
    pub fn candidates(&self) -> Vec<&ResolverAddr> {
        let mut out: Vec<&ResolverAddr> = Vec::with_capacity(self.order.len());
        let mut index = self.preferred;
        for _ in 0..self.order.len() {
            let candidate = &self.order[index];
            if !out.contains(&candidate) {
                out.push(candidate);
            }
            index = self.next_index(index);
        }
        out
    }
}

/// Which server an install makes preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredSelection {
    /// The first server of the new order.
    First,
    /// Whichever server is preferred when the swap happens, if it is still in
    /// the new order; otherwise the first.
    KeepCurrent,
}

/// Shared, atomically swapped upstream order.
///
/// Readers take a snapshot per request. Writers publish a whole new snapshot,
/// never a single field, so order and preferred index can't be observed torn.
pub struct UpstreamRegistry {
    current: ArcSwap<RegistrySnapshot>,
}

impl UpstreamRegistry {
    pub fn new(order: Vec<ResolverAddr>) -> Self {
        Self {
            current: ArcSwap::from_pointee(RegistrySnapshot {
                order: order.into(),
                preferred: 0,
                version: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.current.load_full()
    }

    /// Replaces order and preferred index together.
    ///
    /// The preferred index is worked out against the state current at swap
    /// time, so a promotion that lands while a ranking pass runs is carried
    /// into the new order. An empty order is refused and the current state is
    /// kept; returns what was installed.
    pub fn install(&self, order: Vec<ResolverAddr>, selection: PreferredSelection) -> Option<RankedOrder> {
        if order.is_empty() {
            warn!("Refusing to install empty upstream order, keeping current one");
            return None;
        }

        let order: Arc<[ResolverAddr]> = order.into();
        let mut preferred = 0;
        self.current.rcu(|current| {
            preferred = match selection {
                PreferredSelection::First => 0,
                PreferredSelection::KeepCurrent => preferred_position(&order, current.preferred()),
            };
            RegistrySnapshot {
                order: Arc::clone(&order),
                preferred,
                version: current.version + 1,
            }
        });

        Some(RankedOrder {
            order: order.to_vec(),
            preferred,
        })
    }

    /// Makes `server` the preferred resolver if it is part of the current order.
    ///
    /// Looks the server up in the order installed *now*, which may differ from
    /// the snapshot the caller iterated. Returns `true` if the preferred
    /// resolver changed.
    pub fn promote(&self, server: &ResolverAddr) -> bool {
        let mut promoted = false;
        self.current.rcu(|current| {
            promoted = false;
            match current.position(server) {
                Some(index) if index != current.preferred => {
                    promoted = true;
                    Arc::new(RegistrySnapshot {
                        order: Arc::clone(&current.order),
                        preferred: index,
                        version: current.version + 1,
                    })
                }
                _ => Arc::clone(current),
            }
        });
        if promoted {
            debug!(server = %server, "Preferred upstream server promoted");
        }
        promoted
    }
}
