//! Publication point for the most recent regeneration.
//!
//! Regenerations may overlap (a new one starts before the previous finished).
//! Each one takes a ticket from [`SurfaceSlot::begin`]; a result is only
//! published if its ticket is newer than the one already published, so the
//! slot never goes backwards and late results never replace fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::mesh::{Mesh, MeshResult};

/// Ticket identifying one regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Sequence number of the ticket.
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Holds the currently published mesh, if any.
#[derive(Debug, Default)]
pub struct SurfaceSlot {
    /// Last issued ticket.
    issued: AtomicU64,
    /// Count of accepted publications.
    version: AtomicU64,
    /// Published mesh and the ticket that produced it.
    current: RwLock<(u64, Option<Arc<Mesh>>)>,
}

impl SurfaceSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a regeneration.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Publish the result of the regeneration holding `ticket`.
    ///
    /// Returns `false` and drops `result` if a result from the same or a newer
    /// ticket has already been published. [`MeshResult::NoSurface`] clears
    /// the slot.
    pub fn publish(&self, ticket: Ticket, result: MeshResult) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);

        if ticket.0 <= current.0 {
            log::debug!(
                "discarding stale surface from ticket {} (published {})",
                ticket.0,
                current.0
            );
            return false;
        }

        *current = (ticket.0, result.into_mesh().map(Arc::new));
        self.version.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// The published mesh, or `None` when there is no surface.
    pub fn current(&self) -> Option<Arc<Mesh>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .1
            .clone()
    }

    /// Number of accepted publications.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
