//! Request-scoped context and the factory that produces it

use super::store::Db;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-operation context passed to every resolver
///
/// One context is created per incoming operation and never mutated. The data
/// store it points to is shared between operations; the context itself is not.
#[derive(Clone)]
pub struct RequestContext {
    db: Arc<dyn Db>,
    operation_id: u64,
}

impl RequestContext {
    /// Data store capability
    pub fn db(&self) -> &dyn Db {
        self.db.as_ref()
    }

    /// Identifier of the operation this context belongs to
    pub fn operation_id(&self) -> u64 {
        self.operation_id
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("operation_id", &self.operation_id)
            .finish_non_exhaustive()
    }
}

/// Builds a fresh [`RequestContext`] for each operation
pub struct ContextFactory {
    db: Arc<dyn Db>,
    next_operation_id: AtomicU64,
}

impl ContextFactory {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self {
            db,
            next_operation_id: AtomicU64::new(1),
        }
    }

    pub fn create(&self) -> RequestContext {
        RequestContext {
            db: self.db.clone(),
            operation_id: self.next_operation_id.fetch_add(1, Ordering::Relaxed),
        }
    }
}
