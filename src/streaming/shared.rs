use std::sync::Arc;
use parking_lot::RwLock;
use crate::config::TriestConfig;
use crate::error::Result;
use crate::graph::NodeId;
use crate::streaming::events::EdgeEvent;
use crate::streaming::triest::{FullyDynamicTriest, IngestOutcome, TriestStats};

/// Cloneable handle for one writer and any number of readers.
///
/// Each `ingest` holds the write lock for the whole event, so readers calling
/// `estimate` or `stats` always observe the scalars of a fully applied event.
#[derive(Debug, Clone)]
pub struct SharedTriest<N = u64> {
    inner: Arc<RwLock<FullyDynamicTriest<N>>>,
}

impl<N: NodeId> SharedTriest<N> {
    pub fn new(triest: FullyDynamicTriest<N>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(triest)),
        }
    }

    pub fn from_config(config: &TriestConfig) -> Result<Self> {
        Ok(Self::new(FullyDynamicTriest::from_config(config)?))
    }

    pub fn ingest(&self, event: EdgeEvent<N>) -> IngestOutcome<N> {
        self.inner.write().ingest(event)
    }

    pub fn estimate(&self) -> f64 {
        self.inner.read().estimate()
    }

    pub fn stats(&self) -> TriestStats {
        self.inner.read().stats()
    }

    /// Run `f` against a consistent view of the estimator.
    pub fn with_estimator<R>(&self, f: impl FnOnce(&FullyDynamicTriest<N>) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_reader_sees_complete_events() {
        let shared = SharedTriest::new(FullyDynamicTriest::with_seed(1000, 11).unwrap());
        let reader = shared.clone();

        let handle = thread::spawn(move || {
            for _ in 0..200 {
                let stats = reader.stats();
                // tau only changes together with the edge that closes a triangle
                assert!(stats.tau <= stats.nb_edges as i64);
                assert!(stats.t as i64 >= stats.s);
                assert!(stats.estimate >= 0.0);
            }
        });

        for i in 0..300u64 {
            shared.ingest(EdgeEvent::insert(i, i + 1));
            shared.ingest(EdgeEvent::insert(i, i + 2));
        }
        handle.join().unwrap();

        let stats = shared.stats();
        assert_eq!(stats.t, 600);
        assert_eq!(stats.nb_edges, 600);
        assert_eq!(stats.tau, 299);
        assert_eq!(shared.with_estimator(|t| t.sample().len()), 600);
    }
}
