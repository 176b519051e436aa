//! Per-map layout state: the laid-out tracker plus "last request wins" bookkeeping.

use crate::error::{LayoutError, Result};
use crate::options::LayoutOptions;
use crate::registry::StrategyRegistry;
use crate::strategy::{LayoutRequest, LayoutScope, LayoutStrategyKind};
use crate::tracker::LaidOutSet;
use mapgraph_core::{VisualEdge, VisualNode};
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Layout dispatcher bound to one open map.
///
/// Every [`LayoutSession::apply_layout`] call takes a fresh generation token before it starts.
/// A result is only returned (and only recorded in the tracker) if no newer call started in the
/// meantime; otherwise the caller gets [`LayoutError::Superseded`] and should keep what it
/// currently renders.
#[derive(Debug)]
pub struct LayoutSession {
    map_id: Mutex<Option<String>>,
    tracker: Mutex<LaidOutSet>,
    generation: AtomicU64,
    registry: Arc<StrategyRegistry>,
}

impl Default for LayoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutSession {
    pub fn new() -> Self {
        Self::with_registry(Arc::new(StrategyRegistry::default()))
    }

    pub fn with_registry(registry: Arc<StrategyRegistry>) -> Self {
        Self {
            map_id: Mutex::new(None),
            tracker: Mutex::new(LaidOutSet::new()),
            generation: AtomicU64::new(0),
            registry,
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn map_id(&self) -> Option<String> {
        self.map_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Makes `map_id` the active map. Switching to a different map clears the tracker and
    /// invalidates every in-flight layout request.
    pub fn switch_map(&self, map_id: impl Into<String>) {
        let map_id = map_id.into();
        let mut current = self.map_id.lock().unwrap_or_else(PoisonError::into_inner);
        if current.as_deref() == Some(map_id.as_str()) {
            return;
        }
        tracing::debug!(from = ?current.as_deref(), to = %map_id, "switching layout session map");
        *current = Some(map_id);
        let mut tracker = self.lock_tracker();
        tracker.clear();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Latest generation token handed out.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Snapshot of the laid-out set.
    pub fn tracker(&self) -> LaidOutSet {
        self.lock_tracker().clone()
    }

    pub fn with_tracker<R>(&self, f: impl FnOnce(&mut LaidOutSet) -> R) -> R {
        f(&mut self.lock_tracker())
    }

    /// Runs `kind` over `nodes` and returns the repositioned nodes in input order.
    ///
    /// With [`LayoutScope::NewOnly`], nodes placed by an earlier pass are handed to the strategy
    /// as anchors. When none of them is present the pass behaves like [`LayoutScope::All`].
    pub async fn apply_layout(
        &self,
        nodes: &[VisualNode],
        edges: &[VisualEdge],
        kind: LayoutStrategyKind,
        options: &LayoutOptions,
        scope: LayoutScope,
    ) -> Result<Vec<VisualNode>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if nodes.is_empty() {
            return Ok(Vec::new());
        }

        options.validate()?;
        let strategy = self
            .registry
            .get(kind)
            .ok_or(LayoutError::UnknownStrategy { kind })?;

        let anchors: FxHashSet<String> = match scope {
            LayoutScope::All => FxHashSet::default(),
            LayoutScope::NewOnly => self.lock_tracker().anchors_in(nodes),
        };
        let scope = if anchors.is_empty() {
            LayoutScope::All
        } else {
            scope
        };

        let laid_out = strategy
            .layout(LayoutRequest {
                nodes,
                edges,
                options,
                anchors: &anchors,
            })
            .await?;

        if let Err(err) = self.commit(generation, scope, &laid_out) {
            tracing::warn!(%err, strategy = %kind, "discarding superseded layout result");
            return Err(err);
        }
        tracing::debug!(
            generation,
            strategy = %kind,
            nodes = laid_out.len(),
            anchors = anchors.len(),
            "layout applied"
        );
        Ok(laid_out)
    }

    /// Records a finished pass in the tracker, unless a newer request started meanwhile. The
    /// generation is compared while the tracker lock is held, so a stale pass can never land after
    /// a newer one.
    fn commit(&self, generation: u64, scope: LayoutScope, laid_out: &[VisualNode]) -> Result<()> {
        let mut tracker = self.lock_tracker();
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            return Err(LayoutError::Superseded { generation, latest });
        }
        let ids = laid_out.iter().map(|n| n.id.clone());
        match scope {
            LayoutScope::All => tracker.replace(ids),
            LayoutScope::NewOnly => tracker.add(ids),
        }
        Ok(())
    }

    fn lock_tracker(&self) -> MutexGuard<'_, LaidOutSet> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
