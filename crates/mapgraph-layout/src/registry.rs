use crate::circular::CircularLayout;
use crate::force::ForceDirectedLayout;
use crate::hierarchical::HierarchicalLayout;
use crate::strategy::{LayoutStrategy, LayoutStrategyKind};
use crate::stress::{StressLayout, StressSolver};
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: FxHashMap<LayoutStrategyKind, Arc<dyn LayoutStrategy>>,
}

impl StrategyRegistry {
    /// An empty registry. Use [`StrategyRegistry::default`] for the built-in strategies.
    pub fn new() -> Self {
        Self {
            strategies: FxHashMap::default(),
        }
    }

    /// Registers `strategy` under its own kind, replacing any previous registration.
    pub fn insert(&mut self, strategy: Arc<dyn LayoutStrategy>) {
        self.strategies.insert(strategy.kind(), strategy);
    }

    pub fn get(&self, kind: LayoutStrategyKind) -> Option<Arc<dyn LayoutStrategy>> {
        self.strategies.get(&kind).cloned()
    }

    pub fn contains(&self, kind: LayoutStrategyKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<LayoutStrategyKind> {
        LayoutStrategyKind::ALL
            .into_iter()
            .filter(|k| self.contains(*k))
            .collect()
    }

    /// Built-in strategies with the stress strategy running on `solver`.
    pub fn with_stress_solver(solver: Arc<dyn StressSolver>) -> Self {
        let mut reg = Self::new();
        reg.insert(Arc::new(CircularLayout));
        reg.insert(Arc::new(StressLayout::new(solver)));
        reg.insert(Arc::new(HierarchicalLayout));
        reg.insert(Arc::new(ForceDirectedLayout));
        reg
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_stress_solver(Arc::new(crate::stress::MajorizeSolver))
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
