//! Session-scoped hierarchy view
//!
//! A session owns the current forest, its supervisor index and the expansion
//! state for one viewer. The expansion state is re-seeded only when a fetch
//! returns a snapshot with a different identity; re-fetching identical data
//! keeps whatever the viewer expanded or collapsed.

use crate::builder::{CyclePolicy, HierarchyBuilder};
use crate::error::Result;
use crate::expansion::{ExpansionState, INITIAL_EXPANSION_DEPTH};
use crate::selector::{ForestSelector, ForestSource};
use crate::source::HierarchyDataSource;
use crate::supervisors::SupervisorIndex;
use crate::types::{EmployeeId, Forest, Snapshot};
use crate::visible::{visible_rows, OwnedVisibleRow};
use orgchart_common::Pretty;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, trace};

/// Knobs for how a session builds and seeds its view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    #[serde(default)]
    pub cycle_policy: CyclePolicy,
    #[serde(default = "default_initial_expansion_depth")]
    pub initial_expansion_depth: usize,
}

fn default_initial_expansion_depth() -> usize {
    INITIAL_EXPANSION_DEPTH
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::default(),
            initial_expansion_depth: INITIAL_EXPANSION_DEPTH,
        }
    }
}

/// Result of [`HierarchySession::refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot arrived; forest rebuilt and expansion re-seeded
    Replaced { source: ForestSource },
    /// Same snapshot identity as before; nothing changed
    Unchanged,
}

struct View {
    fingerprint: String,
    forest: Arc<Forest>,
    supervisors: Arc<SupervisorIndex>,
}

/// One viewer's hierarchy: current forest plus its expansion state.
pub struct HierarchySession {
    source: Box<dyn HierarchyDataSource>,
    selector: ForestSelector,
    options: SessionOptions,
    // Held for a whole fetch-compare-install so refreshes apply in call order
    refresh_guard: Mutex<()>,
    // Lock order: view, then expansion
    view: RwLock<Option<View>>,
    expansion: Mutex<ExpansionState>,
}

impl HierarchySession {
    pub fn new(source: Box<dyn HierarchyDataSource>) -> Self {
        Self::with_options(source, SessionOptions::default())
    }

    pub fn with_options(source: Box<dyn HierarchyDataSource>, options: SessionOptions) -> Self {
        let builder = HierarchyBuilder::new().with_cycle_policy(options.cycle_policy);
        Self {
            source,
            selector: ForestSelector::new(builder),
            options,
            refresh_guard: Mutex::new(()),
            view: RwLock::new(None),
            expansion: Mutex::new(ExpansionState::new()),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Fetch from the source and rebuild if the snapshot changed.
    ///
    /// Fetch errors are returned unchanged and leave the current view intact.
    /// Concurrent calls run one after another, so a slow fetch never
    /// installs its snapshot over one fetched later.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let _refreshing = self.refresh_guard.lock().await;
        let snapshot = self.source.fetch().await?;
        let fingerprint = snapshot.fingerprint();

        if self.fingerprint().await.as_deref() == Some(fingerprint.as_str()) {
            debug!(%fingerprint, "snapshot unchanged");
            return Ok(RefreshOutcome::Unchanged);
        }

        let supervisors = SupervisorIndex::build(&snapshot.employees);
        let Snapshot {
            employees,
            hierarchy,
        } = snapshot;
        let (forest, source) = self.selector.select_with_source(hierarchy, &employees);

        let mut seeded = ExpansionState::new();
        seeded.seed_to_depth(&forest, self.options.initial_expansion_depth);

        let mut view = self.view.write().await;
        let mut expansion = self.expansion.lock().await;
        info!(
            %fingerprint,
            roots = forest.len(),
            expanded = seeded.len(),
            ?source,
            "hierarchy replaced"
        );
        *view = Some(View {
            fingerprint,
            forest: Arc::new(forest),
            supervisors: Arc::new(supervisors),
        });
        *expansion = seeded;
        trace!("seeded expansion: {}", Pretty(expansion.expanded_ids()));

        Ok(RefreshOutcome::Replaced { source })
    }

    /// Identity of the snapshot currently shown, if any
    pub async fn fingerprint(&self) -> Option<String> {
        self.view
            .read()
            .await
            .as_ref()
            .map(|v| v.fingerprint.clone())
    }

    /// Current forest; empty before the first successful refresh
    pub async fn forest(&self) -> Arc<Forest> {
        match self.view.read().await.as_ref() {
            Some(view) => Arc::clone(&view.forest),
            None => Arc::new(Forest::new()),
        }
    }

    /// Current supervisor index; empty before the first successful refresh
    pub async fn supervisors(&self) -> Arc<SupervisorIndex> {
        match self.view.read().await.as_ref() {
            Some(view) => Arc::clone(&view.supervisors),
            None => Arc::new(SupervisorIndex::default()),
        }
    }

    pub async fn is_expanded(&self, id: &str) -> bool {
        self.expansion.lock().await.is_expanded(id)
    }

    /// Copy of the current expansion state
    pub async fn expansion_state(&self) -> ExpansionState {
        self.expansion.lock().await.clone()
    }

    pub async fn expanded_ids(&self) -> Vec<EmployeeId> {
        self.expansion.lock().await.expanded_ids()
    }

    /// Flip `id`; returns whether it is now expanded
    pub async fn toggle(&self, id: impl Into<EmployeeId>) -> bool {
        self.expansion.lock().await.toggle(id)
    }

    pub async fn expand_all(&self) {
        let view = self.view.read().await;
        let mut expansion = self.expansion.lock().await;
        match view.as_ref() {
            Some(view) => expansion.expand_all(&view.forest),
            None => expansion.collapse_all(),
        }
    }

    pub async fn collapse_all(&self) {
        self.expansion.lock().await.collapse_all();
    }

    /// Expand the ancestors of `id`; false when `id` is not in the forest
    pub async fn reveal(&self, id: &str) -> bool {
        let view = self.view.read().await;
        let mut expansion = self.expansion.lock().await;
        match view.as_ref() {
            Some(view) => expansion.reveal(&view.forest, id),
            None => false,
        }
    }

    /// Rows currently visible under the session's expansion state
    pub async fn visible_rows(&self) -> Vec<OwnedVisibleRow> {
        let view = self.view.read().await;
        let expansion = self.expansion.lock().await;
        match view.as_ref() {
            Some(view) => visible_rows(&view.forest, &expansion)
                .iter()
                .map(|row| row.to_owned_row())
                .collect(),
            None => Vec::new(),
        }
    }
}
