// ── Endpoints view ──
//
// The materialized tree and its read contract. `refresh()` rebuilds
// the whole node set from the collaborator snapshots and notifies
// subscribers; readers always see the last completed rebuild.

mod build;

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::watch;
use tracing::info;

use crate::command::CommandRegistry;
use crate::config::ViewConfig;
use crate::detect::PortChangeDetector;
use crate::error::CoreError;
use crate::idgen::IdAllocator;
use crate::model::{DeclaredPort, RedirectRegistry, TreeItem, TreeNode};
use crate::stream::ViewUpdates;

/// Callback handed in by the forwarding manager: tears down the
/// session occupying the given listening port. Teardown alone -- the
/// host triggers the follow-up `refresh()` itself.
pub type FreePortFn = Arc<dyn Fn(u16) + Send + Sync>;

/// Reconciled endpoints tree over the three port inputs.
///
/// Owns the node set exclusively; collaborators feed it snapshots and
/// the host reads it back through [`children`](Self::children) /
/// [`present`](Self::present).
pub struct EndpointsView {
    config: ViewConfig,
    detector: Arc<dyn PortChangeDetector>,
    declared: Vec<DeclaredPort>,
    redirects: RedirectRegistry,
    free_port: FreePortFn,

    /// Last completed rebuild, swapped atomically so a reader never
    /// observes a partially built node set.
    nodes: ArcSwap<Vec<TreeNode>>,
    /// Issued-id state. Held for the whole rebuild, so overlapping
    /// `refresh()` calls serialize on it.
    ids: Mutex<IdAllocator>,
    version: watch::Sender<u64>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl EndpointsView {
    pub fn new(
        config: ViewConfig,
        detector: Arc<dyn PortChangeDetector>,
        declared: Vec<DeclaredPort>,
        redirects: RedirectRegistry,
        free_port: FreePortFn,
    ) -> Self {
        let (version, _) = watch::channel(0);
        let (last_refresh, _) = watch::channel(None);

        Self {
            config,
            detector,
            declared,
            redirects,
            free_port,
            nodes: ArcSwap::from_pointee(Vec::new()),
            ids: Mutex::new(IdAllocator::new()),
            version,
            last_refresh,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Register this view's host commands on `registry`.
    ///
    /// Safe to call more than once -- registration is idempotent.
    pub fn register_commands(&self, registry: &CommandRegistry) {
        let free_port = Arc::clone(&self.free_port);
        let command = self.config.cancel_command.clone();
        registry.register(&self.config.cancel_command, move |args| {
            let port = cancel_argument(&command, args)?;
            free_port(port);
            Ok(())
        });
    }

    /// Rebuild the whole tree from fresh collaborator snapshots, then
    /// fire a single change notification.
    ///
    /// Synchronous and non-blocking apart from the rebuild lock; fully
    /// replaces the prior node set and identifier space on every call.
    pub fn refresh(&self) {
        info!("refreshing the ports view");

        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        ids.reset();

        let opened = self.detector.opened_ports();
        let nodes = self.build_nodes(&mut ids, &opened);
        self.nodes.store(Arc::new(nodes));
        drop(ids);

        let _ = self.last_refresh.send_replace(Some(Utc::now()));
        self.version.send_modify(|v| *v += 1);
    }

    // ── Read contract ────────────────────────────────────────────────

    /// Children of `node`, or the root nodes when `None`.
    ///
    /// Reflects the most recently completed rebuild; never blocks.
    pub fn children(&self, node: Option<&TreeNode>) -> Vec<TreeNode> {
        let snapshot = self.nodes.load();
        match node {
            Some(parent) => snapshot
                .iter()
                .filter(|item| item.parent_id.as_deref() == Some(parent.id.as_str()))
                .cloned()
                .collect(),
            None => snapshot
                .iter()
                .filter(|item| item.parent_id.is_none())
                .cloned()
                .collect(),
        }
    }

    /// Renderable record for `node`.
    pub fn present(&self, node: &TreeNode) -> TreeItem {
        TreeItem::from(node)
    }

    /// All nodes from the last completed rebuild (cheap `Arc` clone).
    pub fn nodes(&self) -> Arc<Vec<TreeNode>> {
        self.nodes.load_full()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Subscribe to rebuild notifications.
    pub fn subscribe(&self) -> ViewUpdates {
        ViewUpdates::new(self.version.subscribe())
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// How long ago the last rebuild completed, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}

/// Pull the single port-number argument out of a cancel invocation.
fn cancel_argument(command: &str, args: &[Value]) -> Result<u16, CoreError> {
    let value = args.first().ok_or_else(|| CoreError::InvalidArgument {
        command: command.to_owned(),
        reason: "missing port number".into(),
    })?;

    value
        .as_u64()
        .and_then(|n| u16::try_from(n).ok())
        .ok_or_else(|| CoreError::InvalidArgument {
            command: command.to_owned(),
            reason: format!("expected a port number, got {value}"),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cancel_argument_accepts_a_port_number() {
        let args = [Value::from(8081u16)];
        assert_eq!(cancel_argument("cancel", &args).unwrap(), 8081);
    }

    #[test]
    fn cancel_argument_rejects_missing_and_malformed_input() {
        assert!(matches!(
            cancel_argument("cancel", &[]),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            cancel_argument("cancel", &[Value::String("8081".into())]),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            cancel_argument("cancel", &[Value::from(70000u32)]),
            Err(CoreError::InvalidArgument { .. })
        ));
    }
}
