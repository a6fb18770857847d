// ── Tree construction ──
//
// One rebuild: classify the port snapshots, resolve redirects, and
// emit the full node forest with freshly allocated ids. No I/O and no
// failure path -- malformed collaborator data flows through as-is.

use serde_json::Value;
use tracing::debug;

use super::EndpointsView;
use crate::classify::classify;
use crate::idgen::IdAllocator;
use crate::model::{ListeningPort, NodeCommand, TreeNode};
use crate::redirect::resolve;

// Icon keys understood by the host theme.
const ICON_ROOT: &str = "fa-plug";
const ICON_PUBLIC_GROUP: &str = "fa-cloud";
const ICON_PRIVATE_GROUP: &str = "fa-circle";
const ICON_OFFLINE_GROUP: &str = "fa-circle-thin";
const ICON_PUBLIC_PORT: &str = "fa-cloud medium-green";
const ICON_OPEN_TAB: &str = "fa-external-link medium-blue";
const ICON_PREVIEW: &str = "fa-eye medium-blue";
const ICON_CANCEL: &str = "fa-stop-circle-o medium-red";
const ICON_OFFLINE_PORT: &str = "fa-circle-thin medium-grey";

impl EndpointsView {
    pub(super) fn build_nodes(
        &self,
        ids: &mut IdAllocator,
        opened: &[ListeningPort],
    ) -> Vec<TreeNode> {
        let buckets = classify(opened, &self.declared, &self.config.redirect_prefix);
        let redirects = resolve(opened, &self.redirects);

        let mut nodes = Vec::new();

        // Top-level groups. The private group stays empty on this
        // path (see DESIGN.md) but keeps its place in the tree shape.
        let mut root = TreeNode::new(ids.allocate(), "Endpoints", "Available Endpoints");
        root.icon = Some(ICON_ROOT.into());
        root.expanded = Some(true);

        let mut public_group = TreeNode::new(
            ids.allocate(),
            "Ports listening and remotely available",
            "Remotely available",
        );
        public_group.icon = Some(ICON_PUBLIC_GROUP.into());
        public_group.parent_id = Some(root.id.clone());
        public_group.expanded = Some(true);

        let mut private_group = TreeNode::new(
            ids.allocate(),
            "Ports listening but private",
            "Available locally",
        );
        private_group.icon = Some(ICON_PRIVATE_GROUP.into());
        private_group.parent_id = Some(root.id.clone());
        private_group.expanded = Some(true);

        let mut offline_group = TreeNode::new(
            ids.allocate(),
            "offline",
            "Declared in the workspace but not listening",
        );
        offline_group.icon = Some(ICON_OFFLINE_GROUP.into());
        offline_group.parent_id = Some(root.id.clone());
        offline_group.expanded = Some(true);

        let public_group_id = public_group.id.clone();
        let offline_group_id = offline_group.id.clone();
        nodes.push(root);
        nodes.push(public_group);
        nodes.push(private_group);
        nodes.push(offline_group);

        for port in &buckets.public {
            // A redirected port displays the public side of the
            // forwarding session instead of its own number.
            let redirect = redirects.get(&port.number);
            let shown_port = redirect.map_or(port.number, |r| r.listen_port);

            let mut port_node = TreeNode::new(
                ids.allocate(),
                format!("Port {shown_port}"),
                "This port is listening and is available remotely",
            );
            port_node.icon = Some(ICON_PUBLIC_PORT.into());
            port_node.parent_id = Some(public_group_id.clone());

            let mut actions = Vec::new();
            let declaration = self.declared.iter().find(|decl| decl.matches(port));
            if let Some(decl) = declaration.filter(|decl| decl.has_http_url()) {
                let label = redirect.map_or(decl.server_name.as_str(), |r| r.label.as_str());
                let open = NodeCommand {
                    id: self.config.open_command.clone(),
                    arguments: vec![Value::String(decl.url.clone())],
                };

                let mut open_tab = TreeNode::new(
                    ids.allocate(),
                    format!("{label} (new tab)"),
                    "open in a new tab",
                );
                open_tab.icon = Some(ICON_OPEN_TAB.into());
                open_tab.parent_id = Some(port_node.id.clone());
                open_tab.command = Some(open.clone());
                actions.push(open_tab);

                let mut preview = TreeNode::new(
                    ids.allocate(),
                    format!("{label} (preview)"),
                    "open in preview",
                );
                preview.icon = Some(ICON_PREVIEW.into());
                preview.parent_id = Some(port_node.id.clone());
                preview.command = Some(open);
                actions.push(preview);

                if redirect.is_some() {
                    let mut cancel = TreeNode::new(
                        ids.allocate(),
                        "Cancel port forwarding",
                        "Cancel redirect (make port private again)",
                    );
                    cancel.icon = Some(ICON_CANCEL.into());
                    cancel.parent_id = Some(port_node.id.clone());
                    cancel.command = Some(NodeCommand {
                        id: self.config.cancel_command.clone(),
                        arguments: vec![Value::from(shown_port)],
                    });
                    actions.push(cancel);
                }
            }

            if actions.is_empty() {
                port_node.name.push_str(" (no http endpoints)");
            } else {
                port_node.expanded = Some(true);
            }
            nodes.push(port_node);
            nodes.append(&mut actions);
        }

        for decl in &buckets.offline {
            let mut offline_node = TreeNode::new(
                ids.allocate(),
                format!("Port {} ({})", decl.port_number, decl.server_name),
                "This port is declared as public but it is not yet listening",
            );
            offline_node.icon = Some(ICON_OFFLINE_PORT.into());
            offline_node.parent_id = Some(offline_group_id.clone());
            nodes.push(offline_node);
        }

        debug!(
            total = nodes.len(),
            public = buckets.public.len(),
            offline = buckets.offline.len(),
            "tree rebuilt"
        );

        nodes
    }
}
