//! Global id lookup across the three collections

use shared::models::{GlobalId, Node, NodeKind};

use super::Services;
use crate::utils::AppResult;

/// Resolve a global id to its node; `None` for malformed ids and missing rows.
pub async fn resolve_node(services: &Services, global_id: &str) -> AppResult<Option<Node>> {
    let Some(gid) = GlobalId::decode(global_id) else {
        tracing::debug!(global_id, "Malformed global id");
        return Ok(None);
    };

    let node = match gid.kind {
        NodeKind::Customer => services.customers.find(gid.id).await?.map(Node::Customer),
        NodeKind::Product => services.products.find(gid.id).await?.map(Node::Product),
        NodeKind::Order => services.orders.find(gid.id).await?.map(Node::Order),
    };
    Ok(node)
}
