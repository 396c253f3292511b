// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Collects platform metadata for every cluster node.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Node;
use tracing::warn;

use super::NodeFacts;
use crate::kubernetes::ClusterClient;

/// Collect the platform facts of every node, keyed by node name.
/// A failed node listing degrades to an empty map, independently of the
/// Helm-side lookups.
pub async fn facts(cluster: &ClusterClient) -> BTreeMap<String, NodeFacts> {
    match cluster.list_nodes().await {
        Ok(nodes) => facts_map(nodes),
        Err(e) => {
            warn!(error = %e, "Failed to list nodes");
            BTreeMap::new()
        }
    }
}

fn facts_map(nodes: Vec<Node>) -> BTreeMap<String, NodeFacts> {
    nodes.into_iter().filter_map(node_facts).collect()
}

/// Extract the five platform fields verbatim from node status
fn node_facts(node: Node) -> Option<(String, NodeFacts)> {
    let name = node.metadata.name?;
    let info = node
        .status
        .and_then(|status| status.node_info)
        .unwrap_or_default();

    Some((
        name,
        NodeFacts {
            architecture: info.architecture,
            kernel_version: info.kernel_version,
            kubelet_version: info.kubelet_version,
            operating_system: info.operating_system,
            os_image: info.os_image,
        },
    ))
}
