// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Inventory data model and the aggregation engine that fills it.

mod aggregate;
mod nodes;
mod pods;
mod releases;
mod resources;

pub use aggregate::aggregate;

use std::collections::BTreeMap;

use serde::Serialize;

/// A Helm release matched against the target set
#[derive(Debug, Clone)]
pub struct ReleaseRecord {
    pub name: String,
    pub namespace: String,
    pub revision: u32,
    pub chart_version: String,
}

/// A cluster object owned by a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    pub kind: String,
    pub name: String,
}

/// Pod name -> container images in declaration order
pub type PodImageSet = BTreeMap<String, Vec<String>>;

/// Everything reported for one matched release.
///
/// `resources` is an explicit optional: `None` means the caller did not ask
/// for resource lists, and the key is omitted from serialized output
/// entirely. `Some(vec![])` serializes as an empty list.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseInventory {
    pub version: String,
    pub namespace: String,
    pub revision: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceRef>>,
    pub pods: PodImageSet,
}

/// Platform metadata of one cluster node
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFacts {
    pub architecture: String,
    pub kernel_version: String,
    pub kubelet_version: String,
    pub operating_system: String,
    pub os_image: String,
}

/// The full report produced by one aggregation run. BTreeMap keys make the
/// output deterministic for identical cluster state.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub helm_charts: BTreeMap<String, ReleaseInventory>,
    pub nodes: BTreeMap<String, NodeFacts>,
}

impl InventoryReport {
    /// Drop resource lists from every chart entry. Projection applied after
    /// aggregation; collection itself is unconditional.
    pub fn strip_resources(&mut self) {
        for entry in self.helm_charts.values_mut() {
            entry.resources = None;
        }
    }
}
