// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Merges release, resource, pod, and node lookups into one report.
//!
//! Every sub-lookup absorbs its own failures into an empty partial result,
//! so aggregation always produces a report: a partial outage in one API
//! degrades only the entries that depended on it.

use std::collections::{BTreeMap, BTreeSet};

use futures::future::join_all;

use super::{InventoryReport, ReleaseInventory, ReleaseRecord, nodes, pods, releases, resources};
use crate::helm::HelmClient;
use crate::kubernetes::ClusterClient;

/// Build the full inventory report for the target set.
///
/// The Helm-side lookups and the node lookup are independent branches, and
/// the per-release resource and pod lookups are independent of each other.
/// All branches run concurrently; no result depends on the interleaving.
pub async fn aggregate(
    helm: &HelmClient,
    cluster: &ClusterClient,
    targets: &BTreeSet<String>,
) -> InventoryReport {
    let (helm_charts, nodes) = tokio::join!(
        collect_charts(helm, cluster, targets),
        nodes::facts(cluster),
    );

    InventoryReport { helm_charts, nodes }
}

async fn collect_charts(
    helm: &HelmClient,
    cluster: &ClusterClient,
    targets: &BTreeSet<String>,
) -> BTreeMap<String, ReleaseInventory> {
    let records = releases::resolve(helm, targets).await;

    let entries = records.into_values().map(|record| async move {
        let inventory = release_inventory(helm, cluster, &record).await;
        (record.name, inventory)
    });

    join_all(entries).await.into_iter().collect()
}

async fn release_inventory(
    helm: &HelmClient,
    cluster: &ClusterClient,
    record: &ReleaseRecord,
) -> ReleaseInventory {
    let (owned, pod_images) = tokio::join!(
        resources::owned(helm, &record.name, &record.namespace),
        pods::images(cluster, &record.namespace, &record.name),
    );

    ReleaseInventory {
        version: record.chart_version.clone(),
        namespace: record.namespace.clone(),
        revision: record.revision,
        resources: Some(owned),
        pods: pod_images,
    }
}
