// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Resolves target chart names against live Helm releases.

use std::collections::{BTreeMap, BTreeSet};

use futures::future::join_all;
use tracing::{debug, warn};

use super::ReleaseRecord;
use crate::helm::{HelmClient, ReleaseListEntry};

/// Resolve the target set against live releases.
///
/// Only releases whose name is an exact member of `targets` are returned.
/// A failed release listing yields an empty map and a failed per-release
/// metadata fetch drops that release; both are logged rather than
/// propagated so the rest of the report survives.
pub async fn resolve(
    helm: &HelmClient,
    targets: &BTreeSet<String>,
) -> BTreeMap<String, ReleaseRecord> {
    let releases = match helm.list_releases().await {
        Ok(releases) => releases,
        Err(e) => {
            warn!(error = %e, "Failed to list Helm releases");
            return BTreeMap::new();
        }
    };

    let matched = match_targets(releases, targets);
    debug!(matched = matched.len(), "Matched releases against target set");

    let fetches = matched.into_iter().map(|entry| async move {
        match helm.release_metadata(&entry.name, &entry.namespace).await {
            Ok(meta) => Some(ReleaseRecord {
                name: entry.name,
                namespace: entry.namespace,
                revision: meta.revision,
                chart_version: meta.version,
            }),
            Err(e) => {
                warn!(release = %entry.name, error = %e, "Failed to fetch release metadata");
                None
            }
        }
    });

    join_all(fetches)
        .await
        .into_iter()
        .flatten()
        .map(|record| (record.name.clone(), record))
        .collect()
}

/// Exact-name membership filter; no pattern matching
fn match_targets(
    releases: Vec<ReleaseListEntry>,
    targets: &BTreeSet<String>,
) -> Vec<ReleaseListEntry> {
    releases
        .into_iter()
        .filter(|release| targets.contains(&release.name))
        .collect()
}
