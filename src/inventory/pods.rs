// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Correlates a release's pods to their running container images.

use k8s_openapi::api::core::v1::Pod;
use tracing::warn;

use super::PodImageSet;
use crate::kubernetes::ClusterClient;

/// The standard label charts set on the objects of a release instance.
/// This is the join key between Helm release identity and raw pods; it is
/// chart policy, not something Helm itself guarantees.
const INSTANCE_LABEL: &str = "app.kubernetes.io/instance";

/// Map each pod of a release to its container images, keyed by pod name.
/// Image order follows container declaration order. A failed pod listing
/// degrades to an empty map.
pub async fn images(cluster: &ClusterClient, namespace: &str, release: &str) -> PodImageSet {
    let selector = format!("{}={}", INSTANCE_LABEL, release);
    match cluster.pods_labeled(namespace, &selector).await {
        Ok(pods) => image_map(pods),
        Err(e) => {
            warn!(release = %release, namespace = %namespace, error = %e, "Failed to list pods");
            PodImageSet::new()
        }
    }
}

/// Build the pod -> images mapping. A pod with no containers keeps its key
/// with an empty image list.
fn image_map(pods: Vec<Pod>) -> PodImageSet {
    pods.into_iter()
        .filter_map(|pod| {
            let name = pod.metadata.name.clone()?;
            Some((name, container_images(&pod)))
        })
        .collect()
}

/// Images of every container in declaration order
fn container_images(pod: &Pod) -> Vec<String> {
    pod.spec
        .as_ref()
        .map(|spec| {
            spec.containers
                .iter()
                .map(|container| container.image.clone().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}
