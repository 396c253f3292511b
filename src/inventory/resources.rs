//! Enumerates the cluster objects owned by a release.

use serde::Deserialize;
use tracing::warn;

use super::ResourceRef;
use crate::helm::HelmClient;

#[derive(Debug, Deserialize)]
struct ManifestDoc {
    kind: String,
    metadata: ManifestMeta,
}

#[derive(Debug, Deserialize)]
struct ManifestMeta {
    name: String,
}

/// List the objects a release owns, in manifest order.
/// A failed manifest fetch degrades to an empty list.
pub async fn owned(helm: &HelmClient, name: &str, namespace: &str) -> Vec<ResourceRef> {
    match helm.release_manifest(name, namespace).await {
        Ok(manifest) => parse_manifest(&manifest),
        Err(e) => {
            warn!(release = %name, error = %e, "Failed to fetch release manifest");
            Vec::new()
        }
    }
}

/// Extract kind/name pairs from a multi-document YAML manifest, keeping
/// document order. Documents without a kind or object name (including
/// empty documents) are skipped.
fn parse_manifest(manifest: &str) -> Vec<ResourceRef> {
    serde_yaml::Deserializer::from_str(manifest)
        .filter_map(|doc| ManifestDoc::deserialize(doc).ok())
        .map(|doc| ResourceRef {
            kind: doc.kind,
            name: doc.metadata.name,
        })
        .collect()
}
