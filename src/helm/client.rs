// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Facade over the `helm` binary.
//!
//! Release state is queried by driving `helm` as a subprocess with JSON
//! output. Every invocation carries the kubeconfig credential and, when
//! given, the kubeconfig context.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

/// A release as reported by `helm list`
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseListEntry {
    pub name: String,
    pub namespace: String,
}

/// Chart metadata of a release's current revision, from `helm get metadata`
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseMetadata {
    pub version: String,
    pub revision: u32,
}

/// Client for the Helm protocol, reached through a kubeconfig credential
pub struct HelmClient {
    kubeconfig: PathBuf,
    context: Option<String>,
}

impl HelmClient {
    pub fn new(kubeconfig: &Path, context: Option<&str>) -> Self {
        Self {
            kubeconfig: kubeconfig.to_path_buf(),
            context: context.map(String::from),
        }
    }

    /// List all releases across all namespaces
    pub async fn list_releases(&self) -> Result<Vec<ReleaseListEntry>> {
        let stdout = self
            .run(&["list", "--all-namespaces", "--output", "json"])
            .await?;
        parse_release_list(&stdout)
    }

    /// Fetch the current revision's chart metadata for a release
    pub async fn release_metadata(&self, name: &str, namespace: &str) -> Result<ReleaseMetadata> {
        let stdout = self
            .run(&[
                "get",
                "metadata",
                name,
                "--namespace",
                namespace,
                "--output",
                "json",
            ])
            .await?;
        parse_release_metadata(&stdout)
    }

    /// Fetch the rendered manifest of a release (multi-document YAML)
    pub async fn release_manifest(&self, name: &str, namespace: &str) -> Result<String> {
        let stdout = self
            .run(&["get", "manifest", name, "--namespace", namespace])
            .await?;
        String::from_utf8(stdout).context("helm manifest is not valid UTF-8")
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        let mut cmd = Command::new("helm");
        cmd.args(args)
            .arg("--kubeconfig")
            .arg(&self.kubeconfig)
            .stdin(Stdio::null());
        if let Some(ref context) = self.context {
            cmd.arg("--kube-context").arg(context);
        }

        debug!(args = ?args, "Running helm");
        let output = cmd.output().await.context("Failed to execute helm")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "helm {} failed: {}",
                args.first().unwrap_or(&""),
                stderr.trim()
            );
        }

        Ok(output.stdout)
    }
}

fn parse_release_list(json: &[u8]) -> Result<Vec<ReleaseListEntry>> {
    serde_json::from_slice(json).context("Invalid JSON from helm list")
}

fn parse_release_metadata(json: &[u8]) -> Result<ReleaseMetadata> {
    serde_json::from_slice(json).context("Invalid JSON from helm get metadata")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_JSON: &[u8] = br#"[
        {"name":"metallb","namespace":"metallb-system","revision":"3","updated":"2025-05-12 09:41:02.123 +0000 UTC","status":"deployed","chart":"metallb-0.14.3","app_version":"v0.14.3"},
        {"name":"traefik","namespace":"kube-system","revision":"1","updated":"2025-04-02 16:05:44.901 +0000 UTC","status":"deployed","chart":"traefik-25.0.0","app_version":"v2.10.4"}
    ]"#;

    #[test]
    fn test_parse_list_keeps_name_and_namespace() {
        let releases = parse_release_list(LIST_JSON).unwrap();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].name, "metallb");
        assert_eq!(releases[0].namespace, "metallb-system");
        assert_eq!(releases[1].name, "traefik");
        assert_eq!(releases[1].namespace, "kube-system");
    }

    #[test]
    fn test_parse_empty_list() {
        let releases = parse_release_list(b"[]").unwrap();
        assert!(releases.is_empty());
    }

    #[test]
    fn test_parse_list_rejects_invalid_json() {
        assert!(parse_release_list(b"Error: unknown command").is_err());
    }

    #[test]
    fn test_parse_metadata_reads_version_and_revision() {
        let json = br#"{"name":"metallb","chart":"metallb","version":"0.14.3","appVersion":"v0.14.3","namespace":"metallb-system","revision":3,"status":"deployed","deployedAt":"2025-05-12T09:41:02Z"}"#;
        let meta = parse_release_metadata(json).unwrap();
        assert_eq!(meta.version, "0.14.3");
        assert_eq!(meta.revision, 3);
    }

    #[test]
    fn test_parse_metadata_rejects_invalid_json() {
        assert!(parse_release_metadata(b"release: not found").is_err());
    }
}
