use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use tokio::sync::OnceCell;
use tracing::debug;

/// Timeout for connecting to the K8s API
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for reading K8s API responses
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Kubernetes API client scoped to one kubeconfig credential.
///
/// The connection is established lazily on first use and reused for the
/// rest of the run, so a broken kubeconfig degrades the callers that need
/// the API instead of failing the whole invocation up front.
pub struct ClusterClient {
    kubeconfig: PathBuf,
    context: Option<String>,
    client: OnceCell<Client>,
}

impl ClusterClient {
    pub fn new(kubeconfig: &Path, context: Option<String>) -> Self {
        Self {
            kubeconfig: kubeconfig.to_path_buf(),
            context,
            client: OnceCell::new(),
        }
    }

    /// List pods in a namespace matching a label selector
    pub async fn pods_labeled(&self, namespace: &str, selector: &str) -> Result<Vec<Pod>> {
        let client = self.client().await?;
        let api: Api<Pod> = Api::namespaced(client, namespace);
        let params = ListParams::default().labels(selector);

        debug!(namespace = %namespace, selector = %selector, "Listing pods");
        let pods = api
            .list(&params)
            .await
            .with_context(|| format!("Failed to list pods in namespace '{}'", namespace))?;

        Ok(pods.items)
    }

    /// List all nodes in the cluster
    pub async fn list_nodes(&self) -> Result<Vec<Node>> {
        let client = self.client().await?;
        let api: Api<Node> = Api::all(client);

        debug!("Listing nodes");
        let nodes = api
            .list(&ListParams::default())
            .await
            .context("Failed to list nodes")?;

        Ok(nodes.items)
    }

    async fn client(&self) -> Result<Client> {
        self.client
            .get_or_try_init(|| self.connect())
            .await
            .map(Clone::clone)
    }

    async fn connect(&self) -> Result<Client> {
        let kubeconfig = Kubeconfig::read_from(&self.kubeconfig).with_context(|| {
            format!("Failed to read kubeconfig at {}", self.kubeconfig.display())
        })?;

        let mut config = Config::from_custom_kubeconfig(
            kubeconfig,
            &KubeConfigOptions {
                context: self.context.clone(),
                ..Default::default()
            },
        )
        .await
        .context("Failed to load kubeconfig")?;

        // Timeouts for reliability
        config.connect_timeout = Some(CONNECT_TIMEOUT);
        config.read_timeout = Some(READ_TIMEOUT);

        Client::try_from(config).context("Failed to create Kubernetes client")
    }
}
