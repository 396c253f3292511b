// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod cli;
mod helm;
mod inventory;
mod kubernetes;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use cli::Args;
use helm::HelmClient;
use kubernetes::ClusterClient;

/// Initialize logging to stderr with an env-filter override
fn init_logging(verbose: bool) {
    let filter = if verbose { "k8vers=debug" } else { "k8vers=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (aws-lc-rs)
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let args = Args::parse();
    init_logging(args.verbose);

    // Pre-flight: a missing kubeconfig is the only fatal error. Everything
    // past this point degrades into a partial report instead of aborting.
    let kubeconfig = args.kubeconfig_path();
    if !kubeconfig.exists() {
        error!(path = %kubeconfig.display(), "Kubeconfig file not found");
        std::process::exit(1);
    }

    let targets = args.target_charts();

    let helm = HelmClient::new(&kubeconfig, args.context.as_deref());
    let cluster = ClusterClient::new(&kubeconfig, args.context.clone());

    let mut report = inventory::aggregate(&helm, &cluster, &targets).await;
    if !args.show_resources {
        report.strip_resources();
    }

    println!("{}", output::render(&report, &args.output));

    Ok(())
}
