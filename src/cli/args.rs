// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Charts inventoried when -c/--charts is not given
pub const DEFAULT_CHARTS: &[&str] = &["metallb", "endpoint-copier-operator"];

const DEFAULT_KUBECONFIG: &str = "/kubeconfig";

#[derive(Parser, Debug)]
#[command(name = "k8vers")]
#[command(author, version, about = "Report Helm chart and node versions from a Kubernetes cluster")]
pub struct Args {
    /// Path to the kubeconfig file
    #[arg(short, long)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (defaults to the file's current context)
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Comma-separated list of Helm chart names
    #[arg(short, long)]
    pub charts: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Include resources in the output
    #[arg(long)]
    pub show_resources: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn kubeconfig_path(&self) -> PathBuf {
        self.kubeconfig
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KUBECONFIG))
    }

    /// Target release names: the explicit -c list, or the built-in defaults
    pub fn target_charts(&self) -> BTreeSet<String> {
        match &self.charts {
            Some(list) => parse_chart_names(list),
            None => DEFAULT_CHARTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Split a comma-separated chart list, trimming whitespace and dropping
/// empty segments
fn parse_chart_names(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_names_splits_and_trims() {
        let names = parse_chart_names("metallb, traefik ,cert-manager");
        assert_eq!(names.len(), 3);
        assert!(names.contains("metallb"));
        assert!(names.contains("traefik"));
        assert!(names.contains("cert-manager"));
    }

    #[test]
    fn test_parse_chart_names_drops_empty_segments() {
        let names = parse_chart_names("metallb,, ,");
        assert_eq!(names.len(), 1);
        assert!(names.contains("metallb"));
    }

    #[test]
    fn test_default_charts_without_flag() {
        let args = Args::parse_from(["k8vers"]);
        let targets = args.target_charts();
        assert!(targets.contains("metallb"));
        assert!(targets.contains("endpoint-copier-operator"));
    }

    #[test]
    fn test_default_kubeconfig_path() {
        let args = Args::parse_from(["k8vers"]);
        assert_eq!(args.kubeconfig_path(), PathBuf::from("/kubeconfig"));
    }

    #[test]
    fn test_explicit_charts_override_defaults() {
        let args = Args::parse_from(["k8vers", "-c", "traefik"]);
        let targets = args.target_charts();
        assert_eq!(targets.len(), 1);
        assert!(targets.contains("traefik"));
    }
}
