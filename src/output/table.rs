use std::collections::BTreeMap;

use comfy_table::{Table, presets::ASCII_BORDERS_ONLY_CONDENSED};

use crate::inventory::{InventoryReport, NodeFacts, ReleaseInventory};

pub fn render(report: &InventoryReport) -> String {
    let mut sections = Vec::new();

    for (name, entry) in &report.helm_charts {
        sections.push(release_section(name, entry));
    }
    sections.push(node_section(&report.nodes));

    sections.join("\n\n")
}

fn release_section(name: &str, entry: &ReleaseInventory) -> String {
    let mut parts = vec![format!("Release: {}", name)];

    let mut chart = new_table();
    chart.add_row(["Version", entry.version.as_str()]);
    chart.add_row(["Namespace", entry.namespace.as_str()]);
    chart.add_row(["Revision", entry.revision.to_string().as_str()]);
    parts.push(chart.to_string());

    if let Some(resources) = &entry.resources {
        let mut table = new_table();
        table.set_header(["Kind", "Name"]);
        for resource in resources {
            table.add_row([resource.kind.as_str(), resource.name.as_str()]);
        }
        parts.push(format!("Resources:\n{}", table));
    }

    let mut pods = new_table();
    pods.set_header(["Pod Name", "Images"]);
    for (pod, images) in &entry.pods {
        pods.add_row([pod.as_str(), images.join(", ").as_str()]);
    }
    parts.push(format!("Pods:\n{}", pods));

    parts.join("\n\n")
}

fn node_section(nodes: &BTreeMap<String, NodeFacts>) -> String {
    let mut table = new_table();
    table.set_header([
        "Node",
        "Architecture",
        "Kernel Version",
        "Kubelet Version",
        "Operating System",
        "OS Image",
    ]);
    for (name, facts) in nodes {
        table.add_row([
            name.as_str(),
            facts.architecture.as_str(),
            facts.kernel_version.as_str(),
            facts.kubelet_version.as_str(),
            facts.operating_system.as_str(),
            facts.os_image.as_str(),
        ]);
    }
    format!("Node Information:\n{}", table)
}

fn new_table() -> Table {
    let mut table = Table::new();
    // ASCII_BORDERS_ONLY_CONDENSED keeps output readable in plain terminals
    table.load_preset(ASCII_BORDERS_ONLY_CONDENSED);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{PodImageSet, ResourceRef};

    fn sample_report(resources: Option<Vec<ResourceRef>>) -> InventoryReport {
        let mut pods = PodImageSet::new();
        pods.insert(
            "metallb-controller-7n2xz".to_string(),
            vec![
                "quay.io/metallb/controller:v0.14.3".to_string(),
                "quay.io/frr/frr:8.5.2".to_string(),
            ],
        );

        let mut helm_charts = BTreeMap::new();
        helm_charts.insert(
            "metallb".to_string(),
            ReleaseInventory {
                version: "0.14.3".to_string(),
                namespace: "metallb-system".to_string(),
                revision: 3,
                resources,
                pods,
            },
        );

        let mut nodes = BTreeMap::new();
        nodes.insert(
            "node-1".to_string(),
            NodeFacts {
                architecture: "amd64".to_string(),
                kernel_version: "6.1.0-18-amd64".to_string(),
                kubelet_version: "v1.29.4".to_string(),
                operating_system: "linux".to_string(),
                os_image: "Debian GNU/Linux 12 (bookworm)".to_string(),
            },
        );

        InventoryReport { helm_charts, nodes }
    }

    #[test]
    fn test_release_block_contains_metadata() {
        let output = render(&sample_report(None));
        assert!(output.contains("Release: metallb"));
        assert!(output.contains("Version"));
        assert!(output.contains("0.14.3"));
        assert!(output.contains("metallb-system"));
        assert!(output.contains("Revision"));
    }

    #[test]
    fn test_images_are_comma_joined() {
        let output = render(&sample_report(None));
        assert!(output.contains("quay.io/metallb/controller:v0.14.3, quay.io/frr/frr:8.5.2"));
    }

    #[test]
    fn test_resources_section_only_when_present() {
        let without = render(&sample_report(None));
        assert!(!without.contains("Resources:"));

        let with = render(&sample_report(Some(vec![ResourceRef {
            kind: "Deployment".to_string(),
            name: "metallb-controller".to_string(),
        }])));
        assert!(with.contains("Resources:"));
        assert!(with.contains("Deployment"));
    }

    #[test]
    fn test_node_table_lists_all_columns() {
        let output = render(&sample_report(None));
        assert!(output.contains("Node Information:"));
        assert!(output.contains("node-1"));
        assert!(output.contains("amd64"));
        assert!(output.contains("6.1.0-18-amd64"));
        assert!(output.contains("v1.29.4"));
        assert!(output.contains("Debian GNU/Linux 12 (bookworm)"));
    }

    #[test]
    fn test_empty_report_still_renders_node_section() {
        let report = InventoryReport {
            helm_charts: BTreeMap::new(),
            nodes: BTreeMap::new(),
        };
        let output = render(&report);
        assert!(output.contains("Node Information:"));
        assert!(!output.contains("Release:"));
    }
}
