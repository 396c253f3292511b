use crate::inventory::InventoryReport;

pub fn render(report: &InventoryReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}
