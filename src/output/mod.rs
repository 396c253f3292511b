mod json;
mod table;

use crate::cli::OutputFormat;
use crate::inventory::InventoryReport;

pub fn render(report: &InventoryReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::render(report),
        OutputFormat::Table => table::render(report),
    }
}
