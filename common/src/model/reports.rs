//! Rows returned by the report endpoints.

use serde::{Deserialize, Serialize};

use crate::listing::Searchable;
use crate::model::serde_helper::{f64_lenient, string_lenient};
use crate::reports::{Column, FilterSpec, ReportRow, StatCard, col, distinct_count, format_qty};

fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FgLabelPrintingRow {
    #[serde(default, deserialize_with = "string_lenient")]
    pub print_date: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_description: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub lot_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub serial_no: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub qty: f64,
    #[serde(default, deserialize_with = "string_lenient")]
    pub printed_by: String,
}

const FG_LABEL_FILTERS: &[FilterSpec] = &[
    FilterSpec { key: "item_code", label: "Item Code" },
    FilterSpec { key: "lot_no", label: "Lot No" },
];
const FG_LABEL_COLUMNS: &[Column] = &[
    col("print_date", "Print Date"),
    col("item_code", "Item Code"),
    col("item_description", "Description"),
    col("lot_no", "Lot No"),
    col("serial_no", "Serial No"),
    col("qty", "Qty"),
    col("printed_by", "Printed By"),
];

impl Searchable for FgLabelPrintingRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.item_code.as_str(),
            self.item_description.as_str(),
            self.lot_no.as_str(),
            self.serial_no.as_str(),
            self.printed_by.as_str(),
        ]
    }
}

impl ReportRow for FgLabelPrintingRow {
    const TITLE: &'static str = "FG Label Printing Report";
    const ENDPOINT: &'static str = "/api/reports/fg-label-printing";

    fn filters() -> &'static [FilterSpec] {
        FG_LABEL_FILTERS
    }

    fn columns() -> &'static [Column] {
        FG_LABEL_COLUMNS
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "print_date" => self.print_date.clone(),
            "item_code" => self.item_code.clone(),
            "item_description" => self.item_description.clone(),
            "lot_no" => self.lot_no.clone(),
            "serial_no" => self.serial_no.clone(),
            "qty" => format_qty(self.qty),
            "printed_by" => self.printed_by.clone(),
            _ => String::new(),
        }
    }

    fn stats(rows: &[Self]) -> Vec<StatCard> {
        vec![
            StatCard { label: "Labels", value: rows.len() as f64 },
            StatCard {
                label: "Items",
                value: distinct_count(rows.iter().map(|r| r.item_code.as_str())),
            },
            StatCard {
                label: "Lots",
                value: distinct_count(rows.iter().map(|r| r.lot_no.as_str())),
            },
            StatCard { label: "Total Qty", value: total(rows.iter().map(|r| r.qty)) },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MaterialReceiptRow {
    #[serde(default, deserialize_with = "string_lenient")]
    pub grn_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub grn_date: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub vendor_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub vendor_name: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_description: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub ordered_qty: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub received_qty: f64,
    #[serde(default, deserialize_with = "string_lenient")]
    pub uom: String,
}

const RECEIPT_FILTERS: &[FilterSpec] = &[
    FilterSpec { key: "grn_no", label: "GRN No" },
    FilterSpec { key: "vendor_code", label: "Vendor Code" },
    FilterSpec { key: "item_code", label: "Item Code" },
];
const RECEIPT_COLUMNS: &[Column] = &[
    col("grn_no", "GRN No"),
    col("grn_date", "GRN Date"),
    col("vendor_name", "Vendor"),
    col("item_code", "Item Code"),
    col("item_description", "Description"),
    col("ordered_qty", "Ordered Qty"),
    col("received_qty", "Received Qty"),
    col("uom", "UOM"),
];

impl Searchable for MaterialReceiptRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.grn_no.as_str(),
            self.vendor_code.as_str(),
            self.vendor_name.as_str(),
            self.item_code.as_str(),
            self.item_description.as_str(),
        ]
    }
}

impl ReportRow for MaterialReceiptRow {
    const TITLE: &'static str = "Material Receipt Report";
    const ENDPOINT: &'static str = "/api/reports/material-receipt";

    fn filters() -> &'static [FilterSpec] {
        RECEIPT_FILTERS
    }

    fn columns() -> &'static [Column] {
        RECEIPT_COLUMNS
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "grn_no" => self.grn_no.clone(),
            "grn_date" => self.grn_date.clone(),
            "vendor_code" => self.vendor_code.clone(),
            "vendor_name" => self.vendor_name.clone(),
            "item_code" => self.item_code.clone(),
            "item_description" => self.item_description.clone(),
            "ordered_qty" => format_qty(self.ordered_qty),
            "received_qty" => format_qty(self.received_qty),
            "uom" => self.uom.clone(),
            _ => String::new(),
        }
    }

    fn stats(rows: &[Self]) -> Vec<StatCard> {
        vec![
            StatCard { label: "Rows", value: rows.len() as f64 },
            StatCard {
                label: "GRNs",
                value: distinct_count(rows.iter().map(|r| r.grn_no.as_str())),
            },
            StatCard {
                label: "Vendors",
                value: distinct_count(rows.iter().map(|r| r.vendor_code.as_str())),
            },
            StatCard {
                label: "Received Qty",
                value: total(rows.iter().map(|r| r.received_qty)),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MaterialReturnRow {
    #[serde(default, deserialize_with = "string_lenient")]
    pub return_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub return_date: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_description: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub lot_no: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub return_qty: f64,
    #[serde(default, deserialize_with = "string_lenient")]
    pub reason: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub returned_by: String,
}

const RETURN_FILTERS: &[FilterSpec] = &[
    FilterSpec { key: "item_code", label: "Item Code" },
    FilterSpec { key: "lot_no", label: "Lot No" },
];
const RETURN_COLUMNS: &[Column] = &[
    col("return_no", "Return No"),
    col("return_date", "Return Date"),
    col("item_code", "Item Code"),
    col("item_description", "Description"),
    col("lot_no", "Lot No"),
    col("return_qty", "Returned Qty"),
    col("reason", "Reason"),
    col("returned_by", "Returned By"),
];

impl Searchable for MaterialReturnRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.return_no.as_str(),
            self.item_code.as_str(),
            self.item_description.as_str(),
            self.lot_no.as_str(),
            self.reason.as_str(),
        ]
    }
}

impl ReportRow for MaterialReturnRow {
    const TITLE: &'static str = "Material Return Report";
    const ENDPOINT: &'static str = "/api/reports/material-return";

    fn filters() -> &'static [FilterSpec] {
        RETURN_FILTERS
    }

    fn columns() -> &'static [Column] {
        RETURN_COLUMNS
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "return_no" => self.return_no.clone(),
            "return_date" => self.return_date.clone(),
            "item_code" => self.item_code.clone(),
            "item_description" => self.item_description.clone(),
            "lot_no" => self.lot_no.clone(),
            "return_qty" => format_qty(self.return_qty),
            "reason" => self.reason.clone(),
            "returned_by" => self.returned_by.clone(),
            _ => String::new(),
        }
    }

    fn stats(rows: &[Self]) -> Vec<StatCard> {
        vec![
            StatCard { label: "Rows", value: rows.len() as f64 },
            StatCard {
                label: "Items",
                value: distinct_count(rows.iter().map(|r| r.item_code.as_str())),
            },
            StatCard {
                label: "Returned Qty",
                value: total(rows.iter().map(|r| r.return_qty)),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FgMovementRow {
    #[serde(default, deserialize_with = "string_lenient")]
    pub movement_date: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub movement_type: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub serial_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub lot_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub from_location: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub to_location: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub qty: f64,
    #[serde(default, deserialize_with = "string_lenient")]
    pub moved_by: String,
}

const MOVEMENT_FILTERS: &[FilterSpec] = &[
    FilterSpec { key: "serial_no", label: "Serial No" },
    FilterSpec { key: "item_code", label: "Item Code" },
];
const MOVEMENT_COLUMNS: &[Column] = &[
    col("movement_date", "Date"),
    col("movement_type", "Type"),
    col("serial_no", "Serial No"),
    col("item_code", "Item Code"),
    col("lot_no", "Lot No"),
    col("from_location", "From"),
    col("to_location", "To"),
    col("qty", "Qty"),
    col("moved_by", "Moved By"),
];

impl Searchable for FgMovementRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.movement_type.as_str(),
            self.serial_no.as_str(),
            self.item_code.as_str(),
            self.lot_no.as_str(),
            self.from_location.as_str(),
            self.to_location.as_str(),
        ]
    }
}

impl ReportRow for FgMovementRow {
    const TITLE: &'static str = "FG Movement Report";
    const ENDPOINT: &'static str = "/api/reports/fg-movement";

    fn filters() -> &'static [FilterSpec] {
        MOVEMENT_FILTERS
    }

    fn columns() -> &'static [Column] {
        MOVEMENT_COLUMNS
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "movement_date" => self.movement_date.clone(),
            "movement_type" => self.movement_type.clone(),
            "serial_no" => self.serial_no.clone(),
            "item_code" => self.item_code.clone(),
            "lot_no" => self.lot_no.clone(),
            "from_location" => self.from_location.clone(),
            "to_location" => self.to_location.clone(),
            "qty" => format_qty(self.qty),
            "moved_by" => self.moved_by.clone(),
            _ => String::new(),
        }
    }

    fn stats(rows: &[Self]) -> Vec<StatCard> {
        vec![
            StatCard { label: "Rows", value: rows.len() as f64 },
            StatCard {
                label: "Serials",
                value: distinct_count(rows.iter().map(|r| r.serial_no.as_str())),
            },
            StatCard { label: "Total Qty", value: total(rows.iter().map(|r| r.qty)) },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::filter_rows;
    use crate::reports::export_request;

    fn receipts() -> Vec<MaterialReceiptRow> {
        serde_json::from_str(
            r#"[
                {"grn_no": "GRN-1", "vendor_code": "V1", "vendor_name": "Steel Co", "item_code": "RM-1", "received_qty": "40"},
                {"grn_no": "GRN-1", "vendor_code": "V1", "vendor_name": "Steel Co", "item_code": "RM-2", "received_qty": 10.5},
                {"grn_no": "GRN-2", "vendor_code": "V2", "vendor_name": "Paint Ltd", "item_code": "RM-3", "received_qty": null}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn receipt_stats_count_distinct_and_sum() {
        let stats = MaterialReceiptRow::stats(&receipts());
        let values: Vec<f64> = stats.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![3.0, 2.0, 2.0, 50.5]);
    }

    #[test]
    fn export_mirrors_filtered_rows() {
        let rows = receipts();
        let visible = filter_rows(&rows, "steel");
        let req = export_request(&visible);
        assert_eq!(req.title, "Material Receipt Report");
        assert_eq!(req.columns.len(), MaterialReceiptRow::columns().len());
        assert_eq!(req.rows.len(), 2);
        assert_eq!(req.rows[1][6], "10.5");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn every_column_has_a_cell() {
        let row = FgMovementRow {
            movement_date: "2024-05-01".into(),
            movement_type: "DISPATCH".into(),
            serial_no: "101".into(),
            item_code: "FG-1".into(),
            lot_no: "L1".into(),
            from_location: "WH-A".into(),
            to_location: "DOCK".into(),
            qty: 5.0,
            moved_by: "op1".into(),
        };
        for column in FgMovementRow::columns() {
            assert!(!row.cell(column.key).is_empty(), "{}", column.key);
        }
    }

    #[test]
    fn empty_result_yields_zero_cards() {
        let stats = FgLabelPrintingRow::stats(&[]);
        assert_eq!(stats.len(), 4);
        assert!(stats.iter().all(|s| s.value == 0.0));
        assert_eq!(MaterialReturnRow::stats(&[]).len(), 3);
    }
}
