//! Transaction payloads: label printing lookups, GRN receipt and stock transfer.

use serde::{Deserialize, Serialize};

use crate::labels::LabelRow;
use crate::model::serde_helper::{f64_lenient, string_lenient, u64_lenient};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    #[error("GRN number is required")]
    MissingGrn,

    #[error("Enter a received quantity for at least one line")]
    NothingReceived,

    #[error("Line {item_code}: received {received} exceeds pending {pending}")]
    OverReceipt {
        item_code: String,
        received: String,
        pending: String,
    },

    #[error("Line {0}: quantity cannot be negative")]
    NegativeQty(String),

    #[error("Select both warehouses")]
    MissingWarehouse,

    #[error("From and To warehouse must be different")]
    SameWarehouse,

    #[error("Add at least one line to transfer")]
    NoLines,

    #[error("Line {0}: item code and lot are required")]
    IncompleteLine(usize),

    #[error("Line {0}: quantity must be greater than zero")]
    ZeroQty(usize),
}

// ── Label printing lookups ──────────────────────────────────────────

/// Which screen drives the label workflow; both speak the same endpoint set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    /// Transactions → FG Label Printing.
    FgLabelPrinting,
    /// Labels for stock that predates the system.
    ExistingData,
}

impl LabelSource {
    pub fn title(&self) -> &'static str {
        match self {
            LabelSource::FgLabelPrinting => "FG Label Printing",
            LabelSource::ExistingData => "Existing Data Labels",
        }
    }

    pub fn base(&self) -> &'static str {
        match self {
            LabelSource::FgLabelPrinting => "/api/transactions/label-printing",
            LabelSource::ExistingData => "/api/existing-data",
        }
    }

    pub fn item_codes_url(&self) -> String {
        format!("{}/item-codes", self.base())
    }

    /// Expects `item_code` as query parameter.
    pub fn lot_numbers_url(&self) -> String {
        format!("{}/lot-numbers", self.base())
    }

    /// Expects `item_code` and `lot_no` as query parameters.
    pub fn item_detail_url(&self) -> String {
        format!("{}/item-detail", self.base())
    }

    /// Expects `item_code` and `lot_no` as query parameters.
    pub fn last_serial_url(&self) -> String {
        format!("{}/last-serial", self.base())
    }

    pub fn print_insert_url(&self) -> String {
        format!("{}/print-insert", self.base())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemCode {
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LotNumber {
    #[serde(default, deserialize_with = "string_lenient")]
    pub lot_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemDetail {
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_description: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub lot_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub uom: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub remaining_qty: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LastSerial {
    #[serde(default, deserialize_with = "u64_lenient")]
    pub last_serial: u64,
}

/// One print-insert call; the backend prints and records a single label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintInsertRequest {
    pub item_code: String,
    pub lot_no: String,
    pub serial_no: u64,
    pub qty: u64,
    pub printed_by: String,
    pub plant_code: String,
}

impl PrintInsertRequest {
    pub fn for_row(detail: &ItemDetail, row: &LabelRow, user_id: &str, plant_code: &str) -> Self {
        Self {
            item_code: detail.item_code.clone(),
            lot_no: detail.lot_no.clone(),
            serial_no: row.serial,
            qty: row.qty,
            printed_by: user_id.to_string(),
            plant_code: plant_code.to_string(),
        }
    }
}

// ── GRN receipt ─────────────────────────────────────────────────────

pub const GRN_DETAILS_URL: &str = "/api/transactions/grn/details";
pub const GRN_RECEIVE_URL: &str = "/api/transactions/grn/receive";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GrnLine {
    #[serde(default, deserialize_with = "string_lenient")]
    pub line_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_description: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub uom: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub ordered_qty: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub pending_qty: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub received_qty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GrnHeader {
    #[serde(default, deserialize_with = "string_lenient")]
    pub grn_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub grn_date: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub vendor_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub vendor_name: String,
    #[serde(default)]
    pub lines: Vec<GrnLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrnReceiptRequest {
    pub grn_no: String,
    pub received_by: String,
    pub lines: Vec<GrnLine>,
}

impl GrnReceiptRequest {
    /// Keeps only lines with a received quantity; rejects over-receipt.
    pub fn build(header: &GrnHeader, received_by: &str) -> Result<Self, TransactionError> {
        if header.grn_no.trim().is_empty() {
            return Err(TransactionError::MissingGrn);
        }
        for line in &header.lines {
            if line.received_qty < 0.0 {
                return Err(TransactionError::NegativeQty(line.item_code.clone()));
            }
            if line.received_qty > line.pending_qty {
                return Err(TransactionError::OverReceipt {
                    item_code: line.item_code.clone(),
                    received: crate::reports::format_qty(line.received_qty),
                    pending: crate::reports::format_qty(line.pending_qty),
                });
            }
        }
        let lines: Vec<GrnLine> = header
            .lines
            .iter()
            .filter(|l| l.received_qty > 0.0)
            .cloned()
            .collect();
        if lines.is_empty() {
            return Err(TransactionError::NothingReceived);
        }
        Ok(Self {
            grn_no: header.grn_no.trim().to_string(),
            received_by: received_by.to_string(),
            lines,
        })
    }
}

// ── Stock transfer ──────────────────────────────────────────────────

pub const WAREHOUSES_URL: &str = "/api/transactions/stock-transfer/warehouses";
pub const STOCK_TRANSFER_URL: &str = "/api/transactions/stock-transfer/insert";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Warehouse {
    #[serde(default, deserialize_with = "string_lenient")]
    pub warehouse_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub warehouse_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StockTransferLine {
    pub item_code: String,
    pub lot_no: String,
    #[serde(deserialize_with = "f64_lenient")]
    pub qty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransferRequest {
    pub from_warehouse: String,
    pub to_warehouse: String,
    pub transferred_by: String,
    pub lines: Vec<StockTransferLine>,
}

impl StockTransferRequest {
    pub fn build(
        from: &str,
        to: &str,
        lines: &[StockTransferLine],
        transferred_by: &str,
    ) -> Result<Self, TransactionError> {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(TransactionError::MissingWarehouse);
        }
        if from == to {
            return Err(TransactionError::SameWarehouse);
        }
        if lines.is_empty() {
            return Err(TransactionError::NoLines);
        }
        let mut cleaned = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            let number = index + 1;
            if line.item_code.trim().is_empty() || line.lot_no.trim().is_empty() {
                return Err(TransactionError::IncompleteLine(number));
            }
            if line.qty.is_nan() || line.qty <= 0.0 {
                return Err(TransactionError::ZeroQty(number));
            }
            cleaned.push(StockTransferLine {
                item_code: line.item_code.trim().to_string(),
                lot_no: line.lot_no.trim().to_string(),
                qty: line.qty,
            });
        }
        Ok(Self {
            from_warehouse: from.to_string(),
            to_warehouse: to.to_string(),
            transferred_by: transferred_by.to_string(),
            lines: cleaned,
        })
    }
}
