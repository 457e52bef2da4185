//! Label batch planning for FG label printing and existing-data labels.
//!
//! Given a quantity to label, the quantity per label and the last serial the
//! backend handed out, the batch is `floor(total / per_label)` full labels plus
//! one remainder label, numbered contiguously after the last serial.

use serde::{Deserialize, Serialize};

use crate::model::serde_helper::u64_lenient;

/// Most labels one batch may plan; each label is a separate print call.
pub const MAX_LABELS_PER_BATCH: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("Quantity per label must be greater than zero")]
    ZeroPerLabel,

    #[error("Total quantity must be greater than zero")]
    ZeroTotal,

    #[error("Total quantity {requested} exceeds remaining quantity {remaining}")]
    ExceedsRemaining { requested: u64, remaining: u64 },

    #[error("{count} labels requested, at most {max} per batch")]
    TooMany { count: u64, max: u64 },

    #[error("Serial numbers after {last} overflow")]
    SerialOverflow { last: u64 },

    #[error("Row {0} does not exist")]
    NoSuchRow(usize),

    #[error("Label quantity must be greater than zero")]
    ZeroRowQty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRow {
    #[serde(rename = "serial_no", deserialize_with = "u64_lenient")]
    pub serial: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub qty: u64,
}

/// Splits `total_qty` into labels of `qty_per_label`, serials from `last_serial + 1`.
pub fn generate_labels(
    total_qty: u64,
    qty_per_label: u64,
    last_serial: u64,
) -> Result<Vec<LabelRow>, LabelError> {
    if qty_per_label == 0 {
        return Err(LabelError::ZeroPerLabel);
    }
    if total_qty == 0 {
        return Err(LabelError::ZeroTotal);
    }

    let full = total_qty / qty_per_label;
    let remainder = total_qty % qty_per_label;
    let count = full + u64::from(remainder > 0);
    if count > MAX_LABELS_PER_BATCH {
        return Err(LabelError::TooMany {
            count,
            max: MAX_LABELS_PER_BATCH,
        });
    }
    if last_serial.checked_add(count).is_none() {
        return Err(LabelError::SerialOverflow { last: last_serial });
    }

    let mut rows: Vec<LabelRow> = (1..=full)
        .map(|i| LabelRow {
            serial: last_serial + i,
            qty: qty_per_label,
        })
        .collect();
    if remainder > 0 {
        rows.push(LabelRow {
            serial: last_serial + full + 1,
            qty: remainder,
        });
    }
    Ok(rows)
}

/// Generated labels plus the stock they draw from; rows stay editable until printed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelBatch {
    pub rows: Vec<LabelRow>,
    /// Remaining quantity of the selected lot when known.
    pub remaining: Option<u64>,
}

impl LabelBatch {
    pub fn plan(
        total_qty: u64,
        qty_per_label: u64,
        last_serial: u64,
        remaining: Option<u64>,
    ) -> Result<Self, LabelError> {
        if let Some(remaining) = remaining {
            if total_qty > remaining {
                return Err(LabelError::ExceedsRemaining {
                    requested: total_qty,
                    remaining,
                });
            }
        }
        Ok(Self {
            rows: generate_labels(total_qty, qty_per_label, last_serial)?,
            remaining,
        })
    }

    pub fn total_qty(&self) -> u64 {
        self.rows.iter().map(|r| r.qty).sum()
    }

    /// Edits one row's quantity, keeping the batch within the remaining stock.
    pub fn set_qty(&mut self, index: usize, qty: u64) -> Result<(), LabelError> {
        if qty == 0 {
            return Err(LabelError::ZeroRowQty);
        }
        let current = self.rows.get(index).ok_or(LabelError::NoSuchRow(index))?.qty;
        let new_total = self.total_qty() - current + qty;
        if let Some(remaining) = self.remaining {
            if new_total > remaining {
                return Err(LabelError::ExceedsRemaining {
                    requested: new_total,
                    remaining,
                });
            }
        }
        self.rows[index].qty = qty;
        Ok(())
    }
}

/// Outcome of printing a batch one serial at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintProgress {
    pub total: usize,
    pub committed: usize,
    pub failure: Option<(u64, String)>,
}

impl PrintProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            committed: 0,
            failure: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.committed == self.total
    }

    /// Printed labels are not rolled back when a later insert fails.
    pub fn summary(&self) -> String {
        match &self.failure {
            None => format!("{} label(s) sent to printer.", self.committed),
            Some((serial, message)) => format!(
                "Printed {} of {} label(s); serial {} failed: {}. Labels already printed were kept.",
                self.committed, self.total, serial, message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_gets_its_own_label() {
        let rows = generate_labels(25, 10, 100).unwrap();
        assert_eq!(
            rows,
            vec![
                LabelRow { serial: 101, qty: 10 },
                LabelRow { serial: 102, qty: 10 },
                LabelRow { serial: 103, qty: 5 },
            ]
        );
    }

    #[test]
    fn exact_multiple_has_no_remainder_label() {
        let rows = generate_labels(30, 10, 0).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.last(), Some(&LabelRow { serial: 3, qty: 10 }));
    }

    #[test]
    fn total_below_per_label_is_a_single_label() {
        assert_eq!(generate_labels(4, 10, 7).unwrap(), vec![LabelRow { serial: 8, qty: 4 }]);
    }

    #[test]
    fn zero_inputs_are_rejected() {
        assert_eq!(generate_labels(10, 0, 0), Err(LabelError::ZeroPerLabel));
        assert_eq!(generate_labels(0, 10, 0), Err(LabelError::ZeroTotal));
        assert!(matches!(
            generate_labels(10, 1, u64::MAX - 3),
            Err(LabelError::SerialOverflow { .. })
        ));
    }

    #[test]
    fn huge_lots_are_capped_before_allocating() {
        assert_eq!(generate_labels(MAX_LABELS_PER_BATCH, 1, 0).unwrap().len(), 10_000);
        assert_eq!(
            generate_labels(1_000_000_000, 1, 0),
            Err(LabelError::TooMany {
                count: 1_000_000_000,
                max: MAX_LABELS_PER_BATCH
            })
        );
        // 10 000 full labels plus a remainder label is one too many.
        assert!(matches!(
            generate_labels(MAX_LABELS_PER_BATCH * 5 + 1, 5, 0),
            Err(LabelError::TooMany { count: 10_001, .. })
        ));
    }

    #[test]
    fn batch_respects_remaining_stock() {
        assert_eq!(
            LabelBatch::plan(50, 10, 0, Some(40)),
            Err(LabelError::ExceedsRemaining { requested: 50, remaining: 40 })
        );

        let mut batch = LabelBatch::plan(25, 10, 100, Some(30)).unwrap();
        assert_eq!(batch.total_qty(), 25);
        batch.set_qty(2, 10).unwrap();
        assert_eq!(batch.total_qty(), 30);
        assert!(matches!(batch.set_qty(0, 11), Err(LabelError::ExceedsRemaining { .. })));
        assert_eq!(batch.set_qty(0, 0), Err(LabelError::ZeroRowQty));
        assert_eq!(batch.set_qty(9, 1), Err(LabelError::NoSuchRow(9)));
    }

    #[test]
    fn progress_summary_reports_partial_commits() {
        let mut progress = PrintProgress::new(3);
        progress.committed = 1;
        progress.failure = Some((102, "printer offline".into()));
        assert!(!progress.is_complete());
        assert!(progress.summary().contains("Printed 1 of 3"));

        let mut done = PrintProgress::new(2);
        done.committed = 2;
        assert!(done.is_complete());
    }

    #[test]
    fn rows_serialize_with_backend_names() {
        let json = serde_json::to_value(LabelRow { serial: 5, qty: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"serial_no": 5, "qty": 2}));
        let back: LabelRow = serde_json::from_str(r#"{"serial_no":"6","qty":"3"}"#).unwrap();
        assert_eq!(back, LabelRow { serial: 6, qty: 3 });
    }
}
