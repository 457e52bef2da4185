use common::labels::{LabelBatch, PrintProgress};
use common::model::transactions::{ItemCode, ItemDetail, LotNumber};
use yew::NodeRef;

use crate::session::SessionContext;

pub struct LabelScreen {
    pub items: Vec<ItemCode>,
    pub lots: Vec<LotNumber>,
    pub item_code: String,
    pub lot_no: String,
    /// Remaining stock of the selected lot.
    pub detail: Option<ItemDetail>,
    pub last_serial: Option<u64>,
    pub qty_per_label: String,
    pub total_qty: String,
    pub batch: LabelBatch,
    /// Outcome of the last print run, kept on screen until the next one.
    pub progress: Option<PrintProgress>,
    pub printing: bool,
    pub confirm_ref: NodeRef,
    pub session: Option<SessionContext>,
}

impl LabelScreen {
    pub fn new(session: Option<SessionContext>) -> Self {
        Self {
            items: Vec::new(),
            lots: Vec::new(),
            item_code: String::new(),
            lot_no: String::new(),
            detail: None,
            last_serial: None,
            qty_per_label: String::new(),
            total_qty: String::new(),
            batch: LabelBatch::default(),
            progress: None,
            printing: false,
            confirm_ref: NodeRef::default(),
            session,
        }
    }

    /// Forgets everything below the item selection.
    pub fn clear_lot(&mut self) {
        self.lot_no.clear();
        self.detail = None;
        self.last_serial = None;
        self.batch = LabelBatch::default();
    }

    /// Whether an answer for `item_code`/`lot_no` still matches the selection.
    pub fn is_current_lot(&self, item_code: &str, lot_no: &str) -> bool {
        self.item_code == item_code && self.lot_no == lot_no
    }
}

/// Parses a whole quantity typed by the user.
pub fn parse_qty(raw: &str, label: &str) -> Result<u64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("{} is required", label));
    }
    raw.parse::<u64>()
        .map_err(|_| format!("{} must be a whole number", label))
}

#[cfg(test)]
mod tests {
    use super::{parse_qty, LabelScreen};

    #[test]
    fn quantities_must_be_whole_numbers() {
        assert_eq!(parse_qty(" 25 ", "Total"), Ok(25));
        assert_eq!(parse_qty("", "Total"), Err("Total is required".to_string()));
        assert_eq!(
            parse_qty("2.5", "Qty per label"),
            Err("Qty per label must be a whole number".to_string())
        );
    }

    #[test]
    fn detail_for_another_item_is_stale_even_with_the_same_lot() {
        let mut screen = LabelScreen::new(None);
        screen.item_code = "FG-200".into();
        screen.lot_no = "L01".into();
        assert!(screen.is_current_lot("FG-200", "L01"));
        assert!(!screen.is_current_lot("FG-100", "L01"));
        assert!(!screen.is_current_lot("FG-200", "L02"));
    }
}
