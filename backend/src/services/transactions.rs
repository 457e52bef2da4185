//! Pass-through routes for FG label printing, GRN receipt and stock transfer.

use actix_web::Scope;

use crate::proxy::{self, Endpoint};

const API_PATH: &str = "/api/transactions";

const ENDPOINTS: &[Endpoint] = &[
    proxy::get("/label-printing/item-codes"),
    proxy::get("/label-printing/lot-numbers"),
    proxy::get("/label-printing/item-detail"),
    proxy::get("/label-printing/last-serial"),
    proxy::post("/label-printing/print-insert"),
    proxy::get("/grn/details"),
    proxy::post("/grn/receive"),
    proxy::get("/stock-transfer/warehouses"),
    proxy::post("/stock-transfer/insert"),
];

pub fn configure_routes() -> Scope {
    proxy::scope_for(API_PATH, ENDPOINTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::transactions::{
        LabelSource, GRN_DETAILS_URL, GRN_RECEIVE_URL, STOCK_TRANSFER_URL, WAREHOUSES_URL,
    };

    #[test]
    fn client_urls_are_routed() {
        let source = LabelSource::FgLabelPrinting;
        let expected = [
            source.item_codes_url(),
            source.lot_numbers_url(),
            source.item_detail_url(),
            source.last_serial_url(),
            source.print_insert_url(),
            GRN_DETAILS_URL.to_string(),
            GRN_RECEIVE_URL.to_string(),
            WAREHOUSES_URL.to_string(),
            STOCK_TRANSFER_URL.to_string(),
        ];
        let registered: Vec<String> = ENDPOINTS
            .iter()
            .map(|e| format!("{}{}", API_PATH, e.path))
            .collect();
        assert_eq!(registered, expected);
    }
}
