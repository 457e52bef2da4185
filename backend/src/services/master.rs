//! Pass-through routes for the master-data screens under `/api/master`.
//!
//! Every entity exposes the same three calls: `get-all` to list,
//! `insert` for the create form and `update` for the edit form.

use actix_web::Scope;

use crate::proxy::{self, Endpoint};

const API_PATH: &str = "/api/master";

const ENDPOINTS: &[Endpoint] = &[
    proxy::get("/company/get-all"),
    proxy::post("/company/insert"),
    proxy::put("/company/update"),
    proxy::get("/uom/get-all"),
    proxy::post("/uom/insert"),
    proxy::put("/uom/update"),
    proxy::get("/warehouse-category/get-all"),
    proxy::post("/warehouse-category/insert"),
    proxy::put("/warehouse-category/update"),
    proxy::get("/item-packing/get-all"),
    proxy::post("/item-packing/insert"),
    proxy::put("/item-packing/update"),
    proxy::get("/session/get-all"),
    proxy::post("/session/insert"),
    proxy::put("/session/update"),
];

pub fn configure_routes() -> Scope {
    proxy::scope_for(API_PATH, ENDPOINTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::tests::{backend_at, spawn_fake_backend};
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::App;
    use common::forms::MasterRecord;
    use common::model::master::{Company, ItemPacking, SessionConfig, Uom, WarehouseCategory};
    use serde_json::Value;

    #[test]
    fn record_urls_are_all_registered() {
        fn urls<M: MasterRecord>() -> [String; 3] {
            [M::list_url(), M::insert_url(), M::update_url()]
        }
        let registered: Vec<String> = ENDPOINTS
            .iter()
            .map(|e| format!("{}{}", API_PATH, e.path))
            .collect();
        for url in urls::<Company>()
            .into_iter()
            .chain(urls::<Uom>())
            .chain(urls::<WarehouseCategory>())
            .chain(urls::<ItemPacking>())
            .chain(urls::<SessionConfig>())
        {
            assert!(registered.contains(&url), "{} is not routed", url);
        }
    }

    #[actix_web::test]
    async fn update_is_forwarded_as_put() {
        let (base, handle) = spawn_fake_backend();
        let app = init_service(
            App::new()
                .app_data(backend_at(&base))
                .service(configure_routes()),
        )
        .await;
        let req = TestRequest::put()
            .uri("/api/master/uom/update")
            .insert_header(("Authorization", "Bearer t"))
            .set_json(serde_json::json!({"id": "4", "uom_code": "KG"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["method"], "PUT");
        assert_eq!(body["body"]["uom_code"], "KG");

        let wrong_verb = TestRequest::get()
            .uri("/api/master/uom/update")
            .insert_header(("Authorization", "Bearer t"))
            .to_request();
        let resp = call_service(&app, wrong_verb).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        handle.stop(false).await;
    }
}
