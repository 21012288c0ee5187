use actix_web::{web, HttpResponse};
use serde_json::json;

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
}

#[cfg(test)]
mod tests {
    use crate::app_container::in_memory_application;
    use crate::routes::config;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_health_check() {
        let app =
            test::init_service(App::new().configure(config).app_data(in_memory_application()))
                .await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
