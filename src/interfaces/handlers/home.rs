use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the portfolio site API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "pages": "/api/v1/pages",
        "health": "/api/v1/health"
    }))
}
