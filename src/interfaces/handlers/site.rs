use actix_web::{HttpResponse, Responder};

use crate::entities::site::SiteChrome;

pub async fn site_chrome() -> impl Responder {
    HttpResponse::Ok().json(SiteChrome::current())
}
