use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact::ContactForm,
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

#[instrument(skip(req, state, form))]
pub async fn submit_contact_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let client = get_client_ip(&req, state.config.trust_forwarded_for);
    let acknowledgement = state.contact_handler.submit(&client, form.into_inner())?;
    Ok(HttpResponse::Ok().json(acknowledgement))
}
