use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    web, HttpRequest, HttpResponse, Responder,
};

use crate::entities::theme::{
    Theme, ThemeOrigin, ThemePreference, ThemeUpdate, COLOR_SCHEME_HINT, THEME_COOKIE,
};

const THEME_COOKIE_MAX_AGE: Duration = Duration::days(365);

fn current_preference(req: &HttpRequest) -> ThemePreference {
    let cookie = req.cookie(THEME_COOKIE);
    let hint = req
        .headers()
        .get(COLOR_SCHEME_HINT)
        .and_then(|value| value.to_str().ok());
    let (theme, origin) = Theme::resolve(cookie.as_ref().map(|c| c.value()), hint);
    ThemePreference { theme, origin }
}

fn persisted(theme: Theme) -> HttpResponse {
    let cookie = Cookie::build(THEME_COOKIE, theme.as_str())
        .path("/")
        .max_age(THEME_COOKIE_MAX_AGE)
        .same_site(SameSite::Lax)
        .finish();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(ThemePreference { theme, origin: ThemeOrigin::Cookie })
}

pub async fn get_theme(req: HttpRequest) -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Accept-CH", COLOR_SCHEME_HINT))
        .json(current_preference(&req))
}

pub async fn set_theme(body: web::Json<ThemeUpdate>) -> impl Responder {
    persisted(body.theme)
}

pub async fn toggle_theme(req: HttpRequest) -> impl Responder {
    persisted(current_preference(&req).theme.toggled())
}
