use actix_web::web;

use crate::{
    handlers::{admin, auth, contact, home::home, pages, preferences, site, system},
    middlewares::auth::AuthMiddleware,
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(system::health_check))
            .route("/site", web::get().to(site::site_chrome))
            .configure(page_routes)
            .route("/contact", web::post().to(contact::submit_contact_form))
            .configure(preference_routes)
            .configure(auth_routes)
            .configure(admin_routes)
    );
}

fn page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pages")
            .route("/home", web::get().to(pages::home_page))
            .route("/projects", web::get().to(pages::projects_page))
            .route("/projects/{project_id}", web::get().to(pages::project_detail_page))
            .route("/blog", web::get().to(pages::blog_page))
            .route("/blog/{slug}", web::get().to(pages::blog_post_page))
            .route("/about", web::get().to(pages::about_page))
            .route("/resume", web::get().to(pages::resume_page))
            .route("/contact", web::get().to(pages::contact_page))
    );
}

fn preference_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/preferences")
            .service(
                web::resource("/theme")
                    .route(web::get().to(preferences::get_theme))
                    .route(web::put().to(preferences::set_theme))
            )
            .route("/theme/toggle", web::post().to(preferences::toggle_theme))
    );
}

fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/sign-up", web::post().to(auth::sign_up))
            .route("/sign-in", web::post().to(auth::sign_in))
            .route("/refresh", web::post().to(auth::refresh))
            .service(
                web::resource("/sign-out")
                    .wrap(AuthMiddleware)
                    .route(web::post().to(auth::sign_out))
            )
            .service(
                web::resource("/session")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(auth::session))
            )
    );
}

fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware)
            .route("/dashboard", web::get().to(admin::dashboard))
            .service(
                web::resource("/{tab}")
                    .route(web::get().to(admin::list_tab))
                    .route(web::post().to(admin::create_item))
            )
            .service(
                web::resource("/{tab}/{id}")
                    .route(web::put().to(admin::update_item))
                    .route(web::delete().to(admin::delete_item))
            )
    );
}
