use actix_web::web;

pub mod posts;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(posts::find))
                            .route(web::put().to(posts::update))
                            .route(web::delete().to(posts::delete)),
                    ),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("/login", web::post().to(users::login))
                    .route("/profile/{id}", web::delete().to(users::delete_profile)),
            ),
    );
}
