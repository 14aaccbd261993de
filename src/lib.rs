#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod projection;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::models::config::ServerConfig;
    use crate::repository::HttpRepository;
    use crate::routes::agents::{add_agent, agents, new_agent, show_agent};
    use crate::routes::leads::{
        add_lead, comment_lead, edit_lead, leads, new_lead, save_lead, show_lead,
    };
    use crate::routes::main::show_index;
    use crate::routes::report::report;
    use crate::routes::settings::{delete_agent, delete_lead, settings};

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let repo = HttpRepository::new(&server_config.api_base_url)
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);

        log::info!("Proxying the collaborator API at {}", server_config.api_base_url);

        HttpServer::new(move || {
            App::new()
                .wrap(message_framework.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(show_index)
                .service(leads)
                // Literal paths must be registered before `/leads/{lead_id}`.
                .service(new_lead)
                .service(add_lead)
                .service(show_lead)
                .service(edit_lead)
                .service(save_lead)
                .service(comment_lead)
                .service(agents)
                .service(new_agent)
                .service(add_agent)
                .service(show_agent)
                .service(settings)
                .service(delete_agent)
                .service(delete_lead)
                .service(report)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
