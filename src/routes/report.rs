use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::HttpRepository;
use crate::routes::{base_context, render_template};
use crate::services::report as report_service;

#[get("/report")]
pub async fn report(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match report_service::load_report(repo.get_ref()).await {
        Ok(report) => {
            let mut context = base_context(&flash_messages, "report");
            context.insert("report", &report);

            render_template(&tera, "report/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to build report: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
