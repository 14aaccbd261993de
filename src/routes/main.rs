use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::leads::LeadFilterQuery;
use crate::repository::HttpRepository;
use crate::routes::{base_context, render_template};
use crate::services::leads as leads_service;

/// Dashboard: status cards over all leads and the filterable lead list.
#[get("/")]
pub async fn show_index(
    query: web::Query<LeadFilterQuery>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::load_leads_page(repo.get_ref(), &query).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "index");
            context.insert("summary", &data.summary);
            context.insert("leads", &data.leads);
            context.insert("empty_message", &data.empty_message);
            context.insert("filter", &data.filter);

            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
