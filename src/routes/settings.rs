use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::repository::HttpRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, settings as settings_service};

#[get("/settings")]
pub async fn settings(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match settings_service::load_settings(repo.get_ref()).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "settings");
            context.insert("agents", &data.agents);
            context.insert("leads", &data.leads);

            render_template(&tera, "settings/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load settings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/settings/agents/{agent_id}/delete")]
pub async fn delete_agent(
    agent_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    match settings_service::delete_agent(repo.get_ref(), &agent_id).await {
        Ok(()) => FlashMessage::success("Agent deleted.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Agent not found.").send(),
        Err(err) => {
            log::error!("Failed to delete agent: {err}");
            FlashMessage::error("Failed to delete agent.").send();
        }
    }

    redirect("/settings")
}

#[post("/settings/leads/{lead_id}/delete")]
pub async fn delete_lead(
    lead_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    match settings_service::delete_lead(repo.get_ref(), &lead_id).await {
        Ok(()) => FlashMessage::success("Lead deleted.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Lead not found.").send(),
        Err(err) => {
            log::error!("Failed to delete lead: {err}");
            FlashMessage::error("Failed to delete lead.").send();
        }
    }

    redirect("/settings")
}
