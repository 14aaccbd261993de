use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::leads::{INVALID_FORMAT_MESSAGE, LeadFilterQuery};
use crate::forms::agent::AddAgentForm;
use crate::repository::HttpRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, agents as agents_service};

#[get("/agents")]
pub async fn agents(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match agents_service::load_agents_page(repo.get_ref()).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "agents");
            context.insert("agents", &data.agents);
            context.insert("empty_message", &data.empty_message);

            render_template(&tera, "agents/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list agents: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/agents/new")]
pub async fn new_agent(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "agents");

    render_template(&tera, "agents/form.html", &context)
}

#[post("/agents/add")]
pub async fn add_agent(
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<AddAgentForm>,
) -> impl Responder {
    match agents_service::add_agent(repo.get_ref(), form).await {
        Ok(()) => {
            FlashMessage::success("Agent added.").send();
            redirect("/agents")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/agents/new")
        }
        Err(err) => {
            log::error!("Failed to add agent: {err}");
            FlashMessage::error("Failed to add agent.").send();
            redirect("/agents/new")
        }
    }
}

#[get("/agents/{agent_id}")]
pub async fn show_agent(
    agent_id: web::Path<String>,
    query: web::Query<LeadFilterQuery>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match agents_service::load_agent_detail(repo.get_ref(), &agent_id, &query).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "agents");
            context.insert("agent", &data.agent);
            context.insert("leads", &data.leads);
            context.insert("empty_message", &data.empty_message);
            context.insert("filter", &data.filter);

            render_template(&tera, "agents/show.html", &context)
        }
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            FlashMessage::error("Agent not found.").send();
            redirect("/agents")
        }
        Err(ServiceError::InvalidFormat) => {
            FlashMessage::error(INVALID_FORMAT_MESSAGE).send();
            redirect("/agents")
        }
        Err(err) => {
            log::error!("Failed to load agent: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
