use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::leads::{INVALID_FORMAT_MESSAGE, LeadFilterQuery};
use crate::forms::comment::AddCommentForm;
use crate::forms::lead::LeadForm;
use crate::repository::HttpRepository;
use crate::routes::{base_context, decode_form, redirect, render_template};
use crate::services::{ServiceError, leads as leads_service};

#[get("/leads")]
pub async fn leads(
    query: web::Query<LeadFilterQuery>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::load_leads_page(repo.get_ref(), &query).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "leads");
            context.insert("leads", &data.leads);
            context.insert("empty_message", &data.empty_message);
            context.insert("filter", &data.filter);

            render_template(&tera, "leads/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/leads/new")]
pub async fn new_lead(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::load_lead_form(repo.get_ref(), None).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "leads");
            context.insert("form", &data);

            render_template(&tera, "leads/form.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the lead form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/leads/add")]
pub async fn add_lead(repo: web::Data<HttpRepository>, body: web::Bytes) -> impl Responder {
    let form: LeadForm = match decode_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to decode lead form: {err}");
            FlashMessage::error("Invalid form data.").send();
            return redirect("/leads/new");
        }
    };

    match leads_service::add_lead(repo.get_ref(), form).await {
        Ok(()) => {
            FlashMessage::success("Lead added.").send();
            redirect("/leads")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/leads/new")
        }
        Err(err) => {
            log::error!("Failed to add lead: {err}");
            FlashMessage::error("Failed to add lead.").send();
            redirect("/leads/new")
        }
    }
}

#[get("/leads/{lead_id}")]
pub async fn show_lead(
    lead_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::load_lead_detail(repo.get_ref(), &lead_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "leads");
            context.insert("lead", &data.lead);
            context.insert("comments", &data.comments);

            render_template(&tera, "leads/show.html", &context)
        }
        Err(err) => lead_load_failure(err),
    }
}

#[get("/leads/{lead_id}/edit")]
pub async fn edit_lead(
    lead_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::load_lead_form(repo.get_ref(), Some(&lead_id)).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "leads");
            context.insert("form", &data);

            render_template(&tera, "leads/form.html", &context)
        }
        Err(err) => lead_load_failure(err),
    }
}

#[post("/leads/{lead_id}/save")]
pub async fn save_lead(
    lead_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    body: web::Bytes,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    let form: LeadForm = match decode_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to decode lead form: {err}");
            FlashMessage::error("Invalid form data.").send();
            return redirect(&format!("/leads/{lead_id}/edit"));
        }
    };

    match leads_service::update_lead(repo.get_ref(), &lead_id, form).await {
        Ok(()) => {
            FlashMessage::success("Lead updated.").send();
            redirect(&format!("/leads/{lead_id}"))
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/leads/{lead_id}/edit"))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to update lead: {err}");
            FlashMessage::error("Failed to update lead.").send();
            redirect(&format!("/leads/{lead_id}/edit"))
        }
    }
}

#[post("/leads/{lead_id}/comments")]
pub async fn comment_lead(
    lead_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<AddCommentForm>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();

    match leads_service::add_comment(repo.get_ref(), &lead_id, form).await {
        Ok(()) => {
            FlashMessage::success("Comment added.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add comment: {err}");
            FlashMessage::error("Failed to add comment.").send();
        }
    }

    redirect(&format!("/leads/{lead_id}"))
}

fn lead_load_failure(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound | ServiceError::TypeConstraint(_) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/leads")
        }
        ServiceError::InvalidFormat => {
            FlashMessage::error(INVALID_FORMAT_MESSAGE).send();
            redirect("/leads")
        }
        err => {
            log::error!("Failed to load lead: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
