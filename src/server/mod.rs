//! Web form front-end.
//!
//! `GET /` shows the form, `POST /changelog` runs the pipeline and renders
//! the changelog as HTML, `GET /health` is a liveness probe. Pipeline
//! failures are logged and replaced by a fixed message for the user.

use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde::Deserialize;

use crate::constants;
use crate::output::OutputRenderer;
use crate::output::html::{HtmlRenderer, escape_html};
use crate::pipeline::ChangelogPipeline;

/// Lookback shown in the form before the user picks one.
const DEFAULT_FORM_DAYS: u32 = 7;

/// Shared state handed to every handler.
pub struct AppState {
    pub pipeline: Arc<ChangelogPipeline>,
}

/// Submitted form fields. `days` stays a string so a bad value can be
/// reported in the page instead of as a 400.
#[derive(Debug, Deserialize)]
pub struct ChangelogForm {
    pub url: String,
    pub days: String,
}

/// Register the routes on an app or test service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/changelog", web::post().to(changelog))
        .route("/health", web::get().to(health));
}

/// Bind and serve until shutdown.
pub async fn run(pipeline: ChangelogPipeline, host: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(AppState {
        pipeline: Arc::new(pipeline),
    });

    tracing::info!("serving changelog form on http://{host}:{port}");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
            .wrap(Logger::new("%a \"%r\" %s %Dms"))
    })
    .bind((host, port))?
    .run()
    .await
}

async fn index() -> HttpResponse {
    html_page(&render_form("", &DEFAULT_FORM_DAYS.to_string()), "")
}

async fn changelog(state: web::Data<AppState>, form: web::Form<ChangelogForm>) -> HttpResponse {
    let form = form.into_inner();
    let result = match form.days.trim().parse::<u32>() {
        Ok(days) => match state.pipeline.run(&form.url, days).await {
            Ok(Some(report)) => Some(HtmlRenderer.render(&report)),
            Ok(None) => None,
            Err(e) => {
                tracing::error!("changelog generation failed for '{}': {e}", form.url);
                None
            }
        },
        Err(_) => {
            tracing::warn!("rejecting non-numeric lookback '{}'", form.days);
            None
        }
    };

    let body = result.unwrap_or_else(|| {
        format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(constants::FAILURE_MESSAGE)
        )
    });
    html_page(&render_form(&form.url, &form.days), &body)
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

fn render_form(url: &str, days: &str) -> String {
    format!(
        r#"<form method="post" action="/changelog">
  <input type="url" name="url" value="{}" placeholder="Enter GitHub URL" required>
  <input type="number" name="days" value="{}" min="1" max="{}" required>
  <button type="submit">Submit</button>
</form>
"#,
        escape_html(url),
        escape_html(days),
        constants::MAX_LOOKBACK_DAYS,
    )
}

fn html_page(form: &str, result: &str) -> HttpResponse {
    let page = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{name}</title>
</head>
<body>
<h1>{name}</h1>
{form}{result}</body>
</html>
"#,
        name = constants::APP_NAME,
    );
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}
