// src/web/handlers/render_handlers.rs
//! Live preview and code view; both render straight from the posted document

use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use tracing::debug;

use crate::generator::GeneratedSite;
use crate::render::{render_portfolio_document, RenderContext};
use crate::types::portfolio_data::{PortfolioData, ThemeMode};
use crate::web::types::*;

pub async fn preview_handler(data: Json<PortfolioData>, theme: Option<&str>) -> Result<RawHtml<String>, ApiError> {
    let mut ctx = RenderContext::preview();
    if let Some(theme) = theme {
        let mode: ThemeMode = theme.parse().map_err(|e: String| {
            api_error(Status::BadRequest, e, "INVALID_THEME", &["Use theme=light or theme=dark"])
        })?;
        ctx = ctx.with_theme(mode);
    }

    let html = render_portfolio_document(&data, &ctx);
    debug!("Rendered preview ({} bytes)", html.len());
    Ok(RawHtml(html))
}

pub async fn export_handler(
    data: Json<PortfolioData>,
    mode: Option<&str>,
) -> Result<Json<DataResponse<ExportData>>, ApiError> {
    let ctx = match mode.unwrap_or("download") {
        "download" => RenderContext::download(),
        "published" => RenderContext::published(),
        other => {
            return Err(api_error(
                Status::BadRequest,
                format!("Unknown export mode: {}", other),
                "INVALID_MODE",
                &["Use mode=download or mode=published"],
            ))
        }
    };

    let site = GeneratedSite::build(&data, &ctx);
    let issues = data.validate();

    Ok(Json(DataResponse::success(
        format!("Generated {} files", site.files.len()),
        ExportData {
            files: site.files,
            issues,
        },
    )))
}
