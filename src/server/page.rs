//! Built-in dashboard page.

use crate::server::AppContext;
use axum::{extract::State, response::Html};

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");
const MODULE_BUTTONS_SLOT: &str = "{{MODULE_BUTTONS}}";

/// GET /
pub async fn index(State(ctx): State<AppContext>) -> Html<String> {
    Html(render_index(ctx.config.catalog.module_count))
}

/// Render the dashboard with one button per module.
pub fn render_index(module_count: u32) -> String {
    let buttons = (1..=module_count)
        .map(|n| format!("      <button data-module=\"{n}\">Module {n}</button>"))
        .collect::<Vec<_>>()
        .join("\n");

    INDEX_TEMPLATE.replace(MODULE_BUTTONS_SLOT, &buttons)
}
