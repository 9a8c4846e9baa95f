use std::sync::Arc;

use axum::response::Html;

use crate::error::AppResult;

/// Loaded HTML templates
#[derive(Clone)]
pub struct Views {
    tera: Arc<tera::Tera>,
}

impl Views {
    /// Loads every template under `dir`
    pub fn load(dir: &str) -> AppResult<Self> {
        let glob = format!("{}/**/*.html", dir.trim_end_matches('/'));
        let tera = tera::Tera::new(&glob)?;

        tracing::debug!(
            templates = tera.get_template_names().count(),
            dir = %dir,
            "Templates loaded"
        );

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, name: &str, ctx: &tera::Context) -> AppResult<Html<String>> {
        Ok(Html(self.tera.render(name, ctx)?))
    }
}
