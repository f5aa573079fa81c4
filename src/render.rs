//! HTML rendering
//!
//! Templates are embedded at compile time and rendered with Tera. The
//! result page carries the chart arrays as an inline JSON document and the
//! weather category as a `data-weather` attribute for the client scripts.

use tera::{Context, Tera};
use tracing::debug;

use crate::Result;
use crate::models::{ViewModel, WeatherCategory};

const LAYOUT: &str = include_str!("../templates/layout.html");
const INDEX: &str = include_str!("../templates/index.html");
const RESULT: &str = include_str!("../templates/result.html");

/// Compiled page templates
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Compile the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", LAYOUT),
            ("index.html", INDEX),
            ("result.html", RESULT),
        ])?;
        debug!("Compiled {} templates", tera.get_template_names().count());
        Ok(Self { tera })
    }

    /// The search form, optionally with an error message and the last input
    pub fn render_index(&self, error: Option<&str>, location: Option<&str>) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("error", &error);
        ctx.insert("location", &location.unwrap_or_default());
        ctx.insert("category", &WeatherCategory::Clear);
        Ok(self.tera.render("index.html", &ctx)?)
    }

    /// The forecast page for a built view model
    pub fn render_result(&self, result: &ViewModel) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("error", &None::<String>);
        ctx.insert("result", result);
        ctx.insert("category", &result.category);
        ctx.insert("chart_json", &chart_json(result)?);
        Ok(self.tera.render("result.html", &ctx)?)
    }
}

/// Chart payload made safe for embedding inside a `<script>` element
fn chart_json(result: &ViewModel) -> Result<String> {
    let json = serde_json::to_string(&result.chart)
        .map_err(|e| crate::SkycastError::render(format!("Failed to encode chart data: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}
