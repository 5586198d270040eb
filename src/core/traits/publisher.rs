use crate::core::errors::Result;
use crate::core::models::rendered_template::RenderedTemplate;

/// Port for persisting the rendered bootstrap template.
pub trait Publisher: Send + Sync {
    /// Store the template at the given location.
    fn store(&self, template: &RenderedTemplate, location: &str) -> Result<()>;
}
