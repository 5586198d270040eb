use std::path::Path;

use crate::core::errors::{KeywardenError, Result};
use crate::core::models::rendered_template::RenderedTemplate;
use crate::core::traits::publisher::Publisher;

/// Publisher that writes the rendered template to a local path.
///
/// The location string is interpreted as a filesystem path; parent
/// directories are created as needed. An object-storage binding would
/// implement the same port with a bucket/key location instead.
pub struct FilePublisher;

impl Publisher for FilePublisher {
    fn store(&self, template: &RenderedTemplate, location: &str) -> Result<()> {
        let path = Path::new(location);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| KeywardenError::Storage {
                reason: format!("cannot create {}: {e}", parent.display()),
            })?;
        }

        std::fs::write(path, &template.body).map_err(|e| KeywardenError::Storage {
            reason: format!("cannot write {location}: {e}"),
        })
    }
}
