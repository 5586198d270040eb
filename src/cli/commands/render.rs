use crate::cli::commands::service_helpers;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::template_generator::TemplateGenerator;

/// Execute the `keywarden render` command.
///
/// Renders straight from the source keys without consulting the
/// provider — useful for previewing the template a converged sync
/// would publish.
pub fn execute(config_path: &str, output_file: Option<&str>) -> Result<()> {
    let config = service_helpers::load_config(config_path)?;
    let source = service_helpers::build_source(&config)?;

    let desired = source.fetch_desired_keys()?;
    for rejected in &desired.rejected {
        output::warning(&format!(
            "Excluded malformed key '{}': {}",
            rejected.name, rejected.reason
        ));
    }

    let template = TemplateGenerator.render(&desired.keys, &config.bootstrap)?;

    match output_file {
        Some(path) => {
            std::fs::write(path, &template.body)?;
            output::success(&format!(
                "Rendered {} key(s) to {path}",
                desired.len()
            ));
            println!("  sha256: {}", template.content_hash);
        }
        None => print!("{}", template.body),
    }

    Ok(())
}
