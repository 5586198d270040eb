pub mod apply_report;
pub mod desired_key_set;
pub mod inventory_entry;
pub mod key_record;
pub mod plan;
pub mod rendered_template;
