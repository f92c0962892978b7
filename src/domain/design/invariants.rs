use super::entity::{DesignOption, DesignTemplate};
use crate::domain::validation::{optional_url, require_sequence, require_text};
use crate::domain::DomainResult;

pub fn validate_design_option(option: &DesignOption) -> DomainResult<()> {
    require_text("name", &option.name)?;
    optional_url("image_url", option.image_url.as_deref())?;
    require_sequence("display_order", option.display_order)
}

pub fn validate_design_template(template: &DesignTemplate) -> DomainResult<()> {
    require_text("name", &template.name)?;
    optional_url("preview_url", template.preview_url.as_deref())?;
    require_sequence("display_order", template.display_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_preview_must_be_link() {
        let mut option = DesignOption::new("Stripes".to_string());
        option.display_order = 1;
        option.image_url = Some("https://cdn.example/stripes.png".to_string());
        assert!(validate_design_option(&option).is_ok());

        option.image_url = Some("stripes.png".to_string());
        assert!(validate_design_option(&option).is_err());
    }

    #[test]
    fn test_template_needs_order() {
        let template = DesignTemplate::new("Classic".to_string());
        assert!(validate_design_template(&template).is_err());
    }
}
