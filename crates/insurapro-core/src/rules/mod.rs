pub mod display;
pub mod validation;

pub use display::{
    format_interaction, interaction_listing, interactions_summary, InteractionListing,
    NO_INTERACTIONS_SUMMARY,
};
pub use validation::{
    check_interaction_field, check_record_field, is_interaction_field, is_record_field,
    is_storable_name, is_valid_email, is_valid_name, is_valid_phone, validate_email, validate_name,
    validate_phone, NameField,
};
