use crate::domain::{Customer, Interaction, NO_INTERACTION_KIND};

pub const NO_INTERACTIONS_SUMMARY: &str = "No Interaction, Date: N/A";
const SUMMARY_SEPARATOR: &str = " | ";

pub fn format_interaction(interaction: &Interaction) -> String {
    format!("Type: {}, Date: {}", interaction.kind, interaction.date)
}

/// One-cell summary used by the customer table.
///
/// Any interaction labelled `No Interaction` is left out, whatever its date.
pub fn interactions_summary(customer: &Customer) -> String {
    let parts: Vec<String> = customer
        .interactions
        .iter()
        .filter(|interaction| interaction.kind != NO_INTERACTION_KIND)
        .map(format_interaction)
        .collect();
    if parts.is_empty() {
        NO_INTERACTIONS_SUMMARY.to_string()
    } else {
        parts.join(SUMMARY_SEPARATOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionListing<'a> {
    /// Nothing was ever recorded.
    Placeholder,
    Entries(Vec<&'a Interaction>),
    /// Only placeholder pairs were recorded.
    NoneRecorded,
}

pub fn interaction_listing(customer: &Customer) -> InteractionListing<'_> {
    if customer.interactions.is_empty() {
        return InteractionListing::Placeholder;
    }
    let entries: Vec<&Interaction> = customer.recorded_interactions().collect();
    if entries.is_empty() {
        InteractionListing::NoneRecorded
    } else {
        InteractionListing::Entries(entries)
    }
}
