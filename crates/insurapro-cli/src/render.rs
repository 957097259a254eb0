use insurapro_core::domain::Customer;
use insurapro_core::rules::{format_interaction, interaction_listing, interactions_summary};
use insurapro_core::InteractionListing;
use insurapro_core::{NO_INTERACTION_DATE, NO_INTERACTION_KIND};

pub const NO_CUSTOMERS_FOUND: &str = "No customers found!";
pub const NO_VALID_INTERACTIONS: &str = "No valid interactions found for this customer.";

pub fn table_header() -> String {
    format!(
        "{:>10}{:>20}{:>20}{:>30}{:>15}{:>50}",
        "ID", "First Name", "Last Name", "Email", "Phone", "Interactions"
    )
}

pub fn table_row(customer: &Customer) -> String {
    format!(
        "{:>10}{:>20}{:>20}{:>30}{:>15}{:>50}",
        customer.id,
        customer.first_name,
        customer.last_name,
        customer.email,
        customer.phone,
        interactions_summary(customer)
    )
}

/// Header plus one row per customer, newline-terminated.
pub fn customer_table<'a>(customers: impl IntoIterator<Item = &'a Customer>) -> String {
    let mut out = table_header();
    out.push('\n');
    for customer in customers {
        out.push_str(&table_row(customer));
        out.push('\n');
    }
    out
}

pub fn interaction_lines(customer: &Customer) -> Vec<String> {
    match interaction_listing(customer) {
        InteractionListing::Placeholder => vec![format!(
            "Type: {NO_INTERACTION_KIND}, Date: {NO_INTERACTION_DATE}"
        )],
        InteractionListing::Entries(entries) => {
            entries.into_iter().map(format_interaction).collect()
        }
        InteractionListing::NoneRecorded => vec![NO_VALID_INTERACTIONS.to_string()],
    }
}

/// Numbered `1. First Last` lines used when a name matches several customers.
pub fn choice_list(customers: &[&Customer]) -> String {
    let mut out = String::new();
    for (index, customer) in customers.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, customer.full_name()));
    }
    out
}
