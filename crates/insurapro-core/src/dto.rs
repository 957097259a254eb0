use crate::domain::{Customer, CustomerId, Interaction};
use crate::rules::interactions_summary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDto {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub interactions: Vec<InteractionDto>,
}

impl From<&Interaction> for InteractionDto {
    fn from(interaction: &Interaction) -> Self {
        Self {
            kind: interaction.kind.clone(),
            date: interaction.date.clone(),
        }
    }
}

impl From<&Customer> for CustomerDto {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            summary: interactions_summary(customer),
            interactions: customer
                .recorded_interactions()
                .map(InteractionDto::from)
                .collect(),
        }
    }
}
