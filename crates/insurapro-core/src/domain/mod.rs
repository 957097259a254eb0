pub mod customer;
pub mod ids;
pub mod interaction;

pub use customer::{Customer, CustomerNew, CustomerUpdate};
pub use ids::CustomerId;
pub use interaction::{Interaction, InteractionNew, NO_INTERACTION_DATE, NO_INTERACTION_KIND};
