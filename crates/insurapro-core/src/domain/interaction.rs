/// Label written in place of an interaction when a customer has none.
pub const NO_INTERACTION_KIND: &str = "No Interaction";
pub const NO_INTERACTION_DATE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub kind: String,
    pub date: String,
}

impl Interaction {
    pub fn new(kind: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            date: date.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(NO_INTERACTION_KIND, NO_INTERACTION_DATE)
    }

    /// True for the exact `No Interaction` / `N/A` pair.
    pub fn is_placeholder(&self) -> bool {
        self.kind == NO_INTERACTION_KIND && self.date == NO_INTERACTION_DATE
    }
}

#[derive(Debug, Clone)]
pub struct InteractionNew {
    pub kind: String,
    pub date: String,
}

impl From<InteractionNew> for Interaction {
    fn from(value: InteractionNew) -> Self {
        Self {
            kind: value.kind,
            date: value.date,
        }
    }
}
