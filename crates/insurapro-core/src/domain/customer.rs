use crate::domain::ids::CustomerId;
use crate::domain::interaction::Interaction;
use crate::error::CoreError;
use crate::rules::validation::{
    check_record_field, validate_email, validate_name, validate_phone, NameField,
};

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub interactions: Vec<Interaction>,
}

impl Customer {
    pub fn from_new(id: CustomerId, input: CustomerNew) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            interactions: Vec::new(),
        }
    }

    /// Exact, case-sensitive match on either name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.first_name == name || self.last_name == name
    }

    pub fn has_full_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Interactions that carry real data, in insertion order.
    pub fn recorded_interactions(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions
            .iter()
            .filter(|interaction| !interaction.is_placeholder())
    }

    pub fn apply(&mut self, update: CustomerUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerNew {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerNew {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(NameField::First, &self.first_name)?;
        validate_name(NameField::Last, &self.last_name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        Ok(())
    }

    /// Only checks that every field fits in a record line.
    pub fn check_storable(&self) -> Result<(), CoreError> {
        check_record_field("first name", &self.first_name)?;
        check_record_field("last name", &self.last_name)?;
        check_record_field("email", &self.email)?;
        check_record_field("phone", &self.phone)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerUpdate {
    pub fn all(first_name: String, last_name: String, email: String, phone: String) -> Self {
        Self {
            first_name: Some(first_name),
            last_name: Some(last_name),
            email: Some(email),
            phone: Some(phone),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(first_name) = self.first_name.as_deref() {
            validate_name(NameField::First, first_name)?;
        }
        if let Some(last_name) = self.last_name.as_deref() {
            validate_name(NameField::Last, last_name)?;
        }
        if let Some(email) = self.email.as_deref() {
            validate_email(email)?;
        }
        if let Some(phone) = self.phone.as_deref() {
            validate_phone(phone)?;
        }
        Ok(())
    }

    pub fn check_storable(&self) -> Result<(), CoreError> {
        let fields = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        for (field, value) in fields {
            if let Some(value) = value.as_deref() {
                check_record_field(field, value)?;
            }
        }
        Ok(())
    }
}
