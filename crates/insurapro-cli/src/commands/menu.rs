use crate::commands::Context;
use crate::prompt::{PromptSource, TokenReader};
use crate::render;
use anyhow::Result;
use insurapro_core::domain::{CustomerId, CustomerNew, CustomerUpdate, InteractionNew};
use insurapro_core::rules::{
    is_interaction_field, is_storable_name, is_valid_email, is_valid_phone,
};
use insurapro_store::error::StoreError;
use insurapro_store::Store;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::debug;

const NAME_HINT: &str = "(blanks not allowed, use instead  ',  .,  - or  _ )";
const RULE: &str = "----------------------------------------";
const INVALID_INTERACTION: &str = "Invalid interaction format! '|' and ',Date:' are not allowed.";

pub fn run_menu(ctx: &mut Context<'_>) -> Result<()> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut menu = Menu::new(&mut *ctx.store, TokenReader::new(stdin), stdout);
    menu.run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCustomer,
    DisplayAll,
    Search,
    Modify,
    Delete,
    AddInteraction,
    DisplayInteractions,
    Exit,
}

impl MenuChoice {
    pub fn from_number(value: i64) -> Option<Self> {
        Some(match value {
            1 => Self::AddCustomer,
            2 => Self::DisplayAll,
            3 => Self::Search,
            4 => Self::Modify,
            5 => Self::Delete,
            6 => Self::AddInteraction,
            7 => Self::DisplayInteractions,
            8 => Self::Exit,
            _ => return None,
        })
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Numbered menu over a [`Store`]. Input comes from any [`PromptSource`] and
/// everything the user sees goes to `out`.
pub struct Menu<'a, P, W> {
    store: &'a mut Store,
    input: P,
    out: W,
}

impl<'a, P: PromptSource, W: Write> Menu<'a, P, W> {
    pub fn new(store: &'a mut Store, input: P, out: W) -> Self {
        Self { store, input, out }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until the user picks Exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_choice()? else {
                debug!("input closed, leaving menu");
                writeln!(self.out)?;
                return Ok(());
            };
            debug!(?choice, "menu choice");
            let flow = match choice {
                MenuChoice::AddCustomer => self.add_customer()?,
                MenuChoice::DisplayAll => self.display_all()?,
                MenuChoice::Search => self.search()?,
                MenuChoice::Modify => self.modify()?,
                MenuChoice::Delete => self.delete()?,
                MenuChoice::AddInteraction => self.add_interaction()?,
                MenuChoice::DisplayInteractions => self.display_interactions()?,
                MenuChoice::Exit => {
                    writeln!(self.out, "Exiting CRM system. Goodbye!")?;
                    return Ok(());
                }
            };
            if let Flow::Quit = flow {
                writeln!(self.out)?;
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n{RULE}")?;
        writeln!(self.out, "InsuraPro Solutions - CRM System Menu:")?;
        writeln!(self.out, "{RULE}")?;
        for (number, label) in [
            "Add Customer",
            "Display All Customers",
            "Search Customer",
            "Modify Customer",
            "Delete Customer",
            "Add Interaction",
            "Display Interactions",
            "Exit",
        ]
        .iter()
        .enumerate()
        {
            writeln!(self.out, "{}. {}", number + 1, label)?;
        }
        Ok(())
    }

    fn read_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            let Some(token) = self.ask("Enter your choice (from 1 to 8): ")? else {
                return Ok(None);
            };
            if let Some(choice) = token.parse::<i64>().ok().and_then(MenuChoice::from_number) {
                return Ok(Some(choice));
            }
            writeln!(
                self.out,
                "Invalid choice! Please enter a number between 1 and 8."
            )?;
            self.input.discard_line();
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        Ok(self.input.next_token()?)
    }

    /// Re-prompts until `valid` accepts the answer.
    fn ask_valid(
        &mut self,
        prompt: &str,
        valid: fn(&str) -> bool,
        error: &str,
    ) -> Result<Option<String>> {
        loop {
            let Some(token) = self.ask(prompt)? else {
                return Ok(None);
            };
            if valid(&token) {
                return Ok(Some(token));
            }
            writeln!(self.out, "{error}")?;
        }
    }

    fn add_customer(&mut self) -> Result<Flow> {
        let Some(first_name) = self.ask_valid(
            &format!("Enter First Name {NAME_HINT}: "),
            is_storable_name,
            "Invalid first name format!",
        )?
        else {
            return Ok(Flow::Quit);
        };
        let Some(last_name) = self.ask_valid(
            &format!("Enter Last Name {NAME_HINT}: "),
            is_storable_name,
            "Invalid last name format!",
        )?
        else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.ask_valid("Enter Email: ", is_valid_email, "Invalid email format!")?
        else {
            return Ok(Flow::Quit);
        };
        let Some(phone) = self.ask_valid(
            "Enter Phone: ",
            is_valid_phone,
            "Invalid phone number format! It should be 10-15 digits.",
        )?
        else {
            return Ok(Flow::Quit);
        };

        let input = CustomerNew {
            first_name,
            last_name,
            email,
            phone,
        };
        match self.store.add(input) {
            Ok(customer) => {
                debug!(id = %customer.id, "customer added");
                writeln!(self.out, "Customer added successfully!")?;
            }
            Err(StoreError::AlreadyExists(_)) => {
                writeln!(self.out, "Customer already exists!")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }

    fn display_all(&mut self) -> Result<Flow> {
        let table = render::customer_table(self.store.customers());
        write!(self.out, "{table}")?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(name) = self.ask("Enter name to search (first name or last name): ")? else {
            return Ok(Flow::Quit);
        };
        let matches = self.store.find_by_name(&name);
        let table = render::customer_table(matches.iter().copied());
        let found = !matches.is_empty();
        write!(self.out, "{table}")?;
        if !found {
            writeln!(self.out, "{}", render::NO_CUSTOMERS_FOUND)?;
        }
        Ok(Flow::Continue)
    }

    /// Lists customers matching `name` and asks which one is meant.
    fn select_customer(&mut self, name: &str, verb: &str) -> Result<Selection> {
        let matches = self.store.find_by_name(name);
        if matches.is_empty() {
            writeln!(self.out, "No customer found with that name.")?;
            return Ok(Selection::None);
        }
        let ids: Vec<CustomerId> = matches.iter().map(|customer| customer.id).collect();
        let listing = render::choice_list(&matches);
        writeln!(self.out, "Found the following customers:")?;
        write!(self.out, "{listing}")?;

        let prompt = format!(
            "Choose the index of the customer to {verb} (1 of {}): ",
            ids.len()
        );
        let Some(token) = self.ask(&prompt)? else {
            return Ok(Selection::Quit);
        };
        match token.parse::<usize>() {
            Ok(choice) if (1..=ids.len()).contains(&choice) => {
                Ok(Selection::Picked(ids[choice - 1]))
            }
            _ => {
                writeln!(self.out, "Invalid choice!")?;
                self.input.discard_line();
                Ok(Selection::None)
            }
        }
    }

    fn modify(&mut self) -> Result<Flow> {
        let Some(name) = self.ask(&format!(
            "Enter first name or last name of the customer to modify {NAME_HINT}: "
        ))?
        else {
            return Ok(Flow::Quit);
        };
        let id = match self.select_customer(&name, "modify")? {
            Selection::Picked(id) => id,
            Selection::None => return Ok(Flow::Continue),
            Selection::Quit => return Ok(Flow::Quit),
        };

        let Some(answer) = self.ask(
            "Do you want to modify all fields (First Name, Last Name, Email, Phone)? (yes/no): ",
        )?
        else {
            return Ok(Flow::Quit);
        };

        let update = if answer == "yes" {
            self.ask_all_fields()?
        } else {
            self.ask_each_field()?
        };
        let Some(update) = update else {
            return Ok(Flow::Quit);
        };

        match self.store.modify(id, update) {
            Ok(_) => writeln!(self.out, "Customer details updated!")?,
            Err(StoreError::Unstorable(err)) => {
                writeln!(self.out, "Customer not updated: {err}")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }

    fn ask_all_fields(&mut self) -> Result<Option<CustomerUpdate>> {
        let Some(first_name) = self.ask(&format!("Enter new First Name {NAME_HINT}: "))? else {
            return Ok(None);
        };
        let Some(last_name) = self.ask(&format!("Enter new Last Name {NAME_HINT}: "))? else {
            return Ok(None);
        };
        let Some(email) = self.ask("Enter new Email: ")? else {
            return Ok(None);
        };
        let Some(phone) = self.ask("Enter new Phone: ")? else {
            return Ok(None);
        };
        Ok(Some(CustomerUpdate::all(first_name, last_name, email, phone)))
    }

    fn ask_each_field(&mut self) -> Result<Option<CustomerUpdate>> {
        let mut update = CustomerUpdate::default();
        for field in [Field::FirstName, Field::LastName, Field::Email, Field::Phone] {
            let Some(answer) =
                self.ask(&format!("Do you want to modify {}? (y/n): ", field.label()))?
            else {
                return Ok(None);
            };
            if !answer.starts_with('y') {
                continue;
            }
            let Some(value) = self.ask(&field.prompt())? else {
                return Ok(None);
            };
            field.set(&mut update, value);
        }
        Ok(Some(update))
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(name) = self.ask("Enter first name or last name of the customer to delete: ")?
        else {
            return Ok(Flow::Quit);
        };
        let id = match self.select_customer(&name, "delete")? {
            Selection::Picked(id) => id,
            Selection::None => return Ok(Flow::Continue),
            Selection::Quit => return Ok(Flow::Quit),
        };
        self.store.delete(id)?;
        writeln!(self.out, "Customer deleted!")?;
        Ok(Flow::Continue)
    }

    fn ask_customer_id(&mut self, prompt: &str) -> Result<Option<Option<CustomerId>>> {
        let Some(token) = self.ask(prompt)? else {
            return Ok(None);
        };
        match CustomerId::from_str(&token) {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                writeln!(self.out, "Invalid customer ID!")?;
                self.input.discard_line();
                Ok(Some(None))
            }
        }
    }

    fn add_interaction(&mut self) -> Result<Flow> {
        let id = match self.ask_customer_id("Enter Customer ID to add Interaction: ")? {
            Some(Some(id)) => id,
            Some(None) => return Ok(Flow::Continue),
            None => return Ok(Flow::Quit),
        };
        let Some(kind) = self.ask_valid(
            "Enter Interaction Type (Meeting/Contact/Contract) - no blanks allowed: ",
            is_interaction_field,
            INVALID_INTERACTION,
        )?
        else {
            return Ok(Flow::Quit);
        };
        let Some(date) = self.ask_valid(
            "Enter Interaction Date (dd/mm/yyyy): ",
            is_interaction_field,
            INVALID_INTERACTION,
        )?
        else {
            return Ok(Flow::Quit);
        };

        match self.store.add_interaction(id, InteractionNew { kind, date }) {
            Ok(_) => writeln!(self.out, "Interaction added!")?,
            Err(StoreError::NotFound(_)) => writeln!(self.out, "Customer not found!")?,
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }

    fn display_interactions(&mut self) -> Result<Flow> {
        let id = match self.ask_customer_id("Enter Customer ID to display interactions: ")? {
            Some(Some(id)) => id,
            Some(None) => return Ok(Flow::Continue),
            None => return Ok(Flow::Quit),
        };
        let lines = match self.store.find_by_id(id) {
            Some(customer) => render::interaction_lines(customer),
            None => vec!["Customer not found!".to_string()],
        };
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(Flow::Continue)
    }
}

enum Selection {
    Picked(CustomerId),
    None,
    Quit,
}

#[derive(Clone, Copy)]
enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }

    fn prompt(self) -> String {
        match self {
            Field::FirstName | Field::LastName => {
                format!("Enter new {} {NAME_HINT}: ", self.label())
            }
            Field::Email | Field::Phone => format!("Enter new {}: ", self.label()),
        }
    }

    fn set(self, update: &mut CustomerUpdate, value: String) {
        match self {
            Field::FirstName => update.first_name = Some(value),
            Field::LastName => update.last_name = Some(value),
            Field::Email => update.email = Some(value),
            Field::Phone => update.phone = Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Menu, MenuChoice};
    use crate::prompt::TokenReader;
    use insurapro_core::domain::{CustomerId, CustomerNew, Interaction};
    use insurapro_store::Store;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn run(store: &mut Store, script: &str) -> String {
        let mut menu = Menu::new(store, TokenReader::new(Cursor::new(script)), Vec::new());
        menu.run().expect("menu run");
        String::from_utf8(menu.into_output()).expect("utf8")
    }

    fn seed(store: &mut Store, first: &str, last: &str) -> CustomerId {
        store
            .add(CustomerNew {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!("{}@x.com", first.to_ascii_lowercase()),
                phone: "1234567890".to_string(),
            })
            .expect("seed customer")
            .id
    }

    fn open(dir: &Path) -> Store {
        Store::open(&dir.join("customers.csv")).expect("open store")
    }

    #[test]
    fn menu_choice_maps_one_through_eight() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::AddCustomer));
        assert_eq!(MenuChoice::from_number(8), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(9), None);
    }

    #[test]
    fn add_customer_then_interaction_scenario() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());

        let output = run(
            &mut store,
            "1\nJane\nDoe\njane@x.com\n+12345678901\n6\n1\nMeeting\n01/02/2023\n8\n",
        );
        assert!(output.contains("Customer added successfully!"));
        assert!(output.contains("Interaction added!"));
        assert!(output.contains("Exiting CRM system. Goodbye!"));

        let customer = store.find_by_id(CustomerId(1)).expect("customer 1");
        assert_eq!(customer.full_name(), "Jane Doe");
        assert_eq!(
            customer.interactions,
            vec![Interaction::new("Meeting", "01/02/2023")]
        );

        let contents = fs::read_to_string(store.path()).expect("read file");
        let record = contents.lines().nth(1).expect("record");
        assert_eq!(
            record,
            "Jane,Doe,jane@x.com,+12345678901,1,Type:Meeting,Date:01/02/2023"
        );
    }

    #[test]
    fn add_customer_reprompts_until_fields_are_valid() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());

        let output = run(
            &mut store,
            "1\nJane2\nJane\n-Doe\nDoe\njane@x\njane@x.com\n12345\n+12345678901\n8\n",
        );
        assert_eq!(output.matches("Invalid first name format!").count(), 1);
        assert_eq!(output.matches("Invalid last name format!").count(), 1);
        assert_eq!(output.matches("Invalid email format!").count(), 1);
        assert_eq!(
            output
                .matches("Invalid phone number format! It should be 10-15 digits.")
                .count(),
            1
        );
        assert_eq!(store.customers().len(), 1);
    }

    #[test]
    fn add_duplicate_customer_is_reported() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        seed(&mut store, "Jane", "Doe");

        let output = run(&mut store, "1\nJane\nDoe\nother@x.com\n1234567890\n8\n");
        assert!(output.contains("Customer already exists!"));
        assert_eq!(store.customers().len(), 1);
        assert_eq!(store.next_customer_id(), CustomerId(2));
    }

    #[test]
    fn invalid_menu_input_discards_rest_of_line() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());

        let output = run(&mut store, "abc 1 Jane\n9\n8\n");
        assert_eq!(
            output
                .matches("Invalid choice! Please enter a number between 1 and 8.")
                .count(),
            2
        );
        assert!(store.customers().is_empty());
        assert!(output.contains("Exiting CRM system. Goodbye!"));
    }

    #[test]
    fn end_of_input_leaves_menu() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());

        let output = run(&mut store, "1\nJane\n");
        assert!(!output.contains("Goodbye"));
        assert!(store.customers().is_empty());
    }

    #[test]
    fn search_lists_matches_or_reports_none() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        seed(&mut store, "Jane", "Doe");
        seed(&mut store, "John", "Roe");

        let output = run(&mut store, "3\nDoe\n3\nSmith\n8\n");
        assert!(output.contains("jane@x.com"));
        assert!(!output.contains("john@x.com"));
        assert_eq!(output.matches("No customers found!").count(), 1);
    }

    #[test]
    fn delete_with_shared_last_name_picks_listed_choice() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        let jane = seed(&mut store, "Jane", "Doe");
        let john = seed(&mut store, "John", "Doe");

        let output = run(&mut store, "5\nDoe\n2\n8\n");
        assert!(output.contains("Found the following customers:\n1. Jane Doe\n2. John Doe\n"));
        assert!(output.contains("Choose the index of the customer to delete (1 of 2): "));
        assert!(output.contains("Customer deleted!"));
        assert!(store.find_by_id(jane).is_some());
        assert!(store.find_by_id(john).is_none());
    }

    #[test]
    fn delete_out_of_range_choice_changes_nothing() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        seed(&mut store, "Jane", "Doe");
        seed(&mut store, "John", "Doe");

        let output = run(&mut store, "5\nDoe\n3\n5\nNobody\n8\n");
        assert!(output.contains("Invalid choice!"));
        assert!(output.contains("No customer found with that name."));
        assert_eq!(store.customers().len(), 2);
    }

    #[test]
    fn modify_all_fields_stores_values_as_entered() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        let id = seed(&mut store, "Jane", "Doe");

        let output = run(
            &mut store,
            "4\nJane\n1\nyes\nJanet\nDane\nnot-an-email\n42\n8\n",
        );
        assert!(output.contains("Customer details updated!"));
        let customer = store.find_by_id(id).expect("customer");
        assert_eq!(customer.full_name(), "Janet Dane");
        assert_eq!(customer.email, "not-an-email");
        assert_eq!(customer.phone, "42");
    }

    #[test]
    fn modify_selected_fields_only() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        let id = seed(&mut store, "Jane", "Doe");

        run(
            &mut store,
            "4\nDoe\n1\nno\nn\ny\nSmith\nn\ny\n+449876543210\n8\n",
        );
        let customer = store.find_by_id(id).expect("customer");
        assert_eq!(customer.first_name, "Jane");
        assert_eq!(customer.last_name, "Smith");
        assert_eq!(customer.email, "jane@x.com");
        assert_eq!(customer.phone, "+449876543210");

        let reopened = open(temp.path());
        assert_eq!(reopened.find_by_id(id).expect("customer").last_name, "Smith");
    }

    #[test]
    fn interactions_for_unknown_or_bad_ids() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        seed(&mut store, "Jane", "Doe");

        let output = run(
            &mut store,
            "6\n9\nMeeting\n01/02/2023\n7\nabc\n7\n1\n7\n9\n8\n",
        );
        assert_eq!(output.matches("Customer not found!").count(), 2);
        assert!(output.contains("Invalid customer ID!"));
        assert!(output.contains("Type: No Interaction, Date: N/A"));
    }

    #[test]
    fn display_all_lists_every_customer() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        seed(&mut store, "Jane", "Doe");
        seed(&mut store, "John", "Roe");

        let output = run(&mut store, "2\n8\n");
        assert!(output.contains("First Name"));
        assert!(output.contains("jane@x.com"));
        assert!(output.contains("john@x.com"));
        assert_eq!(output.matches("No Interaction, Date: N/A").count(), 2);
    }

    #[test]
    fn add_customer_reprompts_on_comma_names() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());

        run(&mut store, "1\nO,Brien\nOBrien\nDoe\no@x.com\n1234567890\n8\n");
        let reopened = open(temp.path());
        assert_eq!(reopened.customers().len(), 1);
        assert_eq!(reopened.customers()[0].first_name, "OBrien");
    }

    #[test]
    fn modify_refuses_comma_values() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        let id = seed(&mut store, "Jane", "Doe");

        let output = run(&mut store, "4\nJane\n1\nno\ny\nJa,ne\nn\nn\nn\n8\n");
        assert!(output.contains("Customer not updated"));
        assert!(!output.contains("Customer details updated!"));
        assert_eq!(store.find_by_id(id).expect("customer").first_name, "Jane");
    }

    #[test]
    fn add_interaction_reprompts_on_entry_delimiters() {
        let temp = TempDir::new().expect("temp dir");
        let mut store = open(temp.path());
        let id = seed(&mut store, "Jane", "Doe");

        let output = run(
            &mut store,
            "6\n1\nCall|x\nCall\n01/02/2023,Date:x\n01/02/2023\n8\n",
        );
        assert_eq!(output.matches(super::INVALID_INTERACTION).count(), 2);
        let reopened = open(temp.path());
        assert_eq!(
            reopened.find_by_id(id).expect("customer").interactions,
            vec![Interaction::new("Call", "01/02/2023")]
        );
    }
}
