pub mod backup;
pub mod codec;
pub mod error;
pub mod file;
pub mod paths;

use crate::error::{Result, StoreError};
use insurapro_core::domain::{
    Customer, CustomerId, CustomerNew, CustomerUpdate, Interaction, InteractionNew,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// In-memory customer list backed by a single CSV file.
///
/// Every mutation rewrites the whole file before returning, and only takes
/// effect in memory once that write succeeds. Lines that could not be read
/// are kept verbatim and written back after the customers.
pub struct Store {
    path: PathBuf,
    customers: Vec<Customer>,
    unreadable: Vec<String>,
    next_customer_id: CustomerId,
}

impl Store {
    /// Opens the store and loads the file. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let mut store = Self {
            path: path.to_path_buf(),
            customers: Vec::new(),
            unreadable: Vec::new(),
            next_customer_id: CustomerId::FIRST,
        };
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&mut self) -> Result<()> {
        self.customers.clear();
        self.unreadable.clear();
        self.next_customer_id = CustomerId::FIRST;

        let Some(contents) = file::read_document(&self.path)? else {
            debug!(path = %self.path.display(), "data file missing, starting empty");
            return Ok(());
        };

        let decoded = codec::decode_document(&contents);
        for skipped in decoded.skipped {
            warn!(
                path = %self.path.display(),
                line = skipped.line,
                error = %skipped.error,
                "skipping malformed customer record"
            );
            self.unreadable.push(skipped.raw);
        }
        for customer in decoded.customers {
            self.next_customer_id = self.next_customer_id.max(customer.id.next());
            self.customers.push(customer);
        }

        debug!(
            path = %self.path.display(),
            customers = self.customers.len(),
            unreadable = self.unreadable.len(),
            next_id = %self.next_customer_id,
            "customers loaded"
        );
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.write(&self.customers)
    }

    fn write(&self, customers: &[Customer]) -> Result<()> {
        let mut contents = codec::encode_document(customers);
        for line in &self.unreadable {
            contents.push_str(line);
            contents.push('\n');
        }
        file::write_document(&self.path, &contents)?;
        debug!(
            path = %self.path.display(),
            customers = customers.len(),
            "customers saved"
        );
        Ok(())
    }

    /// Writes `customers` and adopts them only if the write succeeded.
    fn commit(&mut self, customers: Vec<Customer>) -> Result<()> {
        self.write(&customers)?;
        self.customers = customers;
        Ok(())
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Raw lines kept from the last load because they could not be decoded.
    pub fn unreadable_lines(&self) -> &[String] {
        &self.unreadable
    }

    pub fn next_customer_id(&self) -> CustomerId {
        self.next_customer_id
    }

    pub fn find_by_id(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    /// Edits made through this reference reach the file on the next `save`.
    pub fn find_by_id_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|customer| customer.id == id)
    }

    /// Customers whose first or last name equals `name` exactly, in file order.
    pub fn find_by_name(&self, name: &str) -> Vec<&Customer> {
        self.customers
            .iter()
            .filter(|customer| customer.matches_name(name))
            .collect()
    }

    fn position(&self, id: CustomerId) -> Result<usize> {
        self.customers
            .iter()
            .position(|customer| customer.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Appends a new customer. The (first, last) pair must be unused and no
    /// field may contain a record delimiter; the id is only consumed on
    /// success.
    pub fn add(&mut self, input: CustomerNew) -> Result<Customer> {
        input.check_storable()?;
        if self
            .customers
            .iter()
            .any(|customer| customer.has_full_name(&input.first_name, &input.last_name))
        {
            return Err(StoreError::AlreadyExists(format!(
                "{} {}",
                input.first_name, input.last_name
            )));
        }

        let id = self.next_customer_id;
        let customer = Customer::from_new(id, input);
        let mut customers = self.customers.clone();
        customers.push(customer.clone());
        self.commit(customers)?;
        self.next_customer_id = id.next();
        Ok(customer)
    }

    /// Overwrites the supplied fields. Values are stored as given, apart from
    /// record delimiters, which are refused.
    pub fn modify(&mut self, id: CustomerId, update: CustomerUpdate) -> Result<Customer> {
        let index = self.position(id)?;
        update.check_storable()?;
        let mut customers = self.customers.clone();
        customers[index].apply(update);
        let updated = customers[index].clone();
        self.commit(customers)?;
        Ok(updated)
    }

    pub fn delete(&mut self, id: CustomerId) -> Result<Customer> {
        let index = self.position(id)?;
        let mut customers = self.customers.clone();
        let removed = customers.remove(index);
        self.commit(customers)?;
        Ok(removed)
    }

    pub fn add_interaction(
        &mut self,
        id: CustomerId,
        input: InteractionNew,
    ) -> Result<Interaction> {
        let index = self.position(id)?;
        let interaction = Interaction::from(input);
        let mut customers = self.customers.clone();
        customers[index].interactions.push(interaction.clone());
        self.commit(customers)?;
        Ok(interaction)
    }

    /// Copies the data file to `target`, writing it first if it does not
    /// exist yet. Returns the number of bytes copied.
    pub fn backup_to(&self, target: &Path) -> Result<u64> {
        if !self.path.exists() {
            self.save()?;
        }
        backup::backup_file(&self.path, target)
    }
}

fn not_found(id: CustomerId) -> StoreError {
    StoreError::NotFound(format!("customer {id}"))
}
