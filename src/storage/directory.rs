use crate::domain::Customer;

/// Append-only register of customers. Identifiers follow registration order.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a customer under the next sequential id. Names are not deduplicated.
    pub fn register(&mut self, name: impl Into<String>) -> Customer {
        let customer = Customer::with_sequence(self.customers.len() + 1, name);
        self.customers.push(customer.clone());
        customer
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
