//! Output formatting utilities

use crate::domain::Customer;

/// Format one customer as a list line
pub fn format_customer(customer: &Customer) -> String {
    format!(
        "Email: {}, Boolean Value: {}, Favorite Number: {}",
        customer.email,
        customer.flag_text(),
        customer.number
    )
}

/// Format a list of customers for display, one newline-terminated line each
pub fn format_customer_list(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers found\n".to_string();
    }

    let mut output = String::new();
    for customer in customers {
        output.push_str(&format_customer(customer));
        output.push('\n');
    }
    output
}
