pub mod due_date;
pub mod order;
pub mod validate;
