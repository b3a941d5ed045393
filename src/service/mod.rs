//! TodoService: todo CRUD using the safe SQL builder.

mod todos;
mod validation;
pub use todos::TodoService;
pub use validation::{RequestValidator, NO_VALID_COLUMN, REQUIRED_MISSING};
