// User-facing message texts

pub const NO_USERS_FOUND: &str = "No users found in database";
pub const USER_NOT_FOUND_WITH_ID: &str = "User not found with id: ";
pub const EMAIL_ALREADY_TAKEN: &str = "Email already taken";

pub const VALIDATION_ERROR: &str = "Validation error occurred";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error occurred";
pub const DATABASE_ERROR: &str = "Database error occurred";

pub const USER_CREATED: &str = "User created successfully";
pub const USER_RETRIEVED: &str = "User retrieved successfully";
pub const ALL_USERS_RETRIEVED: &str = "All users retrieved successfully";
pub const USER_UPDATED: &str = "User updated successfully";
pub const USER_DELETED: &str = "User deleted successfully";

// Plain-text body of a rate limit rejection, sent outside the result envelope
pub const TOO_MANY_REQUESTS: &str = "So many requests per second.";

pub fn user_not_found(id: impl std::fmt::Display) -> String {
    format!("{USER_NOT_FOUND_WITH_ID}{id}")
}

pub fn no_route(method: impl std::fmt::Display, path: &str) -> String {
    format!("No endpoint {method} {path}")
}
