use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    RoleUser,
    RoleAdmin,
}

// Stored user record
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// POST /api/user body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCreateRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
}

// PUT /api/user/{userId} body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdateRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
}

// Validated create/update body
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetails {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
}

// What clients see of a user, never the password
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub user_role: UserRole,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            date_of_birth: user.date_of_birth,
            user_role: user.user_role,
        }
    }
}

/// Optional list filters. Empty strings count as "not set".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth_from: Option<NaiveDate>,
    pub date_of_birth_to: Option<NaiveDate>,
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl UserFilter {
    /// Name and surname match case-insensitively by substring, e-mail and phone exactly,
    /// the birth date range is inclusive.
    pub fn matches(&self, user: &User) -> bool {
        let contains = |needle: Option<&str>, hay: &str| {
            needle.is_none_or(|n| hay.to_lowercase().contains(&n.to_lowercase()))
        };

        contains(set(&self.name), &user.name)
            && contains(set(&self.surname), &user.surname)
            && set(&self.email).is_none_or(|e| e == user.email)
            && set(&self.phone_number).is_none_or(|p| p == user.phone_number)
            && self.date_of_birth_from.is_none_or(|from| user.date_of_birth >= from)
            && self.date_of_birth_to.is_none_or(|to| user.date_of_birth <= to)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub page: usize,
    pub size: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

// One page of store results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub last: bool,
}

impl<T> PageResponse<T> {
    pub fn from_page<U>(page: Page<U>, map: impl FnMut(U) -> T) -> Self {
        let total_pages = page.total.div_ceil(page.size.max(1));
        Self {
            content: page.items.into_iter().map(map).collect(),
            page: page.page,
            size: page.size,
            total_elements: page.total,
            total_pages,
            last: page.page + 1 >= total_pages,
        }
    }
}

/// Field-level input checks; each error reads `"field: message"`.
pub trait Validate {
    type Valid;

    fn validate(self) -> Result<Self::Valid, Vec<String>>;
}

struct UserFields {
    name: String,
    surname: String,
    email: String,
    password: String,
    phone_number: String,
    date_of_birth: Option<NaiveDate>,
}

impl UserFields {
    fn into_details(self) -> Result<UserDetails, Vec<String>> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: &str| errors.push(format!("{field}: {message}"));

        if self.name.trim().is_empty() {
            push("name", "Name cannot be blank");
        }
        if self.surname.trim().is_empty() {
            push("surname", "Surname cannot be blank");
        }

        if self.email.trim().is_empty() {
            push("email", "Email cannot be blank");
        } else if !is_email(&self.email) {
            push("email", "must be a well-formed email address");
        }

        if self.password.trim().is_empty() {
            push("password", "Password cannot be blank");
        } else if !(8..=64).contains(&self.password.chars().count()) {
            push("password", "Password must be between 8 and 64 characters long");
        }

        if self.phone_number.trim().is_empty() {
            push("phoneNumber", "Phone number cannot be blank");
        } else if !is_phone_number(&self.phone_number) {
            push("phoneNumber", "Phone number format is invalid");
        }

        let Some(date_of_birth) = self.date_of_birth else {
            push("dateOfBirth", "Date of Birth cannot be null");
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UserDetails {
            name: self.name,
            surname: self.surname,
            email: self.email,
            password: self.password,
            phone_number: self.phone_number,
            date_of_birth,
        })
    }
}

impl Validate for UserCreateRequest {
    type Valid = UserDetails;

    fn validate(self) -> Result<UserDetails, Vec<String>> {
        UserFields {
            name: self.name,
            surname: self.surname,
            email: self.email,
            password: self.password,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
        }
        .into_details()
    }
}

impl Validate for UserUpdateRequest {
    type Valid = UserDetails;

    fn validate(self) -> Result<UserDetails, Vec<String>> {
        UserFields {
            name: self.name,
            surname: self.surname,
            email: self.email,
            password: self.password,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
        }
        .into_details()
    }
}

impl Validate for PageParams {
    type Valid = PageParams;

    fn validate(self) -> Result<PageParams, Vec<String>> {
        if self.size == 0 {
            return Err(vec!["size: Page size must be at least 1".to_string()]);
        }
        Ok(self)
    }
}

// local@domain.tld, no whitespace
fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

// \+?[0-9]{7,15}
fn is_phone_number(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (7..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}
