//! User directory records and the form payload used to create or edit them.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stable numeric identifier of a directory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Access level shown in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Regular account.
    #[default]
    User,
}

impl Role {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the user directory.
///
/// ## Invariants
/// - `id` is unique within the owning directory.
/// - `create_time` is stamped once, when the record is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    phone: String,
    role: Role,
    create_time: NaiveDate,
}

impl UserRecord {
    /// Assemble a record from an already validated draft.
    pub fn from_draft(id: UserId, draft: UserDraft, create_time: NaiveDate) -> Self {
        let UserDraft {
            name,
            email,
            phone,
            role,
        } = draft;
        Self {
            id,
            name,
            email,
            phone,
            role,
            create_time,
        }
    }

    /// Build a fixture record without form validation.
    pub(crate) fn seed(
        id: UserId,
        [name, email, phone]: [&str; 3],
        role: Role,
        create_time: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            role,
            create_time,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Access level.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Date the record was added.
    pub fn create_time(&self) -> NaiveDate {
        self.create_time
    }

    /// Merge the fields present in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            name,
            email,
            phone,
            role,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(role) = role {
            self.role = role;
        }
    }

    /// Case-insensitive match on name and email, verbatim match on phone.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_keyword(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.phone.contains(needle)
    }
}

/// Field-level validation failures for [`UserForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    /// Name is blank once trimmed.
    EmptyName,
    /// Email is blank once trimmed.
    EmptyEmail,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
    /// Phone is blank once trimmed.
    EmptyPhone,
    /// Phone is not an 11-digit mobile number.
    InvalidPhone,
}

impl UserValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPhone | Self::InvalidPhone => "phone",
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPhone => "empty_phone",
            Self::InvalidPhone => "invalid_phone",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email is not a valid address"),
            Self::EmptyPhone => write!(f, "phone must not be empty"),
            Self::InvalidPhone => write!(f, "phone must be an 11-digit mobile number"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Every field error found in one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserValidationErrors(Vec<UserValidationError>);

impl UserValidationErrors {
    /// Individual field errors in form order.
    pub fn errors(&self) -> &[UserValidationError] {
        &self.0
    }
}

impl fmt::Display for UserValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for UserValidationErrors {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^1[3-9]\d{9}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Raw add/edit form payload, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Access level; regular user when omitted.
    #[serde(default)]
    pub role: Role,
}

/// Form payload that passed validation.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `email` matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
/// - `phone` matches `^1[3-9]\d{9}$`.
///
/// Values are kept exactly as submitted.
///
/// # Examples
/// ```
/// use admin_console::domain::{Role, UserDraft, UserForm};
///
/// let draft = UserDraft::try_from(UserForm {
///     name: "Ada".into(),
///     email: "ada@example.com".into(),
///     phone: "13800138000".into(),
///     role: Role::Admin,
/// })
/// .expect("valid form");
/// assert_eq!(draft.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    email: String,
    phone: String,
    role: Role,
}

impl UserDraft {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Access level.
    pub fn role(&self) -> Role {
        self.role
    }
}

impl TryFrom<UserForm> for UserDraft {
    type Error = UserValidationErrors;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        if form.name.trim().is_empty() {
            errors.push(UserValidationError::EmptyName);
        }
        if form.email.trim().is_empty() {
            errors.push(UserValidationError::EmptyEmail);
        } else if !email_regex().is_match(&form.email) {
            errors.push(UserValidationError::InvalidEmail);
        }
        if form.phone.trim().is_empty() {
            errors.push(UserValidationError::EmptyPhone);
        } else if !phone_regex().is_match(&form.phone) {
            errors.push(UserValidationError::InvalidPhone);
        }

        if !errors.is_empty() {
            return Err(UserValidationErrors(errors));
        }

        let UserForm {
            name,
            email,
            phone,
            role,
        } = form;
        Ok(Self {
            name,
            email,
            phone,
            role,
        })
    }
}

/// Partial update applied to an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
    /// Replacement phone number.
    pub phone: Option<String>,
    /// Replacement access level.
    pub role: Option<Role>,
}

impl From<UserDraft> for UserPatch {
    fn from(draft: UserDraft) -> Self {
        let UserDraft {
            name,
            email,
            phone,
            role,
        } = draft;
        Self {
            name: Some(name),
            email: Some(email),
            phone: Some(phone),
            role: Some(role),
        }
    }
}
