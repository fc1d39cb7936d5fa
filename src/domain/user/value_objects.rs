use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Username value object
///
/// # Invariants
/// - Leading and trailing whitespace is removed
/// - Between 3 and 32 characters after trimming
/// - Never parses as a [`MobileNumber`], so a login string names one account
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 32;

    /// Creates a new Username value object
    ///
    /// # Example
    /// ```
    /// use ecocycle_api::domain::user::Username;
    ///
    /// let name = Username::new("  ravi ").expect("valid username");
    /// assert_eq!(name.as_str(), "ravi");
    /// ```
    pub fn new(username: impl AsRef<str>) -> Result<Self, String> {
        let trimmed = username.as_ref().trim();
        let len = trimmed.chars().count();
        if len < Self::MIN_LEN || len > Self::MAX_LEN {
            return Err(format!(
                "Username must be between {} and {} characters",
                Self::MIN_LEN,
                Self::MAX_LEN
            ));
        }
        if MobileNumber::new(trimmed).is_ok() {
            return Err("Username cannot be a mobile number".to_string());
        }
        Ok(Username(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mobile number value object
///
/// # Invariants
/// - Optional leading '+', then digits only
/// - Between 7 and 15 digits (E.164 upper bound)
/// - Spaces and dashes are stripped before validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Creates a new MobileNumber value object
    ///
    /// # Example
    /// ```
    /// use ecocycle_api::domain::user::MobileNumber;
    ///
    /// let number = MobileNumber::new("98290-12345").expect("valid number");
    /// assert_eq!(number.as_str(), "9829012345");
    /// ```
    pub fn new(number: impl AsRef<str>) -> Result<Self, String> {
        let normalized: String = number
            .as_ref()
            .trim()
            .chars()
            .filter(|c| *c != ' ' && *c != '-')
            .collect();

        let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
        let valid = !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && (7..=15).contains(&digits.len());

        if valid {
            Ok(MobileNumber(normalized))
        } else {
            Err(format!("Invalid mobile number: {}", number.as_ref()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the marketplace an account is on. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Collector,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Collector => "collector",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "collector" => Ok(Role::Collector),
            other => Err(format!("Unknown user type: {}", other)),
        }
    }
}

/// Postal address; every part is optional free text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none() && self.zip_code.is_none()
    }
}
