use serde::{Deserialize, Serialize};

pub const MSG_USER_EXISTS: &str = "User Already Exist";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid Credentials.";
pub const MSG_MISSING_FIELDS: &str = "Username and password are required";

/// Signup form body (urlencoded).
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login form body (urlencoded).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// View model for the signup and login pages.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub page: &'static str,
    pub msg: String,
}

impl FormPage {
    pub fn signup(msg: &str) -> Self {
        Self {
            page: "signup",
            msg: msg.to_string(),
        }
    }

    pub fn login(msg: &str) -> Self {
        Self {
            page: "login",
            msg: msg.to_string(),
        }
    }
}
