//! Registration and login.

use crate::error::{CrowdfundError, CrowdfundResult};
use crate::model::User;
use crate::store::Store;
use crate::validation::{check_passwords_match, check_phone};

/// Raw registration input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

impl Store {
    /// Validate and append a new user, then save.
    /// Password confirmation is checked before the phone. Duplicate emails
    /// are accepted.
    pub fn register(&mut self, form: Registration) -> CrowdfundResult<&User> {
        check_passwords_match(&form.password, &form.confirm_password)?;
        check_phone(&form.phone)?;

        self.users_mut().push(User {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
            phone: form.phone,
        });
        self.save()?;

        let users = self.users();
        Ok(&users[users.len() - 1])
    }

    /// First user whose email and password both match exactly.
    /// Returns the email to use as the session identity.
    pub fn login(&self, email: &str, password: &str) -> CrowdfundResult<String> {
        self.users()
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(|u| u.email.clone())
            .ok_or(CrowdfundError::InvalidCredentials)
    }
}
