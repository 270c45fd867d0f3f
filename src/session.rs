/// Who is at the keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { email: String },
}

impl Session {
    pub fn login(&mut self, email: String) {
        *self = Session::Authenticated { email };
    }

    /// Drop back to anonymous, returning the identity that was signed in.
    pub fn logout(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Session::Authenticated { email } => Some(email),
            Session::Anonymous => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Session::Authenticated { email } => Some(email),
            Session::Anonymous => None,
        }
    }
}
