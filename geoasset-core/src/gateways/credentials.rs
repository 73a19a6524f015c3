use std::cell::RefCell;

/// Source of the bearer token that authorizes API requests.
pub trait CredentialProvider {
    fn get(&self) -> Option<String>;
    fn set(&self, token: String);
    fn clear(&self);
}

/// Guards every page that requires a logged in user.
pub fn is_authenticated<C>(credentials: &C) -> bool
where
    C: CredentialProvider + ?Sized,
{
    credentials.get().is_some_and(|token| !token.is_empty())
}

/// Keeps the token in memory only.
#[derive(Debug, Default)]
pub struct MemoryCredentials(RefCell<Option<String>>);

impl MemoryCredentials {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self(RefCell::new(Some(token.into())))
    }
}

impl CredentialProvider for MemoryCredentials {
    fn get(&self) -> Option<String> {
        self.0.borrow().clone()
    }
    fn set(&self, token: String) {
        *self.0.borrow_mut() = Some(token);
    }
    fn clear(&self) {
        self.0.borrow_mut().take();
    }
}

impl<C> CredentialProvider for std::rc::Rc<C>
where
    C: CredentialProvider + ?Sized,
{
    fn get(&self) -> Option<String> {
        (**self).get()
    }
    fn set(&self, token: String) {
        (**self).set(token);
    }
    fn clear(&self) {
        (**self).clear();
    }
}
