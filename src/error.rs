
use std::error::Error;
use std::fmt::{self, Display, Debug};

/// Describes one failure class: a human readable message plus the
/// underlying cause, if any.
pub trait ErrorDescription {
    fn description(&self) -> impl Display;
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl<T> ErrorDescription for T
where
    T: Display,
{
    fn description(&self) -> impl Display {
        self
    }
}

pub struct GenericError<T>(pub T) where T: ErrorDescription;

impl<T> GenericError<T>
where
    T: ErrorDescription,
{
    pub const fn new(err: T) -> Self {
        Self(err)
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn as_inner(&self) -> &T {
        &self.0
    }

    pub fn kind(&self) -> &'static str {
        self.0.kind()
    }
}

impl<T> Debug for GenericError<T>
where
    T: ErrorDescription,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.source() {
            Some(source) => write!(f, "GenericError({}): {} (caused by: {:?})", self.kind(), self.0.description(), source),
            None => write!(f, "GenericError({}): {}", self.kind(), self.0.description()),
        }
    }
}

impl<T> Display for GenericError<T>
where
    T: ErrorDescription,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.description())
    }
}

impl<T> Error for GenericError<T>
where
    T: ErrorDescription,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl<T> From<T> for GenericError<T>
where
    T: ErrorDescription,
{
    fn from(err: T) -> Self {
        Self::new(err)
    }
}
