/// A slot that accepts a single write.
///
/// Scanner state that is discovered during alignment is never revised, so a second write
/// always indicates a defect in the caller. [`WriteOnce::set`] hands the rejected value
/// back rather than overwriting the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOnce<T>(Option<T>);

impl<T> WriteOnce<T> {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Stores `value` if the slot is empty, otherwise returns it untouched as the error.
    pub fn set(&mut self, value: T) -> Result<(), T> {
        match self.0 {
            Some(_) => Err(value),
            None => {
                self.0 = Some(value);
                Ok(())
            }
        }
    }
}

impl<T> Default for WriteOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}
