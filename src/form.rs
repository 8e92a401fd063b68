use std::fmt;

/// Smallest number of operands an operation accepts.
pub const MIN_OPERANDS: usize = 2;

/// Why the form cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    Incomplete,
    TooFew,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => f.write_str("Please complete all numbers"),
            Self::TooFew => write!(f, "At least {MIN_OPERANDS} numbers are required"),
        }
    }
}

impl std::error::Error for FormError {}

/// Ordered operand slots as typed by the user.
///
/// Values stay as text; the service decides whether they are numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandForm {
    operands: Vec<String>,
}

impl Default for OperandForm {
    fn default() -> Self {
        Self {
            operands: vec![String::new(); MIN_OPERANDS],
        }
    }
}

impl OperandForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operands: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn operands(&self) -> &[String] {
        &self.operands
    }

    /// Append an empty slot.
    pub fn add(&mut self) {
        self.operands.push(String::new());
    }

    /// Remove the slot at `index` unless only the minimum remains.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.operands.len() <= MIN_OPERANDS || index >= self.operands.len() {
            return false;
        }
        self.operands.remove(index);
        true
    }

    pub fn update(&mut self, index: usize, value: impl Into<String>) -> bool {
        let Some(slot) = self.operands.get_mut(index) else {
            return false;
        };
        *slot = value.into();
        true
    }

    /// Check completeness and return the operands to submit.
    ///
    /// # Errors
    ///
    /// [`FormError::Incomplete`] if any slot is blank, [`FormError::TooFew`]
    /// if fewer than [`MIN_OPERANDS`] slots exist.
    pub fn validate(&self) -> Result<Vec<String>, FormError> {
        if self.operands.iter().any(|v| v.trim().is_empty()) {
            return Err(FormError::Incomplete);
        }
        if self.operands.len() < MIN_OPERANDS {
            return Err(FormError::TooFew);
        }
        Ok(self.operands.iter().map(|v| v.trim().to_string()).collect())
    }
}
