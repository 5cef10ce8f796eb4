//! Outcome module - the normalized result of a confirmation call

use serde::{Deserialize, Serialize};

/// Canonical interpretation of the provider's analysis payload
///
/// Every field is optional because the source is untrusted. An outcome with
/// no populated fields means the payload parsed but carried nothing
/// recognizable; that is different from having no outcome at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOutcome {
    /// Whether the call achieved its goal; `None` when undetermined
    pub call_success: Option<bool>,

    /// What the patient answered
    pub patient_response: Option<String>,

    /// Provider's explanation of the result
    pub reason: Option<String>,

    /// Questions the patient asked, in order
    #[serde(default)]
    pub questions: Vec<String>,
}

impl CallOutcome {
    /// Whether no field carries a value
    ///
    /// # Examples
    ///
    /// ```
    /// use attendsure_domain::CallOutcome;
    ///
    /// assert!(CallOutcome::default().is_empty());
    ///
    /// let outcome = CallOutcome {
    ///     questions: vec!["Can I bring a companion?".to_string()],
    ///     ..Default::default()
    /// };
    /// assert!(!outcome.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.call_success.is_none()
            && self.patient_response.is_none()
            && self.reason.is_none()
            && self.questions.is_empty()
    }

    /// Human label for `call_success`
    pub fn success_label(&self) -> &'static str {
        match self.call_success {
            Some(true) => "Successful",
            Some(false) => "Failed",
            None => "Not determined",
        }
    }
}
