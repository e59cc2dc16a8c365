//! Canonical consent message.
//!
//! The text is what the wallet signs and what the store keeps next to the
//! signature. Changing the template breaks replay verification of every
//! consent signed before the change.

pub fn canonical_message(patient_id: &str, purpose: &str) -> String {
    format!("I consent to: {purpose} for patient: {patient_id}")
}

#[cfg(test)]
mod test {
    use super::canonical_message;

    #[test]
    fn test_canonical_message() {
        assert_eq!(
            canonical_message("patient-001", "Research Study Participation"),
            "I consent to: Research Study Participation for patient: patient-001"
        );
    }

    #[test]
    fn test_canonical_message_keeps_input_verbatim() {
        assert_eq!(
            canonical_message(" patient-002", "Insurance Provider Access"),
            "I consent to: Insurance Provider Access for patient:  patient-002"
        );
    }
}
