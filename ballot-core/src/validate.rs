//! Pre-submit input validation for write actions.
//!
//! Every mutating operation validates its input here, synchronously,
//! before any remote call. A [`ValidationError`] means zero remote calls
//! were (or will be) issued for that action.

use crate::error::ValidationError;
use crate::types::Address;

/// Candidate name: trimmed, non-empty.
pub fn candidate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyCandidateName);
    }
    Ok(name.to_owned())
}

/// Voter address: must be a well-formed ledger address.
pub fn voter_address(raw: &str) -> Result<Address, ValidationError> {
    Address::parse(raw).ok_or(ValidationError::MalformedAddress)
}

/// Voting duration: a positive number of minutes.
pub fn duration_minutes(minutes: u64) -> Result<u64, ValidationError> {
    if minutes == 0 {
        return Err(ValidationError::NonPositiveDuration);
    }
    Ok(minutes)
}

/// Candidate selection: an ordinal must be chosen (ordinals are 1-based,
/// so zero means "no selection" — the empty option of a selection control).
pub fn candidate_selection(selected: Option<u32>) -> Result<u32, ValidationError> {
    match selected {
        Some(ordinal) if ordinal >= 1 => Ok(ordinal),
        _ => Err(ValidationError::NoCandidateSelected),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn candidate_name_trims_whitespace() {
        assert_eq!(candidate_name("  Alice  ").unwrap(), "Alice");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn candidate_name_rejects_blank(#[case] raw: &str) {
        assert_eq!(
            candidate_name(raw),
            Err(ValidationError::EmptyCandidateName)
        );
    }

    #[test]
    fn voter_address_accepts_well_formed() {
        let parsed = voter_address("0x1234567890abcdef1234567890abcdef12345678");
        assert!(parsed.is_ok());
    }

    #[test]
    fn voter_address_rejects_malformed() {
        assert_eq!(
            voter_address("not-an-address"),
            Err(ValidationError::MalformedAddress)
        );
    }

    #[test]
    fn duration_must_be_positive() {
        assert_eq!(
            duration_minutes(0),
            Err(ValidationError::NonPositiveDuration)
        );
        assert_eq!(duration_minutes(15).unwrap(), 15);
    }

    #[test]
    fn selection_requires_an_ordinal() {
        assert_eq!(
            candidate_selection(None),
            Err(ValidationError::NoCandidateSelected)
        );
        assert_eq!(
            candidate_selection(Some(0)),
            Err(ValidationError::NoCandidateSelected)
        );
        assert_eq!(candidate_selection(Some(2)).unwrap(), 2);
    }
}
