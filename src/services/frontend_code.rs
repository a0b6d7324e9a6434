//! Human-facing `PREFIX-NUMBER` codes such as `PRD-001`.

use super::department::Department;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("invalid frontend code format: '{0}'")]
    InvalidFormat(String),
    #[error("invalid numeric part in frontend code: '{0}'")]
    InvalidNumericPart(String),
    #[error("unknown department prefix: '{0}'")]
    UnknownDepartment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCode {
    pub prefix: String,
    pub numeric_id: u64,
}

/// Splits a code on its single `-`. The prefix is returned as written; mapping
/// it to a department is the resolver's job.
pub fn decode(code: &str) -> Result<DecodedCode, CodeError> {
    let mut parts = code.split('-');
    let (Some(prefix), Some(number), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CodeError::InvalidFormat(code.to_string()));
    };

    let numeric_id = number
        .parse::<u64>()
        .map_err(|_| CodeError::InvalidNumericPart(code.to_string()))?;

    Ok(DecodedCode {
        prefix: prefix.to_string(),
        numeric_id,
    })
}

/// No zero padding is applied: `encode(Production, 7)` is `PRD-7`.
pub fn encode(department: Department, numeric_id: u64) -> String {
    format!("{}-{numeric_id}", department.prefix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PRD-001", "PRD", 1)]
    #[case("OVH-12", "OVH", 12)]
    #[case("rky-0", "rky", 0)]
    #[case("KAL-4294967296", "KAL", 4_294_967_296)]
    #[case("XYZ-3", "XYZ", 3)]
    fn test_decode_valid_codes(#[case] code: &str, #[case] prefix: &str, #[case] id: u64) {
        assert_eq!(
            decode(code),
            Ok(DecodedCode {
                prefix: prefix.to_string(),
                numeric_id: id
            })
        );
    }

    #[rstest]
    #[case("PRD001")]
    #[case("")]
    #[case("PRD-0-1")]
    #[case("PRD--1")]
    fn test_decode_rejects_wrong_separator_count(#[case] code: &str) {
        assert_eq!(decode(code), Err(CodeError::InvalidFormat(code.to_string())));
    }

    #[rstest]
    #[case("PRD-")]
    #[case("PRD-abc")]
    #[case("PRD- 7")]
    #[case("PRD-1.5")]
    #[case("PRD-99999999999999999999999")]
    fn test_decode_rejects_non_numeric_part(#[case] code: &str) {
        assert_eq!(
            decode(code),
            Err(CodeError::InvalidNumericPart(code.to_string()))
        );
    }

    #[test]
    fn test_encode_has_no_padding() {
        assert_eq!(encode(Department::Production, 7), "PRD-7");
        assert_eq!(encode(Department::Kalibrasi, 120), "KAL-120");
    }

    #[test]
    fn test_encode_round_trips_the_number() {
        for department in Department::ALL {
            for number in ["0", "1", "001", "42", "1000"] {
                let decoded = decode(&format!("{}-{number}", department.prefix())).unwrap();
                let from_prefix = Department::from_prefix(&decoded.prefix).unwrap();
                assert_eq!(from_prefix, department);
                assert_eq!(
                    encode(from_prefix, decoded.numeric_id),
                    format!("{}-{}", department.prefix(), number.parse::<u64>().unwrap())
                );
            }
        }
    }
}
