//! Membership application form validation
//!
//! Raw form input ([`ApplicationInput`]) becomes a [`MembershipApplication`]
//! only through [`validate`]. Fields are checked in [`Field::ORDER`], which is
//! also the focus order, so the first reported error is deterministic.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use shared::models::MembershipRequest;
use thiserror::Error;

use super::catalog::{Faculty, Skill, StudyYear};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const ADDRESS_MIN: usize = 5;
pub const ADDRESS_MAX: usize = 200;
pub const MIN_AGE: u32 = 16;
pub const MAX_AGE: u32 = 80;
pub const MAX_SKILLS: usize = 10;

/// `+94`, `0` or bare `94`, then nine digits
const PHONE_PATTERN: &str = r"^(?:\+94|0|94)\d{9}$";
const NAME_PATTERN: &str = r"^[\p{L} '\-]+$";

static PHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PHONE_PATTERN).ok());
static NAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(NAME_PATTERN).ok());

fn matches(re: &LazyLock<Option<Regex>>, value: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(value))
}

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Address,
    ContactNumber,
    Birthday,
    Faculty,
    Year,
    Skills,
}

impl Field {
    pub const ORDER: [Field; 7] = [
        Field::FullName,
        Field::Address,
        Field::ContactNumber,
        Field::Birthday,
        Field::Faculty,
        Field::Year,
        Field::Skills,
    ];

    /// Wire / focus-target name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Address => "address",
            Field::ContactNumber => "contactNumber",
            Field::Birthday => "birthday",
            Field::Faculty => "faculty",
            Field::Year => "year",
            Field::Skills => "skills",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::Address => "Address",
            Field::ContactNumber => "Contact number",
            Field::Birthday => "Birthday",
            Field::Faculty => "Faculty",
            Field::Year => "Year of study",
            Field::Skills => "Skills",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was wrong with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationKind {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidCharacters,
    /// Wrong format (phone pattern, unparsable date)
    Invalid,
    FutureDate,
    TooYoung { min_age: u32 },
    TooOld { max_age: u32 },
    NotInCatalog,
    TooManySkills { max: usize },
}

/// First invalid field of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", self.message())]
pub struct ValidationError {
    /// Field to focus
    pub field: Field,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationKind) -> Self {
        Self { field, kind }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ValidationKind::Required => ErrorCode::RequiredField,
            _ => ErrorCode::ValidationFailed,
        }
    }

    /// User-facing message
    pub fn message(&self) -> String {
        let label = self.field.label();
        match (self.field, self.kind) {
            (Field::Skills, ValidationKind::Required) => "Please select at least one skill".into(),
            (Field::Faculty | Field::Year, ValidationKind::Required) => {
                format!("Please select your {}", label.to_lowercase())
            }
            (_, ValidationKind::Required) => format!("{} is required", label),
            (_, ValidationKind::TooShort { min }) => {
                format!("{} must be at least {} characters", label, min)
            }
            (_, ValidationKind::TooLong { max }) => {
                format!("{} must be at most {} characters", label, max)
            }
            (_, ValidationKind::InvalidCharacters) => format!(
                "{} may only contain letters, spaces, hyphens and apostrophes",
                label
            ),
            (Field::ContactNumber, ValidationKind::Invalid) => {
                "Please enter a valid contact number (e.g. 0771234567 or +94771234567)".into()
            }
            (Field::Birthday, ValidationKind::Invalid) => {
                "Please enter a valid date (YYYY-MM-DD)".into()
            }
            (_, ValidationKind::Invalid) => format!("{} is invalid", label),
            (_, ValidationKind::FutureDate) => "Birthday cannot be in the future".into(),
            (_, ValidationKind::TooYoung { min_age }) => {
                format!("You must be at least {} years old to join", min_age)
            }
            (_, ValidationKind::TooOld { max_age }) => {
                format!("Age must be {} years or under", max_age)
            }
            (Field::Skills, ValidationKind::NotInCatalog) => {
                "Please choose skills from the list".into()
            }
            (_, ValidationKind::NotInCatalog) => {
                format!("Please select a valid {}", label.to_lowercase())
            }
            (_, ValidationKind::TooManySkills { max }) => {
                format!("You can select at most {} skills", max)
            }
        }
    }
}

/// Raw form input as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    pub full_name: String,
    pub address: String,
    pub contact_number: String,
    /// `YYYY-MM-DD`
    pub birthday: String,
    pub faculty: String,
    pub year: String,
    pub skills: Vec<String>,
}

/// A validated application
///
/// Only [`validate`] builds one, so every instance has all fields valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipApplication {
    full_name: String,
    address: String,
    contact_number: String,
    birthday: NaiveDate,
    faculty: Faculty,
    year: StudyYear,
    skills: BTreeSet<Skill>,
}

impl MembershipApplication {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn contact_number(&self) -> &str {
        &self.contact_number
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn faculty(&self) -> Faculty {
        self.faculty
    }

    pub fn year(&self) -> StudyYear {
        self.year
    }

    pub fn skills(&self) -> &BTreeSet<Skill> {
        &self.skills
    }

    /// Wire payload for the membership endpoints
    pub fn to_request(&self, user_id: i64, club_id: i64, payment_id: Option<i64>) -> MembershipRequest {
        MembershipRequest {
            user_id,
            club_id,
            payment_id,
            full_name: self.full_name.clone(),
            address: self.address.clone(),
            contact_number: self.contact_number.clone(),
            birthday: self.birthday,
            faculty: self.faculty.label().to_string(),
            year: self.year.label().to_string(),
            skills: self.skills.iter().map(|s| s.label().to_string()).collect(),
        }
    }

    /// Form input that reproduces this application, for re-editing
    pub fn to_input(&self) -> ApplicationInput {
        ApplicationInput {
            full_name: self.full_name.clone(),
            address: self.address.clone(),
            contact_number: self.contact_number.clone(),
            birthday: self.birthday.format("%Y-%m-%d").to_string(),
            faculty: self.faculty.label().to_string(),
            year: self.year.label().to_string(),
            skills: self.skills.iter().map(|s| s.label().to_string()).collect(),
        }
    }
}

fn check_length(value: &str, min: usize, max: usize) -> Result<(), ValidationKind> {
    let len = value.chars().count();
    if len == 0 {
        Err(ValidationKind::Required)
    } else if len < min {
        Err(ValidationKind::TooShort { min })
    } else if len > max {
        Err(ValidationKind::TooLong { max })
    } else {
        Ok(())
    }
}

fn full_name(raw: &str) -> Result<String, ValidationKind> {
    let value = raw.trim();
    check_length(value, NAME_MIN, NAME_MAX)?;
    if !matches(&NAME_RE, value) {
        return Err(ValidationKind::InvalidCharacters);
    }
    Ok(value.to_string())
}

fn address(raw: &str) -> Result<String, ValidationKind> {
    let value = raw.trim();
    check_length(value, ADDRESS_MIN, ADDRESS_MAX)?;
    Ok(value.to_string())
}

fn contact_number(raw: &str) -> Result<String, ValidationKind> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationKind::Required);
    }
    if !matches(&PHONE_RE, value) {
        return Err(ValidationKind::Invalid);
    }
    Ok(value.to_string())
}

fn birthday(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationKind> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationKind::Required);
    }
    let date =
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationKind::Invalid)?;
    let age = today
        .years_since(date)
        .ok_or(ValidationKind::FutureDate)?;
    if age < MIN_AGE {
        return Err(ValidationKind::TooYoung { min_age: MIN_AGE });
    }
    if age > MAX_AGE {
        return Err(ValidationKind::TooOld { max_age: MAX_AGE });
    }
    Ok(date)
}

fn pick<T>(raw: &str, lookup: impl Fn(&str) -> Option<T>) -> Result<T, ValidationKind> {
    if raw.trim().is_empty() {
        return Err(ValidationKind::Required);
    }
    lookup(raw).ok_or(ValidationKind::NotInCatalog)
}

fn skills(raw: &[String]) -> Result<BTreeSet<Skill>, ValidationKind> {
    let distinct: BTreeSet<String> = raw
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if distinct.is_empty() {
        return Err(ValidationKind::Required);
    }
    if distinct.len() > MAX_SKILLS {
        return Err(ValidationKind::TooManySkills { max: MAX_SKILLS });
    }
    distinct
        .iter()
        .map(|s| Skill::from_label(s).ok_or(ValidationKind::NotInCatalog))
        .collect()
}

/// Validate a single field, e.g. on blur
pub fn validate_field(
    field: Field,
    input: &ApplicationInput,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let result = match field {
        Field::FullName => full_name(&input.full_name).map(drop),
        Field::Address => address(&input.address).map(drop),
        Field::ContactNumber => contact_number(&input.contact_number).map(drop),
        Field::Birthday => birthday(&input.birthday, today).map(drop),
        Field::Faculty => pick(&input.faculty, Faculty::from_label).map(drop),
        Field::Year => pick(&input.year, StudyYear::from_label).map(drop),
        Field::Skills => skills(&input.skills).map(drop),
    };
    result.map_err(|kind| ValidationError::new(field, kind))
}

/// Every invalid field, in focus order
pub fn validate_all(input: &ApplicationInput, today: NaiveDate) -> Vec<ValidationError> {
    Field::ORDER
        .iter()
        .filter_map(|field| validate_field(*field, input, today).err())
        .collect()
}

/// Validate the whole form, stopping at the first invalid field
pub fn validate(
    input: &ApplicationInput,
    today: NaiveDate,
) -> Result<MembershipApplication, ValidationError> {
    let err = |field| move |kind| ValidationError::new(field, kind);

    Ok(MembershipApplication {
        full_name: full_name(&input.full_name).map_err(err(Field::FullName))?,
        address: address(&input.address).map_err(err(Field::Address))?,
        contact_number: contact_number(&input.contact_number)
            .map_err(err(Field::ContactNumber))?,
        birthday: birthday(&input.birthday, today).map_err(err(Field::Birthday))?,
        faculty: pick(&input.faculty, Faculty::from_label).map_err(err(Field::Faculty))?,
        year: pick(&input.year, StudyYear::from_label).map_err(err(Field::Year))?,
        skills: skills(&input.skills).map_err(err(Field::Skills))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn valid_input() -> ApplicationInput {
        ApplicationInput {
            full_name: "  Ana Perera-Silva ".into(),
            address: "12 Lake Road, Kandy".into(),
            contact_number: "0771234567".into(),
            birthday: "2004-02-29".into(),
            faculty: "Faculty of Science".into(),
            year: "2nd Year".into(),
            skills: vec!["Leadership".into(), "Photography".into()],
        }
    }

    #[test]
    fn test_patterns_compile() {
        assert!(PHONE_RE.is_some());
        assert!(NAME_RE.is_some());
    }

    #[test]
    fn test_valid_application_is_trimmed_and_typed() {
        let app = validate(&valid_input(), today()).unwrap();
        assert_eq!(app.full_name(), "Ana Perera-Silva");
        assert_eq!(app.faculty(), Faculty::Science);
        assert_eq!(app.year(), StudyYear::Second);
        assert_eq!(app.skills().len(), 2);
        assert_eq!(app.birthday(), NaiveDate::from_ymd_opt(2004, 2, 29).unwrap());
    }

    #[test]
    fn test_first_invalid_field_wins() {
        let input = ApplicationInput {
            address: "abc".into(),
            contact_number: "123".into(),
            skills: vec![],
            ..valid_input()
        };
        let err = validate(&input, today()).unwrap_err();
        assert_eq!(err.field, Field::Address);
        assert_eq!(err.kind, ValidationKind::TooShort { min: ADDRESS_MIN });

        let all = validate_all(&input, today());
        let fields: Vec<Field> = all.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Address, Field::ContactNumber, Field::Skills]);
    }

    #[test]
    fn test_empty_form_focuses_full_name() {
        let err = validate(&ApplicationInput::default(), today()).unwrap_err();
        assert_eq!(err, ValidationError::new(Field::FullName, ValidationKind::Required));
        assert_eq!(err.code(), ErrorCode::RequiredField);
        assert_eq!(validate_all(&ApplicationInput::default(), today()).len(), 7);
    }

    #[test]
    fn test_full_name_rules() {
        for (name, kind) in [
            ("A", ValidationKind::TooShort { min: NAME_MIN }),
            ("Ana 2nd", ValidationKind::InvalidCharacters),
            ("Ana_Perera", ValidationKind::InvalidCharacters),
        ] {
            let input = ApplicationInput {
                full_name: name.into(),
                ..valid_input()
            };
            assert_eq!(validate(&input, today()).unwrap_err().kind, kind, "{name}");
        }

        let input = ApplicationInput {
            full_name: "a".repeat(101),
            ..valid_input()
        };
        assert_eq!(
            validate(&input, today()).unwrap_err().kind,
            ValidationKind::TooLong { max: NAME_MAX }
        );

        let input = ApplicationInput {
            full_name: "Séamus O'Neill".into(),
            ..valid_input()
        };
        assert!(validate(&input, today()).is_ok());
    }

    #[test]
    fn test_contact_number_pattern() {
        for ok in ["0771234567", "+94771234567", "94771234567", " 0771234567 "] {
            let input = ApplicationInput {
                contact_number: ok.into(),
                ..valid_input()
            };
            assert!(validate_field(Field::ContactNumber, &input, today()).is_ok(), "{ok}");
        }
        for bad in ["771234567", "077123456", "+9477123456789", "077-123-4567", "+1 5551234567"] {
            let input = ApplicationInput {
                contact_number: bad.into(),
                ..valid_input()
            };
            let err = validate_field(Field::ContactNumber, &input, today()).unwrap_err();
            assert_eq!(err.kind, ValidationKind::Invalid, "{bad}");
        }
    }

    #[test]
    fn test_age_fifteen_is_rejected_with_age_message() {
        let input = ApplicationInput {
            birthday: "2011-01-01".into(),
            ..valid_input()
        };
        let err = validate(&input, today()).unwrap_err();
        assert_eq!(err.field, Field::Birthday);
        assert_eq!(err.kind, ValidationKind::TooYoung { min_age: 16 });
        assert!(err.to_string().contains("16 years old"));
    }

    #[test]
    fn test_birthday_boundaries() {
        let check = |raw: &str| validate_field(Field::Birthday, &ApplicationInput {
            birthday: raw.into(),
            ..valid_input()
        }, today());

        assert!(check("2010-10-19").is_ok());
        assert_eq!(
            check("2010-10-20").unwrap_err().kind,
            ValidationKind::TooYoung { min_age: 16 }
        );
        assert!(check("1945-10-20").is_ok());
        assert_eq!(
            check("1945-10-19").unwrap_err().kind,
            ValidationKind::TooOld { max_age: 80 }
        );
        assert_eq!(check("2026-10-20").unwrap_err().kind, ValidationKind::FutureDate);
        assert_eq!(check("19/10/2004").unwrap_err().kind, ValidationKind::Invalid);
        assert_eq!(check("2004-02-30").unwrap_err().kind, ValidationKind::Invalid);
    }

    #[test]
    fn test_faculty_and_year_from_fixed_lists() {
        let input = ApplicationInput {
            faculty: "Faculty of Magic".into(),
            ..valid_input()
        };
        let err = validate(&input, today()).unwrap_err();
        assert_eq!(err, ValidationError::new(Field::Faculty, ValidationKind::NotInCatalog));

        let input = ApplicationInput {
            year: "".into(),
            ..valid_input()
        };
        let err = validate(&input, today()).unwrap_err();
        assert_eq!(err.field, Field::Year);
        assert_eq!(err.message(), "Please select your year of study");
    }

    #[test]
    fn test_eleven_skills_rejected_with_max_count_message() {
        let input = ApplicationInput {
            skills: Skill::ALL[..11].iter().map(|s| s.label().to_string()).collect(),
            ..valid_input()
        };
        let err = validate(&input, today()).unwrap_err();
        assert_eq!(err.field, Field::Skills);
        assert_eq!(err.kind, ValidationKind::TooManySkills { max: 10 });
        assert_eq!(err.to_string(), "You can select at most 10 skills");
    }

    #[test]
    fn test_skills_collapse_duplicates() {
        let input = ApplicationInput {
            skills: vec!["Marketing".into(), "marketing".into(), " Marketing ".into()],
            ..valid_input()
        };
        let app = validate(&input, today()).unwrap();
        assert_eq!(app.skills().iter().copied().collect::<Vec<_>>(), vec![Skill::Marketing]);
    }

    #[test]
    fn test_unknown_skill() {
        let input = ApplicationInput {
            skills: vec!["Leadership".into(), "Juggling".into()],
            ..valid_input()
        };
        let err = validate(&input, today()).unwrap_err();
        assert_eq!(err, ValidationError::new(Field::Skills, ValidationKind::NotInCatalog));
    }

    #[test]
    fn test_to_request_and_back() {
        let app = validate(&valid_input(), today()).unwrap();
        let request = app.to_request(7, 3, Some(42));
        assert_eq!(request.payment_id, Some(42));
        assert_eq!(request.faculty, "Faculty of Science");
        assert_eq!(request.skills, vec!["Leadership", "Photography"]);

        let again = validate(&app.to_input(), today()).unwrap();
        assert_eq!(again, app);
    }
}
