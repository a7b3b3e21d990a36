//! Request payloads accepted by the employee routes and their validation.

use platform_api::{ApiError, ApiResult};
use platform_db::{EmployeeFields, SaveEmployee};
use serde::Deserialize;

/// Longest value the `employees` columns accept.
pub const MAX_FIELD_LEN: usize = 45;

#[derive(Debug, Deserialize)]
pub struct EmployeeIdQuery {
    #[serde(rename = "employeeId")]
    pub employee_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "employeeName")]
    pub employee_name: String,
}

/// Flat form body posted by the employee form. `id` is only present when
/// editing an existing record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    #[serde(default)]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl TryFrom<EmployeeForm> for SaveEmployee {
    type Error = ApiError;

    fn try_from(form: EmployeeForm) -> ApiResult<Self> {
        let id = parse_optional_id(form.id.as_deref())?;
        let mut problems = Vec::new();
        let first_name = required("first name", &form.first_name, &mut problems);
        let last_name = required("last name", &form.last_name, &mut problems);
        let email = required("email", &form.email, &mut problems);
        if !email.is_empty() && !email.contains('@') {
            problems.push("email must contain '@'".to_string());
        }
        if !problems.is_empty() {
            return Err(ApiError::invalid(problems.join("; ")));
        }

        let fields = EmployeeFields {
            first_name,
            last_name,
            email,
        };
        Ok(match id {
            Some(id) => SaveEmployee::Update { id, fields },
            None => SaveEmployee::Create(fields),
        })
    }
}

fn parse_optional_id(raw: Option<&str>) -> ApiResult<Option<i32>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ApiError::invalid(format!("invalid employee id `{value}`"))),
    }
}

fn required(label: &str, raw: &str, problems: &mut Vec<String>) -> String {
    let value = raw.trim();
    if value.is_empty() {
        problems.push(format!("{label} is required"));
    } else if value.chars().count() > MAX_FIELD_LEN {
        problems.push(format!(
            "{label} must be at most {MAX_FIELD_LEN} characters"
        ));
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(id: Option<&str>, first: &str, last: &str, email: &str) -> EmployeeForm {
        EmployeeForm {
            id: id.map(Into::into),
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
        }
    }

    fn expect_invalid(result: ApiResult<SaveEmployee>) -> String {
        match result {
            Err(ApiError::InvalidInput(msg)) => msg,
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn missing_id_means_create() {
        let request = SaveEmployee::try_from(form(None, " Ada ", "Lovelace", "ada@example.com"));
        assert_eq!(
            request.unwrap(),
            SaveEmployee::Create(EmployeeFields {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
            })
        );
    }

    #[test]
    fn blank_id_means_create() {
        let request = SaveEmployee::try_from(form(Some("  "), "Ada", "Lovelace", "a@b.c"));
        assert!(matches!(request, Ok(SaveEmployee::Create(_))));
    }

    #[test]
    fn numeric_id_means_update() {
        let request = SaveEmployee::try_from(form(Some("27"), "Ada", "Lovelace", "a@b.c"));
        assert!(matches!(request, Ok(SaveEmployee::Update { id: 27, .. })));
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let msg = expect_invalid(SaveEmployee::try_from(form(
            Some("abc"),
            "Ada",
            "Lovelace",
            "a@b.c",
        )));
        assert!(msg.contains("invalid employee id"));
    }

    #[test]
    fn every_problem_is_reported() {
        let msg = expect_invalid(SaveEmployee::try_from(form(None, " ", "", "nope")));
        assert!(msg.contains("first name is required"));
        assert!(msg.contains("last name is required"));
        assert!(msg.contains("email must contain '@'"));
    }

    #[test]
    fn overlong_values_are_rejected() {
        let long = "x".repeat(MAX_FIELD_LEN + 1);
        let msg = expect_invalid(SaveEmployee::try_from(form(None, &long, "Lovelace", "a@b.c")));
        assert!(msg.contains("first name must be at most 45 characters"));
    }
}
