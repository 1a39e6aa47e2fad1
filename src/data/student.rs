use crate::error::{FieldError, RosterError, RosterResult};
use serde::{Deserialize, Deserializer, Serialize};

pub const MINIMUM_AGE: i32 = 18;

/// A row of `public.students`. `id` is `None` until the first save.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: Option<i64>,
    pub name: String,
    pub major: Option<String>,
    pub age: i32,
}

/// What goes over the wire. Missing or `null` `name`/`age` deserialise to values that fail [`StudentDto::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: i32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl StudentDto {
    pub fn validate(&self) -> RosterResult<()> {
        let mut errors = vec![];

        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: "name",
                message: "must not be blank",
            });
        }
        if self.age < MINIMUM_AGE {
            errors.push(FieldError {
                field: "age",
                message: "must be greater than or equal to 18",
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RosterError::InvalidStudent { errors })
        }
    }
}

impl From<Student> for StudentDto {
    fn from(Student { id, name, major, age }: Student) -> Self {
        Self {
            id,
            name,
            major,
            age,
        }
    }
}

impl From<StudentDto> for Student {
    fn from(StudentDto { id, name, major, age }: StudentDto) -> Self {
        Self {
            id,
            name,
            major,
            age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, age: i32) -> StudentDto {
        StudentDto {
            id: None,
            name: name.into(),
            major: Some("CS".into()),
            age,
        }
    }

    fn failed_fields(dto: &StudentDto) -> Vec<&'static str> {
        match dto.validate() {
            Err(RosterError::InvalidStudent { errors }) => errors.iter().map(|e| e.field).collect(),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn adult_with_a_name_is_valid() {
        assert!(dto("Ada", 25).validate().is_ok());
        assert!(dto("Ada", MINIMUM_AGE).validate().is_ok());
    }

    #[test]
    fn minors_are_rejected() {
        assert_eq!(failed_fields(&dto("Ada", 17)), ["age"]);
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(failed_fields(&dto("", 20)), ["name"]);
        assert_eq!(failed_fields(&dto("  \t", 20)), ["name"]);
    }

    #[test]
    fn every_violation_is_reported() {
        assert_eq!(failed_fields(&dto(" ", 3)), ["name", "age"]);
    }

    #[test]
    fn missing_fields_deserialise_into_invalid_values() {
        let dto: StudentDto = serde_json::from_str(r#"{"major":"Art"}"#).unwrap();
        assert_eq!(dto.id, None);
        assert_eq!(failed_fields(&dto), ["name", "age"]);
    }

    #[test]
    fn null_fields_deserialise_into_invalid_values() {
        let dto: StudentDto =
            serde_json::from_str(r#"{"id":null,"name":null,"major":null,"age":null}"#).unwrap();
        assert_eq!(dto.major, None);
        assert_eq!(failed_fields(&dto), ["name", "age"]);
    }

    #[test]
    fn absent_id_serialises_as_null() {
        let json = serde_json::to_value(dto("Ada", 25)).unwrap();
        assert!(json["id"].is_null());
        assert_eq!(json["name"], "Ada");
    }

    #[test]
    fn mapping_keeps_every_field() {
        let student = Student {
            id: Some(3),
            name: "Bea".into(),
            major: None,
            age: 30,
        };

        let dto = StudentDto::from(student.clone());
        assert_eq!(dto.id, Some(3));
        assert_eq!(dto.major, None);
        assert_eq!(Student::from(dto), student);
    }
}
