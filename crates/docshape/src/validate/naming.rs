//! Plain-name rules for field identities, reference paths and class names.

/// Ensure a field name is usable as a top-level document key.
pub(crate) fn validate_field_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("field name is empty".to_string());
    }
    if name.starts_with('$') {
        return Err(format!("field name '{name}' must not start with '$'"));
    }
    if name.contains('.') {
        return Err(format!("field name '{name}' must not contain '.'"));
    }
    if name.contains('\0') {
        return Err(format!("field name '{name}' must not contain NUL"));
    }

    Ok(())
}

/// Ensure a dotted path is made of valid field names.
pub(crate) fn validate_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("path is empty".to_string());
    }

    for segment in path.split('.') {
        validate_field_name(segment).map_err(|err| format!("path '{path}': {err}"))?;
    }

    Ok(())
}

/// Ensure class names are non-empty and free of whitespace.
pub(crate) fn validate_class_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("class name is empty".to_string());
    }
    if name.chars().any(char::is_whitespace) {
        return Err(format!("class name '{name}' must not contain whitespace"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_operator_and_dotted_field_names() {
        assert!(validate_field_name("").is_err(), "empty names should fail");
        assert!(validate_field_name("$set").is_err());
        assert!(validate_field_name("a.b").is_err());
        assert!(validate_field_name("nul\0").is_err());
    }

    #[test]
    fn accepts_plain_field_name() {
        assert!(validate_field_name("created_at").is_ok());
        assert!(validate_field_name("_id").is_ok());
    }

    #[test]
    fn paths_split_on_dots() {
        assert!(validate_path("owner.kind").is_ok());
        assert!(validate_path("owner..kind").is_err());
        assert!(validate_path(".kind").is_err());
    }

    #[test]
    fn class_names_reject_whitespace() {
        assert!(validate_class_name("User").is_ok());
        assert!(validate_class_name("Bad Name").is_err());
        assert!(validate_class_name("").is_err());
    }
}
