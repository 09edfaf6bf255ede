// Task name generation and validation

/// Longest task name the store accepts, in bytes
pub const MAX_NAME_LEN: usize = 31;

/// Default name for a task started without one
pub fn generate_name(ordinal: usize) -> String {
    format!("Task-{}", ordinal)
}

/// Validate that a task name fits the whitespace-delimited store format
pub fn validate_task_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Task name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!(
            "Task name '{}' is too long ({} bytes, at most {} allowed)",
            name,
            name.len(),
            MAX_NAME_LEN
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(format!("Task name '{}' cannot contain whitespace", name));
    }
    Ok(())
}
