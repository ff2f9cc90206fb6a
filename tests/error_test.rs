use std::io;

use gog::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ValidationError("invalid name".to_string());
    assert_eq!(err.to_string(), "Validation error: invalid name.");

    let err = Error::TemplateError {
        path: "template/.env.example".to_string(),
        reason: "no such file".to_string(),
    };
    assert_eq!(err.to_string(), "Template error in 'template/.env.example': no such file.");
}

#[test]
fn test_setup_error_carries_output() {
    let err = Error::SetupError {
        step: "Tidying project".to_string(),
        reason: "'go mod tidy' exited with exit status: 1".to_string(),
        output: "go: network unreachable".to_string(),
    };
    let message = err.to_string();

    assert!(message.starts_with("Tidying project failed:"));
    assert!(message.ends_with("Output: go: network unreachable"));
}
