//! Utilidades de validación
//!
//! Helpers de validación de datos compartidos por los DTOs. El core
//! asume que las formas ya fueron validadas aquí; las reglas de negocio
//! (existencia del vehículo, conflictos de horario) se verifican aparte.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Código de ubicación: exactamente 6 dígitos.
    pub static ref PINCODE_RE: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

/// Validar que el inicio de la reserva esté estrictamente en el futuro.
pub fn validate_future_start(start_time: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *start_time <= Utc::now() {
        let mut error = ValidationError::new("future_start");
        error.message = Some("startTime must be strictly in the future".into());
        error.add_param("value".into(), &start_time.to_rfc3339());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn pincode_regex_accepts_six_digits() {
        assert!(PINCODE_RE.is_match("110001"));
        assert!(PINCODE_RE.is_match("000000"));
    }

    #[test]
    fn pincode_regex_rejects_other_shapes() {
        for bad in ["11001", "1100011", "11000a", "ABCDEF", "", " 110001"] {
            assert!(!PINCODE_RE.is_match(bad), "accepted {:?}", bad);
        }
    }

    #[test]
    fn future_start_accepts_future() {
        let start = Utc::now() + Duration::minutes(30);
        assert!(validate_future_start(&start).is_ok());
    }

    #[test]
    fn future_start_rejects_past_and_now() {
        let past = Utc::now() - Duration::minutes(1);
        assert!(validate_future_start(&past).is_err());
    }
}
