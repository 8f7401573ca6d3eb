//! Estimador de duración y coste
//!
//! Heurística determinista sobre pares de pincodes: la duración es la
//! diferencia absoluta módulo 24 (mínimo 1h) y el coste escala con la
//! duración, la capacidad del vehículo y la distancia nominal entre
//! pincodes. Un pincode no numérico no es un error: se degrada a la
//! duración de contingencia y se marca la estimación como degradada.

use chrono::Duration;
use rust_decimal::{Decimal, RoundingStrategy};

/// Tarifa base por hora de uso del vehículo.
pub const BASE_RATE_PER_HOUR: i64 = 500;

/// Duración de contingencia cuando algún pincode no parsea como número.
pub const FALLBACK_RIDE_HOURS: i64 = 2;

/// La diferencia de pincodes se pliega sobre un ciclo de 24 horas.
pub const DURATION_CYCLE_HOURS: i64 = 24;

/// Resultado del estimador. `degraded` indica que se aplicó la
/// duración de contingencia por pincodes no numéricos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RideEstimate {
    pub hours: i64,
    pub degraded: bool,
}

impl RideEstimate {
    pub fn duration(&self) -> Duration {
        Duration::hours(self.hours)
    }
}

/// Duración estimada del viaje entre dos pincodes, en horas enteras.
///
/// `max(1, |from - to| mod 24)`: siempre dentro de `1..=23`, nunca
/// cero aunque origen y destino coincidan.
pub fn estimate_ride_duration(from_pincode: &str, to_pincode: &str) -> RideEstimate {
    let parsed = from_pincode
        .trim()
        .parse::<i64>()
        .and_then(|from| to_pincode.trim().parse::<i64>().map(|to| (from, to)));

    match parsed {
        Ok((from, to)) => {
            let diff = (from as i128 - to as i128).unsigned_abs();
            let hours = (diff % DURATION_CYCLE_HOURS as u128) as i64;
            RideEstimate {
                hours: hours.max(1),
                degraded: false,
            }
        }
        Err(_) => RideEstimate {
            hours: FALLBACK_RIDE_HOURS,
            degraded: true,
        },
    }
}

/// Coste total del viaje, redondeado a 2 decimales.
///
/// `500 * horas * max(1, capacidad/1000) * max(1, |to - from| / 100)`.
/// Los factores de capacidad y distancia son cocientes decimales con
/// suelo en 1; el resultado se redondea a 2 decimales (mitades hacia
/// arriba). Con pincodes no numéricos la distancia nominal es 0 y el
/// factor queda en 1.
pub fn estimate_cost(
    from_pincode: &str,
    to_pincode: &str,
    capacity_kg: i32,
    hours: i64,
) -> Decimal {
    let distance_delta: u64 = from_pincode
        .trim()
        .parse::<i64>()
        .and_then(|from| to_pincode.trim().parse::<i64>().map(|to| (from, to)))
        .map(|(from, to)| (from as i128 - to as i128).unsigned_abs() as u64)
        .unwrap_or(0);

    let capacity_factor = (Decimal::from(capacity_kg) / Decimal::from(1000)).max(Decimal::ONE);
    let distance_factor = (Decimal::from(distance_delta) / Decimal::from(100)).max(Decimal::ONE);

    let cost = Decimal::from(BASE_RATE_PER_HOUR)
        * Decimal::from(hours)
        * capacity_factor
        * distance_factor;
    // redondeo y escala fija de 2 decimales para un wire estable ("10000.00")
    let mut cost = cost.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cost.rescale(2);
    cost
}
