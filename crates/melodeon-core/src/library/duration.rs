use std::time::Duration;

/// Reloj usado cuando no se pudo determinar la duración por ningún método.
pub const UNKNOWN_DURATION: &str = "00:00";

/// Convierte segundos a `mm:ss`, o `hh:mm:ss` cuando hay horas.
///
/// `None` devuelve `"00:00"`. Los segundos se truncan; entradas negativas o
/// no finitas cuentan como cero.
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return UNKNOWN_DURATION.to_string();
    };

    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{}:{}", pad(hours), pad(minutes), pad(secs))
    } else {
        format!("{}:{}", pad(minutes), pad(secs))
    }
}

pub fn format_duration_secs(duration: Duration) -> String {
    format_duration(Some(duration.as_secs_f64()))
}

fn pad(n: u64) -> String {
    if n < 10 { format!("0{n}") } else { n.to_string() }
}
