use std::{ffi::OsStr, fs::File, io::ErrorKind, path::Path};

use symphonia::core::{
    codecs::DecoderOptions,
    errors::Error as SymphoniaError,
    formats::FormatOptions,
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};
use tokio::task::spawn_blocking;
use tracing::{Level, instrument, trace};

use crate::error::DurationError;

/// Mide la duración (en segundos) abriendo el fichero con un decodificador.
///
/// Cada llamada tiene su propio fichero y decodificador; ambos se liberan al
/// terminar, tanto si hay éxito como si no. No hay timeout.
#[instrument(level = Level::DEBUG)]
pub async fn resolve_duration(path: &Path) -> Result<f64, DurationError> {
    let owned = path.to_path_buf();
    spawn_blocking(move || measure_duration(&owned))
        .await
        .map_err(|_| DurationError::Join {
            path: path.to_path_buf(),
        })?
}

/// Versión bloqueante de [`resolve_duration`].
pub fn measure_duration(path: &Path) -> Result<f64, DurationError> {
    let decoder_err = |e: SymphoniaError| DurationError::decoder(path.to_path_buf(), e);

    let file = File::open(path).map_err(|source| DurationError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(decoder_err)?;
    let mut format = probed.format;

    let track = format.default_track().ok_or_else(|| DurationError::NoTrack {
        path: path.to_path_buf(),
    })?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    // El contenedor ya anuncia el número de frames: no hace falta decodificar
    if let (Some(time_base), Some(n_frames)) = (params.time_base, params.n_frames) {
        let time = time_base.calc_time(n_frames);
        return Ok(time.seconds as f64 + time.frac);
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(decoder_err)?;

    let mut frames: u64 = 0;
    let mut sample_rate = params.sample_rate;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(decoder_err(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(buf) => {
                frames += buf.frames() as u64;
                sample_rate.get_or_insert(buf.spec().rate);
            }
            Err(SymphoniaError::DecodeError(e)) => {
                trace!(path = %path.display(), error = e, "skipping undecodable packet");
            }
            Err(e) => return Err(decoder_err(e)),
        }
    }

    match sample_rate {
        Some(rate) if rate > 0 => Ok(frames as f64 / f64::from(rate)),
        _ => Err(DurationError::NoTrack {
            path: path.to_path_buf(),
        }),
    }
}
