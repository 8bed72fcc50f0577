//! Ficheros de audio mínimos generados en memoria para los tests.

/// Etiqueta ID3v2.3 con los frames dados (`id`, cuerpo).
pub fn id3v2(frames: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (id, data) in frames {
        assert_eq!(id.len(), 4, "frame ids have four characters");
        body.extend_from_slice(id.as_bytes());
        body.extend_from_slice(&(data.len() as u32).to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(data);
    }

    let size = body.len() as u32;
    let mut tag = vec![b'I', b'D', b'3', 3, 0, 0];
    // tamaño syncsafe: 7 bits por byte
    tag.extend_from_slice(&[
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]);
    tag.extend(body);
    tag
}

/// Cuerpo de un frame de texto en ISO-8859-1.
pub fn text_frame(text: &str) -> Vec<u8> {
    let mut data = vec![0];
    data.extend_from_slice(text.as_bytes());
    data
}

/// Cuerpo de un frame APIC de portada frontal sin descripción.
pub fn apic_frame(mime: &str, image: &[u8]) -> Vec<u8> {
    let mut data = vec![0];
    data.extend_from_slice(mime.as_bytes());
    data.push(0);
    data.push(0x03);
    data.push(0);
    data.extend_from_slice(image);
    data
}

/// `count` frames MPEG-1 Layer III a 128 kbps / 44.1 kHz (417 bytes cada uno).
pub fn mpeg_frames(count: usize) -> Vec<u8> {
    const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
    const FRAME_LEN: usize = 417;

    let mut out = Vec::with_capacity(count * FRAME_LEN);
    for _ in 0..count {
        out.extend_from_slice(&HEADER);
        out.resize(out.len() + FRAME_LEN - HEADER.len(), 0);
    }
    out
}

/// WAV PCM de 16 bits mono lleno de silencio.
pub fn wav_pcm(sample_rate: u32, seconds: u32) -> Vec<u8> {
    let channels: u16 = 1;
    let bits: u16 = 16;
    let block_align = channels * bits / 8;
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = byte_rate * seconds;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(out.len() + data_len as usize, 0);
    out
}
