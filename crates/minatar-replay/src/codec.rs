//! Binary encode/decode for the replay format.
//!
//! All integers are little-endian. Strings are length-prefixed with a
//! `u32` length. Floats are stored as their raw bits.

use std::io::{Read, Write};

use minatar_core::GameKind;

use crate::error::ReplayError;
use crate::types::{Frame, Input, ReplayHeader, INPUT_ACT, INPUT_RESET};
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ReplayError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i32.
pub fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian f64.
pub fn write_f64_le(w: &mut dyn Write, v: f64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a boolean as a `0`/`1` byte.
pub fn write_bool(w: &mut dyn Write, v: bool) -> Result<(), ReplayError> {
    write_u8(w, u8::from(v))
}

/// Write a length-prefixed UTF-8 string (u32 length + bytes).
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), ReplayError> {
    let len = u32::try_from(s.len()).map_err(|_| ReplayError::MalformedFrame {
        detail: format!("string of {} bytes is too long to encode", s.len()),
    })?;
    write_u32_le(w, len)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, ReplayError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a little-endian f64.
pub fn read_f64_le(r: &mut dyn Read) -> Result<f64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

/// Read a `0`/`1` byte. Any other value is malformed.
pub fn read_bool(r: &mut dyn Read, what: &str) -> Result<bool, ReplayError> {
    match read_u8(r)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ReplayError::MalformedFrame {
            detail: format!("invalid {what} flag {other}"),
        }),
    }
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, ReplayError> {
    let len = read_u32_le(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| ReplayError::MalformedFrame {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the replay file header (magic, version, header fields).
pub fn encode_header(w: &mut dyn Write, header: &ReplayHeader) -> Result<(), ReplayError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    write_length_prefixed_str(w, &header.minatar_version)?;
    write_u8(w, header.game.tag())?;
    write_u64_le(w, header.seed)?;
    write_f64_le(w, header.sticky_action_prob)?;
    write_bool(w, header.difficulty_ramping)?;
    for &d in &header.obs_shape {
        write_u32_le(w, d)?;
    }
    Ok(())
}

/// Decode and validate the replay file header.
pub fn decode_header(r: &mut dyn Read) -> Result<ReplayHeader, ReplayError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReplayError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: version });
    }

    let minatar_version = read_length_prefixed_str(r)?;
    let tag = read_u8(r)?;
    let game = GameKind::from_tag(tag).ok_or(ReplayError::UnknownGame { tag })?;
    let seed = read_u64_le(r)?;
    let sticky_action_prob = read_f64_le(r)?;
    let difficulty_ramping = read_bool(r, "difficulty_ramping")?;
    let obs_shape = [read_u32_le(r)?, read_u32_le(r)?, read_u32_le(r)?];

    Ok(ReplayHeader {
        minatar_version,
        game,
        seed,
        sticky_action_prob,
        difficulty_ramping,
        obs_shape,
    })
}

// ── Frame encode/decode ─────────────────────────────────────────

/// Encode a single replay frame.
pub fn encode_frame(w: &mut dyn Write, frame: &Frame) -> Result<(), ReplayError> {
    write_u64_le(w, frame.step)?;
    match frame.input {
        Input::Act(code) => {
            write_u8(w, INPUT_ACT)?;
            write_i32_le(w, code)?;
        }
        Input::Reset => {
            write_u8(w, INPUT_RESET)?;
            write_i32_le(w, 0)?;
        }
    }
    write_f64_le(w, frame.reward)?;
    write_bool(w, frame.terminal)?;
    write_u64_le(w, frame.obs_hash)?;
    Ok(())
}

/// Decode a single replay frame.
///
/// Returns `Ok(None)` on clean EOF (no bytes available), `Ok(Some(frame))`
/// on success, or an error on truncated/corrupt data.
pub fn decode_frame(r: &mut dyn Read) -> Result<Option<Frame>, ReplayError> {
    // Read the step header by hand to tell clean EOF (zero bytes) from
    // truncation (1-7 bytes).
    let mut step_buf = [0u8; 8];
    let mut filled = 0;
    while filled < 8 {
        match r.read(&mut step_buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(ReplayError::MalformedFrame {
                    detail: format!("truncated frame header: got {filled} of 8 bytes for step"),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReplayError::Io(e)),
        }
    }
    let step = u64::from_le_bytes(step_buf);

    let tag = read_u8(r)?;
    let code = read_i32_le(r)?;
    let input = match tag {
        INPUT_ACT => Input::Act(code),
        INPUT_RESET => Input::Reset,
        other => {
            return Err(ReplayError::MalformedFrame {
                detail: format!("unknown input tag {other} at step {step}"),
            })
        }
    };
    let reward = read_f64_le(r)?;
    let terminal = read_bool(r, "terminal")?;
    let obs_hash = read_u64_le(r)?;

    Ok(Some(Frame {
        step,
        input,
        reward,
        terminal,
        obs_hash,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn header() -> ReplayHeader {
        ReplayHeader {
            minatar_version: "0.1.0".into(),
            game: GameKind::Seaquest,
            seed: 0xDEAD_BEEF,
            sticky_action_prob: 0.1,
            difficulty_ramping: true,
            obs_shape: [10, 10, 10],
        }
    }

    proptest! {
        #[test]
        fn roundtrip_i32(v in any::<i32>()) {
            let mut buf = Vec::new();
            write_i32_le(&mut buf, v).unwrap();
            prop_assert_eq!(read_i32_le(&mut buf.as_slice()).unwrap(), v);
        }

        #[test]
        fn roundtrip_f64_bits(bits in any::<u64>()) {
            let mut buf = Vec::new();
            write_f64_le(&mut buf, f64::from_bits(bits)).unwrap();
            let back = read_f64_le(&mut buf.as_slice()).unwrap();
            prop_assert_eq!(back.to_bits(), bits);
        }

        #[test]
        fn roundtrip_string(s in "[a-zA-Z0-9_.]{0,64}") {
            let mut buf = Vec::new();
            write_length_prefixed_str(&mut buf, &s).unwrap();
            prop_assert_eq!(read_length_prefixed_str(&mut buf.as_slice()).unwrap(), s);
        }
    }

    #[test]
    fn roundtrip_header() {
        let h = header();
        let mut buf = Vec::new();
        encode_header(&mut buf, &h).unwrap();
        assert_eq!(&buf[..4], b"MNTR");
        assert_eq!(decode_header(&mut buf.as_slice()).unwrap(), h);
    }

    #[test]
    fn bad_magic_rejected() {
        let data = b"MURK\x01";
        let r = decode_header(&mut data.as_slice());
        assert!(matches!(r, Err(ReplayError::InvalidMagic)));
    }

    #[test]
    fn bad_version_rejected() {
        let mut buf = Vec::new();
        encode_header(&mut buf, &header()).unwrap();
        buf[4] = 99;
        let r = decode_header(&mut buf.as_slice());
        assert!(matches!(r, Err(ReplayError::UnsupportedVersion { found: 99 })));
    }

    #[test]
    fn unknown_game_tag_rejected() {
        let mut buf = Vec::new();
        encode_header(&mut buf, &header()).unwrap();
        // magic + version + (u32 len + "0.1.0")
        let tag_at = 4 + 1 + 4 + 5;
        buf[tag_at] = 17;
        let r = decode_header(&mut buf.as_slice());
        assert!(matches!(r, Err(ReplayError::UnknownGame { tag: 17 })));
    }

    #[test]
    fn roundtrip_frames() {
        let frames = [
            Frame {
                step: 0,
                input: Input::Reset,
                reward: 0.0,
                terminal: false,
                obs_hash: 1,
            },
            Frame {
                step: 1,
                input: Input::Act(-1),
                reward: -1.0,
                terminal: false,
                obs_hash: 2,
            },
            Frame {
                step: 2,
                input: Input::Act(5),
                reward: 0.35,
                terminal: true,
                obs_hash: u64::MAX,
            },
        ];
        let mut buf = Vec::new();
        for f in &frames {
            encode_frame(&mut buf, f).unwrap();
        }
        let mut r = buf.as_slice();
        for f in &frames {
            assert_eq!(decode_frame(&mut r).unwrap().as_ref(), Some(f));
        }
        assert!(decode_frame(&mut r).unwrap().is_none());
    }

    #[test]
    fn eof_returns_none() {
        let empty: &[u8] = &[];
        assert!(decode_frame(&mut &*empty).unwrap().is_none());
    }

    #[test]
    fn partial_step_header_is_error_not_eof() {
        let data: &[u8] = &[1, 2, 3];
        let r = decode_frame(&mut &*data);
        assert!(matches!(r, Err(ReplayError::MalformedFrame { .. })));
    }

    #[test]
    fn complete_step_but_truncated_body_is_error() {
        let mut buf = Vec::new();
        encode_frame(
            &mut buf,
            &Frame {
                step: 9,
                input: Input::Act(1),
                reward: 0.0,
                terminal: false,
                obs_hash: 0,
            },
        )
        .unwrap();
        buf.truncate(12);
        assert!(decode_frame(&mut buf.as_slice()).is_err());
    }

    #[test]
    fn invalid_terminal_flag_rejected() {
        let mut buf = Vec::new();
        encode_frame(
            &mut buf,
            &Frame {
                step: 0,
                input: Input::Act(0),
                reward: 0.0,
                terminal: false,
                obs_hash: 0,
            },
        )
        .unwrap();
        // step(8) + tag(1) + action(4) + reward(8)
        buf[21] = 2;
        let r = decode_frame(&mut buf.as_slice());
        assert!(matches!(r, Err(ReplayError::MalformedFrame { .. })));
    }
}
