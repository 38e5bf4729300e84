// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operating System Command payload parsing: window title, palette
//! queries/sets, and clipboard IO.

use crate::error::ParserFailures;
use vt_core_common::colors::ColorKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OscTarget {
    ForegroundDefault,
    BackgroundDefault,
    CursorColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OscAction {
    SetIconNameAndTitle(String),
    SetIconName(String),
    SetWindowTitle(String),
    SetPaletteColor { index: usize, color: ColorKey },
    SetDynamicColor { target: OscTarget, color: ColorKey },
    QueryDynamicColor(OscTarget),
    ResetPaletteColor(Option<usize>),
    ClipboardWrite { selection: String, base64: String },
    ClipboardQuery { selection: String },
}

/// Parse a complete OSC payload (the bytes between `OSC`/`ESC ]` and its
/// terminator, not including the terminator itself).
pub fn parse(bytes: &[u8]) -> Result<OscAction, ParserFailures> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| ParserFailures::MalformedOsc("payload is not valid UTF-8".into()))?;

    let (code, rest) = text
        .split_once(';')
        .ok_or_else(|| ParserFailures::MalformedOsc(text.to_string()))?;
    let code: u32 = code
        .parse()
        .map_err(|_| ParserFailures::MalformedOsc(format!("non-numeric OSC code: {code}")))?;

    match code {
        0 => Ok(OscAction::SetIconNameAndTitle(rest.to_string())),
        1 => Ok(OscAction::SetIconName(rest.to_string())),
        2 => Ok(OscAction::SetWindowTitle(rest.to_string())),
        4 => parse_palette_set(rest),
        10 => parse_dynamic_color(OscTarget::ForegroundDefault, rest),
        11 => parse_dynamic_color(OscTarget::BackgroundDefault, rest),
        12 => parse_dynamic_color(OscTarget::CursorColor, rest),
        52 => parse_clipboard(rest),
        104 => Ok(OscAction::ResetPaletteColor(
            rest.split(';').next().and_then(|s| s.parse().ok()),
        )),
        other => Err(ParserFailures::MalformedOsc(format!("unhandled OSC {other}"))),
    }
}

fn parse_palette_set(rest: &str) -> Result<OscAction, ParserFailures> {
    let (index, spec) = rest
        .split_once(';')
        .ok_or_else(|| ParserFailures::MalformedOsc(rest.to_string()))?;
    let index: usize = index
        .parse()
        .map_err(|_| ParserFailures::MalformedOsc(format!("bad palette index: {index}")))?;
    let color = parse_color_spec(spec)?;
    Ok(OscAction::SetPaletteColor { index, color })
}

fn parse_dynamic_color(target: OscTarget, rest: &str) -> Result<OscAction, ParserFailures> {
    if rest == "?" {
        return Ok(OscAction::QueryDynamicColor(target));
    }
    let color = parse_color_spec(rest)?;
    Ok(OscAction::SetDynamicColor { target, color })
}

/// Accepts `rgb:RR/GG/BB`, `#RRGGBB`, or a bare palette index.
fn parse_color_spec(spec: &str) -> Result<ColorKey, ParserFailures> {
    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hex_rgb(hex, spec);
    }
    if let Some(body) = spec.strip_prefix("rgb:") {
        let mut channels = body.split('/');
        let (Some(r), Some(g), Some(b), None) =
            (channels.next(), channels.next(), channels.next(), channels.next())
        else {
            return Err(ParserFailures::MalformedOsc(spec.to_string()));
        };
        let r = parse_channel(r, spec)?;
        let g = parse_channel(g, spec)?;
        let b = parse_channel(b, spec)?;
        return Ok(ColorKey::rgb(r, g, b));
    }
    spec.parse::<u32>()
        .map(ColorKey::index)
        .map_err(|_| ParserFailures::MalformedOsc(spec.to_string()))
}

fn parse_hex_rgb(hex: &str, original: &str) -> Result<ColorKey, ParserFailures> {
    if hex.len() != 6 {
        return Err(ParserFailures::MalformedOsc(original.to_string()));
    }
    let r = u8::from_str_radix(&hex[0..2], 16);
    let g = u8::from_str_radix(&hex[2..4], 16);
    let b = u8::from_str_radix(&hex[4..6], 16);
    match (r, g, b) {
        (Ok(r), Ok(g), Ok(b)) => Ok(ColorKey::rgb(r, g, b)),
        _ => Err(ParserFailures::MalformedOsc(original.to_string())),
    }
}

/// A `rgb:` channel may carry 1-4 hex digits; only the high byte is kept.
fn parse_channel(digits: &str, original: &str) -> Result<u8, ParserFailures> {
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| ParserFailures::MalformedOsc(original.to_string()))?;
    let bits = digits.len() * 4;
    Ok(if bits > 8 {
        (value >> (bits - 8)) as u8
    } else {
        (value << (8 - bits)) as u8
    })
}

fn parse_clipboard(rest: &str) -> Result<OscAction, ParserFailures> {
    let (selection, payload) = rest
        .split_once(';')
        .ok_or_else(|| ParserFailures::MalformedOsc(rest.to_string()))?;
    if payload == "?" {
        return Ok(OscAction::ClipboardQuery {
            selection: selection.to_string(),
        });
    }
    Ok(OscAction::ClipboardWrite {
        selection: selection.to_string(),
        base64: payload.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_title_is_passed_through() {
        assert_eq!(
            parse(b"2;my title").unwrap(),
            OscAction::SetWindowTitle("my title".to_string())
        );
    }

    #[test]
    fn palette_set_parses_rgb_colon_form() {
        let OscAction::SetPaletteColor { index, color } = parse(b"4;17;rgb:ff/80/00").unwrap()
        else {
            panic!("expected palette set");
        };
        assert_eq!(index, 17);
        assert_eq!(color.as_rgb(), Some((0xFF, 0x80, 0x00)));
    }

    #[test]
    fn palette_set_parses_hex_form() {
        let OscAction::SetPaletteColor { color, .. } = parse(b"4;0;#112233").unwrap() else {
            panic!("expected palette set");
        };
        assert_eq!(color.as_rgb(), Some((0x11, 0x22, 0x33)));
    }

    #[test]
    fn query_dynamic_color_is_recognized() {
        assert_eq!(
            parse(b"10;?").unwrap(),
            OscAction::QueryDynamicColor(OscTarget::ForegroundDefault)
        );
    }

    #[test]
    fn clipboard_query_vs_write() {
        assert_eq!(
            parse(b"52;c;?").unwrap(),
            OscAction::ClipboardQuery {
                selection: "c".to_string()
            }
        );
        assert_eq!(
            parse(b"52;c;aGVsbG8=").unwrap(),
            OscAction::ClipboardWrite {
                selection: "c".to_string(),
                base64: "aGVsbG8=".to_string()
            }
        );
    }

    #[test]
    fn reset_palette_color_with_and_without_index() {
        assert_eq!(parse(b"104;5").unwrap(), OscAction::ResetPaletteColor(Some(5)));
        assert_eq!(parse(b"104;").unwrap(), OscAction::ResetPaletteColor(None));
    }

    #[test]
    fn non_numeric_code_is_malformed() {
        assert!(parse(b"x;y").is_err());
    }
}
