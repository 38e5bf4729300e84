// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSI parameter parsing and the canonical CSI action table.

use crate::error::ParserFailures;
use vt_core_common::modes::SetMode;
use vt_core_common::sgr::{SgrAttribute, base_attribute_from_param};

const MAX_PRIMARY_ARGS: usize = 32;
const MAX_SUBARGS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateMarker {
    None,
    Question,
    Greater,
    Equal,
    Bang,
}

/// One primary CSI argument, optionally carrying `:`-delimited subargs
/// (as used by SGR's extended colour forms and the underline-style
/// subparameter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsiArg {
    pub value: usize,
    pub subargs: Vec<usize>,
}

impl CsiArg {
    const fn plain(value: usize) -> Self {
        Self {
            value,
            subargs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsiParams {
    pub private: PrivateMarker,
    pub args: Vec<CsiArg>,
    pub intermediates: Vec<u8>,
}

impl CsiParams {
    #[must_use]
    pub fn get(&self, idx: usize) -> usize {
        self.args.get(idx).map_or(0, |a| a.value)
    }

    #[must_use]
    pub fn get_or(&self, idx: usize, default: usize) -> usize {
        match self.args.get(idx) {
            Some(a) if a.value != 0 => a.value,
            _ => default,
        }
    }

    /// `max(1, N)` per the CUU/CUD/CUF/CUB/CNL/CPL family's semantics.
    #[must_use]
    pub fn count_or_one(&self, idx: usize) -> usize {
        self.get(idx).max(1)
    }
}

fn parse_params(raw: &[u8]) -> Result<CsiParams, ParserFailures> {
    let mut private = PrivateMarker::None;
    let mut rest = raw;
    if let Some(&first) = raw.first() {
        private = match first {
            b'?' => PrivateMarker::Question,
            b'>' => PrivateMarker::Greater,
            b'=' => PrivateMarker::Equal,
            b'!' => PrivateMarker::Bang,
            _ => PrivateMarker::None,
        };
        if private != PrivateMarker::None {
            rest = &raw[1..];
        }
    }

    let intermediate_start = rest
        .iter()
        .position(|b| (0x20..=0x2F).contains(b))
        .unwrap_or(rest.len());
    let (param_bytes, intermediate_bytes) = rest.split_at(intermediate_start);

    let mut args = Vec::new();
    if !param_bytes.is_empty() {
        for group in param_bytes.split(|b| *b == b';') {
            if args.len() >= MAX_PRIMARY_ARGS {
                break;
            }
            let mut parts = group.split(|b| *b == b':');
            let value = parse_one(parts.next().unwrap_or(&[]))?;
            let mut subargs = Vec::new();
            for sub in parts {
                if subargs.len() >= MAX_SUBARGS {
                    break;
                }
                subargs.push(parse_one(sub)?);
            }
            args.push(CsiArg { value, subargs });
        }
    }

    Ok(CsiParams {
        private,
        args,
        intermediates: intermediate_bytes.to_vec(),
    })
}

fn parse_one(bytes: &[u8]) -> Result<usize, ParserFailures> {
    if bytes.is_empty() {
        return Ok(0);
    }
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ParserFailures::InvalidCsiParam(String::from_utf8_lossy(bytes).into_owned()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    ToEnd,
    ToStart,
    All,
    AllAndScrollback,
}

impl EraseMode {
    const fn from_param(p: usize) -> Self {
        match p {
            1 => Self::ToStart,
            2 => Self::All,
            3 => Self::AllAndScrollback,
            _ => Self::ToEnd,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsiAction {
    InsertBlanks(usize),
    CursorUp(usize),
    CursorDown(usize),
    CursorForward(usize),
    CursorBack(usize),
    CursorNextLine(usize),
    CursorPrevLine(usize),
    CursorToColumn(usize),
    CursorPosition { row: usize, col: usize },
    TabForward(usize),
    TabBack(usize),
    EraseDisplay(EraseMode),
    EraseLine(EraseMode),
    InsertLines(usize),
    DeleteLines(usize),
    DeleteChars(usize),
    ScrollUp(usize),
    ScrollDown(usize),
    EraseChars(usize),
    RepeatLastPrintable(usize),
    PrimaryDeviceAttributes,
    SecondaryDeviceAttributes,
    VerticalPositionAbsolute(usize),
    SetMode { private: bool, mode: usize, action: SetMode },
    MediaCopy(usize),
    Sgr(Vec<SgrAttribute>),
    DeviceStatusReport(usize),
    CursorVisualStyle(usize),
    ScrollRegion { top: usize, bottom: usize },
    SaveCursor,
    RestoreCursor,
}

/// Parse and dispatch a complete CSI sequence given its raw parameter
/// bytes (everything between `CSI` and the final byte) and the final
/// byte itself.
pub fn parse(raw: &[u8], final_byte: u8) -> Result<CsiAction, ParserFailures> {
    let params = parse_params(raw)?;

    Ok(match final_byte {
        b'@' => CsiAction::InsertBlanks(params.count_or_one(0)),
        b'A' => CsiAction::CursorUp(params.count_or_one(0)),
        b'B' => CsiAction::CursorDown(params.count_or_one(0)),
        b'C' => CsiAction::CursorForward(params.count_or_one(0)),
        b'D' => CsiAction::CursorBack(params.count_or_one(0)),
        b'E' => CsiAction::CursorNextLine(params.count_or_one(0)),
        b'F' => CsiAction::CursorPrevLine(params.count_or_one(0)),
        b'G' | b'`' => CsiAction::CursorToColumn(params.count_or_one(0).saturating_sub(1)),
        b'H' | b'f' => CsiAction::CursorPosition {
            row: params.count_or_one(0).saturating_sub(1),
            col: params.count_or_one(1).saturating_sub(1),
        },
        b'I' => CsiAction::TabForward(params.count_or_one(0)),
        b'Z' => CsiAction::TabBack(params.count_or_one(0)),
        b'J' => CsiAction::EraseDisplay(EraseMode::from_param(params.get(0))),
        b'K' => CsiAction::EraseLine(EraseMode::from_param(params.get(0))),
        b'L' => CsiAction::InsertLines(params.count_or_one(0)),
        b'M' => CsiAction::DeleteLines(params.count_or_one(0)),
        b'P' => CsiAction::DeleteChars(params.count_or_one(0)),
        b'S' => CsiAction::ScrollUp(params.count_or_one(0)),
        b'T' => CsiAction::ScrollDown(params.count_or_one(0)),
        b'X' => CsiAction::EraseChars(params.count_or_one(0)),
        b'b' => CsiAction::RepeatLastPrintable(params.count_or_one(0)),
        b'c' => {
            if params.private == PrivateMarker::Greater {
                CsiAction::SecondaryDeviceAttributes
            } else {
                CsiAction::PrimaryDeviceAttributes
            }
        }
        b'd' => CsiAction::VerticalPositionAbsolute(params.count_or_one(0).saturating_sub(1)),
        b'h' | b'l' => CsiAction::SetMode {
            private: params.private == PrivateMarker::Question,
            mode: params.get(0),
            action: if final_byte == b'h' {
                SetMode::Set
            } else {
                SetMode::Reset
            },
        },
        b'i' => CsiAction::MediaCopy(params.get(0)),
        b'm' => CsiAction::Sgr(parse_sgr(&params)),
        b'n' => CsiAction::DeviceStatusReport(params.get(0)),
        b'q' if params.intermediates == b" " => CsiAction::CursorVisualStyle(params.get(0)),
        b'r' => CsiAction::ScrollRegion {
            top: params.get_or(0, 1),
            bottom: params.get_or(1, 0),
        },
        b's' => CsiAction::SaveCursor,
        b'u' => CsiAction::RestoreCursor,
        _ => return Err(ParserFailures::InvalidCsiParam(format!("final byte {final_byte:#04x}"))),
    })
}

fn parse_sgr(params: &CsiParams) -> Vec<SgrAttribute> {
    if params.args.is_empty() {
        return vec![SgrAttribute::Reset];
    }

    let mut attrs = Vec::new();
    let mut i = 0;
    while i < params.args.len() {
        let arg = &params.args[i];
        match arg.value {
            38 | 48 | 58 => {
                let (attr, consumed) = parse_extended_color(arg.value, &params.args[i..]);
                if let Some(attr) = attr {
                    attrs.push(attr);
                }
                i += consumed;
            }
            4 => {
                if let Some(&sub) = arg.subargs.first() {
                    attrs.push(SgrAttribute::Underline(
                        vt_core_common::sgr::UnderlineStyle::from_subparam(sub),
                    ));
                } else {
                    attrs.push(base_attribute_from_param(4));
                }
                i += 1;
            }
            p => {
                attrs.push(base_attribute_from_param(p));
                i += 1;
            }
        }
    }
    attrs
}

/// Parses `38`/`48`/`58 ; 5 ; idx` or `38/48/58 ; 2 ; r ; g ; b`, either
/// as colon-delimited subargs of one primary or as following primaries.
/// Returns the action and how many primary args were consumed.
fn parse_extended_color(which: usize, args: &[CsiArg]) -> (Option<SgrAttribute>, usize) {
    use vt_core_common::colors::ColorKey;

    let values: Vec<usize> = if !args[0].subargs.is_empty() {
        std::iter::once(args[0].value)
            .chain(args[0].subargs.iter().copied())
            .collect()
    } else {
        args.iter().take(5).map(|a| a.value).collect()
    };
    let consumed_primaries = if args[0].subargs.is_empty() {
        match values.get(1) {
            Some(5) => 3.min(args.len()),
            Some(2) => 5.min(args.len()),
            _ => 1,
        }
    } else {
        1
    };

    let key = match values.get(1) {
        Some(5) => values.get(2).map(|&idx| ColorKey::index(idx as u32)),
        Some(2) => {
            #[allow(clippy::cast_possible_truncation)]
            match (values.get(2), values.get(3), values.get(4)) {
                (Some(&r), Some(&g), Some(&b)) => {
                    Some(ColorKey::rgb(r as u8, g as u8, b as u8))
                }
                _ => None,
            }
        }
        _ => None,
    };

    let Some(key) = key else {
        return (None, consumed_primaries);
    };

    let attr = match which {
        38 => SgrAttribute::Foreground(key),
        48 => SgrAttribute::Background(key),
        _ => SgrAttribute::UnderlineColor(key),
    };
    (Some(attr), consumed_primaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuu_defaults_to_one_when_param_missing() {
        assert_eq!(parse(b"", b'A').unwrap(), CsiAction::CursorUp(1));
    }

    #[test]
    fn cup_is_zero_based_row_and_col() {
        assert_eq!(
            parse(b"11;6", b'H').unwrap(),
            CsiAction::CursorPosition { row: 10, col: 5 }
        );
    }

    #[test]
    fn sm_with_private_marker_sets_question_flag() {
        assert_eq!(
            parse(b"?25", b'h').unwrap(),
            CsiAction::SetMode {
                private: true,
                mode: 25,
                action: SetMode::Set
            }
        );
    }

    #[test]
    fn empty_sgr_is_reset() {
        assert_eq!(parse(b"", b'm').unwrap(), CsiAction::Sgr(vec![SgrAttribute::Reset]));
    }

    #[test]
    fn sgr_extended_fg_index_form() {
        let actions = parse(b"38;5;200", b'm').unwrap();
        assert!(matches!(actions, CsiAction::Sgr(v) if v.len() == 1));
    }

    #[test]
    fn sgr_extended_fg_rgb_form() {
        let CsiAction::Sgr(v) = parse(b"38;2;10;20;30", b'm').unwrap() else {
            panic!("expected sgr");
        };
        assert_eq!(v.len(), 1);
        if let SgrAttribute::Foreground(key) = v[0] {
            assert_eq!(key.as_rgb(), Some((10, 20, 30)));
        } else {
            panic!("expected Foreground");
        }
    }

    #[test]
    fn dsr_cursor_position_report_param_is_six() {
        assert_eq!(parse(b"6", b'n').unwrap(), CsiAction::DeviceStatusReport(6));
    }

    #[test]
    fn invalid_csi_param_is_rejected() {
        assert!(parse(b"ab", b'A').is_err());
    }
}
