//! Line-oriented parser for the `.osu` text format.
//!
//! Only `[General]`, `[Difficulty]`, `[Events]` and `[HitObjects]` are read. Any malformed
//! number or slider definition aborts the load; unknown keys and sections are skipped.

use super::{Beatmap, BeatmapError, Curve, CurveType, Difficulty, General, HitObject};
use super::{HitObjectKind, ObjectParams, Point};
use std::iter::{Enumerate, Peekable};
use std::path::{Path, PathBuf};
use std::str::{FromStr, Lines};

type SectionLines<'a> = Peekable<Enumerate<Lines<'a>>>;

const VERSION_PREFIX: &str = "osu file format v";
const HIT_OBJECT_FIELDS: usize = 4;
const SLIDER_FIELDS: usize = 8;

/// Reads a beatmap from disk, resolving assets against the file's directory.
pub fn parse_file(path: &Path) -> Result<Beatmap, BeatmapError> {
    let bytes = std::fs::read(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse(&bytes, base_dir)
}

/// Parses raw beatmap bytes. `base_dir` is the directory relative asset paths resolve against.
pub fn parse(bytes: &[u8], base_dir: &Path) -> Result<Beatmap, BeatmapError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut map = Beatmap {
        hash: format!("{:x}", md5::compute(bytes)),
        ..Default::default()
    };

    let mut lines = text.lines().enumerate().peekable();
    while let Some((idx, raw)) = lines.next() {
        let line = raw.trim_end();

        if idx == 0 {
            if let Some(version) = line.strip_prefix(VERSION_PREFIX) {
                map.format_version = version.trim().parse().ok();
                continue;
            }
        }

        if line.starts_with("[General]") {
            parse_general(&mut lines, &mut map.general, base_dir)?;
        } else if line.starts_with("[Difficulty]") {
            parse_difficulty(&mut lines, &mut map.difficulty)?;
        } else if line.starts_with("[Events]") {
            if let Some(background) = parse_events(&mut lines, base_dir) {
                map.background_path = Some(background);
            }
        } else if line.starts_with("[HitObjects]") {
            map.hit_objects = parse_hit_objects(&mut lines)?;
        }
    }

    log::info!(
        "PARSER: Loaded beatmap {} ({} hit objects, format {:?})",
        map.hash,
        map.hit_objects.len(),
        map.format_version
    );

    Ok(map)
}

/// Next line of the current section as `(line_number, trimmed_line)`.
///
/// A blank line ends the section and is consumed. A section header ends it too but is left
/// for the caller's outer loop.
fn next_entry<'a>(lines: &mut SectionLines<'a>) -> Option<(usize, &'a str)> {
    let &(_, raw) = lines.peek()?;
    let line = raw.trim();
    if line.is_empty() {
        lines.next();
        return None;
    }
    if line.starts_with('[') {
        return None;
    }
    let (idx, raw) = lines.next()?;
    Some((idx + 1, raw.trim()))
}

fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

fn parse_number<T: FromStr>(line: usize, field: &'static str, value: &str) -> Result<T, BeatmapError> {
    value.parse().map_err(|_| BeatmapError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_general(
    lines: &mut SectionLines<'_>,
    general: &mut General,
    base_dir: &Path,
) -> Result<(), BeatmapError> {
    while let Some((line_no, line)) = next_entry(lines) {
        let Some((key, value)) = key_value(line) else {
            continue;
        };
        match key {
            "AudioFilename" => general.audio_path = base_dir.join(value),
            "AudioLeadIn" => general.audio_lead_in = parse_number(line_no, "AudioLeadIn", value)?,
            "AudioHash" => general.audio_hash = value.to_string(),
            "PreviewTime" => general.preview_time = parse_number(line_no, "PreviewTime", value)?,
            "Countdown" => general.countdown = parse_number(line_no, "Countdown", value)?,
            _ => {}
        }
    }
    Ok(())
}

fn parse_difficulty(
    lines: &mut SectionLines<'_>,
    difficulty: &mut Difficulty,
) -> Result<(), BeatmapError> {
    while let Some((line_no, line)) = next_entry(lines) {
        let Some((key, value)) = key_value(line) else {
            continue;
        };
        let (name, field) = match key {
            "HPDrainRate" => ("HPDrainRate", &mut difficulty.hp_drain_rate),
            "CircleSize" => ("CircleSize", &mut difficulty.circle_size),
            "OverallDifficulty" => ("OverallDifficulty", &mut difficulty.overall_difficulty),
            "ApproachRate" => ("ApproachRate", &mut difficulty.approach_rate),
            "SliderMultiplier" => ("SliderMultiplier", &mut difficulty.slider_multiplier),
            "SliderTickRate" => ("SliderTickRate", &mut difficulty.slider_tick_rate),
            _ => continue,
        };
        *field = parse_number(line_no, name, value)?;
    }
    Ok(())
}

/// Scans `[Events]` for the background declaration (`0,0,"file",...`).
fn parse_events(lines: &mut SectionLines<'_>, base_dir: &Path) -> Option<PathBuf> {
    let mut background = None;
    while let Some((line_no, line)) = next_entry(lines) {
        if line.starts_with("//") {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match (fields.first().copied(), fields.get(1).copied()) {
            (Some("0"), Some("0")) => {
                if let Some(file) = fields.get(2) {
                    let name = file.trim_matches('"').trim();
                    background = Some(base_dir.join(name));
                }
            }
            (Some("Video") | Some("1"), _) => {
                log::debug!("PARSER: line {line_no}: video event not stored");
            }
            (Some("Break") | Some("2"), _) => {
                log::debug!("PARSER: line {line_no}: break event not stored");
            }
            _ => {}
        }
    }
    background
}

fn parse_hit_objects(lines: &mut SectionLines<'_>) -> Result<Vec<HitObject>, BeatmapError> {
    let mut hit_objects = Vec::new();
    while let Some((line_no, line)) = next_entry(lines) {
        if line.starts_with("//") {
            continue;
        }
        hit_objects.push(parse_hit_object(line_no, line)?);
    }
    Ok(hit_objects)
}

fn parse_hit_object(line_no: usize, line: &str) -> Result<HitObject, BeatmapError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < HIT_OBJECT_FIELDS {
        return Err(BeatmapError::MissingField {
            line: line_no,
            expected: HIT_OBJECT_FIELDS,
            found: fields.len(),
        });
    }

    let x = parse_number(line_no, "x", fields[0])?;
    let y = parse_number(line_no, "y", fields[1])?;
    let time = parse_number(line_no, "time", fields[2])?;
    let bits: i32 = parse_number(line_no, "type", fields[3])?;

    let kind = HitObjectKind::from_bits(bits);
    let params = match kind {
        HitObjectKind::Slider => ObjectParams::Curve(parse_slider(line_no, &fields)?),
        HitObjectKind::Circle | HitObjectKind::Spinner => ObjectParams::None,
    };

    Ok(HitObject {
        x,
        y,
        time,
        kind,
        params,
    })
}

/// Reads `curveType|x:y|...`, slides and length from fields 6 to 8.
fn parse_slider(line_no: usize, fields: &[&str]) -> Result<Curve, BeatmapError> {
    if fields.len() < SLIDER_FIELDS {
        return Err(BeatmapError::InvalidCurve {
            line: line_no,
            reason: format!("slider needs {SLIDER_FIELDS} fields, found {}", fields.len()),
        });
    }

    let mut parts = fields[5].split('|');
    let curve_type = parts
        .next()
        .and_then(|head| head.trim().chars().next())
        .map(CurveType::from_char)
        .ok_or_else(|| BeatmapError::InvalidCurve {
            line: line_no,
            reason: "missing curve type".to_string(),
        })?;

    let mut control_points: Vec<Point> = Vec::new();
    for part in parts {
        let coords: Vec<&str> = part.split(':').map(str::trim).collect();
        if coords.len() != 2 {
            break;
        }
        let px = parse_number(line_no, "curve point x", coords[0])?;
        let py = parse_number(line_no, "curve point y", coords[1])?;
        control_points.push((px, py));
    }

    Ok(Curve {
        curve_type,
        control_points,
        slides: parse_number(line_no, "slides", fields[6])?,
        length: parse_number(line_no, "length", fields[7])?,
    })
}
