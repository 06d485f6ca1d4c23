//! Loaders of the coordinate and animation tables used by the command line player.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{anyhow, Context};
use smart_leds::{SmartLedsWrite, RGB8};
use xmaslights_app::PlaybackConfig;

/// Rows of a comma separated table with their one-based line numbers.
///
/// Empty lines are skipped, as well as the first row when it doesn't start with a number.
fn table_rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .enumerate()
        .filter(|(row, (_, line))| {
            let is_header = line
                .split(',')
                .next()
                .is_some_and(|cell| cell.trim().parse::<f64>().is_err());
            *row > 0 || !is_header
        })
        .map(|(_, (line_no, line))| (line_no, line.split(',').map(str::trim).collect()))
}

fn parse_cell(cell: &str, line_no: usize) -> anyhow::Result<f64> {
    cell.parse()
        .with_context(|| format!("Unable to parse value {cell:?} at line {line_no}"))
}

/// Parses unit coordinates, the last three columns of each row are used.
pub fn parse_coordinates(text: &str) -> anyhow::Result<Vec<(f64, f64, f64)>> {
    table_rows(text)
        .map(|(line_no, cells)| {
            let [a, b, c] = cells
                .get(cells.len().saturating_sub(3)..)
                .and_then(|tail| <[&str; 3]>::try_from(tail).ok())
                .ok_or_else(|| anyhow!("Expected three coordinates at line {line_no}"))?;
            Ok((
                parse_cell(a, line_no)?,
                parse_cell(b, line_no)?,
                parse_cell(c, line_no)?,
            ))
        })
        .collect()
}

/// Parses animation frames, one frame per row.
///
/// The first column holds the frame id and is dropped. The remaining channel values are
/// scaled by the `brightness` factor and clamped to a byte.
pub fn parse_frames(text: &str, brightness: f32) -> anyhow::Result<Vec<Vec<u8>>> {
    let factor = f64::from(brightness);
    table_rows(text)
        .map(|(line_no, cells)| {
            cells
                .iter()
                .skip(1)
                .map(|cell| {
                    let value = parse_cell(cell, line_no)? * factor;
                    Ok(value.clamp(0.0, 255.0) as u8)
                })
                .collect()
        })
        .collect()
}

pub fn load_coordinates(path: &Path) -> anyhow::Result<Vec<(f64, f64, f64)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Unable to read coordinates from {path:?}"))?;
    parse_coordinates(&text).with_context(|| format!("Malformed coordinates file {path:?}"))
}

pub fn load_frames(path: &Path, brightness: f32) -> anyhow::Result<Vec<Vec<u8>>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Unable to read frames from {path:?}"))?;
    parse_frames(&text, brightness).with_context(|| format!("Malformed frames file {path:?}"))
}

pub fn load_config(path: &Path) -> anyhow::Result<PlaybackConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Unable to read config from {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("Malformed config file {path:?}"))
}

/// Terminal strip which prints every written frame as a row of true color cells.
#[derive(Debug)]
pub struct TerminalStrip<W> {
    out: W,
}

impl<W: Write> TerminalStrip<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SmartLedsWrite for TerminalStrip<W> {
    type Error = io::Error;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: Iterator<Item = I>,
        I: Into<Self::Color>,
    {
        for color in iterator {
            let RGB8 { r, g, b } = color.into();
            write!(self.out, "\x1b[38;2;{r};{g};{b}m\u{25cf}")?;
        }
        writeln!(self.out, "\x1b[0m")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_with_header() {
        let text = "id,x,y,z\n0,0.5,-1,2\n\n1,1.5,0,2.25\n";
        let coords = parse_coordinates(text).unwrap();
        assert_eq!(coords, vec![(0.5, -1.0, 2.0), (1.5, 0.0, 2.25)]);
    }

    #[test]
    fn test_coordinates_without_header() {
        let coords = parse_coordinates("1,2,3\n4,5,6").unwrap();
        assert_eq!(coords, vec![(1.0, 2.0, 3.0), (4.0, 5.0, 6.0)]);
    }

    #[test]
    fn test_coordinates_short_row() {
        let err = parse_coordinates("1,2,3\n4,5\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_frames_scaled_and_clamped() {
        let text = "FRAME_ID,R_0,G_0,B_0\n0,100,200,10.7\n1,-5,0,255\n";
        let frames = parse_frames(text, 1.5).unwrap();
        assert_eq!(frames, vec![vec![150, 255, 16], vec![0, 0, 255]]);
    }

    #[test]
    fn test_frames_bad_value() {
        let err = parse_frames("0,1,x,3\n", 1.0).unwrap_err();
        assert!(err.to_string().contains("line 1"), "{err}");
    }

    #[test]
    fn test_terminal_strip_row() {
        let mut strip = TerminalStrip::new(Vec::new());
        strip
            .write([RGB8::new(1, 2, 3), RGB8::new(0, 0, 0)].into_iter())
            .unwrap();

        let out = String::from_utf8(strip.into_inner()).unwrap();
        assert_eq!(
            out,
            "\x1b[38;2;1;2;3m\u{25cf}\x1b[38;2;0;0;0m\u{25cf}\x1b[0m\n"
        );
    }
}
