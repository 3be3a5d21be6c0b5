use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use crate::compose::layout::{LineMetrics, TextLine, baseline_of, glyph_top};
use crate::display::surface::DisplaySurface;
use crate::export::glyph_file_name;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{LineboilError, LineboilResult};
use crate::glyph::cache::{CoverageBitmap, GLYPH_SLOTS};
use crate::render::frame::Frame;

/// Delay assumed for GIF frames that declare none, in centiseconds.
pub const DEFAULT_DELAY_CENTIS: u32 = 10;

/// Decoded animation of one glyph. Frames share the glyph's dimensions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GifGlyph {
    width: u32,
    height: u32,
    frames: Vec<CoverageBitmap>,
    delays_centis: Vec<u32>,
}

impl GifGlyph {
    /// Build from decoded frames. All frames must match the first frame's size.
    pub fn new(frames: Vec<CoverageBitmap>, delays_centis: Vec<u32>) -> LineboilResult<Self> {
        if frames.len() != delays_centis.len() {
            return Err(LineboilError::validation("one delay per GIF frame required"));
        }
        let (width, height) = frames
            .first()
            .map(|f| (f.width(), f.height()))
            .unwrap_or((0, 0));
        if frames
            .iter()
            .any(|f| f.width() != width || f.height() != height)
        {
            return Err(LineboilError::validation("GIF frames differ in size"));
        }
        let delays_centis = delays_centis
            .into_iter()
            .map(|d| if d == 0 { DEFAULT_DELAY_CENTIS } else { d })
            .collect();
        Ok(Self {
            width,
            height,
            frames,
            delays_centis,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of animation frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Per-frame delays in centiseconds (zero already replaced by the default).
    pub fn delays_centis(&self) -> &[u32] {
        &self.delays_centis
    }

    /// Index of the frame showing at `time_ms`, looping over the whole animation.
    pub fn frame_index_at(&self, time_ms: u64) -> Option<usize> {
        let total_ms: u64 = self.delays_centis.iter().map(|&d| u64::from(d) * 10).sum();
        if total_ms == 0 {
            return None;
        }
        let local = time_ms % total_ms;
        let mut acc = 0u64;
        for (i, &d) in self.delays_centis.iter().enumerate() {
            acc += u64::from(d) * 10;
            if local < acc {
                return Some(i);
            }
        }
        Some(0)
    }

    /// Coverage frame showing at `time_ms`.
    pub fn frame_at(&self, time_ms: u64) -> Option<&CoverageBitmap> {
        self.frame_index_at(time_ms).map(|i| &self.frames[i])
    }
}

/// Glyph GIFs from a directory, decoded on first use.
///
/// Missing or undecodable files leave an empty slot, which lays out with the fallback advance.
#[derive(Debug)]
pub struct GifGlyphSet {
    dir: PathBuf,
    slots: Vec<Option<GifGlyph>>,
}

impl GifGlyphSet {
    /// Lazily load glyph GIFs from `dir`: files are only decoded on first use of their code.
    pub fn load_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            slots: vec![None; GLYPH_SLOTS],
        }
    }

    /// Source directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode `code` if it has not been attempted yet. Codes outside ASCII are ignored.
    pub fn ensure_loaded(&mut self, code: u32) {
        let Some(slot) = self.slots.get_mut(code as usize) else {
            return;
        };
        if slot.is_some() {
            return;
        }
        let path = self.dir.join(glyph_file_name(code));
        let glyph = if path.exists() {
            decode_glyph_gif(&path).unwrap_or_else(|e| {
                tracing::warn!(code, error = %e, "unreadable glyph GIF, using fallback spacing");
                GifGlyph::default()
            })
        } else {
            tracing::debug!(code, path = %path.display(), "no glyph GIF");
            GifGlyph::default()
        };
        *slot = Some(glyph);
    }

    /// Decode every character of `text`.
    pub fn ensure_text_loaded(&mut self, text: &str) {
        for ch in text.chars() {
            self.ensure_loaded(ch as u32);
        }
    }

    /// Loaded glyph for `code`, if it was attempted.
    pub fn glyph(&self, code: u32) -> Option<&GifGlyph> {
        self.slots.get(code as usize).and_then(Option::as_ref)
    }

    /// Tallest loaded non-descender glyph of `text`.
    pub fn baseline_height(&self, text: &str) -> u32 {
        baseline_of(text, |code| self.glyph(code).map(GifGlyph::height))
    }
}

/// Decode one glyph GIF, taking coverage from the alpha channel.
pub fn decode_glyph_gif(path: &Path) -> LineboilResult<GifGlyph> {
    let codec = |e: image::ImageError| {
        LineboilError::codec(format!("decode GIF '{}': {e}", path.display()))
    };
    let file = File::open(path)?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(codec)?;
    let frames = decoder.into_frames().collect_frames().map_err(codec)?;

    let mut bitmaps = Vec::with_capacity(frames.len());
    let mut delays = Vec::with_capacity(frames.len());
    for frame in frames {
        let (numer, denom) = frame.delay().numer_denom_ms();
        delays.push(numer / denom.max(1) / 10);
        let buf = frame.into_buffer();
        let (w, h) = buf.dimensions();
        let alpha = buf.pixels().map(|p| p.0[3]).collect();
        bitmaps.push(CoverageBitmap::new(w, h, alpha)?);
    }
    GifGlyph::new(bitmaps, delays)
}

/// Compose `lines` from baked glyph animations at wall-clock `time_ms`.
///
/// Placement follows the live compositor: the same baselines, descender drop, quote rule and
/// fallback advance. Every glyph of a line is decoded before its baseline is measured.
pub fn compose_gif_frame(
    frame: &mut Frame,
    lines: &[TextLine],
    set: &mut GifGlyphSet,
    time_ms: u64,
    metrics: &LineMetrics,
) {
    frame.clear();
    for line in lines {
        set.ensure_text_loaded(&line.text);
        let baseline = set.baseline_height(&line.text);
        let mut cursor: i64 = 0;
        for code in line.codes() {
            let Some((glyph, cov)) = set
                .glyph(code)
                .and_then(|g| g.frame_at(time_ms).map(|c| (g, c)))
            else {
                cursor += i64::from(metrics.fallback_advance);
                continue;
            };
            let top = i64::from(glyph_top(code, line.y, baseline, glyph.height()));
            let w = cov.width() as usize;
            if w > 0 {
                for (row, px) in cov.data().chunks_exact(w).enumerate() {
                    for (col, &a) in px.iter().enumerate() {
                        frame.stamp(cursor + col as i64, top + row as i64, a);
                    }
                }
            }
            cursor += i64::from(glyph.width());
        }
    }
}

/// Options for [`play_gifs`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifPlaybackOpts {
    /// Presentation rate.
    pub fps: Fps,
    /// Stop after this many frames. `None` plays until the display quits.
    pub max_ticks: Option<u64>,
    /// Derive time from the tick count instead of the wall clock and skip pacing.
    pub unpaced: bool,
}

/// Present GIF-composed frames to `display` until it quits or `max_ticks` is reached.
///
/// Returns the number of presented frames.
pub fn play_gifs<D: DisplaySurface>(
    set: &mut GifGlyphSet,
    lines: &[TextLine],
    canvas: Canvas,
    metrics: &LineMetrics,
    display: &mut D,
    opts: GifPlaybackOpts,
) -> LineboilResult<u64> {
    let budget = opts.fps.tick_budget();
    let started = Instant::now();
    let mut frame = Frame::try_new(canvas)?;
    let mut ticks = 0u64;
    while !opts.max_ticks.is_some_and(|max| ticks >= max) && !display.poll_quit() {
        let tick_start = Instant::now();
        let time_ms = if opts.unpaced {
            ticks.saturating_mul(budget.as_millis() as u64)
        } else {
            started.elapsed().as_millis() as u64
        };
        compose_gif_frame(&mut frame, lines, set, time_ms, metrics);
        frame.set_stamp(FrameIndex(ticks), time_ms as f32 / 1000.0);
        let res = display.create_resource(&frame)?;
        display.present(&res)?;
        ticks += 1;
        if !opts.unpaced
            && let Some(rest) = budget.checked_sub(tick_start.elapsed())
        {
            std::thread::sleep(rest);
        }
    }
    tracing::info!(frames = ticks, "GIF playback ended");
    Ok(ticks)
}

#[cfg(test)]
#[path = "../../tests/unit/export/playback.rs"]
mod tests;
