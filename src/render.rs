use std::env;
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::process;

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, Delay, Frame, RgbaImage};

use crate::error::Error;
use crate::plan::RenderPlan;

/// Longest side of a preview frame, in pixels.
pub const PREVIEW_MAX_DIM: u32 = 300;

/// Variant of the shared encode pipeline: previews are thumbnailed and
/// encoded at the fastest speed, exports keep full resolution and the
/// encoder's optimizing default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Preview,
    Export,
}

/// A decoded preview animation, ready for display.
pub struct Preview {
    pub frames: Vec<RgbaImage>,
    pub delay_ms: u32,
}

/// Removes the wrapped file on drop, so the preview temp file disappears on
/// every exit path, including errors.
struct TempGif(PathBuf);

impl Drop for TempGif {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.0) {
            if err.kind() != ErrorKind::NotFound {
                log::warn!("could not remove temp file {}: {}", self.0.display(), err);
            }
        }
    }
}

/// Decode every planned frame, normalize it to RGBA, and append it to a GIF
/// at `dest` with a uniform delay and infinite loop count. Stops at the first
/// frame that fails to decode.
pub fn encode_gif(plan: &RenderPlan, dest: &Path, mode: RenderMode) -> Result<(), Error> {
    let file = fs::File::create(dest)?;
    let writer = BufWriter::new(file);

    let mut encoder = match mode {
        RenderMode::Preview => GifEncoder::new_with_speed(writer, 30),
        RenderMode::Export => GifEncoder::new(writer),
    };
    encoder.set_repeat(Repeat::Infinite)?;

    for path in &plan.paths {
        let decoded = image::open(path)?;
        let rgba = match mode {
            RenderMode::Preview => decoded
                .thumbnail(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM)
                .to_rgba8(),
            RenderMode::Export => decoded.to_rgba8(),
        };
        let delay = Delay::from_numer_denom_ms(plan.delay_ms, 1);
        encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
    }

    Ok(())
}

/// Write the final animation to `dest` at full resolution. A failed export
/// leaves nothing behind at the destination.
pub fn export(plan: &RenderPlan, dest: &Path) -> Result<(), Error> {
    encode_gif(plan, dest, RenderMode::Export).map_err(|err| {
        let _ = fs::remove_file(dest);
        err
    })
}

/// Encode the plan into a temporary GIF, load it back into displayable
/// frames, and delete the temp file.
pub fn render_preview(plan: &RenderPlan) -> Result<Preview, Error> {
    let path = preview_temp_path();
    let _guard = TempGif(path.clone());

    encode_gif(plan, &path, RenderMode::Preview)?;

    let reader = BufReader::new(fs::File::open(&path)?);
    let frames = GifDecoder::new(reader)?.into_frames().collect_frames()?;

    Ok(Preview {
        frames: frames.into_iter().map(Frame::into_buffer).collect(),
        delay_ms: plan.delay_ms,
    })
}

/// Per-process temp location for the preview round trip.
pub fn preview_temp_path() -> PathBuf {
    env::temp_dir().join(format!("gifforge-preview-{}.gif", process::id()))
}
