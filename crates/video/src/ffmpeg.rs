use {
    crate::*,
    base::{Tensor, Vec2, log_debug, log_info, log_warn},
    image::ChannelOrder,
    std::{
        io::{self, Read},
        path::{Path, PathBuf},
        process::{Child, ChildStdout, Command, Stdio},
    },
};

/// Configuration for decoding a video file through the system `ffmpeg`.
#[derive(Clone, Debug)]
pub struct FfmpegConfig {
    path: PathBuf,
    order: ChannelOrder,
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            order: ChannelOrder::Bgr,
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }

    /// Set the channel order frames are delivered in (default BGR, the packed capture layout).
    pub fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the ffmpeg program name or path.
    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<String>) -> Self {
        self.ffmpeg = ffmpeg.into();
        self
    }

    /// Set the ffprobe program name or path.
    pub fn with_ffprobe(mut self, ffprobe: impl Into<String>) -> Self {
        self.ffprobe = ffprobe.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn ffmpeg(&self) -> &str {
        &self.ffmpeg
    }

    pub fn ffprobe(&self) -> &str {
        &self.ffprobe
    }
}

/// Frames streamed from an `ffmpeg` child process writing raw packed pixels to stdout.
pub struct FfmpegSource {
    child: Option<Child>,
    stdout: Option<ChildStdout>,
    size: Vec2<usize>,
    order: ChannelOrder,
    next_index: u64,
    ended: bool,
}

impl FfmpegSource {
    pub fn open(config: &FfmpegConfig) -> Result<Self, VideoError> {
        let size = probe_size(config)?;
        if size.area() == 0 {
            return Err(VideoError::Device(format!(
                "video '{}' reports an empty frame size",
                config.path.display()
            )));
        }

        let mut child = Command::new(&config.ffmpeg)
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(&config.path)
            .args([
                "-map",
                "0:v:0",
                "-f",
                "rawvideo",
                "-pix_fmt",
                pix_fmt(config.order),
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                VideoError::Device(format!(
                    "failed to spawn {} (is it installed and on PATH?): {e}",
                    config.ffmpeg
                ))
            })?;

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(VideoError::Device("failed to open ffmpeg stdout".to_string()));
            }
        };

        log_info!(
            "decoding '{}' at {}x{} ({:?})",
            config.path.display(),
            size.x,
            size.y,
            config.order
        );

        Ok(Self {
            child: Some(child),
            stdout: Some(stdout),
            size,
            order: config.order,
            next_index: 0,
            ended: false,
        })
    }

    fn frame_bytes(&self) -> usize {
        self.size.area() * 3
    }
}

impl FrameSource for FfmpegSource {
    fn read(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        if self.ended {
            return Ok(None);
        }
        let frame_bytes = self.frame_bytes();
        let stdout = self
            .stdout
            .as_mut()
            .ok_or_else(|| VideoError::Stream("ffmpeg source already released".to_string()))?;

        let mut buf = vec![0u8; frame_bytes];
        let filled = read_full(stdout, &mut buf).map_err(|e| VideoError::Stream(e.to_string()))?;
        if filled == 0 {
            self.ended = true;
            log_debug!("ffmpeg stream ended after {} frames", self.next_index);
            return Ok(None);
        }
        if filled < frame_bytes {
            self.ended = true;
            return Err(VideoError::Stream(format!(
                "truncated frame {}: got {filled} of {frame_bytes} bytes",
                self.next_index
            )));
        }

        let data = Tensor::new(vec![self.size.y, self.size.x, 3], buf)?;
        let frame = VideoFrame {
            order: self.order,
            data,
        };
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn release(&mut self) -> Result<(), VideoError> {
        drop(self.stdout.take());
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        if !self.ended {
            // stopped early, the decoder may still be running
            if let Err(error) = child.kill() {
                log_debug!("ffmpeg kill: {}", error);
            }
            child
                .wait()
                .map_err(|e| VideoError::Release(format!("failed to reap ffmpeg: {e}")))?;
            return Ok(());
        }

        let status = child
            .wait()
            .map_err(|e| VideoError::Release(format!("failed to reap ffmpeg: {e}")))?;
        if !status.success() {
            return Err(VideoError::Release(format!("ffmpeg exited with {status}")));
        }
        Ok(())
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        if self.child.is_some() {
            if let Err(error) = self.release() {
                log_warn!("ffmpeg source release failed during drop: {}", error);
            }
        }
    }
}

fn pix_fmt(order: ChannelOrder) -> &'static str {
    match order {
        ChannelOrder::Rgb => "rgb24",
        ChannelOrder::Bgr => "bgr24",
    }
}

fn probe_size(config: &FfmpegConfig) -> Result<Vec2<usize>, VideoError> {
    let out = Command::new(&config.ffprobe)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=s=x:p=0",
        ])
        .arg(&config.path)
        .output()
        .map_err(|e| VideoError::Device(format!("failed to run {}: {e}", config.ffprobe)))?;
    if !out.status.success() {
        return Err(VideoError::Device(format!(
            "ffprobe failed for '{}': {}",
            config.path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    let text = String::from_utf8_lossy(&out.stdout);
    parse_size(&text).ok_or_else(|| {
        VideoError::Device(format!(
            "no video stream size in ffprobe output for '{}': {:?}",
            config.path.display(),
            text.trim()
        ))
    })
}

// "1920x960" (possibly followed by more lines or a trailing separator)
fn parse_size(text: &str) -> Option<Vec2<usize>> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let mut parts = line.split('x').filter(|p| !p.is_empty());
    let width = parts.next()?.trim().parse().ok()?;
    let height = parts.next()?.trim().parse().ok()?;
    Some(Vec2::new(width, height))
}

fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
