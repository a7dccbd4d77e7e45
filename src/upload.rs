use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use std::fmt;
use std::io::Cursor;

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// An image the user picked, read fully into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// What the bytes look like, as far as we can tell without decoding them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probe {
    pub format: Option<&'static str>,
    pub dimensions: Option<(u32, u32)>,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.dimensions {
            Some((width, height)) => write!(f, "{} x {} px", width, height)?,
            None => write!(f, "unknown size")?,
        }
        if let Some(format) = self.format {
            write!(f, " ({})", format)?;
        }
        Ok(())
    }
}

impl Upload {
    pub fn new(name: String, mime_type: String, bytes: Vec<u8>) -> Self {
        Upload {
            name,
            mime_type,
            bytes,
        }
    }

    /// The payload half of a `data:` URL for these bytes.
    pub fn base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Only reads headers. Formats we can't sniff still get sent.
    pub fn probe(&self) -> Probe {
        let format = image::guess_format(&self.bytes).ok();

        let dimensions = image::io::Reader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());

        Probe {
            format: format.and_then(format_mime_type),
            dimensions,
        }
    }
}

fn format_mime_type(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        ImageFormat::Tiff => Some("image/tiff"),
        ImageFormat::Ico => Some("image/x-icon"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![255u8; (width * height * 4) as usize];
        let mut w = Cursor::new(Vec::new());
        image::png::PNGEncoder::new(&mut w)
            .encode(&pixels, width, height, image::ColorType::Rgba8)
            .unwrap();
        w.into_inner()
    }

    #[test]
    fn only_image_mime_types_pass() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/svg+xml"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime("text/html"));
        assert!(!is_image_mime(""));
        assert!(!is_image_mime("IMAGE/PNG"));
    }

    #[test]
    fn base64_matches_data_url_payload() {
        let upload = Upload::new("a.bin".into(), "image/png".into(), b"hello?".to_vec());
        assert_eq!(upload.base64(), "aGVsbG8/");

        let padded = Upload::new("b.bin".into(), "image/png".into(), vec![0xff, 0xfe]);
        assert_eq!(padded.base64(), "//4=");
    }

    #[test]
    fn probe_reads_png_header() {
        let upload = Upload::new("sketch.png".into(), "image/png".into(), png(7, 3));
        let probe = upload.probe();

        assert_eq!(probe.format, Some("image/png"));
        assert_eq!(probe.dimensions, Some((7, 3)));
        assert_eq!(probe.to_string(), "7 x 3 px (image/png)");
    }

    #[test]
    fn probe_of_garbage_is_empty_not_an_error() {
        let upload = Upload::new("x.heic".into(), "image/heic".into(), vec![1, 2, 3, 4]);
        let probe = upload.probe();

        assert_eq!(
            probe,
            Probe {
                format: None,
                dimensions: None
            }
        );
        assert_eq!(probe.to_string(), "unknown size");
    }
}
